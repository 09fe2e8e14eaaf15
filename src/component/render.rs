//! Piece rendering strategy.

use crate::board::{PieceCode, RenderError};

use super::config::DEFAULT_PIECE_THEME;

/// What a piece looks like, as far as the host is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PieceVisual {
    /// Source URL of an image
    Image(String),
    /// Inline markup (SVG or similar)
    Markup(String),
}

/// Decides how each piece is drawn.
pub trait PieceRenderer {
    fn render(&self, piece: PieceCode) -> Result<PieceVisual, RenderError>;
}

impl<F> PieceRenderer for F
where
    F: Fn(PieceCode) -> Result<PieceVisual, RenderError>,
{
    fn render(&self, piece: PieceCode) -> Result<PieceVisual, RenderError> {
        self(piece)
    }
}

/// Image URLs from a template such as `img/{piece}.png`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeRenderer {
    template: String,
}

impl ThemeRenderer {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        ThemeRenderer {
            template: template.into(),
        }
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for ThemeRenderer {
    fn default() -> Self {
        ThemeRenderer::new(DEFAULT_PIECE_THEME)
    }
}

impl PieceRenderer for ThemeRenderer {
    fn render(&self, piece: PieceCode) -> Result<PieceVisual, RenderError> {
        if !self.template.contains("{piece}") {
            return Err(RenderError::Unavailable {
                piece: piece.to_string(),
                reason: format!("theme '{}' has no {{piece}} placeholder", self.template),
            });
        }
        Ok(PieceVisual::Image(
            self.template.replace("{piece}", &piece.to_string()),
        ))
    }
}

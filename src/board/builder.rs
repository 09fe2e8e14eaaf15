//! Fluent builder for constructing positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use chessboard::board::{Color, Piece, PositionBuilder};
//!
//! let position = PositionBuilder::new()
//!     .piece("e1".parse().unwrap(), Color::White, Piece::King)
//!     .piece("e8".parse().unwrap(), Color::Black, Piece::King)
//!     .build();
//! assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/8/4K3");
//! ```

use super::{Color, Piece, PieceCode, Position, Square};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug, Default)]
pub struct PositionBuilder {
    position: Position,
}

impl PositionBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            position: Position::empty(),
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        PositionBuilder {
            position: Position::start(),
        }
    }

    /// Place a piece on the board, replacing any occupant.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.position.put(square, PieceCode::new(color, piece));
        self
    }

    /// Place a piece given as a code.
    #[must_use]
    pub fn code(mut self, square: Square, piece: PieceCode) -> Self {
        self.position.put(square, piece);
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.position.remove(square);
        self
    }

    /// Build the position.
    #[must_use]
    pub fn build(self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_starting_position() {
        let built = PositionBuilder::starting_position().build();
        assert_eq!(built.to_fen(), START_FEN);
    }

    #[test]
    fn test_empty_board() {
        let position = PositionBuilder::new()
            .piece(sq("e1"), Color::White, Piece::King)
            .piece(sq("e8"), Color::Black, Piece::King)
            .build();

        assert_eq!(position.len(), 2);
        assert!(position.contains(sq("e1")));
        assert!(!position.contains(sq("a1")));
    }

    #[test]
    fn test_piece_replaces_occupant() {
        let position = PositionBuilder::new()
            .piece(sq("d4"), Color::White, Piece::Pawn)
            .code(sq("d4"), "bQ".parse().unwrap())
            .build();
        assert_eq!(position.get(sq("d4")).unwrap().to_string(), "bQ");
    }

    #[test]
    fn test_clear_square() {
        let position = PositionBuilder::starting_position()
            .clear(sq("a1"))
            .build();

        assert!(!position.contains(sq("a1")));
        assert!(position.contains(sq("b1")));
    }
}

//! Board configuration and attribute-style option parsing.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Color, ConfigError};

pub const DEFAULT_PIECE_THEME: &str = "img/chesspieces/wikipedia/{piece}.png";

/// An animation duration: a millisecond count or one of the named presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Speed {
    /// 200 ms
    Fast,
    /// 600 ms
    Slow,
    Millis(u32),
}

impl Speed {
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u32 {
        match self {
            Speed::Fast => 200,
            Speed::Slow => 600,
            Speed::Millis(ms) => ms,
        }
    }
}

impl FromStr for Speed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fast" => Ok(Speed::Fast),
            "slow" => Ok(Speed::Slow),
            other => other
                .parse::<u32>()
                .map(Speed::Millis)
                .map_err(|_| ConfigError::InvalidValue {
                    name: "speed".to_string(),
                    value: s.to_string(),
                }),
        }
    }
}

/// What happens to a piece released outside the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OffBoardPolicy {
    /// Return the piece to its source square
    #[default]
    Snapback,
    /// Remove the piece from the board
    Trash,
}

impl FromStr for OffBoardPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "snapback" => Ok(OffBoardPolicy::Snapback),
            "trash" => Ok(OffBoardPolicy::Trash),
            _ => Err(ConfigError::InvalidValue {
                name: "drop-off-board".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Which side of the board is drawn at the bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }

    /// Color whose pieces sit at the bottom of the board.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> Color {
        match self {
            Orientation::White => Color::White,
            Orientation::Black => Color::Black,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::White => "white",
            Orientation::Black => "black",
        })
    }
}

impl FromStr for Orientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "white" => Ok(Orientation::White),
            "black" => Ok(Orientation::Black),
            _ => Err(ConfigError::InvalidValue {
                name: "orientation".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Board options, with the defaults of a freshly created board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    pub draggable_pieces: bool,
    pub spare_pieces: bool,
    pub drop_off_board: OffBoardPolicy,
    pub orientation: Orientation,
    pub appear_speed: Speed,
    pub move_speed: Speed,
    pub snapback_speed: Speed,
    pub snap_speed: Speed,
    pub trash_speed: Speed,
    /// Image template; `{piece}` is replaced by the piece code
    pub piece_theme: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardConfig {
    #[must_use]
    pub fn new() -> Self {
        BoardConfig {
            draggable_pieces: false,
            spare_pieces: false,
            drop_off_board: OffBoardPolicy::Snapback,
            orientation: Orientation::White,
            appear_speed: Speed::Millis(200),
            move_speed: Speed::Millis(200),
            snapback_speed: Speed::Millis(60),
            snap_speed: Speed::Millis(30),
            trash_speed: Speed::Millis(100),
            piece_theme: DEFAULT_PIECE_THEME.to_string(),
        }
    }

    /// Apply one option by its attribute name.
    ///
    /// Names are matched case-insensitively; unknown names are ignored.
    /// Boolean options treat a missing value as `true`. On error the
    /// config is left unchanged.
    pub fn apply_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let normalized = name.trim().to_ascii_lowercase();
        let text = value.unwrap_or_default();
        let invalid = || ConfigError::InvalidValue {
            name: normalized.clone(),
            value: text.to_string(),
        };
        let speed = || text.parse::<Speed>().map_err(|_| invalid());

        match normalized.as_str() {
            "draggable-pieces" => self.draggable_pieces = parse_flag(value).ok_or_else(invalid)?,
            "spare-pieces" => self.spare_pieces = parse_flag(value).ok_or_else(invalid)?,
            "drop-off-board" => {
                self.drop_off_board = text.parse().map_err(|_| invalid())?;
            }
            "orientation" => self.orientation = text.parse().map_err(|_| invalid())?,
            "appear-speed" => self.appear_speed = speed()?,
            "move-speed" => self.move_speed = speed()?,
            "snapback-speed" => self.snapback_speed = speed()?,
            "snap-speed" => self.snap_speed = speed()?,
            "trash-speed" => self.trash_speed = speed()?,
            "piece-theme" => {
                self.piece_theme = value
                    .map_or_else(|| DEFAULT_PIECE_THEME.to_string(), str::to_string);
            }
            _ => {}
        }
        Ok(())
    }
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        Some(_) => None,
    }
}

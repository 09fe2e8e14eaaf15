//! Error types for board and component operations.

use std::fmt;

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for piece-code parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PieceError {
    /// Not a color letter (w/b) followed by a piece letter (KQRBNP)
    InvalidCode { code: String },
}

impl fmt::Display for PieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceError::InvalidCode { code } => write!(f, "Invalid piece code '{code}'"),
        }
    }
}

impl std::error::Error for PieceError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Placement field does not have exactly 8 ranks
    WrongRankCount { found: usize },
    /// A rank does not expand to exactly 8 files
    WrongRankWidth { rank: usize, width: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongRankCount { found } => {
                write!(f, "FEN must have 8 ranks, found {found}")
            }
            FenError::WrongRankWidth { rank, width } => {
                write!(f, "Rank {rank} of FEN has {width} files, expected 8")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move string parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// No '-' between the two squares
    MissingSeparator { notation: String },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::MissingSeparator { notation } => {
                write!(f, "Move '{notation}' must have the form 'e2-e4'")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for position mappings built from untyped data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// A key is not a square
    InvalidSquare { key: String },
    /// A value is not a piece code
    InvalidPiece { square: String, value: String },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InvalidSquare { key } => {
                write!(f, "Invalid square '{key}' in position")
            }
            PositionError::InvalidPiece { square, value } => {
                write!(f, "Invalid piece '{value}' on square {square}")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for component option values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value could not be parsed for the named option
    InvalidValue { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Error type for piece renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The renderer could not produce a visual for the piece
    Unavailable { piece: String, reason: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Unavailable { piece, reason } => {
                write!(f, "Unable to render piece {piece}: {reason}")
            }
        }
    }
}

impl std::error::Error for RenderError {}

pub const CODE_INVALID_POSITION: u32 = 6482;
pub const CODE_INVALID_MOVE: u32 = 2826;
pub const CODE_INVALID_OPTION: u32 = 5482;
pub const CODE_RENDER_FAILED: u32 = 8272;

/// Errors surfaced by the public board API.
///
/// Every variant carries a numeric code, reported alongside the message in
/// the `error` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Square(SquareError),
    Piece(PieceError),
    Fen(FenError),
    Position(PositionError),
    Move(MoveParseError),
    Config(ConfigError),
    Render(RenderError),
}

impl BoardError {
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            BoardError::Square(_)
            | BoardError::Piece(_)
            | BoardError::Fen(_)
            | BoardError::Position(_) => CODE_INVALID_POSITION,
            BoardError::Move(_) => CODE_INVALID_MOVE,
            BoardError::Config(_) => CODE_INVALID_OPTION,
            BoardError::Render(_) => CODE_RENDER_FAILED,
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Square(e) => write!(f, "Invalid square: {e}"),
            BoardError::Piece(e) => write!(f, "Invalid piece: {e}"),
            BoardError::Fen(e) => write!(f, "Invalid FEN: {e}"),
            BoardError::Position(e) => write!(f, "Invalid position: {e}"),
            BoardError::Move(e) => write!(f, "Invalid move: {e}"),
            BoardError::Config(e) => write!(f, "Invalid option: {e}"),
            BoardError::Render(e) => write!(f, "Render failure: {e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardError::Square(e) => Some(e),
            BoardError::Piece(e) => Some(e),
            BoardError::Fen(e) => Some(e),
            BoardError::Position(e) => Some(e),
            BoardError::Move(e) => Some(e),
            BoardError::Config(e) => Some(e),
            BoardError::Render(e) => Some(e),
        }
    }
}

impl From<SquareError> for BoardError {
    fn from(e: SquareError) -> Self {
        BoardError::Square(e)
    }
}

impl From<PieceError> for BoardError {
    fn from(e: PieceError) -> Self {
        BoardError::Piece(e)
    }
}

impl From<FenError> for BoardError {
    fn from(e: FenError) -> Self {
        BoardError::Fen(e)
    }
}

impl From<PositionError> for BoardError {
    fn from(e: PositionError) -> Self {
        BoardError::Position(e)
    }
}

impl From<MoveParseError> for BoardError {
    fn from(e: MoveParseError) -> Self {
        BoardError::Move(e)
    }
}

impl From<ConfigError> for BoardError {
    fn from(e: ConfigError) -> Self {
        BoardError::Config(e)
    }
}

impl From<RenderError> for BoardError {
    fn from(e: RenderError) -> Self {
        BoardError::Render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_rank_count() {
        let err = FenError::WrongRankCount { found: 7 };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_move_error_invalid_square() {
        let err = MoveParseError::InvalidSquare {
            notation: "z9-z9".to_string(),
        };
        assert!(err.to_string().contains("z9-z9"));
    }

    #[test]
    fn test_square_error_invalid_notation() {
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_position_error_mentions_value() {
        let err = PositionError::InvalidPiece {
            square: "e4".to_string(),
            value: "wX".to_string(),
        };
        assert!(err.to_string().contains("wX"));
        assert!(err.to_string().contains("e4"));
    }

    #[test]
    fn test_board_error_codes() {
        let fen: BoardError = FenError::WrongRankCount { found: 3 }.into();
        let mv: BoardError = MoveParseError::MissingSeparator {
            notation: "e2".to_string(),
        }
        .into();
        assert_eq!(fen.code(), CODE_INVALID_POSITION);
        assert_eq!(mv.code(), CODE_INVALID_MOVE);
        assert!(std::error::Error::source(&mv).is_some());
    }

    #[test]
    fn test_square_and_piece_errors_convert() {
        let square: BoardError = SquareError::InvalidNotation {
            notation: "j9".to_string(),
        }
        .into();
        let piece: BoardError = PieceError::InvalidCode {
            code: "wX".to_string(),
        }
        .into();
        assert_eq!(square.code(), CODE_INVALID_POSITION);
        assert_eq!(piece.code(), CODE_INVALID_POSITION);
        assert!(square.to_string().contains("j9"));
        assert!(piece.to_string().contains("wX"));
        assert!(std::error::Error::source(&piece).is_some());
    }

    #[test]
    fn test_error_clone() {
        let err = FenError::InvalidPiece { char: 'x' };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}

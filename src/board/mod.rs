//! Board position model and position diffing.
//!
//! Positions are sparse square-to-piece maps with FEN conversion, the
//! validation predicates used at the public boundary, and the diff that
//! turns a position change into per-square animations.
//!
//! # Example
//! ```
//! use chessboard::board::{compute_animations, Animation, Position};
//!
//! let before = Position::start();
//! let after: Position = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR".parse().unwrap();
//! let animations = compute_animations(&before, &after);
//! assert!(matches!(animations.as_slice(), [Animation::Move { .. }]));
//! ```

mod builder;
mod diff;
mod error;
mod fen;
mod position;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use diff::{apply_animations, compute_animations, Animation};
pub use error::{
    BoardError, ConfigError, FenError, MoveParseError, PieceError, PositionError, RenderError,
    SquareError, CODE_INVALID_MOVE, CODE_INVALID_OPTION, CODE_INVALID_POSITION,
    CODE_RENDER_FAILED,
};
pub use fen::{fen_to_position, position_to_fen, valid_fen, START_FEN};
pub use position::{
    apply_moves, find_closest_piece, normalize_position, square_distance, valid_move,
    valid_piece_code, valid_position, valid_square, Position, PositionInput,
};
pub use types::{BoardMove, Color, Piece, PieceCode, Square};

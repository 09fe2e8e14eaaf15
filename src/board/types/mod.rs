//! Core board types.
//!
//! - `Square` - one of the 64 board cells
//! - `Piece`, `Color` and `PieceCode` - piece kinds and two-letter codes like `wK`
//! - `BoardMove` - a `"e2-e4"` relocation request

mod moves;
mod piece;
mod square;

pub use moves::BoardMove;
pub use piece::{Color, Piece, PieceCode};
pub use square::Square;

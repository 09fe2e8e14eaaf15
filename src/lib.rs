//! Headless chessboard: position model, position diffing, drag-and-drop
//! and animation sequencing for a board widget.
//!
//! # Example
//! ```
//! use chessboard::{BoardConfig, Chessboard};
//!
//! let mut board = Chessboard::new(BoardConfig::new());
//! board.start(false);
//! board.move_pieces(["e2-e4"], false).unwrap();
//! assert_eq!(board.fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
//! ```

pub mod board;
pub mod component;

pub use board::{BoardError, Color, Piece, PieceCode, Position, Square};
pub use component::{BoardConfig, BoardEvent, Chessboard};

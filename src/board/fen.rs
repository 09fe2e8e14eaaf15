//! FEN piece-placement parsing and serialization.
//!
//! Only the placement field is meaningful here. Trailing fields (side to
//! move, castling, ...) are accepted on input and never produced on output.

use std::str::FromStr;

use super::error::FenError;
use super::{PieceCode, Position, Square};

/// Piece placement of the standard initial position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Returns true if `fen` has a well-formed piece-placement field.
#[must_use]
pub fn valid_fen(fen: &str) -> bool {
    fen_to_position(fen).is_ok()
}

/// Parse the placement field of a FEN string, rank 8 down to rank 1.
pub fn fen_to_position(fen: &str) -> Result<Position, FenError> {
    let placement = fen.split(' ').next().unwrap_or_default();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut position = Position::empty();
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx;
        let mut file = 0;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
                continue;
            }
            let piece = PieceCode::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
            if let Some(square) = Square::new(rank, file) {
                position.put(square, piece);
            }
            file += 1;
        }
        if file != 8 {
            return Err(FenError::WrongRankWidth {
                rank: rank + 1,
                width: file,
            });
        }
    }

    Ok(position)
}

/// Serialize a position to its FEN piece-placement field.
#[must_use]
pub fn position_to_fen(position: &Position) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(8);
    for rank in (0..8).rev() {
        let mut row = String::new();
        let mut empty = 0;
        for file in 0..8 {
            let piece = Square::new(rank, file).and_then(|sq| position.get(sq));
            if let Some(piece) = piece {
                if empty > 0 {
                    row.push_str(&empty.to_string());
                    empty = 0;
                }
                row.push(piece.to_fen_char());
            } else {
                empty += 1;
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }
    rows.join("/")
}

impl Position {
    /// Parse a position from FEN notation.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        fen_to_position(fen)
    }

    /// Convert the position to FEN piece placement.
    #[must_use]
    pub fn to_fen(&self) -> String {
        position_to_fen(self)
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fen_to_position(s)
    }
}

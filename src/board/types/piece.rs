//! Piece, color and piece-code types.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::error::PieceError;

/// Chess piece types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// Spare-piece order: king first, pawn last.
    pub const SPARE_ORDER: [Piece; 6] = [
        Piece::King,
        Piece::Queen,
        Piece::Rook,
        Piece::Bishop,
        Piece::Knight,
        Piece::Pawn,
    ];

    /// Parse a piece from its letter, ignoring case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    /// Convert piece to lowercase character
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }
}

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Prefix letter used in piece codes ('w' or 'b')
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A colored piece, written as a two-letter code such as `wK` or `bP`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceCode {
    pub color: Color,
    pub piece: Piece,
}

impl PieceCode {
    #[inline]
    #[must_use]
    pub const fn new(color: Color, piece: Piece) -> Self {
        PieceCode { color, piece }
    }

    /// Parse a FEN piece letter: uppercase is white, lowercase is black.
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let piece = Piece::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(PieceCode { color, piece })
    }

    /// FEN letter with case based on color (uppercase for White)
    #[inline]
    #[must_use]
    pub fn to_fen_char(self) -> char {
        let c = self.piece.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// The twelve piece codes, white then black, each in spare-piece order.
    #[must_use]
    pub fn all() -> impl Iterator<Item = PieceCode> {
        [Color::White, Color::Black].into_iter().flat_map(|color| {
            Piece::SPARE_ORDER
                .into_iter()
                .map(move |piece| PieceCode { color, piece })
        })
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.color.to_char(),
            self.piece.to_char().to_ascii_uppercase()
        )
    }
}

impl FromStr for PieceCode {
    type Err = PieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PieceError::InvalidCode {
            code: s.to_string(),
        };
        let mut chars = s.chars();
        let (Some(color), Some(kind), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let color = match color {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return Err(invalid()),
        };
        // Piece types are uppercase only: "wp" is not a piece code.
        if !kind.is_ascii_uppercase() {
            return Err(invalid());
        }
        let piece = Piece::from_char(kind).ok_or_else(invalid)?;
        Ok(PieceCode { color, piece })
    }
}

#[cfg(feature = "serde")]
impl Serialize for PieceCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PieceCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::error::SquareError;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// A square on the chess board, represented as (rank, file).
///
/// Both coordinates are 0-based: rank 0 is rank 1, file 0 is file a.
/// Squares order files-then-ranks (a1, a2, ..., a8, b1, ...), which is the
/// enumeration order used by the animation diff when breaking ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square(u8, u8); // (rank, file)

impl Square {
    /// All 64 squares in enumeration order (files-then-ranks).
    pub const ALL: [Square; 64] = {
        let mut squares = [Square(0, 0); 64];
        let mut i = 0;
        while i < 64 {
            squares[i] = Square((i % 8) as u8, (i / 8) as u8);
            i += 1;
        }
        squares
    };

    /// Create a new square with bounds checking
    #[must_use]
    pub fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank as u8, file as u8))
        } else {
            None
        }
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0 as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        self.1 as usize
    }

    /// Position of this square in `Square::ALL`.
    #[inline]
    #[must_use]
    pub const fn enumeration_index(self) -> usize {
        self.1 as usize * 8 + self.0 as usize
    }

    /// Flip the square vertically (e.g., a1 <-> a8)
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square(7 - self.0, self.1)
    }

    /// Flip the square horizontally (e.g., a1 <-> h1)
    #[inline]
    #[must_use]
    pub const fn flip_horizontal(self) -> Self {
        Square(self.0, 7 - self.1)
    }

    /// Chebyshev distance: the larger of the file delta and the rank delta.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Square) -> u8 {
        self.0.abs_diff(other.0).max(self.1.abs_diff(other.1))
    }

    /// File letter ('a'..='h').
    #[inline]
    #[must_use]
    pub fn file_char(self) -> char {
        FILES[self.file()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.0 + 1)
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.enumeration_index().cmp(&other.enumeration_index())
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square(rank as u8, file as u8))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }

        let file = match bytes[0] {
            b'a'..=b'h' => bytes[0] - b'a',
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => bytes[1] - b'1',
            _ => return Err(invalid()),
        };

        Ok(Square(rank, file))
    }
}

#[cfg(feature = "serde")]
impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq.rank(), 3);
        assert_eq!(sq.file(), 4);
        assert_eq!(sq.to_string(), "e4");
    }

    #[test]
    fn test_enumeration_order_is_files_then_ranks() {
        assert_eq!(Square::ALL[0].to_string(), "a1");
        assert_eq!(Square::ALL[1].to_string(), "a2");
        assert_eq!(Square::ALL[8].to_string(), "b1");
        assert_eq!(Square::ALL[63].to_string(), "h8");
        for (i, sq) in Square::ALL.iter().enumerate() {
            assert_eq!(sq.enumeration_index(), i);
        }
        let a8: Square = "a8".parse().unwrap();
        let b1: Square = "b1".parse().unwrap();
        assert!(a8 < b1);
    }

    #[test]
    fn test_distance() {
        let a1: Square = "a1".parse().unwrap();
        let h8: Square = "h8".parse().unwrap();
        let c2: Square = "c2".parse().unwrap();
        assert_eq!(a1.distance(h8), 7);
        assert_eq!(a1.distance(c2), 2);
        assert_eq!(c2.distance(c2), 0);
    }

    #[test]
    fn test_rejects_bad_notation() {
        for bad in ["i1", "a9", "A1", "a0", "", "e44", "4e"] {
            assert!(bad.parse::<Square>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_try_from_bounds() {
        assert!(matches!(
            Square::try_from((8, 0)),
            Err(SquareError::RankOutOfBounds { rank: 8 })
        ));
        assert!(matches!(
            Square::try_from((0, 9)),
            Err(SquareError::FileOutOfBounds { file: 9 })
        ));
        assert_eq!(Square::try_from((3, 4)).unwrap().to_string(), "e4");
    }

    #[test]
    fn test_flips() {
        let b2: Square = "b2".parse().unwrap();
        assert_eq!(b2.flip_vertical().to_string(), "b7");
        assert_eq!(b2.flip_horizontal().to_string(), "g2");
    }
}

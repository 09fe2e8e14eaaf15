//! Move strings of the form `"e2-e4"`.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::square::Square;
use crate::board::error::MoveParseError;

/// A relocation request: whatever stands on `from` goes to `to`.
///
/// No chess rules are applied; any two squares form a valid move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardMove {
    pub from: Square,
    pub to: Square,
}

impl BoardMove {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        BoardMove { from, to }
    }
}

impl fmt::Display for BoardMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for BoardMove {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s.split_once('-').ok_or_else(|| MoveParseError::MissingSeparator {
            notation: s.to_string(),
        })?;
        let invalid = || MoveParseError::InvalidSquare {
            notation: s.to_string(),
        };
        let from = from.parse::<Square>().map_err(|_| invalid())?;
        let to = to.parse::<Square>().map_err(|_| invalid())?;
        Ok(BoardMove { from, to })
    }
}

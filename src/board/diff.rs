//! Position diffing: the per-square animations that turn one position into another.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::position::find_closest_piece;
use super::{PieceCode, Position, Square};

/// One square's transition between two positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Animation {
    /// A piece relocates from `source` to `destination`
    Move {
        source: Square,
        destination: Square,
        piece: PieceCode,
    },
    /// A piece appears with no prior instance
    Add { square: Square, piece: PieceCode },
    /// A piece disappears with no destination
    Clear { square: Square, piece: PieceCode },
}

impl Animation {
    /// The square this animation ends on (the destination for a move).
    #[inline]
    #[must_use]
    pub const fn square(&self) -> Square {
        match *self {
            Animation::Move { destination, .. } => destination,
            Animation::Add { square, .. } | Animation::Clear { square, .. } => square,
        }
    }

    #[inline]
    #[must_use]
    pub const fn piece(&self) -> PieceCode {
        match *self {
            Animation::Move { piece, .. }
            | Animation::Add { piece, .. }
            | Animation::Clear { piece, .. } => piece,
        }
    }
}

/// Compute the animations that take `previous` to `next`.
///
/// Squares identical in both positions are skipped. Every remaining target
/// square claims the nearest matching piece still unclaimed in `previous`
/// (a greedy match, not a minimum-cost assignment). Unmatched targets become
/// adds; unmatched leftovers become clears, except on squares a move landed
/// on, where the old occupant was captured and the move already covers it.
///
/// The result lists moves, then adds, then clears, each in square
/// enumeration order.
#[must_use]
pub fn compute_animations(previous: &Position, next: &Position) -> Vec<Animation> {
    let mut prev = previous.clone();
    let mut next = next.clone();

    let unchanged: Vec<Square> = next
        .iter()
        .filter(|&(sq, piece)| prev.get(sq) == Some(piece))
        .map(|(sq, _)| sq)
        .collect();
    for sq in unchanged {
        prev.remove(sq);
        next.remove(sq);
    }

    let mut animations = Vec::new();
    let mut moved_to = BTreeSet::new();

    let targets: Vec<(Square, PieceCode)> = next.iter().collect();
    for (destination, piece) in targets {
        if let Some(source) = find_closest_piece(&prev, piece, destination) {
            animations.push(Animation::Move {
                source,
                destination,
                piece,
            });
            prev.remove(source);
            next.remove(destination);
            moved_to.insert(destination);
        }
    }

    animations.extend(
        next.iter()
            .map(|(square, piece)| Animation::Add { square, piece }),
    );

    animations.extend(
        prev.iter()
            .filter(|(square, _)| !moved_to.contains(square))
            .map(|(square, piece)| Animation::Clear { square, piece }),
    );

    animations
}

/// Apply the net effect of `animations` to `previous`, ignoring timing.
///
/// All sources and cleared squares are vacated before any piece lands, so
/// the moves behave as one simultaneous step.
#[must_use]
pub fn apply_animations(previous: &Position, animations: &[Animation]) -> Position {
    let mut position = previous.clone();
    for animation in animations {
        match *animation {
            Animation::Move { source, .. } => {
                position.remove(source);
            }
            Animation::Clear { square, .. } => {
                position.remove(square);
            }
            Animation::Add { .. } => {}
        }
    }
    for animation in animations {
        match *animation {
            Animation::Move {
                destination, piece, ..
            } => {
                position.put(destination, piece);
            }
            Animation::Add { square, piece } => {
                position.put(square, piece);
            }
            Animation::Clear { .. } => {}
        }
    }
    position
}

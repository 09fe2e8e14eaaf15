//! Drag-and-drop state.
//!
//! A drag lives from pointer-down on a piece until the transition that
//! settles it (snapback, snap or trash) completes. At most one drag exists
//! per board. The transitions themselves are driven by `Chessboard`; this
//! module holds the states and the pure release computations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{PieceCode, Position, Square};

use super::config::OffBoardPolicy;
use super::events::DropAction;
use super::geometry::Location;

/// Where a dragged piece was picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DragSource {
    Square(Square),
    /// The off-board supply of spare pieces
    Spare,
}

impl DragSource {
    #[inline]
    #[must_use]
    pub const fn square(self) -> Option<Square> {
        match self {
            DragSource::Square(sq) => Some(sq),
            DragSource::Spare => None,
        }
    }
}

impl fmt::Display for DragSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragSource::Square(sq) => write!(f, "{sq}"),
            DragSource::Spare => f.write_str("spare"),
        }
    }
}

/// Which device a pointer event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    /// A touch point, by its identifier
    Touch(i32),
}

/// A pointer event in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub id: PointerId,
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    #[must_use]
    pub const fn mouse(x: f64, y: f64) -> Self {
        Pointer {
            id: PointerId::Mouse,
            x,
            y,
        }
    }

    #[must_use]
    pub const fn touch(id: i32, x: f64, y: f64) -> Self {
        Pointer {
            id: PointerId::Touch(id),
            x,
            y,
        }
    }
}

/// Click-to-move progress of an active drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    /// Pointer is held down since the pick-up
    Held,
    /// Released on the pick-up spot; the piece stays picked up
    Armed,
    /// Pressed again while armed; the next release resolves the move
    Confirming,
}

/// Pointer is down (or armed) and the piece follows it.
#[derive(Clone, Debug, PartialEq)]
pub struct Dragging {
    pub pointer_id: PointerId,
    pub x: f64,
    pub y: f64,
    pub piece: PieceCode,
    /// Square currently under the pointer
    pub location: Location,
    pub source: DragSource,
    /// Location at pick-up: the source square, or off-board for spares
    pub origin: Location,
    pub press: Press,
}

/// Piece returning to its source square from the release point.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapback {
    pub x: f64,
    pub y: f64,
    pub piece: PieceCode,
    pub source: Square,
}

/// Piece fading out where it was released.
#[derive(Clone, Debug, PartialEq)]
pub struct Trash {
    pub x: f64,
    pub y: f64,
    pub piece: PieceCode,
    pub source: DragSource,
}

/// Piece settling onto its drop square from the release point.
#[derive(Clone, Debug, PartialEq)]
pub struct Snap {
    pub x: f64,
    pub y: f64,
    pub piece: PieceCode,
    pub target: Square,
    pub source: DragSource,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    Dragging(Dragging),
    Snapback(Snapback),
    Trash(Trash),
    Snap(Snap),
}

impl DragState {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            DragState::Dragging(_) => "dragging",
            DragState::Snapback(_) => "snapback",
            DragState::Trash(_) => "trash",
            DragState::Snap(_) => "snap",
        }
    }

    /// Returns true once the piece was released and is settling.
    #[must_use]
    pub const fn is_settling(&self) -> bool {
        !matches!(self, DragState::Dragging(_))
    }

    #[must_use]
    pub fn piece(&self) -> PieceCode {
        match self {
            DragState::Dragging(d) => d.piece,
            DragState::Snapback(s) => s.piece,
            DragState::Trash(t) => t.piece,
            DragState::Snap(s) => s.piece,
        }
    }

    /// Pointer-tracking fields, valid only while dragging.
    pub fn as_dragging(&self) -> Result<&Dragging, UnexpectedDragState> {
        match self {
            DragState::Dragging(d) => Ok(d),
            other => Err(UnexpectedDragState {
                expected: "dragging",
                found: other.name(),
            }),
        }
    }

    pub(crate) fn as_dragging_mut(&mut self) -> Result<&mut Dragging, UnexpectedDragState> {
        match self {
            DragState::Dragging(d) => Ok(d),
            other => Err(UnexpectedDragState {
                expected: "dragging",
                found: other.name(),
            }),
        }
    }
}

/// Drag-specific fields were read in the wrong state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnexpectedDragState {
    pub expected: &'static str,
    pub found: &'static str,
}

impl fmt::Display for UnexpectedDragState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Drag state is '{}', expected '{}'",
            self.found, self.expected
        )
    }
}

impl std::error::Error for UnexpectedDragState {}

/// Action taken on release before listeners weigh in.
#[must_use]
pub fn tentative_action(target: Location, policy: OffBoardPolicy) -> DropAction {
    match (target, policy) {
        (Location::Offboard, OffBoardPolicy::Snapback) => DropAction::Snapback,
        (Location::Offboard, OffBoardPolicy::Trash) => DropAction::Trash,
        (Location::Square(_), _) => DropAction::Drop,
    }
}

/// Position that would result from releasing `piece` at `target`.
///
/// A board source loses its piece; an on-board target gains it. A spare
/// released off the board leaves the position as it was.
#[must_use]
pub fn candidate_position(
    current: &Position,
    source: DragSource,
    target: Location,
    piece: PieceCode,
) -> Position {
    let mut next = current.clone();
    if let DragSource::Square(sq) = source {
        next.remove(sq);
    }
    if let Location::Square(sq) = target {
        next.put(sq, piece);
    }
    next
}

//! Notifications delivered to the host application.

use std::fmt;

use crate::board::{PieceCode, Position, Square};

use super::config::Orientation;
use super::drag::DragSource;
use super::geometry::Location;

/// Outcome of releasing a dragged piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropAction {
    /// Return the piece to where it came from
    Snapback,
    /// Remove the piece
    Trash,
    /// Settle the piece on the target square
    Drop,
}

impl fmt::Display for DropAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DropAction::Snapback => "snapback",
            DropAction::Trash => "trash",
            DropAction::Drop => "drop",
        })
    }
}

/// Pointer entered or left a square while no drag is active.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareHoverEvent {
    pub square: Square,
    pub piece: Option<PieceCode>,
    pub position: Position,
    pub orientation: Orientation,
}

/// A drag is about to begin. Listeners may cancel it.
#[derive(Clone, Debug, PartialEq)]
pub struct DragStartEvent {
    pub source: DragSource,
    pub piece: PieceCode,
    pub position: Position,
    pub orientation: Orientation,
    canceled: bool,
}

impl DragStartEvent {
    pub(crate) fn new(
        source: DragSource,
        piece: PieceCode,
        position: Position,
        orientation: Orientation,
    ) -> Self {
        DragStartEvent {
            source,
            piece,
            position,
            orientation,
            canceled: false,
        }
    }

    /// Abort the drag; the board stays exactly as it was.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }
}

/// The dragged piece moved onto a different square (or off the board).
#[derive(Clone, Debug, PartialEq)]
pub struct DragMoveEvent {
    pub new_location: Location,
    pub old_location: Location,
    pub source: DragSource,
    pub piece: PieceCode,
    pub position: Position,
    pub orientation: Orientation,
}

/// The dragged piece was released. Listeners may override the action.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvent {
    pub source: DragSource,
    pub target: Location,
    pub piece: PieceCode,
    pub new_position: Position,
    pub old_position: Position,
    pub orientation: Orientation,
    action: DropAction,
}

impl DropEvent {
    pub(crate) fn new(
        source: DragSource,
        target: Location,
        piece: PieceCode,
        new_position: Position,
        old_position: Position,
        orientation: Orientation,
        action: DropAction,
    ) -> Self {
        DropEvent {
            source,
            target,
            piece,
            new_position,
            old_position,
            orientation,
            action,
        }
    }

    /// The action the board will take once listeners return.
    #[must_use]
    pub fn action(&self) -> DropAction {
        self.action
    }

    pub fn set_action(&mut self, action: DropAction) {
        self.action = action;
    }
}

/// A snapback animation finished.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapbackEndEvent {
    pub piece: PieceCode,
    pub square: Square,
    pub position: Position,
    pub orientation: Orientation,
}

/// A dropped piece finished settling on its square.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapEndEvent {
    pub source: DragSource,
    pub square: Square,
    pub piece: PieceCode,
}

/// A batch of position animations finished.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveEndEvent {
    pub old_position: Position,
    pub new_position: Position,
}

/// The committed position changed.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeEvent {
    pub old_value: Position,
    pub new_value: Position,
}

/// Invalid input reached a public operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEvent {
    pub code: u32,
    pub message: String,
}

/// Every notification the board emits.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardEvent {
    MouseoverSquare(SquareHoverEvent),
    MouseoutSquare(SquareHoverEvent),
    DragStart(DragStartEvent),
    DragMove(DragMoveEvent),
    Drop(DropEvent),
    SnapbackEnd(SnapbackEndEvent),
    SnapEnd(SnapEndEvent),
    MoveEnd(MoveEndEvent),
    Change(ChangeEvent),
    Error(ErrorEvent),
}

impl BoardEvent {
    /// Event name as seen by hosts (`"drag-start"`, `"change"`, ...).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            BoardEvent::MouseoverSquare(_) => "mouseover-square",
            BoardEvent::MouseoutSquare(_) => "mouseout-square",
            BoardEvent::DragStart(_) => "drag-start",
            BoardEvent::DragMove(_) => "drag-move",
            BoardEvent::Drop(_) => "drop",
            BoardEvent::SnapbackEnd(_) => "snapback-end",
            BoardEvent::SnapEnd(_) => "snap-end",
            BoardEvent::MoveEnd(_) => "move-end",
            BoardEvent::Change(_) => "change",
            BoardEvent::Error(_) => "error",
        }
    }
}

/// Receives board notifications.
///
/// Events are passed mutably so that `drag-start` can be canceled and
/// `drop` can have its action overridden; other events are informational.
pub trait BoardListener {
    fn on_event(&mut self, event: &mut BoardEvent);
}

impl<F> BoardListener for F
where
    F: FnMut(&mut BoardEvent),
{
    fn on_event(&mut self, event: &mut BoardEvent) {
        self(event)
    }
}

/// Handle returned by `Chessboard::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Subscribed listeners, notified in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn BoardListener>)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn BoardListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn dispatch(&mut self, event: &mut BoardEvent) {
        for (_, listener) in &mut self.entries {
            listener.on_event(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

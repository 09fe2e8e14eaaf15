//! The interactive board component.
//!
//! `Chessboard` owns a position and turns host input (setters, pointer
//! events, paint and transition signals) into position commits, drag
//! state, animation sprites and notifications. Drawing is left to the
//! host through the `BoardGeometry` and `PieceRenderer` seams.

mod animation;
mod config;
mod controller;
mod drag;
mod events;
mod geometry;
mod render;

pub use animation::{
    AnimationSequencer, AnimationStage, AnimationTiming, SequencePhase, Sprite,
};
pub use config::{BoardConfig, OffBoardPolicy, Orientation, Speed, DEFAULT_PIECE_THEME};
pub use controller::{BoardFrame, Chessboard, PlacedPiece};
pub use drag::{
    candidate_position, tentative_action, DragSource, DragState, Dragging, Pointer, PointerId,
    Press, Snap, Snapback, Trash, UnexpectedDragState,
};
pub use events::{
    BoardEvent, BoardListener, ChangeEvent, DragMoveEvent, DragStartEvent, DropAction, DropEvent,
    ErrorEvent, ListenerId, MoveEndEvent, SnapEndEvent, SnapbackEndEvent, SquareHoverEvent,
};
pub use geometry::{BoardGeometry, GridGeometry, Location, Rect};
pub use render::{PieceRenderer, PieceVisual, ThemeRenderer};

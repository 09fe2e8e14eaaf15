//! The board component.
//!
//! `Chessboard` owns one position and everything that changes it: the
//! public setters, the drag state machine and the animation sequencer.
//! Every change of the position goes through `commit_position`, which is
//! the only place a `change` notification is produced.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, trace, warn};

use crate::board::{
    apply_moves, compute_animations, normalize_position, BoardError, BoardMove, PieceCode,
    Position, PositionInput, Square,
};

use super::animation::{AnimationSequencer, AnimationTiming, SequencePhase, Sprite};
use super::config::{BoardConfig, Orientation, Speed, DEFAULT_PIECE_THEME};
use super::drag::{
    candidate_position, tentative_action, DragSource, DragState, Dragging, Pointer, Press, Snap,
    Snapback, Trash,
};
use super::events::{
    BoardEvent, BoardListener, ChangeEvent, DragMoveEvent, DragStartEvent, DropAction, DropEvent,
    ErrorEvent, ListenerId, Listeners, SnapEndEvent, SnapbackEndEvent, SquareHoverEvent,
};
use super::geometry::{BoardGeometry, GridGeometry, Location, Rect};
use super::render::{PieceRenderer, PieceVisual, ThemeRenderer};

/// A piece resting on its square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedPiece {
    pub square: Square,
    pub piece: PieceCode,
    pub rect: Rect,
}

/// Everything the rendering layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardFrame {
    pub orientation: Orientation,
    /// Pieces drawn in place; squares under an animation or the drag are left out
    pub pieces: Vec<PlacedPiece>,
    pub spare_pieces: Vec<(PieceCode, Rect)>,
    pub highlights: Vec<Square>,
    pub animations: Vec<Sprite>,
    pub dragged: Option<Sprite>,
}

/// Progress of a released piece's settle transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Settle {
    Staged,
    Running,
}

pub struct Chessboard {
    position: Position,
    config: BoardConfig,
    geometry: Box<dyn BoardGeometry>,
    renderer: Option<Box<dyn PieceRenderer>>,
    drag: Option<DragState>,
    settle: Settle,
    highlights: BTreeSet<Square>,
    sequencer: AnimationSequencer,
    listeners: Listeners,
    attached: bool,
}

impl Default for Chessboard {
    fn default() -> Self {
        Self::new(BoardConfig::new())
    }
}

impl fmt::Debug for Chessboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chessboard")
            .field("position", &self.position.to_fen())
            .field("config", &self.config)
            .field("drag", &self.drag)
            .field("phase", &self.sequencer.phase())
            .field("listeners", &self.listeners)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl Chessboard {
    /// An empty board laid out on a default `GridGeometry`.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_geometry(config, GridGeometry::default())
    }

    #[must_use]
    pub fn with_geometry(config: BoardConfig, geometry: impl BoardGeometry + 'static) -> Self {
        let mut geometry: Box<dyn BoardGeometry> = Box::new(geometry);
        geometry.show_spare_pieces(config.spare_pieces);
        Chessboard {
            position: Position::empty(),
            config,
            geometry,
            renderer: None,
            drag: None,
            settle: Settle::Staged,
            highlights: BTreeSet::new(),
            sequencer: AnimationSequencer::new(),
            listeners: Listeners::default(),
            attached: false,
        }
    }

    /// Replace the theme-based renderer.
    pub fn set_renderer(&mut self, renderer: impl PieceRenderer + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    pub fn subscribe(&mut self, listener: impl BoardListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // =====================================================================
    // GETTERS
    // =====================================================================

    /// A copy of the current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position.clone()
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The active drag, or `None` when idle.
    #[must_use]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn highlighted_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.highlights.iter().copied()
    }

    #[must_use]
    pub fn animation_phase(&self) -> SequencePhase {
        self.sequencer.phase()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.sequencer.is_animating()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns true while window-level pointer events must be routed here.
    #[must_use]
    pub fn captures_pointer(&self) -> bool {
        self.attached && matches!(self.drag, Some(DragState::Dragging(_)))
    }

    // =====================================================================
    // PUBLIC OPERATIONS
    // =====================================================================

    /// Set the position from a `Position`, a FEN string or `"start"`.
    ///
    /// Invalid input is reported through an `error` event and returned;
    /// the board is left untouched.
    pub fn set_position(
        &mut self,
        input: impl Into<PositionInput>,
        animate: bool,
    ) -> Result<(), BoardError> {
        let next = normalize_position(input).map_err(|err| self.report(err))?;
        self.show_position(next, animate);
        Ok(())
    }

    pub fn start(&mut self, animate: bool) {
        self.show_position(Position::start(), animate);
    }

    pub fn clear(&mut self, animate: bool) {
        self.show_position(Position::empty(), animate);
    }

    /// Apply `"e2-e4"` style moves in order and return the new position.
    ///
    /// All moves are parsed before any is applied: one malformed move
    /// rejects the whole call. Moves from empty squares are skipped.
    pub fn move_pieces<I>(&mut self, moves: I, animate: bool) -> Result<Position, BoardError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let parsed = moves
            .into_iter()
            .map(|mv| mv.as_ref().parse::<BoardMove>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| self.report(err.into()))?;
        let next = apply_moves(&self.position, parsed);
        self.show_position(next.clone(), animate);
        Ok(next)
    }

    pub fn flip(&mut self) {
        self.set_orientation(self.config.orientation.flipped());
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.config.orientation != orientation {
            debug!("orientation set to {orientation}");
        }
        self.config.orientation = orientation;
    }

    /// Apply an option by attribute name. `position` sets the position
    /// without animation; every other name goes to `BoardConfig`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), BoardError> {
        if name.trim().eq_ignore_ascii_case("position") {
            let input = value.map_or(PositionInput::Empty, PositionInput::from);
            return self.set_position(input, false);
        }
        self.config
            .apply_option(name, value)
            .map_err(|err| self.report(err.into()))?;
        self.geometry.show_spare_pieces(self.config.spare_pieces);
        trace!("option {name} applied");
        Ok(())
    }

    pub fn resize(&mut self, board_width: f64) {
        trace!("resize to {board_width}");
        self.geometry.resize(board_width);
    }

    /// Visual for a piece. A failing renderer is reported and the default
    /// theme is used instead.
    pub fn render_piece(&mut self, piece: PieceCode) -> PieceVisual {
        let rendered = match &self.renderer {
            Some(renderer) => renderer.render(piece),
            None => ThemeRenderer::new(self.config.piece_theme.as_str()).render(piece),
        };
        match rendered {
            Ok(visual) => visual,
            Err(err) => {
                self.report(err.into());
                PieceVisual::Image(DEFAULT_PIECE_THEME.replace("{piece}", &piece.to_string()))
            }
        }
    }

    #[must_use]
    pub fn frame(&self) -> BoardFrame {
        let orientation = self.config.orientation;
        let hidden = match &self.drag {
            Some(DragState::Dragging(Dragging {
                source: DragSource::Square(sq),
                ..
            })) => Some(*sq),
            Some(DragState::Snapback(snapback)) => Some(snapback.source),
            Some(DragState::Snap(snap)) => Some(snap.target),
            _ => None,
        };
        let pieces = self
            .position
            .iter()
            .filter(|&(sq, _)| Some(sq) != hidden && !self.sequencer.covers(sq))
            .map(|(square, piece)| PlacedPiece {
                square,
                piece,
                rect: self.geometry.square_rect(square, orientation),
            })
            .collect();
        let spare_pieces = if self.config.spare_pieces {
            PieceCode::all()
                .into_iter()
                .filter_map(|piece| {
                    self.geometry
                        .spare_piece_rect(piece, orientation)
                        .map(|rect| (piece, rect))
                })
                .collect()
        } else {
            Vec::new()
        };
        BoardFrame {
            orientation,
            pieces,
            spare_pieces,
            highlights: self.highlights.iter().copied().collect(),
            animations: self.sequencer.sprites(
                &*self.geometry,
                orientation,
                self.config.spare_pieces,
            ),
            dragged: self.drag_sprite(),
        }
    }

    // =====================================================================
    // HOST LIFECYCLE AND SIGNALS
    // =====================================================================

    pub fn attach(&mut self) {
        debug!("board attached");
        self.attached = true;
    }

    /// Release pointer capture and drop all in-flight work.
    pub fn detach(&mut self) {
        debug!("board detached");
        self.attached = false;
        self.sequencer.abandon();
        self.drag = None;
        self.highlights.clear();
    }

    /// The last frame was painted.
    pub fn frame_committed(&mut self) {
        let settling = self.drag.as_ref().is_some_and(|state| state.is_settling());
        if settling && self.settle == Settle::Staged {
            self.settle = Settle::Running;
        }
        if let Some(end) = self.sequencer.frame_committed() {
            self.emit(BoardEvent::MoveEnd(end));
        }
    }

    /// The transition of batch animation `index` ended.
    pub fn transition_ended(&mut self, index: usize) {
        if let Some(end) = self.sequencer.transition_ended(index) {
            self.emit(BoardEvent::MoveEnd(end));
        }
    }

    /// The dragged piece's settle transition ended.
    pub fn drag_transition_ended(&mut self) {
        if self.drag.as_ref().is_some_and(|state| state.is_settling()) {
            self.finish_drag();
        }
    }

    // =====================================================================
    // POINTER INPUT
    // =====================================================================

    pub fn pointer_enter_square(&mut self, square: Square) {
        if self.drag.is_none() {
            let event = self.hover_event(square);
            self.emit(BoardEvent::MouseoverSquare(event));
        }
    }

    pub fn pointer_leave_square(&mut self, square: Square) {
        if self.drag.is_none() {
            let event = self.hover_event(square);
            self.emit(BoardEvent::MouseoutSquare(event));
        }
    }

    /// Pointer pressed on a square. Returns true if a drag started.
    pub fn pointer_down_square(&mut self, square: Square, pointer: Pointer) -> bool {
        if self.drag.is_some() {
            self.pointer_down(pointer);
            return false;
        }
        if !self.config.draggable_pieces {
            return false;
        }
        match self.position.get(square) {
            Some(piece) => self.begin_drag(DragSource::Square(square), piece, pointer),
            None => false,
        }
    }

    /// Pointer pressed on a spare piece. Returns true if a drag started.
    pub fn pointer_down_spare(&mut self, piece: PieceCode, pointer: Pointer) -> bool {
        if self.drag.is_some() {
            self.pointer_down(pointer);
            return false;
        }
        if !self.config.spare_pieces {
            return false;
        }
        self.begin_drag(DragSource::Spare, piece, pointer)
    }

    /// Pointer pressed anywhere else. Returns true if it confirmed an
    /// armed click-to-move.
    pub fn pointer_down(&mut self, pointer: Pointer) -> bool {
        match self.drag.as_mut() {
            Some(DragState::Dragging(dragging)) if dragging.press == Press::Armed => {
                dragging.press = Press::Confirming;
                dragging.pointer_id = pointer.id;
                trace!("armed {} confirmed", dragging.piece);
            }
            _ => return false,
        }
        self.track(pointer);
        true
    }

    pub fn pointer_move(&mut self, pointer: Pointer) {
        let owned = matches!(
            &self.drag,
            Some(DragState::Dragging(dragging)) if dragging.pointer_id == pointer.id
        );
        if owned {
            self.track(pointer);
        }
    }

    pub fn pointer_up(&mut self, pointer: Pointer) {
        let orientation = self.config.orientation;
        let Some(DragState::Dragging(dragging)) = self.drag.as_mut() else {
            return;
        };
        if dragging.pointer_id != pointer.id {
            return;
        }
        dragging.x = pointer.x;
        dragging.y = pointer.y;
        let location = self.geometry.hit_test(pointer.x, pointer.y, orientation);
        let at_origin = match dragging.source {
            DragSource::Square(_) => location == dragging.origin,
            DragSource::Spare => self
                .geometry
                .spare_piece_rect(dragging.piece, orientation)
                .is_some_and(|rect| rect.contains(pointer.x, pointer.y)),
        };
        let forced = match (dragging.press, at_origin) {
            (Press::Held, true) => {
                debug!("{} armed for click-to-move", dragging.piece);
                dragging.press = Press::Armed;
                return;
            }
            (Press::Armed, _) => return,
            (Press::Confirming, true) => Some(DropAction::Snapback),
            (Press::Held | Press::Confirming, false) => None,
        };
        if let Some(DragState::Dragging(dragging)) = self.drag.take() {
            self.release(dragging, location, forced);
        }
    }

    // =====================================================================
    // INTERNALS
    // =====================================================================

    fn emit(&mut self, mut event: BoardEvent) -> BoardEvent {
        trace!("emit {}", event.name());
        self.listeners.dispatch(&mut event);
        event
    }

    fn report(&mut self, err: BoardError) -> BoardError {
        warn!("{err}");
        self.emit(BoardEvent::Error(ErrorEvent {
            code: err.code(),
            message: err.to_string(),
        }));
        err
    }

    /// Replace the position, notifying listeners if it actually changed.
    fn commit_position(&mut self, next: Position) {
        if next.to_fen() == self.position.to_fen() {
            trace!("position unchanged");
            return;
        }
        let old_value = std::mem::replace(&mut self.position, next);
        debug!("position {old_value} -> {}", self.position);
        let new_value = self.position.clone();
        self.emit(BoardEvent::Change(ChangeEvent {
            old_value,
            new_value,
        }));
    }

    fn show_position(&mut self, next: Position, animate: bool) {
        if animate {
            let animations = compute_animations(&self.position, &next);
            let timing = AnimationTiming::from_config(&self.config);
            self.sequencer
                .play(animations, self.position.clone(), next.clone(), timing);
        } else {
            self.sequencer.abandon();
        }
        self.commit_position(next);
    }

    fn hover_event(&self, square: Square) -> SquareHoverEvent {
        SquareHoverEvent {
            square,
            piece: self.position.get(square),
            position: self.position.clone(),
            orientation: self.config.orientation,
        }
    }

    fn begin_drag(&mut self, source: DragSource, piece: PieceCode, pointer: Pointer) -> bool {
        let orientation = self.config.orientation;
        let event = DragStartEvent::new(source, piece, self.position.clone(), orientation);
        if let BoardEvent::DragStart(event) = self.emit(BoardEvent::DragStart(event)) {
            if event.is_canceled() {
                debug!("drag of {piece} from {source} canceled");
                return false;
            }
        }
        let origin = source.square().map_or(Location::Offboard, Location::Square);
        if let Location::Square(sq) = origin {
            self.highlights.insert(sq);
        }
        self.drag = Some(DragState::Dragging(Dragging {
            pointer_id: pointer.id,
            x: pointer.x,
            y: pointer.y,
            piece,
            location: origin,
            source,
            origin,
            press: Press::Held,
        }));
        debug!("drag of {piece} from {source} started");
        true
    }

    /// Follow the pointer; report a change of hovered square.
    fn track(&mut self, pointer: Pointer) {
        let orientation = self.config.orientation;
        let Some(DragState::Dragging(dragging)) = self.drag.as_mut() else {
            return;
        };
        dragging.x = pointer.x;
        dragging.y = pointer.y;
        let location = self.geometry.hit_test(pointer.x, pointer.y, orientation);
        if location == dragging.location {
            return;
        }
        let old_location = std::mem::replace(&mut dragging.location, location);
        let (source, piece) = (dragging.source, dragging.piece);
        if let Location::Square(sq) = old_location {
            self.highlights.remove(&sq);
        }
        if let Location::Square(sq) = location {
            self.highlights.insert(sq);
        }
        trace!("{piece} dragged {old_location} -> {location}");
        let event = DragMoveEvent {
            new_location: location,
            old_location,
            source,
            piece,
            position: self.position.clone(),
            orientation,
        };
        self.emit(BoardEvent::DragMove(event));
    }

    fn release(&mut self, dragging: Dragging, target: Location, forced: Option<DropAction>) {
        let Dragging {
            x,
            y,
            piece,
            source,
            ..
        } = dragging;
        let tentative =
            forced.unwrap_or_else(|| tentative_action(target, self.config.drop_off_board));
        let new_position = candidate_position(&self.position, source, target, piece);
        let event = DropEvent::new(
            source,
            target,
            piece,
            new_position.clone(),
            self.position.clone(),
            self.config.orientation,
            tentative,
        );
        let action = match self.emit(BoardEvent::Drop(event)) {
            BoardEvent::Drop(event) => event.action(),
            _ => tentative,
        };
        self.highlights.clear();

        let (state, speed) = match (action, source, target) {
            (DropAction::Snapback, DragSource::Square(square), _) => (
                DragState::Snapback(Snapback {
                    x,
                    y,
                    piece,
                    source: square,
                }),
                self.config.snapback_speed,
            ),
            (DropAction::Drop, _, Location::Square(square)) => {
                self.commit_position(new_position);
                (
                    DragState::Snap(Snap {
                        x,
                        y,
                        piece,
                        target: square,
                        source,
                    }),
                    self.config.snap_speed,
                )
            }
            // Snapback of a spare, or a drop off the board.
            _ => {
                let mut next = self.position.clone();
                if let DragSource::Square(square) = source {
                    next.remove(square);
                }
                self.commit_position(next);
                (
                    DragState::Trash(Trash {
                        x,
                        y,
                        piece,
                        source,
                    }),
                    self.config.trash_speed,
                )
            }
        };
        debug!("{piece} from {source} released at {target}: {}", state.name());
        self.drag = Some(state);
        self.settle = Settle::Staged;
        if speed.millis() == 0 {
            self.finish_drag();
        }
    }

    fn finish_drag(&mut self) {
        let Some(state) = self.drag.take() else {
            return;
        };
        trace!("{} finished", state.name());
        match state {
            DragState::Snapback(snapback) => {
                let event = SnapbackEndEvent {
                    piece: snapback.piece,
                    square: snapback.source,
                    position: self.position.clone(),
                    orientation: self.config.orientation,
                };
                self.emit(BoardEvent::SnapbackEnd(event));
            }
            DragState::Snap(snap) => {
                self.emit(BoardEvent::SnapEnd(SnapEndEvent {
                    source: snap.source,
                    square: snap.target,
                    piece: snap.piece,
                }));
            }
            DragState::Trash(_) => {}
            DragState::Dragging(dragging) => self.drag = Some(DragState::Dragging(dragging)),
        }
    }

    fn drag_sprite(&self) -> Option<Sprite> {
        let orientation = self.config.orientation;
        let state = self.drag.as_ref()?;
        let running = self.settle == Settle::Running;
        let cell = self.geometry.square_rect(Square::ALL[0], orientation);
        let (rect, opacity, speed) = match state {
            DragState::Dragging(d) => (cell.centered_on(d.x, d.y), 1.0, Speed::Millis(0)),
            DragState::Snapback(s) if running => (
                self.geometry.square_rect(s.source, orientation),
                1.0,
                self.config.snapback_speed,
            ),
            DragState::Snapback(s) => (cell.centered_on(s.x, s.y), 1.0, Speed::Millis(0)),
            DragState::Snap(s) if running => (
                self.geometry.square_rect(s.target, orientation),
                1.0,
                self.config.snap_speed,
            ),
            DragState::Snap(s) => (cell.centered_on(s.x, s.y), 1.0, Speed::Millis(0)),
            DragState::Trash(t) if running => {
                (cell.centered_on(t.x, t.y), 0.0, self.config.trash_speed)
            }
            DragState::Trash(t) => (cell.centered_on(t.x, t.y), 1.0, Speed::Millis(0)),
        };
        Some(Sprite {
            piece: state.piece(),
            rect,
            opacity,
            transition_ms: speed.millis(),
            animation: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{RenderError, CODE_INVALID_MOVE, CODE_INVALID_POSITION};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn center(square: &str) -> Pointer {
        let rect = GridGeometry::default().square_rect(sq(square), Orientation::White);
        Pointer::mouse(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    fn record(board: &mut Chessboard) -> Rc<RefCell<Vec<BoardEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        board.subscribe(move |event: &mut BoardEvent| sink.borrow_mut().push(event.clone()));
        log
    }

    fn draggable() -> Chessboard {
        let mut config = BoardConfig::new();
        config.draggable_pieces = true;
        let mut board = Chessboard::new(config);
        board.start(false);
        board
    }

    #[test]
    fn test_invalid_fen_leaves_board_untouched() {
        let mut board = Chessboard::default();
        board.start(false);
        let log = record(&mut board);
        let err = board.set_position("8/8/8", false).unwrap_err();
        assert_eq!(err.code(), CODE_INVALID_POSITION);
        assert_eq!(board.position(), Position::start());
        let events = log.borrow();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], BoardEvent::Error(e) if e.code == CODE_INVALID_POSITION));
    }

    #[test]
    fn test_one_bad_move_rejects_all() {
        let mut board = Chessboard::default();
        board.start(false);
        let log = record(&mut board);
        let err = board.move_pieces(["e2-e4", "e7e5"], false).unwrap_err();
        assert_eq!(err.code(), CODE_INVALID_MOVE);
        assert_eq!(board.position(), Position::start());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_move_pieces_returns_new_position() {
        let mut board = Chessboard::default();
        board.start(false);
        let next = board.move_pieces(["e2-e4", "e7-e5"], false).unwrap();
        assert_eq!(next, board.position());
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_setting_same_position_is_silent() {
        let mut board = Chessboard::default();
        board.start(false);
        let log = record(&mut board);
        board.set_position("start", false).unwrap();
        board.set_position(START, false).unwrap();
        assert!(log.borrow().is_empty());
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_animated_set_commits_then_reports_move_end() {
        let mut board = Chessboard::default();
        board.start(false);
        let log = record(&mut board);
        board.move_pieces(["e2-e4"], true).unwrap();
        assert!(board.is_animating());
        assert!(board.position().contains(sq("e4")));
        assert!(board.frame().pieces.iter().all(|p| p.square != sq("e4")));

        board.frame_committed();
        board.transition_ended(0);
        let events = log.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "change");
        match &events[1] {
            BoardEvent::MoveEnd(end) => {
                assert_eq!(end.old_position, Position::start());
                assert!(end.new_position.contains(sq("e4")));
            }
            other => panic!("unexpected {}", other.name()),
        }
        assert!(!board.is_animating());
    }

    #[test]
    fn test_unanimated_set_abandons_batch() {
        let mut board = Chessboard::default();
        board.start(true);
        board.clear(false);
        assert!(!board.is_animating());
        board.frame_committed();
        assert!(board.frame().animations.is_empty());
    }

    #[test]
    fn test_hover_suppressed_while_dragging() {
        let mut board = draggable();
        let log = record(&mut board);
        board.pointer_enter_square(sq("e2"));
        assert!(board.pointer_down_square(sq("e2"), center("e2")));
        board.pointer_leave_square(sq("e2"));
        let names: Vec<_> = log.borrow().iter().map(BoardEvent::name).collect();
        assert_eq!(names, ["mouseover-square", "drag-start"]);
    }

    #[test]
    fn test_not_draggable_ignores_press() {
        let mut board = Chessboard::default();
        board.start(false);
        assert!(!board.pointer_down_square(sq("e2"), center("e2")));
        assert!(board.drag_state().is_none());
    }

    #[test]
    fn test_empty_square_does_not_start_drag() {
        let mut board = draggable();
        assert!(!board.pointer_down_square(sq("e4"), center("e4")));
    }

    #[test]
    fn test_dragged_source_is_hidden() {
        let mut board = draggable();
        board.pointer_down_square(sq("e2"), center("e2"));
        let frame = board.frame();
        assert_eq!(frame.pieces.len(), 31);
        assert_eq!(frame.highlights, vec![sq("e2")]);
        let sprite = frame.dragged.unwrap();
        assert_eq!(sprite.piece.to_string(), "wP");
        assert_eq!(sprite.rect, Rect::new(200.0, 300.0, 50.0, 50.0));
    }

    #[test]
    fn test_other_pointer_is_ignored() {
        let mut board = draggable();
        board.pointer_down_square(sq("e2"), center("e2"));
        let stray = Pointer::touch(7, 0.0, 0.0);
        board.pointer_move(stray);
        board.pointer_up(stray);
        let dragging = board.drag_state().unwrap().as_dragging().unwrap();
        assert_eq!(dragging.location, Location::Square(sq("e2")));
    }

    #[test]
    fn test_drop_snaps_and_settles() {
        let mut board = draggable();
        let log = record(&mut board);
        board.pointer_down_square(sq("g1"), center("g1"));
        board.pointer_move(center("f3"));
        board.pointer_up(center("f3"));
        assert!(board.position().contains(sq("f3")));
        assert_eq!(board.drag_state().unwrap().name(), "snap");
        assert!(board.highlighted_squares().next().is_none());

        board.frame_committed();
        let sprite = board.frame().dragged.unwrap();
        assert_eq!(sprite.transition_ms, 30);
        board.drag_transition_ended();
        assert!(board.drag_state().is_none());
        let names: Vec<_> = log.borrow().iter().map(BoardEvent::name).collect();
        assert_eq!(names, ["drag-start", "drag-move", "drop", "change", "snap-end"]);
    }

    #[test]
    fn test_zero_speed_settles_immediately() {
        let mut board = draggable();
        board.set_option("snapback-speed", Some("0")).unwrap();
        let log = record(&mut board);
        board.pointer_down_square(sq("d2"), center("d2"));
        board.pointer_up(Pointer::mouse(-20.0, -20.0));
        assert!(board.drag_state().is_none());
        let names: Vec<_> = log.borrow().iter().map(BoardEvent::name).collect();
        assert_eq!(names, ["drag-start", "drop", "snapback-end"]);
    }

    #[test]
    fn test_drop_override_to_drop_offboard_trashes() {
        let mut board = draggable();
        board.subscribe(|event: &mut BoardEvent| {
            if let BoardEvent::Drop(dropped) = event {
                dropped.set_action(DropAction::Drop);
            }
        });
        board.pointer_down_square(sq("a2"), center("a2"));
        board.pointer_up(Pointer::mouse(900.0, 900.0));
        assert_eq!(board.drag_state().unwrap().name(), "trash");
        assert!(!board.position().contains(sq("a2")));
    }

    #[test]
    fn test_detach_drops_drag() {
        let mut board = draggable();
        board.attach();
        board.pointer_down_square(sq("e2"), center("e2"));
        assert!(board.captures_pointer());
        board.detach();
        assert!(!board.captures_pointer());
        assert!(board.drag_state().is_none());
        assert_eq!(board.position(), Position::start());
    }

    #[test]
    fn test_render_failure_falls_back() {
        let mut board = Chessboard::default();
        let log = record(&mut board);
        board.set_renderer(|piece: PieceCode| {
            Err::<PieceVisual, _>(RenderError::Unavailable {
                piece: piece.to_string(),
                reason: "no assets".to_string(),
            })
        });
        let visual = board.render_piece("bQ".parse().unwrap());
        assert_eq!(
            visual,
            PieceVisual::Image("img/chesspieces/wikipedia/bQ.png".to_string())
        );
        assert_eq!(log.borrow()[0].name(), "error");
    }

    #[test]
    fn test_piece_theme_option() {
        let mut board = Chessboard::default();
        board
            .set_option("piece-theme", Some("/pieces/{piece}.svg"))
            .unwrap();
        assert_eq!(
            board.render_piece("wN".parse().unwrap()),
            PieceVisual::Image("/pieces/wN.svg".to_string())
        );
    }

    #[test]
    fn test_position_option() {
        let mut board = Chessboard::default();
        board.set_option("position", Some("start")).unwrap();
        assert_eq!(board.position(), Position::start());
        board.set_option("Position", None).unwrap();
        assert!(board.position().is_empty());
        assert!(board.set_option("position", Some("nonsense")).is_err());
    }

    #[test]
    fn test_flip() {
        let mut board = Chessboard::default();
        board.flip();
        assert_eq!(board.orientation(), Orientation::Black);
        board.set_option("orientation", Some("white")).unwrap();
        assert_eq!(board.orientation(), Orientation::White);
    }

    #[test]
    fn test_resize_scales_frame() {
        let mut board = Chessboard::default();
        board.start(false);
        board.resize(800.0);
        let frame = board.frame();
        let a8 = frame.pieces.iter().find(|p| p.square == sq("a8")).unwrap();
        assert_eq!(a8.rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}

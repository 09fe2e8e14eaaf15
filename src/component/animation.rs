//! Two-phase animation sequencing.
//!
//! A batch is first *staged*: moving pieces are drawn on their source
//! squares and added pieces are drawn invisible (or on their spare slot),
//! all without transitions, while clears start fading right away. Once the
//! host reports that this frame was painted, the batch *transitions*: every
//! move and add gets its final style and a nonzero transition. Each
//! animation then reports its transition end; when all have, the batch is
//! complete and a `move-end` notification is produced.
//!
//! The sequencer is driven entirely by the `frame_committed` and
//! `transition_ended` signals, so it runs the same under a fake clock.

use log::{debug, trace};

use crate::board::{Animation, PieceCode, Position, Square};

use super::config::{BoardConfig, Orientation};
use super::events::MoveEndEvent;
use super::geometry::{BoardGeometry, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencePhase {
    /// No batch has been played yet, or the last one was abandoned
    Idle,
    /// Start frame is drawn; waiting for it to be painted
    Staged,
    /// Target styles applied; waiting for transitions to end
    Transitioning,
    /// Every animation of the last batch finished
    Complete,
}

/// How an animation is drawn in the current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStage {
    MoveStart,
    Move,
    AddStart,
    Add,
    Clear,
}

/// Durations in milliseconds for batch animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTiming {
    pub appear_ms: u32,
    pub move_ms: u32,
    pub trash_ms: u32,
}

impl AnimationTiming {
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        AnimationTiming {
            appear_ms: config.appear_speed.millis(),
            move_ms: config.move_speed.millis(),
            trash_ms: config.trash_speed.millis(),
        }
    }

    #[must_use]
    pub const fn duration(&self, animation: &Animation) -> u32 {
        match animation {
            Animation::Move { .. } => self.move_ms,
            Animation::Add { .. } => self.appear_ms,
            Animation::Clear { .. } => self.trash_ms,
        }
    }
}

/// A piece drawn outside the static board grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub piece: PieceCode,
    pub rect: Rect,
    pub opacity: f64,
    pub transition_ms: u32,
    /// Index into the running batch, for batch sprites
    pub animation: Option<usize>,
}

#[derive(Debug)]
pub struct AnimationSequencer {
    phase: SequencePhase,
    animations: Vec<Animation>,
    finished: Vec<bool>,
    old_position: Position,
    new_position: Position,
    timing: AnimationTiming,
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationSequencer {
    #[must_use]
    pub fn new() -> Self {
        AnimationSequencer {
            phase: SequencePhase::Idle,
            animations: Vec::new(),
            finished: Vec::new(),
            old_position: Position::empty(),
            new_position: Position::empty(),
            timing: AnimationTiming::from_config(&BoardConfig::new()),
        }
    }

    #[must_use]
    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(
            self.phase,
            SequencePhase::Staged | SequencePhase::Transitioning
        )
    }

    /// Animations of the running batch (empty when not animating).
    #[must_use]
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Stage a new batch. Returns false, and does nothing, for an empty list.
    ///
    /// A batch still in flight is abandoned without a completion notice.
    pub fn play(
        &mut self,
        animations: Vec<Animation>,
        old_position: Position,
        new_position: Position,
        timing: AnimationTiming,
    ) -> bool {
        if animations.is_empty() {
            return false;
        }
        if self.is_animating() {
            debug!(
                "abandoning animation batch with {} unfinished",
                self.unfinished()
            );
        }
        debug!("staging {} animations", animations.len());
        self.finished = vec![false; animations.len()];
        self.animations = animations;
        self.old_position = old_position;
        self.new_position = new_position;
        self.timing = timing;
        self.phase = SequencePhase::Staged;
        true
    }

    /// The staged frame was painted: start the transitions.
    ///
    /// Zero-duration animations finish immediately, since their transition
    /// end may never be reported.
    pub fn frame_committed(&mut self) -> Option<MoveEndEvent> {
        if self.phase != SequencePhase::Staged {
            return None;
        }
        self.phase = SequencePhase::Transitioning;
        for (idx, animation) in self.animations.iter().enumerate() {
            if self.timing.duration(animation) == 0 {
                self.finished[idx] = true;
            }
        }
        self.check_complete()
    }

    /// The transition of animation `index` ended. Repeated or stray
    /// signals are ignored.
    pub fn transition_ended(&mut self, index: usize) -> Option<MoveEndEvent> {
        if !self.is_animating() {
            return None;
        }
        match self.finished.get_mut(index) {
            Some(done) if !*done => *done = true,
            _ => return None,
        }
        trace!("animation {index} finished, {} left", self.unfinished());
        self.check_complete()
    }

    /// Drop all bookkeeping; no completion will be reported.
    pub fn abandon(&mut self) {
        if self.is_animating() {
            debug!("animation batch abandoned");
        }
        self.clear();
        self.phase = SequencePhase::Idle;
    }

    /// How `animation` is drawn in the current phase.
    #[must_use]
    pub fn stage(&self, animation: &Animation) -> AnimationStage {
        let started = self.phase != SequencePhase::Staged;
        match (animation, started) {
            (Animation::Move { .. }, false) => AnimationStage::MoveStart,
            (Animation::Move { .. }, true) => AnimationStage::Move,
            (Animation::Add { .. }, false) => AnimationStage::AddStart,
            (Animation::Add { .. }, true) => AnimationStage::Add,
            (Animation::Clear { .. }, _) => AnimationStage::Clear,
        }
    }

    /// Returns true if a running animation draws over `square`.
    #[must_use]
    pub fn covers(&self, square: Square) -> bool {
        self.animations.iter().any(|a| a.square() == square)
    }

    /// Sprites for every animation of the running batch.
    #[must_use]
    pub fn sprites(
        &self,
        geometry: &dyn BoardGeometry,
        orientation: Orientation,
        spare_pieces: bool,
    ) -> Vec<Sprite> {
        self.animations
            .iter()
            .enumerate()
            .map(|(idx, animation)| {
                let piece = animation.piece();
                let (rect, opacity, transition_ms) = match (self.stage(animation), animation) {
                    (AnimationStage::MoveStart, Animation::Move { source, .. }) => {
                        (geometry.square_rect(*source, orientation), 1.0, 0)
                    }
                    (AnimationStage::AddStart, _) => {
                        let spare = spare_pieces
                            .then(|| geometry.spare_piece_rect(piece, orientation))
                            .flatten();
                        match spare {
                            Some(rect) => (rect, 1.0, 0),
                            None => (geometry.square_rect(animation.square(), orientation), 0.0, 0),
                        }
                    }
                    (AnimationStage::Clear, _) => (
                        geometry.square_rect(animation.square(), orientation),
                        0.0,
                        self.timing.trash_ms,
                    ),
                    (_, _) => (
                        geometry.square_rect(animation.square(), orientation),
                        1.0,
                        self.timing.duration(animation),
                    ),
                };
                Sprite {
                    piece,
                    rect,
                    opacity,
                    transition_ms,
                    animation: Some(idx),
                }
            })
            .collect()
    }

    fn unfinished(&self) -> usize {
        self.finished.iter().filter(|done| !**done).count()
    }

    fn check_complete(&mut self) -> Option<MoveEndEvent> {
        if self.unfinished() > 0 {
            return None;
        }
        debug!("animation batch complete");
        let event = MoveEndEvent {
            old_position: std::mem::take(&mut self.old_position),
            new_position: std::mem::take(&mut self.new_position),
        };
        self.clear();
        self.phase = SequencePhase::Complete;
        Some(event)
    }

    fn clear(&mut self) {
        self.animations.clear();
        self.finished.clear();
        self.old_position = Position::empty();
        self.new_position = Position::empty();
    }
}

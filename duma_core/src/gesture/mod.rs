//! Gesture interpretation: turns raw pointer travel into a swipe direction,
//! a commit progress in `[0, 1]`, and finally a commit or a cancel.
//!
//! Phases run `Idle -> Dragging -> Committing -> Idle`. A drag that ends
//! below the commit threshold springs back straight to `Idle`. While a commit
//! is in flight the interpreter is animating and refuses new gestures, so at
//! most one decision is ever pending.

mod input;

pub use input::*;

use duma_rules::{Choice, Direction, GestureConfig};
use serde::{Deserialize, Serialize};

/// Where the interpreter is in a single interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Committing,
}

/// Transient state of the interaction in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureState {
    pub start: Option<Point>,
    pub direction: Option<Direction>,
    /// Commit progress in `[0, 1]`.
    pub progress: f32,
    pub swiping: bool,
    pub animating: bool,
}

/// Emitted whenever a drag moves the card outside the dead zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureUpdate {
    pub direction: Direction,
    pub progress: f32,
    /// Answer the card is currently leaning towards.
    pub preferred: Choice,
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Not dragging; nothing happened.
    Ignored,
    /// Released under the threshold; the card springs back.
    Cancelled,
    /// Released over the threshold in the given direction.
    Committed(Direction),
}

pub struct GestureInterpreter {
    config: GestureConfig,
    phase: GesturePhase,
    state: GestureState,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            state: GestureState::default(),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn direction(&self) -> Option<Direction> {
        self.state.direction
    }

    pub fn progress(&self) -> f32 {
        self.state.progress
    }

    pub fn is_animating(&self) -> bool {
        self.state.animating
    }

    pub fn preferred_choice(&self) -> Option<Choice> {
        self.state.direction.map(|d| d.choice())
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Resize the surface progress is measured against. Non-positive widths
    /// are ignored.
    pub fn set_viewport_width(&mut self, width: f32) {
        if width > 0.0 {
            self.config.viewport_width = width;
        }
    }

    /// Start a drag. Returns false when a commit is still animating.
    pub fn begin(&mut self, x: f32, y: f32) -> bool {
        if self.state.animating || self.phase != GesturePhase::Idle {
            tracing::debug!(phase = ?self.phase, "gesture start rejected");
            return false;
        }
        self.state = GestureState {
            start: Some(Point::new(x, y)),
            swiping: true,
            ..GestureState::default()
        };
        self.phase = GesturePhase::Dragging;
        true
    }

    /// Track a drag. Returns an update once travel leaves the dead zone.
    pub fn move_to(&mut self, x: f32, _y: f32) -> Option<GestureUpdate> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        let start = self.state.start?;
        let dx = x - start.x;
        if dx.abs() <= self.config.dead_zone {
            return None;
        }

        let direction = if dx > 0.0 { Direction::Right } else { Direction::Left };
        let half_width = self.config.viewport_width / 2.0;
        let progress = (dx.abs() / half_width).clamp(0.0, 1.0);

        self.state.direction = Some(direction);
        self.state.progress = progress;

        Some(GestureUpdate {
            direction,
            progress,
            preferred: direction.choice(),
        })
    }

    /// Release a drag, committing if progress is past the threshold.
    pub fn end(&mut self) -> GestureOutcome {
        if self.phase != GesturePhase::Dragging {
            return GestureOutcome::Ignored;
        }
        self.state.swiping = false;

        match self.state.direction {
            Some(direction) if self.state.progress > self.config.commit_threshold => {
                self.commit(direction);
                GestureOutcome::Committed(direction)
            }
            _ => {
                tracing::debug!(progress = self.state.progress, "swipe cancelled");
                self.reset();
                GestureOutcome::Cancelled
            }
        }
    }

    /// Commit straight away from a key press, skipping the drag.
    pub fn key(&mut self, direction: Direction) -> bool {
        if self.state.animating {
            return false;
        }
        self.state.start = None;
        self.state.swiping = false;
        self.commit(direction);
        true
    }

    /// The committed transition is over; return to a neutral idle state.
    pub fn finish(&mut self) {
        self.reset();
    }

    fn commit(&mut self, direction: Direction) {
        tracing::debug!(?direction, "swipe committed");
        self.state.direction = Some(direction);
        self.state.progress = 1.0;
        self.state.animating = true;
        self.phase = GesturePhase::Committing;
    }

    fn reset(&mut self) {
        self.state = GestureState::default();
        self.phase = GesturePhase::Idle;
    }
}

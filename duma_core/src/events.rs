//! Events the engine emits for renderers and audio drivers.

use duma_rules::{CardId, DeckRevision, Direction, ResourceState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The engine was started and the first card is about to show.
    Started,

    /// A different card is now current.
    CurrentCardChanged {
        card: CardId,
        music: Option<String>,
    },

    /// Drag direction or progress changed.
    GestureProgressChanged {
        direction: Option<Direction>,
        progress: f32,
    },

    /// A swipe committed and the card is animating away.
    TransitionStarted { direction: Direction },

    /// A choice's effect was applied to the meters.
    ChoiceApplied {
        card: CardId,
        direction: Direction,
        resources: ResourceState,
    },

    /// The card swap finished and new gestures are accepted again.
    TransitionFinished,

    /// A meter hit an extreme and its ending card is showing.
    EndingReached { id: String },

    /// Meters, time and position were reset.
    Restarted,

    /// The narrative cards were replaced.
    DeckLoaded { revision: DeckRevision },

    /// The engine was torn down; no further events follow.
    ShutDown,
}

impl EngineEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::Started => "started",
            EngineEvent::CurrentCardChanged { .. } => "current_card_changed",
            EngineEvent::GestureProgressChanged { .. } => "gesture_progress_changed",
            EngineEvent::TransitionStarted { .. } => "transition_started",
            EngineEvent::ChoiceApplied { .. } => "choice_applied",
            EngineEvent::TransitionFinished => "transition_finished",
            EngineEvent::EndingReached { .. } => "ending_reached",
            EngineEvent::Restarted => "restarted",
            EngineEvent::DeckLoaded { .. } => "deck_loaded",
            EngineEvent::ShutDown => "shut_down",
        }
    }
}

/// Receives engine events as they happen.
pub trait EngineObserver {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EngineObserver for F
where
    F: FnMut(&EngineEvent),
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event)
    }
}

//! The engine facade: one owned instance per game session.
//!
//! Input flows `gesture -> scheduler -> narrative`, and every state change
//! is announced to the registered observers. The two delays (settle after a
//! commit, advance after an effect) are scheduler tasks, so they are dropped
//! rather than run when the engine is shut down or the deck is replaced.

use duma_rules::{
    Card, CardId, Chronicle, Deck, DeckRevision, Direction, EngineConfig, ResourceState,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::EngineError;
use crate::events::{EngineEvent, EngineObserver};
use crate::gesture::{GestureInput, GestureInterpreter, GestureOutcome, GestureState, InputEvent};
use crate::narrative::{ChoiceOutcome, NarrativeController};
use crate::presentation::{CardVisual, ElementGauge, Frame, NextCardPreview, TimeDisplay};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    /// Apply the committed choice.
    Settle(Direction),
    /// Show the next card and accept gestures again.
    Advance,
}

/// Point-in-time view of the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub resources: ResourceState,
    pub days: i64,
    pub time_label: String,
    pub ending: Option<String>,
    pub index: usize,
    pub current_card: Option<CardId>,
    pub next_card: Option<CardId>,
    pub direction: Option<Direction>,
    pub progress: f32,
    pub animating: bool,
    pub deck_revision: DeckRevision,
}

pub struct Engine {
    config: EngineConfig,
    narrative: NarrativeController,
    gesture: GestureInterpreter,
    scheduler: Scheduler<Task>,
    observers: Vec<Box<dyn EngineObserver>>,
    started: bool,
    disposed: bool,
}

impl Engine {
    pub fn new(deck: Deck, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            narrative: NarrativeController::new(deck, config.session.clone()),
            gesture: GestureInterpreter::new(config.gesture.clone()),
            scheduler: Scheduler::new(),
            observers: Vec::new(),
            started: false,
            disposed: false,
            config,
        })
    }

    /// Engine over the bundled deck with default configuration.
    pub fn bundled() -> Result<Self, EngineError> {
        Self::new(Deck::bundled()?, EngineConfig::default())
    }

    pub fn add_observer(&mut self, observer: impl EngineObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Announce the first card. Call once observers are registered.
    pub fn start(&mut self) {
        if self.started || self.disposed {
            return;
        }
        self.started = true;
        tracing::info!(cards = self.narrative.deck().len(), "engine started");
        self.emit(EngineEvent::Started);
        self.emit_current_card();
    }

    // ---- input ----------------------------------------------------------

    pub fn handle_input(&mut self, event: &InputEvent) {
        match event.to_gesture_input() {
            Some(GestureInput::Begin(p)) => {
                self.pointer_down(p.x, p.y);
            }
            Some(GestureInput::Move(p)) => self.pointer_move(p.x, p.y),
            Some(GestureInput::End) => self.pointer_up(),
            Some(GestureInput::Key(key)) => {
                self.key(&key);
            }
            None => {}
        }
    }

    /// Returns whether the drag was accepted.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.disposed || !self.gesture.begin(x, y) {
            return false;
        }
        self.emit_gesture_progress();
        true
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.disposed {
            return;
        }
        if self.gesture.move_to(x, y).is_some() {
            self.emit_gesture_progress();
        }
    }

    pub fn pointer_up(&mut self) {
        if self.disposed {
            return;
        }
        match self.gesture.end() {
            GestureOutcome::Committed(direction) => self.begin_transition(direction),
            GestureOutcome::Cancelled => self.emit_gesture_progress(),
            GestureOutcome::Ignored => {}
        }
    }

    /// Handle a key press. Returns whether it committed a swipe.
    pub fn key(&mut self, key: &str) -> bool {
        if self.disposed {
            return false;
        }
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        if !self.gesture.key(direction) {
            return false;
        }
        self.begin_transition(direction);
        true
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.gesture.set_viewport_width(width);
    }

    // ---- time -----------------------------------------------------------

    /// Advance the engine clock, running every task that falls due.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.disposed {
            return;
        }
        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task);
        }
        self.scheduler.advance_to(until);
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // ---- session control ------------------------------------------------

    pub fn restart(&mut self) {
        if self.disposed {
            return;
        }
        let was_animating = self.abort_transition();
        self.narrative.restart();
        self.emit(EngineEvent::Restarted);
        self.emit_current_card();
        if was_animating {
            self.emit(EngineEvent::TransitionFinished);
        }
    }

    /// Replace the narrative cards. On error the engine is untouched.
    pub fn load_deck(&mut self, cards: Vec<Card>) -> Result<(), EngineError> {
        if self.disposed {
            return Err(EngineError::ShutDown);
        }
        self.narrative.load_deck(cards)?;

        let was_animating = self.abort_transition();
        let revision = self.narrative.deck().revision();
        self.emit(EngineEvent::DeckLoaded { revision });
        self.emit_current_card();
        if was_animating {
            self.emit(EngineEvent::TransitionFinished);
        }
        Ok(())
    }

    /// Parse a serialized card list and load it.
    pub fn import_deck_json(&mut self, text: &str) -> Result<(), EngineError> {
        let cards = Deck::parse_cards_json(text)?;
        self.load_deck(cards)
    }

    pub fn export_deck_json(&self) -> Result<String, EngineError> {
        Ok(self.narrative.deck().export_json()?)
    }

    /// Drop all scheduled work and stop reacting to input. Idempotent.
    pub fn shutdown(&mut self) {
        if self.disposed {
            return;
        }
        let cancelled = self.scheduler.cancel_all();
        tracing::info!(cancelled, "engine shut down");
        self.emit(EngineEvent::ShutDown);
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ---- state ----------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        self.narrative.deck()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.narrative.current_card()
    }

    pub fn next_card(&self) -> Option<&Card> {
        self.narrative.next_card()
    }

    pub fn resources(&self) -> &ResourceState {
        self.narrative.resources()
    }

    pub fn chronicle(&self) -> &Chronicle {
        self.narrative.chronicle()
    }

    pub fn ending_id(&self) -> Option<String> {
        self.narrative.ending_id()
    }

    pub fn index(&self) -> usize {
        self.narrative.index()
    }

    pub fn gesture(&self) -> &GestureState {
        self.gesture.state()
    }

    pub fn is_animating(&self) -> bool {
        self.gesture.is_animating()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let chronicle = self.narrative.chronicle();
        EngineSnapshot {
            resources: *self.narrative.resources(),
            days: chronicle.days,
            time_label: chronicle.label.clone(),
            ending: self.narrative.ending_id(),
            index: self.narrative.index(),
            current_card: self.narrative.current_card().map(|c| c.id.clone()),
            next_card: self.narrative.next_card().map(|c| c.id.clone()),
            direction: self.gesture.direction(),
            progress: self.gesture.progress(),
            animating: self.gesture.is_animating(),
            deck_revision: self.narrative.deck().revision(),
        }
    }

    /// Renderable view of the current state.
    pub fn frame(&self) -> Option<Frame<'_>> {
        let current = self.narrative.current_card()?;
        let direction = self.gesture.direction();
        let progress = self.gesture.progress();
        Some(Frame {
            current,
            next: self.narrative.next_card(),
            visual: CardVisual::compute(current, direction, progress, self.gesture.config()),
            preview: NextCardPreview::compute(self.gesture.is_animating(), progress),
            hints: (current.hint_for(Direction::Right), current.hint_for(Direction::Left)),
            highlighted: direction,
            time: TimeDisplay::compute(self.narrative.chronicle(), self.narrative.in_ending()),
            gauges: ElementGauge::all(self.narrative.resources()),
        })
    }

    // ---- internals ------------------------------------------------------

    fn begin_transition(&mut self, direction: Direction) {
        self.emit_gesture_progress();
        self.emit(EngineEvent::TransitionStarted { direction });
        let id = self
            .scheduler
            .schedule(self.config.timing.settle_delay(), Task::Settle(direction));
        tracing::debug!(task = %id, ?direction, "settle scheduled");
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Settle(direction) => self.settle(direction),
            Task::Advance => {
                if self.narrative.advance() {
                    self.emit_current_card();
                }
                self.finish_transition();
            }
        }
    }

    fn settle(&mut self, direction: Direction) {
        let card = self.narrative.current_card().map(|c| c.id.clone());

        match self.narrative.choose(direction) {
            ChoiceOutcome::Ignored => self.finish_transition(),
            ChoiceOutcome::Applied { resources } => {
                if let Some(card) = card {
                    self.emit(EngineEvent::ChoiceApplied { card, direction, resources });
                }
                self.schedule_advance();
            }
            ChoiceOutcome::EndingReached { extreme, resources } => {
                if let Some(card) = card {
                    self.emit(EngineEvent::ChoiceApplied { card, direction, resources });
                }
                self.emit(EngineEvent::EndingReached { id: extreme.id() });
                self.emit_current_card();
                self.schedule_advance();
            }
            ChoiceOutcome::Restarted => {
                self.emit(EngineEvent::Restarted);
                self.emit_current_card();
                self.finish_transition();
            }
        }
    }

    fn schedule_advance(&mut self) {
        let id = self
            .scheduler
            .schedule(self.config.timing.advance_delay(), Task::Advance);
        tracing::debug!(task = %id, "advance scheduled");
    }

    fn finish_transition(&mut self) {
        self.gesture.finish();
        self.emit_gesture_progress();
        self.emit(EngineEvent::TransitionFinished);
    }

    /// Cancel pending tasks and reset the gesture; reports whether a
    /// transition was in flight.
    fn abort_transition(&mut self) -> bool {
        let was_animating = self.gesture.is_animating();
        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "pending transition tasks cancelled");
        }
        self.gesture.finish();
        was_animating
    }

    fn emit_current_card(&mut self) {
        let Some(card) = self.narrative.current_card() else {
            return;
        };
        let event = EngineEvent::CurrentCardChanged {
            card: card.id.clone(),
            music: card.music.clone(),
        };
        self.emit(event);
    }

    fn emit_gesture_progress(&mut self) {
        let event = EngineEvent::GestureProgressChanged {
            direction: self.gesture.direction(),
            progress: self.gesture.progress(),
        };
        self.emit(event);
    }

    fn emit(&mut self, event: EngineEvent) {
        tracing::trace!(event = event.kind(), "engine event");
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duma_rules::{CardId, Effect, Element, GestureConfig};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn card(id: u64) -> Card {
        Card::new(id, format!("Question {}", id), format!("/cards/{}.png", id))
    }

    fn fire_deck() -> Deck {
        let cards = vec![
            card(0).with_effect(Direction::Right, Effect::new().with_delta(Element::Fire, 50)),
            card(1).with_effect(Direction::Right, Effect::new().with_delta(Element::Fire, 50)),
            card(2),
        ];
        let endings = vec![Card::new(CardId::named("fire_100"), "Burned", "/endings/fire.png")];
        Deck::new(cards, endings).unwrap()
    }

    fn engine() -> (Engine, Rc<RefCell<Vec<EngineEvent>>>) {
        let config = EngineConfig {
            gesture: GestureConfig {
                viewport_width: 1000.0,
                ..GestureConfig::default()
            },
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(fire_deck(), config).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.add_observer(move |event: &EngineEvent| sink.borrow_mut().push(event.clone()));
        (engine, events)
    }

    fn swipe(engine: &mut Engine, dx: f32) {
        engine.pointer_down(500.0, 300.0);
        engine.pointer_move(500.0 + dx, 300.0);
        engine.pointer_up();
    }

    #[test]
    fn test_start_announces_first_card() {
        let (mut engine, events) = engine();
        engine.start();
        engine.start();
        assert_eq!(
            *events.borrow(),
            vec![
                EngineEvent::Started,
                EngineEvent::CurrentCardChanged { card: CardId::Number(0), music: None },
            ]
        );
    }

    #[test]
    fn test_committed_swipe_applies_after_settle() {
        let (mut engine, _) = engine();
        swipe(&mut engine, 400.0);
        assert!(engine.is_animating());
        assert_eq!(engine.resources().fire, 1);

        engine.tick(ms(299));
        assert_eq!(engine.resources().fire, 1);

        engine.tick(ms(1));
        assert_eq!(engine.resources().fire, 51);
        assert_eq!(engine.index(), 0);

        engine.tick(ms(100));
        assert_eq!(engine.index(), 1);
        assert!(!engine.is_animating());
        assert_eq!(engine.pending_tasks(), 0);
    }

    #[test]
    fn test_single_long_tick_runs_whole_transition() {
        let (mut engine, events) = engine();
        swipe(&mut engine, 400.0);
        engine.tick(ms(1000));
        assert_eq!(engine.index(), 1);

        let kinds: Vec<_> = events.borrow().iter().map(EngineEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "gesture_progress_changed",
                "gesture_progress_changed",
                "gesture_progress_changed",
                "transition_started",
                "choice_applied",
                "current_card_changed",
                "gesture_progress_changed",
                "transition_finished",
            ]
        );
    }

    #[test]
    fn test_cancelled_swipe_changes_nothing() {
        let (mut engine, _) = engine();
        let before = engine.snapshot();
        swipe(&mut engine, 150.0);
        engine.tick(ms(1000));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_double_commit_guard() {
        let (mut engine, _) = engine();
        swipe(&mut engine, 400.0);
        let during = engine.snapshot();

        assert!(!engine.pointer_down(0.0, 0.0));
        engine.pointer_move(900.0, 0.0);
        engine.pointer_up();
        assert!(!engine.key("ArrowLeft"));
        assert_eq!(engine.snapshot(), during);

        engine.tick(ms(1000));
        assert_eq!(engine.resources().fire, 51);
        assert_eq!(engine.index(), 1);
    }

    #[test]
    fn test_key_commit() {
        let (mut engine, _) = engine();
        assert!(!engine.key("Enter"));
        assert!(engine.key("d"));
        assert_eq!(engine.gesture().progress, 1.0);
        engine.tick(ms(400));
        assert_eq!(engine.resources().fire, 51);
        assert_eq!(engine.index(), 1);
    }

    #[test]
    fn test_ending_then_restart() {
        let (mut engine, events) = engine();
        engine.key("ArrowRight");
        engine.tick(ms(400));
        engine.key("ArrowRight");
        engine.tick(ms(400));

        assert_eq!(engine.ending_id().as_deref(), Some("fire_100"));
        assert_eq!(engine.resources().fire, 100);
        assert!(events
            .borrow()
            .contains(&EngineEvent::EndingReached { id: "fire_100".to_string() }));
        assert!(!engine.is_animating());

        let frame = engine.frame().unwrap();
        assert_eq!(frame.time.counter, "∞");
        assert_eq!(frame.next.map(|c| c.id.clone()), Some(CardId::Number(0)));

        engine.key("a");
        engine.tick(ms(400));
        let snapshot = engine.snapshot();
        assert!(snapshot.ending.is_none());
        assert_eq!(snapshot.resources, ResourceState::uniform(1));
        assert_eq!(snapshot.days, 0);
        assert_eq!(snapshot.index, 0);
        assert!(!snapshot.animating);
        assert!(events.borrow().contains(&EngineEvent::Restarted));
    }

    #[test]
    fn test_shutdown_drops_pending_tasks() {
        let (mut engine, events) = engine();
        swipe(&mut engine, 400.0);
        engine.shutdown();
        engine.tick(ms(1000));

        assert_eq!(engine.resources().fire, 1);
        assert_eq!(engine.pending_tasks(), 0);
        assert!(!engine.pointer_down(0.0, 0.0));
        assert_eq!(events.borrow().last(), Some(&EngineEvent::ShutDown));
        assert!(matches!(engine.load_deck(vec![card(9)]), Err(EngineError::ShutDown)));
    }

    #[test]
    fn test_load_deck_cancels_transition() {
        let (mut engine, _) = engine();
        swipe(&mut engine, 400.0);
        engine.load_deck(vec![card(7), card(8)]).unwrap();
        assert!(!engine.is_animating());

        engine.tick(ms(1000));
        assert_eq!(engine.index(), 0);
        assert_eq!(engine.resources().fire, 1);
        assert_eq!(engine.current_card().map(|c| c.id.clone()), Some(CardId::Number(7)));
    }

    #[test]
    fn test_import_failure_keeps_state() {
        let (mut engine, _) = engine();
        let revision = engine.deck().revision();
        assert!(engine.import_deck_json("{ nope").is_err());
        assert!(engine.import_deck_json("[]").is_err());
        assert_eq!(engine.deck().revision(), revision);
        assert_eq!(engine.deck().len(), 3);
    }

    #[test]
    fn test_frame_while_dragging() {
        let (mut engine, _) = engine();
        engine.pointer_down(500.0, 0.0);
        engine.pointer_move(250.0, 0.0);

        let frame = engine.frame().unwrap();
        assert_eq!(frame.visual.offset_x, -250.0);
        assert_eq!(frame.visual.opacity, 0.5);
        assert_eq!(frame.highlighted, Some(Direction::Left));
        assert!(!frame.preview.visible);
        assert_eq!(frame.hints, ("YES", "NO"));
    }
}

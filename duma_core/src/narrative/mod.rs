//! Narrative flow: position in the deck, choice effects and endings.
//!
//! The controller is either `Playing` through the narrative cards or showing
//! a single `Ending` card. Endings are terminal: any choice on an ending card
//! restarts the session, and nothing else leaves the ending.

use duma_rules::{
    Card, Chronicle, Deck, DeckError, Direction, Extreme, ResourceState, SessionConfig,
};

/// Which sequence of cards is active.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeMode {
    Playing { index: usize },
    Ending { extreme: Extreme, card: Card },
}

/// What a choice did.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceOutcome {
    /// There was no card to choose on.
    Ignored,
    /// Effect applied; the next card is due after the advance delay.
    Applied { resources: ResourceState },
    /// Effect applied and a meter hit an extreme with a matching ending.
    EndingReached { extreme: Extreme, resources: ResourceState },
    /// The choice was made on an ending card and the session restarted.
    Restarted,
}

pub struct NarrativeController {
    deck: Deck,
    mode: NarrativeMode,
    resources: ResourceState,
    chronicle: Chronicle,
    session: SessionConfig,
}

impl NarrativeController {
    pub fn new(deck: Deck, session: SessionConfig) -> Self {
        Self {
            deck,
            mode: NarrativeMode::Playing { index: 0 },
            resources: session.initial_resources,
            chronicle: Chronicle::new(session.initial_time_label.clone()),
            session,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn mode(&self) -> &NarrativeMode {
        &self.mode
    }

    pub fn resources(&self) -> &ResourceState {
        &self.resources
    }

    pub fn chronicle(&self) -> &Chronicle {
        &self.chronicle
    }

    /// Position in the active sequence. Always 0 while an ending shows.
    pub fn index(&self) -> usize {
        match self.mode {
            NarrativeMode::Playing { index } => index,
            NarrativeMode::Ending { .. } => 0,
        }
    }

    pub fn in_ending(&self) -> bool {
        matches!(self.mode, NarrativeMode::Ending { .. })
    }

    /// Id of the ending being shown, e.g. `water_0`.
    pub fn ending_id(&self) -> Option<String> {
        match &self.mode {
            NarrativeMode::Ending { extreme, .. } => Some(extreme.id()),
            NarrativeMode::Playing { .. } => None,
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        match &self.mode {
            NarrativeMode::Playing { index } => self.deck.card(*index),
            NarrativeMode::Ending { card, .. } => Some(card),
        }
    }

    /// The card that will show after the current one. From an ending that is
    /// the first narrative card, since the only way out is a restart.
    pub fn next_card(&self) -> Option<&Card> {
        match &self.mode {
            NarrativeMode::Playing { index } => self.deck.card((index + 1) % self.deck.len()),
            NarrativeMode::Ending { .. } => self.deck.card(0),
        }
    }

    /// Apply the effect of answering the current card.
    ///
    /// The index is not moved here; callers advance with [`advance`] once the
    /// advance delay has passed.
    ///
    /// [`advance`]: NarrativeController::advance
    pub fn choose(&mut self, direction: Direction) -> ChoiceOutcome {
        let Some(card) = self.current_card() else {
            return ChoiceOutcome::Ignored;
        };

        if self.in_ending() {
            self.restart();
            return ChoiceOutcome::Restarted;
        }

        let card_id = card.id.clone();
        let effect = card.effect_for(direction).clone();

        self.chronicle.apply(&effect);
        let (next, extreme) = self.resources.apply(&effect.deltas);
        self.resources = next;
        tracing::debug!(card = %card_id, ?direction, resources = ?next, "choice applied");

        let Some(extreme) = extreme else {
            return ChoiceOutcome::Applied { resources: next };
        };

        match self.deck.ending_for(&extreme) {
            Some(ending) => {
                tracing::info!(ending = %extreme, "ending reached");
                self.mode = NarrativeMode::Ending {
                    extreme,
                    card: ending.clone(),
                };
                ChoiceOutcome::EndingReached { extreme, resources: next }
            }
            None => {
                tracing::warn!(extreme = %extreme, "no ending card for extreme, continuing");
                ChoiceOutcome::Applied { resources: next }
            }
        }
    }

    /// Move to the next narrative card, wrapping at the end of the deck.
    /// Does nothing while an ending shows.
    pub fn advance(&mut self) -> bool {
        match &mut self.mode {
            NarrativeMode::Playing { index } => {
                *index = (*index + 1) % self.deck.len();
                true
            }
            NarrativeMode::Ending { .. } => false,
        }
    }

    /// Reset meters, time and position; back to the first narrative card.
    pub fn restart(&mut self) {
        self.resources = self.session.initial_resources;
        self.chronicle = Chronicle::new(self.session.initial_time_label.clone());
        self.mode = NarrativeMode::Playing { index: 0 };
        tracing::info!("session restarted");
    }

    /// Replace the narrative cards. Meters and time are kept; the position
    /// goes back to the first card unless an ending is showing, which stays
    /// until restart. On error nothing changes.
    pub fn load_deck(&mut self, cards: Vec<Card>) -> Result<(), DeckError> {
        self.deck.replace_cards(cards)?;
        if let NarrativeMode::Playing { index } = &mut self.mode {
            *index = 0;
        }
        Ok(())
    }
}

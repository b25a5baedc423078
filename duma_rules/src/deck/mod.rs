//! Decks: the ordered narrative cards plus the ending cards keyed by extreme.

mod asset;

pub use asset::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cards::Card;
use crate::elements::Extreme;
use crate::error::DeckError;

/// Identifies one version of a deck's narrative cards.
///
/// A fresh revision is minted every time the cards are replaced, so a
/// renderer can tell an edited deck from the one it cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckRevision(pub Uuid);

impl DeckRevision {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeckRevision {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeckRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Narrative cards in play order and the ending cards.
#[derive(Debug, Clone)]
pub struct Deck {
    revision: DeckRevision,
    cards: Vec<Card>,
    endings: Vec<Card>,
}

impl Deck {
    /// Build a deck, validating both card sets.
    pub fn new(cards: Vec<Card>, endings: Vec<Card>) -> Result<Self, DeckError> {
        validate_cards(&cards)?;
        for (index, ending) in endings.iter().enumerate() {
            ending.validate(index)?;
        }

        let deck = Self {
            revision: DeckRevision::new(),
            cards,
            endings,
        };

        let missing = deck.missing_endings();
        if !missing.is_empty() {
            let ids: Vec<_> = missing.iter().map(Extreme::id).collect();
            tracing::warn!(missing = ?ids, "deck has no ending card for some extremes");
        }
        Ok(deck)
    }

    pub fn revision(&self) -> DeckRevision {
        self.revision
    }

    /// Narrative cards in play order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn endings(&self) -> &[Card] {
        &self.endings
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false: construction rejects an empty card list.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// The ending card unlocked by `extreme`, if the deck has one.
    pub fn ending_for(&self, extreme: &Extreme) -> Option<&Card> {
        self.endings.iter().find(|card| card.id.is_ending_for(extreme))
    }

    /// Extremes that would reach no ending card.
    pub fn missing_endings(&self) -> Vec<Extreme> {
        Extreme::all()
            .filter(|extreme| self.ending_for(extreme).is_none())
            .collect()
    }

    /// Swap in a new narrative sequence. On error the deck is unchanged.
    pub fn replace_cards(&mut self, cards: Vec<Card>) -> Result<(), DeckError> {
        validate_cards(&cards)?;
        self.cards = cards;
        self.revision = DeckRevision::new();
        tracing::info!(
            cards = self.cards.len(),
            revision = %self.revision,
            "narrative cards replaced"
        );
        Ok(())
    }

    /// Serialize the narrative cards as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, DeckError> {
        serde_json::to_string_pretty(&self.cards).map_err(DeckError::Serialize)
    }

    /// Parse and validate a serialized narrative sequence.
    pub fn parse_cards_json(text: &str) -> Result<Vec<Card>, DeckError> {
        let cards: Vec<Card> = serde_json::from_str(text)?;
        validate_cards(&cards)?;
        Ok(cards)
    }
}

/// A narrative sequence must be non-empty and every card well formed.
pub fn validate_cards(cards: &[Card]) -> Result<(), DeckError> {
    if cards.is_empty() {
        return Err(DeckError::Empty);
    }
    for (index, card) in cards.iter().enumerate() {
        card.validate(index)?;
    }
    Ok(())
}

//! The deck asset format and the bundled default deck.

use serde::{Deserialize, Serialize};

use super::Deck;
use crate::cards::Card;
use crate::error::DeckError;

const BUNDLED_DECK: &str = include_str!("../../assets/deck.json");

/// On-disk shape of a complete deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckAsset {
    pub cards: Vec<Card>,
    #[serde(default)]
    pub endings: Vec<Card>,
}

impl Deck {
    /// Load a deck from its asset JSON.
    pub fn from_asset_json(text: &str) -> Result<Self, DeckError> {
        let asset: DeckAsset = serde_json::from_str(text)?;
        Deck::new(asset.cards, asset.endings)
    }

    /// The deck shipped with the crate.
    pub fn bundled() -> Result<Self, DeckError> {
        Self::from_asset_json(BUNDLED_DECK)
    }

    pub fn to_asset(&self) -> DeckAsset {
        DeckAsset {
            cards: self.cards.clone(),
            endings: self.endings.clone(),
        }
    }
}

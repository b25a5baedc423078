//! The card record.

use serde::{Deserialize, Serialize};

use super::{CardId, Choice, Direction, Effect, PerChoice};
use crate::error::DeckError;

/// Accent used when a card has no colour for the active swipe.
pub const NEUTRAL_COLOR: &str = "transparent";

/// One decision point of the story. Ending cards share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub question: String,
    pub image: String,
    /// Looping background track played while the card is showing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    /// Hint text for each answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<PerChoice<String>>,
    /// Accent colour for each answer.
    pub color: PerChoice<String>,
    pub effects: PerChoice<Effect>,
}

impl Card {
    /// Create a card with no-op effects and neutral colours.
    pub fn new(
        id: impl Into<CardId>,
        question: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: None,
            question: question.into(),
            image: image.into(),
            music: None,
            description: None,
            color: PerChoice::new(NEUTRAL_COLOR.to_string(), NEUTRAL_COLOR.to_string()),
            effects: PerChoice::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_music(mut self, track: impl Into<String>) -> Self {
        self.music = Some(track.into());
        self
    }

    pub fn with_effect(mut self, direction: Direction, effect: Effect) -> Self {
        *self.effects.get_mut(direction.choice()) = effect;
        self
    }

    pub fn with_color(mut self, direction: Direction, color: impl Into<String>) -> Self {
        *self.color.get_mut(direction.choice()) = color.into();
        self
    }

    pub fn with_description(mut self, yes: impl Into<String>, no: impl Into<String>) -> Self {
        self.description = Some(PerChoice::new(yes.into(), no.into()));
        self
    }

    pub fn effect_for(&self, direction: Direction) -> &Effect {
        self.effects.for_direction(direction)
    }

    pub fn color_for(&self, direction: Direction) -> &str {
        self.color.for_direction(direction)
    }

    /// Hint text for a swipe, falling back to `YES` / `NO`.
    pub fn hint_for(&self, direction: Direction) -> &str {
        match &self.description {
            Some(description) => description.for_direction(direction),
            None => match direction.choice() {
                Choice::Yes => "YES",
                Choice::No => "NO",
            },
        }
    }

    /// Check the fields a deck cannot work without.
    pub fn validate(&self, index: usize) -> Result<(), DeckError> {
        if self.question.trim().is_empty() {
            return Err(DeckError::MissingField { index, field: "question" });
        }
        if self.image.trim().is_empty() {
            return Err(DeckError::MissingField { index, field: "image" });
        }
        Ok(())
    }
}

//! Card definitions: ids, swipe directions and the per-choice records a card
//! carries.

mod card;
mod effect;

pub use card::*;
pub use effect::*;

use serde::{Deserialize, Serialize};

use crate::elements::Extreme;

/// Identifier of a card.
///
/// Narrative cards are usually numbered while ending cards are named after
/// the extreme that unlocks them, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardId {
    Number(u64),
    Name(String),
}

impl CardId {
    pub fn named(name: impl Into<String>) -> Self {
        CardId::Name(name.into())
    }

    /// Whether this id is the ending id for `extreme`.
    pub fn is_ending_for(&self, extreme: &Extreme) -> bool {
        matches!(self, CardId::Name(name) if *name == extreme.id())
    }
}

impl From<u64> for CardId {
    fn from(value: u64) -> Self {
        CardId::Number(value)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId::Name(value.to_string())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardId::Number(n) => write!(f, "{}", n),
            CardId::Name(s) => f.write_str(s),
        }
    }
}

/// Horizontal swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// The answer a swipe in this direction stands for.
    pub fn choice(&self) -> Choice {
        match self {
            Direction::Right => Choice::Yes,
            Direction::Left => Choice::No,
        }
    }

    /// Map a keyboard key name to a direction.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "d" => Some(Direction::Right),
            "ArrowLeft" | "a" => Some(Direction::Left),
            _ => None,
        }
    }

    /// `+1.0` for right, `-1.0` for left.
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

/// The two answers a card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Yes,
    No,
}

/// A value held once per answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerChoice<T> {
    pub yes: T,
    pub no: T,
}

impl<T> PerChoice<T> {
    pub fn new(yes: T, no: T) -> Self {
        Self { yes, no }
    }

    pub fn get(&self, choice: Choice) -> &T {
        match choice {
            Choice::Yes => &self.yes,
            Choice::No => &self.no,
        }
    }

    pub fn get_mut(&mut self, choice: Choice) -> &mut T {
        match choice {
            Choice::Yes => &mut self.yes,
            Choice::No => &mut self.no,
        }
    }

    /// Value for the answer a swipe direction stands for.
    pub fn for_direction(&self, direction: Direction) -> &T {
        self.get(direction.choice())
    }
}

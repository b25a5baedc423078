//! Elapsed-time tracking for a session.

use serde::{Deserialize, Serialize};

use crate::cards::Effect;

/// Label shown before any card has changed it.
pub const DEFAULT_TIME_LABEL: &str = "Time before existence";

/// Elapsed time and the label displayed next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chronicle {
    /// Elapsed time counter. Effects may move it backwards.
    pub days: i64,
    pub label: String,
}

impl Default for Chronicle {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_LABEL)
    }
}

impl Chronicle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            days: 0,
            label: label.into(),
        }
    }

    /// Apply the time part of an effect.
    pub fn apply(&mut self, effect: &Effect) {
        if let Some(time) = effect.time {
            self.days = self.days.saturating_add(time);
        }
        if let Some(label) = &effect.time_label {
            self.label.clone_from(label);
        }
    }
}

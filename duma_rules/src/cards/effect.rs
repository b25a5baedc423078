//! Choice effects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::elements::{Element, ElementDeltas};
use crate::error::DeckError;

/// What picking one answer on a card does.
///
/// In deck files an effect is a flat object: element names map to signed
/// deltas, next to the optional `time` and `timeLabel` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEffect", into = "RawEffect")]
pub struct Effect {
    pub deltas: ElementDeltas,
    /// Change to the elapsed-time counter. May be negative.
    pub time: Option<i64>,
    /// Replacement for the elapsed-time label.
    pub time_label: Option<String>,
}

impl Effect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delta(mut self, element: Element, delta: i32) -> Self {
        self.deltas.insert(element, delta);
        self
    }

    pub fn with_time(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_time_label(mut self, label: impl Into<String>) -> Self {
        self.time_label = Some(label.into());
        self
    }
}

/// Wire shape of an [`Effect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<i64>,
    #[serde(rename = "timeLabel", default, skip_serializing_if = "Option::is_none")]
    time_label: Option<String>,
    #[serde(flatten)]
    deltas: BTreeMap<String, i32>,
}

impl TryFrom<RawEffect> for Effect {
    type Error = DeckError;

    fn try_from(raw: RawEffect) -> Result<Self, Self::Error> {
        let mut deltas = ElementDeltas::new();
        for (name, delta) in raw.deltas {
            let element = Element::from_name(&name).ok_or(DeckError::UnknownResource(name))?;
            deltas.insert(element, delta);
        }
        Ok(Self {
            deltas,
            time: raw.time,
            time_label: raw.time_label,
        })
    }
}

impl From<Effect> for RawEffect {
    fn from(effect: Effect) -> Self {
        Self {
            time: effect.time,
            time_label: effect.time_label,
            deltas: effect
                .deltas
                .iter()
                .map(|(element, delta)| (element.name().to_string(), delta))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_effect() {
        let json = r#"{"fire": 10, "water": -5, "time": 3, "timeLabel": "Age of ash"}"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        assert_eq!(effect.deltas.get(Element::Fire), Some(10));
        assert_eq!(effect.deltas.get(Element::Water), Some(-5));
        assert_eq!(effect.deltas.get(Element::Air), None);
        assert_eq!(effect.time, Some(3));
        assert_eq!(effect.time_label.as_deref(), Some("Age of ash"));
    }

    #[test]
    fn test_parse_empty_effect() {
        let effect: Effect = serde_json::from_str("{}").unwrap();
        assert!(effect.deltas.is_empty());
        assert!(effect.time.is_none());
    }

    #[test]
    fn test_unknown_resource_rejected() {
        let err = serde_json::from_str::<Effect>(r#"{"gold": 5}"#).unwrap_err();
        assert!(err.to_string().contains("gold"));
    }

    #[test]
    fn test_serialize_flat() {
        let effect = Effect::new().with_delta(Element::Air, -2).with_time(1);
        let value = serde_json::to_value(&effect).unwrap();
        assert_eq!(value, serde_json::json!({"air": -2, "time": 1}));
    }
}

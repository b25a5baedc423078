//! Presentation model: what a renderer needs to draw a frame.
//!
//! Nothing here performs I/O. Values are derived from engine state so any
//! renderer can interpolate rotation, opacity and colour the same way.

mod audio;

pub use audio::*;

use duma_rules::{Card, Chronicle, Direction, Element, GestureConfig, ResourceState};
use serde::{Deserialize, Serialize};

/// Counter text shown while an ending is on screen.
pub const ENDLESS_COUNTER: &str = "∞";

/// Transform and tint of the card being swiped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardVisual {
    /// Horizontal offset in viewport units.
    pub offset_x: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
    /// Background accent; `None` when the card is neutral.
    pub accent: Option<String>,
}

impl CardVisual {
    pub fn neutral() -> Self {
        Self {
            offset_x: 0.0,
            rotation_deg: 0.0,
            opacity: 1.0,
            accent: None,
        }
    }

    pub fn compute(
        card: &Card,
        direction: Option<Direction>,
        progress: f32,
        config: &GestureConfig,
    ) -> Self {
        let Some(direction) = direction else {
            return Self::neutral();
        };
        let progress = progress.clamp(0.0, 1.0);
        let sign = direction.sign();
        Self {
            offset_x: sign * progress * config.viewport_width / 2.0,
            rotation_deg: sign * progress * config.max_rotation_deg,
            opacity: 1.0 - progress,
            accent: Some(card.color_for(direction).to_string()),
        }
    }
}

/// The card waiting underneath the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextCardPreview {
    pub visible: bool,
    pub opacity: f32,
}

impl NextCardPreview {
    /// Only shown while a commit is animating, fading in with progress.
    pub fn compute(animating: bool, progress: f32) -> Self {
        Self {
            visible: animating,
            opacity: if animating { progress.clamp(0.0, 1.0) } else { 0.0 },
        }
    }
}

/// Elapsed-time readout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDisplay {
    pub label: String,
    pub counter: String,
}

impl TimeDisplay {
    pub fn compute(chronicle: &Chronicle, in_ending: bool) -> Self {
        if in_ending {
            Self {
                label: String::new(),
                counter: ENDLESS_COUNTER.to_string(),
            }
        } else {
            Self {
                label: chronicle.label.clone(),
                counter: chronicle.days.to_string(),
            }
        }
    }
}

/// Fill level of one element meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementGauge {
    pub element: Element,
    pub fill_percent: u8,
}

impl ElementGauge {
    /// Gauges for every element, canonical order.
    pub fn all(resources: &ResourceState) -> [ElementGauge; 4] {
        Element::ALL.map(|element| ElementGauge {
            element,
            fill_percent: resources.fill_percent(element),
        })
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub current: &'a Card,
    pub next: Option<&'a Card>,
    pub visual: CardVisual,
    pub preview: NextCardPreview,
    /// Hint texts for the right and left swipes.
    pub hints: (&'a str, &'a str),
    /// Hint to highlight for the direction currently leaned towards.
    pub highlighted: Option<Direction>,
    pub time: TimeDisplay,
    pub gauges: [ElementGauge; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(1u64, "?", "/x.png")
            .with_color(Direction::Right, "green")
            .with_color(Direction::Left, "red")
    }

    fn config() -> GestureConfig {
        GestureConfig {
            viewport_width: 800.0,
            ..GestureConfig::default()
        }
    }

    #[test]
    fn test_neutral_visual() {
        let visual = CardVisual::compute(&card(), None, 0.7, &config());
        assert_eq!(visual, CardVisual::neutral());
    }

    #[test]
    fn test_visual_right() {
        let visual = CardVisual::compute(&card(), Some(Direction::Right), 0.5, &config());
        assert_eq!(visual.offset_x, 200.0);
        assert_eq!(visual.rotation_deg, 15.0);
        assert_eq!(visual.opacity, 0.5);
        assert_eq!(visual.accent.as_deref(), Some("green"));
    }

    #[test]
    fn test_visual_left() {
        let visual = CardVisual::compute(&card(), Some(Direction::Left), 1.0, &config());
        assert_eq!(visual.offset_x, -400.0);
        assert_eq!(visual.rotation_deg, -30.0);
        assert_eq!(visual.opacity, 0.0);
        assert_eq!(visual.accent.as_deref(), Some("red"));
    }

    #[test]
    fn test_preview_only_while_animating() {
        assert_eq!(
            NextCardPreview::compute(false, 0.8),
            NextCardPreview { visible: false, opacity: 0.0 }
        );
        assert_eq!(
            NextCardPreview::compute(true, 1.0),
            NextCardPreview { visible: true, opacity: 1.0 }
        );
    }

    #[test]
    fn test_time_display() {
        let mut chronicle = Chronicle::new("Age of ash");
        chronicle.days = 42;
        let display = TimeDisplay::compute(&chronicle, false);
        assert_eq!(display.label, "Age of ash");
        assert_eq!(display.counter, "42");

        let display = TimeDisplay::compute(&chronicle, true);
        assert_eq!(display.label, "");
        assert_eq!(display.counter, ENDLESS_COUNTER);
    }

    #[test]
    fn test_gauges() {
        let resources = ResourceState { air: 0, earth: 25, fire: 100, water: 60 };
        let gauges = ElementGauge::all(&resources);
        assert_eq!(gauges[0], ElementGauge { element: Element::Air, fill_percent: 0 });
        assert_eq!(gauges[2].fill_percent, 100);
        assert_eq!(gauges[3].element, Element::Water);
    }
}

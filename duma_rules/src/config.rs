//! Engine configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::chronicle::DEFAULT_TIME_LABEL;
use crate::elements::ResourceState;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let gesture = &self.gesture;
        if !(gesture.commit_threshold > 0.0 && gesture.commit_threshold < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "gesture.commit_threshold must be in (0, 1), got {}",
                gesture.commit_threshold
            )));
        }
        if !(gesture.dead_zone >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gesture.dead_zone must not be negative, got {}",
                gesture.dead_zone
            )));
        }
        if !(gesture.viewport_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "gesture.viewport_width must be positive, got {}",
                gesture.viewport_width
            )));
        }
        if !gesture.max_rotation_deg.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "gesture.max_rotation_deg must be finite, got {}",
                gesture.max_rotation_deg
            )));
        }
        if !self.session.initial_resources.is_within_bounds() {
            return Err(ConfigError::Invalid(
                "session.initial_resources must be within [0, 100]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!(
                "audio.volume must be in [0, 1], got {}",
                self.audio.volume
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Horizontal travel ignored before a direction is assigned.
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f32,
    /// Progress a drag must exceed to commit.
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f32,
    /// Width of the card surface; half of it is full progress.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_max_rotation")]
    pub max_rotation_deg: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            dead_zone: default_dead_zone(),
            commit_threshold: default_commit_threshold(),
            viewport_width: default_viewport_width(),
            max_rotation_deg: default_max_rotation(),
        }
    }
}

fn default_dead_zone() -> f32 {
    10.0
}

fn default_commit_threshold() -> f32 {
    0.3
}

fn default_viewport_width() -> f32 {
    1280.0
}

fn default_max_rotation() -> f32 {
    30.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Pause between a committed swipe and applying its effect.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Pause between applying an effect and showing the next card.
    #[serde(default = "default_advance_delay")]
    pub advance_delay_ms: u64,
}

impl TimingConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            advance_delay_ms: default_advance_delay(),
        }
    }
}

fn default_settle_delay() -> u64 {
    300
}

fn default_advance_delay() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub initial_resources: ResourceState,
    #[serde(default = "default_time_label")]
    pub initial_time_label: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_resources: ResourceState::default(),
            initial_time_label: default_time_label(),
        }
    }
}

fn default_time_label() -> String {
    DEFAULT_TIME_LABEL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub muted: bool,
    /// Background track for the whole session.
    #[serde(default = "default_theme_track")]
    pub theme_track: String,
    /// One-shot sound played when a swipe commits.
    #[serde(default = "default_swipe_effect")]
    pub swipe_effect: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: false,
            theme_track: default_theme_track(),
            swipe_effect: default_swipe_effect(),
        }
    }
}

fn default_volume() -> f32 {
    0.5
}

fn default_theme_track() -> String {
    "/background_duma.mp3".to_string()
}

fn default_swipe_effect() -> String {
    "/card_swipe.mp3".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.gesture.dead_zone, 10.0);
        assert_eq!(config.gesture.commit_threshold, 0.3);
        assert_eq!(config.timing.settle_delay(), Duration::from_millis(300));
        assert_eq!(config.timing.advance_delay(), Duration::from_millis(100));
        assert_eq!(config.session.initial_resources, ResourceState::uniform(1));
        assert_eq!(config.session.initial_time_label, DEFAULT_TIME_LABEL);
        assert_eq!(config.audio.volume, 0.5);
    }

    #[test]
    fn test_partial_document() {
        let text = r#"
            [gesture]
            viewport_width = 400.0

            [timing]
            settle_delay_ms = 50

            [session.initial_resources]
            air = 50
            earth = 50
            fire = 50
            water = 50
        "#;
        let config = EngineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.gesture.viewport_width, 400.0);
        assert_eq!(config.gesture.dead_zone, 10.0);
        assert_eq!(config.timing.settle_delay_ms, 50);
        assert_eq!(config.timing.advance_delay_ms, 100);
        assert_eq!(config.session.initial_resources, ResourceState::uniform(50));
    }

    #[test]
    fn test_invalid_threshold() {
        let err = EngineConfig::from_toml_str("[gesture]\ncommit_threshold = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_nan_rejected() {
        for text in [
            "[gesture]\nviewport_width = nan",
            "[gesture]\ndead_zone = nan",
            "[gesture]\nmax_rotation_deg = inf",
        ] {
            assert!(
                matches!(EngineConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
                "accepted {text}"
            );
        }
    }

    #[test]
    fn test_partial_resource_table() {
        let text = "[session.initial_resources]\nair = 50";
        let config = EngineConfig::from_toml_str(text).unwrap();
        let resources = config.session.initial_resources;
        assert_eq!(resources.air, 50);
        assert_eq!(resources.earth, 1);
        assert_eq!(resources.water, 1);
    }

    #[test]
    fn test_invalid_resources() {
        let text = "[session.initial_resources]\nair = 101\nearth = 1\nfire = 1\nwater = 1";
        assert!(matches!(
            EngineConfig::from_toml_str(text),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            EngineConfig::from_toml_str("[gesture"),
            Err(ConfigError::Parse(_))
        ));
    }
}

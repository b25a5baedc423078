//! Error types for deck and configuration handling.

use thiserror::Error;

/// Failures while parsing or validating a deck.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck contains no cards")]
    Empty,

    #[error("card #{index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("effect references unknown resource `{0}`")]
    UnknownResource(String),

    #[error("failed to parse deck: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to serialize deck: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Failures while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//! Engine-level errors.

use duma_rules::{ConfigError, DeckError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("engine has been shut down")]
    ShutDown,
}

//! # Duma Rules
//!
//! The rules crate for the Duma swipe narrative - cards, the four element
//! meters, decks of narrative and ending cards, and engine configuration.
//! This crate holds no timers or input handling; it is the single source of
//! truth for what a choice does to the game state.

pub mod cards;
pub mod chronicle;
pub mod config;
pub mod deck;
pub mod elements;
pub mod error;

pub use cards::*;
pub use chronicle::*;
pub use config::*;
pub use deck::*;
pub use elements::*;
pub use error::*;

//! # Duma Core
//!
//! The interactive engine of the Duma swipe narrative. It reads input from
//! the host, drives the story through `duma_rules`, and reports every change
//! as an event. The engine never touches a screen or an audio device itself.
//!
//! ## Core Components
//!
//! - **gesture**: Turns pointer, touch and key input into committed swipes
//! - **narrative**: Applies choices, advances through the deck, reaches endings
//! - **scheduler**: Cancellable delays on a host-driven clock
//! - **presentation**: Frame model for renderers and the audio binding
//! - **engine**: The facade that owns one session and wires the rest together
//!
//! ## Design Philosophy
//!
//! - **Single owner**: One `Engine` per session, no global state
//! - **Event-Driven**: Renderers and audio react to events instead of polling
//! - **Host-Clocked**: Time only moves when the host calls `Engine::tick`

pub mod engine;
pub mod error;
pub mod events;
pub mod gesture;
pub mod narrative;
pub mod presentation;
pub mod scheduler;

pub use engine::*;
pub use error::*;
pub use events::*;
pub use gesture::*;
pub use narrative::*;
pub use presentation::*;
pub use scheduler::*;

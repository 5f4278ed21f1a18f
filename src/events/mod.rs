//! Event surface exposed to controllers and presentation layers.
//!
//! The engine reports game start, turns, rounds, pending choices, card draws
//! and game over as [`GameEvent`] values delivered through an [`EventBus`].

pub mod bus;
pub mod event;

pub use bus::EventBus;
pub use event::{GameEvent, PlayerSnapshot};

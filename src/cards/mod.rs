//! Card decks feeding event tiles.
//!
//! ## Key Types
//!
//! - `Card`: a named card with a `CardEffect`
//! - `CardService`: named decks, shuffled once, drawn cyclically
//! - `DeckConfig`: load-time deck schema

pub mod card;
pub mod config;
pub mod service;

pub use card::{Card, CardEffect};
pub use config::DeckConfig;
pub use service::CardService;

//! Core engine types: players, RNG, dice, configuration, errors, state.
//!
//! These are shared by every rule variant. Variants configure behaviour via
//! `GameConfig` rather than modifying the core.

pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{GameConfig, MonopolyRules, PlayerSetup};
pub use dice::{Dice, FaceSource, LoadedFaces};
pub use error::{ErrorKind, GameError, GameResult, LookupError, StateError, ValidationError};
pub use player::{Landing, Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, MAX_PLAYERS};

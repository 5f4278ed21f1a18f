//! # tileboard
//!
//! A turn-based board-game core: rule variants driving players over a shared
//! tile board.
//!
//! ## Design Principles
//!
//! 1. **Variants Share One Contract**: every rule set implements
//!    [`GameService`]. The race variant and the property variant keep their
//!    own bookkeeping and never touch each other's.
//!
//! 2. **Board as an Arena**: tiles are addressed by dense index; a player's
//!    position is an index, so movement and clamping are O(1).
//!
//! 3. **Single-Level Effects**: a landing action runs once. Movement caused
//!    by that action (ladders, snakes, cards, box choices) never triggers the
//!    destination's action.
//!
//! 4. **Reproducible**: dice and deck shuffles draw from seeded
//!    [`GameRng`] streams, or from scripted faces in tests.
//!
//! 5. **Presentation-Agnostic**: the engine reports what happened as
//!    [`GameEvent`]s to subscribed callbacks and never calls a display.
//!
//! ## Modules
//!
//! - `core`: players, dice, RNG, configuration, errors, session state
//! - `board`: tiles, tile actions, the board arena, board schema
//! - `cards`: cards, cyclic decks, deck schema
//! - `events`: game events and the listener bus
//! - `rules`: the `GameService` contract and both variants
//! - `game`: the `BoardGame` aggregate controllers drive

pub mod board;
pub mod cards;
pub mod core;
pub mod events;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Dice, FaceSource, LoadedFaces,
    ErrorKind, GameError, GameResult, LookupError, StateError, ValidationError,
    GameConfig, MonopolyRules, PlayerSetup,
    GameRng, GameState, Player, PlayerId, PlayerMap,
};

pub use crate::board::{
    Board, BoardConfig, BoxChoice, PropertyKind, Tile, TileAction, TileId, TileOutcome,
};

pub use crate::cards::{Card, CardEffect, CardService, DeckConfig};

pub use crate::events::{EventBus, GameEvent, PlayerSnapshot};

pub use crate::rules::{GameService, MonopolyService, SnakesLaddersService, Variant};

pub use crate::game::BoardGame;

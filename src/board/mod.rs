//! Board graph and tile actions.
//!
//! - `tile`: `TileId` and `Tile` (action + successor link)
//! - `action`: `TileAction` strategies and the `TileOutcome` they report
//! - `board`: the validated tile arena and movement along it
//! - `config`: load-time schema for board files

pub mod action;
pub mod board;
pub mod config;
pub mod tile;

pub use action::{BoxChoice, PropertyDeed, PropertyKind, RentSchedule, TileAction, TileOutcome};
pub use board::{Board, Step};
pub use config::{BoardConfig, TileRecord};
pub use tile::{Tile, TileId};

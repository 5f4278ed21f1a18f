//! Rule variants.
//!
//! Each variant implements [`GameService`], the turn/round state machine
//! driven by [`crate::BoardGame`]. Variants read and mutate a
//! [`crate::core::GameState`] but never interpret each other's bookkeeping.
//!
//! - `snakes_ladders`: race to the terminal tile
//! - `monopoly`: buy tiles, collect rent, outlast the other players

pub mod monopoly;
pub mod service;
pub mod snakes_ladders;
pub mod turn_order;

pub use monopoly::{Holding, MonopolyService, RAILROAD_BASE_RENT};
pub use service::{GameService, Variant};
pub use snakes_ladders::SnakesLaddersService;
pub use turn_order::TurnOrder;

//! Game configuration types.
//!
//! Controllers configure a session at startup by providing:
//! - `GameConfig`: dice, seed, and variant rules
//! - `MonopolyRules`: balances, salary, jail, and termination for the
//!   property variant
//! - `PlayerSetup`: name and piece for each participant
//!
//! All deserialize from already-parsed data; missing fields take defaults.

use serde::{Deserialize, Serialize};

use crate::board::TileId;

/// One row of the player setup file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    /// Token shown on the board.
    pub piece: String,
}

impl PlayerSetup {
    pub fn new(name: impl Into<String>, piece: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            piece: piece.into(),
        }
    }
}

/// Rules for the property variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonopolyRules {
    /// Balance every player starts with.
    pub starting_balance: i64,

    /// Paid to a player whose roll wraps past the start tile.
    pub go_salary: i64,

    /// Turns a jailed player sits out.
    pub jail_turns: u8,

    /// Tile a jailed player is placed on. `None` leaves the player in place.
    pub jail_tile: Option<TileId>,

    /// Rounds after which the game ends. `None` plays until one solvent
    /// player remains.
    pub round_limit: Option<u32>,

    /// Buy unowned property automatically when affordable.
    pub auto_buy: bool,
}

impl Default for MonopolyRules {
    fn default() -> Self {
        Self {
            starting_balance: 1500,
            go_salary: 200,
            jail_turns: 3,
            jail_tile: None,
            round_limit: None,
            auto_buy: true,
        }
    }
}

impl MonopolyRules {
    #[must_use]
    pub fn with_starting_balance(mut self, balance: i64) -> Self {
        self.starting_balance = balance;
        self
    }

    #[must_use]
    pub fn with_go_salary(mut self, salary: i64) -> Self {
        self.go_salary = salary;
        self
    }

    #[must_use]
    pub fn with_jail_tile(mut self, tile: TileId) -> Self {
        self.jail_tile = Some(tile);
        self
    }

    #[must_use]
    pub fn with_round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = Some(rounds);
        self
    }

    #[must_use]
    pub fn without_auto_buy(mut self) -> Self {
        self.auto_buy = false;
        self
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of six-sided dice rolled per turn.
    pub number_of_dice: u8,

    /// Seed for dice and deck shuffling.
    pub seed: u64,

    /// Property-variant rules; ignored by the race variant.
    pub monopoly: MonopolyRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            number_of_dice: 1,
            seed: 0,
            monopoly: MonopolyRules::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dice(mut self, number_of_dice: u8) -> Self {
        self.number_of_dice = number_of_dice;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_monopoly(mut self, rules: MonopolyRules) -> Self {
        self.monopoly = rules;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.number_of_dice, 1);
        assert_eq!(config.monopoly.starting_balance, 1500);
        assert_eq!(config.monopoly.jail_turns, 3);
        assert!(config.monopoly.auto_buy);
        assert!(config.monopoly.round_limit.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_dice(2)
            .with_seed(9)
            .with_monopoly(
                MonopolyRules::default()
                    .with_starting_balance(500)
                    .with_round_limit(40)
                    .with_jail_tile(TileId(10))
                    .without_auto_buy(),
            );

        assert_eq!(config.number_of_dice, 2);
        assert_eq!(config.seed, 9);
        assert_eq!(config.monopoly.starting_balance, 500);
        assert_eq!(config.monopoly.round_limit, Some(40));
        assert_eq!(config.monopoly.jail_tile, Some(TileId(10)));
        assert!(!config.monopoly.auto_buy);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"number_of_dice": 2, "monopoly": {"go_salary": 100}}"#)
                .unwrap();

        assert_eq!(config.number_of_dice, 2);
        assert_eq!(config.seed, 0);
        assert_eq!(config.monopoly.go_salary, 100);
        assert_eq!(config.monopoly.starting_balance, 1500);
    }
}

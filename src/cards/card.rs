//! Cards and what they do.

use serde::{Deserialize, Serialize};

/// What happens to the player who draws a card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardEffect {
    /// Flavour only.
    #[default]
    Nothing,
    /// Receive money from the bank.
    Collect { amount: i64 },
    /// Pay money to the bank.
    Pay { amount: i64 },
    /// Move without triggering the destination tile.
    MoveBy { delta: i32 },
    GoToJail,
}

/// A single card in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect: CardEffect,
}

impl Card {
    /// A card with no effect.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            effect: CardEffect::Nothing,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effect = effect;
        self
    }
}

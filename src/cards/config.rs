//! Load-time deck schema.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::service::CardService;
use crate::core::rng::GameRng;

/// Parsed deck file: deck name to cards in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckConfig {
    pub decks: FxHashMap<String, Vec<Card>>,
}

impl DeckConfig {
    /// Shuffle every deck once and hand them to a [`CardService`].
    pub fn build(self, rng: &GameRng) -> CardService {
        CardService::new(self.decks, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardEffect;

    #[test]
    fn test_parse_and_build() {
        let json = r#"{
            "chance": [
                {"name": "Advance", "effect": {"kind": "move_by", "delta": 3}},
                {"name": "Dividend", "description": "Bank pays you", "effect": {"kind": "collect", "amount": 50}}
            ],
            "chest": [{"name": "Blank"}]
        }"#;
        let config: DeckConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.decks["chest"][0].effect, CardEffect::Nothing);

        let cards = config.build(&GameRng::new(3));
        let mut names: Vec<_> = cards.deck_names().collect();
        names.sort_unstable();
        assert_eq!(names, ["chance", "chest"]);
        assert_eq!(cards.deck("chance").map(<[Card]>::len), Some(2));
    }
}

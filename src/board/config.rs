//! Load-time board schema.
//!
//! Parsing files is the loader's job; this is the shape the parsed data
//! takes before it becomes a [`Board`].

use serde::{Deserialize, Serialize};

use super::action::TileAction;
use super::board::Board;
use super::tile::{Tile, TileId};
use crate::core::error::GameResult;

/// One tile as it appears in a board file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub id: usize,
    #[serde(default)]
    pub action: Option<TileAction>,
    #[serde(default)]
    pub next: Option<usize>,
}

/// A parsed board file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub tiles: Vec<TileRecord>,
}

impl BoardConfig {
    /// Validate every action and the tile graph, then build the board.
    ///
    /// Records may appear in any order.
    pub fn build(mut self) -> GameResult<Board> {
        self.tiles.sort_by_key(|record| record.id);

        let tiles = self
            .tiles
            .into_iter()
            .map(|record| {
                let tile = Tile::new(TileId(record.id), record.next.map(TileId));
                match record.action {
                    Some(action) => {
                        action.validate()?;
                        Ok(tile.with_action(action))
                    }
                    None => Ok(tile),
                }
            })
            .collect::<GameResult<Vec<_>>>()?;

        Board::new(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ValidationError;

    const RACE_BOARD: &str = r#"{
        "tiles": [
            {"id": 1, "next": 2, "action": {"kind": "ladder", "steps": 2}},
            {"id": 0, "next": 1},
            {"id": 2, "next": 3},
            {"id": 3, "action": {"kind": "snake", "steps": 3}, "next": 4},
            {"id": 4}
        ]
    }"#;

    #[test]
    fn test_build_from_json() {
        let config: BoardConfig = serde_json::from_str(RACE_BOARD).unwrap();
        let board = config.build().unwrap();

        assert_eq!(board.len(), 5);
        assert!(board.require_race_track().is_ok());
        assert_eq!(
            board.tile(TileId(1)).unwrap().action(),
            Some(&TileAction::Ladder { steps: 2 })
        );
        assert!(board.tile(TileId(4)).unwrap().is_terminal());
    }

    #[test]
    fn test_build_validates_actions() {
        let json = r#"{"tiles": [{"id": 0, "action": {"kind": "ladder", "steps": 0}}]}"#;
        let config: BoardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.build().unwrap_err(),
            ValidationError::NonPositiveSteps.into()
        );
    }

    #[test]
    fn test_build_rejects_duplicate_ids() {
        let config = BoardConfig {
            tiles: vec![
                TileRecord { id: 0, action: None, next: Some(1) },
                TileRecord { id: 0, action: None, next: None },
            ],
        };
        assert_eq!(
            config.build().unwrap_err(),
            ValidationError::NonContiguousTileId {
                expected: 1,
                found: 0
            }
            .into()
        );
    }
}

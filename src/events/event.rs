//! Outward-facing events.
//!
//! These are the only notifications the engine produces. Presentation
//! layers subscribe through [`super::EventBus`]; the engine never calls
//! into them directly.

use serde::{Deserialize, Serialize};

use crate::board::TileId;
use crate::cards::Card;
use crate::core::{Player, PlayerId};

/// Read-only copy of a player's visible state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub piece: String,
    pub tile: TileId,
    pub money: i64,
    pub turns_in_jail: u8,
    pub eliminated: bool,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            piece: player.piece().to_string(),
            tile: player.tile(),
            money: player.money(),
            turns_in_jail: player.turns_in_jail(),
            eliminated: player.is_eliminated(),
        }
    }
}

/// Something that happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `setup` finished; players are on the start tile.
    GameStarted { players: Vec<PlayerSnapshot> },

    /// One player's turn.
    TurnPlayed {
        player: PlayerId,
        roll: u32,
        from: TileId,
        to: TileId,
    },

    /// A full round; `rolls` are in turn order.
    RoundPlayed {
        rolls: Vec<u32>,
        players: Vec<PlayerSnapshot>,
    },

    /// The player landed on a box and must choose before the effect applies.
    ChoiceRequired {
        player: PlayerId,
        description: String,
    },

    /// A card left the named deck.
    CardDrawn { deck: String, card: Card },

    /// Emitted once per session, when the game first reports finished.
    GameOver { winner: Option<PlayerId> },
}

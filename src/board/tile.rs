//! Tiles: nodes of the board graph.

use serde::{Deserialize, Serialize};

use super::action::TileAction;

/// Tile identifier: the tile's index in the board's ordered sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub usize);

impl TileId {
    /// The start tile. Every board has one.
    pub const START: TileId = TileId(0);

    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A board node with an optional action and an optional successor.
///
/// `next == None` marks a terminal tile for the race variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    action: Option<TileAction>,
    next: Option<TileId>,
}

impl Tile {
    pub fn new(id: TileId, next: Option<TileId>) -> Self {
        Self {
            id,
            action: None,
            next,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: TileAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn action(&self) -> Option<&TileAction> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn next(&self) -> Option<TileId> {
        self.next
    }

    /// True when the tile has no successor.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }

    pub(crate) fn set_action(&mut self, action: TileAction) {
        self.action = Some(action);
    }
}

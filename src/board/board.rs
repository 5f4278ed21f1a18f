//! The board: an arena of tiles addressed by index.
//!
//! Tile ids are dense and start at 0, so a player's position is just an
//! index into the ordered sequence and movement is O(1). `next` links are
//! kept as indices; they decide whether the board is a race track (the
//! chain from the start ends at a terminal tile) or a circuit (the chain
//! loops back).

use super::action::TileAction;
use super::tile::{Tile, TileId};
use crate::core::error::{GameResult, LookupError, ValidationError};

/// Result of stepping along the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub to: TileId,
    /// True when a circuit wrapped past the start tile.
    pub passed_start: bool,
}

/// Ordered, validated collection of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
    cyclic: bool,
}

impl Board {
    /// Build a board from tiles listed in id order.
    ///
    /// Fails if the list is empty, ids are not `0..len` in order, or a
    /// `next` link points outside the board.
    pub fn new(tiles: Vec<Tile>) -> GameResult<Self> {
        if tiles.is_empty() {
            return Err(ValidationError::EmptyBoard.into());
        }

        for (expected, tile) in tiles.iter().enumerate() {
            if tile.id().index() != expected {
                return Err(ValidationError::NonContiguousTileId {
                    expected,
                    found: tile.id().index(),
                }
                .into());
            }
            if let Some(next) = tile.next() {
                if next.index() >= tiles.len() {
                    return Err(ValidationError::DanglingLink {
                        tile: expected,
                        next: next.index(),
                    }
                    .into());
                }
            }
        }

        let cyclic = Self::chain_loops(&tiles);
        Ok(Self { tiles, cyclic })
    }

    /// A straight track of `len` tiles; the last one is terminal.
    ///
    /// Fixture builder for tests and hard-coded boards. Use
    /// [`Board::try_linear`] when `len` comes from input.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    pub fn linear(len: usize) -> Self {
        assert!(len > 0, "Board must have at least 1 tile");
        Self::linear_unchecked(len)
    }

    /// A straight track of `len` tiles, or `EmptyBoard` when `len` is 0.
    pub fn try_linear(len: usize) -> GameResult<Self> {
        if len == 0 {
            return Err(ValidationError::EmptyBoard.into());
        }
        Ok(Self::linear_unchecked(len))
    }

    /// A loop of `len` tiles; the last one links back to the start.
    ///
    /// Fixture builder for tests and hard-coded boards. Use
    /// [`Board::try_circuit`] when `len` comes from input.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    pub fn circuit(len: usize) -> Self {
        assert!(len > 0, "Board must have at least 1 tile");
        Self::circuit_unchecked(len)
    }

    /// A loop of `len` tiles, or `EmptyBoard` when `len` is 0.
    pub fn try_circuit(len: usize) -> GameResult<Self> {
        if len == 0 {
            return Err(ValidationError::EmptyBoard.into());
        }
        Ok(Self::circuit_unchecked(len))
    }

    fn linear_unchecked(len: usize) -> Self {
        let tiles = (0..len)
            .map(|i| Tile::new(TileId(i), (i + 1 < len).then_some(TileId(i + 1))))
            .collect();
        Self {
            tiles,
            cyclic: false,
        }
    }

    fn circuit_unchecked(len: usize) -> Self {
        let tiles = (0..len)
            .map(|i| Tile::new(TileId(i), Some(TileId((i + 1) % len))))
            .collect();
        Self {
            tiles,
            cyclic: true,
        }
    }

    /// Attach an action to a tile (load time only).
    pub fn with_action(mut self, id: TileId, action: TileAction) -> GameResult<Self> {
        action.validate()?;
        self.tiles
            .get_mut(id.index())
            .ok_or(LookupError::Tile(id.index()))?
            .set_action(action);
        Ok(self)
    }

    fn chain_loops(tiles: &[Tile]) -> bool {
        let mut visited = vec![false; tiles.len()];
        let mut current = Some(TileId::START);
        while let Some(id) = current {
            if visited[id.index()] {
                return true;
            }
            visited[id.index()] = true;
            current = tiles[id.index()].next();
        }
        false
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; boards are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Look up a tile by id.
    pub fn tile(&self, id: TileId) -> GameResult<&Tile> {
        self.tiles
            .get(id.index())
            .ok_or_else(|| LookupError::Tile(id.index()).into())
    }

    /// The start tile (id 0).
    #[must_use]
    pub fn start(&self) -> &Tile {
        &self.tiles[0]
    }

    /// True when following `next` from the start loops.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Check the board can host a race: no loop, and the last tile is the
    /// only terminal one so overshooting rolls finish the race.
    pub fn require_race_track(&self) -> GameResult<()> {
        if self.cyclic {
            return Err(ValidationError::CyclicRaceBoard.into());
        }
        let (last, track) = self
            .tiles
            .split_last()
            .ok_or(ValidationError::EmptyBoard)?;
        if !last.is_terminal() {
            return Err(ValidationError::MissingTerminal.into());
        }
        if let Some(early) = track.iter().find(|tile| tile.is_terminal()) {
            return Err(ValidationError::ExtraTerminal {
                tile: early.id().index(),
            }
            .into());
        }
        Ok(())
    }

    /// Where `delta` tiles from `from` ends up.
    ///
    /// Backward movement stops at the start tile. Forward movement wraps on
    /// a circuit and stops at the last tile otherwise.
    pub fn step(&self, from: TileId, delta: i32) -> GameResult<Step> {
        self.tile(from)?;
        let len = self.tiles.len();
        let target = from.index() as i64 + i64::from(delta);

        let step = if target < 0 {
            Step {
                to: TileId::START,
                passed_start: false,
            }
        } else if (target as usize) < len {
            Step {
                to: TileId(target as usize),
                passed_start: false,
            }
        } else if self.cyclic {
            Step {
                to: TileId(target as usize % len),
                passed_start: true,
            }
        } else {
            Step {
                to: TileId(len - 1),
                passed_start: false,
            }
        };
        Ok(step)
    }
}

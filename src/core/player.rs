//! Player identification, per-player storage, and the player entity.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players. It is the index of
//! the player in the game's player list, so it stays stable for the whole
//! session (eliminated players are flagged, never removed).
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access. Used by the
//! rule variants for ledgers keyed by player.
//!
//! ## Player
//!
//! The turn participant: position, money, and jail state.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::GameResult;
use crate::board::{Board, TileId, TileOutcome};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use tileboard::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use tileboard::core::{PlayerId, PlayerMap};
///
/// let mut jail: PlayerMap<u8> = PlayerMap::with_value(3, 0);
/// jail[PlayerId::new(1)] = 3;
/// assert_eq!(jail[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, if the player is in range.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the player is in range.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Default for PlayerMap<T> {
    /// An empty map, for services that size it at setup.
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Where a move started, where it ended, and what the landing tile did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Landing {
    pub from: TileId,
    /// Tile the roll landed on, before any tile action moved the player.
    pub landed: TileId,
    /// True when a cyclic board wrapped past the start tile.
    pub passed_start: bool,
    pub outcome: TileOutcome,
}

/// A turn participant.
///
/// Mutated only through [`Player::move_by`], [`Player::set_money`],
/// [`Player::set_tile`] and the jail/elimination transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    piece: String,
    position: TileId,
    money: i64,
    turns_in_jail: u8,
    eliminated: bool,
}

impl Player {
    /// Create a player standing on the start tile with no money.
    pub fn new(id: PlayerId, name: impl Into<String>, piece: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            piece: piece.into(),
            position: TileId::START,
            money: 0,
            turns_in_jail: 0,
            eliminated: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn piece(&self) -> &str {
        &self.piece
    }

    /// The tile the player is standing on.
    #[must_use]
    pub fn tile(&self) -> TileId {
        self.position
    }

    #[must_use]
    pub fn money(&self) -> i64 {
        self.money
    }

    /// Remaining turns in jail; 0 when free.
    #[must_use]
    pub fn turns_in_jail(&self) -> u8 {
        self.turns_in_jail
    }

    #[must_use]
    pub fn is_in_jail(&self) -> bool {
        self.turns_in_jail > 0
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Place the player on a tile without triggering its action.
    pub fn set_tile(&mut self, tile: TileId) {
        self.position = tile;
    }

    pub fn set_money(&mut self, money: i64) {
        self.money = money;
    }

    /// Add `amount` (negative to charge) to the balance.
    pub fn adjust_money(&mut self, amount: i64) {
        self.money += amount;
    }

    pub fn set_turns_in_jail(&mut self, turns: u8) {
        self.turns_in_jail = turns;
    }

    /// Flag the player as out of the game. The player keeps its slot.
    pub fn eliminate(&mut self) {
        self.eliminated = true;
    }

    /// Return to the start tile with a fresh balance.
    pub fn reset(&mut self, money: i64) {
        self.position = TileId::START;
        self.money = money;
        self.turns_in_jail = 0;
        self.eliminated = false;
    }

    /// Move by `delta` tiles and run the landing tile's action once.
    ///
    /// The position never drops below the start tile. Movement caused by
    /// the landing action itself does not trigger the destination's action.
    pub fn move_by(&mut self, delta: i32, board: &Board) -> GameResult<Landing> {
        let from = self.position;
        let step = board.step(from, delta)?;
        self.position = step.to;

        let outcome = match board.tile(step.to)?.action() {
            Some(action) => action.perform(self, board)?,
            None => TileOutcome::Nothing,
        };

        tracing::trace!(player = %self.id, from = %from, to = %step.to, ?outcome, "moved");

        Ok(Landing {
            from,
            landed: step.to,
            passed_start: step.passed_start,
            outcome,
        })
    }
}

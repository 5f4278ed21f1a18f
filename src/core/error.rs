//! Error types for the engine.
//!
//! Every fallible operation returns [`GameError`], which falls into one of
//! three categories:
//!
//! - **Validation**: malformed construction parameters (rejected up front)
//! - **Lookup**: unknown tile, deck, or player
//! - **InvalidState**: an operation called at the wrong point of the session
//!
//! None of these are retried internally; they propagate to the controller.

use super::player::PlayerId;

/// Category of a [`GameError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Lookup,
    InvalidState,
}

impl ErrorKind {
    /// Returns a human-readable name for this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Lookup => "lookup",
            Self::InvalidState => "invalid_state",
        }
    }
}

/// Malformed parameters detected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("steps must be at least 1")]
    NonPositiveSteps,

    #[error("{steps} steps is more than a board can move")]
    TooManySteps { steps: u32 },

    #[error("description must not be blank")]
    BlankDescription,

    #[error("{field} must be positive, got {value}")]
    NonPositiveAmount { field: &'static str, value: i64 },

    #[error("rent schedule must not be empty")]
    EmptyRentSchedule,

    #[error("at least one die is required")]
    NoDice,

    #[error("board has no tiles")]
    EmptyBoard,

    #[error("tile ids must be contiguous from 0: expected {expected}, found {found}")]
    NonContiguousTileId { expected: usize, found: usize },

    #[error("tile {tile} links to missing tile {next}")]
    DanglingLink { tile: usize, next: usize },

    #[error("race board must not be cyclic")]
    CyclicRaceBoard,

    #[error("last tile of a race board must be terminal")]
    MissingTerminal,

    #[error("race board has a second terminal tile at {tile}")]
    ExtraTerminal { tile: usize },

    #[error("a game needs between 1 and {max} players, got {count}")]
    PlayerCount { count: usize, max: usize },
}

/// A name or id that does not resolve to anything.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no tile with id {0}")]
    Tile(usize),

    #[error("no deck named {0:?}")]
    Deck(String),

    #[error("deck {0:?} is empty")]
    EmptyDeck(String),

    #[error("{0} is not part of this game")]
    Player(PlayerId),
}

/// An operation that is not allowed in the current session state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("setup must be called before playing")]
    NotSetUp,

    #[error("{0} is not in the turn order")]
    NotInGame(PlayerId),

    #[error("it is {expected}'s turn, not {actual}'s")]
    OutOfTurn { expected: PlayerId, actual: PlayerId },

    #[error("the game is already finished")]
    Finished,

    #[error("{0} has been eliminated")]
    Eliminated(PlayerId),

    #[error("{0} has no pending choice")]
    NoPendingChoice(PlayerId),

    #[error("tile {tile} already belongs to {owner}")]
    AlreadyOwned { tile: usize, owner: PlayerId },
}

/// Crate-wide error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid parameter: {0}")]
    Validation(#[from] ValidationError),

    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("invalid state: {0}")]
    InvalidState(#[from] StateError),
}

impl GameError {
    /// The category this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Lookup(_) => ErrorKind::Lookup,
            Self::InvalidState(_) => ErrorKind::InvalidState,
        }
    }
}

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;

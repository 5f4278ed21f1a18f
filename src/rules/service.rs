//! The rule-variant contract.
//!
//! Every variant is a turn/round state machine over a [`GameState`]:
//! - `setup`: (re)start the session
//! - `play_one_round` / `play_turn`: advance players
//! - `is_finished` / `winner` / `current_player`: pure queries
//!
//! Variants keep their own bookkeeping (turn cursor, ledgers) and never
//! share it between sessions.

use crate::core::{GameResult, GameState, PlayerId};

/// Which rule set a service implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Race to the terminal tile.
    SnakesLadders,
    /// Property accumulation on a circuit.
    Monopoly,
}

/// Rule-variant state machine.
///
/// ## Implementation Notes
///
/// - `setup` must run before any turn; calling it again restarts the session
/// - `play_one_round` returns one roll per player that acted, in list order,
///   and returns no rolls when the game is already finished
/// - `play_turn` rejects players other than `current_player`
/// - `winner` is `None` until `is_finished`
pub trait GameService {
    fn variant(&self) -> Variant;

    /// Reset players, resources and turn order.
    fn setup(&mut self, state: &mut GameState) -> GameResult<()>;

    /// Give every player one turn, in player-list order.
    fn play_one_round(&mut self, state: &mut GameState) -> GameResult<Vec<u32>>;

    /// Play the turn of `player`, who must be the current player.
    fn play_turn(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<u32>;

    fn is_finished(&self, state: &GameState) -> bool;

    fn winner(&self, state: &GameState) -> Option<PlayerId>;

    /// Whose turn is next. `None` before setup or after the game ends.
    fn current_player(&self, state: &GameState) -> Option<PlayerId>;
}

impl<S: GameService + ?Sized> GameService for Box<S> {
    fn variant(&self) -> Variant {
        (**self).variant()
    }

    fn setup(&mut self, state: &mut GameState) -> GameResult<()> {
        (**self).setup(state)
    }

    fn play_one_round(&mut self, state: &mut GameState) -> GameResult<Vec<u32>> {
        (**self).play_one_round(state)
    }

    fn play_turn(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<u32> {
        (**self).play_turn(state, player)
    }

    fn is_finished(&self, state: &GameState) -> bool {
        (**self).is_finished(state)
    }

    fn winner(&self, state: &GameState) -> Option<PlayerId> {
        (**self).winner(state)
    }

    fn current_player(&self, state: &GameState) -> Option<PlayerId> {
        (**self).current_player(state)
    }
}

//! Race variant: first to the terminal tile wins.
//!
//! - Turn order is strict; `play_turn` rejects anyone but the current player
//! - A round gives every player a turn in list order, even if someone
//!   reaches the terminal tile part-way through
//! - The winner is the lowest-index player on a terminal tile, regardless
//!   of who got there first

use crate::board::TileOutcome;
use crate::core::{GameResult, GameState, PlayerId, StateError};
use crate::events::GameEvent;

use super::service::{GameService, Variant};
use super::turn_order::TurnOrder;

#[derive(Clone, Debug, Default)]
pub struct SnakesLaddersService {
    order: TurnOrder,
    ready: bool,
}

impl SnakesLaddersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_playable(&self, state: &GameState) -> GameResult<()> {
        if !self.ready {
            return Err(StateError::NotSetUp.into());
        }
        if self.is_finished(state) {
            return Err(StateError::Finished.into());
        }
        Ok(())
    }

    fn take_turn(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<u32> {
        let roll = state.roll_dice();
        let landing = state.move_player(player, roll as i32)?;

        match landing.outcome {
            TileOutcome::ChoiceRequired { description } => {
                state.require_choice(player, description);
            }
            TileOutcome::Nothing | TileOutcome::Moved { .. } => {}
            other => {
                tracing::debug!(%player, outcome = ?other, "outcome has no effect in a race");
            }
        }

        let to = state.player(player)?.tile();
        tracing::debug!(%player, roll, from = %landing.from, to = %to, "race turn");
        state.push_event(GameEvent::TurnPlayed {
            player,
            roll,
            from: landing.from,
            to,
        });
        Ok(roll)
    }
}

impl GameService for SnakesLaddersService {
    fn variant(&self) -> Variant {
        Variant::SnakesLadders
    }

    fn setup(&mut self, state: &mut GameState) -> GameResult<()> {
        state.board().require_race_track()?;
        state.reset(0);
        self.order.reset();
        self.ready = true;
        tracing::info!(players = state.player_count(), tiles = state.board().len(), "race set up");
        Ok(())
    }

    fn play_one_round(&mut self, state: &mut GameState) -> GameResult<Vec<u32>> {
        if !self.ready {
            return Err(StateError::NotSetUp.into());
        }
        if self.is_finished(state) {
            return Ok(Vec::new());
        }

        let players: Vec<PlayerId> = state.player_ids().collect();
        let mut rolls = Vec::with_capacity(players.len());
        for player in players {
            rolls.push(self.take_turn(state, player)?);
        }

        state.rounds_played += 1;
        self.order.reset();
        Ok(rolls)
    }

    fn play_turn(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<u32> {
        self.ensure_playable(state)?;
        self.order.expect(state.players(), player)?;

        let roll = self.take_turn(state, player)?;
        if !self.is_finished(state) && self.order.advance(state.players(), player) {
            state.rounds_played += 1;
        }
        Ok(roll)
    }

    fn is_finished(&self, state: &GameState) -> bool {
        self.ready && state.player_ids().any(|id| state.is_on_terminal(id))
    }

    fn winner(&self, state: &GameState) -> Option<PlayerId> {
        if !self.ready {
            return None;
        }
        state.player_ids().find(|&id| state.is_on_terminal(id))
    }

    fn current_player(&self, state: &GameState) -> Option<PlayerId> {
        if !self.ready || self.is_finished(state) {
            return None;
        }
        self.order.current(state.players())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, TileAction, TileId};
    use crate::cards::CardService;
    use crate::core::{Dice, GameConfig, GameError, LoadedFaces, PlayerSetup, ValidationError};

    fn state(board: Board, faces: &[u8], players: usize) -> GameState {
        let dice = Dice::with_source(1, LoadedFaces::new(faces.iter().copied())).unwrap();
        let setups = (0..players)
            .map(|i| PlayerSetup::new(format!("P{i}"), "piece"))
            .collect();
        GameState::new(GameConfig::default(), board, dice, setups, CardService::empty()).unwrap()
    }

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_turns_require_setup() {
        let mut state = state(Board::linear(10), &[1], 2);
        let mut service = SnakesLaddersService::new();

        assert_eq!(
            service.play_turn(&mut state, p(0)).unwrap_err(),
            StateError::NotSetUp.into()
        );
        assert_eq!(
            service.play_one_round(&mut state).unwrap_err(),
            StateError::NotSetUp.into()
        );
        assert_eq!(service.current_player(&state), None);
    }

    #[test]
    fn test_setup_rejects_cyclic_board() {
        let mut state = state(Board::circuit(10), &[1], 2);
        let mut service = SnakesLaddersService::new();
        assert_eq!(
            service.setup(&mut state).unwrap_err(),
            ValidationError::CyclicRaceBoard.into()
        );
    }

    #[test]
    fn test_strict_turn_order() {
        let mut state = state(Board::linear(10), &[2], 2);
        let mut service = SnakesLaddersService::new();
        service.setup(&mut state).unwrap();

        assert_eq!(service.current_player(&state), Some(p(0)));
        assert!(matches!(
            service.play_turn(&mut state, p(1)),
            Err(GameError::InvalidState(StateError::OutOfTurn { .. }))
        ));
        assert_eq!(
            service.play_turn(&mut state, p(7)).unwrap_err(),
            StateError::NotInGame(p(7)).into()
        );

        service.play_turn(&mut state, p(0)).unwrap();
        assert_eq!(service.current_player(&state), Some(p(1)));
        service.play_turn(&mut state, p(1)).unwrap();
        assert_eq!(service.current_player(&state), Some(p(0)));
        assert_eq!(state.rounds_played, 1);
    }

    #[test]
    fn test_round_returns_rolls_in_order() {
        let mut state = state(Board::linear(30), &[3, 1, 6], 3);
        let mut service = SnakesLaddersService::new();
        service.setup(&mut state).unwrap();

        let rolls = service.play_one_round(&mut state).unwrap();
        assert_eq!(rolls, vec![3, 1, 6]);
        let tiles: Vec<_> = state.players().iter().map(|pl| pl.tile()).collect();
        assert_eq!(tiles, vec![TileId(3), TileId(1), TileId(6)]);
        assert_eq!(service.current_player(&state), Some(p(0)));
    }

    #[test]
    fn test_round_after_finish_moves_nobody() {
        let mut state = state(Board::linear(4), &[6], 2);
        let mut service = SnakesLaddersService::new();
        service.setup(&mut state).unwrap();

        service.play_one_round(&mut state).unwrap();
        assert!(service.is_finished(&state));

        let before = state.snapshots();
        assert!(service.play_one_round(&mut state).unwrap().is_empty());
        assert_eq!(state.snapshots(), before);
        assert_eq!(
            service.play_turn(&mut state, p(0)).unwrap_err(),
            StateError::Finished.into()
        );
    }

    #[test]
    fn test_tie_goes_to_lower_index() {
        // Every player lands on the terminal tile in the same round.
        let mut state = state(Board::linear(6), &[6], 3);
        let mut service = SnakesLaddersService::new();
        service.setup(&mut state).unwrap();

        service.play_one_round(&mut state).unwrap();
        assert!(state.players().iter().all(|pl| pl.tile() == TileId(5)));
        assert_eq!(service.winner(&state), Some(p(0)));
    }

    #[test]
    fn test_winner_is_lowest_index_on_terminal() {
        let mut state = state(Board::linear(6), &[1, 6], 2);
        let mut service = SnakesLaddersService::new();
        service.setup(&mut state).unwrap();

        assert_eq!(service.winner(&state), None);
        service.play_one_round(&mut state).unwrap();
        assert!(service.is_finished(&state));
        assert_eq!(service.winner(&state), Some(p(1)));
        assert_eq!(service.current_player(&state), None);
    }

    #[test]
    fn test_box_records_pending_choice() {
        let board = Board::linear(10)
            .with_action(TileId(3), TileAction::schrodinger_box("Open it?").unwrap())
            .unwrap();
        let mut state = state(board, &[3], 1);
        let mut service = SnakesLaddersService::new();
        service.setup(&mut state).unwrap();

        service.play_turn(&mut state, p(0)).unwrap();
        assert_eq!(state.player(p(0)).unwrap().tile(), TileId(3));
        assert_eq!(state.pending_choice(p(0)), Some("Open it?"));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ChoiceRequired {
            player: p(0),
            description: "Open it?".into(),
        }));
    }

    #[test]
    fn test_setup_restarts_session() {
        let mut state = state(Board::linear(4), &[6], 1);
        let mut service = SnakesLaddersService::new();
        service.setup(&mut state).unwrap();
        service.play_turn(&mut state, p(0)).unwrap();
        assert!(service.is_finished(&state));

        service.setup(&mut state).unwrap();
        assert!(!service.is_finished(&state));
        assert_eq!(state.player(p(0)).unwrap().tile(), TileId::START);
        assert_eq!(service.current_player(&state), Some(p(0)));
    }
}

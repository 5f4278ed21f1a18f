//! `BoardGame`: one session of one rule variant.
//!
//! The aggregate owns the [`GameState`] and the chosen [`GameService`] and is
//! the only surface a controller needs:
//!
//! ```
//! use tileboard::{BoardGame, GameConfig, GameState, PlayerSetup, SnakesLaddersService};
//! use tileboard::board::Board;
//! use tileboard::cards::DeckConfig;
//!
//! let players = vec![PlayerSetup::new("Ada", "hat"), PlayerSetup::new("Bo", "boot")];
//! let state = GameState::from_config(
//!     GameConfig::new().with_seed(7),
//!     Board::linear(20),
//!     players,
//!     DeckConfig::default(),
//! )
//! .unwrap();
//!
//! let mut game = BoardGame::new(state, SnakesLaddersService::new());
//! game.setup().unwrap();
//! let winner = game.play_until_finished(1_000).unwrap();
//! assert!(winner.is_some());
//! ```
//!
//! Events raised while a variant runs are delivered to subscribers after the
//! call returns, in the order they happened. Card draws are announced by the
//! card service itself, as they happen (see [`BoardGame::subscribe_cards`]).

use crate::board::{BoxChoice, TileId};
use crate::core::{GameResult, GameState, PlayerId, StateError};
use crate::events::{EventBus, GameEvent};
use crate::rules::{GameService, Variant};

/// A running game session.
#[derive(Debug)]
pub struct BoardGame<S: GameService> {
    state: GameState,
    service: S,
    events: EventBus,
    game_over_announced: bool,
}

impl<S: GameService> BoardGame<S> {
    /// Wrap a prepared state and variant. Call [`Self::setup`] before playing.
    pub fn new(state: GameState, service: S) -> Self {
        Self {
            state,
            service,
            events: EventBus::new(),
            game_over_announced: false,
        }
    }

    /// Listen to every game event except card draws.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.events.subscribe(listener);
    }

    /// Listen to card draws.
    pub fn subscribe_cards(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.state.cards_mut().subscribe(listener);
    }

    // === Orchestration ===

    /// Start (or restart) the session.
    pub fn setup(&mut self) -> GameResult<()> {
        let result = self.service.setup(&mut self.state);
        self.flush();
        result?;

        self.game_over_announced = false;
        let players = self.state.snapshots();
        self.events.emit(&GameEvent::GameStarted { players });
        Ok(())
    }

    /// Give every player one turn. Returns the rolls in turn order.
    pub fn play_one_round(&mut self) -> GameResult<Vec<u32>> {
        let result = self.service.play_one_round(&mut self.state);
        self.flush();
        let rolls = result?;

        if !rolls.is_empty() {
            let players = self.state.snapshots();
            self.events.emit(&GameEvent::RoundPlayed {
                rolls: rolls.clone(),
                players,
            });
        }
        self.announce_game_over();
        Ok(rolls)
    }

    /// Play the current player's turn. Anyone else is rejected.
    pub fn play_turn(&mut self, player: PlayerId) -> GameResult<u32> {
        let result = self.service.play_turn(&mut self.state, player);
        self.flush();
        let roll = result?;

        self.announce_game_over();
        Ok(roll)
    }

    /// Apply the controller's answer to a pending box choice.
    ///
    /// The player moves once; the destination's action does not run.
    pub fn resolve_choice(&mut self, player: PlayerId, choice: BoxChoice) -> GameResult<TileId> {
        self.state.player(player)?;
        let delta = choice.delta()?;
        let description = self
            .state
            .take_pending_choice(player)
            .ok_or(StateError::NoPendingChoice(player))?;

        let from = self.state.player(player)?.tile();
        let to = self.state.board().step(from, delta)?.to;
        self.state.player_mut(player)?.set_tile(to);
        tracing::debug!(%player, ?choice, %description, from = %from, to = %to, "choice resolved");

        self.announce_game_over();
        Ok(to)
    }

    /// Play rounds until the game ends or `max_rounds` rounds have run.
    ///
    /// Returns the winner, if the game finished.
    pub fn play_until_finished(&mut self, max_rounds: u32) -> GameResult<Option<PlayerId>> {
        for _ in 0..max_rounds {
            if self.is_finished() {
                break;
            }
            self.play_one_round()?;
        }
        Ok(self.winner())
    }

    // === Queries ===

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.service.variant()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.service.is_finished(&self.state)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.service.winner(&self.state)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.service.current_player(&self.state)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    // === Events ===

    fn flush(&mut self) {
        for event in self.state.drain_events() {
            self.events.emit(&event);
        }
    }

    fn announce_game_over(&mut self) {
        if self.game_over_announced || !self.is_finished() {
            return;
        }
        self.game_over_announced = true;
        let winner = self.winner();
        tracing::info!(?winner, rounds = self.state.rounds_played, "game over");
        self.events.emit(&GameEvent::GameOver { winner });
    }
}

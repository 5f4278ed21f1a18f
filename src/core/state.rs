//! Session state shared by every rule variant.
//!
//! `GameState` composes the board, dice, players and card decks of one
//! session. Rule variants (`GameService` implementations) operate on it but
//! keep their own bookkeeping (turn cursor, ledgers) to themselves.
//!
//! Events produced while a variant runs are queued here and delivered by
//! the owning `BoardGame` once the operation completes.

use super::config::{GameConfig, PlayerSetup};
use super::dice::Dice;
use super::error::{GameResult, LookupError, ValidationError};
use super::player::{Landing, Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::Board;
use crate::cards::{CardService, DeckConfig};
use crate::events::{GameEvent, PlayerSnapshot};

/// Most players a session supports.
pub const MAX_PLAYERS: usize = 255;

/// Complete mutable state of one game session.
#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    dice: Dice,
    players: Vec<Player>,
    cards: CardService,

    /// Full rounds completed since setup.
    pub rounds_played: u32,

    /// Box descriptions awaiting the player's choice.
    pending_choices: PlayerMap<Option<String>>,

    /// Events waiting to be delivered.
    outbox: Vec<GameEvent>,
}

impl GameState {
    /// Assemble a session from already-built parts.
    pub fn new(
        config: GameConfig,
        board: Board,
        dice: Dice,
        players: Vec<PlayerSetup>,
        cards: CardService,
    ) -> GameResult<Self> {
        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(ValidationError::PlayerCount {
                count: players.len(),
                max: MAX_PLAYERS,
            }
            .into());
        }

        let players: Vec<Player> = players
            .into_iter()
            .enumerate()
            .map(|(i, setup)| Player::new(PlayerId::new(i as u8), setup.name, setup.piece))
            .collect();
        let pending_choices = PlayerMap::with_default(players.len());

        Ok(Self {
            config,
            board,
            dice,
            players,
            cards,
            rounds_played: 0,
            pending_choices,
            outbox: Vec::new(),
        })
    }

    /// Build dice and shuffled decks from the configured seed.
    ///
    /// Dice and each deck draw from independent streams of the same seed.
    pub fn from_config(
        config: GameConfig,
        board: Board,
        players: Vec<PlayerSetup>,
        decks: DeckConfig,
    ) -> GameResult<Self> {
        let rng = GameRng::new(config.seed);
        let dice = Dice::new(config.number_of_dice, rng.for_context("dice"))?;
        let cards = decks.build(&rng);
        Self::new(config, board, dice, players, cards)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    pub fn player(&self, id: PlayerId) -> GameResult<&Player> {
        self.players
            .get(id.index())
            .ok_or_else(|| LookupError::Player(id).into())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> GameResult<&mut Player> {
        self.players
            .get_mut(id.index())
            .ok_or_else(|| LookupError::Player(id).into())
    }

    #[must_use]
    pub fn cards(&self) -> &CardService {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut CardService {
        &mut self.cards
    }

    pub fn roll_dice(&mut self) -> u32 {
        self.dice.roll()
    }

    /// Move a player and run the landing tile's action.
    pub fn move_player(&mut self, id: PlayerId, delta: i32) -> GameResult<Landing> {
        let board = &self.board;
        let player = self
            .players
            .get_mut(id.index())
            .ok_or(LookupError::Player(id))?;
        player.move_by(delta, board)
    }

    /// True when the player stands on a tile with no successor.
    #[must_use]
    pub fn is_on_terminal(&self, id: PlayerId) -> bool {
        self.players
            .get(id.index())
            .and_then(|player| self.board.tile(player.tile()).ok())
            .is_some_and(|tile| tile.is_terminal())
    }

    /// Put every player back on the start tile with `money`, clear pending
    /// choices and rewind the decks.
    pub fn reset(&mut self, money: i64) {
        for player in &mut self.players {
            player.reset(money);
        }
        self.pending_choices = PlayerMap::with_default(self.players.len());
        self.cards.rewind();
        self.rounds_played = 0;
        self.outbox.clear();
    }

    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.players.iter().map(PlayerSnapshot::from).collect()
    }

    // === Choices ===

    /// Record that `player` must choose, and announce it.
    pub fn require_choice(&mut self, player: PlayerId, description: String) {
        if let Some(slot) = self.pending_choices.get_mut(player) {
            *slot = Some(description.clone());
            self.outbox.push(GameEvent::ChoiceRequired {
                player,
                description,
            });
        }
    }

    #[must_use]
    pub fn pending_choice(&self, player: PlayerId) -> Option<&str> {
        self.pending_choices.get(player)?.as_deref()
    }

    pub fn take_pending_choice(&mut self, player: PlayerId) -> Option<String> {
        self.pending_choices.get_mut(player)?.take()
    }

    // === Events ===

    pub fn push_event(&mut self, event: GameEvent) {
        self.outbox.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileAction, TileId, TileOutcome};
    use crate::core::dice::LoadedFaces;

    fn state_with(board: Board, faces: &[u8]) -> GameState {
        let dice = Dice::with_source(1, LoadedFaces::new(faces.iter().copied())).unwrap();
        GameState::new(
            GameConfig::default(),
            board,
            dice,
            vec![PlayerSetup::new("Ada", "hat"), PlayerSetup::new("Bo", "boot")],
            CardService::empty(),
        )
        .unwrap()
    }

    #[test]
    fn test_player_count_validated() {
        let dice = Dice::with_source(1, LoadedFaces::new([1])).unwrap();
        let err = GameState::new(
            GameConfig::default(),
            Board::linear(4),
            dice,
            Vec::new(),
            CardService::empty(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::PlayerCount { count: 0, max: 255 }.into()
        );
    }

    #[test]
    fn test_players_get_sequential_ids() {
        let state = state_with(Board::linear(4), &[1]);
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.players()[1].id(), PlayerId::new(1));
        assert_eq!(state.player(PlayerId::new(1)).unwrap().name(), "Bo");
        assert!(state.player(PlayerId::new(2)).is_err());
    }

    #[test]
    fn test_move_player_and_terminal() {
        let mut state = state_with(Board::linear(4), &[1]);
        let landing = state.move_player(PlayerId::new(0), 3).unwrap();
        assert_eq!(landing.landed, TileId(3));
        assert!(state.is_on_terminal(PlayerId::new(0)));
        assert!(!state.is_on_terminal(PlayerId::new(1)));
    }

    #[test]
    fn test_choice_round_trip() {
        let board = Board::linear(6)
            .with_action(TileId(2), TileAction::schrodinger_box("Open?").unwrap())
            .unwrap();
        let mut state = state_with(board, &[2]);

        let landing = state.move_player(PlayerId::new(0), 2).unwrap();
        let TileOutcome::ChoiceRequired { description } = landing.outcome else {
            panic!("expected a choice");
        };
        state.require_choice(PlayerId::new(0), description);

        assert_eq!(state.pending_choice(PlayerId::new(0)), Some("Open?"));
        assert_eq!(state.drain_events().len(), 1);
        assert_eq!(state.take_pending_choice(PlayerId::new(0)).as_deref(), Some("Open?"));
        assert_eq!(state.pending_choice(PlayerId::new(0)), None);
    }

    #[test]
    fn test_reset() {
        let mut state = state_with(Board::linear(6), &[1]);
        state.move_player(PlayerId::new(1), 4).unwrap();
        state.rounds_played = 3;
        state.require_choice(PlayerId::new(1), "Open?".into());

        state.reset(100);
        assert!(state.players().iter().all(|p| p.tile() == TileId::START && p.money() == 100));
        assert_eq!(state.rounds_played, 0);
        assert_eq!(state.pending_choice(PlayerId::new(1)), None);
        assert!(state.drain_events().is_empty());
    }
}

//! Strict turn order over the player list.
//!
//! The cursor walks player indices in list order and skips eliminated
//! players. Players are never removed, so indices stay stable.

use crate::core::{GameResult, Player, PlayerId, StateError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOrder {
    cursor: usize,
}

impl TurnOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first player.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// The first active player at or after the cursor.
    #[must_use]
    pub fn current(&self, players: &[Player]) -> Option<PlayerId> {
        let n = players.len();
        (0..n)
            .map(|offset| (self.cursor + offset) % n)
            .find(|&i| !players[i].is_eliminated())
            .map(|i| PlayerId::new(i as u8))
    }

    /// Reject anyone but the current player.
    pub fn expect(&self, players: &[Player], player: PlayerId) -> GameResult<()> {
        let candidate = players
            .get(player.index())
            .ok_or(StateError::NotInGame(player))?;
        if candidate.is_eliminated() {
            return Err(StateError::Eliminated(player).into());
        }
        let expected = self.current(players).ok_or(StateError::Finished)?;
        if expected != player {
            return Err(StateError::OutOfTurn {
                expected,
                actual: player,
            }
            .into());
        }
        Ok(())
    }

    /// Pass the turn on from `acted`. Returns true when the order wrapped
    /// back to the front of the list, i.e. a round was completed.
    ///
    /// `acted` may have been eliminated during its own turn.
    pub fn advance(&mut self, players: &[Player], acted: PlayerId) -> bool {
        let from = acted.index();
        let n = players.len();
        for offset in 1..=n {
            let idx = (from + offset) % n;
            if !players[idx].is_eliminated() {
                self.cursor = idx;
                tracing::trace!(cursor = idx, "turn passed");
                return idx <= from;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameError, PlayerId};

    fn players(n: u8) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), "piece"))
            .collect()
    }

    #[test]
    fn test_cycles_in_list_order() {
        let players = players(3);
        let mut order = TurnOrder::new();

        assert_eq!(order.current(&players), Some(PlayerId::new(0)));
        assert!(!order.advance(&players, PlayerId::new(0)));
        assert_eq!(order.current(&players), Some(PlayerId::new(1)));
        assert!(!order.advance(&players, PlayerId::new(1)));
        assert!(order.advance(&players, PlayerId::new(2)));
        assert_eq!(order.current(&players), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_skips_eliminated() {
        let mut players = players(3);
        players[1].eliminate();
        let mut order = TurnOrder::new();

        order.advance(&players, PlayerId::new(0));
        assert_eq!(order.current(&players), Some(PlayerId::new(2)));

        players[0].eliminate();
        assert!(order.advance(&players, PlayerId::new(2)));
        assert_eq!(order.current(&players), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_advance_past_player_eliminated_on_own_turn() {
        let mut players = players(3);
        let mut order = TurnOrder::new();
        order.advance(&players, PlayerId::new(0));

        players[1].eliminate();
        assert!(!order.advance(&players, PlayerId::new(1)));
        assert_eq!(order.current(&players), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_expect_rejects_wrong_player() {
        let players = players(2);
        let order = TurnOrder::new();

        assert!(order.expect(&players, PlayerId::new(0)).is_ok());
        assert_eq!(
            order.expect(&players, PlayerId::new(1)).unwrap_err(),
            GameError::InvalidState(StateError::OutOfTurn {
                expected: PlayerId::new(0),
                actual: PlayerId::new(1),
            })
        );
        assert_eq!(
            order.expect(&players, PlayerId::new(5)).unwrap_err(),
            StateError::NotInGame(PlayerId::new(5)).into()
        );
    }

    #[test]
    fn test_expect_rejects_eliminated() {
        let mut players = players(2);
        players[0].eliminate();
        let order = TurnOrder::new();

        assert_eq!(
            order.expect(&players, PlayerId::new(0)).unwrap_err(),
            StateError::Eliminated(PlayerId::new(0)).into()
        );
        assert!(order.expect(&players, PlayerId::new(1)).is_ok());
    }
}

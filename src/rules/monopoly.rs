//! Property variant: buy tiles, collect rent, outlast everyone.
//!
//! The service owns the ownership ledger and the jail countdowns; tiles only
//! describe what can be owned. Landing effects:
//! - unowned property: bought automatically when affordable (`auto_buy`)
//! - someone else's property: rent is paid to the owner
//! - go-to-jail tile or card: the player sits out `jail_turns` turns
//! - card tile: the card's effect is applied (movement is single-level)
//! - wrapping past the start tile pays `go_salary`
//!
//! A player whose balance drops below zero is eliminated: flagged, never
//! removed, and their holdings return to the bank.
//!
//! The game ends when at most one solvent player remains, or when
//! `round_limit` rounds have been played. The winner is the sole solvent
//! player, otherwise the richest solvent player (ties go to the lower index).

use rustc_hash::FxHashMap;

use crate::board::{Board, PropertyKind, TileAction, TileId, TileOutcome};
use crate::cards::CardEffect;
use crate::core::{
    GameResult, GameState, LookupError, MonopolyRules, Player, PlayerId, PlayerMap, StateError,
};
use crate::events::GameEvent;

use super::service::{GameService, Variant};
use super::turn_order::TurnOrder;

/// Rent for one railroad; doubles per additional railroad owned.
pub const RAILROAD_BASE_RENT: i64 = 25;

/// An entry in a player's ownership ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Holding {
    pub tile: TileId,
    pub kind: PropertyKind,
}

#[derive(Clone, Debug, Default)]
pub struct MonopolyService {
    rules: MonopolyRules,
    order: TurnOrder,
    ready: bool,
    /// Turns left in jail, per player.
    jail: PlayerMap<u8>,
    holdings: PlayerMap<Vec<Holding>>,
    owners: FxHashMap<TileId, PlayerId>,
}

impl MonopolyService {
    /// Rules are read from the session's `GameConfig` at setup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rules(&self) -> &MonopolyRules {
        &self.rules
    }

    // === Ledger ===

    /// Record `tile` as owned by `player`.
    ///
    /// A tile has at most one owner; recording it again for the same owner
    /// is a no-op.
    pub fn add_property(
        &mut self,
        player: PlayerId,
        tile: TileId,
        kind: PropertyKind,
    ) -> GameResult<()> {
        let ledger = self
            .holdings
            .get_mut(player)
            .ok_or(LookupError::Player(player))?;
        match self.owners.get(&tile).copied() {
            Some(owner) if owner == player => Ok(()),
            Some(owner) => Err(StateError::AlreadyOwned {
                tile: tile.index(),
                owner,
            }
            .into()),
            None => {
                ledger.push(Holding { tile, kind });
                self.owners.insert(tile, player);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn holdings(&self, player: PlayerId) -> &[Holding] {
        self.holdings.get(player).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn owner_of(&self, tile: TileId) -> Option<PlayerId> {
        self.owners.get(&tile).copied()
    }

    fn owned_count(&self, player: PlayerId, kind: PropertyKind) -> usize {
        self.holdings(player)
            .iter()
            .filter(|holding| holding.kind == kind)
            .count()
    }

    #[must_use]
    pub fn railroads_owned_count(&self, player: PlayerId) -> usize {
        self.owned_count(player, PropertyKind::Railroad)
    }

    #[must_use]
    pub fn utilities_owned_count(&self, player: PlayerId) -> usize {
        self.owned_count(player, PropertyKind::Utility)
    }

    fn owns_group(&self, board: &Board, player: PlayerId, group: u8) -> bool {
        board
            .tiles()
            .filter(|tile| {
                matches!(tile.action(), Some(TileAction::Property(deed)) if deed.group == Some(group))
            })
            .all(|tile| self.owner_of(tile.id()) == Some(player))
    }

    /// Rent due for landing on `tile`, or `None` if nobody owns it.
    ///
    /// `roll` only matters for utilities.
    pub fn rent_for(&self, board: &Board, tile: TileId, roll: u32) -> GameResult<Option<i64>> {
        let Some(owner) = self.owner_of(tile) else {
            return Ok(None);
        };

        let rent = match board.tile(tile)?.action() {
            Some(TileAction::Property(deed)) => {
                let base = deed.rents.first().copied().unwrap_or(0);
                match deed.group {
                    Some(group) if self.owns_group(board, owner, group) => base * 2,
                    _ => base,
                }
            }
            Some(TileAction::Railroad { .. }) => {
                let owned = self.railroads_owned_count(owner).clamp(1, 32);
                RAILROAD_BASE_RENT << (owned - 1)
            }
            Some(TileAction::Utility { .. }) => {
                let multiplier = if self.utilities_owned_count(owner) >= 2 { 10 } else { 4 };
                i64::from(roll) * multiplier
            }
            _ => return Ok(None),
        };
        Ok(Some(rent))
    }

    // === Jail ===

    /// Start the jail countdown and move the player to the jail tile, if any.
    pub fn send_to_jail(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<()> {
        let turns = self.rules.jail_turns;
        let jail_tile = self.rules.jail_tile;

        let jailed = state.player_mut(player)?;
        jailed.set_turns_in_jail(turns);
        if let Some(tile) = jail_tile {
            jailed.set_tile(tile);
        }
        if let Some(countdown) = self.jail.get_mut(player) {
            *countdown = turns;
        }
        tracing::debug!(%player, turns, "sent to jail");
        Ok(())
    }

    /// Count down one jailed turn. Returns true when the player is released.
    pub fn handle_jail_turn(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<bool> {
        let remaining = match self.jail.get_mut(player) {
            Some(countdown) if *countdown > 0 => {
                *countdown -= 1;
                *countdown
            }
            _ => return Ok(true),
        };
        state.player_mut(player)?.set_turns_in_jail(remaining);

        let released = remaining == 0;
        if released {
            tracing::debug!(%player, "released from jail");
        }
        Ok(released)
    }

    #[must_use]
    pub fn turns_in_jail(&self, player: PlayerId) -> u8 {
        self.jail.get(player).copied().unwrap_or(0)
    }

    // === Turn ===

    fn take_turn(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<u32> {
        let roll = state.roll_dice();
        let from = state.player(player)?.tile();

        if self.turns_in_jail(player) > 0 {
            self.handle_jail_turn(state, player)?;
        } else {
            let landing = state.move_player(player, roll as i32)?;
            if landing.passed_start {
                state.player_mut(player)?.adjust_money(self.rules.go_salary);
            }
            self.resolve(state, player, landing.outcome, roll)?;
        }

        let to = state.player(player)?.tile();
        tracing::debug!(%player, roll, from = %from, to = %to, "property turn");
        state.push_event(GameEvent::TurnPlayed {
            player,
            roll,
            from,
            to,
        });

        self.settle(state, player)?;
        Ok(roll)
    }

    fn resolve(
        &mut self,
        state: &mut GameState,
        player: PlayerId,
        outcome: TileOutcome,
        roll: u32,
    ) -> GameResult<()> {
        match outcome {
            TileOutcome::Property { tile, kind } => {
                self.land_on_property(state, player, tile, kind, roll)
            }
            TileOutcome::GoToJail => self.send_to_jail(state, player),
            TileOutcome::DrawCard { deck } => {
                let card = state.cards_mut().draw_card(&deck)?;
                self.apply_card(state, player, &card.effect)
            }
            TileOutcome::ChoiceRequired { description } => {
                state.require_choice(player, description);
                Ok(())
            }
            TileOutcome::Nothing | TileOutcome::Moved { .. } | TileOutcome::Paid { .. } => Ok(()),
        }
    }

    fn land_on_property(
        &mut self,
        state: &mut GameState,
        player: PlayerId,
        tile: TileId,
        kind: PropertyKind,
        roll: u32,
    ) -> GameResult<()> {
        match self.owner_of(tile) {
            None => {
                if !self.rules.auto_buy {
                    return Ok(());
                }
                let Some(price) = state.board().tile(tile)?.action().and_then(TileAction::price)
                else {
                    return Ok(());
                };
                let buyer = state.player_mut(player)?;
                if buyer.money() >= price {
                    self.add_property(player, tile, kind)?;
                    buyer.adjust_money(-price);
                    tracing::debug!(%player, %tile, price, "bought property");
                }
            }
            Some(owner) if owner == player => {}
            Some(owner) => {
                let rent = self.rent_for(state.board(), tile, roll)?.unwrap_or(0);
                state.player_mut(player)?.adjust_money(-rent);
                state.player_mut(owner)?.adjust_money(rent);
                tracing::debug!(%player, %owner, %tile, rent, "paid rent");
            }
        }
        Ok(())
    }

    fn apply_card(
        &mut self,
        state: &mut GameState,
        player: PlayerId,
        effect: &CardEffect,
    ) -> GameResult<()> {
        match effect {
            CardEffect::Nothing => {}
            CardEffect::Collect { amount } => state.player_mut(player)?.adjust_money(*amount),
            CardEffect::Pay { amount } => state.player_mut(player)?.adjust_money(-amount),
            CardEffect::MoveBy { delta } => {
                let here = state.player(player)?.tile();
                let to = state.board().step(here, *delta)?.to;
                state.player_mut(player)?.set_tile(to);
            }
            CardEffect::GoToJail => self.send_to_jail(state, player)?,
        }
        Ok(())
    }

    /// Eliminate the player if their balance went negative.
    fn settle(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<()> {
        let debtor = state.player_mut(player)?;
        if debtor.money() >= 0 || debtor.is_eliminated() {
            return Ok(());
        }
        debtor.eliminate();
        debtor.set_turns_in_jail(0);
        tracing::warn!(%player, balance = debtor.money(), "bankrupt");

        if let Some(ledger) = self.holdings.get_mut(player) {
            for holding in ledger.drain(..) {
                self.owners.remove(&holding.tile);
            }
        }
        if let Some(countdown) = self.jail.get_mut(player) {
            *countdown = 0;
        }
        Ok(())
    }

    fn solvent(state: &GameState) -> impl Iterator<Item = &Player> {
        state.players().iter().filter(|player| !player.is_eliminated())
    }
}

impl GameService for MonopolyService {
    fn variant(&self) -> Variant {
        Variant::Monopoly
    }

    fn setup(&mut self, state: &mut GameState) -> GameResult<()> {
        self.rules = state.config().monopoly.clone();
        if let Some(tile) = self.rules.jail_tile {
            state.board().tile(tile)?;
        }

        let n = state.player_count();
        state.reset(self.rules.starting_balance);
        self.jail = PlayerMap::with_value(n, 0);
        self.holdings = PlayerMap::with_default(n);
        self.owners.clear();
        self.order.reset();
        self.ready = true;
        tracing::info!(players = n, balance = self.rules.starting_balance, "property game set up");
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
            if self.is_finished(state) {
                break;
            }
            if state.player(player)?.is_eliminated() {
                continue;
            }
            rolls.push(self.take_turn(state, player)?);
        }

        state.rounds_played += 1;
        self.order.reset();
        Ok(rolls)
    }

    fn play_turn(&mut self, state: &mut GameState, player: PlayerId) -> GameResult<u32> {
        if !self.ready {
            return Err(StateError::NotSetUp.into());
        }
        if self.is_finished(state) {
            return Err(StateError::Finished.into());
        }
        self.order.expect(state.players(), player)?;

        let roll = self.take_turn(state, player)?;
        if self.order.advance(state.players(), player) {
            state.rounds_played += 1;
        }
        Ok(roll)
    }

    fn is_finished(&self, state: &GameState) -> bool {
        if !self.ready {
            return false;
        }
        if self
            .rules
            .round_limit
            .is_some_and(|limit| state.rounds_played >= limit)
        {
            return true;
        }
        let solvent = Self::solvent(state).count();
        solvent == 0 || (state.player_count() > 1 && solvent == 1)
    }

    fn winner(&self, state: &GameState) -> Option<PlayerId> {
        if !self.is_finished(state) {
            return None;
        }
        Self::solvent(state)
            .fold(None, |best: Option<&Player>, player| match best {
                Some(richest) if richest.money() >= player.money() => Some(richest),
                _ => Some(player),
            })
            .map(Player::id)
    }

    fn current_player(&self, state: &GameState) -> Option<PlayerId> {
        if !self.ready || self.is_finished(state) {
            return None;
        }
        self.order.current(state.players())
    }
}

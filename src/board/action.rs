//! Tile actions: strategies run when a player lands on a tile.
//!
//! Actions are immutable values built once at load time. Constructors
//! validate their parameters and fail fast; `perform` never re-checks.
//!
//! `perform` touches only the landing player. Effects that need state owned
//! by a rule variant (ownership ledger, jail countdown, card decks) are
//! reported back as a [`TileOutcome`] for the variant to apply.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::Board;
use super::tile::TileId;
use crate::core::error::{GameResult, ValidationError};
use crate::core::player::Player;

/// Rent schedule; index 0 is the base rent.
pub type RentSchedule = SmallVec<[i64; 6]>;

/// Which ledger bucket an ownable tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Street,
    Railroad,
    Utility,
}

/// A purchasable street.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeed {
    pub name: String,
    pub price: i64,
    pub rents: RentSchedule,
    /// Colour group. Owning a whole group doubles the base rent.
    #[serde(default)]
    pub group: Option<u8>,
}

/// What a tile does to the player that lands on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TileAction {
    /// Climb forward.
    Ladder { steps: u32 },
    /// Slide back, never past the start tile.
    Snake { steps: u32 },
    /// Defers to the controller: the player picks an outcome.
    SchrodingerBox { description: String },
    Property(PropertyDeed),
    Railroad { name: String, price: i64 },
    Utility { name: String, price: i64 },
    /// Pay the bank.
    Tax { amount: i64 },
    GoToJail,
    /// Draw from the named deck.
    DrawCard { deck: String },
}

/// The result of running a tile action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileOutcome {
    /// Plain tile or no visible effect.
    Nothing,
    /// The action repositioned the player.
    Moved { to: TileId },
    /// The controller must present a choice; nothing was mutated.
    ChoiceRequired { description: String },
    /// An ownable tile; buying or rent is up to the variant.
    Property { tile: TileId, kind: PropertyKind },
    /// The player paid the bank.
    Paid { amount: i64 },
    GoToJail,
    DrawCard { deck: String },
}

/// The controller's answer to a [`TileOutcome::ChoiceRequired`].
///
/// Applied like a ladder or snake: the destination's action does not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "steps", rename_all = "snake_case")]
pub enum BoxChoice {
    Advance(u32),
    Retreat(u32),
    Stay,
}

impl BoxChoice {
    /// Signed movement in tiles.
    ///
    /// Fails when the step count does not fit a board move.
    pub fn delta(self) -> GameResult<i32> {
        match self {
            Self::Advance(steps) => signed_steps(steps),
            Self::Retreat(steps) => signed_steps(steps).map(|steps| -steps),
            Self::Stay => Ok(0),
        }
    }
}

fn signed_steps(steps: u32) -> GameResult<i32> {
    i32::try_from(steps).map_err(|_| ValidationError::TooManySteps { steps }.into())
}

fn positive(field: &'static str, value: i64) -> GameResult<()> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveAmount { field, value }.into());
    }
    Ok(())
}

fn not_blank(text: &str) -> GameResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::BlankDescription.into());
    }
    Ok(())
}

impl TileAction {
    pub fn ladder(steps: u32) -> GameResult<Self> {
        let action = Self::Ladder { steps };
        action.validate()?;
        Ok(action)
    }

    pub fn snake(steps: u32) -> GameResult<Self> {
        let action = Self::Snake { steps };
        action.validate()?;
        Ok(action)
    }

    pub fn schrodinger_box(description: impl Into<String>) -> GameResult<Self> {
        let action = Self::SchrodingerBox {
            description: description.into(),
        };
        action.validate()?;
        Ok(action)
    }

    pub fn property(
        name: impl Into<String>,
        price: i64,
        rents: impl IntoIterator<Item = i64>,
        group: Option<u8>,
    ) -> GameResult<Self> {
        let action = Self::Property(PropertyDeed {
            name: name.into(),
            price,
            rents: rents.into_iter().collect(),
            group,
        });
        action.validate()?;
        Ok(action)
    }

    pub fn railroad(name: impl Into<String>, price: i64) -> GameResult<Self> {
        let action = Self::Railroad {
            name: name.into(),
            price,
        };
        action.validate()?;
        Ok(action)
    }

    pub fn utility(name: impl Into<String>, price: i64) -> GameResult<Self> {
        let action = Self::Utility {
            name: name.into(),
            price,
        };
        action.validate()?;
        Ok(action)
    }

    pub fn tax(amount: i64) -> GameResult<Self> {
        let action = Self::Tax { amount };
        action.validate()?;
        Ok(action)
    }

    pub fn draw_card(deck: impl Into<String>) -> GameResult<Self> {
        let action = Self::DrawCard { deck: deck.into() };
        action.validate()?;
        Ok(action)
    }

    /// Check construction parameters.
    ///
    /// Deserialized actions skip the constructors, so loaders call this.
    pub fn validate(&self) -> GameResult<()> {
        match self {
            Self::Ladder { steps } | Self::Snake { steps } => {
                if *steps == 0 {
                    return Err(ValidationError::NonPositiveSteps.into());
                }
                signed_steps(*steps).map(|_| ())
            }
            Self::SchrodingerBox { description } => not_blank(description),
            Self::Property(deed) => {
                not_blank(&deed.name)?;
                positive("price", deed.price)?;
                if deed.rents.is_empty() {
                    return Err(ValidationError::EmptyRentSchedule.into());
                }
                deed.rents.iter().try_for_each(|&rent| positive("rent", rent))
            }
            Self::Railroad { name, price } | Self::Utility { name, price } => {
                not_blank(name)?;
                positive("price", *price)
            }
            Self::Tax { amount } => positive("amount", *amount),
            Self::GoToJail => Ok(()),
            Self::DrawCard { deck } => not_blank(deck),
        }
    }

    /// Ledger bucket for ownable tiles.
    #[must_use]
    pub fn property_kind(&self) -> Option<PropertyKind> {
        match self {
            Self::Property(_) => Some(PropertyKind::Street),
            Self::Railroad { .. } => Some(PropertyKind::Railroad),
            Self::Utility { .. } => Some(PropertyKind::Utility),
            _ => None,
        }
    }

    /// Purchase price for ownable tiles.
    #[must_use]
    pub fn price(&self) -> Option<i64> {
        match self {
            Self::Property(deed) => Some(deed.price),
            Self::Railroad { price, .. } | Self::Utility { price, .. } => Some(*price),
            _ => None,
        }
    }

    /// Run the action on the player standing on this tile.
    ///
    /// Movement here goes straight to the destination; the destination's own
    /// action is never triggered.
    pub fn perform(&self, player: &mut Player, board: &Board) -> GameResult<TileOutcome> {
        let here = player.tile();
        let outcome = match self {
            Self::Ladder { steps } => {
                let to = board.step(here, signed_steps(*steps)?)?.to;
                player.set_tile(to);
                TileOutcome::Moved { to }
            }
            Self::Snake { steps } => {
                let to = board.step(here, -signed_steps(*steps)?)?.to;
                player.set_tile(to);
                TileOutcome::Moved { to }
            }
            Self::SchrodingerBox { description } => TileOutcome::ChoiceRequired {
                description: description.clone(),
            },
            Self::Property(_) => TileOutcome::Property {
                tile: here,
                kind: PropertyKind::Street,
            },
            Self::Railroad { .. } => TileOutcome::Property {
                tile: here,
                kind: PropertyKind::Railroad,
            },
            Self::Utility { .. } => TileOutcome::Property {
                tile: here,
                kind: PropertyKind::Utility,
            },
            Self::Tax { amount } => {
                player.adjust_money(-amount);
                TileOutcome::Paid { amount: *amount }
            }
            Self::GoToJail => TileOutcome::GoToJail,
            Self::DrawCard { deck } => TileOutcome::DrawCard { deck: deck.clone() },
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_steps_must_be_positive() {
        assert_eq!(
            TileAction::ladder(0).unwrap_err(),
            ValidationError::NonPositiveSteps.into()
        );
        assert_eq!(
            TileAction::snake(0).unwrap_err(),
            ValidationError::NonPositiveSteps.into()
        );
        assert!(TileAction::ladder(1).is_ok());
    }

    #[test]
    fn test_steps_must_fit_a_move() {
        let too_far = i32::MAX as u32 + 1;
        assert_eq!(
            TileAction::ladder(too_far).unwrap_err(),
            ValidationError::TooManySteps { steps: too_far }.into()
        );
        assert_eq!(
            TileAction::snake(u32::MAX).unwrap_err(),
            ValidationError::TooManySteps { steps: u32::MAX }.into()
        );
        assert!(TileAction::ladder(i32::MAX as u32).is_ok());
    }

    #[test]
    fn test_oversized_ladder_never_moves_backward() {
        let board = Board::linear(20);
        let mut player = Player::new(PlayerId::new(0), "Ada", "hat");
        player.set_tile(TileId(5));

        let action = TileAction::Ladder { steps: u32::MAX };
        assert_eq!(
            action.perform(&mut player, &board).unwrap_err(),
            ValidationError::TooManySteps { steps: u32::MAX }.into()
        );
        assert_eq!(player.tile(), TileId(5));

        let action = TileAction::Ladder {
            steps: i32::MAX as u32,
        };
        action.perform(&mut player, &board).unwrap();
        assert_eq!(player.tile(), TileId(19));
    }

    #[test]
    fn test_blank_description_rejected() {
        assert_eq!(
            TileAction::schrodinger_box("   ").unwrap_err(),
            ValidationError::BlankDescription.into()
        );
    }

    #[test]
    fn test_property_validation() {
        assert!(TileAction::property("Park Lane", 350, [35, 175], Some(7)).is_ok());
        assert_eq!(
            TileAction::property("Park Lane", 0, [35], None).unwrap_err(),
            ValidationError::NonPositiveAmount {
                field: "price",
                value: 0
            }
            .into()
        );
        assert_eq!(
            TileAction::property("Park Lane", 350, [], None).unwrap_err(),
            ValidationError::EmptyRentSchedule.into()
        );
        assert!(TileAction::railroad("", 200).is_err());
        assert!(TileAction::tax(-5).is_err());
    }

    #[test]
    fn test_schrodinger_box_is_inert() {
        let board = Board::linear(6);
        let mut player = Player::new(PlayerId::new(0), "Ada", "hat");
        player.set_tile(TileId(3));
        player.set_money(10);
        let before = player.clone();

        let action = TileAction::schrodinger_box("Open the box?").unwrap();
        let outcome = action.perform(&mut player, &board).unwrap();

        assert_eq!(
            outcome,
            TileOutcome::ChoiceRequired {
                description: "Open the box?".into()
            }
        );
        assert_eq!(player, before);
    }

    #[test]
    fn test_snake_clamps_at_start() {
        let board = Board::linear(6);
        let mut player = Player::new(PlayerId::new(0), "Ada", "hat");
        player.set_tile(TileId(2));

        let outcome = TileAction::snake(5).unwrap().perform(&mut player, &board).unwrap();
        assert_eq!(outcome, TileOutcome::Moved { to: TileId::START });
        assert_eq!(player.tile(), TileId::START);
    }

    #[test]
    fn test_tax_charges_player() {
        let board = Board::linear(6);
        let mut player = Player::new(PlayerId::new(0), "Ada", "hat");
        player.set_money(300);

        let outcome = TileAction::tax(200).unwrap().perform(&mut player, &board).unwrap();
        assert_eq!(outcome, TileOutcome::Paid { amount: 200 });
        assert_eq!(player.money(), 100);
    }

    #[test]
    fn test_property_outcome_carries_kind() {
        let board = Board::linear(6);
        let mut player = Player::new(PlayerId::new(0), "Ada", "hat");
        player.set_tile(TileId(4));

        let outcome = TileAction::utility("Water Works", 150)
            .unwrap()
            .perform(&mut player, &board)
            .unwrap();
        assert_eq!(
            outcome,
            TileOutcome::Property {
                tile: TileId(4),
                kind: PropertyKind::Utility
            }
        );
        assert_eq!(player.money(), 0);
    }

    #[test]
    fn test_box_choice_delta() {
        assert_eq!(BoxChoice::Advance(3).delta().unwrap(), 3);
        assert_eq!(BoxChoice::Retreat(2).delta().unwrap(), -2);
        assert_eq!(BoxChoice::Stay.delta().unwrap(), 0);
        assert_eq!(
            BoxChoice::Advance(u32::MAX).delta().unwrap_err(),
            ValidationError::TooManySteps { steps: u32::MAX }.into()
        );

        let choice: BoxChoice = serde_json::from_str(r#"{"kind": "retreat", "steps": 4}"#).unwrap();
        assert_eq!(choice, BoxChoice::Retreat(4));
    }

    #[test]
    fn test_deserialize_tagged() {
        let action: TileAction =
            serde_json::from_str(r#"{"kind": "ladder", "steps": 4}"#).unwrap();
        assert_eq!(action, TileAction::Ladder { steps: 4 });

        let action: TileAction = serde_json::from_str(
            r#"{"kind": "property", "name": "Old Kent Road", "price": 60, "rents": [2, 10]}"#,
        )
        .unwrap();
        assert_eq!(action.price(), Some(60));
        assert_eq!(action.property_kind(), Some(PropertyKind::Street));
    }
}

//! Named card decks with cyclic draw.
//!
//! Each deck is shuffled exactly once, when the service is built. Drawing
//! walks a per-deck cursor that wraps at the end, so after `len` draws the
//! same (shuffled) sequence repeats. Decks are never reshuffled.

use rustc_hash::FxHashMap;

use super::card::Card;
use crate::core::error::{GameResult, LookupError};
use crate::core::rng::GameRng;
use crate::events::{EventBus, GameEvent};

#[derive(Clone, Debug, Default)]
struct Deck {
    cards: Vec<Card>,
    /// Index of the next card. Always `< cards.len()` when non-empty.
    cursor: usize,
}

/// Owns every deck of a session.
///
/// ## Example
///
/// ```
/// use tileboard::cards::{Card, CardService};
///
/// let mut cards = CardService::unshuffled([(
///     "chance".to_string(),
///     vec![Card::new("B"), Card::new("C"), Card::new("A")],
/// )]);
///
/// let drawn: Vec<_> = (0..4)
///     .map(|_| cards.draw_card("chance").unwrap().name)
///     .collect();
/// assert_eq!(drawn, ["B", "C", "A", "B"]);
/// ```
#[derive(Debug, Default)]
pub struct CardService {
    decks: FxHashMap<String, Deck>,
    events: EventBus,
}

impl CardService {
    /// A service with no decks.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build decks and shuffle each one once.
    ///
    /// Every deck gets its own stream derived from `rng`, so a deck's order
    /// depends only on the seed and its name.
    pub fn new(decks: impl IntoIterator<Item = (String, Vec<Card>)>, rng: &GameRng) -> Self {
        let decks = decks
            .into_iter()
            .map(|(name, mut cards)| {
                rng.for_context(&format!("deck:{name}")).shuffle(&mut cards);
                tracing::debug!(deck = %name, size = cards.len(), "shuffled deck");
                (name, Deck { cards, cursor: 0 })
            })
            .collect();

        Self {
            decks,
            events: EventBus::new(),
        }
    }

    /// Build decks in the given order, without shuffling.
    pub fn unshuffled(decks: impl IntoIterator<Item = (String, Vec<Card>)>) -> Self {
        let decks = decks
            .into_iter()
            .map(|(name, cards)| (name, Deck { cards, cursor: 0 }))
            .collect();

        Self {
            decks,
            events: EventBus::new(),
        }
    }

    /// Register a callback for every drawn card.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.events.subscribe(listener);
    }

    /// Draw the card under the deck's cursor and advance the cursor.
    ///
    /// Emits [`GameEvent::CardDrawn`].
    pub fn draw_card(&mut self, deck_name: &str) -> GameResult<Card> {
        let deck = self
            .decks
            .get_mut(deck_name)
            .ok_or_else(|| LookupError::Deck(deck_name.to_string()))?;

        let card = deck
            .cards
            .get(deck.cursor)
            .cloned()
            .ok_or_else(|| LookupError::EmptyDeck(deck_name.to_string()))?;
        deck.cursor = (deck.cursor + 1) % deck.cards.len();

        tracing::trace!(deck = %deck_name, card = %card.name, cursor = deck.cursor, "drew card");

        self.events.emit(&GameEvent::CardDrawn {
            deck: deck_name.to_string(),
            card: card.clone(),
        });
        Ok(card)
    }

    /// The deck's cards in draw order, starting from position 0.
    #[must_use]
    pub fn deck(&self, deck_name: &str) -> Option<&[Card]> {
        self.decks.get(deck_name).map(|deck| deck.cards.as_slice())
    }

    /// Index of the next card to be drawn.
    #[must_use]
    pub fn cursor(&self, deck_name: &str) -> Option<usize> {
        self.decks.get(deck_name).map(|deck| deck.cursor)
    }

    pub fn deck_names(&self) -> impl Iterator<Item = &str> {
        self.decks.keys().map(String::as_str)
    }

    /// Rewind every cursor to the top, keeping the shuffled order.
    pub fn rewind(&mut self) {
        for deck in self.decks.values_mut() {
            deck.cursor = 0;
        }
    }
}

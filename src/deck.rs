use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::card::CardSet;
use crate::error::CoupError;
use crate::Card;

/// The court deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new<R: Rng + ?Sized>(set: CardSet, copies: usize, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = set.cards().iter()
            .flat_map(|&card| std::iter::repeat(card).take(copies))
            .collect();

        cards.shuffle(rng);

        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Removes `n` cards, each from an independently chosen random position.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Card>, CoupError> {
        if n > self.cards.len() {
            return Err(CoupError::InsufficientCards { requested: n, available: self.cards.len() });
        }

        let drawn: Vec<Card> = (0..n)
            .map(|_| {
                let idx = rng.gen_range(0..self.cards.len());
                self.cards.remove(idx)
            })
            .collect();

        debug!(count = n, remaining = self.cards.len(), "drew from deck");
        Ok(drawn)
    }

    pub fn return_and_shuffle<R: Rng + ?Sized>(&mut self, cards: Vec<Card>, rng: &mut R) {
        let returned = cards.len();
        self.cards.extend(cards);
        self.cards.shuffle(rng);
        debug!(returned, size = self.cards.len(), "returned cards to deck");
    }
}

//! Rule constants for a game.
//!
//! Everything here is fixed for the lifetime of a game; nothing is negotiated at runtime.

use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};
use crate::card::{CardSet, Cost};
use crate::error::CoupError;

pub const PLAYER_COUNT: RangeInclusive<usize> = 2..=6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub card_set: CardSet,
    /// concealed cards dealt to each player, which is also their number of lives
    pub hand_size: usize,
    /// copies of each card kind in the court deck
    pub copies_per_card: usize,
    pub starting_coins: u8,
    pub income_amount: u8,
    pub foreign_aid_amount: u8,
    pub tax_amount: u8,
    pub steal_amount: u8,
    pub exchange_draw: usize,
    pub assassinate_cost: u8,
    pub coup_cost: u8,
    /// at or above this many coins a player's turn is a forced coup
    pub must_coup: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            card_set: CardSet::Standard,
            hand_size: 2,
            copies_per_card: 3,
            starting_coins: 2,
            income_amount: 1,
            foreign_aid_amount: 2,
            tax_amount: 3,
            steal_amount: 2,
            exchange_draw: 2,
            assassinate_cost: 3,
            coup_cost: 7,
            must_coup: 10,
        }
    }
}

impl Config {
    pub fn with_card_set(mut self, card_set: CardSet) -> Self {
        self.card_set = card_set;
        self
    }

    pub fn deck_size(&self) -> usize {
        self.copies_per_card * self.card_set.cards().len()
    }

    pub fn cost(&self, cost: Cost) -> u8 {
        match cost {
            Cost::Free => 0,
            Cost::Assassinate => self.assassinate_cost,
            Cost::Coup => self.coup_cost,
        }
    }

    pub fn validate_player_count(&self, num_players: usize) -> Result<(), CoupError> {
        if !PLAYER_COUNT.contains(&num_players) {
            return Err(CoupError::InvalidPlayerCount(num_players));
        }

        // every hand must be dealt and an exchange must still be able to draw
        let needed = num_players * self.hand_size + self.exchange_draw;
        if needed > self.deck_size() {
            return Err(CoupError::InvalidConfig(format!(
                "{num_players} players need {needed} cards but the deck holds {}",
                self.deck_size()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::card::CardSet;
    use crate::config::Config;
    use crate::error::CoupError;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.deck_size(), 15);
        assert_eq!(config.must_coup, 10);
        assert_eq!(config.with_card_set(CardSet::Inquisitor).deck_size(), 15);
    }

    #[test]
    fn player_count_bounds() {
        let config = Config::default();
        assert!(matches!(config.validate_player_count(1), Err(CoupError::InvalidPlayerCount(1))));
        assert!(matches!(config.validate_player_count(7), Err(CoupError::InvalidPlayerCount(7))));
        for n in 2..=6 {
            assert!(config.validate_player_count(n).is_ok());
        }
    }

    #[test]
    fn deck_must_cover_hands() {
        let config = Config { copies_per_card: 2, ..Config::default() };
        assert!(matches!(config.validate_player_count(6), Err(CoupError::InvalidConfig(_))));
    }
}

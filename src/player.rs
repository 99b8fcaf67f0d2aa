use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::error::CoupError;
use crate::Card;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) hand: Vec<Card>,
    // one slot per life, oldest discard on the left
    pub(crate) revealed: Vec<Option<Card>>,
    pub(crate) coins: u8,
}

impl Player {
    pub fn new(name: impl Into<String>, hand: Vec<Card>, coins: u8) -> Self {
        let revealed = vec![None; hand.len()];
        Self {
            name: name.into(),
            hand,
            revealed,
            coins,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn revealed(&self) -> &[Option<Card>] {
        &self.revealed
    }

    pub fn coins(&self) -> u8 {
        self.coins
    }

    pub fn is_alive(&self) -> bool {
        !self.hand.is_empty()
    }

    pub fn has_capability(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Discards the concealed card at `index` face up. Returns the discarded card.
    pub fn lose_life(&mut self, index: usize) -> Result<Card, CoupError> {
        if index >= self.hand.len() {
            return Err(CoupError::InvalidDiscardIndex { index, hand_size: self.hand.len() });
        }

        let card = self.hand.remove(index);
        if !self.revealed.is_empty() {
            self.revealed.remove(0);
        }
        self.revealed.push(Some(card));

        debug!(player = %self.name, %card, lives = self.hand.len(), "lost a life");
        Ok(card)
    }

    pub(crate) fn replace_hand(&mut self, hand: Vec<Card>) {
        self.hand = hand;
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CoupError;
    use crate::player::Player;
    use crate::Card::{Captain, Duke};

    #[test]
    fn lose_life_reveals_card() {
        let mut player = Player::new("p0", vec![Duke, Captain], 2);
        assert!(player.is_alive());
        assert!(player.has_capability(Duke));

        assert_eq!(player.lose_life(0).unwrap(), Duke);
        assert_eq!(player.hand(), &[Captain]);
        assert_eq!(player.revealed(), &[None, Some(Duke)]);
        assert!(!player.has_capability(Duke));
        assert!(player.is_alive());

        assert_eq!(player.lose_life(0).unwrap(), Captain);
        assert_eq!(player.revealed(), &[Some(Duke), Some(Captain)]);
        assert!(!player.is_alive());
    }

    #[test]
    fn lose_life_rejects_bad_index() {
        let mut player = Player::new("p0", vec![Duke, Captain], 2);
        match player.lose_life(2) {
            Err(CoupError::InvalidDiscardIndex { index, hand_size }) => {
                assert_eq!(index, 2);
                assert_eq!(hand_size, 2);
            }
            other => panic!("expected invalid discard index, got {:?}", other),
        }

        // nothing moved
        assert_eq!(player.hand().len(), 2);
        assert_eq!(player.revealed(), &[None, None]);
    }
}

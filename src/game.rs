use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::action::Action;
use crate::config::Config;
use crate::decider::{Decider, Event};
use crate::deck::Deck;
use crate::engine::{Resolution, Resolver};
use crate::error::CoupError;
use crate::player::Player;
use crate::Card;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Winner(usize),
}

/// Public view of one player. `hand` is only filled in for the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub coins: u8,
    pub lives: usize,
    pub revealed: Vec<Option<Card>>,
    pub alive: bool,
    pub hand: Option<Vec<Card>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: usize,
    pub deck_size: usize,
    pub current: Option<usize>,
    pub players: Vec<PlayerView>,
}

pub struct Game {
    config: Config,
    pub(crate) players: Vec<Player>,
    // living players in turn order; the player taking a turn is not in here
    rotation: VecDeque<usize>,
    deck: Deck,
    turn: usize,
    rng: Pcg64Mcg,
}

impl Debug for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("T {} | deck {} | rotation {:?}\n", self.turn, self.deck.len(), self.rotation).as_str())?;
        for (player_idx, player) in self.players.iter().enumerate() {
            f.write_str(format!("\tP {player_idx} {}: ${} | {:?} {:?}\n", player.name, player.coins, player.hand, player.revealed).as_str())?;
        }
        Ok(())
    }
}

impl Game {
    /// Deals a game for `names.len()` players with a deterministic deck.
    pub fn new(config: Config, names: Vec<String>, seed: u64) -> Result<Self, CoupError> {
        Self::with_rng(config, names, Pcg64Mcg::seed_from_u64(seed))
    }

    pub fn from_entropy(config: Config, names: Vec<String>) -> Result<Self, CoupError> {
        Self::with_rng(config, names, Pcg64Mcg::from_entropy())
    }

    fn with_rng(config: Config, names: Vec<String>, mut rng: Pcg64Mcg) -> Result<Self, CoupError> {
        config.validate_player_count(names.len())?;

        let mut deck = Deck::new(config.card_set, config.copies_per_card, &mut rng);

        let players = names
            .into_iter()
            .map(|name| Ok(Player::new(name, deck.draw(config.hand_size, &mut rng)?, config.starting_coins)))
            .collect::<Result<Vec<Player>, CoupError>>()?;

        let rotation = (0..players.len()).collect();

        Ok(Self {
            config,
            players,
            rotation,
            deck,
            turn: 0,
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn rotation(&self) -> impl Iterator<Item=usize> + '_ {
        self.rotation.iter().copied()
    }

    pub fn status(&self) -> GameStatus {
        if self.rotation.len() < 2 {
            if let Some(&winner) = self.rotation.front() {
                return GameStatus::Winner(winner);
            }
        }
        GameStatus::Ongoing
    }

    /// Cards in the deck, in hands, and face up. Constant for the whole game.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.players
                .iter()
                .map(|player| player.hand.len() + player.revealed.iter().flatten().count())
                .sum::<usize>()
    }

    pub fn snapshot(&self, viewer: Option<usize>) -> Snapshot {
        Snapshot {
            turn: self.turn,
            deck_size: self.deck.len(),
            current: viewer,
            players: self.players
                .iter()
                .enumerate()
                .map(|(idx, player)| PlayerView {
                    name: player.name.clone(),
                    coins: player.coins,
                    lives: player.hand.len(),
                    revealed: player.revealed.clone(),
                    alive: player.is_alive(),
                    hand: (viewer == Some(idx)).then(|| player.hand.clone()),
                })
                .collect(),
        }
    }

    /// Plays the turn of whoever is at the front of the rotation.
    pub fn play_turn<D: Decider + ?Sized>(&mut self, decider: &mut D) -> Result<GameStatus, CoupError> {
        if let GameStatus::Winner(winner) = self.status() {
            return Ok(GameStatus::Winner(winner));
        }

        let Some(player_idx) = self.rotation.pop_front() else {
            return Ok(GameStatus::Ongoing);
        };

        if !self.players[player_idx].is_alive() {
            // eliminated players drop out of the rotation for good
            debug!(player = %self.players[player_idx].name, "skipping eliminated player");
            return self.finish_turn(decider);
        }

        self.turn += 1;
        decider.render(&self.snapshot(Some(player_idx)))?;

        let action = if self.players[player_idx].coins >= self.config.must_coup {
            info!(player = %self.players[player_idx].name, coins = self.players[player_idx].coins, "forced to coup");
            Action::Coup
        } else {
            decider.ask_action(&self.players, player_idx, &Action::ALL)?
        };

        let responders: Vec<usize> = self.rotation
            .iter()
            .copied()
            .filter(|&idx| self.players[idx].is_alive())
            .collect();

        let mut resolver = Resolver {
            config: &self.config,
            players: &mut self.players,
            deck: &mut self.deck,
            rng: &mut self.rng,
            decider: &mut *decider,
        };

        match resolver.resolve(player_idx, &responders, action) {
            Ok(resolution) => self.log_resolution(&resolution),
            Err(CoupError::InsufficientFunds { action, required, available }) => {
                // the turn is forfeited, not replayed
                warn!(player = %self.players[player_idx].name, %action, required, available, "not enough coins");
                decider.notify(&self.players, &Event::Rejected { player: player_idx, action, required, available })?;
            }
            Err(err) => return Err(err),
        }

        if self.players[player_idx].is_alive() {
            self.rotation.push_back(player_idx);
        }

        self.finish_turn(decider)
    }

    /// Plays turns until someone wins. Returns the winner's index.
    pub fn run<D: Decider + ?Sized>(&mut self, decider: &mut D) -> Result<usize, CoupError> {
        loop {
            if let GameStatus::Winner(winner) = self.play_turn(decider)? {
                return Ok(winner);
            }
        }
    }

    fn finish_turn<D: Decider + ?Sized>(&mut self, decider: &mut D) -> Result<GameStatus, CoupError> {
        let players = &self.players;
        self.rotation.retain(|&idx| players[idx].is_alive());

        if self.card_count() != self.config.deck_size() {
            panic!("card count {} drifted from deck size {}", self.card_count(), self.config.deck_size());
        }

        let status = self.status();
        if let GameStatus::Winner(winner) = status {
            info!(player = %self.players[winner].name, turns = self.turn, "game over");
            decider.notify(&self.players, &Event::Winner { player: winner })?;
        }

        Ok(status)
    }

    fn log_resolution(&self, resolution: &Resolution) {
        let actor = &self.players[resolution.actor];
        info!(
            player = %actor.name,
            action = %resolution.action,
            blocked = resolution.block.is_some(),
            challenged = resolution.challenge.is_some(),
            applied = resolution.applied,
            coins = actor.coins,
            "turn {} resolved", self.turn
        );
    }
}

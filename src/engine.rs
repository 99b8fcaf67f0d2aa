//! Resolution of a single declared action.
//!
//! Every action goes through the same phases, driven by its row in the action table:
//!
//! - declared: coin threshold checked, target chosen, cost paid
//! - block window: the target (or, for untargeted actions, each other player in rotation
//!   order) may claim a blocking card; the first to accept is the blocker
//! - challenge window: a block may be challenged once by the actor; an unblocked action
//!   that names an enabling card may be challenged once, by the target or by the first
//!   other player in rotation order who accepts
//! - resolved: the effect applies unless a block stood or the actor was caught bluffing
//!
//! A caught bluffer loses a life and keeps nothing; a player proven honest keeps the card.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::action::Action;
use crate::card::{rule, ActionRule};
use crate::config::Config;
use crate::decider::{Decider, Event, Question};
use crate::deck::Deck;
use crate::error::CoupError;
use crate::player::Player;
use crate::Card;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub blocker: usize,
    pub card: Card,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenger: usize,
    pub claimant: usize,
    pub card: Card,
    /// the claimant did not hold the card
    pub succeeded: bool,
}

/// What happened to one declared action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub actor: usize,
    pub action: Action,
    pub target: Option<usize>,
    pub block: Option<Block>,
    pub challenge: Option<Challenge>,
    /// the action's effect took place
    pub applied: bool,
}

/// Mutable view of the table for the duration of one turn.
pub struct Resolver<'a, D: Decider + ?Sized, R: Rng + ?Sized> {
    pub config: &'a Config,
    pub players: &'a mut [Player],
    pub deck: &'a mut Deck,
    pub rng: &'a mut R,
    pub decider: &'a mut D,
}

impl<'a, D: Decider + ?Sized, R: Rng + ?Sized> Resolver<'a, D, R> {
    /// Resolves `action` for `actor`. `responders` are the other living players in
    /// rotation order; they are polled in that order.
    ///
    /// Fails with [`CoupError::InsufficientFunds`] before any state changes when the
    /// actor can't afford the action.
    pub fn resolve(&mut self, actor: usize, responders: &[usize], action: Action) -> Result<Resolution, CoupError> {
        let rule = rule(action, self.config.card_set);

        let cost = self.config.cost(rule.cost);
        // the threshold is strict: exactly `cost` coins is not enough
        if cost > 0 && self.players[actor].coins <= cost {
            return Err(CoupError::InsufficientFunds {
                action,
                required: cost,
                available: self.players[actor].coins,
            });
        }

        let target = if rule.targeted {
            Some(self.choose_target(actor, responders, action)?)
        } else {
            None
        };

        info!(player = %self.players[actor].name, ?target, "{:?}", action);
        self.notify(Event::Declared { actor, action, target })?;

        if cost > 0 {
            self.players[actor].coins -= cost;
            self.notify(Event::Paid { player: actor, amount: cost })?;
        }

        let mut resolution = Resolution {
            actor,
            action,
            target,
            block: None,
            challenge: None,
            applied: false,
        };

        // only the target may respond to a targeted action
        let targeted: Vec<usize>;
        let polled: &[usize] = match target {
            Some(target) => {
                targeted = vec![target];
                &targeted
            }
            None => responders,
        };

        if rule.blockable() {
            if let Some(block) = self.block_window(actor, polled, action, &rule)? {
                resolution.block = Some(block);

                let question = Question::Challenge { claimant: block.blocker, card: block.card, action, blocking: true };
                if self.ask_yes_no(actor, &question)? {
                    let challenge = self.challenge(actor, block.blocker, block.card)?;
                    resolution.challenge = Some(challenge);
                    if !challenge.succeeded {
                        return Ok(resolution);
                    }
                } else {
                    debug!(player = %self.players[actor].name, "relents to the block");
                    return Ok(resolution);
                }
            }
        }

        if resolution.block.is_none() {
            if let Some(card) = rule.enabler {
                let question = Question::Challenge { claimant: actor, card, action, blocking: false };
                if let Some(challenger) = self.poll(polled, &question)? {
                    let challenge = self.challenge(challenger, actor, card)?;
                    resolution.challenge = Some(challenge);
                    if challenge.succeeded {
                        return Ok(resolution);
                    }
                }
            }
        }

        self.apply(actor, target, action)?;
        resolution.applied = true;

        Ok(resolution)
    }

    fn block_window(&mut self, actor: usize, polled: &[usize], action: Action, rule: &ActionRule) -> Result<Option<Block>, CoupError> {
        let Some(blocker) = self.poll(polled, &Question::Block { actor, action })? else {
            return Ok(None);
        };

        let card = if rule.blockers.len() == 1 {
            rule.blockers[0]
        } else {
            let question = Question::BlockCard { actor, action };
            let idx = loop {
                let idx = self.decider.ask_card_choice(self.players, blocker, &question, rule.blockers)?;
                if idx < rule.blockers.len() {
                    break idx;
                }
                warn!(player = %self.players[blocker].name, idx, "block card choice out of range");
            };
            rule.blockers[idx]
        };

        info!(player = %self.players[blocker].name, %card, "blocks {}", action);
        self.notify(Event::Blocked { blocker, card, action })?;

        Ok(Some(Block { blocker, card }))
    }

    /// Offers `question` to each living player in `polled`, in order, until one accepts.
    fn poll(&mut self, polled: &[usize], question: &Question) -> Result<Option<usize>, CoupError> {
        for &player_idx in polled {
            if !self.players[player_idx].is_alive() {
                continue;
            }
            if self.ask_yes_no(player_idx, question)? {
                return Ok(Some(player_idx));
            }
        }
        Ok(None)
    }

    fn ask_yes_no(&mut self, player_idx: usize, question: &Question) -> Result<bool, CoupError> {
        let answer = self.decider.ask_yes_no(self.players, player_idx, question)?;
        debug!(player = %self.players[player_idx].name, answer, ?question, "answered");
        Ok(answer)
    }

    fn choose_target(&mut self, actor: usize, responders: &[usize], action: Action) -> Result<usize, CoupError> {
        let candidates: Vec<usize> = responders
            .iter()
            .copied()
            .filter(|&idx| idx != actor && self.players[idx].is_alive())
            .collect();

        if candidates.is_empty() {
            return Err(CoupError::InvalidTargetIndex { index: 0, candidates: 0 });
        }

        let question = Question::Target { action, candidates: candidates.clone() };
        loop {
            let idx = self.decider.ask_index(self.players, actor, &question, 0..candidates.len())?;
            match candidates.get(idx) {
                Some(&target) => return Ok(target),
                None => {
                    let err = CoupError::InvalidTargetIndex { index: idx, candidates: candidates.len() };
                    warn!(player = %self.players[actor].name, "{err}");
                }
            }
        }
    }

    /// Settles a challenge by looking at the claimant's hand. The loser gives up a life.
    fn challenge(&mut self, challenger: usize, claimant: usize, card: Card) -> Result<Challenge, CoupError> {
        self.notify(Event::Challenged { challenger, claimant, card })?;

        let honest = self.players[claimant].has_capability(card);
        let challenge = Challenge { challenger, claimant, card, succeeded: !honest };

        info!(
            challenger = %self.players[challenger].name,
            claimant = %self.players[claimant].name,
            %card,
            succeeded = challenge.succeeded,
            "challenge settled"
        );
        self.notify(Event::ChallengeResolved { challenger, claimant, card, succeeded: challenge.succeeded })?;

        self.lose_life(if honest { challenger } else { claimant })?;

        Ok(challenge)
    }

    /// Makes `player_idx` discard a concealed card of their choosing. Players with no
    /// cards left are skipped; a last card goes without asking.
    pub fn lose_life(&mut self, player_idx: usize) -> Result<Option<Card>, CoupError> {
        let card = match self.players[player_idx].hand.len() {
            0 => return Ok(None),
            1 => self.players[player_idx].lose_life(0)?,
            _ => loop {
                let hand = self.players[player_idx].hand.clone();
                let idx = self.decider.ask_card_choice(self.players, player_idx, &Question::Discard, &hand)?;
                match self.players[player_idx].lose_life(idx) {
                    Ok(card) => break card,
                    Err(err @ CoupError::InvalidDiscardIndex { .. }) => {
                        warn!(player = %self.players[player_idx].name, "{err}");
                    }
                    Err(err) => return Err(err),
                }
            },
        };

        self.notify(Event::LostLife { player: player_idx, card })?;
        if !self.players[player_idx].is_alive() {
            info!(player = %self.players[player_idx].name, "eliminated");
            self.notify(Event::Eliminated { player: player_idx })?;
        }

        Ok(Some(card))
    }

    fn apply(&mut self, actor: usize, target: Option<usize>, action: Action) -> Result<(), CoupError> {
        match (action, target) {
            (Action::Income, _) => self.gain(actor, self.config.income_amount),
            (Action::ForeignAid, _) => self.gain(actor, self.config.foreign_aid_amount),
            (Action::Tax, _) => self.gain(actor, self.config.tax_amount),
            (Action::Exchange, _) => self.exchange(actor),
            (Action::Steal, Some(target)) => self.steal(actor, target),
            (Action::Assassinate, Some(target)) | (Action::Coup, Some(target)) => {
                // the target may already be out after losing a challenge
                self.lose_life(target).map(|_| ())
            }
            (Action::Steal, None) | (Action::Assassinate, None) | (Action::Coup, None) => {
                unreachable!("targeted actions always have a target")
            }
        }
    }

    fn gain(&mut self, player_idx: usize, amount: u8) -> Result<(), CoupError> {
        let player = &mut self.players[player_idx];
        player.coins = player.coins.saturating_add(amount);
        debug!(player = %player.name, amount, coins = player.coins, "gained coins");
        self.notify(Event::Gained { player: player_idx, amount })
    }

    fn steal(&mut self, thief: usize, victim: usize) -> Result<(), CoupError> {
        let amount = self.config.steal_amount.min(self.players[victim].coins);
        self.players[victim].coins -= amount;
        self.players[thief].coins = self.players[thief].coins.saturating_add(amount);
        debug!(thief = %self.players[thief].name, victim = %self.players[victim].name, amount, "stole coins");
        self.notify(Event::Stole { thief, victim, amount })
    }

    /// Draws from the deck, lets the player keep as many cards as they held from the
    /// combined pool, and shuffles the rest back.
    fn exchange(&mut self, player_idx: usize) -> Result<(), CoupError> {
        let drawn = self.deck.draw(self.config.exchange_draw, self.rng)?;

        let keep = self.players[player_idx].hand.len();
        let mut pool = self.players[player_idx].hand.clone();
        pool.extend(drawn);

        let mut kept = Vec::with_capacity(keep);
        while kept.len() < keep {
            let question = Question::Keep { kept: kept.len(), keep };
            let idx = self.decider.ask_card_choice(self.players, player_idx, &question, &pool)?;
            if idx < pool.len() {
                kept.push(pool.remove(idx));
            } else {
                warn!(player = %self.players[player_idx].name, idx, "exchange choice out of range");
            }
        }

        self.players[player_idx].replace_hand(kept);
        self.deck.return_and_shuffle(pool, self.rng);

        self.notify(Event::Exchanged { player: player_idx })
    }

    fn notify(&mut self, event: Event) -> Result<(), CoupError> {
        self.decider.notify(self.players, &event)
    }
}

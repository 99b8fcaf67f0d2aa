//! The seam between the game and whoever is making decisions for the players.
//!
//! The engine never reads input itself: every block, challenge, target, discard and
//! exchange choice goes through a [`Decider`]. The console host implements it for
//! hotseat play, [`RandomDecider`] implements it for simulations.

use std::ops::Range;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::action::Action;
use crate::error::CoupError;
use crate::game::Snapshot;
use crate::player::Player;
use crate::Card;

/// What a prompt is about. Player indexes refer to the game's player list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Question {
    /// would you block `actor`'s `action`?
    Block { actor: usize, action: Action },
    /// which card do you block `actor`'s `action` with?
    BlockCard { actor: usize, action: Action },
    /// do you challenge `claimant`'s claim to hold `card`? `blocking` is set when the claim is a block
    Challenge { claimant: usize, card: Card, action: Action, blocking: bool },
    /// who is the target of your `action`? answered with an index into `candidates`
    Target { action: Action, candidates: Vec<usize> },
    /// which concealed card do you give up?
    Discard,
    /// exchange: which card do you keep? `kept` cards have been chosen so far out of `keep`
    Keep { kept: usize, keep: usize },
}

/// Things that happened, for display. Nothing reads these back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Declared { actor: usize, action: Action, target: Option<usize> },
    Paid { player: usize, amount: u8 },
    Blocked { blocker: usize, card: Card, action: Action },
    Challenged { challenger: usize, claimant: usize, card: Card },
    ChallengeResolved { challenger: usize, claimant: usize, card: Card, succeeded: bool },
    LostLife { player: usize, card: Card },
    Gained { player: usize, amount: u8 },
    Stole { thief: usize, victim: usize, amount: u8 },
    Exchanged { player: usize },
    Rejected { player: usize, action: Action, required: u8, available: u8 },
    Eliminated { player: usize },
    Winner { player: usize },
}

pub trait Decider {
    fn ask_action(&mut self, players: &[Player], player: usize, options: &[Action]) -> Result<Action, CoupError>;

    fn ask_yes_no(&mut self, players: &[Player], player: usize, question: &Question) -> Result<bool, CoupError>;

    /// Answers must fall in `range`; the engine asks again otherwise.
    fn ask_index(&mut self, players: &[Player], player: usize, question: &Question, range: Range<usize>) -> Result<usize, CoupError>;

    /// Returns an index into `options`.
    fn ask_card_choice(&mut self, players: &[Player], player: usize, question: &Question, options: &[Card]) -> Result<usize, CoupError>;

    fn render(&mut self, _snapshot: &Snapshot) -> Result<(), CoupError> {
        Ok(())
    }

    fn notify(&mut self, _players: &[Player], _event: &Event) -> Result<(), CoupError> {
        Ok(())
    }
}

/// Answers every prompt uniformly at random. Used to drive complete games in
/// benchmarks and property tests.
pub struct RandomDecider<R: Rng> {
    rng: R,
    // chance of answering yes to a block or challenge offer
    aggression: f64,
}

impl<R: Rng> RandomDecider<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, aggression: 0.25 }
    }

    pub fn with_aggression(mut self, aggression: f64) -> Self {
        self.aggression = aggression.clamp(0.0, 1.0);
        self
    }
}

impl<R: Rng> Decider for RandomDecider<R> {
    fn ask_action(&mut self, _players: &[Player], _player: usize, options: &[Action]) -> Result<Action, CoupError> {
        Ok(options[self.rng.gen_range(0..options.len())])
    }

    fn ask_yes_no(&mut self, _players: &[Player], _player: usize, _question: &Question) -> Result<bool, CoupError> {
        Ok(self.rng.gen_bool(self.aggression))
    }

    fn ask_index(&mut self, _players: &[Player], _player: usize, _question: &Question, range: Range<usize>) -> Result<usize, CoupError> {
        Ok(self.rng.gen_range(range))
    }

    fn ask_card_choice(&mut self, _players: &[Player], _player: usize, _question: &Question, options: &[Card]) -> Result<usize, CoupError> {
        Ok(self.rng.gen_range(0..options.len()))
    }
}

#[cfg(test)]
pub(crate) mod script {
    use std::collections::{BTreeMap, VecDeque};
    use std::ops::Range;
    use crate::action::Action;
    use crate::decider::{Decider, Event, Question};
    use crate::error::CoupError;
    use crate::player::Player;
    use crate::Card;

    /// Replays queued answers per player. Unscripted yes/no offers are declined,
    /// unscripted indexes pick the first option.
    #[derive(Default)]
    pub struct Script {
        actions: BTreeMap<usize, VecDeque<Action>>,
        answers: BTreeMap<usize, VecDeque<bool>>,
        indexes: BTreeMap<usize, VecDeque<usize>>,
        pub asked: Vec<(usize, Question)>,
        pub events: Vec<Event>,
    }

    impl Script {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn action(mut self, player: usize, action: Action) -> Self {
            self.actions.entry(player).or_default().push_back(action);
            self
        }

        pub fn answer(mut self, player: usize, yes: bool) -> Self {
            self.answers.entry(player).or_default().push_back(yes);
            self
        }

        /// Queues an answer for either `ask_index` or `ask_card_choice`.
        pub fn index(mut self, player: usize, index: usize) -> Self {
            self.indexes.entry(player).or_default().push_back(index);
            self
        }

        pub fn was_asked(&self, player: usize) -> bool {
            self.asked.iter().any(|(p, _)| *p == player)
        }

        fn next_index(&mut self, player: usize) -> usize {
            self.indexes.get_mut(&player).and_then(|q| q.pop_front()).unwrap_or(0)
        }
    }

    impl Decider for Script {
        fn ask_action(&mut self, _players: &[Player], player: usize, _options: &[Action]) -> Result<Action, CoupError> {
            Ok(self.actions.get_mut(&player).and_then(|q| q.pop_front()).unwrap_or(Action::Income))
        }

        fn ask_yes_no(&mut self, _players: &[Player], player: usize, question: &Question) -> Result<bool, CoupError> {
            self.asked.push((player, question.clone()));
            Ok(self.answers.get_mut(&player).and_then(|q| q.pop_front()).unwrap_or(false))
        }

        fn ask_index(&mut self, _players: &[Player], player: usize, question: &Question, _range: Range<usize>) -> Result<usize, CoupError> {
            self.asked.push((player, question.clone()));
            Ok(self.next_index(player))
        }

        fn ask_card_choice(&mut self, _players: &[Player], player: usize, question: &Question, _options: &[Card]) -> Result<usize, CoupError> {
            self.asked.push((player, question.clone()));
            Ok(self.next_index(player))
        }

        fn notify(&mut self, _players: &[Player], event: &Event) -> Result<(), CoupError> {
            self.events.push(event.clone());
            Ok(())
        }
    }
}

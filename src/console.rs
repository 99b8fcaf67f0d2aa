//! Hotseat play over stdin/stdout.

use std::io::{BufRead, Write};
use std::ops::Range;
use crate::action::Action;
use crate::card::{capability_summaries, CardSet};
use crate::config::PLAYER_COUNT;
use crate::decider::{Decider, Event, Question};
use crate::error::CoupError;
use crate::game::Snapshot;
use crate::player::Player;
use crate::Card;

const CLEAR: &str = "\x1B[2J\x1B[1;1H";

pub struct Console<I: BufRead, O: Write> {
    input: I,
    output: O,
    card_set: CardSet,
    json: bool,
    clear_screen: bool,
    // whoever answered last, so the screen is only cleared when the seat changes
    seated: Option<usize>,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O, card_set: CardSet) -> Self {
        Self {
            input,
            output,
            card_set,
            json: false,
            clear_screen: true,
            seated: None,
        }
    }

    /// Render snapshots as JSON lines instead of the text board.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn into_output(self) -> O {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, CoupError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CoupError::Io(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "input closed")));
        }
        Ok(line.trim().to_string())
    }

    fn read_number(&mut self, prompt: &str, range: Range<usize>) -> Result<usize, CoupError> {
        loop {
            match self.read_line(prompt)?.parse::<usize>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                Ok(_) => writeln!(self.output, "Please enter a valid index.")?,
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    pub fn ask_player_count(&mut self) -> Result<usize, CoupError> {
        loop {
            let line = self.read_line(&format!("Enter a number of players (up to {}): ", PLAYER_COUNT.end()))?;
            match line.parse::<usize>() {
                Ok(n) if PLAYER_COUNT.contains(&n) => return Ok(n),
                Ok(n) => writeln!(self.output, "Error: {}", CoupError::InvalidPlayerCount(n))?,
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    pub fn ask_names(&mut self, count: usize) -> Result<Vec<String>, CoupError> {
        let mut names = Vec::with_capacity(count);
        for idx in 0..count {
            let name = self.read_line("Enter your name: ")?;
            names.push(if name.is_empty() { format!("Player {}", idx + 1) } else { name });
        }
        Ok(names)
    }

    /// Hands the screen to `player`, showing only their own cards.
    fn seat(&mut self, players: &[Player], player: usize) -> Result<(), CoupError> {
        if self.seated != Some(player) {
            if self.clear_screen {
                write!(self.output, "{CLEAR}")?;
            }
            self.seated = Some(player);
        }
        writeln!(self.output, "{}, your hand: {}", players[player].name, format_cards(players[player].hand()))?;
        Ok(())
    }

    fn print_help(&mut self) -> Result<(), CoupError> {
        writeln!(self.output, "Valid moves:\n")?;
        for action in Action::ALL {
            writeln!(self.output, "{action}")?;
        }
        writeln!(self.output, "\nCards:\n")?;
        for line in capability_summaries(self.card_set) {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn describe(&self, players: &[Player], question: &Question) -> String {
        match question {
            Question::Block { actor, action } => {
                format!("{} is attempting to {action}. Would you like to block this action (yes or no)? ", players[*actor].name)
            }
            Question::BlockCard { actor, action } => {
                format!("Which card would you like to block {}'s {action} with? ", players[*actor].name)
            }
            Question::Challenge { claimant, card, action, blocking: true } => {
                format!(
                    "{} is attempting to block your {action} with {}. Would you like to challenge this (yes or no)? ",
                    players[*claimant].name,
                    card.with_article()
                )
            }
            Question::Challenge { claimant, card, action, blocking: false } => {
                format!(
                    "{} is attempting to {action}, claiming {}. Would you like to challenge this (yes or no)? ",
                    players[*claimant].name,
                    card.with_article()
                )
            }
            Question::Target { action, .. } => format!("Who would you like to {action}? (enter an index) "),
            Question::Discard => "Which card would you like to discard (enter an index)? ".to_string(),
            Question::Keep { kept, keep } => {
                format!("Which card do you want to keep? ({} of {keep}, enter an index) ", kept + 1)
            }
        }
    }
}

impl<I: BufRead, O: Write> Decider for Console<I, O> {
    fn ask_action(&mut self, players: &[Player], player: usize, options: &[Action]) -> Result<Action, CoupError> {
        self.seat(players, player)?;
        writeln!(self.output, "{}'s coins = {}", players[player].name, players[player].coins())?;

        loop {
            let line = self.read_line(&format!("What would you like to do, {}? ", players[player].name))?;
            if line.eq_ignore_ascii_case("help") {
                self.print_help()?;
                continue;
            }

            match line.parse::<Action>() {
                Ok(action) if options.contains(&action) => return Ok(action),
                Ok(action) => writeln!(self.output, "You can't {action} right now.")?,
                Err(err) => writeln!(self.output, "{err}! Please select a valid action, or type help.")?,
            }
        }
    }

    fn ask_yes_no(&mut self, players: &[Player], player: usize, question: &Question) -> Result<bool, CoupError> {
        self.seat(players, player)?;
        let prompt = format!("{}: {}", players[player].name, self.describe(players, question));
        let answer = self.read_line(&prompt)?.to_lowercase();
        Ok(answer == "yes" || answer == "y")
    }

    fn ask_index(&mut self, players: &[Player], player: usize, question: &Question, range: Range<usize>) -> Result<usize, CoupError> {
        self.seat(players, player)?;
        if let Question::Target { candidates, .. } = question {
            for (idx, candidate) in candidates.iter().enumerate() {
                writeln!(self.output, "{idx}: {}", players[*candidate].name)?;
            }
        }
        let prompt = self.describe(players, question);
        self.read_number(&prompt, range)
    }

    fn ask_card_choice(&mut self, players: &[Player], player: usize, question: &Question, options: &[Card]) -> Result<usize, CoupError> {
        self.seat(players, player)?;
        for (idx, card) in options.iter().enumerate() {
            writeln!(self.output, "{idx}: {card}")?;
        }
        let prompt = self.describe(players, question);
        self.read_number(&prompt, 0..options.len())
    }

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), CoupError> {
        if self.json {
            let line = serde_json::to_string(snapshot).map_err(std::io::Error::from)?;
            writeln!(self.output, "{line}")?;
            return Ok(());
        }

        writeln!(self.output, "Turn {} | court deck: {} cards", snapshot.turn, snapshot.deck_size)?;
        for player in &snapshot.players {
            let revealed: Vec<String> = player.revealed
                .iter()
                .map(|slot| slot.map_or_else(|| "---".to_string(), |card| card.to_string()))
                .collect();
            writeln!(
                self.output,
                "Player: {}, Revealed: [{}], Coins: {}{}",
                player.name,
                revealed.join(", "),
                player.coins,
                if player.alive { "" } else { " (out)" }
            )?;
        }
        Ok(())
    }

    fn notify(&mut self, players: &[Player], event: &Event) -> Result<(), CoupError> {
        let name = |idx: usize| players[idx].name.as_str();
        let message = match event {
            Event::Declared { actor, action, target: Some(target) } => format!("{} is attempting to {action} {}.", name(*actor), name(*target)),
            Event::Declared { actor, action, target: None } => format!("{} is attempting to {action}.", name(*actor)),
            Event::Paid { .. } | Event::Gained { .. } => return Ok(()),
            Event::Blocked { blocker, card, action } => format!("{} blocks the {action} with {}.", name(*blocker), card.with_article()),
            Event::Challenged { challenger, claimant, .. } => format!("{} challenges {}!", name(*challenger), name(*claimant)),
            Event::ChallengeResolved { claimant, card, succeeded: true, .. } => {
                format!("Nice job! {} doesn't have {}!", name(*claimant), card.with_article())
            }
            Event::ChallengeResolved { claimant, card, succeeded: false, .. } => {
                format!("Bad news!! {} has {}!", name(*claimant), card.with_article())
            }
            Event::LostLife { player, card } => format!("{} discards {}.", name(*player), card.with_article()),
            Event::Stole { thief, victim, amount } => format!("{} steals {amount} coins from {}.", name(*thief), name(*victim)),
            Event::Exchanged { player } => format!("{} exchanged cards with the court deck.", name(*player)),
            Event::Rejected { action, .. } => format!("Sorry, you do not have enough coins to {action} anybody!"),
            Event::Eliminated { player } => format!("{} is out of the game.", name(*player)),
            Event::Winner { player } => format!("Game over!\nThe winner is: {}!", name(*player)),
        };
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

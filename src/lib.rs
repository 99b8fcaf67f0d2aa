pub mod action;
pub mod card;
pub mod config;
pub mod console;
pub mod decider;
pub mod deck;
pub mod engine;
pub mod error;
pub mod game;
pub mod player;

pub use action::Action;
pub use card::{Card, CardSet};
pub use config::Config;
pub use console::Console;
pub use decider::{Decider, Event, Question, RandomDecider};
pub use deck::Deck;
pub use engine::{Resolution, Resolver};
pub use error::CoupError;
pub use game::{Game, GameStatus, Snapshot};
pub use player::Player;

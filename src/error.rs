use thiserror::Error;
use crate::action::Action;

#[derive(Error, Debug)]
pub enum CoupError {
    #[error("invalid player count {0}: must be between 2 and 6")]
    InvalidPlayerCount(usize),

    #[error("invalid action \"{0}\"")]
    InvalidActionName(String),

    #[error("invalid discard index {index}: hand holds {hand_size} cards")]
    InvalidDiscardIndex { index: usize, hand_size: usize },

    #[error("invalid target index {index}: {candidates} candidates")]
    InvalidTargetIndex { index: usize, candidates: usize },

    #[error("not enough coins to {action}: need more than {required}, have {available}")]
    InsufficientFunds { action: Action, required: u8, available: u8 },

    #[error("deck exhausted: requested {requested} cards, {available} available")]
    InsufficientCards { requested: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

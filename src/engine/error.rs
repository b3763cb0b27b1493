use std::path::PathBuf;

use thiserror::Error;

use crate::engine::models::Card;

/// Errors surfaced to callers of the engine.
///
/// Everything here is caused by bad input. Caller bugs (dealing from an
/// exhausted deck, a betting state with no legal actions) panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid card notation: '{0}'")]
    InvalidCard(String),

    #[error("invalid hand notation: '{0}'")]
    InvalidHand(String),

    #[error("invalid range token: '{0}'")]
    InvalidRange(String),

    #[error("range contains no hands")]
    EmptyRange,

    #[error("card {0} appears more than once")]
    DuplicateCard(Card),

    #[error("board has {0} cards, at most 5 allowed")]
    BoardTooLarge(usize),

    #[error("hand evaluation needs 5 to 7 cards, got {0}")]
    CardCount(usize),

    #[error("ranges have no combination that avoids the board and each other")]
    NoValidCombination,

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("invalid blinds: small {small}, big {big}")]
    InvalidBlinds { small: u32, big: u32 },

    #[error("invalid starting stacks: {0}")]
    InvalidStacks(String),

    #[error("illegal action from seat {seat}: {reason}")]
    IllegalAction { seat: usize, reason: String },
}

/// Errors raised while loading an [`EngineConfig`](crate::engine::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//! # holdem_core
//!
//! An offline, deterministic Texas Hold'em computation engine.
//!
//! The crate ranks 5 to 7 card hands, computes win/tie/loss equity between
//! hands or ranges (Monte Carlo or exact enumeration), and plays out complete
//! heads-up hands against a rule-based opponent at three skill levels. It
//! has no I/O of its own beyond optional JSON config loading; every result
//! is a plain serde-serializable value.
//!
//! ## How it works
//!
//! 1. Cards are parsed from two-character notation (`"As"`, `"Td"`) and
//!    ranges from shorthand like `"JJ+, AKs"`.
//! 2. [`evaluate`] returns a [`HandRank`] whose ordering is the poker ordering.
//! 3. [`equity`] samples board runouts (or enumerates them when cheap) and
//!    tallies showdowns.
//! 4. [`simulate_hand`] shuffles, posts blinds, asks a [`Controller`] per seat
//!    for each decision and returns a [`HandRecord`].
//!
//! ## Key features
//!
//! - **Deterministic**: every randomized entry point takes a `u64` seed; the
//!   same inputs and seed give the same output.
//! - **Chip conservation**: stacks plus pot never change during a hand.
//! - **Pluggable seats**: implement [`Controller`] to drive the hero seat.
//!
//! ## Quick start
//!
//! ```rust
//! use holdem_core::{equity, evaluate, parse_cards, simulate_hand, Blinds, Range, SkillLevel};
//!
//! let rank = evaluate(&parse_cards("AsKsQsJsTs").unwrap()).unwrap();
//! assert!(rank.is_royal_flush());
//!
//! let hero = Range::parse("AsKs").unwrap();
//! let villain = Range::parse("7h7d").unwrap();
//! let result = equity(&hero, &villain, &[], 10_000, 42).unwrap();
//! println!("AKs vs 77: {:.1}%", result.equity() * 100.0);
//!
//! let record = simulate_hand(SkillLevel::Hard, &[1000, 1000], Blinds::default(), 7).unwrap();
//! assert_eq!(record.final_stacks.iter().sum::<u32>(), 2000);
//! ```

pub mod engine;

// Convenience re-exports so callers can use `holdem_core::evaluate`
// directly without reaching into `engine::`.
pub use engine::{
    decide, equity, equity_counts, equity_exact, equity_parallel, equity_vs_random,
    evaluate, evaluate_five, parse_cards, simulate_hand, simulate_with, ActionKind, Blinds, Card,
    CardMask, ConfigError, Controller, Deck, EngineConfig, EngineError, EquityCounts,
    EquityResult, HandCategory, HandEvent, HandRank, HandRecord, HoleCards, LegalActions,
    PlayerAction, PolicyController, Range, Rank, SeatView, SessionStats, SimulationConfig,
    SimulationState, Simulator, SkillLevel, SkillProfile, Street, Suit, DEFAULT_ITERATIONS,
};

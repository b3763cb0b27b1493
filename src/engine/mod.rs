//! Core engine: cards, hand ranking, equity and heads-up simulation.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: cards, card masks, hole cards, streets, actions |
//! | `deck`      | 52-card deck with Fisher-Yates shuffle and deterministic dealing |
//! | `evaluator` | 5 to 7 card hand ranking, plus board texture helpers |
//! | `range`     | Range notation (`JJ+`, `AKs`, `A9o+`) expanded to combos |
//! | `equity`    | Monte Carlo and exact equity, parallel batches, equity vs random |
//! | `ai`        | Skill profiles, strength signal and the pure decision policy |
//! | `simulator` | Betting state machine, showdown and hand records |
//! | `stats`     | Session statistics over hand records |
//! | `config`    | JSON-backed engine defaults |
//! | `error`     | `EngineError` and `ConfigError` |
//! | `helpers`   | Formatting, pot-odds math, seeded RNG construction |

pub mod ai;
pub mod config;
pub mod deck;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod helpers;
pub mod models;
pub mod range;
pub mod simulator;
pub mod stats;

pub use ai::{decide, hand_strength, SkillLevel, SkillProfile, Spot};
pub use config::EngineConfig;
pub use deck::Deck;
pub use equity::{
    equity, equity_counts, equity_exact, equity_parallel, equity_vs_random, EquityCounts,
    EquityResult, DEFAULT_ITERATIONS,
};
pub use error::{ConfigError, EngineError};
pub use evaluator::{evaluate, evaluate_five, HandCategory, HandRank};
pub use models::{parse_cards, ActionKind, Card, CardMask, HoleCards, PlayerAction, Rank, Street, Suit};
pub use range::Range;
pub use simulator::{
    simulate_hand, simulate_with, Blinds, Controller, HandEvent, HandRecord, LegalActions,
    PolicyController, SeatView, SimulationConfig, SimulationState, Simulator,
};
pub use stats::SessionStats;

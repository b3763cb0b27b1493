//! Rule-based opponent.
//!
//! The policy is split into a strength signal ([`hand_strength`]) and a pure
//! decision function ([`decide`]). Neither keeps state between calls: every
//! input, including the random source, is passed in.
//!
//! ## Skill curve
//!
//! | Level  | Aggression | Bluff | Fold threshold | Bet sizing | Accuracy | Equity samples |
//! |--------|-----------:|------:|---------------:|-----------:|---------:|---------------:|
//! | Easy   | 0.30 | 0.05 | 0.35 | 0.50 pot | 0.70 | heuristic |
//! | Medium | 0.50 | 0.15 | 0.25 | 0.75 pot | 0.85 | heuristic |
//! | Hard   | 0.70 | 0.25 | 0.15 | 1.00 pot | 0.95 | 400 |

use std::fmt;
use std::str::FromStr;

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::equity::equity_vs_random;
use crate::engine::evaluator::{best_hand, has_flush_draw, has_straight_draw, HandCategory, HandRank};
use crate::engine::helpers::required_equity;
use crate::engine::models::{ActionKind, Card, HoleCards, Street};
use crate::engine::simulator::LegalActions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Easy,
    Medium,
    Hard,
}

impl SkillLevel {
    pub fn profile(self) -> SkillProfile {
        match self {
            SkillLevel::Easy => SkillProfile {
                aggression: 0.3,
                bluff_frequency: 0.05,
                fold_threshold: 0.35,
                bet_sizing: 0.5,
                accuracy: 0.7,
                equity_samples: 0,
            },
            SkillLevel::Medium => SkillProfile {
                aggression: 0.5,
                bluff_frequency: 0.15,
                fold_threshold: 0.25,
                bet_sizing: 0.75,
                accuracy: 0.85,
                equity_samples: 0,
            },
            SkillLevel::Hard => SkillProfile {
                aggression: 0.7,
                bluff_frequency: 0.25,
                fold_threshold: 0.15,
                bet_sizing: 1.0,
                accuracy: 0.95,
                equity_samples: 400,
            },
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Easy   => write!(f, "easy"),
            SkillLevel::Medium => write!(f, "medium"),
            SkillLevel::Hard   => write!(f, "hard"),
        }
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy"   => Ok(SkillLevel::Easy),
            "medium" => Ok(SkillLevel::Medium),
            "hard"   => Ok(SkillLevel::Hard),
            other    => Err(format!("unknown skill level '{other}'")),
        }
    }
}

/// Behavioural parameters behind a [`SkillLevel`]. All fractions are in `[0, 1]`
/// except `bet_sizing`, which is a multiple of the pot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub aggression: f64,
    pub bluff_frequency: f64,
    pub fold_threshold: f64,
    pub bet_sizing: f64,
    /// Probability of reading the strength signal without noise.
    pub accuracy: f64,
    /// Monte Carlo samples against a random hand; 0 uses the heuristic tables.
    pub equity_samples: u32,
}

// ---------------------------------------------------------------------------
// Strength signal
// ---------------------------------------------------------------------------

/// Heuristic preflop strength in `[0, 1]`.
pub fn preflop_strength(hole: HoleCards) -> f64 {
    let [hi, lo] = hole.cards();
    let (high, low) = (hi.rank.0.max(lo.rank.0), hi.rank.0.min(lo.rank.0));

    if high == low {
        return match high {
            14 => 1.0,
            13 => 0.95,
            12 => 0.9,
            11 => 0.85,
            10 => 0.8,
            9  => 0.7,
            8  => 0.6,
            7  => 0.5,
            6  => 0.4,
            5  => 0.3,
            4  => 0.25,
            3  => 0.2,
            _  => 0.15,
        };
    }

    let mut strength = (high + low) as f64 / 28.0;
    if hole.is_suited() {
        strength += 0.1;
    }
    if high - low <= 1 {
        strength += 0.05;
    }
    if high >= 12 {
        strength += 0.1;
    }
    // unpaired hands never reach premium-pair territory
    strength.min(0.85)
}

/// Coarse strength of a made hand, by category.
pub fn made_hand_strength(rank: &HandRank) -> f64 {
    made_hand_strength_of(rank.category())
}

fn made_hand_strength_of(category: HandCategory) -> f64 {
    match category {
        HandCategory::HighCard      => 0.1,
        HandCategory::Pair          => 0.2,
        HandCategory::TwoPair       => 0.35,
        HandCategory::ThreeOfAKind  => 0.5,
        HandCategory::Straight      => 0.65,
        HandCategory::Flush         => 0.75,
        HandCategory::FullHouse     => 0.85,
        HandCategory::FourOfAKind   => 0.95,
        HandCategory::StraightFlush => 1.0,
    }
}

fn heuristic_strength(hole: HoleCards, board: &[Card]) -> f64 {
    if board.len() < 3 {
        return preflop_strength(hole);
    }
    let mut cards = board.to_vec();
    cards.extend_from_slice(&hole.0);
    let made = made_hand_strength(&best_hand(&cards));
    if board.len() == 5 || made >= made_hand_strength_of(HandCategory::Straight) {
        return made;
    }
    // live draws on the flop and turn
    if has_flush_draw(&cards) {
        made + 0.15
    } else if has_straight_draw(&cards) {
        made + 0.08
    } else {
        made
    }
}

/// Strength signal for `hole` on `board`, in `[0, 1]`.
///
/// Profiles with `equity_samples > 0` estimate equity against a random hand,
/// seeding the estimate from `rng`; the rest use the heuristic tables.
pub fn hand_strength<R: Rng>(hole: HoleCards, board: &[Card], profile: &SkillProfile, rng: &mut R) -> f64 {
    if profile.equity_samples == 0 {
        return heuristic_strength(hole, board);
    }
    let seed: u64 = rng.gen();
    match equity_vs_random(hole, board, profile.equity_samples, seed) {
        Ok(result) => result.equity(),
        Err(e) => {
            warn!("equity estimate for {hole} failed ({e}), using heuristic");
            heuristic_strength(hole, board)
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Everything the policy looks at for one decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    pub strength: f64,
    pub pot: u32,
    pub street: Street,
    pub in_position: bool,
    /// Opponents still holding cards.
    pub opponents: usize,
    pub legal: LegalActions,
}

fn bluff_chance(spot: &Spot, profile: &SkillProfile) -> f64 {
    let mut chance = profile.bluff_frequency;
    if matches!(spot.street, Street::Turn | Street::River) {
        chance *= 1.5;
    }
    if spot.in_position {
        chance *= 1.3;
    }
    if spot.opponents <= 1 {
        chance *= 1.2;
    }
    chance
}

/// Street total to bet or raise to, clamped into the legal window.
fn sizing(spot: &Spot, profile: &SkillProfile, strength: f64, (min_to, max_to): (u32, u32)) -> u32 {
    let base = spot.pot as f64 * profile.bet_sizing;
    let scaled = if strength > 0.8 {
        base * 1.5
    } else if strength > 0.6 {
        base
    } else {
        base * 0.7
    };
    let target = spot.legal.facing as f64 + scaled.round();
    (target.min(u32::MAX as f64) as u32).clamp(min_to, max_to)
}

/// Pick an action for `spot`. Always returns a member of `spot.legal`.
pub fn decide<R: Rng>(spot: &Spot, profile: &SkillProfile, rng: &mut R) -> ActionKind {
    let legal = &spot.legal;
    let mut strength = spot.strength;
    if rng.gen::<f64>() > profile.accuracy {
        strength = (strength + rng.gen_range(-0.2..=0.2)).clamp(0.0, 1.0);
    }

    if legal.can_check {
        if let Some(window) = legal.raise {
            if strength > 0.6 - profile.aggression * 0.3 {
                return legal.aggressive(sizing(spot, profile, strength, window));
            }
            if rng.gen::<f64>() < bluff_chance(spot, profile) {
                return legal.aggressive(sizing(spot, profile, 0.3, window));
            }
        }
        return ActionKind::Check;
    }

    let pot_odds = required_equity(legal.to_call, spot.pot);
    let call_threshold = profile.fold_threshold + profile.aggression * 0.2;
    if strength < call_threshold && pot_odds > 0.3 {
        return ActionKind::Fold;
    }
    // priced out: disciplined players notice more often
    if strength < pot_odds && rng.gen::<f64>() < profile.accuracy {
        return ActionKind::Fold;
    }

    if strength > 0.7 + profile.aggression * 0.1 {
        if let Some(window) = legal.raise {
            if rng.gen::<f64>() < profile.aggression {
                return legal.aggressive(sizing(spot, profile, strength, window));
            }
        }
        return ActionKind::Call(legal.to_call);
    }

    if spot.opponents <= 1 && rng.gen::<f64>() < bluff_chance(spot, profile) {
        if let Some(window) = legal.raise {
            return legal.aggressive(sizing(spot, profile, 0.4, window));
        }
    }
    ActionKind::Call(legal.to_call)
}

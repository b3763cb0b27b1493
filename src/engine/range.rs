//! Starting-hand ranges.
//!
//! A range is a comma-separated list of tokens:
//!
//! | Token   | Expands to |
//! |---------|------------|
//! | `AsKs`  | that exact hand |
//! | `QQ`    | the 6 combos of the pair |
//! | `JJ+`   | JJ, QQ, KK, AA |
//! | `AKs`   | 4 suited combos |
//! | `AKo`   | 12 offsuit combos |
//! | `AK`    | all 16 combos |
//! | `A9s+`  | A9s, ATs, ... AKs (likewise `o` and bare) |

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;
use crate::engine::models::{Card, CardMask, HoleCards, Rank, Suit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    combos: Vec<HoleCards>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suitedness {
    Suited,
    Offsuit,
    Any,
}

impl Range {
    /// Parse range notation. Duplicate combos are dropped, first occurrence wins.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        let mut combos = Vec::new();
        let mut seen = HashSet::new();
        for token in s.split(',').map(str::trim) {
            for combo in expand_token(token)? {
                if seen.insert(combo) {
                    combos.push(combo);
                }
            }
        }
        if combos.is_empty() {
            return Err(EngineError::EmptyRange);
        }
        Ok(Range { combos })
    }

    pub fn single(hand: HoleCards) -> Self {
        Range { combos: vec![hand] }
    }

    /// Every one of the 1,326 starting hands.
    pub fn random() -> Self {
        let mut combos = Vec::with_capacity(1326);
        for a in 0u8..52 {
            for b in (a + 1)..52 {
                combos.push(HoleCards::ordered(Card::from_index(a), Card::from_index(b)));
            }
        }
        Range { combos }
    }

    pub fn combos(&self) -> &[HoleCards] {
        &self.combos
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// The hand itself when the range holds exactly one combo.
    pub fn as_single(&self) -> Option<HoleCards> {
        match self.combos.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Cards present in every combo of the range.
    pub fn fixed_cards(&self) -> CardMask {
        self.combos
            .iter()
            .fold(CardMask::FULL, |acc, h| CardMask(acc.0 & h.mask().0))
    }

    /// Combos that share no card with `dead`.
    pub fn live_combos(&self, dead: CardMask) -> Vec<HoleCards> {
        self.combos.iter().copied().filter(|h| !h.mask().overlaps(dead)).collect()
    }
}

impl FromStr for Range {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl From<HoleCards> for Range {
    fn from(hand: HoleCards) -> Self {
        Range::single(hand)
    }
}

fn expand_token(token: &str) -> Result<Vec<HoleCards>, EngineError> {
    let bad = || EngineError::InvalidRange(token.to_string());
    if token.is_empty() {
        return Err(bad());
    }
    if token.len() == 4 {
        if let Ok(hand) = token.parse::<HoleCards>() {
            return Ok(vec![hand]);
        }
    }

    let (body, plus) = match token.strip_suffix('+') {
        Some(body) => (body, true),
        None => (token, false),
    };
    let chars: Vec<char> = body.chars().collect();
    let (r1, r2, suitedness) = match chars.as_slice() {
        [a, b] => (Rank::from_char(*a), Rank::from_char(*b), Suitedness::Any),
        [a, b, 's' | 'S'] => (Rank::from_char(*a), Rank::from_char(*b), Suitedness::Suited),
        [a, b, 'o' | 'O'] => (Rank::from_char(*a), Rank::from_char(*b), Suitedness::Offsuit),
        _ => return Err(bad()),
    };
    let (r1, r2) = match (r1, r2) {
        (Some(a), Some(b)) => (a.max(b), a.min(b)),
        _ => return Err(bad()),
    };

    if r1 == r2 {
        if suitedness != Suitedness::Any {
            return Err(bad());
        }
        let top = if plus { Rank::ACE.0 } else { r1.0 };
        return Ok((r1.0..=top).flat_map(|r| pair_combos(Rank(r))).collect());
    }

    let top_kicker = if plus { r1.0 - 1 } else { r2.0 };
    Ok((r2.0..=top_kicker)
        .flat_map(|k| unpaired_combos(r1, Rank(k), suitedness))
        .collect())
}

fn pair_combos(rank: Rank) -> Vec<HoleCards> {
    let mut out = Vec::with_capacity(6);
    for (i, &s1) in Suit::ALL.iter().enumerate() {
        for &s2 in &Suit::ALL[i + 1..] {
            out.push(HoleCards::ordered(Card::new(rank, s1), Card::new(rank, s2)));
        }
    }
    out
}

fn unpaired_combos(high: Rank, low: Rank, suitedness: Suitedness) -> Vec<HoleCards> {
    let mut out = Vec::with_capacity(16);
    for &s1 in &Suit::ALL {
        for &s2 in &Suit::ALL {
            let keep = match suitedness {
                Suitedness::Suited  => s1 == s2,
                Suitedness::Offsuit => s1 != s2,
                Suitedness::Any     => true,
            };
            if keep {
                out.push(HoleCards::ordered(Card::new(high, s1), Card::new(low, s2)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pocket_pair_expands_to_six_combos() {
        let r = Range::parse("QQ").unwrap();
        assert_eq!(r.len(), 6);
        assert!(r.combos().iter().all(|h| h.is_pair()));
    }

    #[test]
    fn pair_plus_expands_upwards() {
        assert_eq!(Range::parse("JJ+").unwrap().len(), 24);
        assert_eq!(Range::parse("22+").unwrap().len(), 78);
    }

    #[test]
    fn suited_offsuit_and_any() {
        assert_eq!(Range::parse("AKs").unwrap().len(), 4);
        assert_eq!(Range::parse("AKo").unwrap().len(), 12);
        assert_eq!(Range::parse("AK").unwrap().len(), 16);
        assert_eq!(Range::parse("KA").unwrap(), Range::parse("AK").unwrap());
        assert!(Range::parse("AKs").unwrap().combos().iter().all(|h| h.is_suited()));
    }

    #[test]
    fn kicker_plus_climbs_to_one_below_top() {
        // A9s, ATs, AJs, AQs, AKs
        assert_eq!(Range::parse("A9s+").unwrap().len(), 20);
    }

    #[test]
    fn concrete_hands_and_dedup() {
        let r = Range::parse("AsKs, AKs, 7h7d").unwrap();
        assert_eq!(r.len(), 5);
        assert_eq!(r.combos()[0].to_string(), "AsKs");
        assert_eq!(Range::parse("7h7d").unwrap().as_single().unwrap().to_string(), "7h7d");
    }

    #[test]
    fn malformed_tokens_rejected() {
        for bad in ["", "AKx", "AAs", "Z9", "AK,", "AsKsQs", "1010"] {
            assert!(Range::parse(bad).is_err(), "'{bad}' should be rejected");
        }
    }

    #[test]
    fn random_range_has_every_starting_hand() {
        let r = Range::random();
        assert_eq!(r.len(), 1326);
        assert_eq!(r.fixed_cards(), CardMask::empty());
    }

    #[test]
    fn fixed_cards_of_single_hand() {
        let r = Range::parse("AsKs").unwrap();
        assert_eq!(r.fixed_cards().len(), 2);
        let dead = CardMask::from_cards(&["As".parse().unwrap()]);
        assert!(Range::parse("AA").unwrap().live_combos(dead).len() == 3);
    }
}

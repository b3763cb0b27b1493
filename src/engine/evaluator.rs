//! Five-to-seven card hand ranking.
//!
//! A [`HandRank`] is a closed [`HandCategory`] plus a tiebreak tuple. Both
//! fields derive `Ord`, so comparing two ranks is a single lexicographic
//! comparison: category first, then tiebreak values highest first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;
use crate::engine::models::{Card, CardMask, Rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    /// Number of meaningful tiebreak values for this category.
    pub fn tiebreak_len(self) -> usize {
        match self {
            HandCategory::HighCard      => 5,
            HandCategory::Pair          => 4,
            HandCategory::TwoPair       => 3,
            HandCategory::ThreeOfAKind  => 3,
            HandCategory::Straight      => 1,
            HandCategory::Flush         => 5,
            HandCategory::FullHouse     => 2,
            HandCategory::FourOfAKind   => 2,
            HandCategory::StraightFlush => 1,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandCategory::HighCard      => "High Card",
            HandCategory::Pair          => "Pair",
            HandCategory::TwoPair       => "Two Pair",
            HandCategory::ThreeOfAKind  => "Three of a Kind",
            HandCategory::Straight      => "Straight",
            HandCategory::Flush         => "Flush",
            HandCategory::FullHouse     => "Full House",
            HandCategory::FourOfAKind   => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        };
        write!(f, "{}", s)
    }
}

/// Totally ordered strength of a five-card poker hand.
///
/// Unused tiebreak slots are zero, so the fixed-width array orders the same
/// way the variable-length tuple would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank {
    category: HandCategory,
    tiebreak: [u8; 5],
}

impl HandRank {
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// Primary rank(s) then kickers, highest first. A straight reports its
    /// top card; the wheel reports 5.
    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak[..self.category.tiebreak_len()]
    }

    pub fn is_royal_flush(&self) -> bool {
        self.category == HandCategory::StraightFlush && self.tiebreak[0] == Rank::ACE.0
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<&str> = self.tiebreak().iter().map(|&r| Rank(r).symbol()).collect();
        if self.is_royal_flush() {
            write!(f, "Royal Flush")
        } else {
            write!(f, "{} ({})", self.category, ranks.join(" "))
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Best hand achievable from 5, 6 or 7 distinct cards.
pub fn evaluate(cards: &[Card]) -> Result<HandRank, EngineError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EngineError::CardCount(cards.len()));
    }
    if let Some(dup) = CardMask::first_duplicate(cards) {
        return Err(EngineError::DuplicateCard(dup));
    }
    Ok(best_hand(cards))
}

/// Maximum over every 5-card subset. Callers guarantee 5..=7 distinct cards;
/// [`evaluate`] is the checked entry point.
pub(crate) fn best_hand(cards: &[Card]) -> HandRank {
    let n = cards.len();
    assert!((5..=7).contains(&n), "best_hand called with {n} cards");
    let mut best = evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let rank = evaluate_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if rank > best {
                            best = rank;
                        }
                    }
                }
            }
        }
    }
    best
}

/// Rank exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut counts = [0u8; 15];
    let mut rank_bits: u16 = 0;
    for c in cards {
        counts[c.rank.0 as usize] += 1;
        rank_bits |= 1 << c.rank.0;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = straight_high(rank_bits);

    // (count, rank) groups ordered by count then rank, both descending
    let mut groups = [(0u8, 0u8); 5];
    let mut len = 0;
    for r in (2..=14u8).rev() {
        if counts[r as usize] > 0 {
            groups[len] = (counts[r as usize], r);
            len += 1;
        }
    }
    groups[..len].sort_by(|x, y| y.cmp(x));

    let mut tiebreak = [0u8; 5];
    for (slot, &(_, r)) in tiebreak.iter_mut().zip(groups[..len].iter()) {
        *slot = r;
    }

    let category = match (straight, flush, groups[0].0, groups[1].0) {
        (Some(_), true, _, _) => HandCategory::StraightFlush,
        (_, _, 4, _)          => HandCategory::FourOfAKind,
        (_, _, 3, 2)          => HandCategory::FullHouse,
        (_, true, _, _)       => HandCategory::Flush,
        (Some(_), _, _, _)    => HandCategory::Straight,
        (_, _, 3, _)          => HandCategory::ThreeOfAKind,
        (_, _, 2, 2)          => HandCategory::TwoPair,
        (_, _, 2, _)          => HandCategory::Pair,
        _                     => HandCategory::HighCard,
    };

    if let (Some(high), HandCategory::Straight | HandCategory::StraightFlush) = (straight, category) {
        tiebreak = [high, 0, 0, 0, 0];
    }

    HandRank { category, tiebreak }
}

const WHEEL: u16 = (1 << 14) | (1 << 5) | (1 << 4) | (1 << 3) | (1 << 2);

/// Top card of a five-distinct-rank straight, with the wheel topping at 5.
fn straight_high(rank_bits: u16) -> Option<u8> {
    if rank_bits.count_ones() != 5 {
        return None;
    }
    if rank_bits == WHEEL {
        return Some(5);
    }
    let low = rank_bits.trailing_zeros();
    (rank_bits == 0b11111 << low).then(|| (low + 4) as u8)
}

// ---------------------------------------------------------------------------
// Draws
// ---------------------------------------------------------------------------

/// True if four or more of `cards` share a suit.
pub fn has_flush_draw(cards: &[Card]) -> bool {
    let mut counts = [0u8; 4];
    for c in cards {
        counts[c.suit.index()] += 1;
        if counts[c.suit.index()] >= 4 {
            return true;
        }
    }
    false
}

/// True if some five-rank window holds four or more distinct ranks
/// (open-ender or gutshot). The Ace also counts low.
pub fn has_straight_draw(cards: &[Card]) -> bool {
    let mut bits = cards.iter().fold(0u16, |acc, c| acc | 1 << c.rank.0);
    if bits & 1 << Rank::ACE.0 != 0 {
        bits |= 1 << 1;
    }
    (1..=10).any(|low| (bits >> low & 0b11111).count_ones() >= 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::parse_cards;

    fn rank_of(s: &str) -> HandRank {
        evaluate(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn royal_flush_is_top_straight_flush() {
        let r = rank_of("AsKsQsJsTs");
        assert_eq!(r.category(), HandCategory::StraightFlush);
        assert_eq!(r.tiebreak(), &[14]);
        assert!(r.is_royal_flush());
        assert_eq!(r.to_string(), "Royal Flush");
    }

    #[test]
    fn each_category_detected() {
        let cases = [
            ("9s8s7s6s5s", HandCategory::StraightFlush),
            ("9c9d9h9sAc", HandCategory::FourOfAKind),
            ("KcKdKh7s7c", HandCategory::FullHouse),
            ("Ah9h7h4h2h", HandCategory::Flush),
            ("9c8d7h6s5c", HandCategory::Straight),
            ("QcQdQh7s2c", HandCategory::ThreeOfAKind),
            ("JcJd4h4s9c", HandCategory::TwoPair),
            ("TcTd8h4s2c", HandCategory::Pair),
            ("AcJd8h4s2c", HandCategory::HighCard),
        ];
        for (cards, expected) in cases {
            assert_eq!(rank_of(cards).category(), expected, "{cards}");
        }
    }

    #[test]
    fn wheel_is_lowest_straight() {
        let wheel = rank_of("As2d3c4h5s");
        let six_high = rank_of("2d3c4h5s6c");
        let ace_high = rank_of("AsKdQc9h3s");
        assert_eq!(wheel.category(), HandCategory::Straight);
        assert_eq!(wheel.tiebreak(), &[5]);
        assert!(wheel < six_high);
        assert!(wheel > ace_high);
    }

    #[test]
    fn steel_wheel_is_lowest_straight_flush() {
        let steel = rank_of("Ah2h3h4h5h");
        assert_eq!(steel.category(), HandCategory::StraightFlush);
        assert!(steel < rank_of("2h3h4h5h6h"));
        assert!(steel > rank_of("9c9d9h9sAc"));
    }

    #[test]
    fn full_houses_compare_trips_then_pair() {
        assert!(rank_of("KcKdKh2s2c") > rank_of("QcQdQhAsAc"));
        assert!(rank_of("QcQdQhAsAc") > rank_of("QcQdQhKsKc"));
    }

    #[test]
    fn flushes_compare_card_by_card() {
        assert!(rank_of("Ah9h7h4h3h") > rank_of("Ac9c7c4c2c"));
        assert_eq!(rank_of("Ah9h7h4h3h").tiebreak(), &[14, 9, 7, 4, 3]);
    }

    #[test]
    fn kickers_break_ties_and_equal_hands_split() {
        let a = rank_of("AcAdKh7s2c");
        let b = rank_of("AhAsQh7d2d");
        assert!(a > b);
        let c = rank_of("AhAsKd7d2d");
        assert_eq!(a, c);
        assert_eq!(a.cmp(&c), std::cmp::Ordering::Equal);
    }

    #[test]
    fn two_pair_tiebreak_layout() {
        let r = rank_of("JcJd4h4s9c");
        assert_eq!(r.tiebreak(), &[11, 4, 9]);
    }

    #[test]
    fn seven_cards_pick_best_subset() {
        // Board plays a straight, hole cards make a flush
        let r = rank_of("Ah2h 9h8c7d6hTh");
        assert_eq!(r.category(), HandCategory::Flush);
        assert_eq!(r.tiebreak(), &[14, 10, 9, 6, 2]);
    }

    #[test]
    fn six_cards_supported() {
        let r = rank_of("7c7d7h2s2c3d");
        assert_eq!(r.category(), HandCategory::FullHouse);
        assert_eq!(r.tiebreak(), &[7, 2]);
    }

    #[test]
    #[should_panic(expected = "best_hand called with 4 cards")]
    fn subset_search_needs_five_cards() {
        best_hand(&parse_cards("AsKsQsJs").unwrap());
    }

    #[test]
    fn card_count_and_duplicates_rejected() {
        let four = parse_cards("AsKsQsJs").unwrap();
        assert_eq!(evaluate(&four), Err(EngineError::CardCount(4)));
        let mut dup = parse_cards("AsKsQsJsTs").unwrap();
        dup.push(dup[0]);
        assert!(matches!(evaluate(&dup), Err(EngineError::DuplicateCard(_))));
    }

    #[test]
    fn category_order_is_standard() {
        let ordered = [
            "AcJd8h4s2c", "TcTd8h4s2c", "JcJd4h4s9c", "QcQdQh7s2c", "9c8d7h6s5c",
            "Ah9h7h4h2h", "KcKdKh7s7c", "9c9d9h9sAc", "9s8s7s6s5s",
        ];
        for pair in ordered.windows(2) {
            assert!(rank_of(pair[0]) < rank_of(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn draw_detection() {
        let dry = parse_cards("2c7dKhAs9c").unwrap();
        assert!(!has_flush_draw(&dry));
        assert!(!has_straight_draw(&dry));
        let flush = parse_cards("8c9cKc2cAh").unwrap();
        assert!(has_flush_draw(&flush));
        let open_ender = parse_cards("8c9dTh Js 2c").unwrap();
        assert!(has_straight_draw(&open_ender));
        let gutshot = parse_cards("6c7d9hTs Kc").unwrap();
        assert!(has_straight_draw(&gutshot));
        let wheel = parse_cards("As2d3h4c Kd").unwrap();
        assert!(has_straight_draw(&wheel));
    }
}

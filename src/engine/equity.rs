//! Monte Carlo and exact equity between two ranges.
//!
//! Every entry point is a pure function of its inputs: the only randomness
//! is a generator seeded from the caller's seed, so identical inputs give
//! bit-identical results. Partial runs produce [`EquityCounts`], which add
//! together, so an iteration budget can be split across workers and summed.

use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use log::{debug, trace};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::deck::Deck;
use crate::engine::error::EngineError;
use crate::engine::evaluator::best_hand;
use crate::engine::helpers::{derive_seed, seeded_rng};
use crate::engine::models::{Card, CardMask, HoleCards};
use crate::engine::range::Range;

/// Reference iteration count when the caller does not pick one.
pub const DEFAULT_ITERATIONS: u32 = 25_000;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Raw showdown tallies from the first range's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityCounts {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
}

impl EquityCounts {
    pub fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Tally one showdown comparison (`a` against `b`).
    pub fn record(&mut self, outcome: Ordering) {
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal   => self.ties += 1,
            Ordering::Less    => self.losses += 1,
        }
    }

    /// Normalise into fractions. An empty tally yields all zeros.
    pub fn into_result(self) -> EquityResult {
        let total = self.total();
        if total == 0 {
            return EquityResult { win: 0.0, tie: 0.0, loss: 0.0, iterations: 0 };
        }
        let n = total as f64;
        EquityResult {
            win: self.wins as f64 / n,
            tie: self.ties as f64 / n,
            loss: self.losses as f64 / n,
            iterations: total,
        }
    }
}

impl Add for EquityCounts {
    type Output = EquityCounts;

    fn add(self, rhs: Self) -> Self::Output {
        EquityCounts {
            wins: self.wins + rhs.wins,
            ties: self.ties + rhs.ties,
            losses: self.losses + rhs.losses,
        }
    }
}

impl AddAssign for EquityCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for EquityCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(EquityCounts::default(), Add::add)
    }
}

/// Win/tie/loss fractions for the first range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    pub win: f64,
    pub tie: f64,
    pub loss: f64,
    pub iterations: u64,
}

impl EquityResult {
    /// Share of the pot won on average: wins plus half the ties.
    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }

    /// The same result from the second range's point of view.
    pub fn flip(&self) -> EquityResult {
        EquityResult { win: self.loss, tie: self.tie, loss: self.win, iterations: self.iterations }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validated inputs with the board already removed from both ranges.
struct Matchup {
    a: Vec<HoleCards>,
    b: Vec<HoleCards>,
    board: Vec<Card>,
    /// Deck minus every card that is dead in all iterations.
    stub: Vec<Card>,
}

fn first_card(mask: CardMask) -> Option<Card> {
    mask.iter().next()
}

fn prepare(a: &Range, b: &Range, board: &[Card]) -> Result<Matchup, EngineError> {
    if board.len() > 5 {
        return Err(EngineError::BoardTooLarge(board.len()));
    }
    if let Some(dup) = CardMask::first_duplicate(board) {
        return Err(EngineError::DuplicateCard(dup));
    }
    if a.is_empty() || b.is_empty() {
        return Err(EngineError::EmptyRange);
    }

    let board_mask = CardMask::from_cards(board);
    let (fixed_a, fixed_b) = (a.fixed_cards(), b.fixed_cards());
    for clash in [
        CardMask(fixed_a.0 & fixed_b.0),
        CardMask(fixed_a.0 & board_mask.0),
        CardMask(fixed_b.0 & board_mask.0),
    ] {
        if let Some(card) = first_card(clash) {
            return Err(EngineError::DuplicateCard(card));
        }
    }

    let live_a = a.live_combos(board_mask);
    let live_b = b.live_combos(board_mask);
    let compatible = live_a
        .iter()
        .any(|x| live_b.iter().any(|y| !x.mask().overlaps(y.mask())));
    if !compatible {
        return Err(EngineError::NoValidCombination);
    }

    let dead = board_mask.union(fixed_a).union(fixed_b);
    Ok(Matchup {
        a: live_a,
        b: live_b,
        board: board.to_vec(),
        stub: Deck::without(dead).live_cards().to_vec(),
    })
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

fn pick<R: Rng>(combos: &[HoleCards], rng: &mut R) -> HoleCards {
    if combos.len() == 1 {
        combos[0]
    } else {
        combos[rng.gen_range(0..combos.len())]
    }
}

/// Compare two concrete hands on a complete board.
pub fn showdown_outcome(a: HoleCards, b: HoleCards, board: &[Card; 5]) -> Ordering {
    let mut seven_a = [board[0]; 7];
    let mut seven_b = [board[0]; 7];
    seven_a[..5].copy_from_slice(board);
    seven_b[..5].copy_from_slice(board);
    seven_a[5..].copy_from_slice(&a.0);
    seven_b[5..].copy_from_slice(&b.0);
    best_hand(&seven_a).cmp(&best_hand(&seven_b))
}

fn run_batch(m: &Matchup, iterations: u64, seed: u64) -> EquityCounts {
    let mut rng = seeded_rng(seed);
    let mut stub = m.stub.clone();
    let missing = 5 - m.board.len();
    let mut board = [Card::from_index(0); 5];
    board[..m.board.len()].copy_from_slice(&m.board);
    let mut counts = EquityCounts::default();

    for _ in 0..iterations {
        let (ha, hb) = loop {
            let ha = pick(&m.a, &mut rng);
            let hb = pick(&m.b, &mut rng);
            if !ha.mask().overlaps(hb.mask()) {
                break (ha, hb);
            }
        };
        let dead = ha.mask().union(hb.mask());

        // partial Fisher-Yates, skipping cards held by the sampled hands
        for i in 0..missing {
            loop {
                let j = rng.gen_range(i..stub.len());
                stub.swap(i, j);
                if !dead.contains(stub[i]) {
                    break;
                }
            }
            board[5 - missing + i] = stub[i];
        }
        counts.record(showdown_outcome(ha, hb, &board));
    }
    trace!("equity batch seed={seed} iterations={iterations} -> {counts:?}");
    counts
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Monte Carlo tallies for `iterations` samples. Always samples, even when an
/// exact answer is cheap, so batches from different seeds can be summed.
pub fn equity_counts(
    a: &Range,
    b: &Range,
    board: &[Card],
    iterations: u32,
    seed: u64,
) -> Result<EquityCounts, EngineError> {
    if iterations == 0 {
        return Err(EngineError::ZeroIterations);
    }
    let matchup = prepare(a, b, board)?;
    Ok(run_batch(&matchup, iterations as u64, seed))
}

/// Equity of range `a` against range `b`.
///
/// With a complete board and two concrete hands the answer is computed
/// directly; otherwise `iterations` Monte Carlo samples are drawn from a
/// generator seeded with `seed`.
pub fn equity(
    a: &Range,
    b: &Range,
    board: &[Card],
    iterations: u32,
    seed: u64,
) -> Result<EquityResult, EngineError> {
    if let (5, Some(ha), Some(hb)) = (board.len(), a.as_single(), b.as_single()) {
        return equity_exact(ha, hb, board);
    }
    Ok(equity_counts(a, b, board, iterations, seed)?.into_result())
}

/// Exact equity of two concrete hands, enumerating every board completion.
///
/// Cost grows with the number of missing board cards: a complete board is a
/// single comparison, an empty board is C(48, 5) = 1,712,304 runouts.
pub fn equity_exact(a: HoleCards, b: HoleCards, board: &[Card]) -> Result<EquityResult, EngineError> {
    let m = prepare(&Range::single(a), &Range::single(b), board)?;
    let missing = 5 - m.board.len();
    debug!("exact equity {a} vs {b}: enumerating {missing} card(s) from {}", m.stub.len());

    let mut counts = EquityCounts::default();
    let mut full = [Card::from_index(0); 5];
    full[..m.board.len()].copy_from_slice(&m.board);
    for_each_combination(m.stub.len(), missing, |idx| {
        for (slot, &i) in idx.iter().enumerate() {
            full[m.board.len() + slot] = m.stub[i];
        }
        counts.record(showdown_outcome(a, b, &full));
    });
    Ok(counts.into_result())
}

/// Split `iterations` into `batches` independently seeded runs on the rayon
/// pool and sum their tallies. The result depends only on the inputs, not on
/// thread scheduling.
pub fn equity_parallel(
    a: &Range,
    b: &Range,
    board: &[Card],
    iterations: u32,
    seed: u64,
    batches: u32,
) -> Result<EquityResult, EngineError> {
    if iterations == 0 {
        return Err(EngineError::ZeroIterations);
    }
    let matchup = prepare(a, b, board)?;
    let batches = batches.clamp(1, iterations) as u64;
    let per = iterations as u64 / batches;
    let extra = iterations as u64 % batches;

    let counts: EquityCounts = (0..batches)
        .into_par_iter()
        .map(|i| {
            let n = per + u64::from(i < extra);
            run_batch(&matchup, n, derive_seed(seed, i))
        })
        .sum();
    Ok(counts.into_result())
}

/// Equity of a single hand against a uniformly random opponent hand.
pub fn equity_vs_random(
    hand: HoleCards,
    board: &[Card],
    iterations: u32,
    seed: u64,
) -> Result<EquityResult, EngineError> {
    equity(&Range::single(hand), &Range::random(), board, iterations, seed)
}

/// Call `f` with every k-subset of `0..n` as ascending indices.
fn for_each_combination<F: FnMut(&[usize])>(n: usize, k: usize, mut f: F) {
    if k > n {
        return;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        f(&idx);
        let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return;
        };
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::parse_cards;

    fn hand(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    fn range(s: &str) -> Range {
        Range::parse(s).unwrap()
    }

    #[test]
    fn combination_counts() {
        let mut n = 0;
        for_each_combination(7, 5, |_| n += 1);
        assert_eq!(n, 21);
        let mut n = 0;
        for_each_combination(44, 0, |idx| {
            assert!(idx.is_empty());
            n += 1;
        });
        assert_eq!(n, 1);
        let mut n = 0;
        for_each_combination(45, 2, |_| n += 1);
        assert_eq!(n, 990);
    }

    #[test]
    fn counts_add_and_normalise() {
        let a = EquityCounts { wins: 3, ties: 1, losses: 6 };
        let b = EquityCounts { wins: 7, ties: 0, losses: 3 };
        let sum: EquityCounts = [a, b].into_iter().sum();
        assert_eq!(sum, EquityCounts { wins: 10, ties: 1, losses: 9 });
        let r = sum.into_result();
        assert_eq!(r.iterations, 20);
        assert!((r.win + r.tie + r.loss - 1.0).abs() < 1e-12);
        assert!((r.equity() - 0.525).abs() < 1e-12);
    }

    #[test]
    fn complete_board_uses_exact_path() {
        let board = parse_cards("2c7d9hJsKc").unwrap();
        let r = equity(&range("AsAh"), &range("QdQh"), &board, 10, 1).unwrap();
        assert_eq!(r.iterations, 1);
        assert_eq!(r.win, 1.0);
    }

    #[test]
    fn river_enumeration_matches_outs() {
        // KK vs AA on a dry turn: 2 kings left among 44 unseen river cards
        let board = parse_cards("2c7d9hJs").unwrap();
        let r = equity_exact(hand("KsKh"), hand("AsAh"), &board).unwrap();
        assert_eq!(r.iterations, 44);
        assert!((r.win - 2.0 / 44.0).abs() < 1e-12);
        assert!((r.win + r.tie + r.loss - 1.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_cards_rejected_before_sampling() {
        let err = equity(&range("AsAh"), &range("AsKh"), &[], 100, 1).unwrap_err();
        assert_eq!(err, EngineError::DuplicateCard("As".parse().unwrap()));
        let board = parse_cards("Kh7d2c").unwrap();
        assert!(matches!(
            equity(&range("AsAd"), &range("KhQh"), &board, 100, 1),
            Err(EngineError::DuplicateCard(_))
        ));
    }

    #[test]
    fn board_validation() {
        let six = parse_cards("2c3c4c5c6c7c").unwrap();
        assert_eq!(
            equity(&range("AsAh"), &range("KsKh"), &six, 100, 1),
            Err(EngineError::BoardTooLarge(6))
        );
        assert_eq!(
            equity(&range("AsAh"), &range("KsKh"), &[], 0, 1),
            Err(EngineError::ZeroIterations)
        );
    }

    #[test]
    fn ranges_blocked_by_board_have_no_combination() {
        // every ace is on the board or in the other hand
        let board = parse_cards("AcAd2h").unwrap();
        assert_eq!(
            equity(&range("AA"), &range("AhKs"), &board, 100, 1),
            Err(EngineError::NoValidCombination)
        );
    }

    #[test]
    fn same_seed_same_result() {
        let a = equity(&range("AsKs"), &range("7h7d"), &[], 2_000, 42).unwrap();
        let b = equity(&range("AsKs"), &range("7h7d"), &[], 2_000, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_is_deterministic_and_sums_to_budget() {
        let a = equity_parallel(&range("QQ"), &range("AKs"), &[], 4_001, 9, 4).unwrap();
        let b = equity_parallel(&range("QQ"), &range("AKs"), &[], 4_001, 9, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.iterations, 4_001);
        assert!((a.win + a.tie + a.loss - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sampled_hands_never_collide_with_each_other() {
        // AA vs AK: sampled combos must not share an ace
        let r = equity(&range("AA"), &range("AK"), &[], 3_000, 5).unwrap();
        assert!(r.equity() > 0.8, "AA vs AK equity {}", r.equity());
    }

    #[test]
    fn equity_vs_random_orders_hands() {
        let aces = equity_vs_random(hand("AsAh"), &[], 3_000, 11).unwrap();
        let trash = equity_vs_random(hand("7c2d"), &[], 3_000, 11).unwrap();
        assert!(aces.equity() > 0.8);
        assert!(trash.equity() < 0.4);
    }
}

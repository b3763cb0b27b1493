//! Heads-up hand simulator.
//!
//! One hand moves through `Preflop -> Flop -> Turn -> River -> Showdown ->
//! HandComplete`, jumping straight to `HandComplete` when all but one player
//! folds. Every decision is delegated to a [`Controller`]; the built-in
//! [`PolicyController`] plays the rule-based policy from [`crate::engine::ai`].
//!
//! Betting amounts are street totals: `Bet(60)` and `Raise(60)` both leave
//! the actor with 60 chips committed on the current street. The minimum
//! raise is the facing bet plus the larger of the last raise and the big
//! blind; a player who cannot reach it may only call or fold.
//!
//! Chips are conserved: stacks plus pot never change during a hand. Uncalled
//! chips go back to their owner before the street closes, and an odd chip
//! in a split pot goes to the first winner left of the button.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::engine::ai::{decide, hand_strength, SkillLevel, SkillProfile, Spot};
use crate::engine::deck::Deck;
use crate::engine::error::EngineError;
use crate::engine::evaluator::{best_hand, HandRank};
use crate::engine::helpers::{board_str, derive_seed, seeded_rng};
use crate::engine::models::{ActionKind, Card, HoleCards, PlayerAction, Street};

/// Seat driven by the caller (the "hero"). The opponent sits in seat 1.
pub const HERO_SEAT: usize = 0;
pub const OPPONENT_SEAT: usize = 1;

const DECK_STREAM: u64 = 0;
const DECISION_STREAM: u64 = 1;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

impl Default for Blinds {
    fn default() -> Self {
        Blinds { small: 10, big: 20 }
    }
}

impl Blinds {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.small == 0 || self.big == 0 || self.small > self.big {
            return Err(EngineError::InvalidBlinds { small: self.small, big: self.big });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub hero_skill: SkillLevel,
    pub opponent_skill: SkillLevel,
    pub starting_stacks: Vec<u32>,
    pub blinds: Blinds,
    /// Seat holding the dealer button (and the small blind).
    pub button: usize,
    pub seed: u64,
    /// Fixed hero hole cards; the opponent is dealt from the rest of the deck.
    #[serde(default)]
    pub hero_cards: Option<HoleCards>,
}

impl SimulationConfig {
    /// Hero on the button at medium skill.
    pub fn new(opponent_skill: SkillLevel, starting_stacks: &[u32], blinds: Blinds, seed: u64) -> Self {
        SimulationConfig {
            hero_skill: SkillLevel::Medium,
            opponent_skill,
            starting_stacks: starting_stacks.to_vec(),
            blinds,
            button: HERO_SEAT,
            seed,
            hero_cards: None,
        }
    }

    pub fn with_hero_cards(mut self, hole: HoleCards) -> Self {
        self.hero_cards = Some(hole);
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let seats = self.starting_stacks.len();
        if seats != 2 {
            return Err(EngineError::InvalidStacks(format!(
                "heads-up play needs exactly 2 stacks, got {seats}"
            )));
        }
        if let Some(seat) = self.starting_stacks.iter().position(|&s| s == 0) {
            return Err(EngineError::InvalidStacks(format!("seat {seat} starts with no chips")));
        }
        if self.starting_stacks.iter().map(|&s| s as u64).sum::<u64>() > u32::MAX as u64 {
            return Err(EngineError::InvalidStacks("total chips overflow".into()));
        }
        if self.button >= seats {
            return Err(EngineError::InvalidStacks(format!("button seat {} does not exist", self.button)));
        }
        if let Some(HoleCards([a, b])) = self.hero_cards {
            if a == b {
                return Err(EngineError::DuplicateCard(a));
            }
        }
        self.blinds.validate()
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

impl Phase {
    /// The betting street, if the phase is one.
    pub fn street(self) -> Option<Street> {
        match self {
            Phase::Preflop => Some(Street::Preflop),
            Phase::Flop    => Some(Street::Flop),
            Phase::Turn    => Some(Street::Turn),
            Phase::River   => Some(Street::River),
            _              => None,
        }
    }
}

impl From<Street> for Phase {
    fn from(street: Street) -> Self {
        match street {
            Street::Preflop => Phase::Preflop,
            Street::Flop    => Phase::Flop,
            Street::Turn    => Phase::Turn,
            Street::River   => Phase::River,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub seat: usize,
    pub stack: u32,
    /// Chips put in on the current street.
    pub committed: u32,
    pub folded: bool,
    pub has_acted: bool,
    pub hole: HoleCards,
}

impl PlayerState {
    /// Still in the hand with chips behind.
    pub fn can_bet(&self) -> bool {
        !self.folded && self.stack > 0
    }
}

/// Entries of the hand log, each carrying the pot after it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HandEvent {
    BlindPosted { seat: usize, amount: u32, pot: u32 },
    Action { action: PlayerAction, pot: u32 },
    StreetDealt { street: Street, cards: Vec<Card>, pot: u32 },
    Refund { seat: usize, amount: u32, pot: u32 },
    Showdown { seat: usize, hole: HoleCards, rank: HandRank },
    PotAwarded { seat: usize, amount: u32, pot: u32 },
}

/// Observable state of the hand. The deck stays private to the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: Phase,
    pub pot: u32,
    pub players: Vec<PlayerState>,
    pub board: Vec<Card>,
    pub button: usize,
    pub blinds: Blinds,
    pub log: Vec<HandEvent>,
}

impl SimulationState {
    pub fn live_seats(&self) -> Vec<usize> {
        self.players.iter().filter(|p| !p.folded).map(|p| p.seat).collect()
    }

    /// Stacks plus pot.
    pub fn total_chips(&self) -> u64 {
        self.pot as u64 + self.players.iter().map(|p| p.stack as u64).sum::<u64>()
    }

    fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    /// Seats in dealing order, starting left of the button.
    fn seats_from_button(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.players.len();
        (1..=n).map(move |i| (self.button + i) % n)
    }
}

/// What the acting seat may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    /// Highest street total among the players.
    pub facing: u32,
    /// Chips a call puts in, capped at the stack. Zero when checking is free.
    pub to_call: u32,
    pub can_check: bool,
    /// Inclusive `(min, max)` street totals for a bet or raise.
    pub raise: Option<(u32, u32)>,
}

impl LegalActions {
    pub fn can_fold(&self) -> bool {
        !self.can_check
    }

    pub fn is_empty(&self) -> bool {
        !self.can_check && self.to_call == 0 && self.raise.is_none()
    }

    /// `Bet` when nothing is facing, `Raise` otherwise.
    pub fn aggressive(&self, to: u32) -> ActionKind {
        if self.facing == 0 {
            ActionKind::Bet(to)
        } else {
            ActionKind::Raise(to)
        }
    }

    pub fn allows(&self, kind: ActionKind) -> bool {
        let in_window = |to: u32| matches!(self.raise, Some((lo, hi)) if to >= lo && to <= hi);
        match kind {
            ActionKind::Fold      => self.can_fold(),
            ActionKind::Check     => self.can_check,
            ActionKind::Call(n)   => !self.can_check && n == self.to_call,
            ActionKind::Bet(to)   => self.facing == 0 && in_window(to),
            ActionKind::Raise(to) => self.facing > 0 && in_window(to),
        }
    }
}

// ---------------------------------------------------------------------------
// Controllers
// ---------------------------------------------------------------------------

/// Read-only view handed to a controller at a decision point.
#[derive(Debug, Clone, Copy)]
pub struct SeatView<'a> {
    pub seat: usize,
    pub hole: HoleCards,
    pub board: &'a [Card],
    pub street: Street,
    pub pot: u32,
    pub stack: u32,
    pub legal: LegalActions,
    pub in_position: bool,
    pub opponents: usize,
    pub history: &'a [PlayerAction],
}

/// Source of decisions for one seat.
pub trait Controller {
    fn act(&mut self, view: &SeatView<'_>, rng: &mut StdRng) -> ActionKind;
}

/// Plays the rule-based policy at a fixed skill.
#[derive(Debug, Clone, Copy)]
pub struct PolicyController {
    profile: SkillProfile,
}

impl PolicyController {
    pub fn new(skill: SkillLevel) -> Self {
        PolicyController { profile: skill.profile() }
    }
}

impl Controller for PolicyController {
    fn act(&mut self, view: &SeatView<'_>, rng: &mut StdRng) -> ActionKind {
        let strength = hand_strength(view.hole, view.board, &self.profile, rng);
        let spot = Spot {
            strength,
            pot: view.pot,
            street: view.street,
            in_position: view.in_position,
            opponents: view.opponents,
            legal: view.legal,
        };
        decide(&spot, &self.profile, rng)
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetSummary {
    pub street: Street,
    pub pot_before: u32,
    pub pot_after: u32,
    pub actions: Vec<PlayerAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowdownHand {
    pub seat: usize,
    pub hole: HoleCards,
    pub rank: HandRank,
}

/// Complete, serializable history of one simulated hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    pub seed: u64,
    pub hero_skill: SkillLevel,
    pub opponent_skill: SkillLevel,
    pub button: usize,
    pub blinds: Blinds,
    pub starting_stacks: Vec<u32>,
    pub hole_cards: Vec<HoleCards>,
    pub board: Vec<Card>,
    pub streets: Vec<StreetSummary>,
    pub actions: Vec<PlayerAction>,
    pub events: Vec<HandEvent>,
    /// Pot size when it was awarded.
    pub final_pot: u32,
    pub winners: Vec<usize>,
    /// Chips awarded to each seat.
    pub payouts: Vec<u32>,
    pub final_stacks: Vec<u32>,
    /// Hands shown, empty when the hand ended on a fold.
    pub showdown: Vec<ShowdownHand>,
}

impl HandRecord {
    pub fn went_to_showdown(&self) -> bool {
        !self.showdown.is_empty()
    }

    /// Chips won (positive) or lost by `seat` over the hand.
    pub fn net(&self, seat: usize) -> i64 {
        self.final_stacks[seat] as i64 - self.starting_stacks[seat] as i64
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

pub struct Simulator {
    config: SimulationConfig,
    state: SimulationState,
    deck: Deck,
    rng: StdRng,
    hole_cards: Vec<HoleCards>,
    // betting round bookkeeping
    facing: u32,
    last_raise: u32,
    cursor: usize,
    street_pot_start: u32,
    street_actions: Vec<PlayerAction>,
    streets: Vec<StreetSummary>,
    actions: Vec<PlayerAction>,
    showdown: Vec<ShowdownHand>,
    winners: Vec<usize>,
    payouts: Vec<u32>,
    final_pot: u32,
}

impl Simulator {
    /// Shuffle, deal hole cards and post blinds.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut deck_rng = seeded_rng(derive_seed(config.seed, DECK_STREAM));
        let rng = seeded_rng(derive_seed(config.seed, DECISION_STREAM));
        let seats = config.starting_stacks.len();

        let preset = config.hero_cards.map(|HoleCards([a, b])| HoleCards::ordered(a, b));
        let mut deck = match preset {
            Some(hero) => {
                let mut deck = Deck::without(hero.mask());
                deck.shuffle(&mut deck_rng);
                deck
            }
            None => Deck::new_shuffled(&mut deck_rng),
        };
        let hole_cards: Vec<HoleCards> = (0..seats)
            .map(|seat| match preset {
                Some(hero) if seat == HERO_SEAT => hero,
                _ => {
                    let (a, b) = (deck.deal(), deck.deal());
                    HoleCards::ordered(a, b)
                }
            })
            .collect();
        let players = config
            .starting_stacks
            .iter()
            .zip(&hole_cards)
            .enumerate()
            .map(|(seat, (&stack, &hole))| PlayerState {
                seat,
                stack,
                committed: 0,
                folded: false,
                has_acted: false,
                hole,
            })
            .collect();

        let state = SimulationState {
            phase: Phase::Preflop,
            pot: 0,
            players,
            board: Vec::with_capacity(5),
            button: config.button,
            blinds: config.blinds,
            log: Vec::new(),
        };
        let mut sim = Simulator {
            last_raise: config.blinds.big,
            config,
            state,
            deck,
            rng,
            hole_cards,
            facing: 0,
            cursor: 0,
            street_pot_start: 0,
            street_actions: Vec::new(),
            streets: Vec::new(),
            actions: Vec::new(),
            showdown: Vec::new(),
            winners: Vec::new(),
            payouts: vec![0; seats],
            final_pot: 0,
        };
        sim.post_blinds();
        Ok(sim)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Legal actions for the seat due to act, or `None` outside a betting
    /// round or once the round is closed.
    pub fn pending(&self) -> Option<(usize, LegalActions)> {
        self.state.phase.street()?;
        let seat = self.next_to_act()?;
        Some((seat, self.legal_actions(seat)))
    }

    /// Play the hand to completion.
    pub fn play(
        mut self,
        hero: &mut dyn Controller,
        opponent: &mut dyn Controller,
    ) -> Result<HandRecord, EngineError> {
        let chips = self.state.total_chips();
        while self.advance(hero, opponent)? {
            debug_assert_eq!(self.state.total_chips(), chips, "chips created or lost");
        }
        Ok(self.into_record())
    }

    /// Perform one transition: a decision, a street close, or the showdown.
    /// Returns `false` once the hand is complete.
    fn advance(&mut self, hero: &mut dyn Controller, opponent: &mut dyn Controller) -> Result<bool, EngineError> {
        match self.state.phase {
            Phase::HandComplete => return Ok(false),
            Phase::Showdown => self.showdown(),
            phase => {
                let Some(street) = phase.street() else {
                    unreachable!("{phase:?} is not a betting phase");
                };
                match self.next_to_act() {
                    None => self.close_street(street),
                    Some(seat) => {
                        let controller: &mut dyn Controller =
                            if seat == HERO_SEAT { &mut *hero } else { &mut *opponent };
                        self.step(seat, street, controller)?;
                    }
                }
            }
        }
        Ok(true)
    }

    fn step(&mut self, seat: usize, street: Street, controller: &mut dyn Controller) -> Result<(), EngineError> {
        let legal = self.legal_actions(seat);
        assert!(!legal.is_empty(), "seat {seat} is due to act with no legal actions");

        let player = &self.state.players[seat];
        let view = SeatView {
            seat,
            hole: player.hole,
            board: &self.state.board,
            street,
            pot: self.state.pot,
            stack: player.stack,
            legal,
            in_position: seat == self.state.button,
            opponents: self.state.live_seats().len() - 1,
            history: &self.actions,
        };
        let kind = controller.act(&view, &mut self.rng);
        self.apply(seat, street, kind, &legal)
    }

    // -----------------------------------------------------------------------
    // Betting
    // -----------------------------------------------------------------------

    fn post_blinds(&mut self) {
        let sb = self.state.button;
        let bb = self.state.next_seat(sb);
        let Blinds { small, big } = self.state.blinds;
        self.post(sb, small);
        self.post(bb, big);
        self.facing = self.state.players.iter().map(|p| p.committed).max().unwrap_or(0);
        self.last_raise = big;
        // heads-up: the button acts first preflop
        self.cursor = sb;
        self.street_pot_start = self.state.pot;
    }

    fn post(&mut self, seat: usize, amount: u32) {
        let paid = amount.min(self.state.players[seat].stack);
        self.commit(seat, paid);
        let pot = self.state.pot;
        trace!("seat {seat} posts {paid}");
        self.state.log.push(HandEvent::BlindPosted { seat, amount: paid, pot });
    }

    fn commit(&mut self, seat: usize, amount: u32) {
        let p = &mut self.state.players[seat];
        p.stack -= amount;
        p.committed += amount;
        self.state.pot += amount;
    }

    fn needs_action(&self, p: &PlayerState, bettors: usize) -> bool {
        p.can_bet() && (p.committed < self.facing || (!p.has_acted && bettors >= 2))
    }

    fn next_to_act(&self) -> Option<usize> {
        if self.state.live_seats().len() <= 1 {
            return None;
        }
        let n = self.state.players.len();
        let bettors = self.state.players.iter().filter(|p| p.can_bet()).count();
        (0..n)
            .map(|i| (self.cursor + i) % n)
            .find(|&s| self.needs_action(&self.state.players[s], bettors))
    }

    pub fn legal_actions(&self, seat: usize) -> LegalActions {
        let p = &self.state.players[seat];
        let owed = self.facing.saturating_sub(p.committed);
        let min_to = if self.facing == 0 {
            self.state.blinds.big
        } else {
            self.facing + self.last_raise.max(self.state.blinds.big)
        };
        let max_to = p.committed + p.stack;
        let opponent_can_bet = self.state.players.iter().any(|o| o.seat != seat && o.can_bet());
        LegalActions {
            facing: self.facing,
            to_call: owed.min(p.stack),
            can_check: owed == 0,
            raise: (opponent_can_bet && max_to >= min_to).then_some((min_to, max_to)),
        }
    }

    fn apply(&mut self, seat: usize, street: Street, kind: ActionKind, legal: &LegalActions) -> Result<(), EngineError> {
        if !legal.allows(kind) {
            let reason = match kind {
                ActionKind::Fold => "cannot fold when checking is free".to_string(),
                ActionKind::Check => format!("cannot check facing {}", legal.facing),
                ActionKind::Call(n) => format!("call of {n} does not match {}", legal.to_call),
                ActionKind::Bet(to) | ActionKind::Raise(to) => match legal.raise {
                    Some((lo, hi)) if legal.facing == 0 && matches!(kind, ActionKind::Raise(_)) => {
                        format!("nothing to raise, bet between {lo} and {hi}")
                    }
                    Some((lo, hi)) if legal.facing > 0 && matches!(kind, ActionKind::Bet(_)) => {
                        format!("facing {}, raise between {lo} and {hi}", legal.facing)
                    }
                    Some((lo, hi)) => format!("{to} is outside {lo}..={hi}"),
                    None => "no bet or raise is available".to_string(),
                },
            };
            return Err(EngineError::IllegalAction { seat, reason });
        }

        match kind {
            ActionKind::Fold => self.state.players[seat].folded = true,
            ActionKind::Check => {}
            ActionKind::Call(n) => self.commit(seat, n),
            ActionKind::Bet(to) | ActionKind::Raise(to) => {
                let added = to - self.state.players[seat].committed;
                self.commit(seat, added);
                let raise_size = to - self.facing;
                self.last_raise = self.last_raise.max(raise_size);
                self.facing = to;
                for p in self.state.players.iter_mut().filter(|p| p.seat != seat) {
                    p.has_acted = false;
                }
            }
        }
        self.state.players[seat].has_acted = true;

        let action = PlayerAction { seat, street, kind };
        trace!("{action} (pot {})", self.state.pot);
        self.state.log.push(HandEvent::Action { action, pot: self.state.pot });
        self.street_actions.push(action);
        self.actions.push(action);
        self.cursor = self.state.next_seat(seat);
        Ok(())
    }

    /// Return the part of the top contribution nobody matched.
    fn refund_uncalled(&mut self) {
        let Some(top) = self
            .state
            .players
            .iter()
            .filter(|p| !p.folded)
            .max_by_key(|p| p.committed)
            .map(|p| p.seat)
        else {
            return;
        };
        let top_amount = self.state.players[top].committed;
        let matched = self
            .state
            .players
            .iter()
            .filter(|p| p.seat != top)
            .map(|p| p.committed)
            .max()
            .unwrap_or(0);
        if top_amount > matched {
            let amount = top_amount - matched;
            let p = &mut self.state.players[top];
            p.stack += amount;
            p.committed -= amount;
            self.state.pot -= amount;
            debug!("returning {amount} uncalled to seat {top}");
            self.state.log.push(HandEvent::Refund { seat: top, amount, pot: self.state.pot });
        }
    }

    fn close_street(&mut self, street: Street) {
        self.refund_uncalled();
        self.streets.push(StreetSummary {
            street,
            pot_before: self.street_pot_start,
            pot_after: self.state.pot,
            actions: std::mem::take(&mut self.street_actions),
        });

        let live = self.state.live_seats();
        if let [winner] = live.as_slice() {
            debug!("seat {winner} wins {} uncontested", self.state.pot);
            let pot = self.state.pot;
            self.award(&[(*winner, pot)]);
            return;
        }

        match street.next() {
            None => self.state.phase = Phase::Showdown,
            Some(next) => {
                let cards = self.deck.deal_n(next.cards_revealed());
                self.state.board.extend_from_slice(&cards);
                debug!("{next}: {}", board_str(&self.state.board));
                self.state.log.push(HandEvent::StreetDealt { street: next, cards, pot: self.state.pot });
                self.start_street(next);
            }
        }
    }

    fn start_street(&mut self, street: Street) {
        for p in &mut self.state.players {
            p.committed = 0;
            p.has_acted = false;
        }
        self.facing = 0;
        self.last_raise = self.state.blinds.big;
        self.cursor = self.state.next_seat(self.state.button);
        self.street_pot_start = self.state.pot;
        self.state.phase = street.into();
    }

    // -----------------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------------

    fn showdown(&mut self) {
        let order: Vec<usize> = self.state.seats_from_button().collect();
        for seat in order {
            let p = &self.state.players[seat];
            if p.folded {
                continue;
            }
            let mut cards = self.state.board.clone();
            cards.extend_from_slice(&p.hole.0);
            let rank = best_hand(&cards);
            debug!("seat {seat} shows {} for {rank}", p.hole);
            self.state.log.push(HandEvent::Showdown { seat, hole: p.hole, rank });
            self.showdown.push(ShowdownHand { seat, hole: p.hole, rank });
        }

        let Some(best) = self.showdown.iter().map(|h| h.rank).max() else {
            unreachable!("showdown reached with no live hands");
        };
        let winners: Vec<usize> = self.showdown.iter().filter(|h| h.rank == best).map(|h| h.seat).collect();
        let pot = self.state.pot;
        let share = pot / winners.len() as u32;
        let odd = pot % winners.len() as u32;
        let awards: Vec<(usize, u32)> = winners
            .iter()
            .enumerate()
            .map(|(i, &seat)| (seat, if i == 0 { share + odd } else { share }))
            .collect();
        self.award(&awards);
    }

    fn award(&mut self, awards: &[(usize, u32)]) {
        self.final_pot = self.state.pot;
        for &(seat, amount) in awards {
            self.state.players[seat].stack += amount;
            self.state.pot -= amount;
            self.payouts[seat] += amount;
            self.winners.push(seat);
            self.state.log.push(HandEvent::PotAwarded { seat, amount, pot: self.state.pot });
        }
        debug_assert_eq!(self.state.pot, 0, "pot not fully awarded");
        self.state.phase = Phase::HandComplete;
        info!(
            "hand {} complete: pot {} to seat(s) {:?}",
            self.config.seed, self.final_pot, self.winners
        );
    }

    fn into_record(self) -> HandRecord {
        HandRecord {
            seed: self.config.seed,
            hero_skill: self.config.hero_skill,
            opponent_skill: self.config.opponent_skill,
            button: self.config.button,
            blinds: self.config.blinds,
            starting_stacks: self.config.starting_stacks,
            hole_cards: self.hole_cards,
            board: self.state.board,
            streets: self.streets,
            actions: self.actions,
            events: self.state.log,
            final_pot: self.final_pot,
            winners: self.winners,
            payouts: self.payouts,
            final_stacks: self.state.players.iter().map(|p| p.stack).collect(),
            showdown: self.showdown,
        }
    }
}

/// Play one heads-up hand: the hero (seat 0, on the button) runs the policy
/// at medium skill against an opponent at `skill`.
pub fn simulate_hand(
    skill: SkillLevel,
    starting_stacks: &[u32],
    blinds: Blinds,
    seed: u64,
) -> Result<HandRecord, EngineError> {
    simulate_with(SimulationConfig::new(skill, starting_stacks, blinds, seed))
}

/// Play one hand with both seats on the policy, as configured.
pub fn simulate_with(config: SimulationConfig) -> Result<HandRecord, EngineError> {
    let mut hero = PolicyController::new(config.hero_skill);
    let mut opponent = PolicyController::new(config.opponent_skill);
    Simulator::new(config)?.play(&mut hero, &mut opponent)
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

// ---------------------------------------------------------------------------
// Card primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Position of the suit inside a 4-slot table (clubs first).
    pub fn index(self) -> usize {
        match self {
            Suit::Clubs    => 0,
            Suit::Diamonds => 1,
            Suit::Hearts   => 2,
            Suit::Spades   => 3,
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _   => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suit::Clubs => write!(f, "c"),
            Suit::Diamonds => write!(f, "d"),
            Suit::Hearts => write!(f, "h"),
            Suit::Spades => write!(f, "s"),
        }
    }
}

/// Rank 2..=14 where 14 = Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(pub u8);

impl TryFrom<u8> for Rank {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (2..=14).contains(&value) {
            Ok(Rank(value))
        } else {
            Err(EngineError::InvalidCard(format!("rank {value}")))
        }
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl Rank {
    pub const ACE: Rank = Rank(14);

    /// All thirteen ranks, deuce first.
    pub fn all() -> impl DoubleEndedIterator<Item = Rank> {
        (2u8..=14).map(Rank)
    }

    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "T",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        let r = match c.to_ascii_uppercase() {
            '2' => 2, '3' => 3, '4' => 4, '5' => 5, '6' => 6,
            '7' => 7, '8' => 8, '9' => 9, 'T' => 10,
            'J' => 11, 'Q' => 12, 'K' => 13, 'A' => 14,
            _ => return None,
        };
        Some(Rank(r))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Compact index in `0..52`: four consecutive slots per rank.
    pub fn index(self) -> u8 {
        (self.rank.0 - 2) * 4 + self.suit.index() as u8
    }

    /// Inverse of [`Card::index`]. Panics outside `0..52`.
    pub fn from_index(index: u8) -> Self {
        assert!(index < 52, "card index {index} out of range");
        Card {
            rank: Rank(index / 4 + 2),
            suit: Suit::ALL[(index % 4) as usize],
        }
    }

    pub fn mask(self) -> u64 {
        1u64 << self.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = EngineError;

    /// Parse two-character notation such as `As` or `Th`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => {
                let rank = Rank::from_char(r).ok_or_else(|| EngineError::InvalidCard(s.to_string()))?;
                let suit = Suit::from_char(su).ok_or_else(|| EngineError::InvalidCard(s.to_string()))?;
                Ok(Card { rank, suit })
            }
            _ => Err(EngineError::InvalidCard(s.to_string())),
        }
    }
}

/// Parse a run of cards, either concatenated (`2c7sQh`) or separated by
/// whitespace (`As Kh`).
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EngineError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 || !compact.is_ascii() {
        return Err(EngineError::InvalidHand(s.to_string()));
    }
    let cards = compact
        .as_bytes()
        .chunks(2)
        .map(|pair| std::str::from_utf8(pair).unwrap_or_default().parse::<Card>())
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(dup) = CardMask::first_duplicate(&cards) {
        return Err(EngineError::DuplicateCard(dup));
    }
    Ok(cards)
}

// ---------------------------------------------------------------------------
// Card sets
// ---------------------------------------------------------------------------

/// A set of cards packed into one bit per card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardMask(pub u64);

impl CardMask {
    pub const FULL: CardMask = CardMask((1u64 << 52) - 1);

    pub fn empty() -> Self {
        CardMask(0)
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        cards.iter().fold(CardMask(0), |m, c| CardMask(m.0 | c.mask()))
    }

    pub fn insert(&mut self, card: Card) {
        self.0 |= card.mask();
    }

    pub fn contains(self, card: Card) -> bool {
        self.0 & card.mask() != 0
    }

    pub fn overlaps(self, other: CardMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: CardMask) -> CardMask {
        CardMask(self.0 | other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Cards in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        (0u8..52).filter(move |&i| self.0 & (1u64 << i) != 0).map(Card::from_index)
    }

    /// The first card that occurs twice in `cards`, if any.
    pub fn first_duplicate(cards: &[Card]) -> Option<Card> {
        let mut seen = CardMask::empty();
        for &c in cards {
            if seen.contains(c) {
                return Some(c);
            }
            seen.insert(c);
        }
        None
    }
}

impl FromIterator<Card> for CardMask {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut mask = CardMask::empty();
        for c in iter {
            mask.insert(c);
        }
        mask
    }
}

/// Two hole cards. The higher card is stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleCards(pub [Card; 2]);

impl HoleCards {
    pub fn new(a: Card, b: Card) -> Result<Self, EngineError> {
        if a == b {
            return Err(EngineError::DuplicateCard(a));
        }
        Ok(Self::ordered(a, b))
    }

    pub(crate) fn ordered(a: Card, b: Card) -> Self {
        if a > b { HoleCards([a, b]) } else { HoleCards([b, a]) }
    }

    pub fn cards(&self) -> [Card; 2] {
        self.0
    }

    pub fn mask(&self) -> CardMask {
        CardMask(self.0[0].mask() | self.0[1].mask())
    }

    pub fn is_pair(&self) -> bool {
        self.0[0].rank == self.0[1].rank
    }

    pub fn is_suited(&self) -> bool {
        self.0[0].suit == self.0[1].suit
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

impl FromStr for HoleCards {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cards(s)?.as_slice() {
            [a, b] => HoleCards::new(*a, *b),
            _ => Err(EngineError::InvalidHand(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Streets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// The following street, or `None` after the river.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop    => Some(Street::Turn),
            Street::Turn    => Some(Street::River),
            Street::River   => None,
        }
    }

    /// Community cards revealed when this street begins.
    pub fn cards_revealed(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop    => 3,
            Street::Turn    => 1,
            Street::River   => 1,
        }
    }

    /// Total community cards visible during this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop    => 3,
            Street::Turn    => 4,
            Street::River   => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop    => write!(f, "Flop"),
            Street::Turn    => write!(f, "Turn"),
            Street::River   => write!(f, "River"),
        }
    }
}

// ---------------------------------------------------------------------------
// Betting actions
// ---------------------------------------------------------------------------

/// What a player does at a decision point.
///
/// `Call` carries the chips actually put in (less than the facing bet when
/// the caller is all-in). `Bet` and `Raise` carry the player's total
/// contribution for the street after the action ("raise to").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Fold      => write!(f, "folds"),
            ActionKind::Check     => write!(f, "checks"),
            ActionKind::Call(n)   => write!(f, "calls {n}"),
            ActionKind::Bet(n)    => write!(f, "bets {n}"),
            ActionKind::Raise(n)  => write!(f, "raises to {n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub seat: usize,
    pub street: Street,
    pub kind: ActionKind,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] seat {} {}", self.street, self.seat, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_rank_rejected_on_deserialize() {
        let card: Card = serde_json::from_str(r#"{"rank":14,"suit":"Spades"}"#).unwrap();
        assert_eq!(card.to_string(), "As");
        assert_eq!(serde_json::to_string(&card).unwrap(), r#"{"rank":14,"suit":"Spades"}"#);
        for bad in [0, 1, 15, 255] {
            let json = format!(r#"{{"rank":{bad},"suit":"Spades"}}"#);
            assert!(serde_json::from_str::<Card>(&json).is_err(), "rank {bad}");
        }
        assert!(Rank::try_from(1).is_err());
    }

    #[test]
    fn action_display() {
        let a = PlayerAction { seat: 1, street: Street::Flop, kind: ActionKind::Raise(120) };
        assert_eq!(a.to_string(), "[Flop] seat 1 raises to 120");
    }

    #[test]
    fn card_notation_round_trips() {
        for i in 0..52u8 {
            let card = Card::from_index(i);
            let parsed: Card = card.to_string().parse().unwrap();
            assert_eq!(parsed, card);
            assert_eq!(parsed.index(), i);
        }
    }

    #[test]
    fn card_parse_rejects_malformed_input() {
        for bad in ["", "A", "Asx", "1s", "Ax", "10s", "ZZ"] {
            assert!(
                matches!(bad.parse::<Card>(), Err(EngineError::InvalidCard(_))),
                "'{bad}' should not parse"
            );
        }
    }

    #[test]
    fn parse_cards_accepts_spaced_and_compact() {
        let spaced = parse_cards("As Kh").unwrap();
        let compact = parse_cards("AsKh").unwrap();
        assert_eq!(spaced, compact);
        assert_eq!(spaced[1].to_string(), "Kh");
        assert_eq!(parse_cards("2c7sQh").unwrap().len(), 3);
        assert!(matches!(parse_cards("As K"), Err(EngineError::InvalidHand(_))));
        assert!(matches!(parse_cards("AsAs"), Err(EngineError::DuplicateCard(_))));
    }

    #[test]
    fn mask_detects_overlap() {
        let hand = CardMask::from_cards(&parse_cards("AsKs").unwrap());
        let board = CardMask::from_cards(&parse_cards("Ks7h2c").unwrap());
        let other = CardMask::from_cards(&parse_cards("Qd Jd").unwrap());
        assert!(hand.overlaps(board));
        assert!(!hand.overlaps(other));
        assert_eq!(hand.union(board).len(), 4);
        assert_eq!(CardMask::FULL.len(), 52);
    }

    #[test]
    fn hole_cards_are_ordered_high_first() {
        let h: HoleCards = "7hAs".parse().unwrap();
        assert_eq!(h.to_string(), "As7h");
        assert!(!h.is_pair());
        assert!(HoleCards::new(h.0[0], h.0[0]).is_err());
    }

    #[test]
    fn street_progression() {
        assert_eq!(Street::Preflop.next(), Some(Street::Flop));
        assert_eq!(Street::River.next(), None);
        assert_eq!(Street::Turn.board_len(), 4);
    }
}

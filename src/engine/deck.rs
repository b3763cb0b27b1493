use rand::Rng;
use crate::engine::models::{Card, CardMask, Rank, Suit};

/// A standard 52-card deck that can be shuffled and dealt from.
///
/// Cards before the cursor are dealt; a deck never hands out the same card
/// twice during its lifetime.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Fresh deck in index order (2c 2d 2h 2s 3c ...).
    pub fn new() -> Self {
        let cards = Rank::all()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card { rank, suit }))
            .collect();
        Deck { cards, cursor: 0 }
    }

    /// Build a fresh ordered deck and shuffle it with `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Ordered deck holding every card not in `dead`.
    pub fn without(dead: CardMask) -> Self {
        let cards = Self::new().cards.into_iter().filter(|c| !dead.contains(*c)).collect();
        Deck { cards, cursor: 0 }
    }

    /// Shuffle the undealt portion in place.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        // Fisher-Yates over the undealt tail
        let live = &mut self.cards[self.cursor..];
        for i in (1..live.len()).rev() {
            let j = rng.gen_range(0..=i);
            live.swap(i, j);
        }
    }

    /// Deal one card; panics if the deck is exhausted.
    pub fn deal(&mut self) -> Card {
        assert!(self.cursor < self.cards.len(), "Deck exhausted");
        let card = self.cards[self.cursor];
        self.cursor += 1;
        card
    }

    /// Deal `n` cards at once; panics if fewer than `n` remain.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        assert!(
            n <= self.remaining(),
            "Deck exhausted: requested {n} cards, {} remaining",
            self.remaining()
        );
        let dealt = self.cards[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        dealt
    }

    /// Remaining cards available.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// All dealt cards so far (useful for integrity checks).
    pub fn dealt_cards(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }

    /// Undealt cards in current order.
    pub fn live_cards(&self) -> &[Card] {
        &self.cards[self.cursor..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn deck_has_52_unique_cards() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = Deck::new_shuffled(&mut rng);
        let all: Vec<Card> = (0..52).map(|_| deck.deal()).collect();

        assert_eq!(CardMask::from_cards(&all), CardMask::FULL);
        assert_eq!(all.len(), 52);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn deck_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<Card> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut deck = Deck::new_shuffled(&mut rng);
            deck.deal_n(5)
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn without_removes_dead_cards() {
        let dead: CardMask = ["As", "Kd", "2c"].iter().map(|s| s.parse::<Card>().unwrap()).collect();
        let mut deck = Deck::without(dead);
        assert_eq!(deck.remaining(), 49);
        let rest = deck.deal_n(49);
        assert!(!CardMask::from_cards(&rest).overlaps(dead));
    }

    #[test]
    fn shuffle_only_touches_undealt_cards() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = Deck::new();
        let first = deck.deal_n(10);
        deck.shuffle(&mut rng);
        assert_eq!(deck.dealt_cards(), first.as_slice());
        assert_eq!(deck.remaining(), 42);
    }

    #[test]
    #[should_panic(expected = "Deck exhausted")]
    fn dealing_past_the_end_panics() {
        let mut deck = Deck::new();
        deck.deal_n(50);
        deck.deal_n(3);
    }
}

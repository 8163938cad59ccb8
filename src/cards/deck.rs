use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A 52-card deck with a draw cursor. Construction order is rank-major,
/// suit-minor (`for r in 0..13: for s in 0..4`), matching the layout a seed
/// must reproduce bit-exactly. Shuffling is Fisher-Yates over the full
/// array, driven by a seeded PRNG so a given seed always yields the same
/// hand.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; 52],
    next: usize,
}

impl Deck {
    /// Builds an unshuffled deck in canonical order.
    pub fn ordered() -> Self {
        let mut cards = [Card::new(Rank::Two, Suit::Diamond); 52];
        let mut i = 0;
        for r in 0..13u8 {
            for s in 0..4u8 {
                cards[i] = Card::new(Rank::from(r), Suit::from_u8(s));
                i += 1;
            }
        }
        Self { cards, next: 0 }
    }

    /// Builds a deck shuffled deterministically from `seed`.
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::ordered();
        deck.shuffle(seed);
        deck
    }

    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for i in 0..self.cards.len() {
            let j = rng.random_range(0..self.cards.len());
            self.cards.swap(i, j);
        }
        self.next = 0;
    }

    /// Draws the next card off the top of the deck, in deal order.
    pub fn draw(&mut self) -> Option<Card> {
        if self.next >= self.cards.len() {
            return None;
        }
        let card = self.cards[self.next];
        self.next += 1;
        Some(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::ordered()
    }
}

//! Two-deck composition and deterministic shuffling.

use crate::domain::cards::{Card, Rank, Suit, NATURAL_RANKS};

pub const DECK_SIZE: usize = 108;
pub const HAND_SIZE: usize = 27;

/// Build the full 108-card stack: two copies of a 52-card pack plus two
/// pairs of jokers. Identity tags are unique by construction.
pub fn make_deck() -> Vec<Card> {
    let suits = [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for copy in 0..2u8 {
        for suit in suits {
            for rank in NATURAL_RANKS {
                deck.push(Card::new(suit, rank, copy));
            }
        }
        deck.push(Card::new(Suit::Joker, Rank::SmallJoker, copy));
        deck.push(Card::new(Suit::Joker, Rank::BigJoker, copy));
    }
    deck
}

/// Deterministic RNG for shuffling.
///
/// SplitMix64-style generator: well distributed, fast, and reproducible
/// given a seed.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Rejection sampling to avoid modulo bias.
        let limit = u64::MAX - (u64::MAX % m);
        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle with a deterministic RNG.
pub fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SplitMix64::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// Distribute a shuffled deck round-robin, 27 cards per seat.
pub fn deal_round_robin(deck: &[Card]) -> [Vec<Card>; 4] {
    let mut hands: [Vec<Card>; 4] = [
        Vec::with_capacity(HAND_SIZE),
        Vec::with_capacity(HAND_SIZE),
        Vec::with_capacity(HAND_SIZE),
        Vec::with_capacity(HAND_SIZE),
    ];
    for (i, card) in deck.iter().enumerate() {
        hands[i % 4].push(*card);
    }
    hands
}

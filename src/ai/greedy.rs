//! Greedy reference bot: cheapest answer that holds the trick.
//!
//! On a free lead it sheds its lowest rank (up to trips); against a
//! target it plays the cheapest strictly-beating set it can form from the
//! simple shapes (single, pair, trips) and falls back to its smallest
//! bomb. It passes when it has no answer. Every candidate is re-checked
//! through the real classifier and comparator before being returned, so a
//! construction bug degrades to a pass instead of an illegal play.

use std::collections::BTreeMap;
use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::BotStrategy;
use crate::domain::cards::{Card, Rank};
use crate::domain::compare::compare_hands;
use crate::domain::hands::{classify, HandClass, HandType};

pub struct GreedyBot {
    /// Interior mutability: `decide` takes `&self` but tie-breaking
    /// between equal-value cards wants a mutable RNG.
    rng: Mutex<StdRng>,
}

impl GreedyBot {
    pub const NAME: &'static str = "GreedyBot";

    /// `Some(seed)` gives reproducible behaviour for tests; `None` draws
    /// from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn beats(&self, candidate: &[Card], level: Rank, target: &HandClass) -> bool {
        match classify(candidate, level) {
            Ok(class) => compare_hands(&class, target) > 0,
            Err(_) => false,
        }
    }
}

/// Hand grouped by logic value, ascending.
fn groups(hand: &[Card], level: Rank) -> BTreeMap<u8, Vec<Card>> {
    let mut map: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for card in hand {
        map.entry(card.logic_value(level)).or_default().push(*card);
    }
    map
}

impl BotStrategy for GreedyBot {
    fn decide(&self, hand: &[Card], level: Rank, target: Option<&HandClass>) -> Option<Vec<Card>> {
        if hand.is_empty() {
            return None;
        }
        let by_value = groups(hand, level);

        let Some(target) = target else {
            // Free lead: shed the lowest rank, up to trips.
            let (_, cards) = by_value.iter().next()?;
            let take = cards.len().min(3);
            let candidate: Vec<Card> = cards[..take].to_vec();
            if classify(&candidate, level).is_ok() {
                return Some(candidate);
            }
            return Some(vec![cards[0]]);
        };

        // Cheapest same-shape answer first.
        match target.hand_type {
            HandType::Single => {
                for (&value, cards) in &by_value {
                    if value <= target.value {
                        continue;
                    }
                    // Prefer breaking the smallest stack; equal-value
                    // copies are interchangeable, pick one at random.
                    let card = {
                        let mut rng = match self.rng.lock() {
                            Ok(guard) => guard,
                            Err(_) => return None,
                        };
                        *cards.choose(&mut *rng)?
                    };
                    if self.beats(&[card], level, target) {
                        return Some(vec![card]);
                    }
                }
            }
            HandType::Pair | HandType::Trips => {
                let width = if target.hand_type == HandType::Pair { 2 } else { 3 };
                for (&value, cards) in &by_value {
                    if value <= target.value || cards.len() < width {
                        continue;
                    }
                    let candidate: Vec<Card> = cards[..width].to_vec();
                    if self.beats(&candidate, level, target) {
                        return Some(candidate);
                    }
                }
            }
            // Compound shapes are only ever answered with bombs.
            _ => {}
        }

        // Bomb fallback: smallest bomb that takes the trick.
        for (_, cards) in &by_value {
            if cards.len() < 4 {
                continue;
            }
            for size in 4..=cards.len() {
                let candidate: Vec<Card> = cards[..size].to_vec();
                if self.beats(&candidate, level, target) {
                    return Some(candidate);
                }
            }
        }

        // Four kings as the last resort.
        let jokers: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|c| c.rank == Rank::SmallJoker || c.rank == Rank::BigJoker)
            .collect();
        if jokers.len() == 4 && self.beats(&jokers, level, target) {
            return Some(jokers);
        }

        None
    }
}

// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::cards::{Card, Rank, NATURAL_RANKS};
use crate::domain::deck::make_deck;

/// Any natural rank usable as a level (2..=Ace).
pub fn level() -> impl Strategy<Value = Rank> {
    prop::sample::select(NATURAL_RANKS.to_vec())
}

/// A single card drawn from the 108-card stack.
pub fn card() -> impl Strategy<Value = Card> {
    (0..make_deck().len()).prop_map(|i| make_deck()[i])
}

/// A duplicate-free subset of the stack (identity-wise), 1..=max cards.
pub fn card_subset(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(make_deck(), 1..=max)
}

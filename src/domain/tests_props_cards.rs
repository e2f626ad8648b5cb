//! Property tests for deck and card operations (pure domain).
//!
//! Properties tested:
//! - Shuffling is a permutation of the stack
//! - Descending sort and level promotion are idempotent
//! - The largest card is the head of the descending sort

use proptest::prelude::*;

use crate::domain::cards::{promote_for_level, sort_descending};
use crate::domain::deck::{make_deck, shuffle_with_seed, DECK_SIZE};
use crate::domain::hands::largest_card;
use crate::domain::test_gens;

proptest! {
    #[test]
    fn prop_shuffle_is_permutation(seed in any::<u64>()) {
        let mut deck = make_deck();
        shuffle_with_seed(&mut deck, seed);
        prop_assert_eq!(deck.len(), DECK_SIZE);

        let mut shuffled: Vec<String> = deck.iter().map(|c| c.to_string()).collect();
        shuffled.sort();
        let mut original: Vec<String> = make_deck().iter().map(|c| c.to_string()).collect();
        original.sort();
        prop_assert_eq!(shuffled, original);
    }

    #[test]
    fn prop_sort_descending_is_idempotent(
        cards in test_gens::card_subset(27),
        level in test_gens::level(),
    ) {
        let once = sort_descending(cards, level);
        let twice = sort_descending(once.clone(), level);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_promote_is_idempotent(
        cards in test_gens::card_subset(27),
        level in test_gens::level(),
    ) {
        let once = promote_for_level(&cards, level);
        let twice = promote_for_level(&once, level);
        prop_assert_eq!(&once, &twice);
        for (a, b) in once.iter().zip(twice.iter()) {
            prop_assert_eq!(a.level_card, b.level_card);
            prop_assert_eq!(a.wild, b.wild);
        }
    }

    #[test]
    fn prop_largest_is_head_of_descending_sort(
        cards in test_gens::card_subset(27),
        level in test_gens::level(),
    ) {
        let sorted = sort_descending(cards.clone(), level);
        let largest = largest_card(&cards, level);
        prop_assert_eq!(
            largest.map(|c| c.logic_value(level)),
            sorted.first().map(|c| c.logic_value(level))
        );
    }
}

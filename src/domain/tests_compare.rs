//! Comparator unit tests: the bomb ladder and type-for-type compares.

use crate::domain::cards::{parse_cards, Rank};
use crate::domain::compare::compare_hands;
use crate::domain::hands::{classify, HandClass};

fn hand(tokens: &[&str], level: Rank) -> HandClass {
    classify(&parse_cards(tokens), level).expect("legal hand")
}

#[test]
fn four_kings_beats_everything() {
    let kings = hand(&["J-SJ-0", "J-SJ-1", "J-BJ-0", "J-BJ-1"], Rank::Two);
    let eight_bomb = hand(
        &["S-4-0", "C-4-0", "D-4-0", "H-4-0", "S-4-1", "C-4-1", "D-4-1", "H-4-1"],
        Rank::Two,
    );
    let flush = hand(&["S-3-0", "S-4-0", "S-5-0", "S-6-0", "S-7-0"], Rank::Two);
    let pair = hand(&["S-A-0", "C-A-0"], Rank::Two);
    for other in [&eight_bomb, &flush, &pair] {
        assert!(compare_hands(&kings, other) > 0);
        assert!(compare_hands(other, &kings) < 0);
    }
}

#[test]
fn bomb_ladder_ordering() {
    let four_bomb = hand(&["S-4-0", "C-4-0", "D-4-0", "H-4-0"], Rank::Two);
    let five_bomb = hand(&["S-4-0", "C-4-0", "D-4-0", "H-4-0", "S-4-1"], Rank::Two);
    let flush = hand(&["S-3-0", "S-4-0", "S-5-0", "S-6-0", "S-7-0"], Rank::Two);
    let six_bomb = hand(
        &["S-5-0", "C-5-0", "D-5-0", "H-5-0", "S-5-1", "C-5-1"],
        Rank::Two,
    );

    // FourKings > 6+-bomb > StraightFlush > 5-bomb > 4-bomb.
    assert!(compare_hands(&five_bomb, &four_bomb) > 0);
    assert!(compare_hands(&flush, &five_bomb) > 0);
    assert!(compare_hands(&six_bomb, &flush) > 0);
    assert!(compare_hands(&four_bomb, &flush) < 0);
}

#[test]
fn bomb_beats_any_non_bomb() {
    let four_bomb = hand(&["S-2-0", "C-2-0", "D-2-0", "H-2-0"], Rank::Three);
    let full = hand(&["S-A-0", "C-A-0", "D-A-0", "S-K-0", "C-K-0"], Rank::Three);
    let straight = hand(&["S-T-0", "C-J-0", "D-Q-0", "H-K-0", "S-A-0"], Rank::Three);
    for other in [&full, &straight] {
        assert!(compare_hands(&four_bomb, other) > 0);
        assert!(compare_hands(other, &four_bomb) < 0);
    }
}

#[test]
fn same_score_bombs_compare_by_value() {
    let nines = hand(&["S-9-0", "C-9-0", "D-9-0", "H-9-0"], Rank::Two);
    let kings = hand(&["S-K-0", "C-K-0", "D-K-0", "H-K-0"], Rank::Two);
    let level_bomb = hand(&["S-5-0", "C-5-0", "D-5-0", "S-5-1"], Rank::Five);
    assert!(compare_hands(&kings, &nines) > 0);
    assert!(compare_hands(&level_bomb, &kings) > 0);
    assert_eq!(compare_hands(&nines, &nines.clone()), 0);
}

#[test]
fn straight_flushes_compare_by_top_card() {
    let low = hand(&["S-3-0", "S-4-0", "S-5-0", "S-6-0", "S-7-0"], Rank::Two);
    let high = hand(&["H-5-0", "H-6-0", "H-7-0", "H-8-0", "H-9-0"], Rank::Two);
    assert!(compare_hands(&high, &low) > 0);
    assert!(compare_hands(&low, &high) < 0);
}

#[test]
fn non_bombs_compare_only_type_for_type() {
    let pair_nine = hand(&["S-9-0", "C-9-0"], Rank::Two);
    let pair_jack = hand(&["S-J-0", "C-J-0"], Rank::Two);
    let single_ace = hand(&["S-A-0"], Rank::Two);
    let trips = hand(&["S-4-0", "C-4-0", "D-4-0"], Rank::Two);

    assert!(compare_hands(&pair_jack, &pair_nine) > 0);
    assert!(compare_hands(&pair_nine, &pair_jack) < 0);

    // Incomparable shapes: zero both ways, meaning "does not beat".
    assert_eq!(compare_hands(&pair_nine, &single_ace), 0);
    assert_eq!(compare_hands(&single_ace, &pair_nine), 0);
    assert_eq!(compare_hands(&trips, &pair_nine), 0);
}

#[test]
fn level_card_single_outranks_ace() {
    let level_single = hand(&["D-5-0"], Rank::Five);
    let ace = hand(&["S-A-0"], Rank::Five);
    let small_joker = hand(&["J-SJ-0"], Rank::Five);
    assert!(compare_hands(&level_single, &ace) > 0);
    assert!(compare_hands(&small_joker, &level_single) > 0);
}

#[test]
fn equal_values_do_not_beat() {
    let a = hand(&["S-9-0", "C-9-0"], Rank::Two);
    let b = hand(&["S-9-1", "C-9-1"], Rank::Two);
    assert_eq!(compare_hands(&a, &b), 0);
    assert_eq!(compare_hands(&b, &a), 0);
}

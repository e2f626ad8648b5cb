//! Classifier unit tests: shapes, wild absorption, boundary behaviours.

use crate::domain::cards::{parse_cards, Rank};
use crate::domain::hands::{classify, HandType};

fn classify_ok(tokens: &[&str], level: Rank) -> (HandType, u8) {
    let class = classify(&parse_cards(tokens), level).expect("legal hand");
    (class.hand_type, class.value)
}

fn classify_err(tokens: &[&str], level: Rank) -> bool {
    classify(&parse_cards(tokens), level).is_err()
}

#[test]
fn singles() {
    assert_eq!(classify_ok(&["S-9-0"], Rank::Two), (HandType::Single, 9));
    // Level card is 19 regardless of suit.
    assert_eq!(classify_ok(&["S-7-0"], Rank::Seven), (HandType::Single, 19));
    assert_eq!(classify_ok(&["H-7-0"], Rank::Seven), (HandType::Single, 19));
    assert_eq!(classify_ok(&["J-SJ-0"], Rank::Two), (HandType::Single, 20));
    assert_eq!(classify_ok(&["J-BJ-0"], Rank::Two), (HandType::Single, 21));
}

#[test]
fn pairs_with_wild_absorption() {
    assert_eq!(
        classify_ok(&["S-9-0", "C-9-1"], Rank::Two),
        (HandType::Pair, 9)
    );
    // Wild absorbs into a natural rank.
    assert_eq!(
        classify_ok(&["H-5-0", "S-K-0"], Rank::Five),
        (HandType::Pair, 13)
    );
    // Two wilds are a pair of level cards.
    assert_eq!(
        classify_ok(&["H-5-0", "H-5-1"], Rank::Five),
        (HandType::Pair, 19)
    );
    // Jokers pair naturally but a wild may not stand in for one.
    assert_eq!(
        classify_ok(&["J-SJ-0", "J-SJ-1"], Rank::Five),
        (HandType::Pair, 20)
    );
    assert!(classify_err(&["H-5-0", "J-BJ-0"], Rank::Five));
    assert!(classify_err(&["S-9-0", "C-8-0"], Rank::Two));
}

#[test]
fn trips_with_wild_absorption() {
    assert_eq!(
        classify_ok(&["S-9-0", "C-9-1", "D-9-0"], Rank::Two),
        (HandType::Trips, 9)
    );
    assert_eq!(
        classify_ok(&["S-9-0", "C-9-1", "H-5-0"], Rank::Five),
        (HandType::Trips, 9)
    );
    assert!(classify_err(&["S-9-0", "C-9-1", "D-8-0"], Rank::Two));
}

#[test]
fn four_kings() {
    assert_eq!(
        classify_ok(&["J-SJ-0", "J-SJ-1", "J-BJ-0", "J-BJ-1"], Rank::Two),
        (HandType::FourKings, 21)
    );
    // Three jokers plus something are not a hand.
    assert!(classify_err(&["J-SJ-0", "J-SJ-1", "J-BJ-0", "S-A-0"], Rank::Two));
}

#[test]
fn bombs() {
    let (t, v) = classify_ok(&["S-9-0", "C-9-0", "D-9-0", "H-9-0"], Rank::Two);
    assert_eq!((t, v), (HandType::Bomb, 9));

    // A wild completes a bomb.
    assert_eq!(
        classify_ok(&["S-9-0", "C-9-0", "D-9-0", "H-5-0"], Rank::Five),
        (HandType::Bomb, 9)
    );

    // Six and eight card bombs.
    assert_eq!(
        classify_ok(
            &["S-4-0", "C-4-0", "D-4-0", "H-4-0", "S-4-1", "C-4-1"],
            Rank::Two
        ),
        (HandType::Bomb, 4)
    );
    assert_eq!(
        classify_ok(
            &["S-4-0", "C-4-0", "D-4-0", "H-4-0", "S-4-1", "C-4-1", "D-4-1", "H-4-1"],
            Rank::Two
        ),
        (HandType::Bomb, 4)
    );

    // Level-card bombs carry the level value.
    assert_eq!(
        classify_ok(&["S-5-0", "C-5-0", "D-5-0", "S-5-1"], Rank::Five),
        (HandType::Bomb, 19)
    );
}

#[test]
fn five_of_a_rank_is_a_bomb_not_trips_with_pair() {
    let class = classify(
        &parse_cards(&["S-9-0", "C-9-0", "D-9-0", "S-9-1", "H-5-0"]),
        Rank::Five,
    )
    .unwrap();
    assert_eq!(class.hand_type, HandType::Bomb);
    assert_eq!(class.bomb_count, Some(5));
}

#[test]
fn trips_with_pair() {
    assert_eq!(
        classify_ok(&["S-8-0", "C-8-0", "D-8-0", "S-9-0", "C-9-0"], Rank::Two),
        (HandType::TripsWithPair, 8)
    );
    // Pair of jokers rides along.
    assert_eq!(
        classify_ok(&["S-8-0", "C-8-0", "D-8-0", "J-SJ-0", "J-SJ-1"], Rank::Two),
        (HandType::TripsWithPair, 8)
    );
    // No wild substitution inside the 3+2 shape.
    assert!(classify_err(
        &["S-8-0", "C-8-0", "H-5-0", "S-9-0", "C-9-0"],
        Rank::Five
    ));
}

#[test]
fn straights() {
    assert_eq!(
        classify_ok(&["S-3-0", "C-4-0", "D-5-0", "H-6-0", "S-7-0"], Rank::Two),
        (HandType::Straight, 7)
    );
    // Ace-low straight carries value 5.
    assert_eq!(
        classify_ok(&["S-A-0", "C-2-0", "D-3-0", "H-4-0", "S-5-0"], Rank::Two),
        (HandType::Straight, 5)
    );
    // Ace-high.
    assert_eq!(
        classify_ok(&["S-T-0", "C-J-0", "D-Q-0", "H-K-0", "S-A-0"], Rank::Two),
        (HandType::Straight, 14)
    );
    // The level card plays at its face rank inside a straight.
    assert_eq!(
        classify_ok(&["S-3-0", "C-4-0", "S-5-0", "H-6-0", "S-7-0"], Rank::Five),
        (HandType::Straight, 7)
    );
    // Jokers never extend a straight, and Q-K-A-2-3 does not wrap.
    assert!(classify_err(
        &["S-J-0", "C-Q-0", "D-K-0", "H-A-0", "J-SJ-0"],
        Rank::Two
    ));
    assert!(classify_err(
        &["S-Q-0", "C-K-0", "D-A-0", "H-2-0", "S-3-0"],
        Rank::Two
    ));
}

#[test]
fn straight_flush_is_single_suited() {
    let class = classify(
        &parse_cards(&["S-3-0", "S-4-0", "S-5-0", "S-6-0", "S-7-0"]),
        Rank::Two,
    )
    .unwrap();
    assert_eq!(class.hand_type, HandType::StraightFlush);
    assert_eq!(class.value, 7);
    assert_eq!(class.bomb_count, Some(5));
}

#[test]
fn tubes() {
    assert_eq!(
        classify_ok(
            &["S-3-0", "C-3-0", "D-4-0", "H-4-0", "S-5-0", "C-5-0"],
            Rank::Two
        ),
        (HandType::Tube, 5)
    );
    // Ace-low tube.
    assert_eq!(
        classify_ok(
            &["S-A-0", "C-A-0", "D-2-0", "H-2-0", "S-3-0", "C-3-0"],
            Rank::Two
        ),
        (HandType::Tube, 3)
    );
    assert!(classify_err(
        &["S-3-0", "C-3-0", "D-5-0", "H-5-0", "S-7-0", "C-7-0"],
        Rank::Two
    ));
}

#[test]
fn plates() {
    assert_eq!(
        classify_ok(
            &["S-8-0", "C-8-0", "D-8-0", "S-9-0", "C-9-0", "D-9-0"],
            Rank::Two
        ),
        (HandType::Plate, 9)
    );
    // Ace-low plate.
    assert_eq!(
        classify_ok(
            &["S-A-0", "C-A-0", "D-A-0", "S-2-0", "C-2-0", "D-2-0"],
            Rank::Three
        ),
        (HandType::Plate, 2)
    );
    assert!(classify_err(
        &["S-8-0", "C-8-0", "D-8-0", "S-T-0", "C-T-0", "D-T-0"],
        Rank::Two
    ));
}

#[test]
fn garbage_is_rejected() {
    assert!(classify_err(&[], Rank::Two));
    assert!(classify_err(&["S-3-0", "C-9-0", "D-K-0", "H-4-0", "S-7-0"], Rank::Two));
    assert!(classify_err(
        &["S-3-0", "C-3-1", "D-4-0", "H-4-1", "S-5-0", "C-9-0"],
        Rank::Two
    ));
}

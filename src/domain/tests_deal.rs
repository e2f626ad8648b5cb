//! Deal engine unit tests: turn protocol, tribute, termination.

use crate::domain::cards::{parse_cards, Card, Rank};
use crate::domain::deal::{DealEngine, DealPhase};
use crate::domain::state::SEATS;
use crate::errors::domain::DomainError;

fn hands(per_seat: [&[&str]; SEATS]) -> [Vec<Card>; SEATS] {
    [
        parse_cards(per_seat[0]),
        parse_cards(per_seat[1]),
        parse_cards(per_seat[2]),
        parse_cards(per_seat[3]),
    ]
}

fn engine_with(
    level: Rank,
    active_team: u8,
    prev: Option<[u8; 4]>,
    per_seat: [&[&str]; SEATS],
) -> DealEngine {
    let mut engine = DealEngine::new(level, active_team, prev);
    engine.start_with_hands(hands(per_seat)).unwrap();
    engine
}

#[test]
fn fresh_match_lead_follows_active_team() {
    let e = engine_with(
        Rank::Two,
        0,
        None,
        [&["S-3-0"], &["S-4-0"], &["S-5-0"], &["S-6-0"]],
    );
    assert_eq!(e.phase, DealPhase::Playing);
    assert_eq!(e.turn, Some(0));

    let e = engine_with(
        Rank::Two,
        1,
        None,
        [&["S-3-0"], &["S-4-0"], &["S-5-0"], &["S-6-0"]],
    );
    assert_eq!(e.turn, Some(1));
}

#[test]
fn seeded_start_deals_27_per_seat() {
    let mut e = DealEngine::new(Rank::Two, 0, None);
    e.start(42).unwrap();
    for seat in 0..SEATS as u8 {
        assert_eq!(e.hand(seat).len(), 27);
    }
    assert_eq!(e.card_count(), 108);
}

#[test]
fn play_rejects_out_of_turn_and_wrong_phase() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [&["S-3-0"], &["S-4-0"], &["S-5-0"], &["S-6-0"]],
    );
    let card = parse_cards(&["S-4-0"]);
    assert_eq!(e.play_hand(1, &card), Err(DomainError::OutOfTurn));

    let mut waiting = DealEngine::new(Rank::Two, 0, None);
    assert_eq!(
        waiting.play_hand(0, &card),
        Err(DomainError::PhaseMismatch)
    );
}

#[test]
fn play_requires_cards_from_own_hand() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [&["S-3-0", "C-9-0"], &["S-4-0"], &["S-5-0"], &["S-6-0"]],
    );
    // Not held at all.
    assert_eq!(
        e.play_hand(0, &parse_cards(&["D-K-0"])),
        Err(DomainError::CardNotInHand)
    );
    // Same identity tag twice.
    assert_eq!(
        e.play_hand(0, &parse_cards(&["C-9-0", "C-9-0"])),
        Err(DomainError::CardNotInHand)
    );
}

#[test]
fn follow_must_strictly_beat() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [
            &["S-9-0", "S-3-0"],
            &["C-9-1", "C-8-0"],
            &["S-5-0"],
            &["S-6-0"],
        ],
    );
    e.play_hand(0, &parse_cards(&["S-9-0"])).unwrap();
    // Equal value does not beat.
    assert_eq!(
        e.play_hand(1, &parse_cards(&["C-9-1"])),
        Err(DomainError::NotBigEnough)
    );
    assert_eq!(
        e.play_hand(1, &parse_cards(&["C-8-0"])),
        Err(DomainError::NotBigEnough)
    );
    // Rejections retain the turn.
    assert_eq!(e.turn, Some(1));
}

#[test]
fn pass_cycle_returns_to_aggressor_with_free_lead() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [
            &["S-K-0", "S-3-0"],
            &["C-9-1", "C-8-0"],
            &["S-5-0", "D-5-0"],
            &["S-6-0", "D-6-0"],
        ],
    );
    e.play_hand(0, &parse_cards(&["S-K-0"])).unwrap();
    e.pass(1).unwrap();
    e.pass(2).unwrap();
    e.pass(3).unwrap();
    assert_eq!(e.turn, Some(0));
    assert!(e.last_play.is_none());
    assert!(e.round_actions.iter().all(Option::is_none));
    // Free lead: passing is now illegal.
    assert_eq!(e.pass(0), Err(DomainError::CannotPassFreeLead));
}

#[test]
fn finished_seats_are_skipped() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [
            &["S-3-0", "S-9-0"],
            &["C-4-0"],
            &["S-5-0", "D-5-0"],
            &["S-6-0", "D-6-0"],
        ],
    );
    e.play_hand(0, &parse_cards(&["S-3-0"])).unwrap();
    e.play_hand(1, &parse_cards(&["C-4-0"])).unwrap(); // seat 1 finishes
    assert_eq!(e.winners, vec![1]);
    e.play_hand(2, &parse_cards(&["S-5-0"])).unwrap();
    e.pass(3).unwrap();
    assert_eq!(e.turn, Some(0));
    // Seat 0 passes; the scan skips emptied seat 1 and reaches the
    // aggressor, closing the trick with seat 2 on the lead.
    e.pass(0).unwrap();
    assert_eq!(e.turn, Some(2));
    assert!(e.last_play.is_none());
}

#[test]
fn jiefeng_passes_the_lead_to_the_partner() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [
            &["S-K-0"],
            &["C-9-1", "C-8-0"],
            &["S-5-0", "D-5-0"],
            &["S-6-0", "D-6-0"],
        ],
    );
    // Seat 0 goes out on its own lead; everyone passes.
    e.play_hand(0, &parse_cards(&["S-K-0"])).unwrap();
    assert_eq!(e.winners, vec![0]);
    e.pass(1).unwrap();
    e.pass(2).unwrap();
    e.pass(3).unwrap();
    // Trick cycles back to the emptied aggressor: partner takes the wind.
    assert_eq!(e.phase, DealPhase::Playing);
    assert_eq!(e.turn, Some(2));
    assert!(e.last_play.is_none());
}

#[test]
fn double_win_ends_the_deal() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [
            &["S-3-0"],
            &["C-9-1", "C-8-0"],
            &["S-K-0"],
            &["S-6-0", "D-6-0"],
        ],
    );
    e.play_hand(0, &parse_cards(&["S-3-0"])).unwrap();
    e.pass(1).unwrap();
    e.play_hand(2, &parse_cards(&["S-K-0"])).unwrap();
    // Both members of team 0 are out: immediate Score.
    assert_eq!(e.phase, DealPhase::Score);
    assert_eq!(e.winners, vec![0, 2, 1, 3]);
    assert_eq!(e.turn, None);
}

#[test]
fn third_finisher_forces_the_last_seat() {
    let mut e = engine_with(
        Rank::Two,
        0,
        None,
        [
            &["S-3-0"],
            &["C-9-0"],
            &["S-5-0", "D-5-0", "D-9-0"],
            &["S-K-0"],
        ],
    );
    e.play_hand(0, &parse_cards(&["S-3-0"])).unwrap();
    e.play_hand(1, &parse_cards(&["C-9-0"])).unwrap();
    e.pass(2).unwrap();
    e.play_hand(3, &parse_cards(&["S-K-0"])).unwrap();
    assert_eq!(e.phase, DealPhase::Score);
    assert_eq!(e.winners, vec![0, 1, 3, 2]);
}

#[test]
fn tribute_payment_must_be_largest_card() {
    let mut e = engine_with(
        Rank::Two,
        0,
        Some([0, 1, 2, 3]),
        [
            &["S-3-0", "S-4-0"],
            &["C-9-1"],
            &["S-5-0"],
            &["S-A-0", "C-7-0"],
        ],
    );
    assert_eq!(e.phase, DealPhase::Tribute);
    assert_eq!(e.pending_tribute_payers(), vec![3]);
    // Not the largest card.
    assert_eq!(
        e.pay_tribute(3, parse_cards(&["C-7-0"])[0]),
        Err(DomainError::WrongTributeCard)
    );
    // A non-payer is out of turn.
    assert_eq!(
        e.pay_tribute(1, parse_cards(&["C-9-1"])[0]),
        Err(DomainError::OutOfTurn)
    );

    e.pay_tribute(3, parse_cards(&["S-A-0"])[0]).unwrap();
    assert_eq!(e.phase, DealPhase::ReturnTribute);
    // The ace landed in seat 0's hand.
    assert!(e.hand(0).iter().any(|c| c.to_string() == "S-A-0"));
    assert_eq!(e.pending_return_payers(), vec![0]);

    e.return_tribute(0, parse_cards(&["S-3-0"])[0]).unwrap();
    assert_eq!(e.phase, DealPhase::Playing);
    // The single payer leads.
    assert_eq!(e.turn, Some(3));
    assert!(e.hand(3).iter().any(|c| c.to_string() == "S-3-0"));
}

#[test]
fn double_win_tribute_lead_goes_to_larger_tribute() {
    // Previous order [0, 2, 1, 3]: double win, 3 pays 0 and 1 pays 2.
    let mut e = engine_with(
        Rank::Two,
        0,
        Some([0, 2, 1, 3]),
        [
            &["S-3-0"],
            &["S-A-0", "C-4-0"],
            &["S-5-0"],
            &["S-K-0", "C-7-0"],
        ],
    );
    assert_eq!(e.phase, DealPhase::Tribute);
    e.pay_tribute(3, parse_cards(&["S-K-0"])[0]).unwrap();
    e.pay_tribute(1, parse_cards(&["S-A-0"])[0]).unwrap();
    assert_eq!(e.phase, DealPhase::ReturnTribute);

    e.return_tribute(0, parse_cards(&["S-3-0"])[0]).unwrap();
    e.return_tribute(2, parse_cards(&["S-5-0"])[0]).unwrap();
    // Seat 1 paid the ace: it leads.
    assert_eq!(e.phase, DealPhase::Playing);
    assert_eq!(e.turn, Some(1));
}

#[test]
fn tie_order_skips_tribute() {
    let e = engine_with(
        Rank::Two,
        0,
        Some([0, 1, 3, 2]),
        [&["S-3-0"], &["S-4-0"], &["S-5-0"], &["S-6-0"]],
    );
    assert_eq!(e.phase, DealPhase::Playing);
    assert_eq!(e.turn, Some(0));
    assert!(e.tribute.is_none());
}

#[test]
fn card_conservation_across_plays() {
    let mut e = DealEngine::new(Rank::Two, 0, None);
    e.start(7).unwrap();
    assert_eq!(e.card_count(), 108);
    let lead = e.turn.unwrap();
    let smallest = e.smallest_in_hand(lead).unwrap();
    e.play_hand(lead, &[smallest]).unwrap();
    assert_eq!(e.card_count(), 108);
    assert_eq!(e.played.len(), 1);
}

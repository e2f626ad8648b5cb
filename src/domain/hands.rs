//! Hand classification: shapes, wild absorption and logic values.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::cards::{sort_descending, Card, Rank};
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HandType {
    Single,
    Pair,
    Trips,
    TripsWithPair,
    Straight,
    Tube,
    Plate,
    Bomb,
    StraightFlush,
    FourKings,
}

/// Result of classifying a candidate play.
///
/// `value` is the logic value of the defining rank (face 2..=14 for the
/// sequence shapes, 19 for the level rank, 20/21 for jokers).
/// `bomb_count` is set for Bomb and StraightFlush only.
#[derive(Debug, Clone, PartialEq)]
pub struct HandClass {
    pub hand_type: HandType,
    pub cards: Vec<Card>,
    pub value: u8,
    pub bomb_count: Option<u8>,
}

impl HandClass {
    fn new(hand_type: HandType, cards: &[Card], level: Rank, value: u8) -> Self {
        let bomb_count = match hand_type {
            HandType::Bomb | HandType::StraightFlush => Some(cards.len() as u8),
            _ => None,
        };
        Self {
            hand_type,
            cards: sort_descending(cards.to_vec(), level),
            value,
            bomb_count,
        }
    }
}

/// Classify a candidate multiset of cards under the active level.
///
/// Wild absorption (the heart level card standing in for another rank)
/// applies to Pair, Trips and Bomb; a set made purely of wilds classifies
/// at the level rank. All other shapes are natural: every card counts at
/// its own rank, the level card at its face rank inside sequences.
pub fn classify(cards: &[Card], level: Rank) -> Result<HandClass, DomainError> {
    match cards.len() {
        0 => Err(invalid("empty play")),
        1 => {
            let value = cards[0].logic_value(level);
            Ok(HandClass::new(HandType::Single, cards, level, value))
        }
        2 => absorb_uniform(cards, level)
            .map(|v| HandClass::new(HandType::Pair, cards, level, v))
            .ok_or_else(|| invalid("not a pair")),
        3 => absorb_uniform(cards, level)
            .map(|v| HandClass::new(HandType::Trips, cards, level, v))
            .ok_or_else(|| invalid("not trips")),
        4 => {
            if is_four_kings(cards) {
                return Ok(HandClass::new(
                    HandType::FourKings,
                    cards,
                    level,
                    Rank::BigJoker.face_value(),
                ));
            }
            absorb_uniform(cards, level)
                .map(|v| HandClass::new(HandType::Bomb, cards, level, v))
                .ok_or_else(|| invalid("not a legal 4-card hand"))
        }
        5 => {
            // Five of a rank (with wilds) is a 5-bomb, never trips-with-pair.
            if let Some(v) = absorb_uniform(cards, level) {
                return Ok(HandClass::new(HandType::Bomb, cards, level, v));
            }
            if let Some(v) = trips_with_pair_value(cards, level) {
                return Ok(HandClass::new(HandType::TripsWithPair, cards, level, v));
            }
            if let Some(v) = straight_value(cards) {
                let hand_type = if single_suited(cards) {
                    HandType::StraightFlush
                } else {
                    HandType::Straight
                };
                return Ok(HandClass::new(hand_type, cards, level, v));
            }
            Err(invalid("not a legal 5-card hand"))
        }
        6 => {
            if let Some(v) = absorb_uniform(cards, level) {
                return Ok(HandClass::new(HandType::Bomb, cards, level, v));
            }
            if let Some(v) = run_of_groups(cards, 2) {
                return Ok(HandClass::new(HandType::Tube, cards, level, v));
            }
            if let Some(v) = run_of_groups(cards, 3) {
                return Ok(HandClass::new(HandType::Plate, cards, level, v));
            }
            Err(invalid("not a legal 6-card hand"))
        }
        _ => absorb_uniform(cards, level)
            .map(|v| HandClass::new(HandType::Bomb, cards, level, v))
            .ok_or_else(|| invalid("not a legal hand")),
    }
}

fn invalid(detail: &str) -> DomainError {
    DomainError::InvalidHand(detail.to_string())
}

/// All cards share one logic value after absorbing wilds; returns that
/// value, or None if the set is not uniform. A wild may only stand in for
/// ranks up to Ace (and the level rank itself), never for a joker.
fn absorb_uniform(cards: &[Card], level: Rank) -> Option<u8> {
    let mut wilds = 0usize;
    let mut value: Option<u8> = None;
    for card in cards {
        if card.is_wild(level) {
            wilds += 1;
            continue;
        }
        let v = card.logic_value(level);
        match value {
            None => value = Some(v),
            Some(existing) if existing == v => {}
            Some(_) => return None,
        }
    }
    match value {
        // Pure wilds classify at the level rank.
        None => Some(19),
        Some(v) if v >= 20 && wilds > 0 => None,
        Some(v) => Some(v),
    }
}

fn is_four_kings(cards: &[Card]) -> bool {
    cards.len() == 4
        && cards.iter().filter(|c| c.rank == Rank::SmallJoker).count() == 2
        && cards.iter().filter(|c| c.rank == Rank::BigJoker).count() == 2
}

/// Frequency map of logic values with wilds counted at their own rank (19).
fn logic_counts(cards: &[Card], level: Rank) -> BTreeMap<u8, u8> {
    let mut counts = BTreeMap::new();
    for card in cards {
        *counts.entry(card.logic_value(level)).or_insert(0) += 1;
    }
    counts
}

fn trips_with_pair_value(cards: &[Card], level: Rank) -> Option<u8> {
    let counts = logic_counts(cards, level);
    if counts.len() != 2 {
        return None;
    }
    let mut trips_value = None;
    for (&v, &n) in &counts {
        match n {
            3 => trips_value = Some(v),
            2 => {}
            _ => return None,
        }
    }
    trips_value
}

/// Frequency map of face values; None if the set contains a joker.
fn face_counts(cards: &[Card]) -> Option<BTreeMap<u8, u8>> {
    let mut counts = BTreeMap::new();
    for card in cards {
        if card.rank.is_joker() {
            return None;
        }
        *counts.entry(card.rank.face_value()).or_insert(0u8) += 1;
    }
    Some(counts)
}

/// Value of a run of `group` copies of consecutive face ranks, A-low or
/// A-high; None if the cards do not form one.
fn run_of_groups(cards: &[Card], group: u8) -> Option<u8> {
    let counts = face_counts(cards)?;
    let expected = cards.len() / group as usize;
    if counts.len() != expected || counts.values().any(|&n| n != group) {
        return None;
    }
    let faces: Vec<u8> = counts.keys().copied().collect();
    run_top(&faces)
}

/// Top value of a consecutive face sequence. The ace plays high or low:
/// [2, 3, 14] reads as A-2-3 with value 3.
fn run_top(sorted_faces: &[u8]) -> Option<u8> {
    let consecutive = |faces: &[u8]| faces.windows(2).all(|w| w[1] == w[0] + 1);
    if consecutive(sorted_faces) {
        return sorted_faces.last().copied();
    }
    if sorted_faces.last() == Some(&14) {
        let mut low = vec![1u8];
        low.extend_from_slice(&sorted_faces[..sorted_faces.len() - 1]);
        if consecutive(&low) {
            return low.last().copied();
        }
    }
    None
}

fn straight_value(cards: &[Card]) -> Option<u8> {
    let counts = face_counts(cards)?;
    if counts.len() != 5 || counts.values().any(|&n| n != 1) {
        return None;
    }
    let faces: Vec<u8> = counts.keys().copied().collect();
    run_top(&faces)
}

fn single_suited(cards: &[Card]) -> bool {
    cards.windows(2).all(|w| w[0].suit == w[1].suit)
}

/// Largest card by logic value: the head of the descending sort.
pub fn largest_card(cards: &[Card], level: Rank) -> Option<Card> {
    cards
        .iter()
        .copied()
        .max_by(|a, b| {
            a.logic_value(level)
                .cmp(&b.logic_value(level))
                .then(a.suit.cmp(&b.suit))
        })
}

/// Smallest card by logic value: the tail of the descending sort.
pub fn smallest_card(cards: &[Card], level: Rank) -> Option<Card> {
    cards
        .iter()
        .copied()
        .min_by(|a, b| {
            a.logic_value(level)
                .cmp(&b.logic_value(level))
                .then(a.suit.cmp(&b.suit))
        })
}

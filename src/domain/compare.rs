//! Hand comparison: the bomb ladder and type-for-type value compare.

use crate::domain::hands::{HandClass, HandType};

/// Ladder score on a doubled integer scale so the straight flush slots
/// between the 5-bomb (10) and the 6-bomb (12): bomb = 2 x count,
/// straight flush = 11, four kings above everything.
fn ladder_score(hand: &HandClass) -> Option<u16> {
    match hand.hand_type {
        HandType::FourKings => Some(u16::MAX),
        HandType::StraightFlush => Some(11),
        HandType::Bomb => hand.bomb_count.map(|c| c as u16 * 2),
        _ => None,
    }
}

/// Spaceship-style comparison of two classified hands.
///
/// Returns > 0 when `a` beats `b`, < 0 when `b` beats `a`, and 0 when
/// neither beats the other (equal, or incomparable shapes). Callers must
/// treat 0 as "does not beat".
pub fn compare_hands(a: &HandClass, b: &HandClass) -> i8 {
    match (ladder_score(a), ladder_score(b)) {
        (Some(sa), Some(sb)) => {
            if sa != sb {
                sign(sa as i32 - sb as i32)
            } else {
                sign(a.value as i32 - b.value as i32)
            }
        }
        // Any bomb-family hand beats any non-bomb of any length or type.
        (Some(_), None) => 1,
        (None, Some(_)) => -1,
        (None, None) => {
            if a.hand_type == b.hand_type && a.cards.len() == b.cards.len() {
                sign(a.value as i32 - b.value as i32)
            } else {
                0
            }
        }
    }
}

fn sign(d: i32) -> i8 {
    match d.cmp(&0) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    }
}

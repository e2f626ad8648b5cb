//! Domain layer: pure game logic, no I/O.

pub mod cards;
pub mod compare;
pub mod deal;
pub mod deck;
pub mod hands;
pub mod match_flow;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod transitions;
pub mod tribute;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_compare;
#[cfg(test)]
mod tests_deal;
#[cfg(test)]
mod tests_hands;
#[cfg(test)]
mod tests_props_cards;

// Re-exports for ergonomics
pub use cards::{
    parse_cards, promote_for_level, sort_descending, try_parse_cards, Card, Rank, Suit,
};
pub use compare::compare_hands;
pub use deal::{DealEngine, DealPhase, LastPlay, RoundAction};
pub use hands::{classify, HandClass, HandType};
pub use match_flow::{MatchOutcome, MatchState};
pub use seed_derivation::derive_deal_seed;
pub use state::{partner_of, seat_offset, team_of, Seat, Team};

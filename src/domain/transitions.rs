use crate::domain::state::Seat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealTransition {
    /// Edge-triggered: the turn became a specific seat.
    TurnBecame { seat: Seat },
}

/// Derive transitions from before/after turn state.
///
/// Edge-triggered only: emit only on change, and only when the new turn
/// is `Some(_)` (there is nothing actionable about the turn clearing).
pub fn derive_transitions(before: Option<Seat>, after: Option<Seat>) -> Vec<DealTransition> {
    match (before, after) {
        (_, Some(seat)) if before != Some(seat) => {
            vec![DealTransition::TurnBecame { seat }]
        }
        _ => Vec::new(),
    }
}

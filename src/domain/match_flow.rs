//! Multi-deal match controller: level-up, banker switch, termination.

use crate::domain::cards::Rank;
use crate::domain::state::{other_team, same_team, team_of, Seat, Team};

/// Highest team level; a match can only be won from here.
pub const MAX_LEVEL: Rank = Rank::Ace;

/// Match-scoped state surviving across deals.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    /// Current level per team, 2..=Ace.
    pub team_levels: [Rank; 2],
    /// The banker team; its level is the active deal's level card rank.
    pub active_team: Team,
    /// Consecutive deal wins while already at the top level.
    pub consecutive_at_max: [u8; 2],
    /// Previous deal's finishing order, feeding the next deal's tribute.
    pub last_order: Option<[Seat; 4]>,
}

/// What a finished deal did to the match.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Continue {
        winning_team: Team,
        step: u8,
        new_level: Rank,
    },
    MatchOver {
        team: Team,
        levels: [Rank; 2],
    },
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            team_levels: [Rank::Two, Rank::Two],
            active_team: 0,
            consecutive_at_max: [0, 0],
            last_order: None,
        }
    }

    /// Level card rank for the next deal.
    pub fn deal_level(&self) -> Rank {
        self.team_levels[self.active_team as usize]
    }

    /// Fold a deal's finishing order into the match: termination check,
    /// level-up step, banker switch.
    pub fn apply_deal_result(&mut self, order: [Seat; 4]) -> MatchOutcome {
        let winning_team = team_of(order[0]);
        self.last_order = Some(order);

        if self.team_levels[winning_team as usize] == MAX_LEVEL {
            self.consecutive_at_max[winning_team as usize] += 1;
            self.consecutive_at_max[other_team(winning_team) as usize] = 0;
            if self.consecutive_at_max[winning_team as usize] >= 2 {
                return MatchOutcome::MatchOver {
                    team: winning_team,
                    levels: self.team_levels,
                };
            }
        } else {
            // Counters only accumulate at the top level.
            self.consecutive_at_max = [0, 0];
        }

        let step = level_up_step(order);
        let new_level = raise_level(self.team_levels[winning_team as usize], step);
        self.team_levels[winning_team as usize] = new_level;
        self.active_team = winning_team;

        MatchOutcome::Continue {
            winning_team,
            step,
            new_level,
        }
    }

    /// Host override: wipe match progress back to a fresh state.
    pub fn reset(&mut self) {
        *self = MatchState::new();
    }
}

/// Level-up step from a finishing order: double win +3, partner third +2,
/// otherwise +1.
pub fn level_up_step(order: [Seat; 4]) -> u8 {
    if same_team(order[0], order[1]) {
        3
    } else if same_team(order[0], order[2]) {
        2
    } else {
        1
    }
}

/// Raise a level by `step`, saturating at Ace.
pub fn raise_level(level: Rank, step: u8) -> Rank {
    let target = level.face_value().saturating_add(step).min(MAX_LEVEL.face_value());
    Rank::from_face_value(target).unwrap_or(MAX_LEVEL)
}

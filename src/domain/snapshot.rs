//! Per-seat tailored view of a live deal.
//!
//! The recipient's own hand is sent as full identity tags; every other
//! seat is reduced to a card count. Snapshots are idempotent: a client can
//! apply any snapshot at any time and end up consistent.

use serde::Serialize;

use crate::domain::deal::{DealEngine, DealPhase, RoundAction};
use crate::domain::hands::HandType;
use crate::domain::match_flow::MatchState;
use crate::domain::state::{Seat, Team, SEATS};

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HandView {
    Cards(Vec<String>),
    Count(usize),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastHandView {
    pub seat: Seat,
    pub hand_type: HandType,
    pub cards: Vec<String>,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RoundActionView {
    Played { cards: Vec<String> },
    Passed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TributeEdgeView {
    pub payer: Seat,
    pub recipient: Seat,
    pub settled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TributeView {
    pub debts: Vec<TributeEdgeView>,
    pub returns: Vec<TributeEdgeView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatePayload {
    pub phase: DealPhase,
    pub level: u8,
    pub current_turn: Option<Seat>,
    pub hands: Vec<HandView>,
    pub last_hand: Option<LastHandView>,
    pub round_actions: Vec<Option<RoundActionView>>,
    pub winners: Vec<Seat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tribute_state: Option<TributeView>,
    pub team_levels: [u8; 2],
    pub active_team: Team,
}

/// Build the snapshot a given seat is allowed to see.
pub fn game_state_for(
    engine: &DealEngine,
    match_state: &MatchState,
    viewer: Seat,
) -> GameStatePayload {
    let hands = (0..SEATS)
        .map(|seat| {
            if seat == viewer as usize {
                HandView::Cards(tags(&engine.hands[seat]))
            } else {
                HandView::Count(engine.hands[seat].len())
            }
        })
        .collect();

    let last_hand = engine.last_play.as_ref().map(|lp| LastHandView {
        seat: lp.seat,
        hand_type: lp.hand.hand_type,
        cards: tags(&lp.hand.cards),
        value: lp.hand.value,
    });

    let round_actions = engine
        .round_actions
        .iter()
        .map(|action| {
            action.as_ref().map(|a| match a {
                RoundAction::Played(class) => RoundActionView::Played {
                    cards: tags(&class.cards),
                },
                RoundAction::Passed => RoundActionView::Passed,
            })
        })
        .collect();

    let tribute_state = match engine.phase {
        DealPhase::Tribute | DealPhase::ReturnTribute => {
            engine.tribute.as_ref().map(|ts| TributeView {
                debts: ts
                    .debts
                    .iter()
                    .map(|d| TributeEdgeView {
                        payer: d.payer,
                        recipient: d.recipient,
                        settled: d.card.is_some(),
                    })
                    .collect(),
                returns: ts
                    .returns
                    .iter()
                    .map(|r| TributeEdgeView {
                        payer: r.payer,
                        recipient: r.recipient,
                        settled: r.card.is_some(),
                    })
                    .collect(),
            })
        }
        _ => None,
    };

    GameStatePayload {
        phase: engine.phase,
        level: engine.level.face_value(),
        current_turn: engine.turn,
        hands,
        last_hand,
        round_actions,
        winners: engine.winners.clone(),
        tribute_state,
        team_levels: [
            match_state.team_levels[0].face_value(),
            match_state.team_levels[1].face_value(),
        ],
        active_team: match_state.active_team,
    }
}

fn tags(cards: &[crate::domain::cards::Card]) -> Vec<String> {
    cards.iter().map(|c| c.to_string()).collect()
}

//! Wire protocol: tagged `{event, payload}` records over the websocket.
//!
//! Inbound messages are decoded once at the transport boundary; unknown
//! tags fail deserialization and surface as protocol errors. Outbound
//! state messages are idempotent snapshots, so message loss is tolerable.

use serde::{Deserialize, Serialize};

use crate::domain::snapshot::GameStatePayload;
use crate::domain::state::Seat;

/// Maximum player-name length accepted at join.
pub const MAX_NAME_LEN: usize = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameMode {
    Normal,
    Skill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMsg {
    Join { name: String, room_id: String },
    Ready,
    Start,
    PlayHand { cards: Vec<String> },
    Pass,
    Tribute { card: String },
    ReturnTribute { card: String },
    SwitchSeat { target: Seat },
    SetMode { mode: GameMode },
    ForceEnd,
    Chat { text: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPublic {
    pub seat: Seat,
    pub name: Option<String>,
    pub is_bot: bool,
    pub is_ready: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatePayload {
    pub room_id: String,
    pub seats: Vec<SeatPublic>,
    pub mode: GameMode,
    pub match_live: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub sender: String,
    pub text: String,
    pub seat: Seat,
    /// Milliseconds since the Unix epoch.
    pub time: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(
    tag = "event",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMsg {
    RoomState(RoomStatePayload),
    GameState(GameStatePayload),
    Error { message: String },
    GameOver { winners: Vec<Seat> },
    MatchOver { team: u8, levels: [u8; 2] },
    ChatMessage(ChatMessagePayload),
}

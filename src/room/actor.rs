//! The room actor: four seats, one live match, single-writer semantics.
//!
//! All mutation of a room's seats, deal engine and match state happens on
//! this actor's mailbox; websocket sessions only decode frames and
//! forward them here. The two asynchronous waits a room ever takes (the
//! bot decision delay and the inter-deal grace) are `run_later` tasks on
//! the same mailbox, carrying the engine epoch they were scheduled for;
//! a detached engine invalidates them by bumping the epoch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use actix::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ai::{create_bot, BotStrategy};
use crate::domain::cards::{try_parse_cards, Card};
use crate::domain::deal::{DealEngine, DealPhase};
use crate::domain::match_flow::{MatchOutcome, MatchState};
use crate::domain::seed_derivation::derive_deal_seed;
use crate::domain::snapshot::game_state_for;
use crate::domain::state::{Seat, SEATS};
use crate::domain::transitions::{derive_transitions, DealTransition};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::room::registry::RoomRegistry;
use crate::room::seats::{JoinOutcome, Seats};
use crate::ws::protocol::{
    ChatMessagePayload, ClientMsg, GameMode, RoomStatePayload, ServerMsg, MAX_NAME_LEN,
};

const BOT_DECISION_DELAY: Duration = Duration::from_secs(1);
const INTER_DEAL_GRACE: Duration = Duration::from_secs(3);
const CHAT_LOG_LIMIT: usize = 64;

/// Server → session push.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

/// A session asking for a seat (the decoded `join` command).
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: Uuid,
    pub name: String,
    pub addr: Recipient<Outbound>,
}

/// Any decoded non-join command from a seated session.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ClientCommand {
    pub conn_id: Uuid,
    pub msg: ClientMsg,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: Uuid,
}

/// Observability probe: the room's public state, as broadcast to clients.
#[derive(Message)]
#[rtype(result = "RoomStatePayload")]
pub struct Inspect;

struct LiveMatch {
    match_state: MatchState,
    engine: DealEngine,
}

pub struct Room {
    room_id: String,
    registry: Arc<RoomRegistry>,
    seats: Seats,
    /// Transport session → seat. Rebound on reconnect.
    sessions: HashMap<Uuid, Seat>,
    handles: [Option<Recipient<Outbound>>; SEATS],
    bots: [Option<Box<dyn BotStrategy>>; SEATS],
    mode: GameMode,
    game: Option<LiveMatch>,
    /// Room-private randomness; per-deal shuffle seeds derive from it.
    room_seed: [u8; 32],
    deal_no: u32,
    /// Engine identity token captured by every scheduled timer.
    epoch: u64,
    /// Turn as of the last broadcast; bot decisions are scheduled on the
    /// edge where the turn becomes a bot seat.
    last_seen_turn: Option<Seat>,
    chat_log: Vec<ChatMessagePayload>,
}

impl Room {
    pub fn new(room_id: String, registry: Arc<RoomRegistry>) -> Self {
        Self {
            room_id,
            registry,
            seats: Seats::new(),
            sessions: HashMap::new(),
            handles: Default::default(),
            bots: Default::default(),
            mode: GameMode::Normal,
            game: None,
            room_seed: rand::random(),
            deal_no: 0,
            epoch: 0,
            last_seen_turn: None,
            chat_log: Vec::new(),
        }
    }

    fn send_to_seat(&self, seat: Seat, msg: ServerMsg) {
        if let Some(handle) = &self.handles[seat as usize] {
            handle.do_send(Outbound(msg));
        }
    }

    fn broadcast(&self, msg: &ServerMsg) {
        for handle in self.handles.iter().flatten() {
            handle.do_send(Outbound(msg.clone()));
        }
    }

    fn room_state_payload(&self) -> RoomStatePayload {
        RoomStatePayload {
            room_id: self.room_id.clone(),
            seats: self.seats.public(),
            mode: self.mode,
            match_live: self.game.is_some(),
        }
    }

    fn broadcast_room_state(&self) {
        self.broadcast(&ServerMsg::RoomState(self.room_state_payload()));
    }

    /// Push each connected seat its own tailored snapshot.
    fn broadcast_game_state(&self) {
        let Some(game) = &self.game else {
            return;
        };
        for seat in 0..SEATS as Seat {
            if self.handles[seat as usize].is_some() {
                let payload = game_state_for(&game.engine, &game.match_state, seat);
                self.send_to_seat(seat, ServerMsg::GameState(payload));
            }
        }
    }

    fn send_error(&self, seat: Seat, err: &AppError) {
        self.send_to_seat(
            seat,
            ServerMsg::Error {
                message: err.client_message(),
            },
        );
    }

    fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    fn start_match(&mut self, ctx: &mut Context<Self>) {
        if self.game.is_some() {
            return;
        }
        for seat in 0..SEATS as Seat {
            if self.seats.is_bot(seat) && self.bots[seat as usize].is_none() {
                self.bots[seat as usize] = Some(create_bot(None));
            }
        }
        info!(room_id = %self.room_id, "match starting");
        self.install_engine(MatchState::new(), ctx);
    }

    /// Build and start the next deal engine from match-level state.
    fn install_engine(&mut self, match_state: MatchState, ctx: &mut Context<Self>) {
        self.deal_no += 1;
        self.bump_epoch();
        let seed = derive_deal_seed(&self.room_seed, self.deal_no);
        let mut engine = DealEngine::new(
            match_state.deal_level(),
            match_state.active_team,
            match_state.last_order,
        );
        if let Err(err) = engine.start(seed) {
            warn!(room_id = %self.room_id, error = %err, "deal start failed");
            return;
        }
        info!(
            room_id = %self.room_id,
            deal_no = self.deal_no,
            level = engine.level.face_value(),
            active_team = engine.active_team,
            "deal started"
        );
        self.game = Some(LiveMatch {
            match_state,
            engine,
        });
        self.last_seen_turn = None;
        self.broadcast_room_state();
        self.after_mutation(ctx);
    }

    /// Common tail of every accepted engine mutation: settle bot tribute
    /// debts, push snapshots, then either finish the deal or line up the
    /// next bot decision.
    fn after_mutation(&mut self, ctx: &mut Context<Self>) {
        self.resolve_bot_tributes();
        self.broadcast_game_state();
        let (phase, turn) = match &self.game {
            Some(game) => (game.engine.phase, game.engine.turn),
            None => return,
        };
        let transitions = derive_transitions(self.last_seen_turn, turn);
        self.last_seen_turn = turn;
        match phase {
            DealPhase::Score => self.handle_deal_end(ctx),
            DealPhase::Playing => {
                for transition in transitions {
                    let DealTransition::TurnBecame { seat } = transition;
                    if self.seats.is_bot(seat) {
                        self.schedule_bot(ctx);
                    }
                }
            }
            _ => {}
        }
    }

    /// Bot payers hand over their largest card and bot recipients return
    /// their lowest, synchronously at phase entry.
    fn resolve_bot_tributes(&mut self) {
        loop {
            let action = {
                let Some(game) = &self.game else { return };
                match game.engine.phase {
                    DealPhase::Tribute => game
                        .engine
                        .pending_tribute_payers()
                        .into_iter()
                        .find(|&s| self.seats.is_bot(s))
                        .and_then(|s| game.engine.largest_in_hand(s).map(|c| (s, c, true))),
                    DealPhase::ReturnTribute => game
                        .engine
                        .pending_return_payers()
                        .into_iter()
                        .find(|&s| self.seats.is_bot(s))
                        .and_then(|s| game.engine.smallest_in_hand(s).map(|c| (s, c, false))),
                    _ => None,
                }
            };
            let Some((seat, card, is_payment)) = action else {
                return;
            };
            let Some(game) = &mut self.game else { return };
            let result = if is_payment {
                game.engine.pay_tribute(seat, card)
            } else {
                game.engine.return_tribute(seat, card)
            };
            if let Err(err) = result {
                warn!(
                    room_id = %self.room_id,
                    seat,
                    error = %err,
                    "bot tribute resolution failed"
                );
                return;
            }
        }
    }

    fn schedule_bot(&mut self, ctx: &mut Context<Self>) {
        let epoch = self.epoch;
        ctx.run_later(BOT_DECISION_DELAY, move |act, ctx| {
            act.bot_act(ctx, epoch);
        });
    }

    fn bot_act(&mut self, ctx: &mut Context<Self>, epoch: u64) {
        if epoch != self.epoch {
            debug!(room_id = %self.room_id, "stale bot task dropped");
            return;
        }
        let (seat, level, target, hand) = {
            let Some(game) = &self.game else { return };
            if game.engine.phase != DealPhase::Playing {
                return;
            }
            let Some(seat) = game.engine.turn else { return };
            if !self.seats.is_bot(seat) {
                return;
            }
            (
                seat,
                game.engine.level,
                game.engine.current_target(seat).cloned(),
                game.engine.hand(seat).to_vec(),
            )
        };

        let decision = self.bots[seat as usize]
            .as_ref()
            .and_then(|bot| bot.decide(&hand, level, target.as_ref()));

        let Some(game) = &mut self.game else { return };
        let result = match &decision {
            Some(cards) => game.engine.play_hand(seat, cards),
            None => game.engine.pass(seat),
        };
        if let Err(err) = result {
            // Malformed bot response: pass, except on a free lead where a
            // pass is illegal and the smallest single goes out instead.
            debug!(room_id = %self.room_id, seat, error = %err, "bot play rejected");
            if game.engine.current_target(seat).is_none() {
                if let Some(card) = game.engine.smallest_in_hand(seat) {
                    if let Err(err) = game.engine.play_hand(seat, &[card]) {
                        warn!(room_id = %self.room_id, seat, error = %err, "bot fallback failed");
                        return;
                    }
                }
            } else if let Err(err) = game.engine.pass(seat) {
                warn!(room_id = %self.room_id, seat, error = %err, "bot pass failed");
                return;
            }
        }
        self.after_mutation(ctx);
    }

    fn handle_deal_end(&mut self, ctx: &mut Context<Self>) {
        let order = match &self.game {
            Some(game) => match game.engine.finishing_order() {
                Some(order) => order,
                None => {
                    warn!(room_id = %self.room_id, "score phase without finishing order");
                    return;
                }
            },
            None => return,
        };
        self.broadcast(&ServerMsg::GameOver {
            winners: order.to_vec(),
        });

        let outcome = match &mut self.game {
            Some(game) => game.match_state.apply_deal_result(order),
            None => return,
        };
        match outcome {
            MatchOutcome::Continue {
                winning_team,
                step,
                new_level,
            } => {
                info!(
                    room_id = %self.room_id,
                    winning_team,
                    step,
                    new_level = new_level.face_value(),
                    "deal applied, next deal scheduled"
                );
                let epoch = self.epoch;
                ctx.run_later(INTER_DEAL_GRACE, move |act, ctx| {
                    act.next_deal(ctx, epoch);
                });
            }
            MatchOutcome::MatchOver { team, levels } => {
                info!(room_id = %self.room_id, team, "match over");
                self.broadcast(&ServerMsg::MatchOver {
                    team,
                    levels: [levels[0].face_value(), levels[1].face_value()],
                });
                self.finish_match(ctx);
            }
        }
    }

    fn next_deal(&mut self, ctx: &mut Context<Self>, epoch: u64) {
        if epoch != self.epoch {
            debug!(room_id = %self.room_id, "stale deal chain task dropped");
            return;
        }
        let Some(game) = self.game.take() else { return };
        self.install_engine(game.match_state, ctx);
    }

    /// Tear down match state after a match-over or a host force-end.
    fn finish_match(&mut self, ctx: &mut Context<Self>) {
        self.game = None;
        self.bump_epoch();
        self.seats.reset_ready();
        for seat in self.seats.purge_disconnected() {
            self.handles[seat as usize] = None;
            self.sessions.retain(|_, &mut s| s != seat);
        }
        self.broadcast_room_state();
        self.teardown_if_empty(ctx);
    }

    fn teardown_if_empty(&mut self, ctx: &mut Context<Self>) {
        if self.seats.human_count() == 0 {
            info!(room_id = %self.room_id, "last human left, closing room");
            self.registry.remove(&self.room_id);
            ctx.stop();
        }
    }

    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Engine command shared tail: stale-phase errors are dropped, rule
    /// violations go back privately, accepted commands ripple onward.
    fn apply_engine_result(
        &mut self,
        seat: Seat,
        result: Result<(), DomainError>,
        ctx: &mut Context<Self>,
    ) {
        match result {
            Ok(()) => self.after_mutation(ctx),
            Err(err) if err.is_stale() => {
                debug!(room_id = %self.room_id, seat, error = %err, "stale command dropped");
            }
            Err(err) => {
                self.send_error(seat, &AppError::Rule(err));
            }
        }
    }

    fn handle_command(
        &mut self,
        conn_id: Uuid,
        seat: Seat,
        msg: ClientMsg,
        ctx: &mut Context<Self>,
    ) {
        match msg {
            ClientMsg::Join { .. } => {
                // Joins arrive as Connect; a stray one is a stale replay.
                debug!(room_id = %self.room_id, seat, "duplicate join dropped");
            }
            ClientMsg::Ready => {
                if self.game.is_some() {
                    debug!(room_id = %self.room_id, seat, "ready during match dropped");
                    return;
                }
                if self.seats.toggle_ready(seat).is_some() {
                    self.broadcast_room_state();
                    if self.seats.all_ready() {
                        self.start_match(ctx);
                    }
                }
            }
            ClientMsg::Start => {
                if seat != 0 {
                    self.send_error(seat, &AppError::unauthorized("only the host may start"));
                    return;
                }
                if self.game.is_some() {
                    debug!(room_id = %self.room_id, "start during match dropped");
                    return;
                }
                let filled = self.seats.fill_bots();
                if !filled.is_empty() {
                    info!(room_id = %self.room_id, ?filled, "empty seats filled with bots");
                }
                self.start_match(ctx);
            }
            ClientMsg::SetMode { mode } => {
                if seat != 0 {
                    self.send_error(seat, &AppError::unauthorized("only the host may set the mode"));
                    return;
                }
                if self.game.is_some() {
                    debug!(room_id = %self.room_id, "mode change during match dropped");
                    return;
                }
                self.mode = mode;
                self.broadcast_room_state();
            }
            ClientMsg::SwitchSeat { target } => {
                if self.game.is_some() {
                    self.send_error(seat, &AppError::SeatSwitchUnavailable);
                    return;
                }
                match self.seats.switch(seat, target) {
                    Ok(()) => {
                        self.handles.swap(seat as usize, target as usize);
                        if let Some(entry) = self.sessions.get_mut(&conn_id) {
                            *entry = target;
                        }
                        self.broadcast_room_state();
                    }
                    Err(err) => self.send_error(seat, &err),
                }
            }
            ClientMsg::Chat { text } => {
                let Some(sender) = self.seats.name_of(seat) else { return };
                let payload = ChatMessagePayload {
                    sender: sender.to_string(),
                    text,
                    seat,
                    time: Self::now_millis(),
                };
                if self.chat_log.len() >= CHAT_LOG_LIMIT {
                    self.chat_log.remove(0);
                }
                self.chat_log.push(payload.clone());
                self.broadcast(&ServerMsg::ChatMessage(payload));
            }
            ClientMsg::ForceEnd => {
                if seat != 0 {
                    self.send_error(seat, &AppError::unauthorized("only the host may force end"));
                    return;
                }
                if self.game.take().is_some() {
                    info!(room_id = %self.room_id, "host force-ended the match");
                    self.finish_match(ctx);
                }
            }
            ClientMsg::PlayHand { cards } => {
                let cards = match try_parse_cards(&cards) {
                    Ok(cards) => cards,
                    Err(err) => {
                        self.send_error(seat, &AppError::protocol(err.to_string()));
                        return;
                    }
                };
                let Some(game) = &mut self.game else {
                    debug!(room_id = %self.room_id, seat, "play without a match dropped");
                    return;
                };
                let result = game.engine.play_hand(seat, &cards);
                self.apply_engine_result(seat, result, ctx);
            }
            ClientMsg::Pass => {
                let Some(game) = &mut self.game else {
                    debug!(room_id = %self.room_id, seat, "pass without a match dropped");
                    return;
                };
                let result = game.engine.pass(seat);
                self.apply_engine_result(seat, result, ctx);
            }
            ClientMsg::Tribute { card } => {
                let card: Card = match card.parse() {
                    Ok(card) => card,
                    Err(err) => {
                        self.send_error(seat, &AppError::protocol(err.to_string()));
                        return;
                    }
                };
                let Some(game) = &mut self.game else { return };
                let result = game.engine.pay_tribute(seat, card);
                self.apply_engine_result(seat, result, ctx);
            }
            ClientMsg::ReturnTribute { card } => {
                let card: Card = match card.parse() {
                    Ok(card) => card,
                    Err(err) => {
                        self.send_error(seat, &AppError::protocol(err.to_string()));
                        return;
                    }
                };
                let Some(game) = &mut self.game else { return };
                let result = game.engine.return_tribute(seat, card);
                self.apply_engine_result(seat, result, ctx);
            }
        }
    }
}

impl Actor for Room {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(room_id = %self.room_id, "room opened");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(room_id = %self.room_id, "room closed");
    }
}

impl Handler<Connect> for Room {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        let name = msg.name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            msg.addr.do_send(Outbound(ServerMsg::Error {
                message: AppError::protocol("name must be 1 to 10 characters").client_message(),
            }));
            return;
        }

        match self.seats.join(name) {
            Ok(outcome) => {
                let seat = outcome.seat();
                // Drop any stale session still bound to this seat.
                self.sessions.retain(|_, &mut s| s != seat);
                self.sessions.insert(msg.conn_id, seat);
                self.handles[seat as usize] = Some(msg.addr);

                info!(
                    room_id = %self.room_id,
                    seat,
                    name,
                    reconnect = matches!(outcome, JoinOutcome::Reconnected(_)),
                    "seat bound"
                );
                self.broadcast_room_state();

                // A reconnecting player gets a private snapshot so their
                // client can catch up mid-deal.
                if matches!(outcome, JoinOutcome::Reconnected(_)) {
                    if let Some(game) = &self.game {
                        let payload = game_state_for(&game.engine, &game.match_state, seat);
                        self.send_to_seat(seat, ServerMsg::GameState(payload));
                    }
                }
            }
            Err(err) => {
                msg.addr.do_send(Outbound(ServerMsg::Error {
                    message: err.client_message(),
                }));
            }
        }
    }
}

impl Handler<ClientCommand> for Room {
    type Result = ();

    fn handle(&mut self, msg: ClientCommand, ctx: &mut Self::Context) -> Self::Result {
        let Some(&seat) = self.sessions.get(&msg.conn_id) else {
            debug!(room_id = %self.room_id, "command from unseated session dropped");
            return;
        };
        self.handle_command(msg.conn_id, seat, msg.msg, ctx);
    }
}

impl Handler<Inspect> for Room {
    type Result = MessageResult<Inspect>;

    fn handle(&mut self, _msg: Inspect, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.room_state_payload())
    }
}

impl Handler<Disconnect> for Room {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) -> Self::Result {
        let Some(seat) = self.sessions.remove(&msg.conn_id) else {
            return;
        };
        self.handles[seat as usize] = None;
        let match_live = self.game.is_some();
        self.seats.disconnect(seat, match_live);
        info!(room_id = %self.room_id, seat, match_live, "seat disconnected");
        self.broadcast_room_state();
        self.teardown_if_empty(ctx);
    }
}

//! Websocket session actor: one per connection.
//!
//! Sessions decode each frame exactly once at this boundary and forward
//! the typed command to the owning room's mailbox; they hold no game
//! state of their own. Outbound traffic arrives as [`Outbound`] messages
//! from the room and is written back as JSON text frames.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::room::actor::{ClientCommand, Connect, Disconnect, Outbound, Room};
use crate::room::registry::RoomRegistry;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    registry: web::Data<Arc<RoomRegistry>>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(registry.get_ref().clone());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    registry: Arc<RoomRegistry>,
    room: Option<Addr<Room>>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(registry: Arc<RoomRegistry>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            registry,
            room: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                message: message.into(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "client heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn dispatch(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMsg::Join { name, room_id } => {
                let room = self.registry.get_or_create(&room_id);
                room.do_send(Connect {
                    conn_id: self.conn_id,
                    name,
                    addr: ctx.address().recipient(),
                });
                self.room = Some(room);
            }
            other => match &self.room {
                Some(room) => room.do_send(ClientCommand {
                    conn_id: self.conn_id,
                    msg: other,
                }),
                None => Self::send_error(ctx, "join a room first"),
            },
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "websocket session started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(room) = &self.room {
            room.do_send(Disconnect {
                conn_id: self.conn_id,
            });
        }
        info!(conn_id = %self.conn_id, "websocket session stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.dispatch(cmd, ctx),
                    Err(err) => {
                        debug!(conn_id = %self.conn_id, error = %err, "malformed frame");
                        Self::send_error(ctx, "malformed message");
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, "binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "websocket protocol error");
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}

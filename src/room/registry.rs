//! Concurrent roomId → room-actor map.
//!
//! Injected into the websocket app state rather than living as a
//! module-level singleton, so tests can construct isolated servers.

use std::sync::Arc;

use actix::{Actor, Addr};
use dashmap::DashMap;
use tracing::info;

use crate::room::actor::Room;

pub struct RoomRegistry {
    rooms: DashMap<String, Addr<Room>>,
}

impl RoomRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            rooms: DashMap::new(),
        })
    }

    /// Look up a room, creating and starting its actor on first join.
    /// The entry API keeps concurrent joins for the same id from racing
    /// two actors into existence.
    pub fn get_or_create(self: &Arc<Self>, room_id: &str) -> Addr<Room> {
        if let Some(addr) = self.rooms.get(room_id) {
            return addr.clone();
        }
        let entry = self
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                info!(room_id, "creating room");
                Room::new(room_id.to_string(), Arc::clone(self)).start()
            });
        entry.clone()
    }

    pub fn remove(&self, room_id: &str) {
        if self.rooms.remove(room_id).is_some() {
            info!(room_id, "room removed from registry");
        }
    }

    pub fn active_rooms(&self) -> usize {
        self.rooms.len()
    }
}

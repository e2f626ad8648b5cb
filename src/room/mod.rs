//! Rooms: seat management, the room actor and the shared registry.

pub mod actor;
pub mod registry;
pub mod seats;

pub use actor::{ClientCommand, Connect, Disconnect, Inspect, Outbound, Room};
pub use registry::RoomRegistry;
pub use seats::{JoinOutcome, Seats, SeatSlot};

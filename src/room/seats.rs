//! Seat occupancy rules, kept pure so they are testable without actors.

use crate::domain::state::{Seat, SEATS};
use crate::error::AppError;
use crate::ws::protocol::SeatPublic;

#[derive(Debug, Clone, PartialEq)]
pub struct HumanSeat {
    pub name: String,
    pub ready: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotSeat {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeatSlot {
    Empty,
    Human(HumanSeat),
    Bot(BotSeat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Claimed(Seat),
    Reconnected(Seat),
}

impl JoinOutcome {
    pub fn seat(self) -> Seat {
        match self {
            JoinOutcome::Claimed(s) | JoinOutcome::Reconnected(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Seats {
    slots: [SeatSlot; SEATS],
}

impl Default for Seats {
    fn default() -> Self {
        Self::new()
    }
}

impl Seats {
    pub fn new() -> Self {
        Self {
            slots: [
                SeatSlot::Empty,
                SeatSlot::Empty,
                SeatSlot::Empty,
                SeatSlot::Empty,
            ],
        }
    }

    pub fn slot(&self, seat: Seat) -> &SeatSlot {
        &self.slots[seat as usize]
    }

    /// A join either reconnects a disconnected seat with a matching name
    /// or claims the lowest-numbered empty seat.
    pub fn join(&mut self, name: &str) -> Result<JoinOutcome, AppError> {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let SeatSlot::Human(h) = slot {
                if h.name == name {
                    if h.connected {
                        return Err(AppError::protocol("name already connected"));
                    }
                    h.connected = true;
                    return Ok(JoinOutcome::Reconnected(i as Seat));
                }
            }
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if *slot == SeatSlot::Empty {
                *slot = SeatSlot::Human(HumanSeat {
                    name: name.to_string(),
                    ready: false,
                    connected: true,
                });
                return Ok(JoinOutcome::Claimed(i as Seat));
            }
        }
        Err(AppError::RoomFull)
    }

    /// Toggle the ready flag; returns the new value.
    pub fn toggle_ready(&mut self, seat: Seat) -> Option<bool> {
        match &mut self.slots[seat as usize] {
            SeatSlot::Human(h) => {
                h.ready = !h.ready;
                Some(h.ready)
            }
            _ => None,
        }
    }

    pub fn reset_ready(&mut self) {
        for slot in &mut self.slots {
            if let SeatSlot::Human(h) = slot {
                h.ready = false;
            }
        }
    }

    /// All four seats hold ready humans.
    pub fn all_ready(&self) -> bool {
        self.slots
            .iter()
            .all(|s| matches!(s, SeatSlot::Human(h) if h.ready))
    }

    /// Fill every empty seat with a bot; returns the filled seats.
    pub fn fill_bots(&mut self) -> Vec<Seat> {
        let mut filled = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if *slot == SeatSlot::Empty {
                *slot = SeatSlot::Bot(BotSeat {
                    name: format!("Bot {}", i + 1),
                });
                filled.push(i as Seat);
            }
        }
        filled
    }

    /// Move a human to an empty seat. Only legal while no match is live;
    /// the caller enforces that part.
    pub fn switch(&mut self, from: Seat, to: Seat) -> Result<(), AppError> {
        if to as usize >= SEATS {
            return Err(AppError::protocol("seat out of range"));
        }
        if !matches!(self.slots[from as usize], SeatSlot::Human(_)) {
            return Err(AppError::unauthorized("no seat to switch from"));
        }
        if self.slots[to as usize] != SeatSlot::Empty {
            return Err(AppError::SeatOccupied { seat: to });
        }
        self.slots.swap(from as usize, to as usize);
        Ok(())
    }

    /// Disconnect handling: clear the seat outside a match, otherwise keep
    /// the seat and mark it disconnected (the player is expected back).
    pub fn disconnect(&mut self, seat: Seat, match_live: bool) {
        if let SeatSlot::Human(h) = &mut self.slots[seat as usize] {
            if match_live {
                h.connected = false;
                h.ready = false;
            } else {
                self.slots[seat as usize] = SeatSlot::Empty;
            }
        }
    }

    /// Clear humans who never came back; used once a match ends.
    pub fn purge_disconnected(&mut self) -> Vec<Seat> {
        let mut cleared = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if matches!(slot, SeatSlot::Human(h) if !h.connected) {
                *slot = SeatSlot::Empty;
                cleared.push(i as Seat);
            }
        }
        cleared
    }

    pub fn is_bot(&self, seat: Seat) -> bool {
        matches!(self.slots[seat as usize], SeatSlot::Bot(_))
    }

    pub fn human_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, SeatSlot::Human(_)))
            .count()
    }

    pub fn name_of(&self, seat: Seat) -> Option<&str> {
        match &self.slots[seat as usize] {
            SeatSlot::Human(h) => Some(&h.name),
            SeatSlot::Bot(b) => Some(&b.name),
            SeatSlot::Empty => None,
        }
    }

    pub fn public(&self) -> Vec<SeatPublic> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| match slot {
                SeatSlot::Empty => SeatPublic {
                    seat: i as Seat,
                    name: None,
                    is_bot: false,
                    is_ready: false,
                    connected: false,
                },
                SeatSlot::Human(h) => SeatPublic {
                    seat: i as Seat,
                    name: Some(h.name.clone()),
                    is_bot: false,
                    is_ready: h.ready,
                    connected: h.connected,
                },
                SeatSlot::Bot(b) => SeatPublic {
                    seat: i as Seat,
                    name: Some(b.name.clone()),
                    is_bot: true,
                    is_ready: true,
                    connected: true,
                },
            })
            .collect()
    }
}

use chrono::{DateTime, Utc};

use crate::slot::{SlotDate, SlotTime};

/// A reserved (court, date, time) slot holding one or two players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub court_id: i64,
    pub date: SlotDate,
    pub time: SlotTime,
    pub player1: String,
    pub player2: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// One player waiting for an opponent
    Open,
    Full,
}

impl Booking {
    pub fn state(&self) -> SlotState {
        match self.player2 {
            Some(_) => SlotState::Full,
            None => SlotState::Open,
        }
    }

    pub fn is_full(&self) -> bool {
        self.state() == SlotState::Full
    }

    /// Players in join order.
    pub fn players(&self) -> Vec<&str> {
        let mut players = vec![self.player1.as_str()];
        if let Some(p2) = &self.player2 {
            players.push(p2.as_str());
        }
        players
    }
}

/// Fields needed to open a new slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub court_id: i64,
    pub date: SlotDate,
    pub time: SlotTime,
    pub player1: String,
}

//! JSON shapes returned by the API.

use std::collections::HashMap;

use courtside_core::{Booking, Court, Reservation, SlotDate, SlotTime, Surface};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CourtPayload {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub surface: Surface,
    pub location: String,
}

impl From<Court> for CourtPayload {
    fn from(court: Court) -> Self {
        Self {
            id: court.id,
            name: court.name,
            surface: court.surface,
            location: court.location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingPayload {
    pub id: i64,
    pub court_id: i64,
    pub court_name: Option<String>,
    pub time: SlotTime,
    pub date: SlotDate,
    pub players: Vec<String>,
    pub is_complete: bool,
    pub created_at: String,
}

impl BookingPayload {
    /// `court_name` is `None` when the court no longer resolves.
    pub fn new(booking: &Booking, court_name: Option<&str>) -> Self {
        let players: Vec<String> = booking.players().into_iter().map(String::from).collect();
        Self {
            id: booking.id,
            court_id: booking.court_id,
            court_name: court_name.map(String::from),
            time: booking.time,
            date: booking.date,
            is_complete: players.len() == 2,
            players,
            created_at: booking.created_at.to_rfc3339(),
        }
    }

    /// Renders a listing, resolving court names from `courts`.
    pub fn list(bookings: &[Booking], courts: &[Court]) -> Vec<Self> {
        let names: HashMap<i64, &str> = courts.iter().map(|c| (c.id, c.name.as_str())).collect();
        bookings
            .iter()
            .map(|b| Self::new(b, names.get(&b.court_id).copied()))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationPayload {
    pub message: String,
    pub booking: BookingPayload,
}

impl From<Reservation> for ReservationPayload {
    fn from(rsv: Reservation) -> Self {
        Self {
            booking: BookingPayload::new(&rsv.booking, Some(rsv.court.name.as_str())),
            message: rsv.message,
        }
    }
}

//! In-memory repositories, used by tests and the `memory` storage backend.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::booking::{Booking, NewBooking};
use crate::court::Court;
use crate::repository::{BookingRepository, CourtRepository, StoreError, StoreResult};
use crate::slot::{SlotDate, SlotTime};

pub struct InMemoryCourtRepository {
    courts: Vec<Court>,
}

impl InMemoryCourtRepository {
    pub fn new(courts: Vec<Court>) -> Self {
        Self { courts }
    }
}

#[async_trait]
impl CourtRepository for InMemoryCourtRepository {
    async fn list_courts(&self) -> StoreResult<Vec<Court>> {
        Ok(self.courts.clone())
    }

    async fn get_court(&self, id: i64) -> StoreResult<Option<Court>> {
        Ok(self.courts.iter().find(|c| c.id == id).cloned())
    }
}

#[derive(Default)]
struct BookingTable {
    rows: Vec<Booking>,
    next_id: i64,
}

/// Bookings kept in insertion order. Every mutation runs under the write lock,
/// so the slot check and the write cannot interleave with another request.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    table: RwLock<BookingTable>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_slot(
        &self,
        court_id: i64,
        date: SlotDate,
        time: SlotTime,
    ) -> StoreResult<Option<Booking>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|b| b.court_id == court_id && b.date == date && b.time == time)
            .cloned())
    }

    async fn create(&self, booking: NewBooking) -> StoreResult<Booking> {
        let mut table = self.table.write().await;

        let taken = table.rows.iter().any(|b| {
            b.court_id == booking.court_id && b.date == booking.date && b.time == booking.time
        });
        if taken {
            return Err(StoreError::Conflict);
        }

        table.next_id += 1;
        let row = Booking {
            id: table.next_id,
            court_id: booking.court_id,
            date: booking.date,
            time: booking.time,
            player1: booking.player1,
            player2: None,
            created_at: Utc::now(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn add_second_player(&self, booking_id: i64, player2: &str) -> StoreResult<Booking> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or(StoreError::NotFound(booking_id))?;

        if row.player2.is_some() {
            return Err(StoreError::AlreadyFull(booking_id));
        }

        row.player2 = Some(player2.to_string());
        Ok(row.clone())
    }

    async fn get(&self, booking_id: i64) -> StoreResult<Option<Booking>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|b| b.id == booking_id).cloned())
    }

    async fn list_by_court_and_date(&self, court_id: i64, date: SlotDate) -> StoreResult<Vec<Booking>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|b| b.court_id == court_id && b.date == date)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<Booking>> {
        Ok(self.table.read().await.rows.clone())
    }
}

use async_trait::async_trait;

use crate::booking::{Booking, NewBooking};
use crate::court::Court;
use crate::slot::{SlotDate, SlotTime};

/// Failures reported by repository implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Slot already has a booking")]
    Conflict,

    #[error("Booking {0} already has two players")]
    AlreadyFull(i64),

    #[error("Booking not found: {0}")]
    NotFound(i64),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Repository trait for court reference data
#[async_trait]
pub trait CourtRepository: Send + Sync {
    async fn list_courts(&self) -> StoreResult<Vec<Court>>;

    async fn get_court(&self, id: i64) -> StoreResult<Option<Court>>;
}

/// Repository trait for booking slots.
///
/// Implementations must make `create` and `add_second_player` atomic per slot:
/// `create` fails with [`StoreError::Conflict`] when the slot already has a
/// record, and `add_second_player` only succeeds while `player2` is unset.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_slot(
        &self,
        court_id: i64,
        date: SlotDate,
        time: SlotTime,
    ) -> StoreResult<Option<Booking>>;

    async fn create(&self, booking: NewBooking) -> StoreResult<Booking>;

    async fn add_second_player(&self, booking_id: i64, player2: &str) -> StoreResult<Booking>;

    async fn get(&self, booking_id: i64) -> StoreResult<Option<Booking>>;

    async fn list_by_court_and_date(&self, court_id: i64, date: SlotDate) -> StoreResult<Vec<Booking>>;

    async fn list_all(&self) -> StoreResult<Vec<Booking>>;
}

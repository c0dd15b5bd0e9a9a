use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use courtside_core::repository::{BookingRepository, StoreError, StoreResult};
use courtside_core::{Booking, NewBooking, SlotDate, SlotTime};

use crate::backend_error;

const BOOKING_COLUMNS: &str = "id, court_id, slot_date, slot_time, player1, player2, created_at";

/// Bookings in PostgreSQL. Slot uniqueness is the `bookings_slot_unique`
/// constraint; joining is a conditional update on `player2 IS NULL`.
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    court_id: i64,
    slot_date: NaiveDate,
    slot_time: NaiveTime,
    player1: String,
    player2: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            court_id: row.court_id,
            date: SlotDate::new(row.slot_date),
            time: SlotTime::new(row.slot_time),
            player1: row.player1,
            player2: row.player2,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_slot(
        &self,
        court_id: i64,
        date: SlotDate,
        time: SlotTime,
    ) -> StoreResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE court_id = $1 AND slot_date = $2 AND slot_time = $3",
            BOOKING_COLUMNS
        ))
        .bind(court_id)
        .bind(date.as_naive())
        .bind(time.as_naive())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(row.map(Booking::from))
    }

    async fn create(&self, booking: NewBooking) -> StoreResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            INSERT INTO bookings (court_id, slot_date, slot_time, player1)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT bookings_slot_unique DO NOTHING
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(booking.court_id)
        .bind(booking.date.as_naive())
        .bind(booking.time.as_naive())
        .bind(&booking.player1)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                debug!(court_id = booking.court_id, "Insert skipped, slot already taken");
                Err(StoreError::Conflict)
            }
        }
    }

    async fn add_second_player(&self, booking_id: i64, player2: &str) -> StoreResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            UPDATE bookings SET player2 = $1
            WHERE id = $2 AND player2 IS NULL
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(player2)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        match row {
            Some(row) => Ok(row.into()),
            None => match self.get(booking_id).await? {
                Some(_) => Err(StoreError::AlreadyFull(booking_id)),
                None => Err(StoreError::NotFound(booking_id)),
            },
        }
    }

    async fn get(&self, booking_id: i64) -> StoreResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(row.map(Booking::from))
    }

    async fn list_by_court_and_date(&self, court_id: i64, date: SlotDate) -> StoreResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE court_id = $1 AND slot_date = $2 ORDER BY slot_time",
            BOOKING_COLUMNS
        ))
        .bind(court_id)
        .bind(date.as_naive())
        .fetch_all(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings ORDER BY id",
            BOOKING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(backend_error)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}

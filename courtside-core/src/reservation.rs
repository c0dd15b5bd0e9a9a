use std::sync::Arc;

use tracing::{info, warn};

use crate::availability::{availability_map, AvailabilityMap};
use crate::booking::{Booking, NewBooking};
use crate::court::Court;
use crate::repository::{BookingRepository, CourtRepository, StoreError};
use crate::slot::{SlotDate, SlotTime};
use crate::{CoreError, CoreResult};

pub const MAX_PLAYER_NAME_LEN: usize = 100;

/// Tunables for slot requests
#[derive(Debug, Clone)]
pub struct ReservationRules {
    /// Slot length in minutes; requested times must start on a multiple of it.
    pub slot_minutes: u32,
}

impl Default for ReservationRules {
    fn default() -> Self {
        Self { slot_minutes: 60 }
    }
}

/// Raw join request as received from a client. Every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct JoinRequest {
    pub court_id: Option<i64>,
    pub time: Option<String>,
    pub player_name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SlotRequest {
    court_id: i64,
    date: SlotDate,
    time: SlotTime,
    player: String,
}

impl JoinRequest {
    fn validate(self, rules: &ReservationRules) -> CoreResult<SlotRequest> {
        let court_id = self.court_id.filter(|id| *id != 0);
        let time = self.time.filter(|t| !t.trim().is_empty());
        let player = self
            .player_name
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let (court_id, time, player) = match (court_id, time, player) {
            (Some(c), Some(t), Some(p)) => (c, t, p),
            _ => {
                return Err(CoreError::Validation(
                    "Required fields: court_id, time, player_name".to_string(),
                ))
            }
        };

        let time: SlotTime = time.parse()?;
        if !time.is_aligned_to(rules.slot_minutes) {
            return Err(CoreError::Validation(format!(
                "Time {} does not start a {}-minute slot",
                time, rules.slot_minutes
            )));
        }

        let date = match self.date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.parse::<SlotDate>()?,
            _ => SlotDate::today(),
        };

        if player.chars().count() > MAX_PLAYER_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "player_name must be at most {} characters",
                MAX_PLAYER_NAME_LEN
            )));
        }

        Ok(SlotRequest { court_id, date, time, player })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new slot was opened with the requester as player 1
    Created,
    /// The requester filled the second place of an open slot
    Joined,
}

#[derive(Debug, Clone)]
pub struct Reservation {
    pub outcome: Outcome,
    pub message: String,
    pub booking: Booking,
    pub court: Court,
}

/// Create-or-join workflow over explicitly injected repositories.
pub struct ReservationService {
    courts: Arc<dyn CourtRepository>,
    bookings: Arc<dyn BookingRepository>,
    rules: ReservationRules,
}

impl ReservationService {
    pub fn new(
        courts: Arc<dyn CourtRepository>,
        bookings: Arc<dyn BookingRepository>,
        rules: ReservationRules,
    ) -> Self {
        Self { courts, bookings, rules }
    }

    pub async fn list_courts(&self) -> CoreResult<Vec<Court>> {
        Ok(self.courts.list_courts().await?)
    }

    pub async fn get_court(&self, id: i64) -> CoreResult<Court> {
        self.courts
            .get_court(id)
            .await?
            .ok_or(CoreError::CourtNotFound(id))
    }

    pub async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
        Ok(self.bookings.list_all().await?)
    }

    pub async fn get_booking(&self, id: i64) -> CoreResult<Booking> {
        self.bookings
            .get(id)
            .await?
            .ok_or(CoreError::BookingNotFound(id))
    }

    /// Opens the requested slot, or takes its second place if someone is
    /// already waiting there.
    pub async fn join(&self, request: JoinRequest) -> CoreResult<Reservation> {
        let slot = request.validate(&self.rules)?;
        let court = self.get_court(slot.court_id).await?;

        let existing = self
            .bookings
            .find_slot(slot.court_id, slot.date, slot.time)
            .await?;

        if let Some(booking) = existing {
            return self.fill_slot(booking, slot.player, court).await;
        }

        let new_booking = NewBooking {
            court_id: slot.court_id,
            date: slot.date,
            time: slot.time,
            player1: slot.player.clone(),
        };

        match self.bookings.create(new_booking).await {
            Ok(booking) => {
                info!(
                    booking_id = booking.id,
                    court_id = booking.court_id,
                    date = %booking.date,
                    time = %booking.time,
                    "Slot opened"
                );
                Ok(Reservation {
                    outcome: Outcome::Created,
                    message: "Booking created successfully!".to_string(),
                    booking,
                    court,
                })
            }
            Err(StoreError::Conflict) => {
                // Another request opened the slot between lookup and insert.
                let booking = self
                    .bookings
                    .find_slot(slot.court_id, slot.date, slot.time)
                    .await?
                    .ok_or(StoreError::Conflict)?;
                self.fill_slot(booking, slot.player, court).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fill_slot(&self, booking: Booking, player: String, court: Court) -> CoreResult<Reservation> {
        if booking.is_full() {
            warn!(booking_id = booking.id, "Rejected join on full slot");
            return Err(CoreError::SlotFull);
        }

        let booking = match self.bookings.add_second_player(booking.id, &player).await {
            Ok(b) => b,
            Err(StoreError::AlreadyFull(id)) => {
                warn!(booking_id = id, "Slot filled concurrently");
                return Err(CoreError::SlotFull);
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            booking_id = booking.id,
            court_id = booking.court_id,
            date = %booking.date,
            time = %booking.time,
            "Slot filled"
        );

        Ok(Reservation {
            outcome: Outcome::Joined,
            message: format!(
                "Booking confirmed! You will play against {}.",
                booking.player1
            ),
            booking,
            court,
        })
    }

    /// Occupancy of every booked time for a court on one day.
    pub async fn availability(&self, court_id: i64, date: SlotDate) -> CoreResult<AvailabilityMap> {
        let bookings = self.bookings.list_by_court_and_date(court_id, date).await?;
        Ok(availability_map(&bookings))
    }
}

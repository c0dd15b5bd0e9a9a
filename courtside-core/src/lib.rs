pub mod availability;
pub mod booking;
pub mod court;
pub mod memory;
pub mod repository;
pub mod reservation;
pub mod slot;

pub use availability::{AvailabilityMap, SlotAvailability};
pub use booking::{Booking, NewBooking, SlotState};
pub use court::{Court, Surface};
pub use repository::{BookingRepository, CourtRepository, StoreError, StoreResult};
pub use reservation::{JoinRequest, Outcome, Reservation, ReservationRules, ReservationService};
pub use slot::{SlotDate, SlotTime};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Court not found: {0}")]
    CourtNotFound(i64),
    #[error("Booking not found: {0}")]
    BookingNotFound(i64),
    #[error("This time slot is already fully booked")]
    SlotFull,
    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;

pub mod app_config;
pub mod booking_repo;
pub mod court_repo;
pub mod database;

pub use booking_repo::PgBookingRepository;
pub use court_repo::PgCourtRepository;
pub use database::DbClient;

use courtside_core::StoreError;

pub(crate) fn backend_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

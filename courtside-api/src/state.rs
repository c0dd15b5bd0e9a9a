use std::sync::Arc;

use courtside_core::court::default_courts;
use courtside_core::memory::{InMemoryBookingRepository, InMemoryCourtRepository};
use courtside_core::{ReservationRules, ReservationService};
use courtside_store::{DbClient, PgBookingRepository, PgCourtRepository};

#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<ReservationService>,
    /// Mount point for all routes, e.g. "/api"
    pub api_prefix: Option<String>,
}

impl AppState {
    pub fn new(reservations: ReservationService) -> Self {
        Self {
            reservations: Arc::new(reservations),
            api_prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.api_prefix = prefix;
        self
    }

    pub fn postgres(db: &DbClient, rules: ReservationRules) -> Self {
        Self::new(ReservationService::new(
            Arc::new(PgCourtRepository::new(db.pool.clone())),
            Arc::new(PgBookingRepository::new(db.pool.clone())),
            rules,
        ))
    }

    /// State backed by in-memory repositories seeded with the default courts.
    pub fn in_memory(rules: ReservationRules) -> Self {
        Self::new(ReservationService::new(
            Arc::new(InMemoryCourtRepository::new(default_courts())),
            Arc::new(InMemoryBookingRepository::new()),
            rules,
        ))
    }
}

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use courtside_core::{AvailabilityMap, CoreError, JoinRequest, Outcome, SlotDate};
use serde::Deserialize;

use crate::error::AppError;
use crate::payload::{BookingPayload, ReservationPayload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JoinSlotBody {
    pub court_id: Option<i64>,
    pub time: Option<String>,
    pub player_name: Option<String>,
    pub date: Option<String>,
}

impl From<JoinSlotBody> for JoinRequest {
    fn from(body: JoinSlotBody) -> Self {
        JoinRequest {
            court_id: body.court_id,
            time: body.time,
            player_name: body.player_name,
            date: body.date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(join_slot))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/availability/{court_id}", get(check_availability))
}

/// GET /bookings
async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<BookingPayload>>, AppError> {
    let bookings = state.reservations.list_bookings().await?;
    let courts = state.reservations.list_courts().await?;
    Ok(Json(BookingPayload::list(&bookings, &courts)))
}

/// GET /bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    booking_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookingPayload>, AppError> {
    let Path(booking_id) = booking_id?;
    let booking = state.reservations.get_booking(booking_id).await?;
    let court = match state.reservations.get_court(booking.court_id).await {
        Ok(court) => Some(court),
        Err(CoreError::CourtNotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(Json(BookingPayload::new(&booking, court.as_ref().map(|c| c.name.as_str()))))
}

/// POST /bookings
/// Opens a slot (201) or joins the player waiting there (200)
async fn join_slot(
    State(state): State<AppState>,
    body: Result<Json<JoinSlotBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ReservationPayload>), AppError> {
    let Json(body) = body?;
    let reservation = state.reservations.join(body.into()).await?;

    let status = match reservation.outcome {
        Outcome::Created => StatusCode::CREATED,
        Outcome::Joined => StatusCode::OK,
    };
    Ok((status, Json(reservation.into())))
}

/// GET /bookings/availability/{court_id}?date=DD/MM/YYYY
async fn check_availability(
    State(state): State<AppState>,
    court_id: Result<Path<i64>, PathRejection>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityMap>, AppError> {
    let Path(court_id) = court_id?;
    let date = match query.date.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.parse::<SlotDate>()?,
        _ => SlotDate::today(),
    };

    let availability = state.reservations.availability(court_id, date).await?;
    Ok(Json(availability))
}

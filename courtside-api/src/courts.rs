use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};

use crate::error::AppError;
use crate::payload::CourtPayload;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courts", get(list_courts))
        .route("/courts/{id}", get(get_court))
}

/// GET /courts
async fn list_courts(State(state): State<AppState>) -> Result<Json<Vec<CourtPayload>>, AppError> {
    let courts = state.reservations.list_courts().await?;
    Ok(Json(courts.into_iter().map(CourtPayload::from).collect()))
}

/// GET /courts/{id}
async fn get_court(
    State(state): State<AppState>,
    court_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CourtPayload>, AppError> {
    let Path(court_id) = court_id?;
    let court = state.reservations.get_court(court_id).await?;
    Ok(Json(court.into()))
}

use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod courts;
pub mod error;
pub mod payload;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The browser frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let routes = Router::new()
        .merge(courts::routes())
        .merge(bookings::routes());

    let router = match state.api_prefix.as_deref().map(|p| p.trim_end_matches('/')) {
        Some(prefix) if !prefix.is_empty() => Router::new().nest(prefix, routes),
        _ => routes,
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

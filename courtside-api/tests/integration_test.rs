use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use courtside_api::{app, AppState};
use courtside_core::ReservationRules;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::in_memory(ReservationRules::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn book(app: &Router, court_id: i64, time: &str, player: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/bookings",
        Some(json!({
            "court_id": court_id,
            "time": time,
            "player_name": player,
            "date": "12/10/2025",
        })),
    )
    .await
}

#[tokio::test]
async fn test_list_and_get_courts() {
    let app = test_app();

    let (status, courts) = send(&app, Method::GET, "/courts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(courts.as_array().unwrap().len(), 3);
    assert_eq!(
        courts[0],
        json!({ "id": 1, "name": "Court 1", "type": "clay", "location": "Sector A" })
    );

    let (status, court) = send(&app, Method::GET, "/courts/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(court["type"], "synthetic");

    let (status, body) = send(&app, Method::GET, "/courts/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_join_and_reject_full_slot() {
    let app = test_app();

    let (status, created) = book(&app, 1, "10:00", "Ana").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Booking created successfully!");
    assert_eq!(created["booking"]["players"], json!(["Ana"]));
    assert_eq!(created["booking"]["is_complete"], false);
    assert_eq!(created["booking"]["court_name"], "Court 1");
    assert_eq!(created["booking"]["time"], "10:00");
    assert_eq!(created["booking"]["date"], "12/10/2025");

    let (status, joined) = book(&app, 1, "10:00", "Bruno").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(joined["booking"]["id"], created["booking"]["id"]);
    assert_eq!(joined["booking"]["players"], json!(["Ana", "Bruno"]));
    assert_eq!(joined["booking"]["is_complete"], true);
    assert!(joined["message"].as_str().unwrap().contains("Ana"));

    let (status, rejected) = book(&app, 1, "10:00", "Carla").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected["error"], "This time slot is already fully booked");

    let id = created["booking"]["id"].as_i64().unwrap();
    let (status, stored) = send(&app, Method::GET, &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["players"], json!(["Ana", "Bruno"]));
}

#[tokio::test]
async fn test_missing_and_malformed_fields() {
    let app = test_app();

    let bodies = vec![
        json!({ "time": "10:00", "player_name": "Ana" }),
        json!({ "court_id": 1, "player_name": "Ana" }),
        json!({ "court_id": 1, "time": "10:00" }),
        json!({ "court_id": 1, "time": "10:00", "player_name": "" }),
        json!({ "court_id": 1, "time": "ten", "player_name": "Ana" }),
        json!({ "court_id": 1, "time": "10:00", "player_name": "Ana", "date": "2025-10-12" }),
        json!({ "court_id": "one", "time": "10:00", "player_name": "Ana" }),
    ];

    for body in bodies {
        let (status, response) = send(&app, Method::POST, "/bookings", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(response["error"].is_string());
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, bookings) = send(&app, Method::GET, "/bookings", None).await;
    assert_eq!(bookings, json!([]));
}

#[tokio::test]
async fn test_unknown_court_on_booking() {
    let app = test_app();
    let (status, body) = book(&app, 42, "10:00", "Ana").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Court not found: 42");
}

#[tokio::test]
async fn test_availability_reflects_bookings() {
    let app = test_app();
    let uri = "/bookings/availability/1?date=12/10/2025";

    let (status, empty) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!({}));

    book(&app, 1, "09:00", "Ana").await;
    let (_, open) = send(&app, Method::GET, uri, None).await;
    assert_eq!(
        open,
        json!({ "09:00": { "available": true, "players_count": 1, "players": ["Ana"] } })
    );

    book(&app, 1, "09:00", "Bruno").await;
    let (_, full) = send(&app, Method::GET, uri, None).await;
    assert_eq!(full["09:00"]["available"], false);
    assert_eq!(full["09:00"]["players_count"], 2);
    assert_eq!(full["09:00"]["players"], json!(["Ana", "Bruno"]));

    let (_, other_day) = send(&app, Method::GET, "/bookings/availability/1?date=13/10/2025", None).await;
    assert_eq!(other_day, json!({}));

    let (status, _) = send(&app, Method::GET, "/bookings/availability/1?date=2025-10-12", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_round_trips_created_bookings() {
    let app = test_app();
    book(&app, 1, "08:00", "Ana").await;
    book(&app, 2, "15:00", "Bruno").await;
    book(&app, 1, "08:00", "Carla").await;

    let (status, bookings) = send(&app, Method::GET, "/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 2);

    assert_eq!(bookings[0]["court_id"], 1);
    assert_eq!(bookings[0]["time"], "08:00");
    assert_eq!(bookings[0]["players"], json!(["Ana", "Carla"]));
    assert_eq!(bookings[1]["court_name"], "Court 2");
    assert_eq!(bookings[1]["players"], json!(["Bruno"]));
}

#[tokio::test]
async fn test_unknown_booking_id() {
    let app = test_app();
    let (status, _) = send(&app, Method::GET, "/bookings/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let app = test_app();
    for uri in ["/courts/abc", "/bookings/xyz", "/bookings/availability/abc"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string(), "{uri}: {body}");
    }
}

#[tokio::test]
async fn test_routes_mount_under_prefix() {
    let app = app(AppState::in_memory(ReservationRules::default()).with_prefix(Some("/api".to_string())));

    let (status, _) = send(&app, Method::GET, "/api/courts", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/courts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

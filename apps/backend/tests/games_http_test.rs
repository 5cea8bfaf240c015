//! HTTP-level tests: routes, problem-details contract, and ETag round-trips.
//!
//! This binary keeps the default commit-on-ok transaction policy so that
//! state persists across requests against the same in-memory database.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::config::db::DbProfile;
use backend::domain::snapshot::GameSnapshot;
use backend::infra::state::build_state;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::app_state::AppState;
use backend_test_support::problem_details::assert_problem_details_from_parts;
use serde_json::{json, Value};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

async fn test_state() -> AppState {
    build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB")
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(web::Data::new($state))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_create_game_returns_snapshot_and_etag() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([{ "name": "Alice" }, { "name": "Bob" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let etag = resp
        .headers()
        .get(ETAG)
        .expect("ETag header should be present")
        .to_str()
        .unwrap()
        .to_string();

    let snapshot: GameSnapshot = test::read_body_json(resp).await;
    assert_eq!(etag, format!(r#""game-{}-v1""#, snapshot.game_id));
    assert_eq!(snapshot.state.players.len(), 2);
    assert_eq!(snapshot.state.players[0].name, "Alice");
    assert_eq!(snapshot.state.next_player, 0);
    assert!(!snapshot.state.winner_declared);
}

#[actix_web::test]
async fn test_get_snapshot_honors_if_none_match() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([{ "name": "Alice" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: GameSnapshot = test::read_body_json(resp).await;

    let uri = format!("/api/games/{}", created.game_id);
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = resp.headers().get(ETAG).unwrap().to_str().unwrap().to_string();

    let fetched: GameSnapshot = test::read_body_json(resp).await;
    assert_eq!(fetched, created);

    // Same version: 304 with no body
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((IF_NONE_MATCH, etag.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(resp.headers().get(ETAG).unwrap().to_str().unwrap(), etag);
}

#[actix_web::test]
async fn test_create_with_no_players_is_a_problem_details_400() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "PLAYER_COUNT",
        StatusCode::BAD_REQUEST,
        Some("between 1 and 10"),
    );
}

#[actix_web::test]
async fn test_turn_by_the_wrong_player_is_403() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([{ "name": "Alice" }, { "name": "Bob" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: GameSnapshot = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/turns", created.game_id))
        .set_json(json!({ "player_name": "Bob", "game": created }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "NOT_YOUR_TURN",
        StatusCode::FORBIDDEN,
        Some("It is Alice's turn."),
    );
}

#[actix_web::test]
async fn test_valid_turn_advances_the_game() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([{ "name": "Alice" }, { "name": "Bob" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: GameSnapshot = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/turns", created.game_id))
        .set_json(json!({ "player_name": "Alice", "game": created }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let etag = resp.headers().get(ETAG).unwrap().to_str().unwrap().to_string();
    let updated: GameSnapshot = test::read_body_json(resp).await;

    assert_eq!(etag, format!(r#""game-{}-v2""#, updated.game_id));
    assert_eq!(updated.state.next_player, 1);
    // A first roll of 1..=6 lands on 2, 3, 5, 6, or a ladder jump (1→38, 4→14).
    let position = updated.state.players[0].position;
    assert!(
        [2, 3, 5, 6, 14, 38].contains(&position),
        "unexpected first-move position {position}"
    );
    assert_eq!(updated.state.players[1].position, 0);
}

#[actix_web::test]
async fn test_stale_snapshot_is_a_409() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([{ "name": "Alice" }, { "name": "Bob" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: GameSnapshot = test::read_body_json(resp).await;

    let mut stale = created.clone();
    stale.state.players[0].position = 12;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/turns", created.game_id))
        .set_json(json!({ "player_name": "Alice", "game": stale }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INCONSISTENT_STATE",
        StatusCode::CONFLICT,
        Some("does not match the server's state"),
    );
}

#[actix_web::test]
async fn test_unknown_game_is_a_404() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    );
}

#[actix_web::test]
async fn test_malformed_game_id_is_a_400() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::get()
        .uri("/api/games/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INVALID_GAME_ID",
        StatusCode::BAD_REQUEST,
        None,
    );
}

#[actix_web::test]
async fn test_if_match_with_a_stale_version_is_a_409() {
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([{ "name": "Alice" }, { "name": "Bob" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: GameSnapshot = test::read_body_json(resp).await;

    // Claim a version that has already moved on
    let stale_etag = format!(r#""game-{}-v9""#, created.game_id);
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/turns", created.game_id))
        .insert_header(("If-Match", stale_etag))
        .set_json(json!({ "player_name": "Alice", "game": created }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "OPTIMISTIC_LOCK",
        StatusCode::CONFLICT,
        Some("modified concurrently"),
    );
}

#[actix_web::test]
async fn test_error_body_is_json_value_shaped() {
    // Sanity-check the raw shape once, beyond the shared helper.
    let app = test_app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["code"], "PLAYER_COUNT");
    assert_eq!(body["status"], 400);
    assert!(body["type"]
        .as_str()
        .unwrap()
        .ends_with("/errors/PLAYER_COUNT"));
    assert!(body["trace_id"].as_str().is_some());
}

//! Game-related HTTP routes.

use actix_web::http::header::{ETAG, IF_MATCH, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::domain::snapshot::{self, GameSnapshot};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::game_id::GameId;
use crate::http::etag::{game_etag, parse_game_version_from_etag};
use crate::repos::games::{self, Game};
use crate::services::game_flow::GameFlowService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct NewPlayerRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PlayTurnRequest {
    player_name: String,
    game: GameSnapshot,
}

fn game_response(game: &Game, status: StatusCode) -> HttpResponse {
    let body = GameSnapshot {
        game_id: game.id,
        state: snapshot::snapshot(&game.state),
    };
    HttpResponse::build(status)
        .insert_header((ETAG, game_etag(game.id, game.lock_version)))
        .json(body)
}

/// POST /api/games
///
/// Creates a new game from an ordered list of players. The response carries
/// the initial snapshot and an ETag with the game's lock version.
async fn create_game(
    http_req: HttpRequest,
    body: web::Json<Vec<NewPlayerRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let names: Vec<String> = body.into_inner().into_iter().map(|p| p.name).collect();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            service.create_game(txn, &names).await
        })
    })
    .await?;

    Ok(game_response(&game, StatusCode::CREATED))
}

/// GET /api/games/{game_id}
///
/// Returns the current game snapshot as JSON with an ETag header for
/// optimistic concurrency. Supports `If-None-Match` for HTTP caching: if the
/// client's ETag matches the current version, returns `304 Not Modified`
/// with no body.
async fn get_snapshot(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(games::require_game(txn, id).await?) })
    })
    .await?;

    let etag_value = game_etag(game.id, game.lock_version);

    // Check If-None-Match header for HTTP caching
    if let Some(if_none_match) = http_req.headers().get(IF_NONE_MATCH) {
        if let Ok(client_etag) = if_none_match.to_str() {
            // Wildcard "*" means "any representation exists" (RFC 9110)
            let matches = client_etag.trim() == "*"
                || client_etag
                    .split(',')
                    .map(str::trim)
                    .any(|etag| etag == etag_value);

            if matches {
                return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
                    .insert_header((ETAG, etag_value))
                    .finish());
            }
        }
    }

    Ok(game_response(&game, StatusCode::OK))
}

/// POST /api/games/{game_id}/turns
///
/// Submits a turn: the actor's name plus the client's snapshot of the game.
/// The snapshot must match the authoritative state or the turn is rejected.
/// An optional `If-Match` header carries the client's last seen game ETag
/// and fails fast on version mismatch.
async fn play_turn(
    http_req: HttpRequest,
    game_id: GameId,
    body: web::Json<PlayTurnRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;

    let expected_lock_version = match http_req.headers().get(IF_MATCH) {
        Some(value) => {
            let value = value.to_str().map_err(|_| {
                AppError::bad_request(ErrorCode::InvalidHeader, "If-Match header is not valid UTF-8")
            })?;
            Some(parse_game_version_from_etag(value)?)
        }
        None => None,
    };

    let request = body.into_inner();

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = GameFlowService::new();
            service
                .play_turn(
                    txn,
                    id,
                    &request.game,
                    &request.player_name,
                    expected_lock_version,
                )
                .await
        })
    })
    .await?;

    Ok(game_response(&game, StatusCode::OK))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)));
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_snapshot)));
    cfg.service(web::resource("/{game_id}/turns").route(web::post().to(play_turn)));
}

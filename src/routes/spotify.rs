/// Proxy routes: every handler reads the session cookie, fails 401 without
/// touching the upstream, then forwards with minimal transformation.
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{DeviceRequest, PlayRequest, SearchQuery, TransferBody, TransferRequest};
use crate::services::spotify::UpstreamResponse;
use crate::utils::cookies;
use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/spotify/me", get(me))
        .route("/api/spotify/devices", get(devices))
        .route(
            "/api/spotify/me/player/currently-playing",
            get(currently_playing),
        )
        .route("/api/spotify/collections", get(collections))
        .route("/api/spotify/playlist/:id/tracks", get(playlist_tracks))
        .route("/api/spotify/search", get(search))
        .route("/api/spotify/play", put(play))
        .route("/api/spotify/pause", put(pause))
        .route("/api/spotify/next", post(next_track))
        .route("/api/spotify/transfer", put(transfer))
}

fn require_session(jar: &CookieJar) -> AppResult<String> {
    cookies::access_token(jar)
        .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()))
}

/// Upstream status and body, forwarded verbatim.
fn passthrough(upstream: UpstreamResponse) -> Response {
    let status =
        StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response()
}

/// Upstream 204 means the command landed; callers get a plain ack.
fn ack_or_passthrough(upstream: UpstreamResponse) -> Response {
    if upstream.is_no_content() {
        Json(json!({ "ok": true })).into_response()
    } else {
        passthrough(upstream)
    }
}

async fn me(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let token = require_session(&jar)?;
    Ok(passthrough(state.spotify.get(&token, "/me").await?))
}

async fn devices(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let token = require_session(&jar)?;
    Ok(passthrough(
        state.spotify.get(&token, "/me/player/devices").await?,
    ))
}

async fn currently_playing(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<Response> {
    let token = require_session(&jar)?;
    let upstream = state
        .spotify
        .get(&token, "/me/player/currently-playing")
        .await?;

    // 204 here means nothing is playing, not an error.
    if upstream.is_no_content() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(passthrough(upstream))
}

async fn collections(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    let token = require_session(&jar)?;
    let path = format!("/users/{}/playlists", state.config.curator_user_id);
    let items = state.spotify.fetch_all_pages(&token, &path).await?;
    Ok(Json(items).into_response())
}

async fn playlist_tracks(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let token = require_session(&jar)?;
    if id.is_empty() {
        return Err(AppError::BadRequest("Missing playlist id".to_string()));
    }
    let path = format!("/playlists/{}/tracks", id);
    let items = state.spotify.fetch_all_pages(&token, &path).await?;
    Ok(Json(items).into_response())
}

async fn search(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let token = require_session(&jar)?;
    let q = query.q.unwrap_or_default();
    let kind = query.kind.unwrap_or_else(|| "track".to_string());
    let limit = query.limit.unwrap_or_else(|| "10".to_string());

    Ok(passthrough(
        state.spotify.search(&token, &q, &kind, &limit).await?,
    ))
}

async fn play(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Option<Json<PlayRequest>>,
) -> AppResult<Response> {
    let token = require_session(&jar)?;
    let request = payload.map(|Json(p)| p).unwrap_or_default();
    let (device_id, body) = request.into_parts();

    Ok(ack_or_passthrough(
        state
            .spotify
            .play(&token, device_id.as_deref(), &body)
            .await?,
    ))
}

async fn pause(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Option<Json<DeviceRequest>>,
) -> AppResult<Response> {
    let token = require_session(&jar)?;
    let device_id = payload.and_then(|Json(p)| p.device_id);

    Ok(ack_or_passthrough(
        state.spotify.pause(&token, device_id.as_deref()).await?,
    ))
}

async fn next_track(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Option<Json<DeviceRequest>>,
) -> AppResult<Response> {
    let token = require_session(&jar)?;
    let device_id = payload.and_then(|Json(p)| p.device_id);

    Ok(ack_or_passthrough(
        state.spotify.next(&token, device_id.as_deref()).await?,
    ))
}

async fn transfer(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Option<Json<TransferRequest>>,
) -> AppResult<Response> {
    let token = require_session(&jar)?;
    let request = payload.map(|Json(p)| p).unwrap_or_default();

    let device_id = request
        .device_id
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest("device_id required".to_string()))?;
    let body = TransferBody {
        device_ids: vec![device_id],
        play: request.play.unwrap_or(true),
    };

    Ok(ack_or_passthrough(
        state.spotify.transfer(&token, &body).await?,
    ))
}

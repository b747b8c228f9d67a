/// OAuth session routes: login redirect, callback exchange, refresh, logout.
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::CallbackQuery;
use crate::services::SpotifyOAuth;
use crate::utils::cookies;
use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/spotify/login", get(login))
        .route("/api/auth/spotify/callback", get(callback))
        .route("/auth/spotify/refresh", post(refresh))
        .route("/auth/spotify/logout", post(logout))
}

/// Plain 302, the status the browser flow expects.
fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Response)> {
    let state_value = SpotifyOAuth::generate_state();
    let url = state.oauth.authorize_url(&state_value)?;

    info!("OAuth login initiated");
    Ok((jar.add(cookies::state_cookie(&state_value)), found(&url)))
}

async fn callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> (CookieJar, Response) {
    let saved_state = jar
        .get(cookies::OAUTH_STATE_COOKIE)
        .map(|c| c.value().to_string());
    // Single use: the state cookie goes away no matter how this ends.
    let jar = jar.remove(cookies::removal(cookies::OAUTH_STATE_COOKIE));

    let (code, returned_state) = match (query.code, query.state) {
        (Some(code), Some(returned_state)) if !code.is_empty() && !returned_state.is_empty() => {
            (code, returned_state)
        }
        _ => {
            return (
                jar,
                AppError::BadRequest("Invalid state or missing code".to_string()).into_response(),
            );
        }
    };

    if saved_state.as_deref() != Some(returned_state.as_str()) {
        warn!("OAuth callback rejected: state does not match login cookie");
        return (
            jar,
            AppError::BadRequest("State mismatch".to_string()).into_response(),
        );
    }

    let tokens = match state.oauth.exchange_code(&code).await {
        Ok(tokens) => tokens,
        Err(e) => return (jar, e.into_response()),
    };

    let mut jar = jar.add(cookies::access_cookie(
        &tokens.access_token,
        tokens.expires_in.unwrap_or(3600),
    ));
    if let Some(refresh_token) = &tokens.refresh_token {
        jar = jar.add(cookies::refresh_cookie(refresh_token));
    }

    info!("OAuth login completed");
    (jar, found(&state.config.frontend_origin))
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<serde_json::Value>)> {
    let refresh_token = cookies::refresh_token(&jar)
        .ok_or_else(|| AppError::Unauthenticated("No refresh token".to_string()))?;

    let tokens = state.oauth.refresh_token(&refresh_token).await?;

    let mut jar = jar.add(cookies::access_cookie(
        &tokens.access_token,
        tokens.expires_in.unwrap_or(3600),
    ));
    // Rotation: the accounts service may hand back a new refresh token.
    if let Some(rotated) = &tokens.refresh_token {
        jar = jar.add(cookies::refresh_cookie(rotated));
    }

    Ok((jar, Json(json!({ "ok": true }))))
}

async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let jar = jar
        .remove(cookies::removal(cookies::ACCESS_TOKEN_COOKIE))
        .remove(cookies::removal(cookies::REFRESH_TOKEN_COOKIE));

    (jar, Json(json!({ "ok": true })))
}

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{FavoritesQuery, FavoritesResponse, SetFavoritesRequest};
use crate::services::FavoritesService;
use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/getFavorites", get(get_favorites))
        .route("/api/setFavorites", post(set_favorites))
}

async fn get_favorites(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FavoritesQuery>,
) -> AppResult<Json<FavoritesResponse>> {
    let user_id = query
        .user_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing userId".to_string()))?;

    let items = FavoritesService::new(&state.db).get(&user_id).await?;
    Ok(Json(FavoritesResponse { items }))
}

async fn set_favorites(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetFavoritesRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user_id = payload
        .user_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing userId or items".to_string()))?;
    let items = payload
        .items
        .ok_or_else(|| AppError::BadRequest("Missing userId or items".to_string()))?;

    FavoritesService::new(&state.db).set(&user_id, &items).await?;
    Ok(Json(json!({ "ok": true })))
}

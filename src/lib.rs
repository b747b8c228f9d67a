pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::Database;
use crate::services::{SpotifyClient, SpotifyOAuth};

pub struct AppState {
    pub db: Database,
    pub config: Config,
    pub oauth: SpotifyOAuth,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(config: Config, db: Database, http_client: reqwest::Client) -> Self {
        let oauth = SpotifyOAuth::new(config.clone(), http_client.clone());
        let spotify = SpotifyClient::new(config.api_base_url.clone(), http_client);

        AppState {
            db,
            config,
            oauth,
            spotify,
        }
    }
}

/// Build the application router with all routes and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(routes::auth::create_routes())
        .merge(routes::spotify::create_routes())
        .merge(routes::favorites::create_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "message": "Backend is up and running" }))
}

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tunedeck::config::Config;
use tunedeck::db::Database;
use tunedeck::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting tunedeck backend");

    let config = Config::from_env()?;
    info!("Configuration loaded from environment");

    let db = Database::new(&config.database_url).await?;
    info!("Database connected");

    db.run_migrations().await?;

    // Shared client: connection pooling across every upstream call
    let http_client = reqwest::Client::builder()
        .pool_max_idle_per_host(10)
        .build()?;

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let state = Arc::new(AppState::new(config, db, http_client));
    let app = tunedeck::app(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use anyhow::Context;
use std::env;

/// Application configuration, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,

    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    /// Redirect URI registered with Spotify, selected by APP_ENV.
    pub spotify_redirect_uri: String,
    pub spotify_scopes: String,
    /// User whose public playlists back the collections endpoint.
    pub curator_user_id: String,

    /// Base URL of the Spotify accounts service (authorize + token endpoints).
    pub accounts_base_url: String,
    /// Base URL of the Spotify Web API.
    pub api_base_url: String,

    /// Where the browser is sent after a successful callback.
    pub frontend_origin: String,
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let is_production = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let spotify_redirect_uri = if is_production {
            required("SPOTIFY_PROD_REDIRECT_URI")?
        } else {
            required("SPOTIFY_LOCAL_REDIRECT_URI")?
        };

        let frontend_origin = if is_production {
            required("FRONTEND_PROD_ORIGIN")?
        } else {
            env::var("FRONTEND_LOCAL_ORIGIN")
                .unwrap_or_else(|_| "http://127.0.0.1:4000".to_string())
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4001".to_string())
                .parse()
                .context("PORT must be a number")?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "tunedeck.db".to_string()),
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            spotify_redirect_uri,
            spotify_scopes: env::var("SPOTIFY_SCOPES")
                .unwrap_or_else(|_| "user-read-email".to_string()),
            curator_user_id: required("SPOTIFY_CURATOR_USER_ID")?,
            accounts_base_url: env::var("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com".to_string()),
            api_base_url: env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string()),
            frontend_origin,
        })
    }
}

/// OAuth authorization-code flow against the Spotify accounts service.
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::TokenResponse;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use reqwest::Client;
use tracing::{debug, error};

#[derive(Clone)]
pub struct SpotifyOAuth {
    config: Config,
    client: Client,
}

impl SpotifyOAuth {
    pub fn new(config: Config, client: Client) -> Self {
        Self { config, client }
    }

    /// Random anti-forgery state value, one per login attempt.
    pub fn generate_state() -> String {
        use rand::Rng;
        let mut rng = rand::rng();
        let random_bytes: Vec<u8> = (0..16).map(|_| rng.random()).collect();
        URL_SAFE_NO_PAD.encode(random_bytes)
    }

    /// Authorization endpoint URL the browser is redirected to at login.
    pub fn authorize_url(&self, state: &str) -> AppResult<String> {
        let params = [
            ("response_type", "code"),
            ("client_id", self.config.spotify_client_id.as_str()),
            ("scope", self.config.spotify_scopes.as_str()),
            ("redirect_uri", self.config.spotify_redirect_uri.as_str()),
            ("state", state),
        ];

        let url = reqwest::Url::parse_with_params(
            &format!("{}/authorize", self.config.accounts_base_url),
            &params,
        )
        .map_err(|e| AppError::Internal(format!("Failed to build auth URL: {}", e)))?;

        Ok(url.to_string())
    }

    /// Exchange the callback code for tokens. The redirect URI must be the
    /// exact value used at login.
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenResponse> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.spotify_redirect_uri.as_str()),
        ];

        debug!("Exchanging authorization code for tokens");
        self.token_request(&params, "Token exchange").await
    }

    /// Exchange a refresh token for a fresh access token. The response may
    /// carry a rotated refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        debug!("Refreshing access token");
        self.token_request(&params, "Token refresh").await
    }

    async fn token_request(
        &self,
        params: &[(&str, &str)],
        what: &str,
    ) -> AppResult<TokenResponse> {
        let response = self
            .client
            .post(format!("{}/api/token", self.config.accounts_base_url))
            .basic_auth(
                &self.config.spotify_client_id,
                Some(&self.config.spotify_client_secret),
            )
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("{} failed: {} - {}", what, status, error_text);
            return Err(AppError::UpstreamAuth(format!(
                "{} failed: {} - {}",
                what, status, error_text
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse token response: {}", e);
            AppError::UpstreamAuth(format!("Failed to parse token response: {}", e))
        })?;

        Ok(token_response)
    }
}

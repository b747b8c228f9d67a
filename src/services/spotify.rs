/// Thin proxy client for the Spotify Web API. Every call carries the
/// session's bearer token; responses come back with minimal transformation.
use crate::error::{AppError, AppResult};
use crate::models::{Page, PlayBody, TransferBody};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Fixed page size for aggregated listings.
const PAGE_SIZE: u64 = 100;

/// Raw upstream reply: status and body, nothing interpreted.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_no_content(&self) -> bool {
        self.status == 204
    }
}

#[derive(Clone)]
pub struct SpotifyClient {
    api_base: String,
    client: Client,
}

impl SpotifyClient {
    pub fn new(api_base: String, client: Client) -> Self {
        Self { api_base, client }
    }

    /// Single authenticated GET, status and body forwarded as-is.
    pub async fn get(&self, token: &str, path_and_query: &str) -> AppResult<UpstreamResponse> {
        let response = self
            .client
            .get(format!("{}{}", self.api_base, path_and_query))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }

    /// Walk a paginated listing in page-size steps, concatenating items.
    ///
    /// Pages are fetched in increasing offset order; the walk continues
    /// while `offset + limit < total` as reported by the page just read.
    /// Any non-success page aborts the whole aggregation and surfaces that
    /// page's status and body; prior pages are discarded.
    pub async fn fetch_all_pages(&self, token: &str, path: &str) -> AppResult<Vec<Value>> {
        let mut items = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let response = self
                .client
                .get(format!(
                    "{}{}?limit={}&offset={}",
                    self.api_base, path, PAGE_SIZE, offset
                ))
                .bearer_auth(token)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::Upstream {
                    status: status.as_u16(),
                    body,
                });
            }

            let page: Page = response.json().await?;
            debug!(
                "Fetched page at offset {} ({} items, total {})",
                page.offset,
                page.items.len(),
                page.total
            );
            items.extend(page.items);

            // A zero limit would never advance; treat it as the last page.
            if page.limit > 0 && page.offset + page.limit < page.total {
                offset = page.offset + page.limit;
            } else {
                break;
            }
        }

        Ok(items)
    }

    pub async fn search(
        &self,
        token: &str,
        q: &str,
        kind: &str,
        limit: &str,
    ) -> AppResult<UpstreamResponse> {
        let path = format!(
            "/search?q={}&type={}&limit={}&market=us",
            urlencoding::encode(q),
            urlencoding::encode(kind),
            urlencoding::encode(limit)
        );
        self.get(token, &path).await
    }

    pub async fn play(
        &self,
        token: &str,
        device_id: Option<&str>,
        body: &PlayBody,
    ) -> AppResult<UpstreamResponse> {
        self.player_command(Method::PUT, "/me/player/play", token, device_id, Some(body))
            .await
    }

    pub async fn pause(&self, token: &str, device_id: Option<&str>) -> AppResult<UpstreamResponse> {
        self.player_command::<()>(Method::PUT, "/me/player/pause", token, device_id, None)
            .await
    }

    pub async fn next(&self, token: &str, device_id: Option<&str>) -> AppResult<UpstreamResponse> {
        self.player_command::<()>(Method::POST, "/me/player/next", token, device_id, None)
            .await
    }

    pub async fn transfer(&self, token: &str, body: &TransferBody) -> AppResult<UpstreamResponse> {
        self.player_command(Method::PUT, "/me/player", token, None, Some(body))
            .await
    }

    async fn player_command<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        device_id: Option<&str>,
        body: Option<&T>,
    ) -> AppResult<UpstreamResponse> {
        let mut url = Url::parse(&format!("{}{}", self.api_base, path))
            .map_err(|e| AppError::Internal(format!("Failed to build player URL: {}", e)))?;
        if let Some(id) = device_id {
            url.query_pairs_mut().append_pair("device_id", id);
        }

        let mut request = self.client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}

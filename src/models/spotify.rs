use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token response from the accounts service (code exchange and refresh).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// One page of a paginated Web API listing.
#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub total: u64,
}

/// Query parameters returned by the authorization server.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
}

/// Playback start/resume request from the browser. All fields optional;
/// `device_id` becomes a query parameter upstream, the rest form the body.
#[derive(Debug, Default, Deserialize)]
pub struct PlayRequest {
    pub device_id: Option<String>,
    pub uris: Option<Vec<String>>,
    pub context_uri: Option<String>,
    pub offset: Option<Value>,
    pub position_ms: Option<u64>,
}

/// Body forwarded to the player endpoint. Omitted fields must be absent on
/// the wire, not null.
#[derive(Debug, Serialize)]
pub struct PlayBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,
}

impl PlayRequest {
    pub fn into_parts(self) -> (Option<String>, PlayBody) {
        (
            self.device_id,
            PlayBody {
                uris: self.uris,
                context_uri: self.context_uri,
                offset: self.offset,
                position_ms: self.position_ms,
            },
        )
    }
}

/// Pause/next request; only an optional playback target.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceRequest {
    pub device_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransferRequest {
    pub device_id: Option<String>,
    pub play: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TransferBody {
    pub device_ids: Vec<String>,
    pub play: bool,
}

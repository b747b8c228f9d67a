use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FavoritesQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetFavoritesRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub items: Vec<String>,
}

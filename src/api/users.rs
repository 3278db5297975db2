// User directory listing — admin search over platform accounts.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::client::AdminApiClient;

/// A platform account as the admin directory returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub handle_name: String,
    pub username: String,
    #[serde(default)]
    pub profile_pic: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub post_count: u32,
    #[serde(default)]
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

/// List platform accounts, optionally filtered by a server-side search
/// query (matched against username and handle name by the backend).
pub async fn list_users(
    api: &AdminApiClient,
    search: Option<&str>,
    limit: u32,
) -> Result<Vec<UserAccount>> {
    let limit = limit.to_string();
    let mut query: Vec<(&str, &str)> = vec![("limit", &limit)];
    if let Some(q) = search {
        query.push(("search", q));
    }
    api.get_json("admin/users", &query, "Failed to fetch users")
        .await
}

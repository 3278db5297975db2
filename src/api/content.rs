// Post and reel listing — the admin view over published content.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::moderation::model::{ContentKind, Media, UserSummary};

use super::client::AdminApiClient;

/// A published post or reel as the admin listing returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media: Vec<Media>,
    /// Absent when the author account has since been deleted.
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
}

/// List published content, optionally restricted to one kind.
pub async fn list_content(
    api: &AdminApiClient,
    kind: Option<ContentKind>,
    limit: u32,
) -> Result<Vec<ContentItem>> {
    let limit = limit.to_string();
    let mut query: Vec<(&str, &str)> = vec![("limit", &limit)];
    if let Some(kind) = kind {
        query.push(("type", kind.as_str()));
    }
    api.get_json("admin/content", &query, "Failed to fetch content")
        .await
}

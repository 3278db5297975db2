// Story listing — currently active (unexpired) stories.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::moderation::model::{Media, UserSummary};

use super::client::AdminApiClient;

/// An active story as the admin listing returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub media: Vec<Media>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// List active stories, newest first.
pub async fn list_stories(api: &AdminApiClient, limit: u32) -> Result<Vec<Story>> {
    let limit = limit.to_string();
    api.get_json("admin/stories", &[("limit", &limit)], "Failed to fetch stories")
        .await
}

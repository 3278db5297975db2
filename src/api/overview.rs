// Headline counts for the overview panel.

use anyhow::Result;
use serde::Deserialize;

use super::client::AdminApiClient;

/// Platform-wide counts the overview panel leads with.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewCounts {
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub posts: u64,
    #[serde(default)]
    pub reels: u64,
    #[serde(default)]
    pub stories: u64,
    #[serde(default)]
    pub pending_user_reports: u64,
    #[serde(default)]
    pub pending_content_reports: u64,
}

/// Fetch the headline counts.
pub async fn fetch_overview(api: &AdminApiClient) -> Result<OverviewCounts> {
    api.get_json("admin/overview", &[], "Failed to fetch overview")
        .await
}

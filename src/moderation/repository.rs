// Report repository — the backend seam for everything report-shaped.
//
// The trait is the contract the session is written against; the HTTP
// implementation adapts it onto the admin REST API. Tests swap in an
// in-memory mock. All methods are async because the real backend is
// network I/O.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::api::client::AdminApiClient;

use super::model::{Report, ReportMode, ViewMode};
use super::target::ReportTarget;

/// The searched target entity together with every report filed against it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetReports {
    pub target: ReportTarget,
    pub reports: Vec<Report>,
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    // --- Fetches ---

    /// List reports for a mode under a resolution-state view. The view
    /// filter is applied server-side.
    async fn list_reports(&self, mode: ReportMode, view: ViewMode) -> Result<Vec<Report>>;

    /// Fetch one target entity and all reports filed against it.
    async fn reports_for_target(&self, mode: ReportMode, target_id: &str) -> Result<TargetReports>;

    // --- Terminal actions (idempotent on the server) ---

    /// Close a report without action against the target.
    async fn dismiss(&self, mode: ReportMode, report_id: &str) -> Result<()>;

    /// Close a report, action taken.
    async fn resolve(&self, mode: ReportMode, report_id: &str) -> Result<()>;

    /// Close a report and ban its target. The ban happens server-side and
    /// is not reflected in the report's own fields.
    async fn ban_and_resolve(&self, mode: ReportMode, report_id: &str) -> Result<()>;
}

/// HTTP implementation over the admin REST API.
pub struct HttpReportRepository {
    api: AdminApiClient,
}

impl HttpReportRepository {
    pub fn new(api: AdminApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReportRepository for HttpReportRepository {
    async fn list_reports(&self, mode: ReportMode, view: ViewMode) -> Result<Vec<Report>> {
        let path = format!("admin/reports/{}", mode.as_str());
        self.api
            .get_json(&path, &[("view", view.as_str())], "Failed to fetch reports")
            .await
    }

    async fn reports_for_target(&self, mode: ReportMode, target_id: &str) -> Result<TargetReports> {
        let path = format!("admin/reports/{}/target/{}", mode.as_str(), target_id);
        self.api
            .get_json(&path, &[], "Failed to fetch reports for target")
            .await
    }

    async fn dismiss(&self, mode: ReportMode, report_id: &str) -> Result<()> {
        let path = format!("admin/reports/{}/{}/dismiss", mode.as_str(), report_id);
        self.api.patch_unit(&path, "Failed to dismiss report").await
    }

    async fn resolve(&self, mode: ReportMode, report_id: &str) -> Result<()> {
        let path = format!("admin/reports/{}/{}/resolve", mode.as_str(), report_id);
        self.api.patch_unit(&path, "Failed to resolve report").await
    }

    async fn ban_and_resolve(&self, mode: ReportMode, report_id: &str) -> Result<()> {
        let path = format!("admin/reports/{}/{}/ban", mode.as_str(), report_id);
        self.api
            .patch_unit(&path, "Failed to ban reported target")
            .await
    }
}

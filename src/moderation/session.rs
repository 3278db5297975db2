// Report moderation session — the state machine behind the console.
//
// Owns every piece of browsing state: the active mode and view, the main
// report list, the optional target-search context, and the selection.
// Reports live in one normalized store keyed by id; the lists hold ordered
// id references, so a terminal action patches a single entry and every
// view that holds the report sees the change. The session is the only
// writer of its state, and methods take `&mut self`, so two fetches can
// never race through one handle.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::model::{Report, ReportMode, ViewMode};
use super::repository::ReportRepository;
use super::target::ReportTarget;

/// Terminal moderation actions. Any of these moves a report out of the
/// pending state; none can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    Dismiss,
    Resolve,
    BanAndResolve,
}

impl ReportAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportAction::Dismiss => "dismiss",
            ReportAction::Resolve => "resolve",
            ReportAction::BanAndResolve => "ban-and-resolve",
        }
    }
}

/// Which list the operator is browsing. Derived from whether a target
/// search context is held, not stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browsing {
    Main,
    TargetSearch,
}

/// Secondary browsing context: every report filed against one target.
///
/// Holds its own snapshot of the target entity so the header stays
/// renderable even if the entity is deleted server-side after the fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSearch {
    pub target_id: String,
    pub mode: ReportMode,
    pub target: ReportTarget,
    order: Vec<String>,
}

/// The moderation console's single stateful controller.
pub struct ModerationSession {
    repo: Arc<dyn ReportRepository>,
    mode: ReportMode,
    view: ViewMode,
    /// Authoritative copy of every held report, keyed by id. Fetches
    /// overwrite entries wholesale (last write wins per id).
    store: HashMap<String, Report>,
    main_order: Vec<String>,
    search: Option<TargetSearch>,
    selected: Option<String>,
    last_error: Option<String>,
}

impl ModerationSession {
    /// Create a session over the given repository with explicit initial
    /// axes. No fetch happens until the first transition or `refetch`.
    pub fn new(repo: Arc<dyn ReportRepository>, mode: ReportMode, view: ViewMode) -> Self {
        Self {
            repo,
            mode,
            view,
            store: HashMap::new(),
            main_order: Vec::new(),
            search: None,
            selected: None,
            last_error: None,
        }
    }

    // --- Accessors ---

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn browsing(&self) -> Browsing {
        if self.search.is_some() {
            Browsing::TargetSearch
        } else {
            Browsing::Main
        }
    }

    /// Message of the most recent failed network call, cleared by the next
    /// success of any network call.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The main list in server order.
    pub fn main_reports(&self) -> Vec<&Report> {
        self.main_order
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    pub fn target_search(&self) -> Option<&TargetSearch> {
        self.search.as_ref()
    }

    /// The target-search list in server order. Empty when no search
    /// context is held.
    pub fn search_reports(&self) -> Vec<&Report> {
        match &self.search {
            Some(search) => search
                .order
                .iter()
                .filter_map(|id| self.store.get(id))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn selected_report(&self) -> Option<&Report> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn report(&self, id: &str) -> Option<&Report> {
        self.store.get(id)
    }

    // --- Transitions ---

    /// Switch report taxonomy. Refetches the main list under the current
    /// view and clears the selection. The target-search context is an
    /// independent axis and survives.
    pub async fn set_mode(&mut self, mode: ReportMode) -> Result<()> {
        self.mode = mode;
        self.selected = None;
        self.refetch().await
    }

    /// Switch the resolution-state filter. Same refetch/selection rules as
    /// `set_mode`.
    pub async fn set_view(&mut self, view: ViewMode) -> Result<()> {
        self.view = view;
        self.selected = None;
        self.refetch().await
    }

    /// Reload the main list for the current mode/view. Idempotent; the
    /// incoming list replaces the old one wholesale. On failure the held
    /// list is untouched.
    pub async fn refetch(&mut self) -> Result<()> {
        match self.repo.list_reports(self.mode, self.view).await {
            Ok(reports) => {
                debug!(
                    count = reports.len(),
                    mode = self.mode.as_str(),
                    view = self.view.as_str(),
                    "Fetched main report list"
                );
                self.main_order = self.absorb(reports);
                self.prune();
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Enter the target-search context: all reports filed against one
    /// entity. Takes the explicit id/mode pair — the caller-supplied pair
    /// always wins over whatever is currently staged in the session,
    /// because a search can be triggered from a target reference embedded
    /// in another report's detail.
    pub async fn search_target(&mut self, target_id: &str, mode: ReportMode) -> Result<()> {
        match self.repo.reports_for_target(mode, target_id).await {
            Ok(found) => {
                debug!(
                    count = found.reports.len(),
                    target_id = target_id,
                    mode = mode.as_str(),
                    "Fetched reports for target"
                );
                let order = self.absorb(found.reports);
                self.search = Some(TargetSearch {
                    target_id: target_id.to_string(),
                    mode,
                    target: found.target,
                    order,
                });
                self.selected = None;
                self.prune();
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Leave the target-search context. The main list is untouched.
    pub fn reset_target_search(&mut self) {
        self.search = None;
        self.selected = None;
        self.prune();
    }

    /// Point the selection at a report already present in one of the held
    /// lists. No fetch happens; selecting an id the session doesn't hold
    /// leaves the detail view empty.
    pub fn select(&mut self, report_id: &str) {
        self.selected = Some(report_id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Apply a terminal action to a report. The repository call happens
    /// first; only on success is the stored report patched, so a failed
    /// call leaves every view exactly as it was. The patch lands on the
    /// single authoritative entry and is therefore visible in the main
    /// list, the target-search list, and the selected detail alike.
    ///
    /// Reapplying an action to an already-resolved report is harmless: the
    /// server endpoints are idempotent and so is the patch.
    pub async fn apply_action(
        &mut self,
        report_id: &str,
        action: ReportAction,
        mode: ReportMode,
    ) -> Result<()> {
        let result = match action {
            ReportAction::Dismiss => self.repo.dismiss(mode, report_id).await,
            ReportAction::Resolve => self.repo.resolve(mode, report_id).await,
            ReportAction::BanAndResolve => self.repo.ban_and_resolve(mode, report_id).await,
        };

        match result {
            Ok(()) => {
                match self.store.get_mut(report_id) {
                    Some(report) => apply_patch(report, action),
                    None => {
                        warn!(
                            report_id = report_id,
                            "Action applied to a report the session does not hold"
                        );
                    }
                }
                info!(
                    report_id = report_id,
                    action = action.as_str(),
                    mode = mode.as_str(),
                    "Report action applied"
                );
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    // --- Internals ---

    /// Insert fetched reports into the store and return their display
    /// order. An id already held (e.g. present in both the main and the
    /// target-search list) is overwritten with the fresher copy.
    fn absorb(&mut self, reports: Vec<Report>) -> Vec<String> {
        reports
            .into_iter()
            .map(|report| {
                let id = report.id.clone();
                self.store.insert(id.clone(), report);
                id
            })
            .collect()
    }

    /// Drop store entries no list or selection references anymore.
    fn prune(&mut self) {
        let mut keep: HashSet<&str> = self.main_order.iter().map(String::as_str).collect();
        if let Some(search) = &self.search {
            keep.extend(search.order.iter().map(String::as_str));
        }
        if let Some(selected) = &self.selected {
            keep.insert(selected.as_str());
        }
        self.store.retain(|id, _| keep.contains(id.as_str()));
    }

    /// Record a failed network call for the UI and hand the error back to
    /// the caller for chaining.
    fn capture(&mut self, err: anyhow::Error) -> anyhow::Error {
        warn!(error = %err, "Session operation failed");
        self.last_error = Some(err.to_string());
        err
    }
}

impl TargetSearch {
    /// Ids of the reports in this context, in server order.
    pub fn report_ids(&self) -> &[String] {
        &self.order
    }
}

/// Field rules for terminal actions. Dismiss and resolve differ only in
/// `is_dismissed`; banning has the same visible report state as resolve —
/// the ban itself is a server-side side effect.
fn apply_patch(report: &mut Report, action: ReportAction) {
    report.resolved = true;
    report.is_dismissed = matches!(action, ReportAction::Dismiss);
}

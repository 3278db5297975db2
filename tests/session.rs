// Session state machine tests.
//
// Every scenario runs against an in-memory mock repository — no network
// access. The scenarios that matter most are the consistency ones: a
// terminal action must be visible in the main list, the target-search
// list, and the selected detail at once, and a failed action must leave
// every view exactly as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use cinder::moderation::model::{Report, ReportMode, ViewMode};
use cinder::moderation::repository::{ReportRepository, TargetReports};
use cinder::moderation::session::{Browsing, ModerationSession, ReportAction};
use cinder::moderation::target::ReportTarget;

/// In-memory repository double. Report lists are scripted per mode; the
/// unresolved view filters them the way the server would. Calls are
/// recorded for assertions, and `fail` makes every subsequent call error.
#[derive(Default)]
struct MockRepository {
    user_reports: Mutex<Vec<Report>>,
    content_reports: Mutex<Vec<Report>>,
    target_result: Mutex<Option<TargetReports>>,
    fail: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl MockRepository {
    fn with_reports(mode: ReportMode, reports: Vec<Report>) -> Arc<Self> {
        let repo = Self::default();
        match mode {
            ReportMode::User => *repo.user_reports.lock().unwrap() = reports,
            ReportMode::Content => *repo.content_reports.lock().unwrap() = reports,
        }
        Arc::new(repo)
    }

    fn set_target_result(&self, target: serde_json::Value, reports: Vec<Report>) {
        let target: ReportTarget = serde_json::from_value(target).unwrap();
        *self.target_result.lock().unwrap() = Some(TargetReports { target, reports });
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("server unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for MockRepository {
    async fn list_reports(&self, mode: ReportMode, view: ViewMode) -> Result<Vec<Report>> {
        self.record(format!("list {} {}", mode.as_str(), view.as_str()));
        self.check()?;
        let all = match mode {
            ReportMode::User => self.user_reports.lock().unwrap().clone(),
            ReportMode::Content => self.content_reports.lock().unwrap().clone(),
        };
        Ok(match view {
            ViewMode::All => all,
            ViewMode::Unresolved => all.into_iter().filter(|r| !r.resolved).collect(),
        })
    }

    async fn reports_for_target(&self, mode: ReportMode, target_id: &str) -> Result<TargetReports> {
        self.record(format!("target {} {}", mode.as_str(), target_id));
        self.check()?;
        self.target_result
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Target not found"))
    }

    async fn dismiss(&self, mode: ReportMode, report_id: &str) -> Result<()> {
        self.record(format!("dismiss {} {}", mode.as_str(), report_id));
        self.check()
    }

    async fn resolve(&self, mode: ReportMode, report_id: &str) -> Result<()> {
        self.record(format!("resolve {} {}", mode.as_str(), report_id));
        self.check()
    }

    async fn ban_and_resolve(&self, mode: ReportMode, report_id: &str) -> Result<()> {
        self.record(format!("ban {} {}", mode.as_str(), report_id));
        self.check()
    }
}

// --- Fixtures ---

fn user_target(id: &str, username: &str) -> serde_json::Value {
    json!({"_id": id, "handleName": username, "username": username, "profilePic": ""})
}

fn content_target(id: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "type": "post",
        "caption": "reported content",
        "media": [],
        "user": {"_id": "u-author", "handleName": "Author", "username": "author"}
    })
}

fn report(id: &str, target: serde_json::Value, resolved: bool, dismissed: bool) -> Report {
    serde_json::from_value(json!({
        "_id": id,
        "reason": "harassment",
        "reporter": {"_id": "u-rep", "handleName": "Reporter", "username": "reporter"},
        "target": target,
        "resolved": resolved,
        "isDismissed": dismissed,
        "createdAt": "2026-03-01T12:00:00Z",
        "updatedAt": "2026-03-01T12:00:00Z"
    }))
    .unwrap()
}

fn pending(id: &str, target: serde_json::Value) -> Report {
    report(id, target, false, false)
}

// --- Consistency across views ---

#[tokio::test]
async fn dismiss_is_visible_in_every_view() {
    let repo = MockRepository::with_reports(
        ReportMode::Content,
        vec![pending("r-1", content_target("c-1"))],
    );
    repo.set_target_result(content_target("c-1"), vec![pending("r-1", content_target("c-1"))]);

    let mut session =
        ModerationSession::new(repo.clone(), ReportMode::Content, ViewMode::All);
    session.refetch().await.unwrap();
    session.search_target("c-1", ReportMode::Content).await.unwrap();
    session.select("r-1");

    session
        .apply_action("r-1", ReportAction::Dismiss, ReportMode::Content)
        .await
        .unwrap();

    let main = session.main_reports();
    assert!(main[0].resolved && main[0].is_dismissed);

    let search = session.search_reports();
    assert!(search[0].resolved && search[0].is_dismissed);

    let selected = session.selected_report().unwrap();
    assert!(selected.resolved && selected.is_dismissed);

    // The invariant holds after the local patch.
    assert!(main.iter().all(|r| !r.is_dismissed || r.resolved));
}

#[tokio::test]
async fn resolve_and_ban_leave_dismissed_false() {
    let repo = MockRepository::with_reports(
        ReportMode::User,
        vec![
            pending("r-1", user_target("u-1", "first")),
            pending("r-2", user_target("u-2", "second")),
        ],
    );

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();

    session
        .apply_action("r-1", ReportAction::Resolve, ReportMode::User)
        .await
        .unwrap();
    session
        .apply_action("r-2", ReportAction::BanAndResolve, ReportMode::User)
        .await
        .unwrap();

    for held in session.main_reports() {
        assert!(held.resolved);
        assert!(!held.is_dismissed);
    }
    assert!(repo.calls().contains(&"ban user r-2".to_string()));
}

#[tokio::test]
async fn worked_example_resolve_reaches_both_lists() {
    // Main list (mode=content, view=unresolved) holds R1 targeting C1.
    let repo = MockRepository::with_reports(
        ReportMode::Content,
        vec![pending("r-1", content_target("c-1"))],
    );
    repo.set_target_result(content_target("c-1"), vec![pending("r-1", content_target("c-1"))]);

    let mut session =
        ModerationSession::new(repo.clone(), ReportMode::Content, ViewMode::Unresolved);
    session.refetch().await.unwrap();
    session.search_target("c-1", ReportMode::Content).await.unwrap();
    assert_eq!(session.search_reports().len(), 1);

    session
        .apply_action("r-1", ReportAction::Resolve, ReportMode::Content)
        .await
        .unwrap();

    let main = session.main_reports();
    let search = session.search_reports();
    assert!(main[0].resolved && !main[0].is_dismissed);
    assert!(search[0].resolved && !search[0].is_dismissed);
    // R1 was never selected; the selection stays empty.
    assert!(session.selected_report().is_none());
}

#[tokio::test]
async fn fresher_copy_from_a_later_fetch_wins() {
    // The target fetch returns a fresher copy of the same report id; the
    // normalized store makes the main view show it too.
    let repo = MockRepository::with_reports(
        ReportMode::Content,
        vec![pending("r-1", content_target("c-1"))],
    );
    repo.set_target_result(
        content_target("c-1"),
        vec![report("r-1", content_target("c-1"), true, false)],
    );

    let mut session =
        ModerationSession::new(repo.clone(), ReportMode::Content, ViewMode::All);
    session.refetch().await.unwrap();
    assert!(!session.main_reports()[0].resolved);

    session.search_target("c-1", ReportMode::Content).await.unwrap();
    assert!(session.main_reports()[0].resolved);
}

// --- Selection lifecycle ---

#[tokio::test]
async fn set_mode_clears_selection_every_time() {
    // The same report id exists in both modes' lists.
    let repo = Arc::new(MockRepository::default());
    *repo.user_reports.lock().unwrap() = vec![pending("r-shared", user_target("u-1", "someone"))];
    *repo.content_reports.lock().unwrap() = vec![pending("r-shared", content_target("c-1"))];

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();

    session.select("r-shared");
    assert!(session.selected_report().is_some());
    session.set_mode(ReportMode::Content).await.unwrap();
    assert!(session.selected_report().is_none());

    session.select("r-shared");
    assert!(session.selected_report().is_some());
    session.set_mode(ReportMode::User).await.unwrap();
    assert!(session.selected_report().is_none());
}

#[tokio::test]
async fn set_view_refetches_and_clears_selection() {
    let repo = MockRepository::with_reports(
        ReportMode::User,
        vec![
            pending("r-1", user_target("u-1", "open")),
            report("r-2", user_target("u-2", "closed"), true, false),
        ],
    );

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();
    assert_eq!(session.main_reports().len(), 2);
    session.select("r-1");

    session.set_view(ViewMode::Unresolved).await.unwrap();
    assert!(session.selected_report().is_none());
    // The view filter is the server's, not the session's.
    assert_eq!(session.main_reports().len(), 1);
    assert_eq!(session.main_reports()[0].id, "r-1");
    assert!(repo.calls().contains(&"list user unresolved".to_string()));
}

// --- Target search context ---

#[tokio::test]
async fn search_and_reset_leave_the_main_list_untouched() {
    let repo = MockRepository::with_reports(
        ReportMode::User,
        vec![
            pending("r-1", user_target("u-1", "first")),
            pending("r-2", user_target("u-2", "second")),
        ],
    );
    repo.set_target_result(
        user_target("u-9", "hotspot"),
        vec![pending("r-7", user_target("u-9", "hotspot"))],
    );

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();
    let before: Vec<Report> = session.main_reports().into_iter().cloned().collect();

    session.search_target("u-9", ReportMode::User).await.unwrap();
    assert_eq!(session.browsing(), Browsing::TargetSearch);
    let search = session.target_search().unwrap();
    assert_eq!(search.target_id, "u-9");
    assert_eq!(search.report_ids().to_vec(), vec!["r-7".to_string()]);

    session.reset_target_search();
    assert_eq!(session.browsing(), Browsing::Main);
    assert!(session.target_search().is_none());
    assert!(session.search_reports().is_empty());

    let after: Vec<Report> = session.main_reports().into_iter().cloned().collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn search_target_uses_the_explicit_pair_not_the_session_mode() {
    // Session is browsing user reports, but the operator pivots from a
    // content reference — the supplied pair wins.
    let repo = MockRepository::with_reports(ReportMode::User, Vec::new());
    repo.set_target_result(content_target("c-9"), vec![pending("r-1", content_target("c-9"))]);

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();

    session.search_target("c-9", ReportMode::Content).await.unwrap();
    assert!(repo.calls().contains(&"target content c-9".to_string()));
    assert_eq!(session.target_search().unwrap().mode, ReportMode::Content);
    // The main-list axes are unaffected by the search.
    assert_eq!(session.mode(), ReportMode::User);
}

#[tokio::test]
async fn mode_change_keeps_the_target_search_context() {
    let repo = Arc::new(MockRepository::default());
    *repo.user_reports.lock().unwrap() = vec![pending("r-1", user_target("u-1", "a"))];
    repo.set_target_result(user_target("u-9", "hotspot"), Vec::new());

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();
    session.search_target("u-9", ReportMode::User).await.unwrap();

    session.set_mode(ReportMode::Content).await.unwrap();
    // Mode and target search are independent axes.
    assert!(session.target_search().is_some());
    assert_eq!(session.browsing(), Browsing::TargetSearch);
}

// --- Failure semantics ---

#[tokio::test]
async fn failed_action_leaves_state_identical() {
    let repo = MockRepository::with_reports(
        ReportMode::Content,
        vec![pending("r-1", content_target("c-1"))],
    );
    repo.set_target_result(content_target("c-1"), vec![pending("r-1", content_target("c-1"))]);

    let mut session =
        ModerationSession::new(repo.clone(), ReportMode::Content, ViewMode::All);
    session.refetch().await.unwrap();
    session.search_target("c-1", ReportMode::Content).await.unwrap();

    let main_before: Vec<Report> = session.main_reports().into_iter().cloned().collect();
    let search_before: Vec<Report> = session.search_reports().into_iter().cloned().collect();

    repo.set_fail(true);
    let result = session
        .apply_action("r-1", ReportAction::Dismiss, ReportMode::Content)
        .await;
    assert!(result.is_err());
    assert!(session.last_error().is_some_and(|msg| !msg.is_empty()));

    let main_after: Vec<Report> = session.main_reports().into_iter().cloned().collect();
    let search_after: Vec<Report> = session.search_reports().into_iter().cloned().collect();
    assert_eq!(main_before, main_after);
    assert_eq!(search_before, search_after);
}

#[tokio::test]
async fn failed_refetch_keeps_the_old_list() {
    let repo = MockRepository::with_reports(
        ReportMode::User,
        vec![pending("r-1", user_target("u-1", "a"))],
    );

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();
    assert_eq!(session.main_reports().len(), 1);

    repo.set_fail(true);
    assert!(session.refetch().await.is_err());
    assert_eq!(session.main_reports().len(), 1);
    assert_eq!(session.last_error(), Some("server unavailable"));
}

#[tokio::test]
async fn last_error_clears_on_the_next_success() {
    let repo = MockRepository::with_reports(ReportMode::User, Vec::new());

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    repo.set_fail(true);
    assert!(session.refetch().await.is_err());
    assert!(session.last_error().is_some());

    repo.set_fail(false);
    session.refetch().await.unwrap();
    assert!(session.last_error().is_none());
}

// --- Idempotence and edge cases ---

#[tokio::test]
async fn action_on_an_already_resolved_report_is_harmless() {
    let repo = MockRepository::with_reports(
        ReportMode::User,
        vec![report("r-1", user_target("u-1", "a"), true, false)],
    );

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();

    // Not offered by the UI, but must not crash: the repository call still
    // happens and the idempotent patch is reapplied.
    session
        .apply_action("r-1", ReportAction::Dismiss, ReportMode::User)
        .await
        .unwrap();
    assert!(repo.calls().contains(&"dismiss user r-1".to_string()));

    let held = session.main_reports();
    assert!(held[0].resolved && held[0].is_dismissed);
}

#[tokio::test]
async fn action_on_a_report_the_session_does_not_hold_does_not_crash() {
    let repo = MockRepository::with_reports(ReportMode::User, Vec::new());

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();

    session
        .apply_action("r-404", ReportAction::Resolve, ReportMode::User)
        .await
        .unwrap();
    assert!(repo.calls().contains(&"resolve user r-404".to_string()));
    assert!(session.main_reports().is_empty());
}

#[tokio::test]
async fn selecting_an_unheld_id_leaves_the_detail_empty() {
    let repo = MockRepository::with_reports(ReportMode::User, Vec::new());

    let mut session = ModerationSession::new(repo.clone(), ReportMode::User, ViewMode::All);
    session.refetch().await.unwrap();
    session.select("r-404");
    assert!(session.selected_report().is_none());
}

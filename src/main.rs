use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use cinder::api::client::AdminApiClient;
use cinder::api::{content, overview, stories, users};
use cinder::config::Config;
use cinder::moderation::model::{ContentKind, Report, ReportMode, ViewMode};
use cinder::moderation::repository::{HttpReportRepository, ReportRepository};
use cinder::moderation::session::{ModerationSession, ReportAction};
use cinder::output::terminal;

/// Cinder: report moderation console for a social platform backend.
///
/// Browse user and content report queues, pivot to every report filed
/// against one target, and close reports by dismissing, resolving, or
/// banning the target.
#[derive(Parser)]
#[command(name = "cinder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List reports for a taxonomy mode under a view filter
    Reports {
        /// Which reports: about users or about content
        #[arg(long, default_value = "user")]
        mode: ReportMode,

        /// Resolution-state filter, applied server-side
        #[arg(long, default_value = "all")]
        view: ViewMode,
    },

    /// Show one report in detail
    Inspect {
        /// Report id
        id: String,

        #[arg(long, default_value = "user")]
        mode: ReportMode,

        #[arg(long, default_value = "all")]
        view: ViewMode,
    },

    /// List every report filed against one target entity
    Target {
        /// Target entity id (a user id or a content id)
        id: String,

        #[arg(long, default_value = "user")]
        mode: ReportMode,
    },

    /// Dismiss a report (close it without action against the target)
    Dismiss {
        id: String,

        #[arg(long, default_value = "user")]
        mode: ReportMode,
    },

    /// Resolve a report (close it, action taken)
    Resolve {
        id: String,

        #[arg(long, default_value = "user")]
        mode: ReportMode,
    },

    /// Ban the report's target and resolve the report
    Ban {
        id: String,

        #[arg(long, default_value = "user")]
        mode: ReportMode,
    },

    /// List platform accounts
    Users {
        /// Server-side search over username and handle name
        #[arg(long)]
        search: Option<String>,

        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// List posts and reels
    Posts {
        /// Restrict to one content kind
        #[arg(long)]
        kind: Option<ContentKind>,

        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// List active stories
    Stories {
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Show headline counts and the pending report queues
    Overview,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinder=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.require_token()?;

    match cli.command {
        Commands::Reports { mode, view } => {
            let mut session = build_session(&config, mode, view)?;
            session.refetch().await?;
            terminal::display_report_list(&session.main_reports(), mode, view);
        }

        Commands::Inspect { id, mode, view } => {
            let mut session = build_session(&config, mode, view)?;
            session.refetch().await?;
            session.select(&id);
            match session.selected_report() {
                Some(report) => terminal::display_report_detail(report, None),
                None => {
                    println!(
                        "Report {id} is not in the current {mode}/{view} list.\n\
                         Try --view all, or --mode content if it targets a post or reel."
                    );
                }
            }
        }

        Commands::Target { id, mode } => {
            let mut session = build_session(&config, mode, ViewMode::All)?;
            session.search_target(&id, mode).await?;
            if let Some(search) = session.target_search() {
                terminal::display_target_search(search, &session.search_reports());
            }
        }

        Commands::Dismiss { id, mode } => {
            apply(&config, &id, ReportAction::Dismiss, mode).await?;
        }

        Commands::Resolve { id, mode } => {
            apply(&config, &id, ReportAction::Resolve, mode).await?;
        }

        Commands::Ban { id, mode } => {
            apply(&config, &id, ReportAction::BanAndResolve, mode).await?;
        }

        Commands::Users { search, limit } => {
            let api = AdminApiClient::new(&config.api_url, &config.admin_token)?;
            let accounts = users::list_users(&api, search.as_deref(), limit).await?;
            terminal::display_users(&accounts);
        }

        Commands::Posts { kind, limit } => {
            let api = AdminApiClient::new(&config.api_url, &config.admin_token)?;
            let items = content::list_content(&api, kind, limit).await?;
            terminal::display_content(&items);
        }

        Commands::Stories { limit } => {
            let api = AdminApiClient::new(&config.api_url, &config.admin_token)?;
            let found = stories::list_stories(&api, limit).await?;
            terminal::display_stories(&found);
        }

        Commands::Overview => {
            let api = AdminApiClient::new(&config.api_url, &config.admin_token)?;
            let repo =
                HttpReportRepository::new(AdminApiClient::new(&config.api_url, &config.admin_token)?);

            // The three fetches are independent — run them concurrently.
            let (counts, user_pending, content_pending) = futures::try_join!(
                overview::fetch_overview(&api),
                repo.list_reports(ReportMode::User, ViewMode::Unresolved),
                repo.list_reports(ReportMode::Content, ViewMode::Unresolved),
            )?;

            let user_refs: Vec<&Report> = user_pending.iter().collect();
            let content_refs: Vec<&Report> = content_pending.iter().collect();
            terminal::display_overview(&counts, &user_refs, &content_refs);
        }
    }

    Ok(())
}

/// Build a moderation session over the HTTP repository.
fn build_session(config: &Config, mode: ReportMode, view: ViewMode) -> Result<ModerationSession> {
    let api = AdminApiClient::new(&config.api_url, &config.admin_token)?;
    let repo: Arc<dyn ReportRepository> = Arc::new(HttpReportRepository::new(api));
    Ok(ModerationSession::new(repo, mode, view))
}

/// Run a terminal action through a fresh session: fetch the full list so
/// the report is held, apply the action, and show the updated record.
async fn apply(config: &Config, id: &str, action: ReportAction, mode: ReportMode) -> Result<()> {
    let mut session = build_session(config, mode, ViewMode::All)?;
    session.refetch().await?;
    session.apply_action(id, action, mode).await?;

    match session.report(id) {
        Some(report) => terminal::display_report_detail(report, None),
        None => println!("Report {id} updated."),
    }
    Ok(())
}

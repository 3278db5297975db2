// Colored terminal output for report queues and console listings.
//
// This module handles all terminal-specific formatting: colors, tables,
// detail panels. The main.rs command handlers delegate here. Rendering
// goes through the target projection, so a malformed target shows up as
// an empty cell, never a crash.

use colored::Colorize;

use crate::api::content::ContentItem;
use crate::api::overview::OverviewCounts;
use crate::api::stories::Story;
use crate::api::users::UserAccount;
use crate::moderation::model::{Report, ReportMode, ReportState, ViewMode};
use crate::moderation::session::TargetSearch;
use crate::moderation::target::{project, DisplayInfo, ReportTarget, TargetKind};

/// Display the main report queue.
pub fn display_report_list(reports: &[&Report], mode: ReportMode, view: ViewMode) {
    if reports.is_empty() {
        println!("No {} reports under the '{}' view.", mode, view);
        return;
    }

    println!(
        "\n{}",
        format!("=== {} reports · {} ({}) ===", mode, view, reports.len()).bold()
    );
    print_report_rows(reports, None);
    print_state_summary(reports);
}

/// Display a target-search context: header for the searched entity, then
/// every report filed against it.
pub fn display_target_search(search: &TargetSearch, reports: &[&Report]) {
    match search.target.display_info() {
        Some(info) => {
            let label = display_label(&info);
            println!(
                "\n{}",
                format!(
                    "=== Reports against {} [{} {}] ({}) ===",
                    label,
                    search.mode,
                    info.id,
                    reports.len()
                )
                .bold()
            );
        }
        None => {
            // Target snapshot is unrenderable; the id is still known.
            println!(
                "\n{}",
                format!(
                    "=== Reports against {} {} ({}) ===",
                    search.mode,
                    search.target_id,
                    reports.len()
                )
                .bold()
            );
        }
    }

    if reports.is_empty() {
        println!("  No reports filed against this target.");
        return;
    }

    print_report_rows(reports, Some(&search.target));
    print_state_summary(reports);
}

/// Display a single report in detail.
pub fn display_report_detail(report: &Report, context_target: Option<&ReportTarget>) {
    println!("\n{}", format!("=== Report {} ===", report.id).bold());

    let state = ReportState::of(report);
    println!("  State:    {}", colorize_state(state));
    println!("  Reason:   {}", report.reason);
    if let Some(description) = &report.description {
        println!("  Details:  {}", super::truncate_chars(description, 200));
    }
    println!(
        "  Reporter: @{} ({})",
        report.reporter.username, report.reporter.handle_name
    );
    println!(
        "  Filed:    {}   Updated: {}",
        report.created_at.format("%Y-%m-%d %H:%M"),
        report.updated_at.format("%Y-%m-%d %H:%M")
    );
    if !report.is_read {
        println!("  {}", "Unread".yellow());
    }

    match project(report, context_target) {
        Some(info) => {
            println!("\n  Target:");
            let kind = match info.kind {
                TargetKind::User => "user".to_string(),
                TargetKind::Content => info
                    .content_kind
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "content".to_string()),
            };
            println!("    {} {}", kind.bold(), display_label(&info));
            println!("    Id: {}", info.id);
            if !info.media.is_empty() {
                println!("    Media: {} attachment(s)", info.media.len());
            }
        }
        None => {
            println!("\n  Target: {}", "(unrenderable)".dimmed());
        }
    }
}

/// Display the user directory listing.
pub fn display_users(users: &[UserAccount]) {
    if users.is_empty() {
        println!("No matching accounts.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Accounts ({}) ===", users.len()).bold()
    );
    println!();
    println!(
        "  {:<4} {:<24} {:<24} {:>6}  {:<12} Joined",
        "#".dimmed(),
        "Username".dimmed(),
        "Name".dimmed(),
        "Posts".dimmed(),
        "Status".dimmed(),
    );
    println!("  {}", "-".repeat(84).dimmed());

    for (i, user) in users.iter().enumerate() {
        let status = if user.is_banned {
            "banned".red().to_string()
        } else {
            "active".green().to_string()
        };
        println!(
            "  {:<4} @{:<23} {:<24} {:>6}  {:<12} {}",
            format!("{}.", i + 1),
            super::truncate_chars(&user.username, 22),
            super::truncate_chars(&user.handle_name, 23),
            user.post_count,
            status,
            user.created_at.format("%Y-%m-%d"),
        );
    }

    let banned = users.iter().filter(|u| u.is_banned).count();
    if banned > 0 {
        println!("\n  {} {} banned account(s) in this page", "!".red(), banned);
    }
}

/// Display the content listing (posts and reels).
pub fn display_content(items: &[ContentItem]) {
    if items.is_empty() {
        println!("No content found.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Content ({}) ===", items.len()).bold()
    );
    println!();

    for (i, item) in items.iter().enumerate() {
        let author = item
            .user
            .as_ref()
            .map(|u| format!("@{}", u.username))
            .unwrap_or_else(|| "(deleted account)".dimmed().to_string());
        let caption = item
            .caption
            .as_deref()
            .map(|c| super::truncate_chars(c, 80))
            .unwrap_or_default();
        println!(
            "  {:<4} [{}] {:<28} {:>5} likes {:>5} comments  {}",
            format!("{}.", i + 1),
            item.kind,
            author,
            item.like_count,
            item.comment_count,
            item.created_at.format("%Y-%m-%d"),
        );
        if !caption.is_empty() {
            println!("       \"{}\"", caption.dimmed());
        }
    }
}

/// Display active stories.
pub fn display_stories(stories: &[Story]) {
    if stories.is_empty() {
        println!("No active stories.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Active stories ({}) ===", stories.len()).bold()
    );
    println!();

    for (i, story) in stories.iter().enumerate() {
        let author = story
            .user
            .as_ref()
            .map(|u| format!("@{}", u.username))
            .unwrap_or_else(|| "(deleted account)".dimmed().to_string());
        let expiry = story
            .expires_at
            .map(|t| format!("expires {}", t.format("%Y-%m-%d %H:%M")))
            .unwrap_or_default();
        println!(
            "  {:<4} {:<28} {} media  posted {}  {}",
            format!("{}.", i + 1),
            author,
            story.media.len(),
            story.created_at.format("%Y-%m-%d %H:%M"),
            expiry.dimmed(),
        );
    }
}

/// Display the overview panel: headline counts plus both pending queues.
pub fn display_overview(
    counts: &OverviewCounts,
    pending_user: &[&Report],
    pending_content: &[&Report],
) {
    println!("\n{}", "=== Platform overview ===".bold());
    println!();
    println!(
        "  Users: {}   Posts: {}   Reels: {}   Stories: {}",
        counts.users, counts.posts, counts.reels, counts.stories
    );
    println!(
        "  Pending reports: {} about users, {} about content",
        colorize_count(counts.pending_user_reports),
        colorize_count(counts.pending_content_reports),
    );

    if !pending_user.is_empty() {
        println!("\n  {}", "Oldest pending user reports:".bold());
        print_report_rows(&pending_user[..pending_user.len().min(5)], None);
    }
    if !pending_content.is_empty() {
        println!("\n  {}", "Oldest pending content reports:".bold());
        print_report_rows(&pending_content[..pending_content.len().min(5)], None);
    }
}

fn print_report_rows(reports: &[&Report], context_target: Option<&ReportTarget>) {
    println!();
    println!(
        "  {:<4} {:<10} {:<16} {:<26} {:<22} Filed",
        "#".dimmed(),
        "State".dimmed(),
        "Reason".dimmed(),
        "Target".dimmed(),
        "Reporter".dimmed(),
    );
    println!("  {}", "-".repeat(92).dimmed());

    for (i, report) in reports.iter().enumerate() {
        let state = ReportState::of(report);
        let target_cell = match project(report, context_target) {
            Some(info) => super::truncate_chars(&display_label(&info), 25),
            // Malformed target: display nothing rather than fail the row.
            None => String::new(),
        };
        let row = format!(
            "  {:<4} {:<10} {:<16} {:<26} @{:<21} {}",
            format!("{}.", i + 1),
            colorize_state(state),
            report.reason,
            target_cell,
            super::truncate_chars(&report.reporter.username, 20),
            report.created_at.format("%Y-%m-%d"),
        );
        if report.is_read {
            println!("{}", row.dimmed());
        } else {
            println!("{row}");
        }
    }
}

fn print_state_summary(reports: &[&Report]) {
    let pending = count_state(reports, ReportState::Pending);
    let dismissed = count_state(reports, ReportState::Dismissed);
    let resolved = count_state(reports, ReportState::Resolved);

    println!();
    if pending > 0 {
        println!("  {} {} pending", "!".yellow(), pending);
    }
    if resolved > 0 {
        println!("  {} {} resolved", "✓".green(), resolved);
    }
    if dismissed > 0 {
        println!("  {} {} dismissed", "-".dimmed(), dismissed);
    }
}

fn count_state(reports: &[&Report], state: ReportState) -> usize {
    reports
        .iter()
        .filter(|r| ReportState::of(r) == state)
        .count()
}

/// "Name (@username)" when both are present, falling back to whichever is.
fn display_label(info: &DisplayInfo) -> String {
    match (info.name.is_empty(), info.username.is_empty()) {
        (false, false) => format!("{} (@{})", info.name, info.username),
        (true, false) => format!("@{}", info.username),
        (false, true) => info.name.clone(),
        (true, true) => info.id.clone(),
    }
}

/// Colorize a report state.
fn colorize_state(state: ReportState) -> colored::ColoredString {
    match state {
        ReportState::Pending => state.as_str().yellow(),
        ReportState::Resolved => state.as_str().green(),
        ReportState::Dismissed => state.as_str().dimmed(),
    }
}

fn colorize_count(count: u64) -> String {
    if count > 0 {
        count.to_string().yellow().bold().to_string()
    } else {
        count.to_string().green().to_string()
    }
}

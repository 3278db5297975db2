// Report data model — Rust structs that map to the admin API's JSON.
//
// These are the types that flow through the session and the console
// surfaces. They're separate from the repository so other modules can use
// them without depending on the HTTP layer. Wire names are camelCase with
// Mongo-style `_id` identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::target::ReportTarget;

/// Which report taxonomy is active. Changes the expected shape of every
/// report target in the fetched list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Reports filed against user accounts.
    User,
    /// Reports filed against posts and reels.
    Content,
}

impl ReportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::User => "user",
            ReportMode::Content => "content",
        }
    }
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ReportMode::User),
            "content" => Ok(ReportMode::Content),
            other => Err(format!("unknown report mode '{other}' (expected 'user' or 'content')")),
        }
    }
}

/// Resolution-state filter for the main report list. Applied server-side —
/// the session never filters a fetched list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    All,
    Unresolved,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::All => "all",
            ViewMode::Unresolved => "unresolved",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ViewMode::All),
            "unresolved" => Ok(ViewMode::Unresolved),
            other => Err(format!("unknown view '{other}' (expected 'all' or 'unresolved')")),
        }
    }
}

/// Fixed report reason taxonomy (kebab-case on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportReason {
    Harassment,
    HateSpeech,
    Impersonation,
    GraphicContent,
    Threats,
    Scams,
    SensitiveInfo,
    SelfHarm,
    Other,
}

impl ReportReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Harassment => "harassment",
            ReportReason::HateSpeech => "hate-speech",
            ReportReason::Impersonation => "impersonation",
            ReportReason::GraphicContent => "graphic-content",
            ReportReason::Threats => "threats",
            ReportReason::Scams => "scams",
            ReportReason::SensitiveInfo => "sensitive-info",
            ReportReason::SelfHarm => "self-harm",
            ReportReason::Other => "other",
        }
    }
}

impl std::fmt::Display for ReportReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Embedded user summary — used for reporters, content authors, and user
/// targets alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub handle_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile_pic: String,
}

/// A single media attachment on a piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// Content taxonomy for reportable media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Reel,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Reel => "reel",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(ContentKind::Post),
            "reel" => Ok(ContentKind::Reel),
            other => Err(format!("unknown content kind '{other}' (expected 'post' or 'reel')")),
        }
    }
}

/// A moderation record filed by one user against another user or against a
/// piece of content. Only the three state booleans are ever mutated, always
/// through the repository — reports are otherwise read-only in shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    pub reason: ReportReason,
    #[serde(default)]
    pub description: Option<String>,
    pub reporter: UserSummary,
    #[serde(default)]
    pub target: ReportTarget,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub resolved: bool,
    /// Only meaningful when `resolved` is true.
    #[serde(default)]
    pub is_dismissed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three terminal states a report can be in. `is_dismissed` is only
/// read under `resolved`, so the invariant `is_dismissed ⇒ resolved` holds
/// by construction here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    /// Awaiting moderator action.
    Pending,
    /// Closed without action against the target.
    Dismissed,
    /// Closed with action taken.
    Resolved,
}

impl ReportState {
    pub fn of(report: &Report) -> Self {
        if !report.resolved {
            ReportState::Pending
        } else if report.is_dismissed {
            ReportState::Dismissed
        } else {
            ReportState::Resolved
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportState::Pending => "pending",
            ReportState::Dismissed => "dismissed",
            ReportState::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ReportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

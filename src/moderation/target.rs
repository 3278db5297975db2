// Report target classification — polymorphic targets become a tagged union
// at the deserialization boundary.
//
// The backend stores a report's target as whatever entity was reported: a
// user account or a piece of content. The wire payload carries no explicit
// discriminator, so classification is structural: a non-empty `username`
// string marks a user, otherwise a non-empty `type` string marks content.
// Anything else is malformed and classifies as Unknown — lists render
// nothing for it instead of failing the whole decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::model::{ContentKind, Media, Report, UserSummary};

/// A reported post or reel, with its author embedded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTarget {
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
}

/// The entity a report is about. Produced once per report when the payload
/// is decoded; render sites never re-inspect raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportTarget {
    User(UserSummary),
    Content(ContentTarget),
    /// Malformed or missing target — unrenderable, never an error.
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for ReportTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(classify(&value))
    }
}

/// Discriminate a raw target payload. Pure and total: any input yields a
/// variant, malformed input yields Unknown.
pub fn classify(value: &Value) -> ReportTarget {
    let Some(fields) = value.as_object() else {
        return ReportTarget::Unknown;
    };

    if is_truthy(fields.get("username")) {
        serde_json::from_value(value.clone())
            .map(ReportTarget::User)
            .unwrap_or_default()
    } else if is_truthy(fields.get("type")) {
        serde_json::from_value(value.clone())
            .map(ReportTarget::Content)
            .unwrap_or_default()
    } else {
        ReportTarget::Unknown
    }
}

/// A discriminator field counts as truthy only when it is a non-empty JSON
/// string. Numbers and objects in these positions are malformed data.
fn is_truthy(field: Option<&Value>) -> bool {
    matches!(field, Some(Value::String(s)) if !s.is_empty())
}

/// Which side of the taxonomy a display row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    User,
    Content,
}

/// Normalized, mode-aware projection of a target for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    pub id: String,
    /// Display name — the user's handle name, or the content author's.
    pub name: String,
    pub username: String,
    pub profile_pic: String,
    pub kind: TargetKind,
    pub content_kind: Option<ContentKind>,
    pub media: Vec<Media>,
}

impl ReportTarget {
    /// Project this target for display. `None` only for Unknown.
    pub fn display_info(&self) -> Option<DisplayInfo> {
        match self {
            ReportTarget::User(user) => Some(DisplayInfo {
                id: user.id.clone(),
                name: user.handle_name.clone(),
                username: user.username.clone(),
                profile_pic: user.profile_pic.clone(),
                kind: TargetKind::User,
                content_kind: None,
                media: Vec::new(),
            }),
            ReportTarget::Content(content) => {
                let author = content.user.as_ref();
                Some(DisplayInfo {
                    id: content.id.clone(),
                    name: author.map(|u| u.handle_name.clone()).unwrap_or_default(),
                    username: author.map(|u| u.username.clone()).unwrap_or_default(),
                    profile_pic: author.map(|u| u.profile_pic.clone()).unwrap_or_default(),
                    kind: TargetKind::Content,
                    content_kind: Some(content.kind),
                    media: content.media.clone(),
                })
            }
            ReportTarget::Unknown => None,
        }
    }
}

/// Project the identity a report row should display.
///
/// In a target-search list every report shares the searched target, which
/// was fetched once alongside the list — pass that snapshot as
/// `context_target` and it wins over the report's own target. Returns
/// `None` when the projected target is Unknown.
pub fn project(report: &Report, context_target: Option<&ReportTarget>) -> Option<DisplayInfo> {
    match context_target {
        Some(target) => target.display_info(),
        None => report.target.display_info(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_string_username_is_not_truthy() {
        let target = classify(&json!({"_id": "c1", "username": "", "type": "post"}));
        assert!(matches!(target, ReportTarget::Content(_)));
    }

    #[test]
    fn numeric_username_is_not_truthy() {
        let target = classify(&json!({"_id": "u1", "username": 42}));
        assert_eq!(target, ReportTarget::Unknown);
    }

    #[test]
    fn non_object_payloads_classify_unknown() {
        assert_eq!(classify(&json!(null)), ReportTarget::Unknown);
        assert_eq!(classify(&json!("u1")), ReportTarget::Unknown);
        assert_eq!(classify(&json!([1, 2])), ReportTarget::Unknown);
    }

    #[test]
    fn truthy_type_outside_taxonomy_is_malformed() {
        // `type` is truthy but not post|reel — unrenderable, not a panic.
        let target = classify(&json!({"_id": "s1", "type": "story"}));
        assert_eq!(target, ReportTarget::Unknown);
    }
}

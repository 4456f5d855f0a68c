//! Wire types for the import/sync endpoints.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque issue identifier (the source issue number).
///
/// The server emits it as a JSON number on the happy path and as a string
/// when it reports a per-issue exception, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "IssueIdRepr", into = "String")]
pub struct IssueId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum IssueIdRepr {
    Number(i64),
    Text(String),
}

impl From<IssueIdRepr> for IssueId {
    fn from(repr: IssueIdRepr) -> Self {
        match repr {
            IssueIdRepr::Number(n) => IssueId(n.to_string()),
            IssueIdRepr::Text(s) => IssueId(s.trim().to_string()),
        }
    }
}

impl IssueId {
    pub fn new(id: impl Into<String>) -> Self {
        IssueId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<IssueId> for String {
    fn from(id: IssueId) -> Self {
        id.0
    }
}

impl From<&str> for IssueId {
    fn from(s: &str) -> Self {
        IssueId(s.to_string())
    }
}

impl From<u64> for IssueId {
    fn from(n: u64) -> Self {
        IssueId(n.to_string())
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reconciliation state between the source issue and its tracker copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    #[default]
    Unknown,
    Syncing,
    InSync,
    NeedsUpdate,
    GithubNewer,
    UpToDate,
    /// The synchronizer pushed source changes to the tracker copy.
    Updated,
    Error,
}

impl SyncStatus {
    /// Wire name, e.g. `needs_update`.
    pub fn as_str(self) -> &'static str {
        match self {
            SyncStatus::Unknown => "unknown",
            SyncStatus::Syncing => "syncing",
            SyncStatus::InSync => "in_sync",
            SyncStatus::NeedsUpdate => "needs_update",
            SyncStatus::GithubNewer => "github_newer",
            SyncStatus::UpToDate => "up_to_date",
            SyncStatus::Updated => "updated",
            SyncStatus::Error => "error",
        }
    }

    /// Parse a wire name. Anything unrecognised is `Unknown`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "syncing" => SyncStatus::Syncing,
            "in_sync" => SyncStatus::InSync,
            "needs_update" => SyncStatus::NeedsUpdate,
            "github_newer" => SyncStatus::GithubNewer,
            "up_to_date" => SyncStatus::UpToDate,
            "updated" => SyncStatus::Updated,
            "error" => SyncStatus::Error,
            _ => SyncStatus::Unknown,
        }
    }

    /// Human-readable label: `needs_update` becomes `Needs Update`.
    pub fn label(self) -> String {
        status_label(self.as_str())
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for SyncStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(SyncStatus::from_wire).unwrap_or_default())
    }
}

/// Turn a `snake_case` status name into a display label.
///
/// Every separator becomes a space and each word is capitalized.
pub fn status_label(raw: &str) -> String {
    raw.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Per-issue outcome of a sync request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    pub github_number: IssueId,
    #[serde(default)]
    pub youtrack_id: Option<String>,
    #[serde(default)]
    pub status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// RFC 3339 timestamp of the last source-side update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_updated: Option<String>,
}

/// Response of `/sync-issues` and `/sync-issue/{number}`.
///
/// Every field is optional on the wire; a missing `results` array decodes as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSyncReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_checked: Option<u64>,
    #[serde(default, rename = "synced", skip_serializing_if = "Option::is_none")]
    pub synced_count: Option<u64>,
    #[serde(default, rename = "errors", skip_serializing_if = "Option::is_none")]
    pub error_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<SyncResult>,
}

impl BatchSyncReport {
    /// Number of issues checked, falling back to the number of results.
    pub fn total_checked_or_len(&self) -> u64 {
        self.total_checked.unwrap_or(self.results.len() as u64)
    }

    pub fn synced_or_zero(&self) -> u64 {
        self.synced_count.unwrap_or(0)
    }

    pub fn errors_or_zero(&self) -> u64 {
        self.error_count.unwrap_or(0)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `/import-issue/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportIssueResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtrack_id: Option<String>,
}

impl ImportIssueResponse {
    /// The server only says `success: false` explicitly; absence means success.
    pub fn is_failure(&self) -> bool {
        self.success == Some(false)
    }
}

/// Body of `/import-bulk-issues`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkImportRequest {
    pub issue_ids: Vec<String>,
    pub issue_titles: Vec<String>,
}

/// Response of `/import-bulk-issues`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkImportResponse {
    #[serde(default)]
    pub imported_count: u64,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<ImportIssueResponse>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(SyncStatus::UpToDate.label(), "Up To Date");
        assert_eq!(SyncStatus::NeedsUpdate.label(), "Needs Update");
        assert_eq!(SyncStatus::Error.label(), "Error");
        assert_eq!(status_label("github_newer"), "Github Newer");
    }

    #[test]
    fn test_status_label_applied_twice_is_stable() {
        let once = status_label("up_to_date");
        assert_eq!(status_label(&once), "Up To Date");
    }

    #[test]
    fn test_unknown_status_string() {
        let status: SyncStatus = serde_json::from_str(r#""conflicted""#).unwrap();
        assert_eq!(status, SyncStatus::Unknown);
        let status: SyncStatus = serde_json::from_str("null").unwrap();
        assert_eq!(status, SyncStatus::Unknown);
    }

    #[test]
    fn test_issue_id_accepts_number_and_string() {
        let a: IssueId = serde_json::from_str("42").unwrap();
        let b: IssueId = serde_json::from_str(r#""42""#).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), r#""42""#);
    }

    #[test]
    fn test_sync_report_deserialization() {
        let json = r#"{
            "synced": 1,
            "errors": 0,
            "total_checked": 2,
            "results": [
                {"github_number": 1, "youtrack_id": "PRJ-1", "status": "updated",
                 "message": "Successfully updated from GitHub",
                 "github_updated": "2026-01-21T10:00:00Z", "youtrack_updated": 1700000000000},
                {"github_number": 2, "youtrack_id": "PRJ-2", "status": "up_to_date"}
            ]
        }"#;
        let report: BatchSyncReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.total_checked_or_len(), 2);
        assert_eq!(report.synced_or_zero(), 1);
        assert_eq!(report.results[0].status, SyncStatus::Updated);
        assert_eq!(report.results[1].github_number, IssueId::from("2"));
        assert!(report.results[1].message.is_none());
    }

    #[test]
    fn test_sync_report_missing_results() {
        let report: BatchSyncReport =
            serde_json::from_str(r#"{"error": "YouTrack credentials not configured", "synced": 0, "errors": 1}"#)
                .unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.total_checked_or_len(), 0);
        assert_eq!(report.errors_or_zero(), 1);
    }

    #[test]
    fn test_bulk_request_serialization() {
        let req = BulkImportRequest {
            issue_ids: vec!["1".into(), "2".into()],
            issue_titles: vec!["First".into(), "Second".into()],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"issue_ids":["1","2"],"issue_titles":["First","Second"]}"#
        );
    }

    #[test]
    fn test_import_failure_flag() {
        let ok: ImportIssueResponse = serde_json::from_str(r#"{"message": "done"}"#).unwrap();
        assert!(!ok.is_failure());
        let failed: ImportIssueResponse =
            serde_json::from_str(r#"{"success": false, "error": "YouTrack API error: 400"}"#).unwrap();
        assert!(failed.is_failure());
    }
}

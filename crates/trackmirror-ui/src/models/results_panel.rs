// crates/trackmirror-ui/src/models/results_panel.rs

//! Content of the `sync-results` panel.

use std::fmt;

use chrono::{DateTime, Local};
use trackmirror_services::{BatchSyncReport, IssueId, SyncResult, SyncStatus};

/// What the results panel currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultsPanel {
    #[default]
    Empty,
    /// Plain in-progress text.
    Pending(String),
    /// Error-classed block.
    Failed(String),
    Summary(SyncSummary),
    StatusReport(StatusReport),
}

/// One result block in a sync summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub issue: IssueId,
    pub youtrack_id: Option<String>,
    pub status: SyncStatus,
    pub message: Option<String>,
    /// Source-side update time, already formatted for display.
    pub github_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncSummary {
    pub total_checked: u64,
    pub updated: u64,
    pub errors: u64,
    pub entries: Vec<ResultEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub issue: IssueId,
    pub status: SyncStatus,
    pub message: Option<String>,
}

/// Read-only status report: counts per status (first-seen order) plus one
/// line per issue.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub counts: Vec<(SyncStatus, usize)>,
    pub lines: Vec<StatusLine>,
}

impl StatusReport {
    pub fn count_for(&self, status: SyncStatus) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

impl ResultsPanel {
    /// Panel for a full sync response. A server-reported `error` wins.
    pub fn from_sync_report(report: &BatchSyncReport) -> Self {
        if let Some(error) = &report.error {
            return ResultsPanel::Failed(format!("Error: {}", error));
        }

        ResultsPanel::Summary(SyncSummary {
            total_checked: report.total_checked_or_len(),
            updated: report.synced_or_zero(),
            errors: report.errors_or_zero(),
            entries: report.results.iter().map(ResultEntry::from_result).collect(),
        })
    }

    /// Panel for a status check; never mutates item badges.
    pub fn status_report(report: &BatchSyncReport) -> Self {
        let mut counts: Vec<(SyncStatus, usize)> = Vec::new();
        for result in &report.results {
            match counts.iter_mut().find(|(s, _)| *s == result.status) {
                Some((_, n)) => *n += 1,
                None => counts.push((result.status, 1)),
            }
        }

        let lines = report
            .results
            .iter()
            .map(|r| StatusLine {
                issue: r.github_number.clone(),
                status: r.status,
                message: r.message.clone(),
            })
            .collect();

        ResultsPanel::StatusReport(StatusReport { counts, lines })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultsPanel::Failed(_))
    }
}

impl ResultEntry {
    fn from_result(result: &SyncResult) -> Self {
        Self {
            issue: result.github_number.clone(),
            youtrack_id: result.youtrack_id.clone(),
            status: result.status,
            message: result.message.clone(),
            github_updated: result.github_updated.as_deref().map(format_timestamp),
        }
    }
}

/// Render an RFC 3339 timestamp in local time; unparsable input is kept as is.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

impl fmt::Display for ResultsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsPanel::Empty => Ok(()),
            ResultsPanel::Pending(text) | ResultsPanel::Failed(text) => writeln!(f, "{}", text),
            ResultsPanel::Summary(summary) => {
                writeln!(f, "Sync Summary")?;
                writeln!(
                    f,
                    "Total checked: {} | Updated: {} | Errors: {}",
                    summary.total_checked, summary.updated, summary.errors
                )?;
                if summary.entries.is_empty() {
                    return writeln!(f, "No results to display.");
                }
                for entry in &summary.entries {
                    writeln!(
                        f,
                        "Issue #{} (YT: {})",
                        entry.issue,
                        entry.youtrack_id.as_deref().unwrap_or("-")
                    )?;
                    writeln!(f, "  Status: {}", entry.status.label())?;
                    if let Some(message) = &entry.message {
                        writeln!(f, "  Message: {}", message)?;
                    }
                    if let Some(updated) = &entry.github_updated {
                        writeln!(f, "  GitHub updated: {}", updated)?;
                    }
                }
                Ok(())
            }
            ResultsPanel::StatusReport(report) => {
                writeln!(f, "Sync Status Report")?;
                if report.lines.is_empty() {
                    return writeln!(f, "No sync status information available.");
                }
                let counts = report
                    .counts
                    .iter()
                    .map(|(status, n)| format!("{}: {}", status.label(), n))
                    .collect::<Vec<_>>()
                    .join("  ");
                writeln!(f, "{}", counts)?;
                for line in &report.lines {
                    write!(f, "Issue #{}: {}", line.issue, line.status.label())?;
                    if let Some(message) = &line.message {
                        write!(f, " - {}", message)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn result(n: u64, status: SyncStatus, message: Option<&str>) -> SyncResult {
        SyncResult {
            github_number: IssueId::from(n),
            youtrack_id: Some(format!("PRJ-{n}")),
            status,
            message: message.map(str::to_string),
            github_updated: None,
        }
    }

    #[test]
    fn summary_falls_back_to_result_count() {
        let report = BatchSyncReport {
            results: vec![
                result(1, SyncStatus::UpToDate, None),
                result(2, SyncStatus::Error, Some("boom")),
            ],
            ..Default::default()
        };
        let ResultsPanel::Summary(summary) = ResultsPanel::from_sync_report(&report) else {
            panic!("expected summary");
        };
        assert_eq!(summary.total_checked, 2);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.errors, 0);
        assert_eq!(summary.entries.len(), 2);
    }

    #[test]
    fn server_error_field_renders_error_block() {
        let report = BatchSyncReport {
            error: Some("YouTrack credentials not configured".into()),
            ..Default::default()
        };
        let panel = ResultsPanel::from_sync_report(&report);
        assert!(panel.is_error());
        assert_eq!(
            panel.to_string().trim(),
            "Error: YouTrack credentials not configured"
        );
    }

    #[test]
    fn empty_summary_text() {
        let panel = ResultsPanel::from_sync_report(&BatchSyncReport::default());
        let text = panel.to_string();
        assert!(text.contains("Total checked: 0 | Updated: 0 | Errors: 0"));
        assert!(text.contains("No results to display."));
    }

    #[test]
    fn summary_uses_status_labels() {
        let report = BatchSyncReport {
            results: vec![result(5, SyncStatus::NeedsUpdate, Some("stale"))],
            ..Default::default()
        };
        let text = ResultsPanel::from_sync_report(&report).to_string();
        assert!(text.contains("Issue #5 (YT: PRJ-5)"));
        assert!(text.contains("Status: Needs Update"));
        assert!(text.contains("Message: stale"));
    }

    #[test]
    fn status_report_groups_in_first_seen_order() {
        let report = BatchSyncReport {
            results: vec![
                result(1, SyncStatus::UpToDate, None),
                result(2, SyncStatus::Error, Some("boom")),
                result(3, SyncStatus::UpToDate, None),
            ],
            ..Default::default()
        };
        let ResultsPanel::StatusReport(status) = ResultsPanel::status_report(&report) else {
            panic!("expected status report");
        };
        assert_eq!(
            status.counts,
            vec![(SyncStatus::UpToDate, 2), (SyncStatus::Error, 1)]
        );
        assert_eq!(status.count_for(SyncStatus::InSync), 0);
        assert_eq!(status.lines.len(), 3);

        let text = ResultsPanel::StatusReport(status).to_string();
        assert!(text.contains("Issue #2: Error - boom"));
        assert!(text.contains("Up To Date: 2"));
    }

    #[test]
    fn empty_status_report_text() {
        let text = ResultsPanel::status_report(&BatchSyncReport::default()).to_string();
        assert!(text.contains("No sync status information available."));
    }

    #[test]
    fn unparsable_timestamp_is_kept() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        let formatted = format_timestamp("2026-01-21T10:00:00Z");
        assert_eq!(formatted.len(), "2026-01-21 10:00:00".len());
    }
}

// crates/trackmirror-ui/src/models/sync_orchestrator.rs

//! Import and sync workflows.
//!
//! Each operation applies its in-flight UI state synchronously, dispatches the
//! request through `services::sync_service`, and returns. The request's
//! `*Done` message is applied later by `apply`, which is the only place that
//! clears in-flight state. Every `*Done` message carries either a response or
//! an error, so the cleanup runs on both paths.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use trackmirror_core::UiConfig;
use trackmirror_services::{BatchSyncReport, BulkImportRequest, IssueId, SyncStatus, TrackerClient};

use crate::confirm::ConfirmGate;
use crate::error_mapping::failure_text;
use crate::services::{self, SyncSender, SyncServiceMessage};

use super::notification::NotificationKind;
use super::results_panel::ResultsPanel;
use super::selection::SelectionTracker;
use super::ui_state::UiState;

const SYNC_STARTING_TEXT: &str = "Starting synchronization...";
const STATUS_CHECKING_TEXT: &str = "Checking sync status...";

/// Client slot shared with `AppServices`; swapping it re-points every
/// orchestrator holding the handle.
pub type SharedClient = Arc<RwLock<Arc<TrackerClient>>>;

pub struct SyncOrchestrator {
    client: SharedClient,
    runtime: Handle,
    tx: SyncSender,
    rx: UnboundedReceiver<SyncServiceMessage>,
    cooldown: Duration,
    notification_ttl: Duration,
}

impl SyncOrchestrator {
    pub fn new(client: Arc<TrackerClient>, runtime: Handle, ui: &UiConfig) -> Self {
        Self::with_shared_client(Arc::new(RwLock::new(client)), runtime, ui)
    }

    /// Build an orchestrator that reads the client from `client` on every
    /// dispatch.
    pub fn with_shared_client(client: SharedClient, runtime: Handle, ui: &UiConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            runtime,
            tx,
            rx,
            cooldown: ui.sync_cooldown(),
            notification_ttl: ui.notification_ttl(),
        }
    }

    fn client(&self) -> Arc<TrackerClient> {
        self.client.read().clone()
    }

    // =========== Operations ===========

    /// Import one issue after confirmation. Returns whether a request was sent.
    pub fn import_one(&self, state: &UiState, id: &IssueId, gate: &impl ConfirmGate) -> bool {
        let title = state.item(id).map(|item| item.title.as_str()).unwrap_or_default();
        let prompt = format!("Import issue #{}: \"{}\" to YouTrack?", id, title);
        if !gate.confirm(&prompt) {
            tracing::debug!("Import of #{} declined", id);
            return false;
        }

        services::request_import_one(&self.runtime, &self.tx, self.client(), id.clone());
        true
    }

    /// Import every selected issue in one request after confirmation.
    pub fn import_many(&self, state: &mut UiState, gate: &impl ConfirmGate) -> bool {
        let (issue_ids, issue_titles) = SelectionTracker::new(state).selected_items();
        if issue_ids.is_empty() {
            tracing::debug!("Bulk import with nothing selected, ignoring");
            return false;
        }

        let prompt = format!("Import {} selected issues to YouTrack?", issue_ids.len());
        if !gate.confirm(&prompt) {
            tracing::debug!("Bulk import declined");
            return false;
        }

        services::request_import_many(
            &self.runtime,
            &self.tx,
            self.client(),
            BulkImportRequest {
                issue_ids,
                issue_titles,
            },
        );
        true
    }

    /// Sync every mapped issue. Ignored while the trigger is disabled.
    pub fn sync_all(&self, state: &mut UiState) -> bool {
        if !state.sync_all.is_enabled() {
            tracing::debug!("Sync already running or cooling down");
            return false;
        }

        state.sync_all = state.sync_all.on_start();
        state.progress.visible = true;
        state.progress.update(0, "Starting sync...");
        state.results = ResultsPanel::Pending(SYNC_STARTING_TEXT.to_string());

        services::request_sync_all(&self.runtime, &self.tx, self.client());
        true
    }

    /// Sync one issue, showing the in-flight state before the request is sent.
    pub fn sync_one(&self, state: &mut UiState, id: &IssueId) -> bool {
        let Some(item) = state.item_mut(id) else {
            tracing::warn!("sync_one: no item with id {}", id);
            return false;
        };
        if !item.sync_button.enabled {
            tracing::debug!("Sync of #{} already in flight", id);
            return false;
        }

        item.begin_sync();
        services::request_sync_one(&self.runtime, &self.tx, self.client(), id.clone());
        true
    }

    /// Run a read-only status check; item badges are left untouched.
    pub fn check_status(&self, state: &mut UiState) -> bool {
        if !state.check_status.is_enabled() {
            tracing::debug!("Status check already running");
            return false;
        }

        state.check_status = state.check_status.on_start();
        state.results = ResultsPanel::Pending(STATUS_CHECKING_TEXT.to_string());

        services::request_check_status(&self.runtime, &self.tx, self.client());
        true
    }

    // =========== Message pump ===========

    /// Apply every message already delivered. Returns how many were applied.
    pub fn pump(&mut self, state: &mut UiState) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(state, msg);
            applied += 1;
        }
        applied
    }

    /// Wait for the next message without applying it.
    pub async fn next_message(&mut self) -> Option<SyncServiceMessage> {
        self.rx.recv().await
    }

    /// Apply a completion message to the page state.
    pub fn apply(&self, state: &mut UiState, msg: SyncServiceMessage) {
        match msg {
            SyncServiceMessage::ImportOneDone { id, result } => match result {
                Ok(resp) if resp.is_failure() => {
                    let message = resp
                        .message
                        .or(resp.error)
                        .unwrap_or_else(|| "Error importing issue".to_string());
                    tracing::warn!("Import of #{} rejected: {}", id, message);
                    self.notify(state, message, NotificationKind::Error);
                }
                Ok(resp) => {
                    tracing::info!("Imported issue #{}", id);
                    let message = resp
                        .message
                        .unwrap_or_else(|| format!("Issue #{} imported successfully!", id));
                    self.notify(state, message, NotificationKind::Success);
                }
                Err(e) => {
                    tracing::error!("Error importing issue #{}: {}", id, e);
                    self.notify(state, "Error importing issue", NotificationKind::Error);
                }
            },

            SyncServiceMessage::ImportManyDone { requested, result } => match result {
                Ok(resp) => {
                    tracing::info!("Imported {} of {} issues", resp.imported_count, requested);
                    state.last_imported_count = Some(resp.imported_count);
                    SelectionTracker::new(state).reset_selection();
                    self.notify(
                        state,
                        format!("Successfully imported {} issues!", resp.imported_count),
                        NotificationKind::Success,
                    );
                }
                Err(e) => {
                    tracing::error!("Error importing {} issues: {}", requested, e);
                    self.notify(state, "Error importing issues", NotificationKind::Error);
                }
            },

            SyncServiceMessage::SyncAllDone(result) => {
                match result {
                    Ok(report) => {
                        state.results = ResultsPanel::from_sync_report(&report);
                        state.progress.update(100, "Sync completed");
                        apply_results(state, &report);
                    }
                    Err(e) => {
                        tracing::error!("Sync error: {}", e);
                        state.results = ResultsPanel::Failed(format!("Error: {}", failure_text(e)));
                        state.progress.update(0, "Sync failed");
                    }
                }
                state.sync_all = state.sync_all.on_settled(true);
                services::schedule(
                    &self.runtime,
                    &self.tx,
                    self.cooldown,
                    SyncServiceMessage::SyncAllCooldownElapsed,
                );
            }

            SyncServiceMessage::SyncAllCooldownElapsed => {
                state.sync_all = state.sync_all.on_cooldown_elapsed();
                if state.sync_all.is_enabled() {
                    state.progress.visible = false;
                }
            }

            SyncServiceMessage::SyncOneDone { id, result } => {
                match result {
                    Ok(report) => self.settle_single_sync(state, &id, report),
                    Err(e) => {
                        tracing::error!("Single issue sync error for #{}: {}", id, e);
                        let message = format!("Sync failed: {}", failure_text(e));
                        if let Some(item) = state.item_mut(&id) {
                            item.set_sync_status(SyncStatus::Error, Some(message));
                        }
                        self.notify(
                            state,
                            format!("Failed to sync issue #{}", id),
                            NotificationKind::Error,
                        );
                    }
                }
                if let Some(item) = state.item_mut(&id) {
                    item.end_sync();
                }
            }

            SyncServiceMessage::CheckStatusDone(result) => {
                state.results = match result {
                    Ok(report) => ResultsPanel::status_report(&report),
                    Err(e) => {
                        tracing::error!("Status check error: {}", e);
                        ResultsPanel::Failed(format!("Error checking status: {}", failure_text(e)))
                    }
                };
                state.check_status = state.check_status.on_settled(false);
            }

            SyncServiceMessage::NotificationExpired(id) => state.dismiss_notification(id),
        }
    }

    fn settle_single_sync(&self, state: &mut UiState, id: &IssueId, report: BatchSyncReport) {
        let Some(result) = report.results.into_iter().next() else {
            tracing::warn!("Sync of #{} returned no results", id);
            let message = report.message.unwrap_or_else(|| "Sync completed".to_string());
            if let Some(item) = state.item_mut(id) {
                item.set_sync_status(SyncStatus::Error, Some(message));
            }
            return;
        };

        let status = result.status;
        // Per-issue message first; the report-level message is only a fallback.
        let message = result
            .message
            .or(report.message)
            .unwrap_or_else(|| "Sync completed".to_string());
        if let Some(item) = state.item_mut(id) {
            item.set_sync_status(status, Some(message));
        }
        self.notify(
            state,
            format!("Issue #{} sync: {}", id, status.label()),
            NotificationKind::for_status(status),
        );
    }

    /// Show a notification that expires after the configured lifetime.
    fn notify(&self, state: &mut UiState, message: impl Into<String>, kind: NotificationKind) {
        let id = state.push_notification(message, kind);
        services::schedule(
            &self.runtime,
            &self.tx,
            self.notification_ttl,
            SyncServiceMessage::NotificationExpired(id),
        );
    }
}

/// Update badges for every result, matched by id. Results for issues not on
/// the page are skipped.
fn apply_results(state: &mut UiState, report: &BatchSyncReport) {
    for result in &report.results {
        match state.item_mut(&result.github_number) {
            Some(item) => item.set_sync_status(result.status, result.message.clone()),
            None => tracing::debug!("No item for synced issue #{}", result.github_number),
        }
    }
}

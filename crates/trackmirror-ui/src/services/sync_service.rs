//! Import/sync backend: async requests against the sync server.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use trackmirror_services::{
    BatchSyncReport, BulkImportRequest, BulkImportResponse, ClientError, ImportIssueResponse,
    IssueId, TrackerClient,
};

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum SyncServiceMessage {
    ImportOneDone {
        id: IssueId,
        result: Result<ImportIssueResponse, ClientError>,
    },
    ImportManyDone {
        requested: usize,
        result: Result<BulkImportResponse, ClientError>,
    },
    SyncAllDone(Result<BatchSyncReport, ClientError>),
    /// Fixed delay after a full sync settled; re-enables its trigger.
    SyncAllCooldownElapsed,
    SyncOneDone {
        id: IssueId,
        result: Result<BatchSyncReport, ClientError>,
    },
    CheckStatusDone(Result<BatchSyncReport, ClientError>),
    NotificationExpired(u64),
}

pub type SyncSender = UnboundedSender<SyncServiceMessage>;

fn send(tx: &SyncSender, msg: SyncServiceMessage) {
    if tx.send(msg).is_err() {
        tracing::debug!("UI channel closed, dropping sync service message");
    }
}

/// Request a single-item import. Sends `ImportOneDone`.
pub fn request_import_one(runtime: &Handle, tx: &SyncSender, client: Arc<TrackerClient>, id: IssueId) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.import_issue(&id).await;
        send(&tx, SyncServiceMessage::ImportOneDone { id, result });
    });
}

/// Request a bulk import. Sends `ImportManyDone`.
pub fn request_import_many(
    runtime: &Handle,
    tx: &SyncSender,
    client: Arc<TrackerClient>,
    request: BulkImportRequest,
) {
    let tx = tx.clone();
    let requested = request.issue_ids.len();
    runtime.spawn(async move {
        let result = client.import_bulk(&request).await;
        send(&tx, SyncServiceMessage::ImportManyDone { requested, result });
    });
}

/// Request a full sync. Sends `SyncAllDone`.
pub fn request_sync_all(runtime: &Handle, tx: &SyncSender, client: Arc<TrackerClient>) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.sync_issues().await;
        send(&tx, SyncServiceMessage::SyncAllDone(result));
    });
}

/// Request a single-item sync. Sends `SyncOneDone`.
pub fn request_sync_one(runtime: &Handle, tx: &SyncSender, client: Arc<TrackerClient>, id: IssueId) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.sync_issue(&id).await;
        send(&tx, SyncServiceMessage::SyncOneDone { id, result });
    });
}

/// Request a status check (same endpoint as a full sync). Sends `CheckStatusDone`.
pub fn request_check_status(runtime: &Handle, tx: &SyncSender, client: Arc<TrackerClient>) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.sync_issues().await;
        send(&tx, SyncServiceMessage::CheckStatusDone(result));
    });
}

/// Deliver `msg` after `delay`. Timers are never cancelled.
pub fn schedule(runtime: &Handle, tx: &SyncSender, delay: Duration, msg: SyncServiceMessage) {
    let tx = tx.clone();
    runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        send(&tx, msg);
    });
}

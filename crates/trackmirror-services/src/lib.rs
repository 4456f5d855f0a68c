//! HTTP client and wire types for the issue import/sync server.

pub mod client;
pub mod error;
pub mod types;

pub use client::TrackerClient;
pub use error::ClientError;
pub use types::{
    status_label, BatchSyncReport, BulkImportRequest, BulkImportResponse, ImportIssueResponse,
    IssueId, SyncResult, SyncStatus,
};

//! Transient user-facing messages.

use trackmirror_services::SyncStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    /// Kind used when announcing a single-item sync outcome.
    pub fn for_status(status: SyncStatus) -> Self {
        match status {
            SyncStatus::Error => NotificationKind::Error,
            SyncStatus::InSync | SyncStatus::UpToDate | SyncStatus::Updated => {
                NotificationKind::Success
            }
            _ => NotificationKind::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

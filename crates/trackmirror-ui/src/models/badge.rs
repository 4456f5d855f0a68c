//! Reconciliation tag on an item container.

use trackmirror_services::SyncStatus;

/// Container tag derived from a sync status. At most one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    NeedsUpdate,
    InSync,
}

impl BadgeClass {
    /// Tag for a status; `None` clears both tags.
    pub fn for_status(status: SyncStatus) -> Option<Self> {
        match status {
            SyncStatus::NeedsUpdate | SyncStatus::GithubNewer => Some(BadgeClass::NeedsUpdate),
            SyncStatus::InSync | SyncStatus::UpToDate => Some(BadgeClass::InSync),
            _ => None,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BadgeClass::NeedsUpdate => "needs-update",
            BadgeClass::InSync => "in-sync",
        }
    }
}

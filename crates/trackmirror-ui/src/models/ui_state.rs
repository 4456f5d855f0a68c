// crates/trackmirror-ui/src/models/ui_state.rs

//! Headless page state: the item registry plus every control the import/sync
//! handlers read or write.
//!
//! The registry is built once from the rendered issue list and handed by
//! `&mut` to the selection and sync handlers, so all mutations happen on the
//! single thread that owns it.

use std::collections::HashMap;

use trackmirror_core::TriggerState;
use trackmirror_services::{IssueId, SyncStatus};

use super::badge::BadgeClass;
use super::notification::{Notification, NotificationKind};
use super::results_panel::ResultsPanel;
use super::token_toggle::TokenField;

/// Label of an idle per-item sync button.
pub const SYNC_BUTTON_IDLE_LABEL: &str = "Sync Now";
/// Label of a per-item sync button while its request is in flight.
pub const SYNC_BUTTON_BUSY_LABEL: &str = "Syncing...";

/// A clickable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub enabled: bool,
    pub label: String,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }
}

/// The "select all" checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckAll {
    pub checked: bool,
    pub indeterminate: bool,
}

/// Progress bar shown while a full sync runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressIndicator {
    pub visible: bool,
    pub percent: u8,
    pub text: String,
}

impl ProgressIndicator {
    pub fn update(&mut self, percent: u8, text: impl Into<String>) {
        self.percent = percent.min(100);
        self.text = text.into();
    }
}

/// One importable/syncable issue row.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: IssueId,
    pub title: String,
    pub selected: bool,
    pub sync_status: SyncStatus,
    /// Text shown in the item's status badge.
    pub status_text: String,
    /// Tooltip of the status badge (last server message).
    pub status_message: Option<String>,
    /// Reconciliation tag on the item container; at most one.
    pub badge: Option<BadgeClass>,
    /// Container carries the transient `syncing` tag.
    pub syncing: bool,
    pub sync_button: Button,
}

impl ItemRecord {
    pub fn new(id: IssueId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            selected: false,
            sync_status: SyncStatus::Unknown,
            status_text: SyncStatus::Unknown.label(),
            status_message: None,
            badge: None,
            syncing: false,
            sync_button: Button::new(SYNC_BUTTON_IDLE_LABEL),
        }
    }

    /// Apply a settled sync status to the badge and container tags.
    pub fn set_sync_status(&mut self, status: SyncStatus, message: Option<String>) {
        self.sync_status = status;
        self.status_text = status.label();
        self.status_message = message;
        self.syncing = false;
        self.badge = BadgeClass::for_status(status);
    }

    /// Optimistic in-flight state, shown before the server answers.
    pub fn begin_sync(&mut self) {
        self.sync_status = SyncStatus::Syncing;
        self.status_text = SYNC_BUTTON_BUSY_LABEL.to_string();
        self.syncing = true;
        self.sync_button.enabled = false;
        self.sync_button.label = SYNC_BUTTON_BUSY_LABEL.to_string();
    }

    /// Restore the per-item trigger once its request settles.
    pub fn end_sync(&mut self) {
        self.syncing = false;
        self.sync_button.enabled = true;
        self.sync_button.label = SYNC_BUTTON_IDLE_LABEL.to_string();
    }
}

/// All mutable page state touched by the selection and sync handlers.
#[derive(Debug, Clone)]
pub struct UiState {
    items: Vec<ItemRecord>,
    index: HashMap<IssueId, usize>,

    pub check_all: CheckAll,
    pub import_selected: Button,
    /// Text of the `checked-counter` element.
    pub checked_counter: String,
    /// Text of the `import-count` element.
    pub import_count: String,
    /// Imported count reported by the last successful bulk import.
    pub last_imported_count: Option<u64>,

    pub sync_all: TriggerState,
    pub check_status: TriggerState,
    pub progress: ProgressIndicator,
    pub results: ResultsPanel,

    pub notifications: Vec<Notification>,
    next_notification_id: u64,

    pub token: TokenField,
}

impl UiState {
    /// Build the registry from the rendered `(id, title)` rows.
    ///
    /// Duplicate ids keep their first row.
    pub fn new<I, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = (IssueId, T)>,
        T: Into<String>,
    {
        let mut items = Vec::new();
        let mut index = HashMap::new();
        for (id, title) in rows {
            if index.contains_key(&id) {
                tracing::warn!("Duplicate issue id {} in page, ignoring", id);
                continue;
            }
            index.insert(id.clone(), items.len());
            items.push(ItemRecord::new(id, title));
        }

        let mut state = Self {
            items,
            index,
            check_all: CheckAll::default(),
            import_selected: Button::new("Import Selected"),
            checked_counter: String::new(),
            import_count: String::new(),
            last_imported_count: None,
            sync_all: TriggerState::Idle,
            check_status: TriggerState::Idle,
            progress: ProgressIndicator::default(),
            results: ResultsPanel::Empty,
            notifications: Vec::new(),
            next_notification_id: 1,
            token: TokenField::default(),
        };
        super::selection::SelectionTracker::new(&mut state).refresh();
        state
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [ItemRecord] {
        &mut self.items
    }

    pub fn item(&self, id: &IssueId) -> Option<&ItemRecord> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn item_mut(&mut self, id: &IssueId) -> Option<&mut ItemRecord> {
        match self.index.get(id) {
            Some(&i) => self.items.get_mut(i),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push a notification and return its id.
    pub fn push_notification(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove a notification; unknown ids (already dismissed) are ignored.
    pub fn dismiss_notification(&mut self, id: u64) {
        self.notifications.retain(|n| n.id != id);
    }

    /// Flip the token field between masked and plain text.
    pub fn toggle_token_visibility(&mut self) {
        self.token.toggle_visibility();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn state() -> UiState {
        UiState::new(vec![
            (IssueId::from("1"), "First"),
            (IssueId::from("2"), "Second"),
            (IssueId::from("1"), "Duplicate"),
        ])
    }

    #[test]
    fn registry_skips_duplicates() {
        let s = state();
        assert_eq!(s.len(), 2);
        assert_eq!(s.item(&IssueId::from("1")).unwrap().title, "First");
    }

    #[test]
    fn initial_counters_are_rendered() {
        let s = state();
        assert_eq!(s.checked_counter, "0");
        assert_eq!(s.import_count, "0");
        assert!(!s.import_selected.enabled);
    }

    #[test]
    fn begin_and_end_sync_round_trip_button() {
        let mut s = state();
        let item = s.item_mut(&IssueId::from("2")).unwrap();
        item.begin_sync();
        assert!(!item.sync_button.enabled);
        assert_eq!(item.sync_button.label, "Syncing...");
        assert!(item.syncing);
        item.end_sync();
        assert!(item.sync_button.enabled);
        assert_eq!(item.sync_button.label, "Sync Now");
        assert!(!item.syncing);
    }

    #[test]
    fn notifications_get_unique_ids() {
        let mut s = state();
        let a = s.push_notification("a", NotificationKind::Info);
        let b = s.push_notification("b", NotificationKind::Error);
        assert_ne!(a, b);
        s.dismiss_notification(a);
        s.dismiss_notification(a);
        assert_eq!(s.notifications.len(), 1);
        assert_eq!(s.notifications[0].message, "b");
    }
}

// crates/trackmirror-ui/src/models/selection.rs

//! Checkbox selection over the item registry.
//!
//! Every change recomputes the counters, the bulk-import trigger and the
//! select-all control from the full registry.

use trackmirror_services::IssueId;

use super::ui_state::UiState;

/// Selection handlers operating on a borrowed `UiState`.
pub struct SelectionTracker<'a> {
    state: &'a mut UiState,
}

impl<'a> SelectionTracker<'a> {
    pub fn new(state: &'a mut UiState) -> Self {
        Self { state }
    }

    /// Select-all checkbox changed.
    pub fn toggle_all(&mut self, checked: bool) {
        for item in self.state.items_mut() {
            item.selected = checked;
        }
        self.refresh();
    }

    /// One item checkbox changed. Unknown ids are ignored.
    pub fn toggle_one(&mut self, id: &IssueId, checked: bool) {
        match self.state.item_mut(id) {
            Some(item) => item.selected = checked,
            None => {
                tracing::warn!("toggle_one: no item with id {}", id);
                return;
            }
        }
        self.refresh();
    }

    pub fn selected_count(&self) -> usize {
        selected_count(self.state)
    }

    /// Clear every checkbox (after a successful bulk import).
    pub fn reset_selection(&mut self) {
        self.toggle_all(false);
    }

    /// Ids and titles of the selected items, in page order.
    pub fn selected_items(&self) -> (Vec<String>, Vec<String>) {
        self.state
            .items()
            .iter()
            .filter(|item| item.selected)
            .map(|item| (item.id.to_string(), item.title.clone()))
            .unzip()
    }

    /// Recompute counters, trigger enablement and the select-all state.
    pub fn refresh(&mut self) {
        let selected = selected_count(self.state);
        let total = self.state.len();

        self.state.checked_counter = selected.to_string();
        self.state.import_count = selected.to_string();
        self.state.import_selected.enabled = selected > 0;

        self.state.check_all.checked = total > 0 && selected == total;
        self.state.check_all.indeterminate = selected > 0 && selected < total;
    }
}

fn selected_count(state: &UiState) -> usize {
    state.items().iter().filter(|item| item.selected).count()
}

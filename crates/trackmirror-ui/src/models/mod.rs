pub mod badge;
pub mod notification;
pub mod results_panel;
pub mod selection;
pub mod sync_orchestrator;
pub mod token_toggle;
pub mod ui_state;

pub use badge::BadgeClass;
pub use notification::{Notification, NotificationKind};
pub use results_panel::{ResultEntry, ResultsPanel, StatusLine, StatusReport, SyncSummary};
pub use selection::SelectionTracker;
pub use sync_orchestrator::{SharedClient, SyncOrchestrator};
pub use token_toggle::TokenField;
pub use ui_state::{Button, CheckAll, ItemRecord, ProgressIndicator, UiState};

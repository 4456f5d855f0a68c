pub mod app_services;
pub mod confirm;
pub mod error_mapping;
pub mod models;
pub mod services;

pub use app_services::AppServices;
pub use confirm::{AutoConfirm, ConfirmGate};
pub use models::{SelectionTracker, SyncOrchestrator, UiState};
pub use services::SyncServiceMessage;

//! Maps client errors to trackmirror_core::AppError for consistent user-facing messages.

mod sync;

pub use sync::{failure_text, into_app_error};

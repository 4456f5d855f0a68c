use trackmirror_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt, TrackerError};
use trackmirror_services::ClientError;

/// Classify a client error into the application error hierarchy.
pub fn into_app_error(e: ClientError) -> AppError {
    match e {
        ClientError::Network(e) => AppError::Network(e.into_network_error()),
        ClientError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        ClientError::Api { status: 404, message } if message.starts_with("No mapping") => {
            AppError::Tracker(TrackerError::NotMapped(message))
        }
        ClientError::Api { status: 404, message } => {
            AppError::Tracker(TrackerError::IssueNotFound(message))
        }
        ClientError::Api { status, message } => {
            AppError::Tracker(TrackerError::Rejected { status, message })
        }
        ClientError::InvalidUrl(s) => AppError::Config(ConfigError::Invalid(s)),
    }
}

/// Text shown in error blocks and badge tooltips for a failed request.
///
/// Server-supplied messages are shown verbatim; everything else gets the
/// generic user message of its category.
pub fn failure_text(e: ClientError) -> String {
    match e {
        ClientError::Api { message, .. } => message,
        other => {
            tracing::debug!("Request failed: {}", other);
            into_app_error(other).user_message().to_string()
        }
    }
}

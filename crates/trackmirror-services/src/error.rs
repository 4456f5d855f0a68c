//! Errors returned by the import/sync HTTP client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Parse(String),

    /// Non-2xx answer; `message` is the server's `error` field when present.
    #[error("Server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) if e.is_timeout() => "The sync server did not answer in time.".to_string(),
            Self::Network(_) => "Unable to reach the sync server.".to_string(),
            Self::Parse(_) => "The sync server sent an unreadable response.".to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::InvalidUrl(url) => format!("Invalid server URL: {}", url),
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_surfaces_server_message() {
        let err = ClientError::Api {
            status: 404,
            message: "No mapping found for GitHub issue #7".into(),
        };
        assert_eq!(err.user_message(), "No mapping found for GitHub issue #7");
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_parse_error_message() {
        let err = ClientError::Parse("expected value".into());
        assert!(err.user_message().contains("unreadable"));
        assert_eq!(err.status(), None);
    }
}

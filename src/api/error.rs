//! Advisory client error types

use thiserror::Error;

/// Errors raised by the advisory client
///
/// The display string is what the user sees: the submission boundary stores
/// `to_string()` verbatim, so variants carry user-facing messages.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Non-2xx response; the message is the raw body text, or "HTTP <status>"
    /// when the body was empty
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Non-2xx response from the health endpoint
    #[error("Health check failed")]
    HealthCheck { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Json(#[from] serde_json::Error),
}

impl RequestError {
    /// Build the error for a non-2xx `/advise` response
    pub fn from_status(status: u16, body: String) -> Self {
        let message = if body.is_empty() { format!("HTTP {}", status) } else { body };
        Self::Status { status, message }
    }

    /// The HTTP status, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } | RequestError::HealthCheck { status } => Some(*status),
            RequestError::Network(e) => e.status().map(|s| s.as_u16()),
            RequestError::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_shows_body_verbatim() {
        let err = RequestError::from_status(429, "rate limited".to_string());
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn test_empty_body_falls_back_to_status_line() {
        let err = RequestError::from_status(500, String::new());
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_health_check_message_is_fixed() {
        let err = RequestError::HealthCheck { status: 503 };
        assert_eq!(err.to_string(), "Health check failed");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_json_error_has_no_status() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = RequestError::Json(parse_err);
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("Invalid response:"));
    }
}

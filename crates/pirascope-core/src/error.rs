// ── Core error types ──
//
// User-facing errors from pirascope-core. Consumers never see HTTP
// plumbing directly: the `From<pirascope_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not logged in")]
    NotAuthenticated,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {}", message.as_deref().unwrap_or("request failed"))]
    Api {
        /// Message extracted from the response body, if the server sent one.
        message: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Local state errors ───────────────────────────────────────────
    #[error("Session storage error: {message}")]
    Persistence { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message a view should show for this failure.
    ///
    /// Server-supplied and validation messages win; everything else
    /// collapses to the per-action `fallback` (e.g. "Failed to fetch assets").
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            }
            | Self::AuthenticationFailed { message }
            | Self::ValidationFailed { message } => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pirascope_api::Error> for CoreError {
    fn from(err: pirascope_api::Error) -> Self {
        match err {
            pirascope_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            pirascope_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            pirascope_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            pirascope_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            pirascope_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            pirascope_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_beats_fallback() {
        let err = CoreError::from(pirascope_api::Error::Api {
            status: 422,
            message: Some("Email already registered".into()),
        });
        assert_eq!(err.user_message("Failed to add employee"), "Email already registered");
    }

    #[test]
    fn missing_message_uses_fallback() {
        let err = CoreError::from(pirascope_api::Error::Api {
            status: 500,
            message: None,
        });
        assert_eq!(err.user_message("Failed to fetch assets"), "Failed to fetch assets");
        assert_eq!(
            CoreError::Internal("boom".into()).user_message("Failed to fetch reports"),
            "Failed to fetch reports"
        );
    }

    #[test]
    fn authentication_maps_through() {
        let err = CoreError::from(pirascope_api::Error::Authentication {
            message: "Invalid credentials".into(),
        });
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    }
}

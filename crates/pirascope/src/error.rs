//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use pirascope_config::ConfigError;
use pirascope_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API at {url}")]
    #[diagnostic(
        code(pirascope::connection_failed),
        help(
            "{reason}\n\
             Check the api_url of your profile, or pass --api-url.\n\
             Use --insecure (-k) if the server uses a self-signed certificate."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(pirascope::timeout),
        help("Increase the timeout with --timeout or set `timeout` on the profile.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(pirascope::auth_failed),
        help("Sign in again with: pirascope login")
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(pirascope::not_logged_in),
        help("Sign in first with: pirascope login")
    )]
    NotLoggedIn,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(pirascope::no_credentials),
        help(
            "Set a login email with: pirascope config set email <address>\n\
             Store a password with: pirascope config set-password\n\
             Or set the PIRASCOPE_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(pirascope::not_found),
        help("Run: pirascope {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(pirascope::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pirascope::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pirascope::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: pirascope config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(pirascope::config))]
    Config(Box<figment::Error>),

    #[error("Keyring error: {message}")]
    #[diagnostic(
        code(pirascope::keyring),
        help("Fall back to PIRASCOPE_PASSWORD or a password_env on the profile.")
    )]
    Keyring { message: String },

    #[error("Could not access the saved session: {message}")]
    #[diagnostic(code(pirascope::session))]
    Session { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(pirascope::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotLoggedIn | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. }
            | Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::ApiError {
                status: Some(403), ..
            } => exit_code::AUTH,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a store failure, letting the per-action `fallback` stand in
    /// when the server sent no message.
    pub fn from_action(err: CoreError, fallback: &str) -> Self {
        match err {
            CoreError::Api { status, .. } => Self::ApiError {
                message: err.user_message(fallback),
                status,
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::NotAuthenticated => Self::NotLoggedIn,
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: format!("{entity_type}s list"),
                resource_type: entity_type,
                identifier,
            },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Api { message, status } => Self::ApiError {
                message: message.unwrap_or_else(|| "Request failed".into()),
                status,
            },
            CoreError::Persistence { message } => Self::Session { message },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::ApiError {
                message,
                status: None,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Keyring(e) => Self::Keyring {
                message: e.to_string(),
            },
            ConfigError::Serialization(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_fallback_wins_without_server_message() {
        let err = CliError::from_action(
            CoreError::Api {
                message: None,
                status: Some(500),
            },
            "Failed to fetch assets",
        );
        assert_eq!(err.to_string(), "Failed to fetch assets");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn server_message_is_kept() {
        let err = CliError::from_action(
            CoreError::Api {
                message: Some("Asset is archived".into()),
                status: Some(409),
            },
            "Failed to fetch asset details",
        );
        assert_eq!(err.to_string(), "Asset is archived");
    }

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(CliError::from(CoreError::NotAuthenticated).exit_code(), exit_code::AUTH);
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        let not_found = CliError::from(CoreError::NotFound {
            entity_type: "employee".into(),
            identifier: "99".into(),
        });
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(
            not_found,
            CliError::NotFound { ref list_command, .. } if list_command == "employees list"
        ));
    }
}

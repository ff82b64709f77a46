//! CLI error types with miette diagnostics.
//!
//! Lookup failures keep their user-facing message as the error text and
//! gain help text plus a distinct exit code.

use miette::Diagnostic;
use thiserror::Error;

use ghprofile_config::ConfigError;
use ghprofile_core::{CoreError, LookupError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const RATE_LIMITED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Lookup ───────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(ghprofile::not_found),
        help("Check the spelling of '{username}'. Usernames are not case-sensitive.")
    )]
    NotFound { message: String, username: String },

    #[error("{message}")]
    #[diagnostic(
        code(ghprofile::rate_limited),
        help(
            "Unauthenticated requests are limited per IP address.\n\
             Wait for the reset time, or point --api-url at a GitHub Enterprise host."
        )
    )]
    RateLimited { message: String },

    #[error("{message}")]
    #[diagnostic(code(ghprofile::api_error))]
    Api { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(ghprofile::connection_failed),
        help(
            "Could not get a usable response from {url}\n\
             Re-run with -vv for request details."
        )
    )]
    ConnectionFailed { message: String, url: String },

    // ── Setup ────────────────────────────────────────────────────────

    #[error("Could not set up the HTTP client: {reason}")]
    #[diagnostic(
        code(ghprofile::client_setup),
        help("Check api.base_url and api.ca_cert in: {path}")
    )]
    ClientSetup { reason: String, path: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ghprofile::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Could not load configuration")]
    #[diagnostic(
        code(ghprofile::config),
        help("Fix or remove the config file at: {path}")
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(ghprofile::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Prompt failed: {reason}")]
    #[diagnostic(code(ghprofile::prompt))]
    Prompt { reason: String },

    // ── Output ───────────────────────────────────────────────────────

    #[error("Could not open {target} in a browser")]
    #[diagnostic(code(ghprofile::open))]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {reason}")]
    #[diagnostic(code(ghprofile::serialize))]
    Serialize { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::RateLimited { .. } => exit_code::RATE_LIMITED,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a failed lookup. `url` is the API root that was queried.
    pub fn from_lookup(err: &LookupError, url: &str) -> Self {
        let message = err.user_message();
        match err {
            LookupError::EmptyInput => Self::Validation {
                field: "username".into(),
                reason: message,
            },
            LookupError::NotFound { username } => Self::NotFound {
                message,
                username: username.clone(),
            },
            LookupError::RateLimited { .. } => Self::RateLimited { message },
            LookupError::ServerError { .. } | LookupError::RepositoriesFailed { .. } => {
                Self::Api { message }
            }
            LookupError::NetworkOrParseFailure => Self::ConnectionFailed {
                message,
                url: url.to_owned(),
            },
        }
    }
}

// ── ConfigError / CoreError → CliError mapping ───────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(io) => Self::Io(io),
            other => Self::Config {
                path: ghprofile_config::config_path().display().to_string(),
                source: other,
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let CoreError::Api(api) = err;
        Self::ClientSetup {
            reason: api.to_string(),
            path: ghprofile_config::config_path().display().to_string(),
        }
    }
}

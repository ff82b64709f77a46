// ── Core error types ──
//
// `LookupError` is what a user sees: its `Display` output is the exact
// message rendered in the error area. Front ends never format HTTP
// statuses themselves; the constructors below classify `ghprofile_api::Error`
// depending on which of the two calls failed.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

/// Fallback when the server sent no `message` in its error body.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Terminal outcome of a failed lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupError {
    #[error("Please enter a GitHub username.")]
    EmptyInput,

    #[error("User \"{username}\" not found.")]
    NotFound { username: String },

    #[error("{}", rate_limit_message(.reset_at.as_ref().copied(), &Local))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    #[error("Error fetching user data: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    ServerError { message: Option<String> },

    #[error("Error fetching repositories: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    RepositoriesFailed { message: Option<String> },

    #[error("An unexpected error occurred. Please check your internet connection.")]
    NetworkOrParseFailure,
}

impl LookupError {
    /// Classify a failure of the profile call for `username`.
    pub fn from_profile_error(err: &ghprofile_api::Error, username: &str) -> Self {
        use ghprofile_api::Error as ApiError;

        match err {
            ApiError::NotFound { .. } => Self::NotFound {
                username: username.to_owned(),
            },
            ApiError::RateLimited { reset_epoch, .. } => Self::RateLimited {
                reset_at: reset_epoch.and_then(|secs| DateTime::from_timestamp(secs, 0)),
            },
            ApiError::Api { message, .. } => Self::ServerError {
                message: message.clone(),
            },
            ApiError::Transport(_)
            | ApiError::InvalidUrl(_)
            | ApiError::UnusableBaseUrl(_)
            | ApiError::Tls(_)
            | ApiError::Deserialization { .. } => Self::NetworkOrParseFailure,
        }
    }

    /// Classify a failure of the repositories call. Every status error is
    /// reported the same way; only transport/parse failures differ.
    pub fn from_repositories_error(err: &ghprofile_api::Error) -> Self {
        if err.status().is_some() && !err.is_network_or_parse() {
            Self::RepositoriesFailed {
                message: err.server_message().map(str::to_owned),
            }
        } else {
            Self::NetworkOrParseFailure
        }
    }

    /// The user-visible message. Identical to `Display`.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether developers should get diagnostic detail in the log.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::NetworkOrParseFailure)
    }
}

/// Build the rate-limit message with the reset time shown in `tz`.
///
/// Uses a 12-hour clock (`3:04:05 PM`). Without a usable reset header the
/// message falls back to "later".
pub fn rate_limit_message<Tz>(reset_at: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match reset_at {
        Some(at) => format!(
            "Rate limit exceeded for user details. Please try again after {}.",
            at.with_timezone(tz).format("%-I:%M:%S %p")
        ),
        None => "Rate limit exceeded for user details. Please try again later.".to_owned(),
    }
}

/// Errors raised while setting up the lookup client (not during a lookup).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ghprofile_api::Error),
}

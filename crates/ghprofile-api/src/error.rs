use thiserror::Error;

/// Top-level error type for the `ghprofile-api` crate.
///
/// Every non-2xx response is classified by status here so that
/// `ghprofile-core` can turn it into a user-facing message without
/// touching HTTP types.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, body read, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing or construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API requests: {0}")]
    UnusableBaseUrl(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API status errors ───────────────────────────────────────────
    /// HTTP 404.
    #[error("Not found{}", fmt_message(.message.as_deref()))]
    NotFound { message: Option<String> },

    /// HTTP 403. `reset_epoch` is the `X-RateLimit-Reset` header in unix seconds.
    #[error("Rate limit exceeded{}", fmt_message(.message.as_deref()))]
    RateLimited {
        reset_epoch: Option<i64>,
        message: Option<String>,
    },

    /// Any other non-2xx status. `message` comes from the `{ message }` body.
    #[error("API error (HTTP {status}){}", fmt_message(.message.as_deref()))]
    Api { status: u16, message: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn fmt_message(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl Error {
    /// Returns `true` for HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for HTTP 403.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns `true` when the request never produced a usable response
    /// (network failure or an unparseable success body).
    pub fn is_network_or_parse(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Deserialization { .. })
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(403),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `message` field of the server's error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::NotFound { message }
            | Self::RateLimited { message, .. }
            | Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_server_message() {
        let err = Error::Api {
            status: 500,
            message: Some("Server Error".into()),
        };
        assert_eq!(err.to_string(), "API error (HTTP 500): Server Error");
    }

    #[test]
    fn display_without_message() {
        let err = Error::NotFound { message: None };
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn classification_helpers() {
        let limited = Error::RateLimited {
            reset_epoch: Some(1_700_000_000),
            message: None,
        };
        assert!(limited.is_rate_limited());
        assert!(!limited.is_not_found());
        assert_eq!(limited.status(), Some(403));

        let parse = Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        };
        assert!(parse.is_network_or_parse());
        assert_eq!(parse.status(), None);
        assert_eq!(parse.server_message(), None);
    }
}

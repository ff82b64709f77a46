// GitHub REST HTTP client
//
// Wraps `reqwest::Client` with base-URL-relative endpoint construction and
// status classification. Endpoint methods live in `users.rs` as inherent
// methods so this module stays focused on transport mechanics.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ApiErrorBody;
use crate::transport::TransportConfig;

/// Header carrying the unix time (seconds) at which the rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Raw HTTP client for the GitHub REST API.
///
/// Cheap to clone: `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client for `base_url` (e.g. `https://api.github.com`, or
    /// `https://ghe.example.com/api/v3` for GitHub Enterprise).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Create a client from a string URL and a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Self::with_client(http, Url::parse(base_url)?)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::UnusableBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append `segments` to the base URL path. Each segment is
    /// percent-encoded, so a username can never escape its path slot.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::UnusableBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body, classifying non-2xx
    /// statuses into [`Error`] variants.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_response(resp).await
    }

    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let reset_epoch = rate_limit_reset(resp.headers());
        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }

        // The body must be JSON even on failure; a JSON body without a
        // `message` field still yields a classified status error.
        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) => {
                debug!(status = status.as_u16(), "error response is not JSON");
                return Err(Error::Deserialization {
                    message: e.to_string(),
                    body,
                });
            }
        };
        let message = serde_json::from_value::<ApiErrorBody>(value)
            .ok()
            .and_then(|b| b.message);
        debug!(status = status.as_u16(), ?message, "request failed");

        Err(match status {
            StatusCode::NOT_FOUND => Error::NotFound { message },
            StatusCode::FORBIDDEN => Error::RateLimited {
                reset_epoch,
                message,
            },
            other => Error::Api {
                status: other.as_u16(),
                message,
            },
        })
    }
}

/// Parse the rate-limit reset header as unix seconds.
pub fn rate_limit_reset(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(RATE_LIMIT_RESET_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

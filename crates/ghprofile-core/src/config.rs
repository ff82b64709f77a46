// ── Runtime lookup configuration ──
//
// Describes *where* and *how* to reach the API. Core never reads config
// files; the CLI/TUI builds a `LookupConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub use ghprofile_api::transport::DEFAULT_USER_AGENT;

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// API root (e.g. `https://api.github.com`).
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Extra CA certificate to trust (GitHub Enterprise).
    pub ca_cert: Option<PathBuf>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            ca_cert: None,
        }
    }
}

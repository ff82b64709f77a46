// ghprofile-api: Async Rust client for the GitHub user and repository endpoints

pub mod client;
pub mod error;
pub mod models;
pub mod transport;
pub mod users;

pub use client::GitHubClient;
pub use error::Error;
pub use models::{ApiErrorBody, RepoResponse, UserResponse};
pub use transport::{TlsMode, TransportConfig};
pub use users::REPOS_PER_PAGE;

// Wire models for the GitHub REST endpoints.
//
// Only the fields the lookup renders are declared; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /users/{username}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub created_at: DateTime<Utc>,
    pub html_url: String,
}

/// One element of the `GET /users/{username}/repos` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoResponse {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub homepage: Option<String>,
}

/// Error body returned with non-2xx statuses: `{ "message": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub documentation_url: Option<String>,
}

// User endpoints
//
// Profile and repository listing for a single account. Both are
// unauthenticated GETs against the public REST API.

use tracing::debug;

use crate::client::GitHubClient;
use crate::error::Error;
use crate::models::{RepoResponse, UserResponse};

/// Fixed page size for the repository listing. Only the first page is fetched.
pub const REPOS_PER_PAGE: usize = 100;

impl GitHubClient {
    /// Fetch a user's public profile.
    ///
    /// `GET /users/{username}`
    pub async fn get_user(&self, username: &str) -> Result<UserResponse, Error> {
        let url = self.endpoint(&["users", username])?;
        debug!(username, "fetching user profile");
        self.get(url).await
    }

    /// List a user's public repositories, most recently updated first.
    ///
    /// `GET /users/{username}/repos?sort=updated&per_page=100`
    pub async fn list_user_repos(&self, username: &str) -> Result<Vec<RepoResponse>, Error> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &REPOS_PER_PAGE.to_string());
        debug!(username, "listing user repositories");
        self.get(url).await
    }
}

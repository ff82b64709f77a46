use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// A validated lookup request: a trimmed, non-empty username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileQuery {
    username: String,
}

impl ProfileQuery {
    /// Trim raw user input. Empty or whitespace-only input is rejected.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        let username = raw.trim();
        if username.is_empty() {
            return Err(LookupError::EmptyInput);
        }
        Ok(Self {
            username: username.to_owned(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Display for ProfileQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}

/// Public metadata of one account, as returned by a single profile call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub login: String,
    pub display_name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub public_repo_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
    pub created_at: DateTime<Utc>,
    pub profile_url: String,
}

impl ProfileRecord {
    /// Heading text: the display name, or the login when none is set.
    pub fn heading(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_input() {
        let query = ProfileQuery::parse("  octocat \n").expect("non-empty");
        assert_eq!(query.username(), "octocat");
        assert_eq!(query.to_string(), "octocat");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(ProfileQuery::parse(""), Err(LookupError::EmptyInput));
        assert_eq!(ProfileQuery::parse(" \t\n "), Err(LookupError::EmptyInput));
    }
}

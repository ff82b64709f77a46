// ── Wire → domain conversion ──
//
// Empty strings from the API ("bio": "", "homepage": "") are treated the
// same as null so renderers only ever check `Option`.

use ghprofile_api::{RepoResponse, UserResponse};

use crate::model::{ProfileRecord, RepositoryRecord};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<UserResponse> for ProfileRecord {
    fn from(u: UserResponse) -> Self {
        Self {
            login: u.login,
            display_name: non_empty(u.name),
            avatar_url: u.avatar_url,
            bio: non_empty(u.bio),
            company: non_empty(u.company),
            location: non_empty(u.location),
            public_repo_count: u.public_repos,
            follower_count: u.followers,
            following_count: u.following,
            created_at: u.created_at,
            profile_url: u.html_url,
        }
    }
}

impl From<RepoResponse> for RepositoryRecord {
    fn from(r: RepoResponse) -> Self {
        Self {
            name: r.name,
            url: r.html_url,
            description: non_empty(r.description),
            primary_language: non_empty(r.language),
            star_count: r.stargazers_count,
            fork_count: r.forks_count,
            homepage_url: non_empty(r.homepage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn user() -> UserResponse {
        UserResponse {
            login: "octocat".into(),
            name: Some(String::new()),
            avatar_url: "https://avatars.example/octocat".into(),
            bio: Some("  ".into()),
            company: Some("@github".into()),
            location: None,
            public_repos: 8,
            followers: 20,
            following: 9,
            created_at: DateTime::from_timestamp(1_295_981_076, 0).expect("valid timestamp"),
            html_url: "https://github.com/octocat".into(),
        }
    }

    #[test]
    fn profile_drops_blank_optionals() {
        let record = ProfileRecord::from(user());
        assert_eq!(record.display_name, None);
        assert_eq!(record.bio, None);
        assert_eq!(record.company.as_deref(), Some("@github"));
        assert_eq!(record.heading(), "octocat");
        assert_eq!(record.public_repo_count, 8);
        assert_eq!(record.profile_url, "https://github.com/octocat");
    }

    #[test]
    fn repository_maps_every_field() {
        let record = RepositoryRecord::from(RepoResponse {
            name: "Hello-World".into(),
            html_url: "https://github.com/octocat/Hello-World".into(),
            description: Some("My first repository".into()),
            language: Some("Rust".into()),
            stargazers_count: 3,
            forks_count: 4,
            homepage: Some(String::new()),
        });

        assert_eq!(
            record,
            RepositoryRecord {
                name: "Hello-World".into(),
                url: "https://github.com/octocat/Hello-World".into(),
                description: Some("My first repository".into()),
                primary_language: Some("Rust".into()),
                star_count: 3,
                fork_count: 4,
                homepage_url: None,
            }
        );
    }
}

//! HTML rendering of a [`ViewModel`].
//!
//! Produces a standalone document (stylesheet inlined) so the output can be
//! written to a file and opened directly. Every interpolated value goes
//! through [`escape`]. Timestamps are shown in the timezone passed to the
//! `*_in` variants; the plain variants use the local timezone.

use std::fmt::Display;

use chrono::{Local, TimeZone};

use crate::model::{ProfileRecord, RepositoryRecord};
use crate::state::{UiState, ViewModel};

const STYLESHEET: &str = include_str!("../assets/page.css");

/// Placeholder shown instead of cards when the user has no repositories.
pub const NO_REPOSITORIES: &str = "No public repositories found for this user.";

/// Class carried by each repository card.
pub const REPO_CARD_CLASS: &str = "repo-card";

const PAGE_TITLE: &str = "GitHub Profile Lookup";

/// Render a full HTML document in the local timezone.
pub fn render_page(view: &ViewModel) -> String {
    render_page_in(view, &Local)
}

/// Render a full HTML document with dates shown in `tz`.
pub fn render_page_in<Tz>(view: &ViewModel, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let title = match view.state.profile() {
        Some(profile) => format!("{} · {PAGE_TITLE}", escape(&profile.login)),
        None => PAGE_TITLE.to_owned(),
    };
    let body_class = view
        .theme
        .body_class()
        .map(|class| format!(" class=\"{class}\""))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n{STYLESHEET}</style>\n\
         </head>\n\
         <body{body_class}>\n\
         <main class=\"container\">\n\
         <h1>{PAGE_TITLE}</h1>\n\
         {content}\
         </main>\n\
         </body>\n\
         </html>\n",
        content = render_state_in(&view.state, tz),
    )
}

/// Render the content area for one state. Each variant maps to a fixed
/// set of sections; nothing from a previous state survives.
pub fn render_state_in<Tz>(state: &UiState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match state {
        UiState::Idle => String::new(),
        UiState::Loading => render_loading(),
        UiState::ProfileShown { profile } => {
            format!("{}{}", render_profile_in(profile, tz), render_loading())
        }
        UiState::Error { error, profile } => {
            let mut out = format!(
                "<div id=\"error\" class=\"error\">{}</div>\n",
                escape(&error.user_message())
            );
            if let Some(profile) = profile {
                out.push_str(&render_profile_in(profile, tz));
            }
            out
        }
        UiState::Loaded {
            profile,
            repositories,
        } => format!(
            "{}{}",
            render_profile_in(profile, tz),
            render_repositories(repositories)
        ),
    }
}

fn render_loading() -> String {
    "<div id=\"loading\" class=\"loading\">Loading...</div>\n".to_owned()
}

/// Profile section.
pub fn render_profile_in<Tz>(profile: &ProfileRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let login = escape(&profile.login);
    let mut out = String::from("<div id=\"userDetails\" class=\"user-details\">\n");

    out.push_str(&format!(
        "<img src=\"{}\" alt=\"{login}'s avatar\">\n<h2>{}</h2>\n",
        escape(&profile.avatar_url),
        escape(profile.heading()),
    ));
    out.push_str(&field("Username", &login));
    for (label, value) in [
        ("Bio", &profile.bio),
        ("Company", &profile.company),
        ("Location", &profile.location),
    ] {
        if let Some(value) = value {
            out.push_str(&field(label, &escape(value)));
        }
    }
    out.push_str(&field("Public Repos", &profile.public_repo_count.to_string()));
    out.push_str(&field("Followers", &profile.follower_count.to_string()));
    out.push_str(&field("Following", &profile.following_count.to_string()));
    out.push_str(&field("Joined GitHub", &join_date_in(profile, tz)));
    out.push_str(&format!(
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">View GitHub Profile</a></p>\n</div>\n",
        escape(&profile.profile_url)
    ));
    out
}

/// Account creation date as `M/D/YYYY` in the local timezone.
pub fn join_date(profile: &ProfileRecord) -> String {
    join_date_in(profile, &Local)
}

pub fn join_date_in<Tz>(profile: &ProfileRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    profile
        .created_at
        .with_timezone(tz)
        .format("%-m/%-d/%Y")
        .to_string()
}

/// Repositories section: one card per record, or the placeholder.
pub fn render_repositories(repositories: &[RepositoryRecord]) -> String {
    let mut out =
        String::from("<div id=\"userRepos\" class=\"user-repos\">\n<h2>Public Repositories</h2>\n");

    if repositories.is_empty() {
        out.push_str(&format!("<p>{NO_REPOSITORIES}</p>\n"));
    } else {
        for repo in repositories {
            out.push_str(&render_repo_card(repo));
        }
    }

    out.push_str("</div>\n");
    out
}

fn render_repo_card(repo: &RepositoryRecord) -> String {
    let url = escape(&repo.url);
    let mut out = format!(
        "<div class=\"{REPO_CARD_CLASS}\">\n<h3><a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{}</a></h3>\n",
        escape(&repo.name)
    );

    if let Some(description) = &repo.description {
        out.push_str(&format!("<p>{}</p>\n", escape(description)));
    }
    if let Some(language) = &repo.primary_language {
        out.push_str(&field("Primary Language", &escape(language)));
    }
    out.push_str(&field("Stars", &repo.star_count.to_string()));
    out.push_str(&field("Forks", &repo.fork_count.to_string()));

    out.push_str("<div class=\"repo-links\">\n");
    out.push_str(&format!(
        "<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">Repo Link</a>\n"
    ));
    if let Some(homepage) = &repo.homepage_url {
        out.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">Live Demo</a>\n",
            escape(homepage)
        ));
    }
    out.push_str("</div>\n</div>\n");
    out
}

/// One labelled line. `value` must already be escaped.
fn field(label: &str, value: &str) -> String {
    format!("<p><strong>{label}:</strong> {value}</p>\n")
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

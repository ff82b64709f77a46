//! Text for the results panel, one builder per section.
//!
//! Sections follow the HTML page: error banner, profile, repositories.
//! Every `UiState` variant maps to a fixed set of sections.

use ratatui::text::{Line, Span};

use ghprofile_core::render::{self, NO_REPOSITORIES};
use ghprofile_core::{ProfileRecord, RepositoryRecord, UiState};

use crate::theme::Palette;

pub const IDLE_HINT: &str = "Type a GitHub username and press Enter.";

/// Lines for the results panel in the given state.
pub fn content_lines(state: &UiState, palette: &Palette) -> Vec<Line<'static>> {
    match state {
        UiState::Idle => vec![Line::styled(IDLE_HINT, palette.muted_style())],
        UiState::Loading => vec![loading_line(palette)],
        UiState::ProfileShown { profile } => {
            let mut lines = profile_lines(profile, palette);
            lines.push(Line::default());
            lines.push(loading_line(palette));
            lines
        }
        UiState::Error { error, profile } => {
            let mut lines = vec![Line::styled(error.user_message(), palette.error_style())];
            if let Some(profile) = profile {
                lines.push(Line::default());
                lines.extend(profile_lines(profile, palette));
            }
            lines
        }
        UiState::Loaded {
            profile,
            repositories,
        } => {
            let mut lines = profile_lines(profile, palette);
            lines.push(Line::default());
            lines.extend(repository_lines(repositories, palette));
            lines
        }
    }
}

fn loading_line(palette: &Palette) -> Line<'static> {
    Line::styled("Loading...", palette.muted_style())
}

fn field(label: &str, value: String, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), palette.label_style()),
        Span::raw(value),
    ])
}

pub fn profile_lines(profile: &ProfileRecord, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(profile.heading().to_owned(), palette.title_style()),
        field("Username", profile.login.clone(), palette),
    ];
    for (label, value) in [
        ("Bio", &profile.bio),
        ("Company", &profile.company),
        ("Location", &profile.location),
    ] {
        if let Some(value) = value {
            lines.push(field(label, value.clone(), palette));
        }
    }
    lines.extend([
        field("Public Repos", profile.public_repo_count.to_string(), palette),
        field("Followers", profile.follower_count.to_string(), palette),
        field("Following", profile.following_count.to_string(), palette),
        field("Joined GitHub", render::join_date(profile), palette),
        Line::from(vec![
            Span::styled("View GitHub Profile: ", palette.label_style()),
            Span::styled(profile.profile_url.clone(), palette.link_style()),
        ]),
    ]);
    lines
}

/// Repository cards in API order, or the placeholder.
pub fn repository_lines(
    repositories: &[RepositoryRecord],
    palette: &Palette,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled("Public Repositories", palette.title_style())];
    if repositories.is_empty() {
        lines.push(Line::styled(NO_REPOSITORIES, palette.muted_style()));
        return lines;
    }

    for repo in repositories {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("▸ ", palette.border_focused()),
            Span::styled(repo.name.clone(), palette.label_style()),
        ]));
        if let Some(description) = &repo.description {
            lines.push(Line::raw(format!("  {description}")));
        }
        let mut stats = Vec::new();
        if let Some(language) = &repo.primary_language {
            stats.push(Span::styled(format!("  {language}"), palette.success_style()));
        }
        stats.push(Span::styled(
            format!("  ★ {}  ⑂ {}", repo.star_count, repo.fork_count),
            palette.muted_style(),
        ));
        lines.push(Line::from(stats));
        lines.push(Line::from(vec![
            Span::styled("  Repo Link: ", palette.muted_style()),
            Span::styled(repo.url.clone(), palette.link_style()),
        ]));
        if let Some(homepage) = &repo.homepage_url {
            lines.push(Line::from(vec![
                Span::styled("  Live Demo: ", palette.muted_style()),
                Span::styled(homepage.clone(), palette.link_style()),
            ]));
        }
    }
    lines
}

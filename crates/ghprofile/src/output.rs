//! Output formatting: HTML, JSON, YAML, table, plain.
//!
//! Renders a finished lookup in the format selected by `--output`. HTML is
//! the core page renderer, structured formats serialize the `UiState`
//! through serde, tables use `tabled`, plain emits one repository per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use ghprofile_core::render;
use ghprofile_core::{ProfileRecord, RepositoryRecord, ViewModel};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct RepoRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Language")]
    language: String,
    #[tabled(rename = "Stars")]
    stars: u64,
    #[tabled(rename = "Forks")]
    forks: u64,
    #[tabled(rename = "Live Demo")]
    homepage: String,
}

impl From<&RepositoryRecord> for RepoRow {
    fn from(r: &RepositoryRecord) -> Self {
        Self {
            name: r.name.clone(),
            language: r.primary_language.clone().unwrap_or_default(),
            stars: r.star_count,
            forks: r.fork_count,
            homepage: r.homepage_url.clone().unwrap_or_default(),
        }
    }
}

fn profile_rows(p: &ProfileRecord) -> Vec<FieldRow> {
    let mut rows = vec![FieldRow {
        field: "Username",
        value: p.login.clone(),
    }];
    for (field, value) in [
        ("Bio", &p.bio),
        ("Company", &p.company),
        ("Location", &p.location),
    ] {
        if let Some(value) = value {
            rows.push(FieldRow {
                field,
                value: value.clone(),
            });
        }
    }
    rows.extend([
        FieldRow {
            field: "Public Repos",
            value: p.public_repo_count.to_string(),
        },
        FieldRow {
            field: "Followers",
            value: p.follower_count.to_string(),
        },
        FieldRow {
            field: "Following",
            value: p.following_count.to_string(),
        },
        FieldRow {
            field: "Joined GitHub",
            value: render::join_date(p),
        },
        FieldRow {
            field: "Profile",
            value: p.profile_url.clone(),
        },
    ]);
    rows
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a lookup result in the chosen format.
pub fn render_lookup(
    format: OutputFormat,
    view: &ViewModel,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Html => Ok(render::render_page(view)),
        OutputFormat::Json => render_json(&view.state, false),
        OutputFormat::JsonCompact => render_json(&view.state, true),
        OutputFormat::Yaml => render_yaml(&view.state),
        OutputFormat::Table => Ok(render_tables(view, color)),
        OutputFormat::Plain => Ok(view
            .state
            .repositories()
            .unwrap_or_default()
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_tables(view: &ViewModel, color: bool) -> String {
    let Some(profile) = view.state.profile() else {
        return view.state.label().to_owned();
    };

    let heading = if color {
        profile.heading().bold().to_string()
    } else {
        profile.heading().to_owned()
    };
    let mut out = format!("{heading}\n{}", render_table(&profile_rows(profile)));

    if let Some(repos) = view.state.repositories() {
        let title = if color {
            "Public Repositories".bold().to_string()
        } else {
            "Public Repositories".to_owned()
        };
        out.push_str(&format!("\n\n{title}\n"));
        if repos.is_empty() {
            out.push_str(render::NO_REPOSITORIES);
        } else {
            let rows: Vec<RepoRow> = repos.iter().map(RepoRow::from).collect();
            out.push_str(&render_table(&rows));
        }
    }
    out
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// JSON, pretty or single-line.
pub fn render_json<T: serde::Serialize + ?Sized>(
    data: &T,
    compact: bool,
) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Serialize {
        reason: e.to_string(),
    })
}

/// YAML output.
pub fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Serialize {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghprofile_core::{Theme, UiState};

    fn profile() -> ProfileRecord {
        serde_json::from_value(serde_json::json!({
            "login": "octocat",
            "display_name": "The Octocat",
            "avatar_url": "https://avatars.example/octocat",
            "bio": null,
            "company": "@github",
            "location": null,
            "public_repo_count": 8,
            "follower_count": 20,
            "following_count": 9,
            "created_at": "2011-01-25T18:44:36Z",
            "profile_url": "https://github.com/octocat"
        }))
        .expect("valid record")
    }

    fn repo(name: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: name.into(),
            url: format!("https://github.com/octocat/{name}"),
            description: None,
            primary_language: Some("Rust".into()),
            star_count: 3,
            fork_count: 1,
            homepage_url: None,
        }
    }

    fn loaded(repositories: Vec<RepositoryRecord>) -> ViewModel {
        ViewModel::new(
            UiState::Loaded {
                profile: profile(),
                repositories,
            },
            Theme::Dark,
        )
    }

    #[test]
    fn plain_lists_repository_names() {
        let out = render_lookup(
            OutputFormat::Plain,
            &loaded(vec![repo("one"), repo("two")]),
            false,
        )
        .expect("renders");
        assert_eq!(out, "one\ntwo");
    }

    #[test]
    fn json_serializes_state() {
        let out = render_lookup(OutputFormat::JsonCompact, &loaded(vec![repo("one")]), false)
            .expect("renders");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["state"], "loaded");
        assert_eq!(value["profile"]["login"], "octocat");
        assert_eq!(value["repositories"][0]["name"], "one");
    }

    #[test]
    fn table_shows_profile_and_placeholder() {
        let out = render_lookup(OutputFormat::Table, &loaded(vec![]), false).expect("renders");
        assert!(out.starts_with("The Octocat\n"));
        assert!(out.contains("Company"));
        assert!(!out.contains("Location"));
        assert!(out.contains(render::NO_REPOSITORIES));
    }

    #[test]
    fn html_uses_theme() {
        let out = render_lookup(OutputFormat::Html, &loaded(vec![repo("one")]), false)
            .expect("renders");
        assert!(out.contains("<body class=\"dark-mode\">"));
        assert!(out.contains("class=\"repo-card\""));
    }
}

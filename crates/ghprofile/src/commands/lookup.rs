//! `ghprofile lookup <username>`

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use ghprofile_core::{ProfileLookupClient, UiState, ViewModel};

use crate::cli::{GlobalOpts, LookupArgs, OutputFormat};
use crate::config::{self, Settings};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: LookupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let settings = config::resolve(global, config::load_config()?)?;
    let client = ProfileLookupClient::new(&settings.lookup)?;
    debug!(base_url = %client.base_url(), output = ?settings.output, "running lookup");

    let spinner = (!global.quiet && std::io::stderr().is_terminal()).then(new_spinner);
    let state = run_with_progress(&client, &args.username, spinner.as_ref()).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    // A failed repositories call still leaves a profile worth showing;
    // it is emitted before the error decides the exit code.
    let failure = state
        .error()
        .map(|err| CliError::from_lookup(err, client.base_url().as_str()));
    let failure = match failure {
        Some(failure) if state.profile().is_none() => return Err(failure),
        other => other,
    };

    let view = ViewModel::new(state, settings.theme);
    let rendered =
        output::render_lookup(settings.output, &view, output::should_color(global.color))?;

    let written = match &args.out {
        Some(path) => {
            write_file(path, &rendered)?;
            if !global.quiet {
                eprintln!("✓ Wrote {}", path.display());
            }
            Some(path.clone())
        }
        None => {
            output::print_output(&rendered, global.quiet);
            None
        }
    };

    if let Some(failure) = failure {
        return Err(failure);
    }

    if args.open {
        let target = open_target(&settings, &view, written.as_deref(), &rendered)?;
        debug!(%target, "opening in browser");
        open::that(&target).map_err(|source| CliError::Open { target, source })?;
    }
    Ok(())
}

/// Drive the lookup while mirroring state transitions into the spinner.
async fn run_with_progress(
    client: &ProfileLookupClient,
    username: &str,
    spinner: Option<&ProgressBar>,
) -> UiState {
    let mut rx = client.subscribe();
    let lookup = client.lookup(username);
    tokio::pin!(lookup);

    loop {
        tokio::select! {
            state = &mut lookup => return state,
            Ok(()) = rx.changed() => {
                if let Some(pb) = spinner {
                    pb.set_message(progress_message(&rx.borrow_and_update()));
                }
            }
        }
    }
}

fn progress_message(state: &UiState) -> String {
    match state {
        UiState::ProfileShown { profile } => {
            format!("Fetching repositories for {}...", profile.login)
        }
        other => format!("{}...", capitalize(other.label())),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

fn new_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Loading...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// HTML output opens the page itself (written to a temp file when no
/// `--out` was given); every other format opens the profile URL.
fn open_target(
    settings: &Settings,
    view: &ViewModel,
    written: Option<&Path>,
    rendered: &str,
) -> Result<String, CliError> {
    if settings.output == OutputFormat::Html {
        let path = match written {
            Some(path) => path.to_path_buf(),
            None => {
                let login = view.state.profile().map_or("profile", |p| p.login.as_str());
                let path = temp_page_path(login);
                write_file(&path, rendered)?;
                path
            }
        };
        return Ok(path.display().to_string());
    }

    view.state
        .profile()
        .map(|p| p.profile_url.clone())
        .ok_or_else(|| CliError::Validation {
            field: "open".into(),
            reason: "no profile to open".into(),
        })
}

fn temp_page_path(login: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ghprofile-{login}.html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_messages_follow_state() {
        assert_eq!(progress_message(&UiState::Loading), "Loading...");
        assert_eq!(progress_message(&UiState::Idle), "Idle...");
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("loaded"), "Loaded");
    }

    #[test]
    fn temp_page_is_named_after_login() {
        assert!(
            temp_page_path("octocat")
                .to_string_lossy()
                .ends_with("ghprofile-octocat.html")
        );
    }
}

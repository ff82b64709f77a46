//! `ghprofile-tui`: interactive GitHub profile lookup in the terminal.
//!
//! Built on [ratatui](https://ratatui.rs). Type a username, press Enter,
//! and the profile plus its public repositories render in place. The
//! lookup client publishes every state transition; a background bridge
//! task forwards them into the action loop.
//!
//! Logs are written to a file (default `$TMPDIR/ghprofile-tui.log`) to
//! avoid corrupting the terminal UI.

mod action;
mod app;
mod event;
mod state_bridge;
mod theme;
mod tui;
mod ui;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ghprofile_core::{ProfileLookupClient, Theme};

use crate::app::App;

const DEFAULT_LOG_FILE: &str = "ghprofile-tui.log";

/// Look up public GitHub profiles from your terminal.
#[derive(Parser, Debug)]
#[command(name = "ghprofile-tui", version, about)]
struct Cli {
    /// Username to look up on start
    username: Option<String>,

    /// GitHub API base URL (overrides config)
    #[arg(long, env = "GHPROFILE_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "GHPROFILE_TIMEOUT")]
    timeout: Option<u64>,

    /// Initial theme: light or dark (overrides config)
    #[arg(long)]
    theme: Option<Theme>,

    /// Directory for Ctrl+E HTML exports
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Log file path (defaults to ghprofile-tui.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr; that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ghprofile_tui={log_level},ghprofile_core={log_level},ghprofile_api={log_level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));
    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new(DEFAULT_LOG_FILE));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Build the lookup client from config file + env, with flags on top.
fn build_client(cli: &Cli) -> Result<(ProfileLookupClient, Theme)> {
    let mut cfg = ghprofile_config::load_config().wrap_err("failed to load config")?;
    if let Some(url) = &cli.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(timeout) = cli.timeout {
        cfg.api.timeout = timeout;
    }

    let lookup = cfg.to_lookup_config().wrap_err("invalid configuration")?;
    let client = ProfileLookupClient::new(&lookup).wrap_err("failed to build HTTP client")?;
    Ok((client, cli.theme.unwrap_or(cfg.ui.theme)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let (client, theme) = build_client(&cli)?;
    info!(base_url = %client.base_url(), %theme, "starting ghprofile-tui");

    let mut app = App::new(client, theme, cli.export_dir.clone());
    if let Some(username) = &cli.username {
        app = app.with_initial_query(username);
    }
    app.run().await?;

    Ok(())
}

//! Clap derive structures for the `ghprofile` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this module
//! depends on clap and clap_complete only.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ghprofile -- look up public GitHub profiles
#[derive(Debug, Parser)]
#[command(
    name = "ghprofile",
    version,
    about = "Look up public GitHub profiles and their repositories",
    long_about = "Fetches a user's public profile and most recently updated repositories\n\
        from the GitHub REST API and renders them as a standalone HTML page,\n\
        JSON, YAML, or a terminal table.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// GitHub API root (overrides config `api.base_url`)
    #[arg(long, env = "GHPROFILE_API_URL", global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides config `api.timeout`)
    #[arg(long, env = "GHPROFILE_TIMEOUT", global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format (defaults to config `ui.output`)
    #[arg(long, short = 'o', env = "GHPROFILE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Page theme for HTML output (overrides config `ui.theme`)
    #[arg(long, global = true)]
    pub theme: Option<ThemeArg>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page
    Html,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Pretty tables
    Table,
    /// Plain text, one repository name per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a user's profile and public repositories
    #[command(alias = "l")]
    Lookup(LookupArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// GitHub username (surrounding whitespace is ignored)
    pub username: String,

    /// Write the rendered output to FILE instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Open the result in the browser (the HTML page, or the profile URL)
    #[arg(long)]
    pub open: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a config file with guided setup
    Init,

    /// Display the resolved configuration (file + environment)
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Config key (e.g. "api.base_url", "ui.theme")
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

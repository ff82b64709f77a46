//! CLI configuration: thin wrapper around `ghprofile_config`.
//!
//! Adds resolution that applies `GlobalOpts` flag overrides
//! (--api-url, --timeout, --output, --theme) on top of file + env.

use clap::ValueEnum;

use ghprofile_core::{LookupConfig, Theme};

use crate::cli::{GlobalOpts, OutputFormat, ThemeArg};
use crate::error::CliError;

pub use ghprofile_config::{Config, config_path, load_config, save_config};

/// Everything a lookup needs after flags are applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub lookup: LookupConfig,
    pub theme: Theme,
    pub output: OutputFormat,
}

/// Merge the loaded config with CLI flag overrides. Flags win.
pub fn resolve(global: &GlobalOpts, mut cfg: Config) -> Result<Settings, CliError> {
    if let Some(url) = &global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout = timeout;
    }

    let lookup = cfg.to_lookup_config()?;

    let output = match global.output {
        Some(format) => format,
        None => OutputFormat::from_str(&cfg.ui.output, true).map_err(|_| {
            CliError::Validation {
                field: "ui.output".into(),
                reason: format!("unknown output format '{}'", cfg.ui.output),
            }
        })?,
    };

    let theme = global.theme.map_or(cfg.ui.theme, Theme::from);

    Ok(Settings {
        lookup,
        theme,
        output,
    })
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

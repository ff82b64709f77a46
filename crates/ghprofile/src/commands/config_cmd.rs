//! Config subcommand handlers.

use dialoguer::{Input, Select};

use ghprofile_config::{OUTPUT_FORMATS, parse_base_url};
use ghprofile_core::Theme;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let path = config::config_path();
            if path.exists()
                && !util::confirm(
                    &format!("Overwrite existing config at {}?", path.display()),
                    "config init",
                    global.yes,
                )?
            {
                eprintln!("Aborted; config left unchanged.");
                return Ok(());
            }

            let cfg = if global.yes {
                Config::default()
            } else {
                eprintln!("ghprofile configuration wizard");
                eprintln!("   Config path: {}\n", path.display());
                prompt_config()?
            };
            cfg.validate()?;

            let path = config::save_config(&cfg)?;
            eprintln!("✓ Configuration written to {}", path.display());
            eprintln!("\n  Try it: ghprofile lookup octocat");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = match global.output {
                Some(OutputFormat::Json) => output::render_json(&cfg, false)?,
                Some(OutputFormat::JsonCompact) => output::render_json(&cfg, true)?,
                Some(OutputFormat::Yaml) => output::render_yaml(&cfg)?,
                _ => toml::to_string_pretty(&cfg).map_err(|e| CliError::Serialize {
                    reason: e.to_string(),
                })?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            cfg.set(&key, &value)?;
            let path = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} in {}", path.display());
            }
            Ok(())
        }
    }
}

fn prompt_config() -> Result<Config, CliError> {
    let mut cfg = Config::default();

    let base_url: String = Input::new()
        .with_prompt("GitHub API URL")
        .default(cfg.api.base_url.clone())
        .validate_with(|input: &String| {
            parse_base_url(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;
    cfg.api.base_url = base_url;

    let timeout: u64 = Input::new()
        .with_prompt("Request timeout (seconds)")
        .default(cfg.api.timeout)
        .validate_with(|secs: &u64| {
            if *secs == 0 {
                Err("must be greater than zero")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)?;
    cfg.api.timeout = timeout;

    let themes = [Theme::Light, Theme::Dark];
    let theme = Select::new()
        .with_prompt("Page theme")
        .items(&themes)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    cfg.ui.theme = themes[theme];

    let output = Select::new()
        .with_prompt("Default output format")
        .items(OUTPUT_FORMATS)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    cfg.ui.output = OUTPUT_FORMATS[output].to_owned();

    Ok(cfg)
}

//! Shared configuration for the ghprofile CLI and TUI.
//!
//! TOML file + `GHPROFILE_*` environment layering via figment, validation,
//! and translation to `ghprofile_core::LookupConfig`. Both binaries depend
//! on this crate; the CLI applies its flag overrides on top.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use ghprofile_core::config::{DEFAULT_API_URL, DEFAULT_USER_AGENT};
use ghprofile_core::{LookupConfig, Theme};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "GHPROFILE_CONFIG";

/// Prefix for environment overrides. Nested keys are split on `__`,
/// e.g. `GHPROFILE_API__TIMEOUT=10`.
pub const ENV_PREFIX: &str = "GHPROFILE_";

/// Output formats accepted in `ui.output`.
pub const OUTPUT_FORMATS: &[&str] = &["html", "json", "json-compact", "yaml", "table", "plain"];

/// Keys accepted by [`Config::set`].
pub const SETTABLE_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout",
    "api.user_agent",
    "api.ca_cert",
    "ui.theme",
    "ui.output",
];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Where and how to reach the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// API root. Point this at a GitHub Enterprise host to use one.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Path to an extra CA certificate (PEM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            ca_cert: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub theme: Theme,

    /// Default CLI output format.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            output: default_output(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}
fn default_output() -> String {
    "html".into()
}

// ── Validation & translation ────────────────────────────────────────

impl Config {
    /// Check every field that can't be expressed in the type system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url(&self.api.base_url)?;
        if self.api.timeout == 0 {
            return Err(invalid("api.timeout", "must be greater than zero"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(invalid("api.user_agent", "must not be empty"));
        }
        if !OUTPUT_FORMATS.contains(&self.ui.output.as_str()) {
            return Err(invalid(
                "ui.output",
                format!(
                    "expected one of {}, got '{}'",
                    OUTPUT_FORMATS.join(", "),
                    self.ui.output
                ),
            ));
        }
        Ok(())
    }

    /// Build the core client configuration. Validates first.
    pub fn to_lookup_config(&self) -> Result<LookupConfig, ConfigError> {
        self.validate()?;
        Ok(LookupConfig {
            base_url: parse_base_url(&self.api.base_url)?,
            timeout: Duration::from_secs(self.api.timeout),
            user_agent: self.api.user_agent.clone(),
            ca_cert: self.api.ca_cert.clone(),
        })
    }

    /// Set one dotted key (see [`SETTABLE_KEYS`]) from its string form.
    /// The config is left untouched when the value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api.base_url" => {
                parse_base_url(value)?;
                self.api.base_url = value.to_owned();
            }
            "api.timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| invalid(key, "must be a number (seconds)"))?;
                if secs == 0 {
                    return Err(invalid(key, "must be greater than zero"));
                }
                self.api.timeout = secs;
            }
            "api.user_agent" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, "must not be empty"));
                }
                self.api.user_agent = value.to_owned();
            }
            "api.ca_cert" => {
                self.api.ca_cert = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "ui.theme" => {
                self.ui.theme = Theme::from_str(value)
                    .map_err(|_| invalid(key, "must be 'light' or 'dark'"))?;
            }
            "ui.output" => {
                let format = value.to_ascii_lowercase();
                if !OUTPUT_FORMATS.contains(&format.as_str()) {
                    return Err(invalid(
                        key,
                        format!("expected one of {}", OUTPUT_FORMATS.join(", ")),
                    ));
                }
                self.ui.output = format;
            }
            other => {
                return Err(invalid(
                    other,
                    format!(
                        "unknown config key. Valid keys: {}",
                        SETTABLE_KEYS.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Parse an API root: absolute, `http` or `https`, usable as a base.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| invalid("api.base_url", format!("invalid URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid(
            "api.base_url",
            format!("expected an http(s) URL, got '{raw}'"),
        ));
    }
    Ok(url)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `GHPROFILE_CONFIG`, else platform conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "ghprofile", "ghprofile").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ghprofile");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is not an
/// error; defaults and env still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg.api.base_url, "https://api.github.com");
        assert_eq!(cfg.api.timeout, 30);
        assert_eq!(cfg.ui.theme, Theme::Light);
        assert_eq!(cfg.ui.output, "html");
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [api]
                base_url = "https://ghe.example.com/api/v3"
                timeout = 5

                [ui]
                theme = "dark"
                "#,
            )?;

            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.api.base_url, "https://ghe.example.com/api/v3");
            assert_eq!(cfg.api.timeout, 5);
            assert_eq!(cfg.api.user_agent, default_user_agent());
            assert_eq!(cfg.ui.theme, Theme::Dark);
            assert_eq!(cfg.ui.output, "html");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[api]\ntimeout = 5\n")?;
            jail.set_env("GHPROFILE_API__TIMEOUT", "12");
            jail.set_env("GHPROFILE_UI__OUTPUT", "yaml");

            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.api.timeout, 12);
            assert_eq!(cfg.ui.output, "yaml");
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_| {
            let cfg = load_config_from(Path::new("nope.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn bad_theme_in_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[ui]\ntheme = \"sepia\"\n")?;
            let err = load_config_from(Path::new("config.toml"));
            assert!(matches!(err, Err(ConfigError::Figment(_))));
            Ok(())
        });
    }

    #[test]
    fn config_path_honors_override() {
        Jail::expect_with(|jail| {
            jail.set_env(CONFIG_PATH_ENV, "/tmp/ghprofile-test/config.toml");
            assert_eq!(
                config_path(),
                PathBuf::from("/tmp/ghprofile-test/config.toml")
            );
            Ok(())
        });
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.api.base_url = "mailto:someone@example.com".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Validation { field, .. }) if field == "api.base_url"
        ));

        let mut cfg = Config::default();
        cfg.api.base_url = "not a url".into();
        assert!(cfg.to_lookup_config().is_err());

        let mut cfg = Config::default();
        cfg.api.timeout = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.ui.output = "xml".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn translates_to_lookup_config() {
        let mut cfg = Config::default();
        cfg.api.timeout = 7;
        cfg.api.ca_cert = Some("/etc/ssl/ghe.pem".into());

        let lookup = cfg.to_lookup_config().expect("valid");
        assert_eq!(lookup.base_url.as_str(), "https://api.github.com/");
        assert_eq!(lookup.timeout, Duration::from_secs(7));
        assert_eq!(lookup.ca_cert, Some(PathBuf::from("/etc/ssl/ghe.pem")));
    }

    #[test]
    fn set_updates_known_keys() {
        let mut cfg = Config::default();
        cfg.set("ui.theme", "DARK").expect("theme");
        cfg.set("ui.output", "Table").expect("output");
        cfg.set("api.timeout", "15").expect("timeout");
        cfg.set("api.base_url", "http://localhost:8080").expect("url");
        cfg.set("api.ca_cert", "/tmp/ca.pem").expect("ca");

        assert_eq!(cfg.ui.theme, Theme::Dark);
        assert_eq!(cfg.ui.output, "table");
        assert_eq!(cfg.api.timeout, 15);
        assert_eq!(cfg.api.base_url, "http://localhost:8080");
        assert_eq!(cfg.api.ca_cert, Some(PathBuf::from("/tmp/ca.pem")));

        cfg.set("api.ca_cert", "").expect("clear ca");
        assert_eq!(cfg.api.ca_cert, None);
    }

    #[test]
    fn set_rejects_without_mutating() {
        let mut cfg = Config::default();
        assert!(cfg.set("api.timeout", "soon").is_err());
        assert!(cfg.set("api.timeout", "0").is_err());
        assert!(cfg.set("ui.theme", "sepia").is_err());
        assert!(cfg.set("api.base_url", "ftp://example.com").is_err());
        assert!(cfg.set("profiles.home", "x").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set("ui.theme", "dark").expect("theme");
        cfg.set("api.timeout", "9").expect("timeout");
        save_config_to(&cfg, &path).expect("saved");

        let written = std::fs::read_to_string(&path).expect("readable");
        assert!(written.contains("[api]"));
        assert!(written.contains("theme = \"dark\""));
        assert!(!written.contains("ca_cert"));

        let parsed: Config = toml::from_str(&written).expect("parses");
        assert_eq!(parsed, cfg);
    }
}

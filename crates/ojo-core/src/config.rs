//! Configuration management for ojo.
//!
//! Loads configuration from ${OJO_HOME}/config.toml with sensible defaults.
//! The backend endpoint has no default: it must come from the command line,
//! the environment or the config file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable consulted for the backend endpoint.
pub const ENDPOINT_ENV: &str = "OJO_ENDPOINT";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are always present while the
/// user's customized values are preserved.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for ojo configuration and data directories.
    //!
    //! OJO_HOME resolution order:
    //! 1. OJO_HOME environment variable (if set)
    //! 2. ~/.config/ojo (default)

    use std::path::PathBuf;

    /// Returns the ojo home directory.
    pub fn ojo_home() -> PathBuf {
        if let Ok(home) = std::env::var("OJO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".ojo"),
            |h| h.join(".config").join("ojo"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        ojo_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        ojo_home().join("logs")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the analytics backend (no default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Log file settings.
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Saves only the endpoint field to the default config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_endpoint(endpoint: &str) -> Result<()> {
        Self::save_endpoint_to(&paths::config_path(), endpoint)
    }

    /// Saves only the endpoint field to a specific config file path.
    ///
    /// Creates the file with the default template if it doesn't exist.
    /// If the file exists, merges user values into the latest template so
    /// comments survive.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_endpoint_to(path: &Path, endpoint: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let endpoint = validate_endpoint(endpoint)?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["endpoint"] = value(endpoint);

        Self::write_config(path, &doc.to_string())
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Resolves the backend endpoint with precedence: override > config.
    ///
    /// The override is the `--endpoint` flag, which clap also fills from
    /// `OJO_ENDPOINT`.
    ///
    /// # Errors
    /// Returns an error if no endpoint is configured or it is not a valid
    /// http(s) URL.
    pub fn resolve_endpoint(&self, override_url: Option<&str>) -> Result<String> {
        let candidate = [override_url, self.endpoint.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty());

        match candidate {
            Some(url) => validate_endpoint(url),
            None => anyhow::bail!(
                "No analytics endpoint configured. Pass --endpoint, set {ENDPOINT_ENV}, \
                 or add `endpoint = \"...\"` to {}.",
                paths::config_path().display()
            ),
        }
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Validates that an endpoint is a well-formed http(s) URL.
fn validate_endpoint(url: &str) -> Result<String> {
    let trimmed = url.trim();
    let parsed =
        url::Url::parse(trimmed).with_context(|| format!("Invalid endpoint URL: {trimmed}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!(
            "Invalid endpoint URL: {trimmed} (expected http or https, got {})",
            parsed.scheme()
        );
    }
    Ok(trimmed.to_string())
}

//! Settings parser for loading and layering configuration.
//!
//! Precedence, lowest first: built-in defaults, the YAML settings file,
//! `.env`, environment variables, command-line flags (applied by the
//! runner).

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::settings::Settings;

/// Environment variable holding the server URL.
pub const ENV_URL: &str = "RANCHER_URL";
/// Environment variable holding the access key.
pub const ENV_ACCESS_KEY: &str = "RANCHER_ACCESS_KEY";
/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "RANCHER_SECRET_KEY";
/// Environment variable holding the API version.
pub const ENV_API_VERSION: &str = "RANCHER_API_VERSION";

/// Settings file names searched for, in order.
pub const DEFAULT_SETTINGS_FILES: &[&str] = &["rancher.yaml", "rancher.yml", ".rancher-ensure.yaml"];

/// Parser for the settings file.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving `.env`.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new settings parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path `.env` is looked up in.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        info!("Loading settings from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to read file: {e}"),
            location: Some(path.display().to_string()),
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses settings from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<Settings> {
        debug!("Parsing YAML settings");

        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            }
            .into()
        })
    }

    /// Loads settings from `path`, or from a discovered file, or defaults.
    ///
    /// An explicit path must exist; discovery falling through is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file cannot be read or parsed.
    pub fn load(&self, path: Option<&Path>) -> Result<Settings> {
        if let Some(path) = path {
            return self.load_file(path);
        }

        let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match find_settings_file(start) {
            Some(found) => self.load_file(found),
            None => {
                debug!("No settings file found, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Applies process environment overrides to the settings.
    pub fn apply_env_overrides(settings: &mut Settings) {
        Self::apply_overrides_from(settings, |name| std::env::var(name).ok());
    }

    /// Applies overrides read through `lookup`.
    pub fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_URL) {
            debug!("Overriding rancher.url from environment");
            settings.rancher.url = Some(url);
        }

        if let Some(key) = lookup(ENV_ACCESS_KEY) {
            debug!("Overriding rancher.access_key from environment");
            settings.rancher.access_key = Some(key);
        }

        if let Some(secret) = lookup(ENV_SECRET_KEY) {
            debug!("Overriding rancher.secret_key from environment");
            settings.rancher.secret_key = Some(secret);
        }

        if let Some(version) = lookup(ENV_API_VERSION) {
            debug!("Overriding rancher.api_version from environment");
            settings.rancher.api_version = version;
        }
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to load .env file: {e}"),
                location: Some(env_path.display().to_string()),
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Finds a settings file in `start_dir` or its parents, then in the
/// user configuration directory.
#[must_use]
pub fn find_settings_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_SETTINGS_FILES {
            let candidate = current.join(filename);
            if candidate.exists() {
                info!("Found settings file: {}", candidate.display());
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    user_settings_file().filter(|path| path.exists())
}

/// Per-user settings file, e.g. `~/.config/rancher-ensure/rancher.yaml`.
#[must_use]
pub fn user_settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rancher-ensure").join(DEFAULT_SETTINGS_FILES[0]))
}

//! Settings validation.
//!
//! Checks the layered settings before any request is sent and turns the
//! connection section into an explicit [`RancherConnection`].

use crate::error::{ConfigError, Result};
use tracing::debug;

use super::parser::{ENV_ACCESS_KEY, ENV_SECRET_KEY, ENV_URL};
use super::settings::{RancherConnection, Settings};

/// Validator for layered settings.
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates settings and extracts the connection.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid or missing field.
    pub fn validate(&self, settings: &Settings) -> Result<RancherConnection> {
        let connection = Self::validate_connection(settings)?;
        Self::validate_service(settings)?;
        debug!("Settings validation passed");
        Ok(connection)
    }

    /// Validates resource names given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty or padded with whitespace.
    pub fn validate_name(&self, field: &str, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ConfigError::validation(format!("{field} cannot be empty"), field).into());
        }
        if name.trim() != name {
            return Err(ConfigError::validation(
                format!("{field} '{name}' has leading or trailing whitespace"),
                field,
            )
            .into());
        }
        Ok(())
    }

    fn validate_connection(settings: &Settings) -> Result<RancherConnection> {
        let rancher = &settings.rancher;

        let url = required(rancher.url.as_deref(), "rancher.url", ENV_URL)?;
        let lower = url.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(ConfigError::validation(
                format!("Rancher URL '{url}' must start with http:// or https://"),
                "rancher.url",
            )
            .into());
        }

        let access_key = required(rancher.access_key.as_deref(), "rancher.access_key", ENV_ACCESS_KEY)?;
        let secret_key = required(rancher.secret_key.as_deref(), "rancher.secret_key", ENV_SECRET_KEY)?;

        if rancher.api_version.trim_matches('/').is_empty() {
            return Err(
                ConfigError::validation("API version cannot be empty", "rancher.api_version").into(),
            );
        }

        if rancher.timeout_secs == Some(0) {
            return Err(ConfigError::validation(
                "Timeout must be at least one second",
                "rancher.timeout_secs",
            )
            .into());
        }

        Ok(RancherConnection {
            url: url.to_string(),
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            api_version: rancher.api_version.clone(),
            timeout_secs: rancher.timeout_secs,
        })
    }

    fn validate_service(settings: &Settings) -> Result<()> {
        let service = &settings.service;

        if service.image.trim().is_empty() {
            return Err(ConfigError::validation("Service image cannot be empty", "service.image").into());
        }
        if service.scale == 0 {
            return Err(ConfigError::validation("Service scale must be at least 1", "service.scale").into());
        }
        if service.vcpu == 0 {
            return Err(ConfigError::validation("Service vcpu must be at least 1", "service.vcpu").into());
        }
        Ok(())
    }
}

fn required<'s>(value: Option<&'s str>, field: &str, env_var: &str) -> Result<&'s str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::missing(field, env_var).into()),
    }
}

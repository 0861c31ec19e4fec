//! Configuration module for the rancher-ensure tools.
//!
//! This module handles all configuration-related functionality:
//! - Parsing the optional `rancher.yaml` settings file
//! - Layering `.env` and environment variable overrides
//! - Validating settings into an explicit connection value

mod parser;
mod settings;
mod validator;

pub use parser::{
    find_settings_file, user_settings_file, ConfigParser, DEFAULT_SETTINGS_FILES, ENV_ACCESS_KEY,
    ENV_API_VERSION, ENV_SECRET_KEY, ENV_URL,
};
pub use settings::{
    ConnectionConfig, RancherConnection, ServiceTemplate, Settings, StackDefaults,
};
pub use validator::ConfigValidator;

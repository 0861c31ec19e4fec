//! Settings types for the rancher-ensure tools.
//!
//! These structs map to the optional `rancher.yaml` settings file. Every
//! field has a default, so an empty file (or no file) is a valid starting
//! point that environment variables and flags complete.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::planner::ComparePolicy;
use crate::rancher::{LaunchConfig, LogConfig, ServicePayload, StackPayload};

const REDACTED: &str = "<redacted>";

/// The root settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Server connection.
    #[serde(default)]
    pub rancher: ConnectionConfig,
    /// Stack defaults.
    #[serde(default)]
    pub stack: StackDefaults,
    /// Service template.
    #[serde(default)]
    pub service: ServiceTemplate,
}

/// Rancher server connection settings.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server base URL, e.g. `http://rancher:8080/`.
    #[serde(default)]
    pub url: Option<String>,
    /// API access key.
    #[serde(default)]
    pub access_key: Option<String>,
    /// API secret key.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout; none means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            access_key: None,
            secret_key: None,
            api_version: default_api_version(),
            timeout_secs: None,
        }
    }
}

/// A validated connection, passed explicitly to the API client.
#[derive(Clone, PartialEq, Eq)]
pub struct RancherConnection {
    /// Server base URL.
    pub url: String,
    /// API access key.
    pub access_key: String,
    /// API secret key.
    pub secret_key: String,
    /// API version path segment.
    pub api_version: String,
    /// Request timeout; none means no timeout.
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("url", &self.url)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| REDACTED))
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for RancherConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RancherConnection")
            .field("url", &self.url)
            .field("access_key", &self.access_key)
            .field("secret_key", &REDACTED)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Defaults applied to every ensured stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackDefaults {
    /// Policy deciding whether an existing stack needs an update.
    #[serde(default)]
    pub compare: ComparePolicy,
    /// System flag.
    #[serde(default)]
    pub system: bool,
    /// Docker compose document.
    #[serde(default)]
    pub docker_compose: String,
    /// Rancher compose document.
    #[serde(default)]
    pub rancher_compose: String,
}

impl StackDefaults {
    /// Builds the desired payload of a stack.
    #[must_use]
    pub fn payload(&self, name: &str, description: &str) -> StackPayload {
        StackPayload {
            system: self.system,
            docker_compose: self.docker_compose.clone(),
            rancher_compose: self.rancher_compose.clone(),
            ..StackPayload::new(name, description)
        }
    }
}

/// Template every created service is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceTemplate {
    /// Image reference, with or without the `docker:` prefix.
    pub image: String,
    /// Number of containers.
    pub scale: u32,
    /// Start the service once created.
    pub start_on_create: bool,
    /// Memory reservation in bytes.
    pub memory_reservation: u64,
    /// Virtual CPUs.
    pub vcpu: u32,
    /// Container labels.
    pub labels: BTreeMap<String, String>,
    /// Container environment variables.
    pub environment: BTreeMap<String, String>,
    /// Volume bindings.
    pub data_volumes: Vec<String>,
    /// Network mode.
    pub network_mode: String,
    /// User the container runs as.
    pub user: String,
    /// Allocate a TTY.
    pub tty: bool,
    /// Keep stdin open.
    pub stdin_open: bool,
    /// Privileged container.
    pub privileged: bool,
    /// Publish all exposed ports.
    pub publish_all_ports: bool,
    /// Read-only root filesystem.
    pub read_only: bool,
    /// Run an init process.
    pub run_init: bool,
    /// Action when the instance stops.
    pub instance_triggered_stop: String,
}

impl Default for ServiceTemplate {
    fn default() -> Self {
        Self {
            image: String::from("docker:library/alpine:latest"),
            scale: 1,
            start_on_create: true,
            memory_reservation: 134_217_728,
            vcpu: 1,
            labels: BTreeMap::from([(
                String::from("io.rancher.container.pull_image"),
                String::from("always"),
            )]),
            environment: BTreeMap::new(),
            data_volumes: Vec::new(),
            network_mode: String::from("managed"),
            user: String::from("root"),
            tty: true,
            stdin_open: true,
            privileged: false,
            publish_all_ports: false,
            read_only: false,
            run_init: false,
            instance_triggered_stop: String::from("stop"),
        }
    }
}

impl ServiceTemplate {
    /// Image reference as Rancher expects it, `docker:`-prefixed.
    #[must_use]
    pub fn image_uuid(&self) -> String {
        if self.image.starts_with("docker:") {
            self.image.clone()
        } else {
            format!("docker:{}", self.image)
        }
    }

    /// Builds the launch configuration of a service.
    #[must_use]
    pub fn launch_config(&self) -> LaunchConfig {
        LaunchConfig {
            config_type: String::from("launchConfig"),
            data_volumes: self.data_volumes.clone(),
            environment: self.environment.clone(),
            image_uuid: self.image_uuid(),
            instance_triggered_stop: self.instance_triggered_stop.clone(),
            kind: String::from("container"),
            labels: self.labels.clone(),
            log_config: LogConfig::default(),
            memory_reservation: self.memory_reservation,
            network_mode: self.network_mode.clone(),
            privileged: self.privileged,
            publish_all_ports: self.publish_all_ports,
            read_only: self.read_only,
            run_init: self.run_init,
            start_on_create: self.start_on_create,
            stdin_open: self.stdin_open,
            system: false,
            tty: self.tty,
            user: self.user.clone(),
            version: String::from("0"),
            vcpu: self.vcpu,
        }
    }

    /// Builds the desired payload of a service in a resolved stack.
    #[must_use]
    pub fn payload(&self, name: &str, stack_id: &str) -> ServicePayload {
        ServicePayload {
            kind: String::from("service"),
            name: name.to_string(),
            stack_id: stack_id.to_string(),
            start_on_create: self.start_on_create,
            scale: self.scale,
            launch_config: self.launch_config(),
        }
    }
}

fn default_api_version() -> String {
    String::from("v2-beta")
}

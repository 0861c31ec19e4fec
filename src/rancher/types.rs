//! Rancher API types.
//!
//! This module defines the request and response types for the Rancher
//! `v2-beta` REST API, plus the lookup descriptors used for name resolution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RancherEnsureError, Result};

/// Kind of Rancher resource handled by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// An environment (a Rancher "project").
    Environment,
    /// A stack inside an environment.
    Stack,
    /// A service inside a stack.
    Service,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "Environment"),
            Self::Stack => write!(f, "Stack"),
            Self::Service => write!(f, "Service"),
        }
    }
}

/// A name-filtered listing request.
///
/// Each variant carries the name and the IDs of its parent scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Environment by name.
    Environment {
        /// Environment name.
        name: String,
    },
    /// Stack by name within an environment.
    Stack {
        /// Stack name.
        name: String,
        /// Resolved environment ID.
        environment_id: String,
    },
    /// Service by name within a stack.
    Service {
        /// Service name.
        name: String,
        /// Resolved stack ID.
        stack_id: String,
        /// Resolved environment ID.
        environment_id: String,
    },
}

impl Lookup {
    /// Looks up an environment.
    #[must_use]
    pub fn environment(name: &str) -> Self {
        Self::Environment {
            name: name.to_string(),
        }
    }

    /// Looks up a stack inside an environment.
    #[must_use]
    pub fn stack(name: &str, environment_id: &str) -> Self {
        Self::Stack {
            name: name.to_string(),
            environment_id: environment_id.to_string(),
        }
    }

    /// Looks up a service inside a stack.
    #[must_use]
    pub fn service(name: &str, stack_id: &str, environment_id: &str) -> Self {
        Self::Service {
            name: name.to_string(),
            stack_id: stack_id.to_string(),
            environment_id: environment_id.to_string(),
        }
    }

    /// Kind of resource being looked up.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Environment { .. } => ResourceKind::Environment,
            Self::Stack { .. } => ResourceKind::Stack,
            Self::Service { .. } => ResourceKind::Service,
        }
    }

    /// Name being looked up.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Environment { name } | Self::Stack { name, .. } | Self::Service { name, .. } => {
                name
            }
        }
    }

    /// Collection path of the listing endpoint.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Environment { .. } => "projects",
            Self::Stack { .. } => "stacks",
            Self::Service { .. } => "services",
        }
    }

    /// Query filters of the listing request, name first.
    #[must_use]
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Environment { name } => vec![("name", name.as_str())],
            Self::Stack {
                name,
                environment_id,
            } => vec![("name", name.as_str()), ("accountId", environment_id.as_str())],
            Self::Service {
                name,
                stack_id,
                environment_id,
            } => vec![
                ("name", name.as_str()),
                ("stackId", stack_id.as_str()),
                ("accountId", environment_id.as_str()),
            ],
        }
    }
}

/// A Rancher collection response.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    /// Items of the collection.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Minimal view of any listed resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Opaque resource ID.
    pub id: String,
    /// Resource name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A stack as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    /// Stack ID.
    pub id: String,
    /// Stack name.
    #[serde(default)]
    pub name: Option<String>,
    /// Stack description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether this is a system stack.
    #[serde(default)]
    pub system: Option<bool>,
    /// Docker compose document.
    #[serde(default)]
    pub docker_compose: Option<String>,
    /// Rancher compose document.
    #[serde(default)]
    pub rancher_compose: Option<String>,
}

impl Stack {
    /// Projects the fields compared against a [`StackPayload`].
    ///
    /// Fields the API left empty are kept as JSON `null`.
    #[must_use]
    pub fn comparable_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(String::from("name"), option_value(self.name.as_deref()));
        fields.insert(
            String::from("description"),
            option_value(self.description.as_deref()),
        );
        fields.insert(
            String::from("system"),
            self.system.map_or(Value::Null, Value::Bool),
        );
        fields.insert(
            String::from("dockerCompose"),
            option_value(self.docker_compose.as_deref()),
        );
        fields.insert(
            String::from("rancherCompose"),
            option_value(self.rancher_compose.as_deref()),
        );
        fields
    }
}

fn option_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.to_string()))
}

/// Desired state of a stack, sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackPayload {
    /// Stack name.
    pub name: String,
    /// Stack description.
    pub description: String,
    /// System flag.
    pub system: bool,
    /// Docker compose document.
    pub docker_compose: String,
    /// Rancher compose document.
    pub rancher_compose: String,
}

impl StackPayload {
    /// Creates a payload with empty compose documents.
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            system: false,
            docker_compose: String::new(),
            rancher_compose: String::new(),
        }
    }

    /// Flat key-value view used by the comparison policies.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        to_object(self)
    }
}

/// A service as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service ID.
    pub id: String,
    /// Service name.
    #[serde(default)]
    pub name: Option<String>,
    /// Owning stack ID.
    #[serde(default)]
    pub stack_id: Option<String>,
    /// Current launch configuration.
    #[serde(default)]
    pub launch_config: Option<Map<String, Value>>,
}

/// Log configuration block of a launch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Always `logConfig`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            kind: String::from("logConfig"),
        }
    }
}

/// Launch configuration of a service container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfig {
    /// Always `launchConfig`.
    #[serde(rename = "type")]
    pub config_type: String,
    /// Volume bindings.
    pub data_volumes: Vec<String>,
    /// Container environment variables.
    pub environment: BTreeMap<String, String>,
    /// Image reference, prefixed with `docker:`.
    pub image_uuid: String,
    /// Action when the instance stops.
    pub instance_triggered_stop: String,
    /// Instance kind.
    pub kind: String,
    /// Container labels.
    pub labels: BTreeMap<String, String>,
    /// Logging driver configuration.
    pub log_config: LogConfig,
    /// Memory reservation in bytes.
    pub memory_reservation: u64,
    /// Network mode.
    pub network_mode: String,
    /// Privileged container.
    pub privileged: bool,
    /// Publish all exposed ports.
    pub publish_all_ports: bool,
    /// Read-only root filesystem.
    pub read_only: bool,
    /// Run an init process.
    pub run_init: bool,
    /// Start the container once created.
    pub start_on_create: bool,
    /// Keep stdin open.
    pub stdin_open: bool,
    /// System container.
    pub system: bool,
    /// Allocate a TTY.
    pub tty: bool,
    /// User the container runs as.
    pub user: String,
    /// Launch config version.
    pub version: String,
    /// Virtual CPUs.
    pub vcpu: u32,
}

impl LaunchConfig {
    /// Flat key-value view used by the comparison policies.
    ///
    /// # Errors
    ///
    /// Returns an error if the launch config cannot be serialized.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        to_object(self)
    }
}

/// Desired state of a service, sent on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    /// Always `service`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Service name.
    pub name: String,
    /// Owning stack ID.
    pub stack_id: String,
    /// Start the service once created.
    pub start_on_create: bool,
    /// Number of containers.
    pub scale: u32,
    /// Container launch configuration.
    pub launch_config: LaunchConfig,
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RancherEnsureError::internal(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(e) => Err(RancherEnsureError::internal(format!(
            "failed to serialize payload: {e}"
        ))),
    }
}

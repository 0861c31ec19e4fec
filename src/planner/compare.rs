//! Desired-state comparison policies.
//!
//! Both policies look at a single level of keys. Nested objects are
//! compared as whole values and never diffed field by field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// A flat key-value view of a resource configuration.
pub type ConfigMap = Map<String, Value>;

/// How current and desired configurations are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ComparePolicy {
    /// Every key pair across both maps must cross-resolve to equal,
    /// non-null values.
    #[default]
    SymmetricStrict,
    /// Every desired key must exist in current with an equal value;
    /// extra current keys are ignored.
    AsymmetricPermissive,
}

impl ComparePolicy {
    /// Returns true if `current` is close enough to `desired` to skip
    /// a mutating call.
    #[must_use]
    pub fn is_equal(self, current: &ConfigMap, desired: &ConfigMap) -> bool {
        let equal = match self {
            Self::SymmetricStrict => symmetric_strict(current, desired),
            Self::AsymmetricPermissive => asymmetric_permissive(current, desired),
        };
        debug!("Comparison ({self}): {}", if equal { "equal" } else { "needs update" });
        equal
    }
}

impl fmt::Display for ComparePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymmetricStrict => write!(f, "symmetric-strict"),
            Self::AsymmetricPermissive => write!(f, "asymmetric-permissive"),
        }
    }
}

/// Stops at the first desired key that is missing from `current` or
/// holds a different value.
#[must_use]
pub fn asymmetric_permissive(current: &ConfigMap, desired: &ConfigMap) -> bool {
    desired
        .iter()
        .all(|(key, value)| current.get(key) == Some(value))
}

/// Pairwise comparison over every (current key, desired key) pair.
///
/// For each pair the value of the desired key is looked up in `current`
/// and the value of the current key in `desired`; either being absent or
/// `null` means unequal, as does a mismatch on either cross lookup.
///
/// In effect the key sets must be identical and free of nulls, except
/// that an empty map on either side never enters the loop and compares
/// equal.
#[must_use]
pub fn symmetric_strict(current: &ConfigMap, desired: &ConfigMap) -> bool {
    for (current_key, current_value) in current {
        for (desired_key, desired_value) in desired {
            let (Some(current_cross), Some(desired_cross)) =
                (non_null(current, desired_key), non_null(desired, current_key))
            else {
                return false;
            };

            if current_value != desired_cross || current_cross != desired_value {
                return false;
            }
        }
    }
    true
}

fn non_null<'m>(map: &'m ConfigMap, key: &str) -> Option<&'m Value> {
    map.get(key).filter(|v| !v.is_null())
}

//! Planning module.
//!
//! This module decides whether a remote resource already matches its
//! desired configuration.

mod compare;

pub use compare::{asymmetric_permissive, symmetric_strict, ComparePolicy, ConfigMap};

//! Rancher API integration module.
//!
//! This module provides everything needed to talk to a Rancher server:
//! wire types, the [`RancherApi`] trait, its HTTP implementation, and
//! name-to-ID resolution.

mod api;
mod client;
mod resolver;
mod types;

pub use api::RancherApi;
pub use client::RancherClient;
pub use resolver::Resolver;
pub use types::{
    Collection, LaunchConfig, LogConfig, Lookup, ResourceKind, ResourceRef, Service,
    ServicePayload, Stack, StackPayload,
};

//! Rancher API trait definition.
//!
//! This module defines the operations the reconcilers need from Rancher.
//! Services are create-or-skip, so there is no service update.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{Lookup, ResourceRef, Service, ServicePayload, Stack, StackPayload};

/// Operations on a Rancher server.
#[async_trait]
pub trait RancherApi: Send + Sync {
    /// Lists resources matching a name-filtered lookup, in server order.
    async fn list(&self, lookup: &Lookup) -> Result<Vec<ResourceRef>>;

    /// Fetches a stack of an environment.
    async fn get_stack(&self, environment_id: &str, stack_id: &str) -> Result<Stack>;

    /// Creates a stack in an environment.
    async fn create_stack(&self, environment_id: &str, payload: &StackPayload) -> Result<Stack>;

    /// Replaces a stack's configuration.
    async fn update_stack(
        &self,
        environment_id: &str,
        stack_id: &str,
        payload: &StackPayload,
    ) -> Result<Stack>;

    /// Fetches a service.
    async fn get_service(&self, service_id: &str) -> Result<Service>;

    /// Creates a service in a stack.
    async fn create_service(
        &self,
        environment_id: &str,
        payload: &ServicePayload,
    ) -> Result<Service>;
}

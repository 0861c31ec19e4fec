//! Rancher API client implementation.
//!
//! This module provides the HTTP client for the Rancher `v2-beta` REST API.
//! Every call is a single request: no retries, no backoff.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::RancherConnection;
use crate::error::{ApiError, Result};

use super::api::RancherApi;
use super::types::{Collection, Lookup, ResourceRef, Service, ServicePayload, Stack, StackPayload};

/// Rancher API client.
#[derive(Clone)]
pub struct RancherClient {
    /// HTTP client.
    client: Client,
    /// API root, e.g. `http://rancher:8080/v2-beta`.
    api_root: String,
    /// Access key (basic auth user).
    access_key: String,
    /// Secret key (basic auth password).
    secret_key: String,
}

impl fmt::Debug for RancherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RancherClient")
            .field("api_root", &self.api_root)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl RancherClient {
    /// Creates a new Rancher API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(connection: &RancherConnection) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = connection.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_root: format!(
                "{}/{}",
                connection.url.trim_end_matches('/'),
                connection.api_version.trim_matches('/')
            ),
            access_key: connection.access_key.clone(),
            secret_key: connection.secret_key.clone(),
        })
    }

    /// Builds the full URL of an API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path)
    }

    /// Adds authentication and content headers.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(header::CONTENT_TYPE, "application/json")
            .basic_auth(&self.access_key, Some(&self.secret_key))
    }

    /// Sends a request and classifies the response.
    ///
    /// `entity` names the resource the request is about, for error reports.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, entity: &str) -> Result<T> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Request failed: {e}")))?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::AuthenticationFailed {
                message: String::from("Invalid access key or secret key"),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read response: {e}")))?;
        trace!("Response {status}: {body}");

        classify(status, &body, entity)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)], entity: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!("GET {url}");
        self.send(self.client.get(&url).query(query), entity).await
    }
}

/// Interprets a response body.
///
/// A body typed `error` is a rejection whatever the status code.
fn classify<T: DeserializeOwned>(status: StatusCode, body: &str, entity: &str) -> Result<T> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        if status.is_success() {
            return Err(ApiError::invalid(format!("Response is not JSON: {body}")).into());
        }
        return Err(ApiError::api_error(status.as_u16(), body).into());
    };

    if is_error_body(&value) {
        return Err(ApiError::Rejected {
            entity: entity.to_string(),
            body: body.to_string(),
        }
        .into());
    }

    if !status.is_success() {
        return Err(ApiError::api_error(status.as_u16(), body).into());
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::invalid(format!("Failed to parse response: {e}")).into())
}

fn is_error_body(value: &Value) -> bool {
    ["baseType", "type"]
        .iter()
        .any(|field| value.get(field).and_then(Value::as_str) == Some("error"))
}

#[async_trait]
impl RancherApi for RancherClient {
    async fn list(&self, lookup: &Lookup) -> Result<Vec<ResourceRef>> {
        let listing: Collection<ResourceRef> = self
            .get(lookup.collection(), &lookup.filters(), lookup.name())
            .await?;
        debug!(
            "{} '{}': {} match(es)",
            lookup.kind(),
            lookup.name(),
            listing.data.len()
        );
        Ok(listing.data)
    }

    async fn get_stack(&self, environment_id: &str, stack_id: &str) -> Result<Stack> {
        self.get(
            &format!("stacks/{stack_id}"),
            &[("accountId", environment_id)],
            stack_id,
        )
        .await
    }

    async fn create_stack(&self, environment_id: &str, payload: &StackPayload) -> Result<Stack> {
        let url = self.endpoint(&format!("projects/{environment_id}/stacks"));
        debug!("POST {url}");
        self.send(self.client.post(&url).json(payload), &payload.name)
            .await
    }

    async fn update_stack(
        &self,
        environment_id: &str,
        stack_id: &str,
        payload: &StackPayload,
    ) -> Result<Stack> {
        let url = self.endpoint(&format!("projects/{environment_id}/stacks/{stack_id}"));
        debug!("PUT {url}");
        self.send(self.client.put(&url).json(payload), &payload.name)
            .await
    }

    async fn get_service(&self, service_id: &str) -> Result<Service> {
        self.get(&format!("services/{service_id}"), &[], service_id)
            .await
    }

    async fn create_service(
        &self,
        environment_id: &str,
        payload: &ServicePayload,
    ) -> Result<Service> {
        let url = self.endpoint(&format!("projects/{environment_id}/services"));
        debug!("POST {url}");
        self.send(
            self.client
                .post(&url)
                .query(&[("stackId", payload.stack_id.as_str())])
                .json(payload),
            &payload.name,
        )
        .await
    }
}

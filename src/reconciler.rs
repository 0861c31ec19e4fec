//! Reconcilers for stacks and services.
//!
//! Each run re-derives state from Rancher: resolve names, read the current
//! configuration, compare it with the desired payload, and create or update
//! only when needed. Any error stops the run immediately.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::ServiceTemplate;
use crate::error::Result;
use crate::planner::{ComparePolicy, ConfigMap};
use crate::rancher::{Lookup, RancherApi, ResourceKind, Resolver, StackPayload};

/// Exit code when nothing had to change.
pub const EXIT_UNCHANGED: u8 = 0;
/// Exit code when a run failed.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code when changes were applied.
pub const EXIT_CHANGED: u8 = 50;

/// What a run did to one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The resource was absent and has been created.
    Created,
    /// The resource differed and has been updated.
    Updated,
    /// The resource already matched.
    Unchanged,
    /// The resource differs but is never updated in place.
    Drifted,
}

impl Outcome {
    /// Returns true if this outcome changed the remote system.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Drifted => write!(f, "drifted"),
        }
    }
}

/// Result for a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReport {
    /// Kind of resource.
    pub kind: ResourceKind,
    /// Resource name.
    pub name: String,
    /// Resource ID, unknown for a dry-run creation.
    pub id: Option<String>,
    /// What happened.
    pub outcome: Outcome,
}

/// Result of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Environment name.
    pub environment: String,
    /// Stack name.
    pub stack: String,
    /// Whether mutating calls were skipped.
    pub dry_run: bool,
    /// Per-resource results, in processing order.
    pub resources: Vec<ResourceReport>,
}

impl ReconcileReport {
    fn new(environment: &str, stack: &str, dry_run: bool) -> Self {
        Self {
            environment: environment.to_string(),
            stack: stack.to_string(),
            dry_run,
            resources: Vec::new(),
        }
    }

    /// Returns true if any resource was created or updated.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.resources.iter().any(|r| r.outcome.is_change())
    }

    /// Number of resources with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.resources.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Process exit code for this report: 50 on change, 0 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.changed() {
            EXIT_CHANGED
        } else {
            EXIT_UNCHANGED
        }
    }

    fn push(&mut self, kind: ResourceKind, name: &str, id: Option<String>, outcome: Outcome) {
        self.resources.push(ResourceReport {
            kind,
            name: name.to_string(),
            id,
            outcome,
        });
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.dry_run { " (dry run)" } else { "" };
        writeln!(f, "Reconciliation of {}/{}{mode}:", self.environment, self.stack)?;
        for resource in &self.resources {
            writeln!(
                f,
                "  {} {}: {}",
                resource.kind, resource.name, resource.outcome
            )?;
        }
        Ok(())
    }
}

/// Ensures a stack exists with the desired configuration.
pub struct StackReconciler<'a, A: RancherApi + ?Sized> {
    /// Rancher API.
    api: &'a A,
    /// Comparison policy for existing stacks.
    policy: ComparePolicy,
    /// Skip mutating calls.
    dry_run: bool,
}

impl<'a, A: RancherApi + ?Sized> StackReconciler<'a, A> {
    /// Creates a new stack reconciler using the symmetric-strict policy.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self {
            api,
            policy: ComparePolicy::SymmetricStrict,
            dry_run: false,
        }
    }

    /// Sets the comparison policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ComparePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skips create and update calls.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Creates the stack if absent, updates it if it differs.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment does not exist or any API call
    /// fails or is rejected.
    pub async fn reconcile(&self, environment: &str, desired: &StackPayload) -> Result<ReconcileReport> {
        info!("Ensuring stack {environment}/{}", desired.name);
        let resolver = Resolver::new(self.api);
        let mut report = ReconcileReport::new(environment, &desired.name, self.dry_run);

        let environment_id = resolver.require(&Lookup::environment(environment)).await?;
        let existing = resolver
            .find(&Lookup::stack(&desired.name, &environment_id))
            .await?;

        let Some(stack_id) = existing else {
            let id = if self.dry_run {
                info!("Dry run: stack would be created");
                None
            } else {
                let id = self.api.create_stack(&environment_id, desired).await?.id;
                info!("Stack created");
                Some(id)
            };
            report.push(ResourceKind::Stack, &desired.name, id, Outcome::Created);
            return Ok(report);
        };

        let current = self.api.get_stack(&environment_id, &stack_id).await?;
        let outcome = if self
            .policy
            .is_equal(&current.comparable_fields(), &desired.to_map()?)
        {
            info!("Stack up to date");
            Outcome::Unchanged
        } else {
            if self.dry_run {
                info!("Dry run: stack would be updated");
            } else {
                self.api
                    .update_stack(&environment_id, &stack_id, desired)
                    .await?;
                info!("Stack updated");
            }
            Outcome::Updated
        };

        report.push(ResourceKind::Stack, &desired.name, Some(stack_id), outcome);
        Ok(report)
    }
}

/// Ensures services exist in a stack.
///
/// Services are create-or-skip: an existing service is never modified,
/// whatever its configuration.
pub struct ServiceReconciler<'a, A: RancherApi + ?Sized> {
    /// Rancher API.
    api: &'a A,
    /// Template for created services.
    template: &'a ServiceTemplate,
    /// Skip mutating calls.
    dry_run: bool,
    /// Compare existing launch configs and report drift.
    check_drift: bool,
}

impl<'a, A: RancherApi + ?Sized> ServiceReconciler<'a, A> {
    /// Creates a new service reconciler.
    #[must_use]
    pub const fn new(api: &'a A, template: &'a ServiceTemplate) -> Self {
        Self {
            api,
            template,
            dry_run: false,
            check_drift: false,
        }
    }

    /// Skips create calls.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables drift reporting for existing services.
    #[must_use]
    pub const fn with_drift_check(mut self, check_drift: bool) -> Self {
        self.check_drift = check_drift;
        self
    }

    /// Creates every named service that is absent from the stack.
    ///
    /// A name given more than once is handled once.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment or stack does not exist, or any
    /// API call fails or is rejected. Services processed before the failure
    /// stay as they are.
    pub async fn reconcile(
        &self,
        environment: &str,
        stack: &str,
        services: &[String],
    ) -> Result<ReconcileReport> {
        let resolver = Resolver::new(self.api);
        let mut report = ReconcileReport::new(environment, stack, self.dry_run);

        let environment_id = resolver.require(&Lookup::environment(environment)).await?;
        let stack_id = resolver
            .require(&Lookup::stack(stack, &environment_id))
            .await?;

        let mut seen = HashSet::new();
        for name in services {
            if !seen.insert(name.as_str()) {
                debug!("Service '{name}' listed more than once, skipping repeat");
                continue;
            }
            info!("Ensuring service {environment}/{stack}/{name}");
            let lookup = Lookup::service(name, &stack_id, &environment_id);

            let (id, outcome) = match resolver.find(&lookup).await? {
                Some(service_id) => {
                    let outcome = self.existing_outcome(name, &service_id).await?;
                    (Some(service_id), outcome)
                }
                None => {
                    let payload = self.template.payload(name, &stack_id);
                    let id = if self.dry_run {
                        info!("Dry run: service would be created");
                        None
                    } else {
                        let id = self.api.create_service(&environment_id, &payload).await?.id;
                        info!("Service created");
                        Some(id)
                    };
                    (id, Outcome::Created)
                }
            };

            report.push(ResourceKind::Service, name, id, outcome);
        }

        Ok(report)
    }

    async fn existing_outcome(&self, name: &str, service_id: &str) -> Result<Outcome> {
        if !self.check_drift {
            info!("Service already created");
            return Ok(Outcome::Unchanged);
        }

        let current = self.api.get_service(service_id).await?;
        let current_config: ConfigMap = current.launch_config.unwrap_or_default();
        let desired_config = self.template.launch_config().to_map()?;

        if ComparePolicy::AsymmetricPermissive.is_equal(&current_config, &desired_config) {
            info!("Service already created");
            Ok(Outcome::Unchanged)
        } else {
            warn!("Service '{name}' differs from the desired launch config; services are not updated in place");
            Ok(Outcome::Drifted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, RancherEnsureError, ReconcileError};
    use crate::rancher::{ResourceRef, Service, ServicePayload, Stack};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Remote {
        environments: Vec<ResourceRef>,
        /// (environment id, stack)
        stacks: Vec<(String, Stack)>,
        /// (environment id, service)
        services: Vec<(String, Service)>,
        calls: Vec<String>,
    }

    /// In-memory Rancher that stores what it is sent.
    #[derive(Default)]
    struct FakeRancher {
        remote: Mutex<Remote>,
        reject_writes: bool,
    }

    impl FakeRancher {
        fn with_environment(id: &str, name: &str) -> Self {
            let fake = Self::default();
            fake.remote.lock().unwrap().environments.push(ResourceRef {
                id: id.to_string(),
                name: Some(name.to_string()),
            });
            fake
        }

        fn seed_stack(&self, environment_id: &str, stack: Stack) {
            self.remote
                .lock()
                .unwrap()
                .stacks
                .push((environment_id.to_string(), stack));
        }

        fn seed_service(&self, environment_id: &str, service: Service) {
            self.remote
                .lock()
                .unwrap()
                .services
                .push((environment_id.to_string(), service));
        }

        fn calls(&self, prefix: &str) -> usize {
            self.remote
                .lock()
                .unwrap()
                .calls
                .iter()
                .filter(|c| c.starts_with(prefix))
                .count()
        }

        fn rejected(entity: &str) -> RancherEnsureError {
            ApiError::Rejected {
                entity: entity.to_string(),
                body: String::from(r#"{"baseType":"error","code":"InvalidState"}"#),
            }
            .into()
        }
    }

    fn stored_stack(id: &str, payload: &StackPayload) -> Stack {
        Stack {
            id: id.to_string(),
            name: Some(payload.name.clone()),
            description: Some(payload.description.clone()),
            system: Some(payload.system),
            docker_compose: Some(payload.docker_compose.clone()),
            rancher_compose: Some(payload.rancher_compose.clone()),
        }
    }

    #[async_trait]
    impl RancherApi for FakeRancher {
        async fn list(&self, lookup: &Lookup) -> Result<Vec<ResourceRef>> {
            let mut remote = self.remote.lock().unwrap();
            remote.calls.push(format!("list {}", lookup.collection()));

            let found = match lookup {
                Lookup::Environment { name } => remote
                    .environments
                    .iter()
                    .filter(|e| e.name.as_deref() == Some(name.as_str()))
                    .cloned()
                    .collect(),
                Lookup::Stack {
                    name,
                    environment_id,
                } => remote
                    .stacks
                    .iter()
                    .filter(|(env, s)| {
                        env == environment_id && s.name.as_deref() == Some(name.as_str())
                    })
                    .map(|(_, s)| ResourceRef {
                        id: s.id.clone(),
                        name: s.name.clone(),
                    })
                    .collect(),
                Lookup::Service {
                    name,
                    stack_id,
                    environment_id,
                } => remote
                    .services
                    .iter()
                    .filter(|(env, s)| {
                        env == environment_id
                            && s.stack_id.as_deref() == Some(stack_id.as_str())
                            && s.name.as_deref() == Some(name.as_str())
                    })
                    .map(|(_, s)| ResourceRef {
                        id: s.id.clone(),
                        name: s.name.clone(),
                    })
                    .collect(),
            };
            Ok(found)
        }

        async fn get_stack(&self, environment_id: &str, stack_id: &str) -> Result<Stack> {
            let mut remote = self.remote.lock().unwrap();
            remote.calls.push(format!("get stack {stack_id}"));
            remote
                .stacks
                .iter()
                .find(|(env, s)| env == environment_id && s.id == stack_id)
                .map(|(_, s)| s.clone())
                .ok_or_else(|| ApiError::api_error(404, "stack not found").into())
        }

        async fn create_stack(&self, environment_id: &str, payload: &StackPayload) -> Result<Stack> {
            if self.reject_writes {
                return Err(Self::rejected(&payload.name));
            }
            let mut remote = self.remote.lock().unwrap();
            remote.calls.push(format!("create stack {}", payload.name));
            let stack = stored_stack(&format!("1st{}", remote.stacks.len() + 1), payload);
            remote.stacks.push((environment_id.to_string(), stack.clone()));
            Ok(stack)
        }

        async fn update_stack(
            &self,
            environment_id: &str,
            stack_id: &str,
            payload: &StackPayload,
        ) -> Result<Stack> {
            if self.reject_writes {
                return Err(Self::rejected(&payload.name));
            }
            let mut remote = self.remote.lock().unwrap();
            remote.calls.push(format!("update stack {stack_id}"));
            let updated = stored_stack(stack_id, payload);
            for (env, stack) in &mut remote.stacks {
                if env.as_str() == environment_id && stack.id == stack_id {
                    *stack = updated.clone();
                }
            }
            Ok(updated)
        }

        async fn get_service(&self, service_id: &str) -> Result<Service> {
            let mut remote = self.remote.lock().unwrap();
            remote.calls.push(format!("get service {service_id}"));
            remote
                .services
                .iter()
                .find(|(_, s)| s.id == service_id)
                .map(|(_, s)| s.clone())
                .ok_or_else(|| ApiError::api_error(404, "service not found").into())
        }

        async fn create_service(
            &self,
            environment_id: &str,
            payload: &ServicePayload,
        ) -> Result<Service> {
            if self.reject_writes {
                return Err(Self::rejected(&payload.name));
            }
            let mut remote = self.remote.lock().unwrap();
            remote.calls.push(format!("create service {}", payload.name));
            let service = Service {
                id: format!("1s{}", remote.services.len() + 1),
                name: Some(payload.name.clone()),
                stack_id: Some(payload.stack_id.clone()),
                launch_config: payload.launch_config.to_map().ok(),
            };
            remote.services.push((environment_id.to_string(), service.clone()));
            Ok(service)
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn test_stack_created_then_unchanged() {
        let api = FakeRancher::with_environment("1a5", "Default");
        let desired = StackPayload::new("Activities", "Activities");
        let reconciler = StackReconciler::new(&api);

        let first = reconciler.reconcile("Default", &desired).await.unwrap();
        assert_eq!(first.resources[0].outcome, Outcome::Created);
        assert_eq!(first.resources[0].id.as_deref(), Some("1st1"));
        assert_eq!(first.exit_code(), EXIT_CHANGED);

        let second = reconciler.reconcile("Default", &desired).await.unwrap();
        assert_eq!(second.resources[0].outcome, Outcome::Unchanged);
        assert_eq!(second.exit_code(), EXIT_UNCHANGED);

        assert_eq!(api.calls("create stack"), 1);
        assert_eq!(api.calls("update stack"), 0);
    }

    #[tokio::test]
    async fn test_stack_description_change_updates_in_place() {
        let api = FakeRancher::with_environment("1a5", "Default");
        let reconciler = StackReconciler::new(&api);
        reconciler
            .reconcile("Default", &StackPayload::new("Activities", "Activities"))
            .await
            .unwrap();

        let desired = StackPayload::new("Activities", "Outdoor activities");
        let report = reconciler.reconcile("Default", &desired).await.unwrap();

        assert_eq!(report.resources[0].outcome, Outcome::Updated);
        assert_eq!(report.resources[0].id.as_deref(), Some("1st1"));
        assert_eq!(api.calls("update stack 1st1"), 1);

        let again = reconciler.reconcile("Default", &desired).await.unwrap();
        assert_eq!(again.resources[0].outcome, Outcome::Unchanged);
    }

    #[tokio::test]
    async fn test_strict_policy_updates_when_server_returns_nulls() {
        let api = FakeRancher::with_environment("1a5", "Default");
        api.seed_stack(
            "1a5",
            Stack {
                id: String::from("1st3"),
                name: Some(String::from("Activities")),
                description: Some(String::from("Activities")),
                system: Some(false),
                docker_compose: None,
                rancher_compose: None,
            },
        );
        let desired = StackPayload::new("Activities", "Activities");

        let strict = StackReconciler::new(&api).reconcile("Default", &desired).await.unwrap();
        assert_eq!(strict.resources[0].outcome, Outcome::Updated);
    }

    #[tokio::test]
    async fn test_permissive_policy_skips_matching_stack() {
        let api = FakeRancher::with_environment("1a5", "Default");
        let desired = StackPayload::new("Activities", "Activities");
        api.seed_stack("1a5", stored_stack("1st3", &desired));

        let report = StackReconciler::new(&api)
            .with_policy(ComparePolicy::AsymmetricPermissive)
            .reconcile("Default", &desired)
            .await
            .unwrap();

        assert_eq!(report.resources[0].outcome, Outcome::Unchanged);
        assert_eq!(api.calls("update stack"), 0);
    }

    #[tokio::test]
    async fn test_missing_environment_is_fatal() {
        let api = FakeRancher::with_environment("1a5", "Default");

        let err = StackReconciler::new(&api)
            .reconcile("Staging", &StackPayload::new("Activities", "Activities"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RancherEnsureError::Reconcile(ReconcileError::NotFound {
                kind: ResourceKind::Environment,
                ..
            })
        ));
        assert_eq!(api.calls("list stacks"), 0);
    }

    #[tokio::test]
    async fn test_rejected_create_is_fatal() {
        let api = FakeRancher {
            reject_writes: true,
            ..FakeRancher::with_environment("1a5", "Default")
        };

        let err = StackReconciler::new(&api)
            .reconcile("Default", &StackPayload::new("Activities", "Activities"))
            .await
            .unwrap_err();

        assert!(matches!(err, RancherEnsureError::Api(ApiError::Rejected { .. })));
    }

    #[tokio::test]
    async fn test_stack_dry_run_sends_nothing() {
        let api = FakeRancher::with_environment("1a5", "Default");

        let report = StackReconciler::new(&api)
            .with_dry_run(true)
            .reconcile("Default", &StackPayload::new("Activities", "Activities"))
            .await
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.resources[0].outcome, Outcome::Created);
        assert_eq!(report.resources[0].id, None);
        assert_eq!(report.exit_code(), EXIT_CHANGED);
        assert_eq!(api.calls("create"), 0);
    }

    #[tokio::test]
    async fn test_services_created_once() {
        let api = FakeRancher::with_environment("1a5", "Default");
        let desired = StackPayload::new("Activities", "Activities");
        api.seed_stack("1a5", stored_stack("1st5", &desired));
        let template = ServiceTemplate::default();
        let reconciler = ServiceReconciler::new(&api, &template);

        let first = reconciler
            .reconcile("Default", "Activities", &names(&["sports", "music"]))
            .await
            .unwrap();
        assert_eq!(first.count(Outcome::Created), 2);
        assert_eq!(first.exit_code(), EXIT_CHANGED);

        let second = reconciler
            .reconcile("Default", "Activities", &names(&["sports", "music"]))
            .await
            .unwrap();
        assert_eq!(second.count(Outcome::Unchanged), 2);
        assert_eq!(second.exit_code(), EXIT_UNCHANGED);

        assert_eq!(api.calls("create service"), 2);
    }

    #[tokio::test]
    async fn test_repeated_service_name_handled_once() {
        let api = FakeRancher::with_environment("1a5", "Default");
        api.seed_stack("1a5", stored_stack("1st5", &StackPayload::new("Activities", "Activities")));
        let template = ServiceTemplate::default();
        let services = names(&["sports", "music", "sports"]);

        let preview = ServiceReconciler::new(&api, &template)
            .with_dry_run(true)
            .reconcile("Default", "Activities", &services)
            .await
            .unwrap();
        assert_eq!(preview.resources.len(), 2);
        assert_eq!(preview.count(Outcome::Created), 2);

        let applied = ServiceReconciler::new(&api, &template)
            .reconcile("Default", "Activities", &services)
            .await
            .unwrap();
        let applied_names: Vec<&str> = applied.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(applied_names, vec!["sports", "music"]);
        assert_eq!(applied.count(Outcome::Created), 2);
        assert_eq!(api.calls("create service"), 2);
    }

    #[tokio::test]
    async fn test_one_new_service_among_existing_reports_change() {
        let api = FakeRancher::with_environment("1a5", "Default");
        api.seed_stack("1a5", stored_stack("1st5", &StackPayload::new("Activities", "Activities")));
        api.seed_service(
            "1a5",
            Service {
                id: String::from("1s9"),
                name: Some(String::from("sports")),
                stack_id: Some(String::from("1st5")),
                launch_config: None,
            },
        );
        let template = ServiceTemplate::default();

        let report = ServiceReconciler::new(&api, &template)
            .reconcile("Default", "Activities", &names(&["music", "sports"]))
            .await
            .unwrap();

        assert_eq!(report.resources[0].outcome, Outcome::Created);
        assert_eq!(report.resources[1].outcome, Outcome::Unchanged);
        assert_eq!(report.resources[1].id.as_deref(), Some("1s9"));
        assert_eq!(report.exit_code(), EXIT_CHANGED);
    }

    #[tokio::test]
    async fn test_differing_service_is_never_updated() {
        let api = FakeRancher::with_environment("1a5", "Default");
        api.seed_stack("1a5", stored_stack("1st5", &StackPayload::new("Activities", "Activities")));
        let old = ServiceTemplate {
            image: String::from("nginx:1.24"),
            ..ServiceTemplate::default()
        };
        api.seed_service(
            "1a5",
            Service {
                id: String::from("1s9"),
                name: Some(String::from("sports")),
                stack_id: Some(String::from("1st5")),
                launch_config: old.launch_config().to_map().ok(),
            },
        );
        let template = ServiceTemplate {
            image: String::from("nginx:1.25"),
            ..ServiceTemplate::default()
        };

        let plain = ServiceReconciler::new(&api, &template)
            .reconcile("Default", "Activities", &names(&["sports"]))
            .await
            .unwrap();
        assert_eq!(plain.resources[0].outcome, Outcome::Unchanged);
        assert_eq!(api.calls("get service"), 0);

        let checked = ServiceReconciler::new(&api, &template)
            .with_drift_check(true)
            .reconcile("Default", "Activities", &names(&["sports"]))
            .await
            .unwrap();
        assert_eq!(checked.resources[0].outcome, Outcome::Drifted);
        assert_eq!(checked.exit_code(), EXIT_UNCHANGED);
        assert_eq!(api.calls("create service"), 0);
    }

    #[tokio::test]
    async fn test_matching_service_with_server_fields_is_not_drifted() {
        let api = FakeRancher::with_environment("1a5", "Default");
        api.seed_stack("1a5", stored_stack("1st5", &StackPayload::new("Activities", "Activities")));
        let template = ServiceTemplate::default();
        let mut current = template.launch_config().to_map().unwrap();
        current.insert(String::from("createIndex"), Value::from(4));
        api.seed_service(
            "1a5",
            Service {
                id: String::from("1s9"),
                name: Some(String::from("sports")),
                stack_id: Some(String::from("1st5")),
                launch_config: Some(current),
            },
        );

        let report = ServiceReconciler::new(&api, &template)
            .with_drift_check(true)
            .reconcile("Default", "Activities", &names(&["sports"]))
            .await
            .unwrap();

        assert_eq!(report.resources[0].outcome, Outcome::Unchanged);
    }

    #[tokio::test]
    async fn test_missing_stack_is_fatal_for_services() {
        let api = FakeRancher::with_environment("1a5", "Default");
        let template = ServiceTemplate::default();

        let err = ServiceReconciler::new(&api, &template)
            .reconcile("Default", "Activities", &names(&["sports"]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Stack 'Activities' does not exist.");
        assert_eq!(api.calls("create"), 0);
    }

    #[test]
    fn test_report_display() {
        let mut report = ReconcileReport::new("Default", "Activities", false);
        report.push(ResourceKind::Stack, "Activities", Some(String::from("1st5")), Outcome::Updated);

        let text = report.to_string();
        assert!(text.contains("Default/Activities"));
        assert!(text.contains("Stack Activities: updated"));
    }
}

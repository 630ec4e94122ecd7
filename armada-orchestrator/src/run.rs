//! Deployment run loop
//!
//! Fan-out of one revision to every deployment group of a target,
//! sequential create-then-poll per group, and failure aggregation.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use armada_core::backend::{BackendError, DeployBackend};
use armada_core::domain::deployment::{Deployment, DeploymentStatus};
use armada_core::domain::run::{FailureReport, RunContext};
use armada_core::domain::target::{DeploymentTarget, Revision};
use armada_core::notify::Notifier;

use crate::clock::{Sleeper, TokioSleeper};
use crate::config::OrchestratorConfig;
use crate::poll::poll_until_terminal;

/// Fatal run errors
///
/// Any backend error aborts the run: groups not yet started are never
/// deployed, and no outcome notification is sent. Each variant names the
/// phase the run died in.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to list deployment groups for {application}: {source}")]
    ListGroups {
        application: String,
        #[source]
        source: BackendError,
    },

    #[error("failed to create deployment for group {group}: {source}")]
    CreateDeployment {
        group: String,
        #[source]
        source: BackendError,
    },

    #[error("status poll failed for deployment {deployment_id}: {source}")]
    PollStatus {
        deployment_id: String,
        #[source]
        source: BackendError,
    },
}

/// Final outcome of a completed (non-aborted) run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of deployment groups processed
    pub groups: usize,
    /// Deployments that terminated `Failed`, in processing order
    pub failures: FailureReport,
}

impl RunReport {
    /// Whether every group (possibly zero) succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives the fan-out/poll/aggregate protocol
///
/// Groups are processed sequentially, not concurrently: a creation-time
/// backend outage then stops the run before any later group is issued a
/// deployment, and one fleet's bad rollout never prevents observing the
/// others.
pub struct Orchestrator {
    backend: Arc<dyn DeployBackend>,
    notifier: Arc<dyn Notifier>,
    sleeper: Arc<dyn Sleeper>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Creates an orchestrator with the production (tokio) sleeper
    pub fn new(
        backend: Arc<dyn DeployBackend>,
        notifier: Arc<dyn Notifier>,
        config: OrchestratorConfig,
    ) -> Self {
        Self::with_sleeper(backend, notifier, Arc::new(TokioSleeper), config)
    }

    /// Creates an orchestrator with an injected sleep capability
    pub fn with_sleeper(
        backend: Arc<dyn DeployBackend>,
        notifier: Arc<dyn Notifier>,
        sleeper: Arc<dyn Sleeper>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            backend,
            notifier,
            sleeper,
            config,
        }
    }

    /// Runs one deployment of `revision` across every group of the target
    ///
    /// Returns the aggregate report when every group reached a terminal
    /// state; returns a [`RunError`] when a backend call failed, in which
    /// case remaining groups were never started.
    pub async fn run(
        &self,
        ctx: &RunContext,
        revision: &Revision,
    ) -> Result<RunReport, RunError> {
        let target = DeploymentTarget::new(&ctx.application);

        info!("resolving deployment groups for {}", target.application);
        let groups = self
            .backend
            .list_deployment_groups(&target)
            .await
            .map_err(|source| RunError::ListGroups {
                application: target.application.clone(),
                source,
            })?;

        if groups.is_empty() {
            info!("{} has no deployment groups, nothing to deploy", target.application);
            return self.finish(ctx, FailureReport::new(), 0).await;
        }

        info!(
            "deploying {}@{} to {} group(s)",
            revision.repository,
            revision.commit_id,
            groups.len()
        );

        if self.config.policy.notify_on_start {
            if let Err(e) = self.notifier.notify_started(ctx).await {
                warn!("start notification failed: {}", e);
            }
            if let Err(e) = self.notifier.record_deployment_start(ctx).await {
                warn!("deployment marker failed: {}", e);
            }
        }

        let mut failures = FailureReport::new();

        for group in &groups {
            let deployment = self
                .backend
                .create_deployment(&target, group, revision)
                .await
                .map_err(|source| RunError::CreateDeployment {
                    group: group.name.clone(),
                    source,
                })?;

            info!(
                "created deployment {} for group {}",
                deployment.deployment_id, group.name
            );

            let status = if deployment.status.is_terminal() {
                deployment.status.clone()
            } else {
                poll_until_terminal(
                    self.backend.as_ref(),
                    &deployment.deployment_id,
                    self.sleeper.as_ref(),
                    self.config.poll_interval,
                )
                .await
                .map_err(|source| RunError::PollStatus {
                    deployment_id: deployment.deployment_id.clone(),
                    source,
                })?
            };

            if status == DeploymentStatus::Failed {
                warn!(
                    "deployment {} for group {} failed",
                    deployment.deployment_id, group.name
                );
                failures.record(
                    group.clone(),
                    Deployment::new(deployment.deployment_id, status),
                );
            } else {
                info!("group {} finished with status {}", group.name, status);
            }
        }

        let total = groups.len();
        self.finish(ctx, failures, total).await
    }

    /// Delivers the gated outcome notification and builds the report
    async fn finish(
        &self,
        ctx: &RunContext,
        failures: FailureReport,
        groups: usize,
    ) -> Result<RunReport, RunError> {
        let should_notify = if failures.is_empty() {
            self.config.policy.notify_on_success
        } else {
            self.config.policy.notify_on_failure
        };

        if should_notify {
            if let Err(e) = self.notifier.notify_outcome(ctx, &failures).await {
                warn!("outcome notification failed: {}", e);
            }
        }

        Ok(RunReport { groups, failures })
    }
}

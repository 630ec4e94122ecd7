//! Deterministic fakes for orchestrator tests
//!
//! `ScriptedBackend` hands out pre-programmed status sequences and records
//! every call; `RecordingNotifier`/`FailingNotifier` observe or sabotage the
//! notification path; `RecordingSleeper` counts waits instead of waiting.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use armada_core::backend::{BackendError, DeployBackend};
use armada_core::domain::deployment::{Deployment, DeploymentStatus};
use armada_core::domain::run::{FailureReport, RunContext};
use armada_core::domain::target::{DeploymentGroup, DeploymentTarget, Revision};
use armada_core::notify::{Notifier, NotifyError};

use crate::clock::Sleeper;

/// Fake backend with scripted per-deployment status sequences
///
/// `create_deployment` assigns the deterministic id `d-<group>` so tests can
/// script statuses before the run starts.
pub(crate) struct ScriptedBackend {
    groups: Vec<DeploymentGroup>,
    list_error: Mutex<Option<BackendError>>,
    create_errors: Mutex<HashMap<String, BackendError>>,
    status_scripts: Mutex<HashMap<String, VecDeque<Result<DeploymentStatus, BackendError>>>>,
    create_calls: Mutex<Vec<String>>,
    status_polls: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn new(groups: &[&str]) -> Self {
        Self {
            groups: groups.iter().map(|g| DeploymentGroup::new(*g)).collect(),
            list_error: Mutex::new(None),
            create_errors: Mutex::new(HashMap::new()),
            status_scripts: Mutex::new(HashMap::new()),
            create_calls: Mutex::new(Vec::new()),
            status_polls: Mutex::new(0),
        }
    }

    /// Makes the group listing fail once with the given error
    pub fn fail_listing(self, error: BackendError) -> Self {
        *self.list_error.lock().unwrap() = Some(error);
        self
    }

    /// Makes `create_deployment` fail for one group
    pub fn fail_create_for(&self, group: &str, error: BackendError) {
        self.create_errors
            .lock()
            .unwrap()
            .insert(group.to_string(), error);
    }

    /// Scripts the status sequence returned for a deployment id
    pub fn script(
        &self,
        deployment_id: &str,
        statuses: Vec<Result<DeploymentStatus, BackendError>>,
    ) {
        self.status_scripts
            .lock()
            .unwrap()
            .insert(deployment_id.to_string(), statuses.into());
    }

    /// Group names `create_deployment` was called with, in order
    pub fn create_calls(&self) -> Vec<String> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Total number of `deployment_status` calls across all deployments
    pub fn status_poll_count(&self) -> usize {
        *self.status_polls.lock().unwrap()
    }
}

#[async_trait]
impl DeployBackend for ScriptedBackend {
    async fn list_deployment_groups(
        &self,
        _target: &DeploymentTarget,
    ) -> Result<Vec<DeploymentGroup>, BackendError> {
        if let Some(error) = self.list_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.groups.clone())
    }

    async fn create_deployment(
        &self,
        _target: &DeploymentTarget,
        group: &DeploymentGroup,
        _revision: &Revision,
    ) -> Result<Deployment, BackendError> {
        self.create_calls.lock().unwrap().push(group.name.clone());

        if let Some(error) = self.create_errors.lock().unwrap().remove(&group.name) {
            return Err(error);
        }

        Ok(Deployment::new(
            format!("d-{}", group.name),
            DeploymentStatus::Created,
        ))
    }

    async fn deployment_status(
        &self,
        deployment_id: &str,
    ) -> Result<DeploymentStatus, BackendError> {
        *self.status_polls.lock().unwrap() += 1;

        self.status_scripts
            .lock()
            .unwrap()
            .get_mut(deployment_id)
            .and_then(|script| script.pop_front())
            .unwrap_or_else(|| {
                panic!("no scripted status left for deployment {}", deployment_id)
            })
    }
}

/// Notification events observed by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NotifyEvent {
    Started,
    Marker,
    Outcome { failed_groups: Vec<String> },
}

/// Notifier that records every delivery instead of sending it
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    events: Mutex<Vec<NotifyEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_started(&self, _ctx: &RunContext) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(NotifyEvent::Started);
        Ok(())
    }

    async fn notify_outcome(
        &self,
        _ctx: &RunContext,
        report: &FailureReport,
    ) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(NotifyEvent::Outcome {
            failed_groups: report.iter().map(|f| f.group.name.clone()).collect(),
        });
        Ok(())
    }

    async fn record_deployment_start(&self, _ctx: &RunContext) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(NotifyEvent::Marker);
        Ok(())
    }
}

/// Notifier whose every delivery fails
#[derive(Default)]
pub(crate) struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify_started(&self, _ctx: &RunContext) -> Result<(), NotifyError> {
        Err(NotifyError::endpoint(503, "webhook down"))
    }

    async fn notify_outcome(
        &self,
        _ctx: &RunContext,
        _report: &FailureReport,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::endpoint(503, "webhook down"))
    }

    async fn record_deployment_start(&self, _ctx: &RunContext) -> Result<(), NotifyError> {
        Err(NotifyError::transport("dns failure"))
    }
}

/// Sleeper that records requested waits and returns immediately
#[derive(Default)]
pub(crate) struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// A run context with placeholder identity values
pub(crate) fn test_context(application: &str) -> RunContext {
    RunContext {
        application: application.to_string(),
        repository: "acme/web-server".to_string(),
        commit_id: "abc123".to_string(),
        triggered_by: "ansu".to_string(),
        ref_name: "v4.02".to_string(),
        run_id: "1234567890".to_string(),
    }
}

//! Run identity and failure aggregation

use serde::{Deserialize, Serialize};

use crate::domain::deployment::Deployment;
use crate::domain::target::DeploymentGroup;

/// Invocation identity metadata
///
/// Constructed once from external input (CI workflow variables), read by the
/// orchestrator and notifier, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunContext {
    /// Target application name
    pub application: String,
    /// Source repository (e.g. "acme/web-server")
    pub repository: String,
    /// Commit hash being deployed
    pub commit_id: String,
    /// User who triggered the workflow
    pub triggered_by: String,
    /// Branch or tag name that triggered the run
    pub ref_name: String,
    /// Unique workflow run identifier
    pub run_id: String,
}

/// One deployment that reached the `Failed` terminal state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedDeployment {
    pub group: DeploymentGroup,
    pub deployment: Deployment,
}

/// Ordered, append-only record of failed deployments for one run
///
/// Its length always equals the count of deployments that terminated
/// `Failed`, and is at most the number of deployment groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureReport {
    failures: Vec<FailedDeployment>,
}

impl FailureReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failed deployment
    pub fn record(&mut self, group: DeploymentGroup, deployment: Deployment) {
        self.failures.push(FailedDeployment { group, deployment });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FailedDeployment> {
        self.failures.iter()
    }
}

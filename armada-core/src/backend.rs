//! Deployment backend port
//!
//! Trait seam between the orchestrator and the cloud deployment service,
//! plus the error taxonomy backend implementations map into.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::deployment::{Deployment, DeploymentStatus};
use crate::domain::target::{DeploymentGroup, DeploymentTarget, Revision};

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors surfaced by the deployment backend
///
/// Every variant is fatal to the run when it reaches the orchestrator;
/// the taxonomy exists so callers and logs can tell an unreachable service
/// apart from a bad request.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend could not be reached (connect/dispatch/timeout failure)
    #[error("deployment backend unavailable: {0}")]
    Unavailable(String),

    /// The application or deployment does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The supplied revision was rejected by the backend
    #[error("invalid revision: {0}")]
    InvalidRevision(String),

    /// The backend throttled the request
    #[error("request throttled: {0}")]
    Throttled(String),

    /// Any other service error, preserved with its error code
    #[error("backend error ({code}): {message}")]
    Api { code: String, message: String },
}

impl BackendError {
    /// Create an API error from an error code and message
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error is a throttling error
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled(_))
    }
}

/// Typed façade over the cloud deployment service
///
/// Three operations: discover groups, create a deployment, read its status.
/// `create_deployment` has a backend side effect and is not idempotent;
/// callers must invoke it exactly once per group per run. `deployment_status`
/// is read-only and safe to poll arbitrarily often.
#[async_trait]
pub trait DeployBackend: Send + Sync {
    /// Lists every deployment group configured for the target
    ///
    /// A target with zero groups returns an empty vec, not an error.
    async fn list_deployment_groups(
        &self,
        target: &DeploymentTarget,
    ) -> Result<Vec<DeploymentGroup>>;

    /// Creates one deployment of `revision` to `group`
    ///
    /// Returns the deployment with its backend-assigned id. Not idempotent:
    /// calling twice creates two independent deployments.
    async fn create_deployment(
        &self,
        target: &DeploymentTarget,
        group: &DeploymentGroup,
        revision: &Revision,
    ) -> Result<Deployment>;

    /// Fetches the current status of a deployment
    async fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatus>;
}

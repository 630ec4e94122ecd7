//! Terminal-status polling
//!
//! An explicit poll function taking the backend status-fetch capability and
//! a sleep capability, so deterministic tests can script status sequences
//! against a fake clock.

use std::time::Duration;

use tracing::debug;

use armada_core::backend::{BackendError, DeployBackend};
use armada_core::domain::deployment::DeploymentStatus;

/// Polls a deployment until it reaches a terminal status
///
/// Waits `interval` between status checks. There is no retry cap or
/// timeout: polling continues until `Succeeded` or `Failed` is observed, or
/// the status call itself errors (which propagates to the caller).
pub async fn poll_until_terminal(
    backend: &dyn DeployBackend,
    deployment_id: &str,
    sleeper: &dyn crate::clock::Sleeper,
    interval: Duration,
) -> Result<DeploymentStatus, BackendError> {
    loop {
        sleeper.sleep(interval).await;

        let status = backend.deployment_status(deployment_id).await?;

        if status.is_terminal() {
            return Ok(status);
        }

        debug!("deployment {} still pending ({})", deployment_id, status);
    }
}

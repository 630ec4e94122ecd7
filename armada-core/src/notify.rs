//! Notification port
//!
//! Trait seam for outbound alerts. Delivery is never load-bearing: the
//! orchestrator logs and swallows every error from this trait, so a dead
//! webhook can never change a run's outcome.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::run::{FailureReport, RunContext};

/// Result type alias for notifier operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors that can occur while delivering a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed before a response arrived
    #[error("notification request failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status
    #[error("notification endpoint returned status {status}: {message}")]
    Endpoint { status: u16, message: String },
}

impl NotifyError {
    /// Create a transport error from any displayable cause
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Create an endpoint error from status code and message
    pub fn endpoint(status: u16, message: impl Into<String>) -> Self {
        Self::Endpoint {
            status,
            message: message.into(),
        }
    }
}

/// Outbound alert delivery
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a "deployment triggered" chat message
    async fn notify_started(&self, ctx: &RunContext) -> Result<()>;

    /// Sends the final outcome
    ///
    /// A non-empty report produces a failure alert enumerating every failed
    /// group with a deep link to its console view; an empty report produces
    /// a success alert.
    async fn notify_outcome(&self, ctx: &RunContext, report: &FailureReport) -> Result<()>;

    /// Pushes a deployment marker to the APM/monitoring system
    ///
    /// Lets metric dashboards annotate the deployment event. Best-effort.
    async fn record_deployment_start(&self, ctx: &RunContext) -> Result<()>;
}

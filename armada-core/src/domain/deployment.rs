//! Deployment domain types

use serde::{Deserialize, Serialize};

/// One attempt to apply a revision to one deployment group
///
/// The id is an opaque handle assigned by the backend at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub deployment_id: String,
    pub status: DeploymentStatus,
}

impl Deployment {
    pub fn new(deployment_id: impl Into<String>, status: DeploymentStatus) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            status,
        }
    }
}

/// Deployment lifecycle status
///
/// Only `Succeeded` and `Failed` are terminal. The backend may emit
/// intermediate statuses this enum does not name; those parse into
/// `Other` and are treated as still pending, never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    Created,
    Queued,
    InProgress,
    Succeeded,
    Failed,
    Other(String),
}

impl DeploymentStatus {
    /// Parses a backend status string
    ///
    /// Unrecognized values are preserved verbatim in `Other` so new
    /// intermediate statuses keep polling instead of failing the run.
    pub fn from_backend_str(s: &str) -> Self {
        match s {
            "Created" => Self::Created,
            "Queued" => Self::Queued,
            "InProgress" => Self::InProgress,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether no further transition can occur from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::Queued => "Queued",
            Self::InProgress => "InProgress",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

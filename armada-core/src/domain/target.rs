//! Deployment target domain types

use serde::{Deserialize, Serialize};

/// An application registered with the deployment backend
///
/// Identifies what is being deployed for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTarget {
    pub application: String,
}

impl DeploymentTarget {
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
        }
    }
}

/// A named fleet/environment subdivision of a target
///
/// Groups are discovered from the backend, never created by this system.
/// One target owns zero or more groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentGroup {
    pub name: String,
}

impl DeploymentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The artifact reference being deployed
///
/// A GitHub-style source location: repository plus commit hash. Supplied once
/// per run and shared by every group in that run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub repository: String,
    pub commit_id: String,
}

impl Revision {
    pub fn new(repository: impl Into<String>, commit_id: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            commit_id: commit_id.into(),
        }
    }
}

//! AWS CodeDeploy backend
//!
//! Implements the [`DeployBackend`] port against the CodeDeploy API.
//! Service errors are classified into the [`BackendError`] taxonomy by
//! their error code so the orchestrator never sees SDK types.

use async_trait::async_trait;
use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_codedeploy::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_codedeploy::types::{GitHubLocation, RevisionLocation, RevisionLocationType};
use tracing::debug;

use armada_core::backend::{BackendError, DeployBackend, Result};
use armada_core::domain::deployment::{Deployment, DeploymentStatus};
use armada_core::domain::target::{DeploymentGroup, DeploymentTarget, Revision};

/// CodeDeploy implementation of the deployment backend
#[derive(Debug, Clone)]
pub struct CodeDeployBackend {
    client: aws_sdk_codedeploy::Client,
}

impl CodeDeployBackend {
    /// Connects with an explicit access key pair and region
    ///
    /// Credentials are supplied externally (CI secrets), so no provider
    /// chain lookup happens beyond them.
    pub async fn connect(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let credentials = Credentials::new(
            access_key_id.into(),
            secret_access_key.into(),
            None,
            None,
            "armada",
        );

        let config = aws_config::from_env()
            .region(Region::new(region.into()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            client: aws_sdk_codedeploy::Client::new(&config),
        }
    }

    /// Wraps an already-configured SDK client
    pub fn from_client(client: aws_sdk_codedeploy::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeployBackend for CodeDeployBackend {
    async fn list_deployment_groups(
        &self,
        target: &DeploymentTarget,
    ) -> Result<Vec<DeploymentGroup>> {
        let mut groups = Vec::new();
        let mut next_token: Option<String> = None;

        // The service pages group listings.
        loop {
            let output = self
                .client
                .list_deployment_groups()
                .application_name(&target.application)
                .set_next_token(next_token.clone())
                .send()
                .await
                .map_err(|e| classify("list_deployment_groups", e))?;

            groups.extend(
                output
                    .deployment_groups()
                    .iter()
                    .map(|name| DeploymentGroup::new(name.as_str())),
            );

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        debug!(
            "{} has {} deployment group(s)",
            target.application,
            groups.len()
        );

        Ok(groups)
    }

    async fn create_deployment(
        &self,
        target: &DeploymentTarget,
        group: &DeploymentGroup,
        revision: &Revision,
    ) -> Result<Deployment> {
        let location = RevisionLocation::builder()
            .revision_type(RevisionLocationType::GitHub)
            .git_hub_location(
                GitHubLocation::builder()
                    .repository(&revision.repository)
                    .commit_id(&revision.commit_id)
                    .build(),
            )
            .build();

        let output = self
            .client
            .create_deployment()
            .application_name(&target.application)
            .deployment_group_name(&group.name)
            .revision(location)
            .send()
            .await
            .map_err(|e| classify("create_deployment", e))?;

        let deployment_id = output.deployment_id().ok_or_else(|| {
            BackendError::api(
                "MissingDeploymentId",
                "create_deployment returned no deployment id",
            )
        })?;

        Ok(Deployment::new(deployment_id, DeploymentStatus::Created))
    }

    async fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatus> {
        let output = self
            .client
            .get_deployment()
            .deployment_id(deployment_id)
            .send()
            .await
            .map_err(|e| classify("get_deployment", e))?;

        let info = output.deployment_info().ok_or_else(|| {
            BackendError::NotFound(format!("deployment {} not found", deployment_id))
        })?;

        let status = info
            .status()
            .map(|s| DeploymentStatus::from_backend_str(s.as_str()))
            .unwrap_or_else(|| DeploymentStatus::Other("Unknown".to_string()));

        Ok(status)
    }
}

/// Maps an SDK error into the backend taxonomy
fn classify<E>(operation: &str, err: SdkError<E>) -> BackendError
where
    E: ProvideErrorMetadata + std::fmt::Debug,
{
    // Transport-level failures never carry a service error code.
    if matches!(
        err,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    ) {
        return BackendError::Unavailable(format!("{}: {:?}", operation, err));
    }

    match (err.code(), err.message()) {
        (Some(code), message) => {
            classify_code(code, message.unwrap_or("no message from service"))
        }
        (None, _) => BackendError::Unavailable(format!("{}: {:?}", operation, err)),
    }
}

/// Maps a CodeDeploy error code into the backend taxonomy
fn classify_code(code: &str, message: &str) -> BackendError {
    match code {
        "ApplicationDoesNotExistException"
        | "DeploymentGroupDoesNotExistException"
        | "DeploymentDoesNotExistException" => BackendError::NotFound(message.to_string()),
        "InvalidRevisionException"
        | "RevisionDoesNotExistException"
        | "RevisionRequiredException" => BackendError::InvalidRevision(message.to_string()),
        "ThrottlingException" => BackendError::Throttled(message.to_string()),
        _ => BackendError::api(code, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_application_is_not_found() {
        let err = classify_code("ApplicationDoesNotExistException", "no such app");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_revision_errors_map_to_invalid_revision() {
        assert!(matches!(
            classify_code("InvalidRevisionException", "bad commit"),
            BackendError::InvalidRevision(_)
        ));
        assert!(matches!(
            classify_code("RevisionDoesNotExistException", "unknown commit"),
            BackendError::InvalidRevision(_)
        ));
    }

    #[test]
    fn test_throttling_maps_to_throttled() {
        let err = classify_code("ThrottlingException", "slow down");
        assert!(err.is_throttled());
    }

    #[test]
    fn test_unclassified_codes_keep_their_code() {
        let err = classify_code("DeploymentLimitExceededException", "too many");
        match err {
            BackendError::Api { code, .. } => {
                assert_eq!(code, "DeploymentLimitExceededException")
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}

//! APM deployment-marker client
//!
//! Pushes a deployment event to an APM/monitoring endpoint so metric
//! dashboards can annotate the rollout. Authenticated with an API key
//! header; delivery is best-effort by contract.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use armada_core::notify::{NotifyError, Result};

/// Timestamp format the marker endpoint expects
const MARKER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// APM deployment-marker endpoint
#[derive(Debug, Clone)]
pub struct ApmClient {
    url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ApmClient {
    /// Creates a marker client for the given endpoint and API key
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Records one deployment marker
    pub async fn record_deployment(
        &self,
        revision: &str,
        description: &str,
        user: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let payload = json!({
            "deployment": {
                "revision": revision,
                "description": description,
                "user": user,
                "timestamp": format_marker_timestamp(timestamp),
            }
        });

        let response = self
            .client
            .post(&self.url)
            .header("Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(NotifyError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::endpoint(status.as_u16(), body));
        }

        debug!("deployment marker for {} delivered", revision);
        Ok(())
    }
}

/// Formats a UTC timestamp the way the marker endpoint expects
fn format_marker_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(MARKER_TIMESTAMP_FORMAT).to_string()
}

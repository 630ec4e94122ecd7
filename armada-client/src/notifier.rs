//! Alert notifier
//!
//! Implements the [`Notifier`] port by composing the chat webhook and the
//! optional APM marker client. Message wording and deep links follow the
//! alert conventions the deployment dashboards already key on.

use async_trait::async_trait;
use chrono::Utc;

use armada_core::domain::run::{FailureReport, RunContext};
use armada_core::notify::{Notifier, Result};

use crate::apm::ApmClient;
use crate::chat::{AlertField, ChatMessage, ChatWebhook};

/// Chat + APM implementation of the notifier port
pub struct AlertNotifier {
    chat: ChatWebhook,
    apm: Option<ApmClient>,
    /// Region used for deployment console deep links
    console_region: String,
}

impl AlertNotifier {
    /// Creates a notifier
    ///
    /// When `apm` is `None` the deployment marker is skipped entirely.
    pub fn new(chat: ChatWebhook, apm: Option<ApmClient>, console_region: impl Into<String>) -> Self {
        Self {
            chat,
            apm,
            console_region: console_region.into(),
        }
    }
}

#[async_trait]
impl Notifier for AlertNotifier {
    async fn notify_started(&self, ctx: &RunContext) -> Result<()> {
        let message = ChatMessage::new("Deployment created", started_text(ctx))
            .with_link(run_url(ctx));
        self.chat.post(&message).await
    }

    async fn notify_outcome(&self, ctx: &RunContext, report: &FailureReport) -> Result<()> {
        let message = if report.is_empty() {
            ChatMessage::new(
                "Deployment succeeded",
                format!(
                    "*{}* `{}` deployment *succeeded*.",
                    ctx.application, ctx.ref_name
                ),
            )
            .with_link(run_url(ctx))
            .with_color("good")
        } else {
            let fields = report
                .iter()
                .map(|f| AlertField {
                    value: format!(
                        "✦ {} - <{}|{}>",
                        f.group.name,
                        console_url(&self.console_region, &f.deployment.deployment_id),
                        f.deployment.deployment_id
                    ),
                    short: false,
                })
                .collect();

            ChatMessage::new(
                "Deployment failed",
                format!(
                    "*{}* `{}` deployment *failed* on following deployment group(s).",
                    ctx.application, ctx.ref_name
                ),
            )
            .with_link(run_url(ctx))
            .with_color("danger")
            .with_fields(fields)
        };

        self.chat.post(&message).await
    }

    async fn record_deployment_start(&self, ctx: &RunContext) -> Result<()> {
        let Some(apm) = &self.apm else {
            return Ok(());
        };

        apm.record_deployment(
            &format!("{}|{}", ctx.run_id, ctx.ref_name),
            &started_text(ctx),
            &ctx.triggered_by,
            Utc::now(),
        )
        .await
    }
}

/// Body of the start announcement, reused as the marker description
fn started_text(ctx: &RunContext) -> String {
    format!(
        "A deployment has been triggered for *{}* by *{}* with Tag ID: `{}`",
        ctx.application, ctx.triggered_by, ctx.ref_name
    )
}

/// Deep link to the workflow run that triggered the deployment
fn run_url(ctx: &RunContext) -> String {
    format!(
        "https://github.com/{}/actions/runs/{}",
        ctx.repository, ctx.run_id
    )
}

/// Deep link to a deployment's console view
fn console_url(region: &str, deployment_id: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/codesuite/codedeploy/deployments/{deployment_id}?region={region}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RunContext {
        RunContext {
            application: "web-server".to_string(),
            repository: "acme/web-server".to_string(),
            commit_id: "abc123".to_string(),
            triggered_by: "ansu".to_string(),
            ref_name: "v4.02".to_string(),
            run_id: "1234567890".to_string(),
        }
    }

    #[test]
    fn test_started_text_names_app_user_and_ref() {
        let text = started_text(&context());
        assert_eq!(
            text,
            "A deployment has been triggered for *web-server* by *ansu* with Tag ID: `v4.02`"
        );
    }

    #[test]
    fn test_run_url_points_at_workflow_run() {
        assert_eq!(
            run_url(&context()),
            "https://github.com/acme/web-server/actions/runs/1234567890"
        );
    }

    #[test]
    fn test_console_url_carries_region_twice() {
        assert_eq!(
            console_url("us-east-1", "d-ABCDEF"),
            "https://us-east-1.console.aws.amazon.com/codesuite/codedeploy/deployments/d-ABCDEF?region=us-east-1"
        );
    }
}

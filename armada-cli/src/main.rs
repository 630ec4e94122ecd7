//! Armada CLI
//!
//! Triggers one deployment of a revision across every deployment group of
//! an application and waits for the aggregate outcome. Exits 0 when every
//! group succeeded (or the target has no groups), 1 when any group failed.

mod output;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use armada_client::{AlertNotifier, ApmClient, ChatWebhook, CodeDeployBackend};
use armada_core::domain::run::RunContext;
use armada_core::domain::target::Revision;
use armada_orchestrator::{NotifyPolicy, Orchestrator, OrchestratorConfig};

#[derive(Parser)]
#[command(name = "armada")]
#[command(about = "Fan out a revision to every deployment group of an application", long_about = None)]
struct Cli {
    /// AWS access key id
    #[arg(short = 'a', long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    access_key_id: String,

    /// AWS secret access key
    #[arg(short = 'k', long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: String,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    region: String,

    /// CodeDeploy application name
    #[arg(long, env = "ARMADA_APPLICATION")]
    application: String,

    /// Source repository ("owner/name")
    #[arg(short = 'r', long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Commit id to deploy
    #[arg(short = 'c', long, env = "GITHUB_SHA")]
    commit_id: String,

    /// User who triggered the workflow
    #[arg(short = 'u', long, env = "GITHUB_ACTOR")]
    user: String,

    /// Branch or tag name that triggered the run
    #[arg(long = "ref", env = "GITHUB_REF_NAME")]
    ref_name: String,

    /// Unique workflow run identifier
    #[arg(long, env = "GITHUB_RUN_ID")]
    run_id: String,

    /// Chat webhook URL for alerts
    #[arg(long, env = "ARMADA_CHAT_WEBHOOK_URL", hide_env_values = true)]
    chat_webhook_url: String,

    /// APM deployment-marker endpoint
    #[arg(long, env = "ARMADA_APM_URL", requires = "apm_api_key")]
    apm_url: Option<String>,

    /// API key for the APM endpoint
    #[arg(long, env = "ARMADA_APM_API_KEY", hide_env_values = true, requires = "apm_url")]
    apm_api_key: Option<String>,

    /// Announce the run when it starts (chat message + APM marker)
    #[arg(long)]
    notify_on_start: bool,

    /// Send a success alert when every group succeeds
    #[arg(long)]
    notify_on_success: bool,

    /// Suppress the failure alert
    #[arg(long)]
    no_notify_on_failure: bool,

    /// Seconds between status polls
    #[arg(long, default_value_t = 2)]
    poll_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "armada=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let policy = NotifyPolicy {
        notify_on_start: cli.notify_on_start,
        notify_on_success: cli.notify_on_success,
        notify_on_failure: !cli.no_notify_on_failure,
    };
    let config = OrchestratorConfig::new(policy)
        .with_poll_interval(Duration::from_secs(cli.poll_interval_secs));
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let ctx = RunContext {
        application: cli.application.clone(),
        repository: cli.repository.clone(),
        commit_id: cli.commit_id.clone(),
        triggered_by: cli.user.clone(),
        ref_name: cli.ref_name.clone(),
        run_id: cli.run_id.clone(),
    };
    let revision = Revision::new(&cli.repository, &cli.commit_id);

    info!(
        "deploying {}@{} to application {}",
        revision.repository, revision.commit_id, ctx.application
    );

    let backend =
        CodeDeployBackend::connect(cli.access_key_id, cli.secret_access_key, cli.region.clone())
            .await;

    let apm = match (cli.apm_url, cli.apm_api_key) {
        (Some(url), Some(api_key)) => Some(ApmClient::new(url, api_key)),
        _ => None,
    };
    let notifier = AlertNotifier::new(ChatWebhook::new(cli.chat_webhook_url), apm, cli.region);

    let orchestrator = Orchestrator::new(Arc::new(backend), Arc::new(notifier), config);

    let report = orchestrator
        .run(&ctx, &revision)
        .await
        .context("deployment run aborted")?;

    output::print_report(&ctx, &report);

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

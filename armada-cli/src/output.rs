//! Human-readable run summaries

use colored::*;

use armada_core::domain::run::RunContext;
use armada_orchestrator::RunReport;

/// Prints the final per-run summary
pub fn print_report(ctx: &RunContext, report: &RunReport) {
    if report.groups == 0 {
        println!(
            "{}",
            format!(
                "{} has no deployment groups; nothing was deployed.",
                ctx.application
            )
            .yellow()
        );
        return;
    }

    if report.is_success() {
        println!(
            "{}",
            format!(
                "All {} deployment group(s) of {} succeeded.",
                report.groups, ctx.application
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "{} of {} deployment group(s) of {} failed:",
                report.failures.len(),
                report.groups,
                ctx.application
            )
            .red()
            .bold()
        );
        for failure in report.failures.iter() {
            println!(
                "  {} {} ({})",
                "✗".red(),
                failure.group.name,
                failure.deployment.deployment_id.dimmed()
            );
        }
    }
}

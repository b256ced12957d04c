//! Command implementations

pub mod check;
pub mod cleanup;
pub mod config;
pub mod deploy;
pub mod install;
pub mod prep;
pub mod version;

use std::process::ExitCode;

use agentship_common::RunReport;
use anyhow::Result;
use chrono::Utc;

use crate::app::AppContext;
use crate::application::ports::RemoteSession;
use crate::application::services::fanout;
use crate::application::services::runbook::HostOutcome;
use crate::domain::{DeployConfig, Plan};

/// Run `plan` on every configured host, render the report, and map it to
/// an exit code (failure if any host failed).
///
/// # Errors
///
/// Returns an error only if the report cannot be rendered; host failures
/// are part of the report.
pub async fn execute_plan(
    app: &AppContext,
    config: &DeployConfig,
    task: &str,
    plan: &Plan,
    session: &impl RemoteSession,
) -> Result<ExitCode> {
    let started_at = Utc::now();
    let outcomes = {
        let reporter = app.reporter(&format!("{task}: {} host(s)", config.hosts.len()));
        let outcomes =
            fanout::run_on_hosts(session, &config.hosts, config.parallel, plan, &reporter).await;
        reporter.finish();
        outcomes
    };

    let report = RunReport::new(
        task,
        started_at,
        Utc::now(),
        outcomes.iter().map(HostOutcome::to_report).collect(),
    );
    tracing::info!(
        task,
        succeeded = report.succeeded,
        failed = report.failed,
        "run finished"
    );
    app.renderer().render_report(&report)?;

    Ok(if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

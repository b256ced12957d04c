//! Unit tests for running a plan across the host list.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use agentship_cli::application::services::fanout::run_on_hosts;
use agentship_cli::application::services::runbook::HostOutcome;
use agentship_cli::domain::plan::{check_plan, cleanup_plan};
use agentship_common::{HostStatus, RunReport};
use chrono::Utc;

use crate::mocks::{Call, RecordingReporter, RecordingSession, config};

#[tokio::test]
async fn test_one_failing_host_does_not_stop_the_others() {
    let cfg = config(r#"{"hosts": ["server1", "server2", "server3"], "parallel": 2}"#);
    let session = RecordingSession::new().fail_when("server2", "rm -f agent.zip", 1);
    let reporter = RecordingReporter::default();
    let plan = cleanup_plan("agent.zip", Some("conf.json"), "/opt/AppDynamics");

    let outcomes = run_on_hosts(&session, &cfg.hosts, cfg.parallel, &plan, &reporter).await;

    let names: Vec<&str> = outcomes.iter().map(|o| o.host.name.as_str()).collect();
    assert_eq!(names, vec!["server1", "server2", "server3"]);
    assert!(outcomes[0].succeeded());
    assert!(!outcomes[1].succeeded());
    assert!(outcomes[2].succeeded());

    // server2 stopped at its first step; the others ran both.
    assert_eq!(session.calls_for("server1").len(), 2);
    assert_eq!(session.calls_for("server2").len(), 1);
    assert_eq!(session.calls_for("server3").len(), 2);
}

#[tokio::test]
async fn test_report_counts_partial_failure() {
    let cfg = config(r#"{"hosts": ["server1", "server2"]}"#);
    let session = RecordingSession::new().unreachable("server1");
    let reporter = RecordingReporter::default();

    let outcomes =
        run_on_hosts(&session, &cfg.hosts, cfg.parallel, &check_plan(&cfg.home), &reporter).await;
    let now = Utc::now();
    let report = RunReport::new("check", now, now, outcomes.iter().map(HostOutcome::to_report).collect());

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert!(!report.all_succeeded());
    assert_eq!(report.hosts[0].status, HostStatus::Failed);
    assert_eq!(report.hosts[1].status, HostStatus::Succeeded);
}

#[tokio::test]
async fn test_every_host_gets_the_same_commands() {
    let cfg = config(r#"{"hosts": ["server1", "root@server2:2222"]}"#);
    let session = RecordingSession::new();
    let reporter = RecordingReporter::default();
    let plan = cleanup_plan("agent.zip", None, "/opt/AppDynamics");

    run_on_hosts(&session, &cfg.hosts, 1, &plan, &reporter).await;

    for host in ["server1", "server2"] {
        assert_eq!(
            session.calls_for(host),
            vec![Call::Exec {
                host: host.to_string(),
                command: "cd /opt/AppDynamics && rm -f agent.zip".to_string(),
            }]
        );
    }
}

//! Application service: run a plan on every configured host.
//!
//! Hosts are driven concurrently on the current task, with a semaphore
//! bounding how many are in flight. One host failing never cancels another.

use std::future::Future;

use futures_util::future::join_all;
use tokio::sync::Semaphore;

use crate::application::ports::{ProgressReporter, RemoteSession};
use crate::application::services::runbook::{HostOutcome, run_plan};
use crate::domain::{Host, Plan};

/// Run `task` for every host with at most `parallel` running at once.
///
/// Results come back in the order of `hosts`, whatever order they finish in.
pub async fn for_each_host<F, Fut, T>(hosts: &[Host], parallel: usize, task: F) -> Vec<T>
where
    F: Fn(Host) -> Fut,
    Fut: Future<Output = T>,
{
    // More permits than hosts are never used.
    let semaphore = Semaphore::new(parallel.clamp(1, hosts.len().max(1)));
    let semaphore = &semaphore;
    let task = &task;
    join_all(hosts.iter().map(|host| async move {
        // Never closed, so this is always Ok.
        let _permit = semaphore.acquire().await;
        task(host.clone()).await
    }))
    .await
}

/// Run `plan` on every host in `hosts`.
pub async fn run_on_hosts(
    session: &impl RemoteSession,
    hosts: &[Host],
    parallel: usize,
    plan: &Plan,
    reporter: &impl ProgressReporter,
) -> Vec<HostOutcome> {
    tracing::info!(hosts = hosts.len(), parallel, steps = plan.len(), "starting fan-out");
    for_each_host(hosts, parallel, move |host| async move {
        run_plan(session, &host, plan, reporter).await
    })
    .await
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final state of one host after a task ran against it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Succeeded,
    Failed,
}

/// Per-host entry of a [`RunReport`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostReport {
    /// Host as written in the config (`user@name[:port]`)
    pub host: String,
    pub status: HostStatus,
    pub steps_completed: usize,
    pub steps_total: usize,
    /// Captured stdout of steps that produce output (announce, installer).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<String>,
    /// Full error chain when `status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of running one task across the whole host list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Task name, e.g. `deploy` or `cleanup`.
    pub task: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub hosts: Vec<HostReport>,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunReport {
    /// Build a report, deriving the success/failure counters from `hosts`.
    #[must_use]
    pub fn new(
        task: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        hosts: Vec<HostReport>,
    ) -> Self {
        let succeeded = hosts
            .iter()
            .filter(|h| h.status == HostStatus::Succeeded)
            .count();
        let failed = hosts.len() - succeeded;
        Self {
            task: task.into(),
            started_at,
            finished_at,
            hosts,
            succeeded,
            failed,
        }
    }

    /// `true` when every host succeeded. An empty report is not a success.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        !self.hosts.is_empty() && self.failed == 0
    }
}

//! Human-readable terminal renderer.

use std::path::Path;

use agentship_common::{HostStatus, RunReport};
use owo_colors::OwoColorize as _;

use crate::domain::DeployConfig;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("agentship {version}");
    }

    /// Render the outcome of a task across all hosts.
    ///
    /// Failed hosts are always printed (to stderr); the rest is suppressed
    /// when quiet.
    pub fn render_report(&self, report: &RunReport) {
        if !self.ctx.quiet {
            println!();
        }
        for host in &report.hosts {
            let steps = format!("{}/{} steps", host.steps_completed, host.steps_total);
            match host.status {
                HostStatus::Succeeded => {
                    self.ctx.success(&format!(
                        "{}  {}",
                        host.host.style(self.ctx.styles.host),
                        steps.style(self.ctx.styles.dim)
                    ));
                }
                HostStatus::Failed => {
                    self.ctx.error(&format!(
                        "{}  {}",
                        host.host.style(self.ctx.styles.host),
                        steps.style(self.ctx.styles.dim)
                    ));
                    if let Some(error) = &host.error {
                        eprintln!("      {error}");
                    }
                }
            }
            if !self.ctx.quiet {
                for line in &host.output {
                    println!("      {line}");
                }
            }
        }

        let summary = format!(
            "{}: {} succeeded, {} failed",
            report.task, report.succeeded, report.failed
        );
        if report.all_succeeded() {
            if !self.ctx.quiet {
                println!();
                self.ctx.header(&summary);
            }
        } else {
            eprintln!();
            self.ctx.error(&summary);
        }
    }

    /// Render the resolved deployment config. The password is never shown.
    pub fn render_config(&self, config: &DeployConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<18} {}", "user:", config.user);
        println!("  {:<18} {}", "appd-home:", config.home);
        println!("  {:<18} {}", "credentials:", config.credentials.describe());
        println!("  {:<18} {}", "parallel:", config.parallel);
        println!(
            "  {:<18} {}s",
            "connect_timeout:",
            config.connect_timeout.as_secs()
        );
        println!();
        println!(
            "  {}",
            format!("Hosts ({}):", config.hosts.len()).style(self.ctx.styles.bold)
        );
        for host in &config.hosts {
            println!("    {host}");
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<18} {}",
            "AGENTSHIP_CONFIG:",
            std::env::var("AGENTSHIP_CONFIG").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<18} {}",
            "NO_COLOR:",
            std::env::var("NO_COLOR").unwrap_or_else(|_| "(not set)".to_string())
        );
    }
}

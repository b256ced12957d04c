//! agentship - push monitoring agents to remote hosts over SSH

use std::process::ExitCode;

use agentship_cli::cli::Cli;
use agentship_cli::domain::{ConfigError, ValidationError};
use agentship_cli::output::json;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e, json_mode);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(e: &anyhow::Error, json_mode: bool) {
    if json_mode {
        match json::format_error(&format!("{e:#}"), error_code(e)) {
            Ok(text) => println!("{text}"),
            Err(_) => eprintln!("Error: {e:#}"),
        }
    } else {
        eprintln!("Error: {e:#}");
    }
}

fn error_code(e: &anyhow::Error) -> &'static str {
    if e.chain().any(|c| c.is::<ConfigError>()) {
        "CONFIG_INVALID"
    } else if e.chain().any(|c| c.is::<ValidationError>()) {
        "INVALID_ARGUMENT"
    } else {
        "COMMAND_FAILED"
    }
}

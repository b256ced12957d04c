//! Domain layer: pure types, validation, and deployment plans.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod plan;
pub mod validate;

pub use command::{RemoteCommand, SudoMode, quote, remote_join};
pub use config::{Credentials, DeployConfig, env_config_file};
pub use error::{ConfigError, StepError, ValidationError};
pub use host::Host;
pub use plan::{AgentConfig, DeployRequest, Plan, Step};
pub use validate::{Artifact, LocalFileState, validate_file};

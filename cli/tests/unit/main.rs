//! Unit tests for the agentship CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod fanout_service;
mod helpers;
mod mocks;

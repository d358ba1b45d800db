//! Unit tests for orc-deploy
//!
//! These tests use mocked sessions and run fast without network I/O.

mod architecture;
mod deploy_runner_service;
mod executor_service;
mod mocks;

//! # Overview
//! This crate launches the graphistry `test-cpu` container. It resolves the launch options
//! from the environment, optionally provisions a Neo4j sidecar and rebuilds the test image,
//! then runs the tests inside the container with the caller's arguments passed through.
//!
//! Any step that fails stops the launch, and the failing step's exit code becomes the
//! launcher's own.

/// Launch options resolved from environment variables.
pub mod config;
/// Defines error types and their mapping to process exit codes.
pub mod errors;
/// External commands and the launch steps they belong to.
pub mod invocation;
/// Runs a launch plan step by step.
pub mod launcher;
/// Derives the ordered commands of a launch from its configuration.
pub mod plan;
/// Executes commands, for real or as a dry run.
pub mod runner;
/// Provides a recording runner for testing launches without a container runtime.
pub mod test_utils;
/// Helper functions used across the launcher.
pub mod utils;

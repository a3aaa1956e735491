//! Stalecheck - workspace staleness analyzer
//!
//! This library analyzes a multi-package source workspace, determines which
//! packages' build artifacts are out of date relative to their sources,
//! declared versions, and transitive dependencies, and recommends a safe
//! rebuild order.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Analysis logic (collection, graph, classification, propagation)
//! - [`infra`] - Infrastructure layer (filesystem access)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;

//! Core analysis logic
//!
//! All filesystem access goes through [`crate::infra::fs::WorkspaceFs`];
//! everything else in here is pure computation over the collected snapshot.
//!
//! # Submodules
//!
//! - [`manifest`] - Package manifest (package.json) parsing
//! - [`specifier`] - Dependency specifier classification
//! - [`collect`] - Workspace metadata collection
//! - [`graph`] - Dependency graph construction
//! - [`freshness`] - Per-package freshness classification
//! - [`toposort`] - Cycle-tolerant topological ordering
//! - [`propagate`] - Transitive staleness propagation
//! - [`analysis`] - The full pipeline
//! - [`report`] - Report document and text summary
//! - [`tree`] - Dependency tree and DOT rendering

pub mod analysis;
pub mod collect;
pub mod freshness;
pub mod graph;
pub mod manifest;
pub mod propagate;
pub mod report;
pub mod specifier;
pub mod toposort;
pub mod tree;

//! Error types for stalecheck
//!
//! Domain-specific error types using thiserror. The analyzer itself is
//! best-effort and never fails on unreadable workspace state; these errors
//! cover the few caller-visible failure modes (unknown package names,
//! report encoding).

use thiserror::Error;

/// Workspace lookup errors
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// Requested package does not exist in the workspace
    #[error("Package '{name}' not found in workspace")]
    PackageNotFound { name: String },
}

/// Report rendering errors
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON encoding failed
    #[error("Failed to encode report: {source}")]
    Encode { source: serde_json::Error },
}

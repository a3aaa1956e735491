//! Infrastructure layer
//!
//! Handles filesystem access. The analytical core only ever touches the
//! filesystem through the [`fs::WorkspaceFs`] trait so it can be exercised
//! against synthetic in-memory workspaces.

pub mod fs;

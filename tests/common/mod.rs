//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a
//! temporary workspace builder that lays out the conventional
//! `<root>/<project>/packages/<pkg>` structure with controlled file
//! modification times.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// A timestamp a fixed offset past an arbitrary recent base, so ordering
/// between test files is explicit.
pub fn ts(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
}

/// Test workspace context
///
/// Creates a temporary directory for test workspaces and provides
/// utilities for laying out packages.
pub struct TestWorkspace {
    /// Temporary directory for the workspace root
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a new test workspace in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the workspace with an explicit modification time
    pub fn create_file(&self, name: &str, content: &str, mtime: SystemTime) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        let file = std::fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .expect("Failed to reopen file");
        file.set_modified(mtime).expect("Failed to set mtime");
    }

    /// Create a directory in the workspace
    pub fn create_dir(&self, name: &str) {
        std::fs::create_dir_all(self.dir.path().join(name)).expect("Failed to create directory");
    }

    /// Start building a package under `<project>/packages/<dir>` with the
    /// given manifest
    pub fn package(&self, project: &str, dir: &str, manifest: &serde_json::Value) -> PackageBuilder {
        let rel = format!("{project}/packages/{dir}");
        self.create_file(&format!("{rel}/package.json"), &manifest.to_string(), ts(0));
        PackageBuilder { ws: self, rel }
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent helper for filling in a package's source and dist trees
pub struct PackageBuilder<'a> {
    ws: &'a TestWorkspace,
    rel: String,
}

impl PackageBuilder<'_> {
    /// Add a source file with an explicit mtime
    pub fn src_file(&self, name: &str, mtime: SystemTime) -> &Self {
        self.ws
            .create_file(&format!("{}/src/{name}", self.rel), "// source", mtime);
        self
    }

    /// Add a build output file with an explicit mtime
    pub fn dist_file(&self, name: &str, mtime: SystemTime) -> &Self {
        self.ws
            .create_file(&format!("{}/dist/{name}", self.rel), "// built", mtime);
        self
    }

    /// Add a build output manifest declaring `version`
    pub fn dist_manifest(&self, name: &str, version: &str, mtime: SystemTime) -> &Self {
        self.ws.create_file(
            &format!("{}/dist/package.json", self.rel),
            &serde_json::json!({"name": name, "version": version}).to_string(),
            mtime,
        );
        self
    }

    /// Add a tsconfig.json with the given content
    pub fn build_config(&self, content: &serde_json::Value) -> &Self {
        self.ws.create_file(
            &format!("{}/tsconfig.json", self.rel),
            &content.to_string(),
            ts(0),
        );
        self
    }
}

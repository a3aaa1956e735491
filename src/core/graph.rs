//! Dependency graph construction
//!
//! Resolves each package's declared dependencies to other workspace
//! packages and materializes forward and reverse edges. References that
//! cannot be resolved inside the workspace are assumed external and carry
//! no edge.

use std::path::{Component, Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use crate::config::defaults;
use crate::core::collect::{is_workspace_name, PackageRecord};
use crate::core::manifest::PackageManifest;
use crate::core::specifier::{classify, DependencySpecifier};
use crate::infra::fs::WorkspaceFs;

/// A package's position in the dependency graph
#[derive(Debug, Clone, Default)]
pub struct GraphNode {
    /// Declared dependency name -> resolved workspace package name, in
    /// declaration order
    pub dependencies: IndexMap<String, String>,
    /// Names of packages that depend on this one. Always the exact
    /// transpose of all `dependencies` edges in the graph.
    pub dependents: IndexSet<String>,
    /// Workspace-convention names that could not be resolved
    pub dropped: Vec<String>,
}

/// Complete dependency graph, one node per package record
pub type PackageGraph = IndexMap<String, GraphNode>;

enum Resolution {
    Resolved(String),
    Dropped,
    External,
}

/// Build the dependency graph for a set of package records.
///
/// Two passes: all nodes are created first, then every edge and its
/// transpose in a single sweep, so partial graphs never leak into the
/// reverse-edge computation.
pub fn build_graph(
    fs: &dyn WorkspaceFs,
    records: &IndexMap<String, PackageRecord>,
) -> PackageGraph {
    let mut graph: PackageGraph = records
        .keys()
        .map(|name| (name.clone(), GraphNode::default()))
        .collect();

    // (dependent, declared name, resolved name)
    let mut resolved: Vec<(String, String, String)> = Vec::new();
    let mut dropped: Vec<(String, String)> = Vec::new();

    for (name, record) in records {
        for (dep_name, spec) in &record.declared_dependencies {
            match resolve_dependency(fs, records, record, dep_name, spec) {
                Resolution::Resolved(target) => {
                    resolved.push((name.clone(), dep_name.clone(), target));
                }
                Resolution::Dropped => {
                    tracing::debug!(
                        package = %name,
                        dependency = %dep_name,
                        "workspace-convention dependency did not resolve, dropping"
                    );
                    dropped.push((name.clone(), dep_name.clone()));
                }
                Resolution::External => {}
            }
        }
    }

    for (dependent, declared, target) in resolved {
        if let Some(node) = graph.get_mut(&target) {
            node.dependents.insert(dependent.clone());
        }
        if let Some(node) = graph.get_mut(&dependent) {
            node.dependencies.insert(declared, target);
        }
    }
    for (owner, dep_name) in dropped {
        if let Some(node) = graph.get_mut(&owner) {
            node.dropped.push(dep_name);
        }
    }

    graph
}

fn resolve_dependency(
    fs: &dyn WorkspaceFs,
    records: &IndexMap<String, PackageRecord>,
    record: &PackageRecord,
    dep_name: &str,
    spec: &str,
) -> Resolution {
    match classify(spec) {
        DependencySpecifier::WorkspaceFloating | DependencySpecifier::Version { .. } => {
            resolve_by_name(records, dep_name)
        }
        DependencySpecifier::Alias { target } => match resolve_by_name(records, &target) {
            Resolution::Resolved(name) => Resolution::Resolved(name),
            // The alias target decides whether the reference was internal
            other => other,
        },
        DependencySpecifier::FilesystemLink { path } => {
            if let Some(target) = resolve_link(fs, records, &record.directory, &path) {
                return Resolution::Resolved(target);
            }
            if is_workspace_name(dep_name) {
                Resolution::Dropped
            } else {
                Resolution::External
            }
        }
    }
}

/// Resolve a dependency purely by its name.
fn resolve_by_name(records: &IndexMap<String, PackageRecord>, name: &str) -> Resolution {
    if records.contains_key(name) {
        Resolution::Resolved(name.to_string())
    } else if is_workspace_name(name) {
        Resolution::Dropped
    } else {
        Resolution::External
    }
}

/// Resolve a filesystem-link reference against the declaring package's
/// directory.
///
/// Prefers the name declared in the target's own manifest; falls back to
/// matching any known package whose directory equals or is a path suffix
/// of the resolved path.
fn resolve_link(
    fs: &dyn WorkspaceFs,
    records: &IndexMap<String, PackageRecord>,
    base: &Path,
    relative: &str,
) -> Option<String> {
    let target_dir = normalize(&base.join(relative));

    if let Some(raw) = fs.read_to_string(&target_dir.join(defaults::MANIFEST_FILE)) {
        if let Some(name) = PackageManifest::from_json(&raw).and_then(|m| m.name) {
            if records.contains_key(&name) {
                return Some(name);
            }
        }
    }

    records
        .values()
        .find(|candidate| {
            let dir = normalize(&candidate.directory);
            dir == target_dir || target_dir.ends_with(&dir)
        })
        .map(|candidate| candidate.name.clone())
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

//! The full analysis pipeline
//!
//! Ties the phases together: collect, build the graph, classify, propagate.
//! Each phase runs to completion before the next begins, and the whole
//! model is one analysis-run-scoped value with no state shared across
//! runs.

use std::path::Path;

use indexmap::IndexMap;

use crate::core::collect::{self, PackageRecord};
use crate::core::freshness::{self, FreshnessResult, Issue, IssueKind, Severity};
use crate::core::graph::{self, PackageGraph};
use crate::core::propagate;
use crate::infra::fs::WorkspaceFs;

/// Complete result of one analysis run
#[derive(Debug)]
pub struct Analysis {
    /// Discovered packages, in discovery order
    pub records: IndexMap<String, PackageRecord>,
    /// Resolved dependency graph
    pub graph: PackageGraph,
    /// Propagated freshness classification per package
    pub results: IndexMap<String, FreshnessResult>,
}

impl Analysis {
    /// Whether the workspace produced no packages at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names of packages that are not fresh, in discovery order.
    pub fn affected(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|(_, result)| !result.is_fresh())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Run the full analysis over a workspace root.
///
/// Never fails: an unlocatable root or a workspace without packages yields
/// an empty analysis the caller reports as such.
pub fn analyze(fs: &dyn WorkspaceFs, root: &Path) -> Analysis {
    let records = collect::collect_packages(fs, root);
    tracing::info!(packages = records.len(), root = %root.display(), "collected workspace metadata");

    let graph = graph::build_graph(fs, &records);

    let mut results: IndexMap<String, FreshnessResult> = records
        .values()
        .map(|record| (record.name.clone(), freshness::classify(record)))
        .collect();

    // Unresolvable workspace-convention references never fail the run, but
    // they are worth surfacing.
    for (name, node) in &graph {
        if node.dropped.is_empty() {
            continue;
        }
        let Some(result) = results.get_mut(name) else {
            continue;
        };
        for dep in &node.dropped {
            result.issues.push(Issue {
                kind: IssueKind::DroppedDependency,
                severity: Severity::Info,
                message: format!(
                    "dependency '{dep}' looks internal but matches no workspace package"
                ),
                dependency: Some(dep.clone()),
            });
        }
    }

    propagate::propagate(&graph, &mut results);

    Analysis {
        records,
        graph,
        results,
    }
}

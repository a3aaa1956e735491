//! Transitive staleness propagation
//!
//! Walks reverse dependency edges so that staleness flows from a package
//! to everything that depends on it, and computes per-package impact
//! scores.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::core::freshness::{FreshnessResult, FreshnessStatus, Issue, IssueKind, Severity};
use crate::core::graph::PackageGraph;

/// Escalate dependents of every non-fresh package and compute impact
/// scores, mutating `results` in place.
///
/// The final statuses and scores are independent of iteration order:
/// escalation only ever moves fresh to stale, and impact scores are static
/// reachability counts over the reverse edges. Running this twice changes
/// nothing.
pub fn propagate(graph: &PackageGraph, results: &mut IndexMap<String, FreshnessResult>) {
    let seeds: Vec<String> = results
        .iter()
        .filter(|(_, result)| !result.is_fresh())
        .map(|(name, _)| name.clone())
        .collect();

    for seed in &seeds {
        escalate_dependents(graph, results, seed);
    }

    let affected: Vec<String> = results
        .iter()
        .filter(|(_, result)| !result.is_fresh())
        .map(|(name, _)| name.clone())
        .collect();
    for name in &affected {
        let score = count_transitive_dependents(graph, name);
        if let Some(result) = results.get_mut(name) {
            result.impact_score = score;
        }
    }
}

/// Escalate every package reachable from `seed` via reverse edges.
///
/// The visited set is scoped to this call, so a cycle is traversed at most
/// once per starting package.
fn escalate_dependents(
    graph: &PackageGraph,
    results: &mut IndexMap<String, FreshnessResult>,
    seed: &str,
) {
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(seed.to_string());
    let mut stack: Vec<String> = vec![seed.to_string()];

    while let Some(current) = stack.pop() {
        let Some(node) = graph.get(&current) else {
            continue;
        };
        for dependent in &node.dependents {
            if !visited.insert(dependent.clone()) {
                continue;
            }
            if let Some(result) = results.get_mut(dependent) {
                if result.is_fresh() {
                    tracing::debug!(package = %dependent, upstream = %current, "escalating to stale");
                    result.status = FreshnessStatus::Stale;
                    result.issues.push(Issue {
                        kind: IssueKind::TransitiveStale,
                        severity: Severity::Warning,
                        message: format!("depends on stale workspace package '{current}'"),
                        dependency: Some(current.clone()),
                    });
                }
            }
            stack.push(dependent.clone());
        }
    }
}

/// Count the distinct packages reachable from `start` via reverse edges,
/// each counted once regardless of how many paths reach it.
fn count_transitive_dependents(graph: &PackageGraph, start: &str) -> usize {
    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(start.to_string());
    let mut stack: Vec<String> = vec![start.to_string()];
    let mut count = 0;

    while let Some(current) = stack.pop() {
        let Some(node) = graph.get(&current) else {
            continue;
        };
        for dependent in &node.dependents {
            if visited.insert(dependent.clone()) {
                count += 1;
                stack.push(dependent.clone());
            }
        }
    }
    count
}

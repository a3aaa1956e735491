//! Cycle-tolerant topological ordering
//!
//! Orders a requested subset of packages so dependencies come before
//! dependents. A dependency cycle never fails the sort: the edge that
//! closes the cycle is skipped and the ordering degrades gracefully.

use std::collections::HashSet;

use crate::core::graph::PackageGraph;

/// Order `requested` so that for every pair (A depends on B, both in the
/// requested set), B precedes A.
///
/// Deterministic: requested names are visited in caller order and each
/// node's dependencies in declaration order, so identical input always
/// yields an identical sequence. Names absent from the graph are ignored.
pub fn sort_for_rebuild(graph: &PackageGraph, requested: &[String]) -> Vec<String> {
    let scope: HashSet<&str> = requested.iter().map(String::as_str).collect();
    let mut done: HashSet<String> = HashSet::new();
    let mut on_stack: HashSet<String> = HashSet::new();
    let mut ordered = Vec::new();

    for name in requested {
        visit(graph, &scope, name, &mut done, &mut on_stack, &mut ordered);
    }
    ordered
}

fn visit(
    graph: &PackageGraph,
    scope: &HashSet<&str>,
    name: &str,
    done: &mut HashSet<String>,
    on_stack: &mut HashSet<String>,
    ordered: &mut Vec<String>,
) {
    if done.contains(name) || on_stack.contains(name) {
        // Revisiting a node on the active stack closes a cycle; skip the
        // edge instead of erroring.
        return;
    }
    let Some(node) = graph.get(name) else {
        return;
    };

    on_stack.insert(name.to_string());
    for target in node.dependencies.values() {
        if scope.contains(target.as_str()) {
            visit(graph, scope, target, done, on_stack, ordered);
        }
    }
    on_stack.remove(name);

    done.insert(name.to_string());
    ordered.push(name.to_string());
}

//! Dependency tree visualization
//!
//! Renders a package's resolved workspace dependencies as a tree or
//! exports them in DOT graph format. Tree rendering tracks a per-path
//! visited set: the same package may appear in several branches, but a
//! true cycle renders a bounded "(circular)" leaf instead of recursing
//! forever.

use std::collections::HashSet;

use crate::core::analysis::Analysis;
use crate::core::freshness::FreshnessStatus;
use crate::error::WorkspaceError;

/// Render the dependency tree rooted at one package.
pub fn format_tree(analysis: &Analysis, package: &str) -> Result<String, WorkspaceError> {
    if !analysis.graph.contains_key(package) {
        return Err(WorkspaceError::PackageNotFound {
            name: package.to_string(),
        });
    }

    let mut out = String::new();
    out.push_str(&format!("Dependencies for '{package}':\n"));
    let mut path = HashSet::new();
    render_node(analysis, package, "", true, &mut path, &mut out);
    Ok(out)
}

/// Render every root package (no dependents) as its own tree.
pub fn format_forest(analysis: &Analysis) -> String {
    if analysis.is_empty() {
        return "No workspace packages found".to_string();
    }

    let roots: Vec<&String> = analysis
        .graph
        .iter()
        .filter(|(_, node)| node.dependents.is_empty())
        .map(|(name, _)| name)
        .collect();

    let mut out = String::new();
    out.push_str("Workspace dependency tree:\n");
    if roots.is_empty() {
        // Every package sits in a cycle; fall back to all packages
        for (index, name) in analysis.graph.keys().enumerate() {
            let is_last = index == analysis.graph.len() - 1;
            render_node(analysis, name, "", is_last, &mut HashSet::new(), &mut out);
        }
    } else {
        for (index, name) in roots.iter().enumerate() {
            let is_last = index == roots.len() - 1;
            render_node(analysis, name, "", is_last, &mut HashSet::new(), &mut out);
        }
    }
    out
}

fn render_node(
    analysis: &Analysis,
    name: &str,
    prefix: &str,
    is_last: bool,
    path: &mut HashSet<String>,
    out: &mut String,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let label = node_label(analysis, name);

    if path.contains(name) {
        out.push_str(&format!("{prefix}{connector}{label} (circular)\n"));
        return;
    }
    out.push_str(&format!("{prefix}{connector}{label}\n"));

    path.insert(name.to_string());
    if let Some(node) = analysis.graph.get(name) {
        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        let targets: Vec<&String> = node.dependencies.values().collect();
        for (index, target) in targets.iter().enumerate() {
            let last_child = index == targets.len() - 1;
            render_node(analysis, target, &child_prefix, last_child, path, out);
        }
    }
    path.remove(name);
}

fn node_label(analysis: &Analysis, name: &str) -> String {
    match analysis.results.get(name) {
        Some(result) => format!("{name} [{}]", result.status),
        None => name.to_string(),
    }
}

/// Export the graph (or the subgraph reachable from one package) in DOT
/// format.
pub fn format_dot(analysis: &Analysis, package: Option<&str>) -> Result<String, WorkspaceError> {
    let scope: Vec<String> = match package {
        Some(name) => {
            if !analysis.graph.contains_key(name) {
                return Err(WorkspaceError::PackageNotFound {
                    name: name.to_string(),
                });
            }
            let mut reachable = Vec::new();
            let mut seen = HashSet::new();
            collect_reachable(analysis, name, &mut seen, &mut reachable);
            reachable
        }
        None => analysis.graph.keys().cloned().collect(),
    };

    let mut out = String::new();
    out.push_str("digraph workspace {\n");
    out.push_str("    rankdir=TB;\n");
    out.push_str("    node [shape=box];\n");
    out.push('\n');

    for name in &scope {
        let color = match analysis.results.get(name).map(|r| r.status) {
            Some(FreshnessStatus::Fresh) | None => "black",
            Some(FreshnessStatus::Stale) => "red",
            Some(FreshnessStatus::NeverBuilt) => "orange",
        };
        out.push_str(&format!("    \"{name}\" [color={color}];\n"));
    }
    out.push('\n');

    let in_scope: HashSet<&String> = scope.iter().collect();
    for name in &scope {
        if let Some(node) = analysis.graph.get(name) {
            for target in node.dependencies.values() {
                if in_scope.contains(target) {
                    out.push_str(&format!("    \"{name}\" -> \"{target}\";\n"));
                }
            }
        }
    }

    out.push_str("}\n");
    Ok(out)
}

/// Collect all packages reachable from `name` along forward edges,
/// depth-first in declaration order.
fn collect_reachable(
    analysis: &Analysis,
    name: &str,
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
) {
    if !seen.insert(name.to_string()) {
        return;
    }
    out.push(name.to_string());
    if let Some(node) = analysis.graph.get(name) {
        for target in node.dependencies.values() {
            collect_reachable(analysis, target, seen, out);
        }
    }
}

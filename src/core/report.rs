//! Report rendering
//!
//! Two consumers of the analysis data model live here: the plain text
//! summary and the machine-readable JSON document. Field names in the
//! document are camelCase for consumption by workspace tooling.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::analysis::Analysis;
use crate::core::freshness::{FreshnessStatus, Issue, Severity};
use crate::core::toposort;
use crate::error::ReportError;

/// Machine-readable view of an analysis run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub workspace_root: String,
    pub generated_at: DateTime<Utc>,
    pub packages: Vec<PackageEntry>,
    /// Topological rebuild order over every non-fresh package
    pub rebuild_order: Vec<String>,
    /// Non-fresh packages at or above the impact threshold, by descending
    /// impact
    pub high_impact: Vec<HighImpactEntry>,
}

/// One package's slice of the report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageEntry {
    pub name: String,
    pub directory: String,
    pub declared_version: String,
    pub built_version: Option<String>,
    pub source_m_time: Option<DateTime<Utc>>,
    pub dist_m_time: Option<DateTime<Utc>>,
    pub dist_exists: bool,
    pub has_type_declarations: bool,
    pub status: FreshnessStatus,
    pub impact_score: usize,
    pub issues: Vec<Issue>,
    /// Resolved workspace dependency names
    pub dependencies: Vec<String>,
    /// Packages depending on this one
    pub dependents: Vec<String>,
    /// Workspace-convention dependencies that did not resolve
    pub dropped_dependencies: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighImpactEntry {
    pub name: String,
    pub impact_score: usize,
    pub status: FreshnessStatus,
}

impl ReportDocument {
    /// Assemble the document from a finished analysis.
    pub fn build(analysis: &Analysis, root: &Path, impact_threshold: usize) -> Self {
        let affected = analysis.affected();
        let rebuild_order = toposort::sort_for_rebuild(&analysis.graph, &affected);

        let mut high_impact: Vec<HighImpactEntry> = analysis
            .results
            .iter()
            .filter(|(_, result)| !result.is_fresh() && result.impact_score >= impact_threshold)
            .map(|(name, result)| HighImpactEntry {
                name: name.clone(),
                impact_score: result.impact_score,
                status: result.status,
            })
            .collect();
        high_impact.sort_by(|a, b| {
            b.impact_score
                .cmp(&a.impact_score)
                .then_with(|| a.name.cmp(&b.name))
        });

        let packages = analysis
            .records
            .values()
            .map(|record| {
                let node = analysis
                    .graph
                    .get(&record.name)
                    .cloned()
                    .unwrap_or_default();
                let (status, impact_score, issues) = match analysis.results.get(&record.name) {
                    Some(result) => (result.status, result.impact_score, result.issues.clone()),
                    None => (FreshnessStatus::Fresh, 0, Vec::new()),
                };
                PackageEntry {
                    name: record.name.clone(),
                    directory: record.directory.display().to_string(),
                    declared_version: record.declared_version.clone(),
                    built_version: record.built_version.clone(),
                    source_m_time: timestamp(record.source_mtime),
                    dist_m_time: timestamp(record.dist_mtime),
                    dist_exists: record.dist_exists,
                    has_type_declarations: record.has_type_declarations,
                    status,
                    impact_score,
                    issues,
                    dependencies: node.dependencies.values().cloned().collect(),
                    dependents: node.dependents.iter().cloned().collect(),
                    dropped_dependencies: node.dropped.clone(),
                }
            })
            .collect();

        Self {
            workspace_root: root.display().to_string(),
            generated_at: Utc::now(),
            packages,
            rebuild_order,
            high_impact,
        }
    }

    /// Render the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(|source| ReportError::Encode { source })
    }
}

fn timestamp(time: Option<SystemTime>) -> Option<DateTime<Utc>> {
    time.map(DateTime::<Utc>::from)
}

/// Display filters for the text summary. Applied after the analysis, never
/// altering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOptions {
    /// Show only stale and never-built packages
    pub only_stale: bool,
    /// Show only packages with at least this impact score
    pub impact_threshold: Option<usize>,
}

/// Render the plain text summary.
pub fn format_summary(analysis: &Analysis, options: &SummaryOptions) -> String {
    if analysis.is_empty() {
        return "No workspace packages found".to_string();
    }

    let mut out = String::new();
    out.push_str("Workspace freshness:\n\n");

    for (name, record) in &analysis.records {
        let Some(result) = analysis.results.get(name) else {
            continue;
        };
        if options.only_stale && result.is_fresh() {
            continue;
        }
        if let Some(threshold) = options.impact_threshold {
            if result.impact_score < threshold {
                continue;
            }
        }

        let symbol = match result.status {
            FreshnessStatus::Fresh => "✓",
            FreshnessStatus::Stale => "✗",
            FreshnessStatus::NeverBuilt => "⚠",
        };
        let built = record.built_version.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "{symbol} {name} {} (built: {built}) [{}]",
            record.declared_version, result.status
        ));
        if result.impact_score > 0 {
            out.push_str(&format!(" impact: {}", result.impact_score));
        }
        out.push('\n');

        for issue in &result.issues {
            let marker = match issue.severity {
                Severity::Error => "✗",
                Severity::Warning => "⚠",
                Severity::Info => "ℹ",
            };
            out.push_str(&format!("    {marker} {}\n", issue.message));
        }
    }

    let fresh = analysis.results.values().filter(|r| r.is_fresh()).count();
    let never_built = analysis
        .results
        .values()
        .filter(|r| r.status == FreshnessStatus::NeverBuilt)
        .count();
    let stale = analysis.results.len() - fresh - never_built;
    out.push_str(&format!(
        "\n{} packages: {fresh} fresh, {stale} stale, {never_built} never built\n",
        analysis.results.len()
    ));

    let affected = analysis.affected();
    if !affected.is_empty() {
        let order = toposort::sort_for_rebuild(&analysis.graph, &affected);
        out.push_str("\nRebuild order:\n");
        for (index, name) in order.iter().enumerate() {
            out.push_str(&format!("{:>3}. {name}\n", index + 1));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::analyze;
    use crate::infra::fs::MemoryFs;
    use std::time::{Duration, SystemTime};

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn chain_workspace() -> MemoryFs {
        // a -> b -> c, only c stale (sources newer than dist)
        let mut fs = MemoryFs::new();
        for (name, deps, src_at, dist_at) in [
            ("a", r#"{"@acme/b": "workspace:*"}"#, 10u64, 50u64),
            ("b", r#"{"@acme/c": "workspace:*"}"#, 10, 50),
            ("c", "{}", 90, 50),
        ] {
            fs.add_file(
                format!("/ws/main/packages/{name}/package.json"),
                &format!(
                    r#"{{"name": "@acme/{name}", "version": "1.0.0", "dependencies": {deps}}}"#
                ),
                at(1),
            );
            fs.add_file(
                format!("/ws/main/packages/{name}/src/index.ts"),
                "src",
                at(src_at),
            );
            fs.add_file(
                format!("/ws/main/packages/{name}/dist/index.js"),
                "out",
                at(dist_at),
            );
            fs.add_file(
                format!("/ws/main/packages/{name}/dist/package.json"),
                &format!(r#"{{"name": "@acme/{name}", "version": "1.0.0"}}"#),
                at(dist_at),
            );
        }
        fs
    }

    #[test]
    fn test_rebuild_order_lists_dependencies_first() {
        let fs = chain_workspace();
        let analysis = analyze(&fs, Path::new("/ws"));
        let document = ReportDocument::build(&analysis, Path::new("/ws"), 1);

        assert_eq!(
            document.rebuild_order,
            vec!["@acme/c", "@acme/b", "@acme/a"]
        );
    }

    #[test]
    fn test_high_impact_sorted_descending() {
        let fs = chain_workspace();
        let analysis = analyze(&fs, Path::new("/ws"));
        let document = ReportDocument::build(&analysis, Path::new("/ws"), 1);

        let names: Vec<_> = document.high_impact.iter().map(|e| e.name.clone()).collect();
        // c affects 2, b affects 1, a affects none and is below threshold
        assert_eq!(names, vec!["@acme/c", "@acme/b"]);
        assert_eq!(document.high_impact[0].impact_score, 2);
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let fs = chain_workspace();
        let analysis = analyze(&fs, Path::new("/ws"));
        let document = ReportDocument::build(&analysis, Path::new("/ws"), 1);
        let json = document.to_json().unwrap();

        assert!(json.contains("\"rebuildOrder\""));
        assert!(json.contains("\"highImpact\""));
        assert!(json.contains("\"impactScore\""));
        assert!(json.contains("\"sourceMTime\""));
        assert!(json.contains("\"never-built\"") || json.contains("\"stale\""));
    }

    #[test]
    fn test_summary_filters() {
        let fs = chain_workspace();
        let analysis = analyze(&fs, Path::new("/ws"));

        let all = format_summary(&analysis, &SummaryOptions::default());
        assert!(all.contains("@acme/a"));
        assert!(all.contains("Rebuild order:"));

        let high_only = format_summary(
            &analysis,
            &SummaryOptions {
                only_stale: true,
                impact_threshold: Some(2),
            },
        );
        assert!(high_only.contains("@acme/c"));
        assert!(!high_only.contains("✗ @acme/a"));
    }

    #[test]
    fn test_summary_empty_workspace() {
        let analysis = analyze(&MemoryFs::new(), Path::new("/missing"));
        assert_eq!(
            format_summary(&analysis, &SummaryOptions::default()),
            "No workspace packages found"
        );
    }
}

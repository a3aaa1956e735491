//! Freshness classification
//!
//! Derives a package's initial freshness status from its own metadata
//! alone. Graph-aware escalation lives in [`crate::core::propagate`].

use serde::Serialize;

use crate::core::collect::PackageRecord;

/// Freshness state of a package's build output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FreshnessStatus {
    /// Build output is up to date
    Fresh,
    /// Build output needs a rebuild
    Stale,
    /// No build output exists at all
    NeverBuilt,
}

impl std::fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Stale => write!(f, "stale"),
            Self::NeverBuilt => write!(f, "never-built"),
        }
    }
}

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Kinds of findings the analyzer reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// No build output directory exists
    NeverBuilt,
    /// Built version differs from the declared version
    VersionMismatch,
    /// Sources were modified after the last build
    StaleSources,
    /// A workspace dependency is stale, so this package is too
    TransitiveStale,
    /// A workspace-convention dependency matched no discovered package
    DroppedDependency,
}

/// A single finding about a package
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    /// The dependency responsible, when one is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
}

/// Freshness classification for one package
///
/// Created by [`classify`] and only ever escalated (fresh to stale) by the
/// propagator, never reverted.
#[derive(Debug, Clone)]
pub struct FreshnessResult {
    pub status: FreshnessStatus,
    /// Findings in the order they were recorded
    pub issues: Vec<Issue>,
    /// Count of distinct packages transitively affected; populated by the
    /// propagator for non-fresh packages
    pub impact_score: usize,
}

impl FreshnessResult {
    pub fn is_fresh(&self) -> bool {
        matches!(self.status, FreshnessStatus::Fresh)
    }
}

/// Classify a package from its own metadata alone.
///
/// Status priority: never-built, then stale, then fresh. All matching
/// issues are recorded even when a higher-priority status wins; a version
/// mismatch and stale timestamps are independent findings.
pub fn classify(record: &PackageRecord) -> FreshnessResult {
    let mut issues = Vec::new();

    let never_built = !record.dist_exists;
    if never_built {
        issues.push(Issue {
            kind: IssueKind::NeverBuilt,
            severity: Severity::Error,
            message: format!("'{}' has never been built", record.name),
            dependency: None,
        });
    }

    let mut stale = false;
    if let Some(built) = &record.built_version {
        if versions_differ(&record.declared_version, built) {
            stale = true;
            issues.push(Issue {
                kind: IssueKind::VersionMismatch,
                severity: Severity::Error,
                message: format!(
                    "built version {built} does not match declared version {}",
                    record.declared_version
                ),
                dependency: None,
            });
        }
    }
    if let (Some(source), Some(dist)) = (record.source_mtime, record.dist_mtime) {
        if source > dist {
            stale = true;
            issues.push(Issue {
                kind: IssueKind::StaleSources,
                severity: Severity::Warning,
                message: "sources were modified after the last build".to_string(),
                dependency: None,
            });
        }
    }

    let status = if never_built {
        FreshnessStatus::NeverBuilt
    } else if stale {
        FreshnessStatus::Stale
    } else {
        FreshnessStatus::Fresh
    };

    FreshnessResult {
        status,
        issues,
        impact_score: 0,
    }
}

/// Semver-aware version comparison with a plain string fallback.
fn versions_differ(declared: &str, built: &str) -> bool {
    match (
        semver::Version::parse(declared),
        semver::Version::parse(built),
    ) {
        (Ok(a), Ok(b)) => a != b,
        _ => declared != built,
    }
}

//! Workspace metadata collection
//!
//! Walks the conventional `<root>/*/packages/*` layout, reads each package
//! manifest, and snapshots the timestamps and versions that freshness
//! classification needs. The scan is best-effort throughout: unreadable
//! entries are skipped, a missing directory is a null timestamp, and a
//! malformed manifest simply excludes that package.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;

use indexmap::IndexMap;
use regex::Regex;

use crate::config::defaults;
use crate::core::manifest::{BuildConfig, PackageManifest};
use crate::infra::fs::WorkspaceFs;

/// Snapshot of one discovered package
///
/// Created fresh on every analysis run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    /// Scoped package name, unique within the workspace
    pub name: String,
    /// Package directory
    pub directory: PathBuf,
    /// Version declared in the manifest
    pub declared_version: String,
    /// Version found in the build output manifest, if any
    pub built_version: Option<String>,
    /// Latest modification time under the source tree
    pub source_mtime: Option<SystemTime>,
    /// Latest modification time under the build output tree
    pub dist_mtime: Option<SystemTime>,
    /// Whether a build output directory exists at all
    pub dist_exists: bool,
    /// Declared dependencies (regular and dev merged), name -> specifier
    pub declared_dependencies: IndexMap<String, String>,
    /// Whether the build is configured to emit type declarations
    pub has_type_declarations: bool,
}

fn scoped_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(defaults::SCOPED_NAME_PATTERN).expect("Invalid scoped name pattern")
    })
}

/// Whether a name follows the workspace's scoped naming convention.
pub fn is_workspace_name(name: &str) -> bool {
    scoped_name_regex().is_match(name)
}

/// Scan a workspace and return one record per discovered package, keyed by
/// name in discovery order.
///
/// A missing root or a workspace without packages yields an empty mapping,
/// never an error.
pub fn collect_packages(fs: &dyn WorkspaceFs, root: &Path) -> IndexMap<String, PackageRecord> {
    let mut records = IndexMap::new();

    for project in fs.read_dir(root) {
        if !project.is_dir {
            continue;
        }
        let packages_dir = project.path.join(defaults::PACKAGES_DIR);
        for pkg_dir in fs.read_dir(&packages_dir) {
            if !pkg_dir.is_dir {
                continue;
            }
            let Some(record) = collect_package(fs, &pkg_dir.path) else {
                continue;
            };
            if records.contains_key(&record.name) {
                tracing::debug!(
                    name = %record.name,
                    directory = %pkg_dir.path.display(),
                    "duplicate package name, keeping first occurrence"
                );
                continue;
            }
            records.insert(record.name.clone(), record);
        }
    }

    records
}

/// Snapshot a single package directory, or `None` when it holds no usable
/// manifest or its name is outside the workspace namespace.
fn collect_package(fs: &dyn WorkspaceFs, dir: &Path) -> Option<PackageRecord> {
    let manifest_raw = fs.read_to_string(&dir.join(defaults::MANIFEST_FILE))?;
    let manifest = PackageManifest::from_json(&manifest_raw)?;
    let name = manifest.name.clone()?;

    if !is_workspace_name(&name) {
        tracing::trace!(%name, "skipping package outside the workspace namespace");
        return None;
    }

    let dist_dir = dir.join(defaults::DIST_DIR);
    let dist_exists = fs.is_dir(&dist_dir);

    let built_version = fs
        .read_to_string(&dist_dir.join(defaults::MANIFEST_FILE))
        .and_then(|raw| PackageManifest::from_json(&raw))
        .and_then(|built| built.version);

    let has_type_declarations = fs
        .read_to_string(&dir.join(defaults::BUILD_CONFIG_FILE))
        .and_then(|raw| BuildConfig::from_json(&raw))
        .map_or(true, |config| config.emits_declarations());

    Some(PackageRecord {
        name,
        directory: dir.to_path_buf(),
        declared_version: manifest.version.clone().unwrap_or_default(),
        built_version,
        source_mtime: fs.latest_mtime(&dir.join(defaults::SRC_DIR)),
        dist_mtime: fs.latest_mtime(&dist_dir),
        dist_exists,
        declared_dependencies: manifest.merged_dependencies(),
        has_type_declarations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::fs::MemoryFs;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn manifest(name: &str, version: &str) -> String {
        format!(r#"{{"name": "{name}", "version": "{version}"}}"#)
    }

    #[test]
    fn test_collects_conventional_layout() {
        let mut fs = MemoryFs::new();
        fs.add_file("/ws/web/packages/app/package.json", &manifest("@acme/app", "1.0.0"), at(1));
        fs.add_file("/ws/shared/packages/utils/package.json", &manifest("@acme/utils", "2.0.0"), at(1));

        let records = collect_packages(&fs, Path::new("/ws"));
        let names: Vec<_> = records.keys().cloned().collect();
        assert_eq!(names, vec!["@acme/utils", "@acme/app"]);
        assert_eq!(records["@acme/app"].declared_version, "1.0.0");
        assert_eq!(
            records["@acme/app"].directory,
            PathBuf::from("/ws/web/packages/app")
        );
    }

    #[test]
    fn test_discovery_depth_is_bounded() {
        let mut fs = MemoryFs::new();
        // Manifest directly under the root, and one nested too deep -
        // neither matches <root>/*/packages/*.
        fs.add_file("/ws/package.json", &manifest("@acme/root", "1.0.0"), at(1));
        fs.add_file(
            "/ws/web/packages/app/vendor/packages/x/package.json",
            &manifest("@acme/x", "1.0.0"),
            at(1),
        );
        fs.add_file("/ws/web/packages/app/package.json", &manifest("@acme/app", "1.0.0"), at(1));

        let records = collect_packages(&fs, Path::new("/ws"));
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("@acme/app"));
    }

    #[test]
    fn test_skips_unscoped_and_malformed() {
        let mut fs = MemoryFs::new();
        fs.add_file("/ws/web/packages/plain/package.json", &manifest("plain-pkg", "1.0.0"), at(1));
        fs.add_file("/ws/web/packages/broken/package.json", "{not json", at(1));
        fs.add_file("/ws/web/packages/anon/package.json", r#"{"version": "1.0.0"}"#, at(1));
        fs.add_file("/ws/web/packages/ok/package.json", &manifest("@acme/ok", "1.0.0"), at(1));

        let records = collect_packages(&fs, Path::new("/ws"));
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("@acme/ok"));
    }

    #[test]
    fn test_timestamps_and_built_version() {
        let mut fs = MemoryFs::new();
        fs.add_file("/ws/web/packages/app/package.json", &manifest("@acme/app", "1.2.0"), at(1));
        fs.add_file("/ws/web/packages/app/src/index.ts", "x", at(100));
        fs.add_file("/ws/web/packages/app/src/util/helper.ts", "y", at(250));
        fs.add_file("/ws/web/packages/app/dist/index.js", "z", at(200));
        fs.add_file(
            "/ws/web/packages/app/dist/package.json",
            &manifest("@acme/app", "1.1.0"),
            at(200),
        );

        let records = collect_packages(&fs, Path::new("/ws"));
        let record = &records["@acme/app"];
        assert_eq!(record.source_mtime, Some(at(250)));
        assert_eq!(record.dist_mtime, Some(at(200)));
        assert!(record.dist_exists);
        assert_eq!(record.built_version.as_deref(), Some("1.1.0"));
    }

    #[test]
    fn test_missing_dirs_yield_nulls() {
        let mut fs = MemoryFs::new();
        fs.add_file("/ws/web/packages/bare/package.json", &manifest("@acme/bare", "1.0.0"), at(1));

        let records = collect_packages(&fs, Path::new("/ws"));
        let record = &records["@acme/bare"];
        assert_eq!(record.source_mtime, None);
        assert_eq!(record.dist_mtime, None);
        assert!(!record.dist_exists);
        assert_eq!(record.built_version, None);
    }

    #[test]
    fn test_malformed_dist_manifest_is_null_version() {
        let mut fs = MemoryFs::new();
        fs.add_file("/ws/web/packages/app/package.json", &manifest("@acme/app", "1.0.0"), at(1));
        fs.add_file("/ws/web/packages/app/dist/package.json", "{{{", at(2));

        let records = collect_packages(&fs, Path::new("/ws"));
        let record = &records["@acme/app"];
        assert!(record.dist_exists);
        assert_eq!(record.built_version, None);
    }

    #[test]
    fn test_type_declarations_from_build_config() {
        let mut fs = MemoryFs::new();
        fs.add_file("/ws/web/packages/a/package.json", &manifest("@acme/a", "1.0.0"), at(1));
        fs.add_file(
            "/ws/web/packages/a/tsconfig.json",
            r#"{"compilerOptions": {"declaration": false}}"#,
            at(1),
        );
        fs.add_file("/ws/web/packages/b/package.json", &manifest("@acme/b", "1.0.0"), at(1));

        let records = collect_packages(&fs, Path::new("/ws"));
        assert!(!records["@acme/a"].has_type_declarations);
        assert!(records["@acme/b"].has_type_declarations);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let fs = MemoryFs::new();
        assert!(collect_packages(&fs, Path::new("/nowhere")).is_empty());
    }

    #[test]
    fn test_is_workspace_name() {
        assert!(is_workspace_name("@acme/utils"));
        assert!(is_workspace_name("@my-org/some.pkg"));
        assert!(!is_workspace_name("lodash"));
        assert!(!is_workspace_name("@acme"));
        assert!(!is_workspace_name("@Acme/Utils"));
    }
}

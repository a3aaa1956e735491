//! Dependency specifier classification
//!
//! Raw specifier strings come in several shapes: workspace protocol
//! sentinels, relative filesystem links, npm aliases, and plain version
//! ranges. Classifying them once into a tagged value keeps the resolution
//! logic in [`crate::core::graph`] free of scattered prefix checks.

/// Classified dependency specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySpecifier {
    /// `workspace:` protocol - use whatever version exists in the workspace
    WorkspaceFloating,
    /// `file:`/`link:` or bare relative path pointing at another package's
    /// source directory
    FilesystemLink { path: String },
    /// `npm:` alias - the dependency key aliases another package name
    Alias { target: String },
    /// Pinned version, range, tag, or anything else; resolved purely by
    /// dependency name
    Version { raw: String },
}

/// Classify a raw specifier string.
pub fn classify(spec: &str) -> DependencySpecifier {
    if spec.starts_with("workspace:") {
        return DependencySpecifier::WorkspaceFloating;
    }
    for prefix in ["file:", "link:"] {
        if let Some(path) = spec.strip_prefix(prefix) {
            return DependencySpecifier::FilesystemLink {
                path: path.to_string(),
            };
        }
    }
    if spec.starts_with("./") || spec.starts_with("../") || spec.starts_with('/') {
        return DependencySpecifier::FilesystemLink {
            path: spec.to_string(),
        };
    }
    if let Some(rest) = spec.strip_prefix("npm:") {
        // `npm:@scope/name@^1.2.3` - the version suffix starts at the last
        // `@` past position zero (position zero is the scope marker).
        let target = match rest.rfind('@') {
            Some(idx) if idx > 0 => &rest[..idx],
            _ => rest,
        };
        return DependencySpecifier::Alias {
            target: target.to_string(),
        };
    }
    DependencySpecifier::Version {
        raw: spec.to_string(),
    }
}

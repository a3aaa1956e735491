//! Package manifest parsing
//!
//! Reads the subset of `package.json` and `tsconfig.json` the analyzer
//! needs. Parsing is best-effort throughout: malformed content yields
//! `None`, never an error, so a broken manifest only excludes data rather
//! than failing a scan.

use indexmap::IndexMap;
use serde::Deserialize;

/// Parsed package manifest (`package.json`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageManifest {
    /// Declared package name
    pub name: Option<String>,
    /// Declared version
    pub version: Option<String>,
    /// Regular dependencies, name -> specifier, in declaration order
    pub dependencies: IndexMap<String, String>,
    /// Development dependencies, name -> specifier, in declaration order
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Parse a manifest from JSON. Malformed content yields `None`.
    pub fn from_json(content: &str) -> Option<Self> {
        serde_json::from_str(content).ok()
    }

    /// Regular and development dependencies merged, declaration order
    /// preserved. Regular declarations win on duplicate names.
    pub fn merged_dependencies(&self) -> IndexMap<String, String> {
        let mut merged = self.dependencies.clone();
        for (name, spec) in &self.dev_dependencies {
            merged
                .entry(name.clone())
                .or_insert_with(|| spec.clone());
        }
        merged
    }
}

/// Parsed build tool configuration (`tsconfig.json`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    #[serde(rename = "compilerOptions")]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CompilerOptions {
    declaration: Option<bool>,
}

impl BuildConfig {
    /// Parse a build configuration from JSON. Configs routinely carry
    /// comments that plain JSON rejects; those parse as `None` and the
    /// caller falls back to defaults.
    pub fn from_json(content: &str) -> Option<Self> {
        serde_json::from_str(content).ok()
    }

    /// Whether the build emits type declarations. True unless the config
    /// explicitly turns it off.
    pub fn emits_declarations(&self) -> bool {
        self.compiler_options.declaration.unwrap_or(true)
    }
}

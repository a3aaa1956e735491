//! Default workspace layout conventions

/// Subdirectory of each project that holds its packages
pub const PACKAGES_DIR: &str = "packages";

/// Package manifest file name
pub const MANIFEST_FILE: &str = "package.json";

/// Source tree directory inside a package
pub const SRC_DIR: &str = "src";

/// Build output directory inside a package
pub const DIST_DIR: &str = "dist";

/// Build tool configuration file (may disable declaration output)
pub const BUILD_CONFIG_FILE: &str = "tsconfig.json";

/// Pattern a declared name must match to count as a workspace package
pub const SCOPED_NAME_PATTERN: &str = r"^@[a-z0-9][a-z0-9._-]*/[a-z0-9][a-z0-9._-]*$";

/// Default impact threshold for the high-impact report section
pub const DEFAULT_IMPACT_THRESHOLD: usize = 1;

//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid scoped package name (@scope/name)
    pub fn package_name() -> impl Strategy<Value = String> {
        ("[a-z][a-z0-9-]{0,12}", "[a-z][a-z0-9-]{0,16}")
            .prop_map(|(scope, name)| format!("@{scope}/{name}"))
    }

    /// Generate a valid semver version string
    pub fn semver_version() -> impl Strategy<Value = String> {
        (1u32..100, 0u32..100, 0u32..100)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate a dependency specifier in one of the shapes the resolver
    /// classifies
    pub fn dependency_specifier() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("workspace:*".to_string()),
            semver_version().prop_map(|v| format!("workspace:^{v}")),
            semver_version().prop_map(|v| format!("^{v}")),
            semver_version(),
            Just("file:../sibling".to_string()),
            Just("link:../../shared/packages/core".to_string()),
            package_name().prop_map(|n| format!("npm:{n}@1.0.0")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::collect::is_workspace_name;
    use crate::core::specifier::{classify, DependencySpecifier};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_name_generator(name in package_name()) {
            prop_assert!(is_workspace_name(&name));
        }

        #[test]
        fn test_semver_version_generator(version in semver_version()) {
            prop_assert!(semver::Version::parse(&version).is_ok());
        }

        #[test]
        fn test_specifier_generator_classifies(spec in dependency_specifier()) {
            // Every generated shape lands in a definite class; none are
            // misread as a plain path.
            match classify(&spec) {
                DependencySpecifier::WorkspaceFloating => {
                    prop_assert!(spec.starts_with("workspace:"));
                }
                DependencySpecifier::FilesystemLink { .. } => {
                    prop_assert!(
                        spec.starts_with("file:") || spec.starts_with("link:")
                    );
                }
                DependencySpecifier::Alias { target } => {
                    prop_assert!(spec.starts_with("npm:"));
                    prop_assert!(is_workspace_name(&target));
                }
                DependencySpecifier::Version { raw } => {
                    prop_assert_eq!(raw, spec);
                }
            }
        }
    }
}

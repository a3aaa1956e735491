//! Tree command implementation
//!
//! Implements `stalecheck tree`: display the workspace dependency tree, a
//! single package's tree, or a DOT graph export.

use std::path::Path;

use anyhow::Result;

use crate::core::{analysis, tree};
use crate::infra::fs::OsFs;

/// Execute the tree command
pub fn execute(root: &Path, package: Option<&str>, graph: bool) -> Result<()> {
    let fs = OsFs;
    let analysis = analysis::analyze(&fs, root);

    if analysis.is_empty() {
        println!("No workspace packages found under '{}'", root.display());
        return Ok(());
    }

    let rendered = if graph {
        tree::format_dot(&analysis, package)?
    } else {
        match package {
            Some(name) => tree::format_tree(&analysis, name)?,
            None => tree::format_forest(&analysis),
        }
    };
    print!("{rendered}");
    Ok(())
}

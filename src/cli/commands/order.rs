//! Order command implementation
//!
//! Implements `stalecheck order`: print the recommended rebuild order over
//! every non-fresh package, dependencies first.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::status;
use crate::core::{analysis, toposort};
use crate::infra::fs::OsFs;

/// Execute the order command
pub fn execute(root: &Path) -> Result<()> {
    let fs = OsFs;
    let analysis = analysis::analyze(&fs, root);

    if analysis.is_empty() {
        println!("No workspace packages found under '{}'", root.display());
        return Ok(());
    }

    let affected = analysis.affected();
    if affected.is_empty() {
        println!("{} All packages are fresh - nothing to rebuild", status::SUCCESS);
        return Ok(());
    }

    let order = toposort::sort_for_rebuild(&analysis.graph, &affected);
    println!("Rebuild order ({} packages):", order.len());
    for (index, name) in order.iter().enumerate() {
        println!("{:>3}. {name}", index + 1);
    }
    Ok(())
}

//! Check command implementation
//!
//! Implements `stalecheck check`: run the full analysis and print either
//! the text summary or the JSON report document. Filters apply to the
//! display only, never to the analysis itself.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::defaults;
use crate::core::analysis;
use crate::core::report::{self, ReportDocument, SummaryOptions};
use crate::infra::fs::OsFs;

/// Execute the check command
pub fn execute(
    root: &Path,
    json: bool,
    only_stale: bool,
    impact_threshold: Option<usize>,
) -> Result<()> {
    let fs = OsFs;
    let analysis = analysis::analyze(&fs, root);

    if json {
        let threshold = impact_threshold.unwrap_or(defaults::DEFAULT_IMPACT_THRESHOLD);
        let document = ReportDocument::build(&analysis, root, threshold);
        let rendered = document
            .to_json()
            .context("Failed to render JSON report")?;
        println!("{rendered}");
        return Ok(());
    }

    if analysis.is_empty() {
        println!("No workspace packages found under '{}'", root.display());
        return Ok(());
    }

    let options = SummaryOptions {
        only_stale,
        impact_threshold,
    };
    print!("{}", report::format_summary(&analysis, &options));
    Ok(())
}

//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod order;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze workspace freshness and report stale packages
    Check {
        /// Workspace root to analyze
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Emit the machine-readable JSON report
        #[arg(long)]
        json: bool,

        /// Show only stale and never-built packages
        #[arg(long)]
        only_stale: bool,

        /// Show only packages with at least this impact score
        #[arg(long)]
        impact_threshold: Option<usize>,
    },

    /// Print the recommended rebuild order for stale packages
    Order {
        /// Workspace root to analyze
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Display the workspace dependency tree
    Tree {
        /// Show the tree for a specific package
        package: Option<String>,

        /// Output in DOT graph format
        #[arg(long)]
        graph: bool,

        /// Workspace root to analyze
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        match self {
            Self::Check {
                root,
                json,
                only_stale,
                impact_threshold,
            } => check::execute(&root, json, only_stale, impact_threshold),
            Self::Order { root } => order::execute(&root),
            Self::Tree {
                package,
                graph,
                root,
            } => tree::execute(&root, package.as_deref(), graph),
        }
    }
}

//! Command handlers for the CLI.

mod completions;
mod convert;
mod plan;

use std::path::Path;

use anyhow::Result;

use crate::cli::SourceArgs;
use crate::cli::config::Config;
use crate::export::PlanOptions;

pub use completions::handle_completions;
pub use convert::{handle_convert, load_template};
pub use plan::handle_plan;

// ===========================================
// Shared Utilities
// ===========================================

/// Source settings after merging CLI arguments over the config file.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub input: std::path::PathBuf,
    pub draft_marker: String,
    pub plan: PlanOptions,
}

/// Resolves input, output, draft marker, renames and format.
pub(crate) fn resolve_source(args: &SourceArgs, config: &Config) -> ResolvedSource {
    ResolvedSource {
        input: config.input(args.input.as_ref()),
        draft_marker: config.draft_marker(args.draft_marker.as_deref()),
        plan: PlanOptions {
            output_root: config.output(args.output.as_ref()),
            notebook_names: config.notebook_names(&args.renames),
            format: config.format(args.target_format),
        },
    }
}

/// Fails early with a readable message when the input does not exist.
///
/// Only existence is checked. An existing file that is not a directory
/// reaches discovery and plans no notes.
pub(crate) fn check_input(input: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("input not found: {}", input.display());
    }
    Ok(())
}

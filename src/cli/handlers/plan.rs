//! Handler for the `plan` command.

use anyhow::{Context, Result};

use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat, PlanListing};
use crate::cli::PlanArgs;
use crate::export::{Plan, plan_library};

use super::{check_input, resolve_source};

/// Handle the `plan` command.
pub fn handle_plan(args: &PlanArgs, config: &Config) -> Result<()> {
    let source = resolve_source(&args.source, config);
    check_input(&source.input)?;

    let plan = plan_library(&source.input, &source.draft_marker, &source.plan)
        .with_context(|| format!("failed to plan {}", source.input.display()))?;

    print_plan(&args.cli_format, &plan)
}

fn listings(plan: &Plan) -> Vec<PlanListing> {
    plan.notes
        .iter()
        .filter_map(|note| {
            let destination = plan.destinations.get(&note.id)?;
            Some(PlanListing {
                id: note.id.to_string(),
                title: note.document.display_title().to_string(),
                path: destination.path.display().to_string(),
                url: destination.url.clone(),
                media_dir: destination.media_dir.display().to_string(),
            })
        })
        .collect()
}

fn print_plan(format: &OutputFormat, plan: &Plan) -> Result<()> {
    let listings = listings(plan);
    match format {
        OutputFormat::Human => {
            if plan.destinations.is_empty() {
                println!("No notes to convert.");
            }
            for listing in &listings {
                println!("{}  {}  {}", listing.id, listing.url, listing.path);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&listings))?);
        }
        OutputFormat::Paths => {
            for listing in &listings {
                println!("{}", listing.path);
            }
        }
    }
    Ok(())
}

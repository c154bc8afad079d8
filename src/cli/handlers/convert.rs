//! Handler for the `convert` command.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::ConvertArgs;
use crate::export::{ConvertOptions, ConvertSummary, PostTemplate, TemplateSyntax, convert};

use super::{check_input, resolve_source};

/// Handle the `convert` command.
pub fn handle_convert(args: &ConvertArgs, config: &Config) -> Result<()> {
    let source = resolve_source(&args.source, config);
    check_input(&source.input)?;

    let syntax = config.template_syntax(args.template_syntax);
    let template = load_template(config.template(args.template.as_ref()).as_deref(), syntax)?;
    debug!(syntax = ?template.syntax(), "post template ready");

    let options = ConvertOptions {
        input: source.input,
        draft_marker: source.draft_marker,
        plan: source.plan,
    };
    let summary = convert(&options, &template)
        .with_context(|| format!("failed to convert {}", options.input.display()))?;

    print_result(&args.cli_format, &summary)
}

/// Loads the post template, falling back to the built-in one.
pub fn load_template(path: Option<&Path>, syntax: TemplateSyntax) -> Result<PostTemplate> {
    match path {
        Some(path) => PostTemplate::load(path, syntax)
            .with_context(|| format!("failed to load template: {}", path.display())),
        None => Ok(PostTemplate::builtin(syntax)),
    }
}

fn print_result(format: &OutputFormat, summary: &ConvertSummary) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!(
                "Converted {} note{} ({} resource{} copied)",
                summary.notes_converted,
                if summary.notes_converted == 1 { "" } else { "s" },
                summary.resources_copied,
                if summary.resources_copied == 1 { "" } else { "s" },
            );
            for warning in &summary.warnings {
                eprintln!("warning: {}", warning);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(summary))?);
        }
        OutputFormat::Paths => {
            for post in &summary.posts {
                println!("{}", post.path.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_template_without_path() {
        let template = load_template(None, TemplateSyntax::Jinja).unwrap();
        assert_eq!(template.syntax(), TemplateSyntax::Jinja);
    }

    #[test]
    fn missing_template_names_path() {
        let err = load_template(Some(Path::new("/nonexistent/post.tpl")), TemplateSyntax::Placeholder)
            .unwrap_err();
        assert!(format!("{err:#}").contains("post.tpl"));
    }
}

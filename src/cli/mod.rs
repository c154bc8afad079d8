//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::export::{TargetFormat, TemplateSyntax};
use output::OutputFormat;

/// quiver2jekyll - publish a Quiver library as a Jekyll site
#[derive(Parser, Debug)]
#[command(name = "quiver2jekyll", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/quiver2jekyll/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a library, notebook or note into Jekyll posts
    Convert(ConvertArgs),

    /// Show where each note would be written, without writing anything
    Plan(PlanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by `convert` and `plan`
#[derive(Parser, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Quiver library, notebook or note directory
    pub input: Option<PathBuf>,

    /// Output root of the Jekyll site
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Title prefix marking a note as a draft (empty disables)
    #[arg(long)]
    pub draft_marker: Option<String>,

    /// Rename a notebook's output folder (can be specified multiple times)
    #[arg(long = "rename", value_name = "FROM=TO", value_parser = parse_rename, action = ArgAction::Append)]
    pub renames: Vec<(String, String)>,

    /// Generated post format
    #[arg(short = 'F', long = "format", value_enum)]
    pub target_format: Option<TargetFormat>,
}

/// Arguments for the `convert` command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Post template file (default: built-in Jekyll template)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Syntax of the post template
    #[arg(long, value_enum)]
    pub template_syntax: Option<TemplateSyntax>,

    /// Output format of the run summary
    #[arg(short = 'f', long = "cli-format", value_enum, default_value_t = OutputFormat::Human)]
    pub cli_format: OutputFormat,
}

/// Arguments for the `plan` command
#[derive(Parser, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short = 'f', long = "cli-format", value_enum, default_value_t = OutputFormat::Human)]
    pub cli_format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parses a `FROM=TO` notebook rename.
fn parse_rename(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{value}'")),
    }
}

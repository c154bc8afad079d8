//! quiver2jekyll - publish a Quiver library as a Jekyll site

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_convert, handle_plan},
    logging,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Convert(args) => handle_convert(args, &config),
        Command::Plan(args) => handle_plan(args, &config),
        Command::Completions(args) => handle_completions(args),
    }
}

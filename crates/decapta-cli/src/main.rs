//! decapta CLI
//!
//! Prepares structured data for Decap CMS and turns edited content back
//! into the original formats.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let format = cli.source_format()?;
    match cli.command {
        Commands::PreProcess(args) => commands::run_pre_process(format, args),
        Commands::PostProcess(args) => commands::run_post_process(format, args),
        Commands::Config(args) => commands::run_config(format, args),
    }
}

//! Command implementations for decapta-cli

pub mod config;
pub mod post_process;
pub mod pre_process;

use colored::Colorize;

use decapta_core::BatchReport;

use crate::error::{CliError, Result};

pub use config::run_config;
pub use post_process::run_post_process;
pub use pre_process::run_pre_process;

/// Print what a batch did and fail when any source failed.
fn finish(report: &BatchReport, done: &str) -> Result<()> {
    for action in &report.actions {
        println!("   {} {action}", "+".green());
    }
    for warning in &report.warnings {
        println!("   {} {warning}", "!".yellow());
    }
    for failure in &report.errors {
        eprintln!("   {} {}: {}", "x".red(), failure.source_name.cyan(), failure.error);
    }

    report.check().map_err(CliError::from)?;
    println!("{} {done}", "OK".green().bold());
    Ok(())
}

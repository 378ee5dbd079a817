//! Config command: synchronize the CMS configuration with the sources

use colored::Colorize;

use decapta_core::{ConfigOptions, ConfigRun, pipeline};
use decapta_fs::{NormalizedPath, SourceFormat};

use crate::cli::ConfigArgs;
use crate::error::Result;

pub fn run_config(format: SourceFormat, args: ConfigArgs) -> Result<()> {
    let mut options = ConfigOptions::new(NormalizedPath::new(&args.input));
    options.output_file = NormalizedPath::new(&args.output_file);
    options.template_file = args.template_file.as_deref().map(NormalizedPath::new);
    options.content_dir = NormalizedPath::new(&args.content_dir);
    options.ignore_files = args.ignore_files;
    options.dry_run = args.dry_run;

    println!(
        "{} Synchronizing {} with {} files in {}",
        "=>".blue().bold(),
        options.output_file,
        format.to_string().cyan(),
        options.input
    );

    let run = pipeline::generate_config(format, &options)?;
    print_summary(&run);

    if !run.written {
        if run.outcome.is_unchanged() {
            println!("{} Configuration is up to date.", "OK".green().bold());
        } else {
            println!("{} Dry run, nothing written:", "DRY RUN".yellow().bold());
            print!("{}", run.outcome.diff());
        }
        return super::finish(&run.report, "Dry run complete.");
    }

    super::finish(&run.report, &format!("Wrote {}.", options.output_file))
}

fn print_summary(run: &ConfigRun) {
    let summary = &run.outcome.summary;
    for name in &summary.added {
        println!("   {} {} (added)", "+".green(), name.cyan());
    }
    for name in &summary.updated {
        println!("   {} {} (updated)", "~".yellow(), name.cyan());
    }
    for name in &summary.unchanged {
        println!("   {} {} (unchanged)", "=".dimmed(), name.cyan());
    }
}

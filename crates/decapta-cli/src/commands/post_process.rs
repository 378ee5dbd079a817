//! Post-process command: per-entity documents back to sources

use colored::Colorize;

use decapta_core::{PostProcessOptions, pipeline};
use decapta_fs::{NormalizedPath, SourceFormat};

use crate::cli::PostProcessArgs;
use crate::error::Result;

pub fn run_post_process(format: SourceFormat, args: PostProcessArgs) -> Result<()> {
    let mut options = PostProcessOptions::new(NormalizedPath::new(&args.output));
    options.content_dir = NormalizedPath::new(&args.content_dir);

    println!(
        "{} Rebuilding {} files from {} into {}",
        "=>".blue().bold(),
        format.to_string().cyan(),
        options.content_dir,
        options.output
    );

    let report = pipeline::post_process(format, &options)?;
    super::finish(&report, "Source files written.")
}

//! Pre-process command: sources to per-entity documents

use colored::Colorize;

use decapta_core::{PreProcessOptions, pipeline};
use decapta_fs::{NormalizedPath, SourceFormat};

use crate::cli::PreProcessArgs;
use crate::error::Result;

pub fn run_pre_process(format: SourceFormat, args: PreProcessArgs) -> Result<()> {
    let mut options = PreProcessOptions::new(NormalizedPath::new(&args.input));
    options.content_dir = NormalizedPath::new(&args.content_dir);
    options.slug_fields = args.slug;
    options.ignore_files = args.ignore_files;

    println!(
        "{} Splitting {} files in {} into {}",
        "=>".blue().bold(),
        format.to_string().cyan(),
        options.input,
        options.content_dir
    );

    let report = pipeline::pre_process(format, &options)?;
    super::finish(&report, "Content documents written.")
}

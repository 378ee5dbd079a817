//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use decapta_core::options::{DEFAULT_CONFIG_FILE, DEFAULT_CONTENT_DIR};
use decapta_fs::SourceFormat;

use crate::error::{CliError, Result};

/// decapta - Prepare CSV and ARB data for Decap CMS and bring edits back
#[derive(Parser, Debug)]
#[command(name = "decapta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Type of the source data
    #[arg(short = 't', long = "type", value_enum, global = true)]
    pub data_type: Option<DataType>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The source format selected with `--type`.
    pub fn source_format(&self) -> Result<SourceFormat> {
        self.data_type
            .map(SourceFormat::from)
            .ok_or_else(|| CliError::user("missing --type (expected one of: arb, csv)"))
    }
}

/// Supported source data types
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Flutter/ARB translation bundles
    Arb,
    /// CSV tables with a header row
    Csv,
}

impl From<DataType> for SourceFormat {
    fn from(value: DataType) -> Self {
        match value {
            DataType::Arb => SourceFormat::Arb,
            DataType::Csv => SourceFormat::Csv,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Split source files into one YAML document per entity
    ///
    /// Examples:
    ///   decapta pre-process -t csv -i data --slug name
    ///   decapta pre-process -t arb -i lib/l10n --content-dir content/i18n
    PreProcess(PreProcessArgs),

    /// Rebuild source files from the per-entity documents
    ///
    /// Examples:
    ///   decapta post-process -t csv -o data
    ///   decapta post-process -t arb -o lib/l10n --content-dir content/i18n
    PostProcess(PostProcessArgs),

    /// Generate or update the Decap CMS config.yml
    ///
    /// Existing collections only ever gain attributes; comments and manual
    /// edits are kept.
    ///
    /// Examples:
    ///   decapta config -t csv -i data
    ///   decapta config -t arb -i lib/l10n --dry-run
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PreProcessArgs {
    /// Directory holding the source files
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// Directory receiving the per-entity documents
    #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
    pub content_dir: PathBuf,

    /// Comma-separated fields joined into each record's slug
    #[arg(long, value_delimiter = ',')]
    pub slug: Vec<String>,

    /// Comma-separated source file names to skip
    #[arg(long, value_delimiter = ',')]
    pub ignore_files: Vec<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PostProcessArgs {
    /// Directory holding the per-entity documents
    #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
    pub content_dir: PathBuf,

    /// Directory receiving the rebuilt source files
    #[arg(short, long = "out")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Directory holding the source files
    #[arg(short, long = "in")]
    pub input: PathBuf,

    /// Configuration file to create or update
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output_file: PathBuf,

    /// Template for a new configuration file (embedded template if absent)
    #[arg(long)]
    pub template_file: Option<PathBuf>,

    /// Directory the collections point at
    #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
    pub content_dir: PathBuf,

    /// Comma-separated source file names to skip
    #[arg(long, value_delimiter = ',')]
    pub ignore_files: Vec<String>,

    /// Print the changes without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_pre_process() {
        let cli = Cli::parse_from(["decapta", "pre-process", "-t", "csv", "-i", "data", "--slug", "a,b"]);
        assert_eq!(cli.data_type, Some(DataType::Csv));
        match cli.command {
            Commands::PreProcess(args) => {
                assert_eq!(args.input, PathBuf::from("data"));
                assert_eq!(args.content_dir, PathBuf::from("content"));
                assert_eq!(args.slug, vec!["a", "b"]);
                assert!(args.ignore_files.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_type_after_subcommand_args() {
        let cli = Cli::parse_from(["decapta", "post-process", "-o", "out", "--type", "arb", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.source_format().unwrap(), SourceFormat::Arb);
    }

    #[test]
    fn parse_config_defaults() {
        let cli = Cli::parse_from(["decapta", "config", "-i", "data"]);
        assert!(cli.source_format().is_err());
        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.output_file, PathBuf::from("admin/config.yml"));
                assert_eq!(args.template_file, None);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reject_unknown_type() {
        assert!(Cli::try_parse_from(["decapta", "config", "-t", "xml", "-i", "data"]).is_err());
    }

    #[test]
    fn require_subcommand() {
        assert!(Cli::try_parse_from(["decapta", "-t", "csv"]).is_err());
    }
}

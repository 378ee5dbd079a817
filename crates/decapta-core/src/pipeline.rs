//! Entry points dispatching on the source format

use decapta_content::OrderedDocument;
use decapta_fs::{NormalizedPath, SourceFormat, io};

use crate::codec::tabular::Table;
use crate::codec::{list_sources, tabular, translation};
use crate::options::{ConfigOptions, PostProcessOptions, PreProcessOptions};
use crate::report::BatchReport;
use crate::schema::{Collection, describe_bundle, describe_table};
use crate::sync::{ConfigSync, SyncOutcome};
use crate::{Error, Result};

/// Convert every source of `format` into per-entity documents.
pub fn pre_process(format: SourceFormat, options: &PreProcessOptions) -> Result<BatchReport> {
    tracing::debug!(%format, input = %options.input, content = %options.content_dir, "pre-process");
    match format {
        SourceFormat::Csv => tabular::pre_process(options),
        SourceFormat::Arb => translation::pre_process(options),
    }
}

/// Convert per-entity documents back into sources of `format`.
pub fn post_process(format: SourceFormat, options: &PostProcessOptions) -> Result<BatchReport> {
    tracing::debug!(%format, content = %options.content_dir, output = %options.output, "post-process");
    match format {
        SourceFormat::Csv => tabular::post_process(options),
        SourceFormat::Arb => translation::post_process(options),
    }
}

/// Build one collection descriptor per source of `format`.
///
/// Sources that fail to parse are recorded in the report and skipped.
pub fn describe_sources(format: SourceFormat, options: &ConfigOptions) -> Result<(Vec<Collection>, BatchReport)> {
    let mut report = BatchReport::new();
    let mut collections = Vec::new();

    for entry in list_sources(&options.input, format, &options.ignore_files)? {
        let described = match format {
            SourceFormat::Csv => describe_table_source(&entry.path, &entry.name, options),
            SourceFormat::Arb => match translation::language_of(&entry.name) {
                Some(language) => describe_bundle_source(&entry.path, language, options).map(Some),
                None => {
                    report.warn(format!("Skipping {}: no language code in file name", entry.name));
                    continue;
                }
            },
        };
        match report.record(&entry.name, described) {
            Some(Some(collection)) => {
                report.action(format!("{} -> collection {}", entry.name, collection.name));
                collections.push(collection);
            }
            Some(None) => report.warn(format!("Skipping empty table {}", entry.name)),
            None => {}
        }
    }

    Ok((collections, report))
}

fn describe_table_source(path: &NormalizedPath, file_name: &str, options: &ConfigOptions) -> Result<Option<Collection>> {
    let Some(source_name) = SourceFormat::Csv.strip_extension(file_name) else {
        return Ok(None);
    };
    let table = Table::parse(&io::read_bytes(path)?, path)?;
    Ok(table.map(|table| describe_table(&table, source_name, &options.content_dir, &options.naming)))
}

fn describe_bundle_source(path: &NormalizedPath, language: &str, options: &ConfigOptions) -> Result<Collection> {
    let bundle = OrderedDocument::parse(&io::read_bytes(path)?).map_err(|e| Error::parse(path, "ARB", e))?;
    Ok(describe_bundle(&bundle, language, &options.content_dir))
}

/// Result of a configuration run.
#[derive(Debug)]
pub struct ConfigRun {
    pub outcome: SyncOutcome,
    pub report: BatchReport,
    /// Whether files were written
    pub written: bool,
}

/// Describe the sources and merge them into the configuration document.
///
/// Nothing is written with `options.dry_run`.
pub fn generate_config(format: SourceFormat, options: &ConfigOptions) -> Result<ConfigRun> {
    let (collections, report) = describe_sources(format, options)?;

    let mut sync = ConfigSync::new(options.output_file.clone());
    if let Some(template) = &options.template_file {
        sync = sync.with_template_file(template)?;
    }

    let outcome = sync.render(&collections)?;
    let written = !options.dry_run;
    if written {
        sync.write(&outcome)?;
    }

    Ok(ConfigRun {
        outcome,
        report,
        written,
    })
}

//! Tabular sources: one per-entity document per CSV row
//!
//! Forward conversion writes `<content>/<source>/<n>.yaml` (1-based) plus
//! the column order record; reverse conversion reads them back into
//! `<out>/<source>.csv`.

use std::collections::BTreeSet;

use serde_yaml::{Mapping, Value};

use decapta_fs::{DirEntry, NormalizedPath, SourceFormat, constants, io};

use super::sidecar::ColumnOrder;
use crate::naming::{Naming, scalar_text};
use crate::options::{PostProcessOptions, PreProcessOptions};
use crate::report::BatchReport;
use crate::{Error, Result};

/// A header row and its data rows, all of the header's width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV text. Returns `None` for a file without a header row.
    ///
    /// # Errors
    ///
    /// Fails on malformed CSV and on rows whose width differs from the header.
    pub fn parse(bytes: &[u8], path: &NormalizedPath) -> Result<Option<Self>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(bytes);
        let mut records = reader.records();

        let headers = match records.next() {
            None => return Ok(None),
            Some(record) => record.map_err(|e| Error::parse(path, "CSV", e))?,
        };
        let rows = records
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(|e| Error::parse(path, "CSV", e))
            })
            .collect::<Result<Vec<Vec<String>>>>()?;

        Ok(Some(Self {
            headers: headers.iter().map(str::to_string).collect(),
            rows,
        }))
    }

    /// Render as CSV, header row first.
    pub fn to_csv(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let io_error = |e: std::io::Error| Error::from(decapta_fs::Error::io(path.to_native(), e));
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.headers)
            .map_err(|e| io_error(e.into()))?;
        for row in &self.rows {
            writer.write_record(row).map_err(|e| io_error(e.into()))?;
        }
        writer.into_inner().map_err(|e| io_error(e.into_error()))
    }

    /// Values of column `index` across all rows.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(String::as_str))
    }
}

/// Per-entity documents of one table and its column order record.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedTable {
    pub order: ColumnOrder,
    pub records: Vec<Mapping>,
}

/// Build the per-entity documents of a table.
///
/// Fields appear in column order under their stored names; the identifier
/// field is appended unless it is a column itself.
pub fn encode_table(
    table: &Table,
    path: &NormalizedPath,
    naming: &Naming,
    slug_fields: &[String],
) -> Result<EncodedTable> {
    let mut columns: Vec<String> = Vec::with_capacity(table.headers.len());
    for header in &table.headers {
        if !naming.is_reserved(header) && naming.is_alias(header) {
            return Err(Error::ReservedNameCollision {
                path: path.to_native(),
                column: header.clone(),
            });
        }
        let stored = naming.prefix(header).into_owned();
        if columns.contains(&stored) {
            return Err(Error::schema_mismatch(path, format!("duplicate column '{header}'")));
        }
        columns.push(stored);
    }

    let identifier_is_column = columns.contains(&naming.identifier_field);
    let slug_fields = naming.slug_fields(slug_fields);

    let records = table
        .rows
        .iter()
        .map(|row| {
            let mut record: Mapping = columns
                .iter()
                .zip(row)
                .map(|(column, value)| (Value::String(column.clone()), Value::String(value.clone())))
                .collect();
            if !identifier_is_column {
                let identifier = naming.identifier(&record, slug_fields);
                record.insert(
                    Value::String(naming.identifier_field.clone()),
                    Value::String(identifier),
                );
            }
            record
        })
        .collect();

    Ok(EncodedTable {
        order: ColumnOrder::new(columns),
        records,
    })
}

/// Rebuild a table from per-entity documents, in the given order.
///
/// # Errors
///
/// - [`Error::SchemaMismatch`] when a record's fields, minus the identifier,
///   differ from the column order record
/// - [`Error::MalformedRecord`] when a field holds a collection
pub fn decode_records(
    order: &ColumnOrder,
    records: &[(NormalizedPath, Mapping)],
    naming: &Naming,
) -> Result<Table> {
    let expected: BTreeSet<&str> = order.columns.iter().map(String::as_str).collect();
    let strip_identifier = !order.contains(&naming.identifier_field);

    let mut rows = Vec::with_capacity(records.len());
    for (path, record) in records {
        let mut fields = BTreeSet::new();
        for key in record.keys() {
            let Some(key) = key.as_str() else {
                return Err(Error::malformed_record(path, "field names must be strings"));
            };
            if !(strip_identifier && key == naming.identifier_field) {
                fields.insert(key);
            }
        }
        if fields != expected {
            let missing: Vec<&str> = expected.difference(&fields).copied().collect();
            let unexpected: Vec<&str> = fields.difference(&expected).copied().collect();
            return Err(Error::schema_mismatch(
                path,
                format!(
                    "expected {} field(s), found {} (missing: [{}], unexpected: [{}])",
                    expected.len(),
                    fields.len(),
                    missing.join(", "),
                    unexpected.join(", ")
                ),
            ));
        }

        let row = order
            .columns
            .iter()
            .map(|column| match record.get(column.as_str()) {
                Some(Value::Sequence(_) | Value::Mapping(_)) => Err(Error::malformed_record(
                    path,
                    format!("field '{column}' is not a scalar"),
                )),
                Some(value) => Ok(scalar_text(value)),
                None => Ok(String::new()),
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    Ok(Table {
        headers: order
            .columns
            .iter()
            .map(|column| naming.unprefix(column).into_owned())
            .collect(),
        rows,
    })
}

/// Numeric file stems first by value; other stems sort as -1. Ties fall
/// back to the file name.
fn record_sort_key(entry: &DirEntry) -> (i64, String) {
    (entry.stem().parse().unwrap_or(-1), entry.name.clone())
}

/// Convert every table in `options.input` into per-entity documents.
pub fn pre_process(options: &PreProcessOptions) -> Result<BatchReport> {
    let mut report = BatchReport::new();
    for entry in super::list_sources(&options.input, SourceFormat::Csv, &options.ignore_files)? {
        let Some(source_name) = SourceFormat::Csv.strip_extension(&entry.name) else {
            continue;
        };
        match report.record(&entry.name, convert_table(&entry.path, source_name, options)) {
            Some(Some((count, stale))) => {
                let target = options.content_dir.join(source_name);
                report.action(format!("{} -> {target} ({count} record(s))", entry.name));
                if stale > 0 {
                    report.warn(format!(
                        "{target} holds {stale} record file(s) beyond the {count} row(s) of {}; \
                         post-process will read them back",
                        entry.name
                    ));
                }
            }
            Some(None) => report.warn(format!("Skipping empty table {}", entry.name)),
            None => {}
        }
    }
    Ok(report)
}

/// Returns the number of records written and the number of record files
/// left over from a longer version of the table.
fn convert_table(
    path: &NormalizedPath,
    source_name: &str,
    options: &PreProcessOptions,
) -> Result<Option<(usize, usize)>> {
    let Some(table) = Table::parse(&io::read_bytes(path)?, path)? else {
        return Ok(None);
    };
    let encoded = encode_table(&table, path, &options.naming, &options.slug_fields)?;

    let target = options.content_dir.join(source_name);
    io::create_dir_all(&target)?;
    for (index, record) in encoded.records.iter().enumerate() {
        let file = target.join(&constants::content_file_name(&(index + 1).to_string()));
        let text = serde_yaml::to_string(record).map_err(decapta_content::Error::from)?;
        io::write_text(&file, &text)?;
    }
    encoded.order.store(&options.content_dir, source_name)?;

    let count = encoded.records.len();
    let stale = io::list_dir(&target)?
        .iter()
        .filter(|file| !file.is_dir && !file.is_hidden() && constants::is_content_file(&file.name))
        .filter(|file| !file.stem().parse::<usize>().is_ok_and(|n| (1..=count).contains(&n)))
        .count();

    tracing::info!(source = source_name, records = count, stale, "pre-processed table");
    Ok(Some((count, stale)))
}

/// Rebuild one CSV file per source directory under `options.content_dir`.
pub fn post_process(options: &PostProcessOptions) -> Result<BatchReport> {
    let mut report = BatchReport::new();
    let entries = io::list_dir(&options.content_dir)?;
    io::create_dir_all(&options.output)?;

    for entry in entries {
        if !entry.is_dir || entry.is_hidden() {
            continue;
        }
        if let Some((target, count)) = report.record(&entry.name, restore_table(&entry, options)) {
            report.action(format!("{}/ -> {target} ({count} row(s))", entry.path));
        }
    }
    Ok(report)
}

fn restore_table(dir: &DirEntry, options: &PostProcessOptions) -> Result<(NormalizedPath, usize)> {
    let order = ColumnOrder::load(&options.content_dir, &dir.name)?;

    let mut files: Vec<DirEntry> = io::list_dir(&dir.path)?
        .into_iter()
        .filter(|file| !file.is_dir && !file.is_hidden() && constants::is_content_file(&file.name))
        .collect();
    files.sort_by_cached_key(record_sort_key);

    let mut records = Vec::with_capacity(files.len());
    for file in files {
        let text = io::read_text(&file.path)?;
        let value: Value = serde_yaml::from_str(&text).map_err(|e| Error::parse(&file.path, "YAML", e))?;
        let Value::Mapping(record) = value else {
            return Err(Error::malformed_record(&file.path, "top level is not a mapping"));
        };
        records.push((file.path, record));
    }

    let table = decode_records(&order, &records, &options.naming)?;
    let target = options
        .output
        .join(&format!("{}.{}", dir.name, SourceFormat::Csv.extension()));
    io::write_atomic(&target, &table.to_csv(&target)?)?;

    tracing::info!(source = %dir.name, rows = table.rows.len(), "post-processed table");
    Ok((target, table.rows.len()))
}

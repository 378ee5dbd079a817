//! Record codecs
//!
//! - [`tabular`]: CSV tables to one document per row, and back
//! - [`translation`]: ARB bundles to one document per language, and back
//! - [`sidecar`]: the column order record kept beside tabular content

pub mod sidecar;
pub mod tabular;
pub mod translation;

use decapta_fs::{DirEntry, NormalizedPath, SourceFormat, io};

use crate::Result;

/// Source files of `format` directly inside `dir`, sorted by name.
pub(crate) fn list_sources(dir: &NormalizedPath, format: SourceFormat, ignore: &[String]) -> Result<Vec<DirEntry>> {
    Ok(io::list_dir(dir)?
        .into_iter()
        .filter(|entry| !entry.is_dir && format.matches(&entry.name))
        .filter(|entry| {
            let ignored = ignore.iter().any(|name| name == &entry.name);
            if ignored {
                tracing::debug!(file = %entry.name, "ignoring source");
            }
            !ignored
        })
        .collect())
}

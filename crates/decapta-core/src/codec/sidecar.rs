//! Column order record of a tabular source
//!
//! Per-entity documents are keyed mappings, so the original column order of
//! a table is persisted next to them as `<content>/.<source>.yaml`.

use serde::{Deserialize, Serialize};

use decapta_fs::{NormalizedPath, constants, io};

use crate::{Error, Result};

/// Ordered list of stored field names for one tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOrder {
    pub columns: Vec<String>,
}

impl ColumnOrder {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Location of the record for `source_name` under `content_dir`.
    pub fn path(content_dir: &NormalizedPath, source_name: &str) -> NormalizedPath {
        content_dir.join(&constants::column_order_file_name(source_name))
    }

    /// Load the record for `source_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSidecar`] when the record does not exist.
    pub fn load(content_dir: &NormalizedPath, source_name: &str) -> Result<Self> {
        let path = Self::path(content_dir, source_name);
        if !path.is_file() {
            return Err(Error::MissingSidecar {
                source_name: source_name.to_string(),
                path: path.to_native(),
            });
        }
        let text = io::read_text(&path)?;
        serde_yaml::from_str(&text).map_err(|e| Error::parse(&path, "YAML", e))
    }

    pub fn store(&self, content_dir: &NormalizedPath, source_name: &str) -> Result<NormalizedPath> {
        let path = Self::path(content_dir, source_name);
        let text = serde_yaml::to_string(self).map_err(|e| Error::parse(&path, "YAML", e))?;
        io::write_text(&path, &text)?;
        Ok(path)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let content = NormalizedPath::new(dir.path());
        let order = ColumnOrder::new(vec!["name".into(), "decapta_data".into()]);

        let path = order.store(&content, "people").unwrap();
        assert!(path.as_str().ends_with("/.people.yaml"));
        assert_eq!(
            io::read_text(&path).unwrap(),
            "columns:\n- name\n- decapta_data\n"
        );
        assert_eq!(ColumnOrder::load(&content, "people").unwrap(), order);
    }

    #[test]
    fn test_missing_record() {
        let dir = TempDir::new().unwrap();
        let content = NormalizedPath::new(dir.path());
        let err = ColumnOrder::load(&content, "people").unwrap_err();
        assert!(matches!(err, Error::MissingSidecar { ref source_name, .. } if source_name == "people"));
    }
}

//! Run options for the pipeline operations

use decapta_fs::NormalizedPath;

use crate::naming::Naming;

/// Default directory for per-entity documents.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Default location of the generated configuration document.
pub const DEFAULT_CONFIG_FILE: &str = "admin/config.yml";

/// Options for converting sources into per-entity documents.
#[derive(Debug, Clone)]
pub struct PreProcessOptions {
    /// Directory holding the source files
    pub input: NormalizedPath,
    pub content_dir: NormalizedPath,
    /// Fields joined into the record identifier (tabular only)
    pub slug_fields: Vec<String>,
    /// Source file names to skip
    pub ignore_files: Vec<String>,
    pub naming: Naming,
}

impl PreProcessOptions {
    pub fn new(input: NormalizedPath) -> Self {
        Self {
            input,
            content_dir: NormalizedPath::new(DEFAULT_CONTENT_DIR),
            slug_fields: Vec::new(),
            ignore_files: Vec::new(),
            naming: Naming::default(),
        }
    }
}

/// Options for converting per-entity documents back into sources.
#[derive(Debug, Clone)]
pub struct PostProcessOptions {
    pub content_dir: NormalizedPath,
    /// Directory receiving the rebuilt source files
    pub output: NormalizedPath,
    pub naming: Naming,
}

impl PostProcessOptions {
    pub fn new(output: NormalizedPath) -> Self {
        Self {
            content_dir: NormalizedPath::new(DEFAULT_CONTENT_DIR),
            output,
            naming: Naming::default(),
        }
    }
}

/// Options for synchronizing the configuration document.
#[derive(Debug, Clone)]
pub struct ConfigOptions {
    /// Directory holding the source files
    pub input: NormalizedPath,
    pub output_file: NormalizedPath,
    /// Used only when `output_file` does not exist yet; the embedded
    /// template otherwise
    pub template_file: Option<NormalizedPath>,
    pub content_dir: NormalizedPath,
    pub ignore_files: Vec<String>,
    pub naming: Naming,
    /// Compute the result without writing anything
    pub dry_run: bool,
}

impl ConfigOptions {
    pub fn new(input: NormalizedPath) -> Self {
        Self {
            input,
            output_file: NormalizedPath::new(DEFAULT_CONFIG_FILE),
            template_file: None,
            content_dir: NormalizedPath::new(DEFAULT_CONTENT_DIR),
            ignore_files: Vec::new(),
            naming: Naming::default(),
            dry_run: false,
        }
    }
}

//! File-naming conventions shared by the codecs.

use std::fmt;

/// Extension of every per-entity content document.
pub const CONTENT_EXTENSION: &str = "yaml";

/// Literal prefix of re-emitted translation bundles (`app_<lang>.arb`).
pub const BUNDLE_OUTPUT_PREFIX: &str = "app_";

/// Static asset written next to the configuration document.
pub const INDEX_HTML: &str = "index.html";

/// Structured source formats understood by the codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Application Resource Bundle translation files (`*.arb`)
    Arb,
    /// Delimited tables with a header row (`*.csv`)
    Csv,
}

impl SourceFormat {
    /// File extension of source files in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Arb => "arb",
            Self::Csv => "csv",
        }
    }

    /// Whether `file_name` carries this format's extension.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension())
            .is_some_and(|rest| rest.ends_with('.') && rest.len() > 1)
    }

    /// The file name with this format's extension removed.
    pub fn strip_extension<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.extension())
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// File name of a content document for `stem`.
pub fn content_file_name(stem: &str) -> String {
    format!("{stem}.{CONTENT_EXTENSION}")
}

/// File name of the hidden column-order record for a tabular source.
pub fn column_order_file_name(source_name: &str) -> String {
    format!(".{source_name}.{CONTENT_EXTENSION}")
}

/// Whether `file_name` is a content document.
pub fn is_content_file(file_name: &str) -> bool {
    file_name
        .strip_suffix(CONTENT_EXTENSION)
        .is_some_and(|rest| rest.ends_with('.'))
}

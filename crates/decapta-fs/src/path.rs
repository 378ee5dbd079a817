//! Forward-slash paths
//!
//! Collection folders and file paths are written into `config.yml`, so
//! they always use `/` no matter which platform produced them.

use std::fmt;
use std::path::{Path, PathBuf};

/// A path stored with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    text: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            text: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The path in the form the standard library expects.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.text)
    }

    /// Append `segment`. An empty base yields the segment alone.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let text = match self.text.as_str() {
            "" => segment,
            base if base.ends_with('/') => format!("{base}{segment}"),
            base => format!("{base}/{segment}"),
        };
        Self { text }
    }

    /// Everything before the last component; `None` for a bare name.
    pub fn parent(&self) -> Option<Self> {
        let text = self.text.trim_end_matches('/');
        let (head, _) = text.rsplit_once('/')?;
        let head = if head.is_empty() { "/" } else { head };
        Some(Self { text: head.to_string() })
    }

    /// Last component, ignoring trailing separators.
    pub fn file_name(&self) -> Option<&str> {
        self.text
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.text)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for NormalizedPath {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

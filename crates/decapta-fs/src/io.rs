//! Whole-file I/O and directory listing

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Replace the file at `path` with `content`.
///
/// The bytes go to a locked temp file beside the target, which is then
/// renamed over it, so readers see the old file or the new one. Parent
/// directories are created as needed. The temp file is removed when any
/// step fails.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    if let Some(parent) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file_name = target.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    let staging = target.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()));

    let staged = fill_locked(&staging, &target, content)
        .and_then(|()| fs::rename(&staging, &target).map_err(|e| Error::io(&target, e)));
    if let Err(err) = staged {
        if let Err(cleanup) = fs::remove_file(&staging)
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %staging.display(), error = %cleanup, "could not remove temp file");
        }
        return Err(err);
    }

    tracing::debug!(path = %path, bytes = content.len(), "wrote file");
    Ok(())
}

/// Write and flush `content` into `staging` under an exclusive lock.
fn fill_locked(staging: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(staging)
        .map_err(|e| Error::io(staging, e))?;
    file.lock_exclusive().map_err(|_| lock_failed())?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(staging, e))?;
    file.unlock().map_err(|_| lock_failed())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// A single directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name without any directory component
    pub name: String,
    /// Full path of the entry
    pub path: NormalizedPath,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl DirEntry {
    /// Hidden entries follow the dotfile convention.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// The file name with its last extension removed.
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 => &self.name[..idx],
            _ => &self.name,
        }
    }
}

/// List a directory, sorted by file name.
///
/// Entries whose names are not valid UTF-8 are skipped.
pub fn list_dir(path: &NormalizedPath) -> Result<Vec<DirEntry>> {
    let native_path = path.to_native();
    let reader = fs::read_dir(&native_path).map_err(|e| Error::io(&native_path, e))?;

    let mut entries = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|e| Error::io(&native_path, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(dir = %path, "skipping entry with non UTF-8 name");
            continue;
        };
        let is_dir = entry
            .file_type()
            .map_err(|e| Error::io(entry.path(), e))?
            .is_dir();
        entries.push(DirEntry {
            path: path.join(&name),
            name,
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Create a directory and all of its parents.
pub fn create_dir_all(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))
}

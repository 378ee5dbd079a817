//! Filesystem plumbing for decapta
//!
//! Provides forward-slash normalized paths, whole-file I/O and the
//! file-naming conventions shared by the codecs.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use constants::SourceFormat;
pub use error::{Error, Result};
pub use io::DirEntry;
pub use path::NormalizedPath;

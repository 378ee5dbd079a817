//! Content documents for decapta
//!
//! Two document models live here:
//!
//! - [`OrderedDocument`]: a JSON object that remembers the order its keys
//!   were read in, used for translation bundles whose key order is part of
//!   the file's meaning.
//! - [`YamlDocument`]: a mutable YAML node tree that keeps comments and
//!   formatting choices of hand-edited configuration files across a
//!   rewrite.

pub mod error;
pub mod ordered;
pub mod yaml;

pub use error::{Error, Result};
pub use ordered::{OrderedDocument, OrderedEntry};
pub use yaml::{Comments, Entry, Node, NodeKind, Scalar, YamlDocument};

//! Comment-preserving YAML documents
//!
//! `serde_yaml` drops comments and quoting when it decodes, so documents that
//! are edited in place (the CMS configuration) go through this node tree
//! instead. Parsing and re-emitting an untouched document reproduces its
//! comments, key order, scalar styles and flow collections; new nodes are
//! encoded with `serde_yaml` quoting rules.
//!
//! Supported subset: a single document of block mappings and sequences with
//! plain, quoted, block and flow scalars. Quoted scalars may span lines and
//! are kept as written. Explicit `? key` entries are rejected, as are block
//! scalars with an indentation indicator that do not follow a key or `-`.

mod emit;
mod node;
mod parse;

use std::fmt;
use std::str::FromStr;

pub use node::{Comments, Entry, Node, NodeKind, Scalar};

use crate::error::{Error, Result};

/// A parsed YAML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlDocument {
    /// Comments before an explicit `---` marker.
    pub leading: Vec<String>,
    pub explicit_start: bool,
    pub root: Node,
    /// Comments after the last node.
    pub trailing: Vec<String>,
}

impl YamlDocument {
    pub fn parse(source: &str) -> Result<Self> {
        parse::parse_document(source)
    }

    pub fn from_root(root: Node) -> Self {
        Self {
            leading: Vec::new(),
            explicit_start: false,
            root,
            trailing: Vec::new(),
        }
    }

    pub fn to_yaml_string(&self) -> String {
        emit::emit_document(self)
    }
}

impl Default for YamlDocument {
    fn default() -> Self {
        Self::from_root(Node::mapping(Vec::new()))
    }
}

impl FromStr for YamlDocument {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        Self::parse(source)
    }
}

impl fmt::Display for YamlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_yaml_string())
    }
}

//! Naming policy shared by the codecs and the schema builder
//!
//! Some column names collide with the vocabulary of the content documents
//! (`data` is reserved by Decap). Those are stored under a prefixed alias
//! and restored on the way back out. The policy is a plain value passed to
//! every call, so tests can vary it.

use std::borrow::Cow;
use std::collections::BTreeSet;

use serde_yaml::{Mapping, Value};

/// Reserved names, alias prefix and identifier settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Names stored under an alias
    pub reserved: BTreeSet<String>,
    /// Prefix that turns a reserved name into its alias
    pub alias_prefix: String,
    /// Field holding the synthesized record identifier
    pub identifier_field: String,
    /// Joins slug field values into an identifier
    pub separator: String,
    /// Slug fields used when none are configured
    pub default_slug_fields: Vec<String>,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            reserved: BTreeSet::from(["data".to_string()]),
            alias_prefix: "decapta_".to_string(),
            identifier_field: "slug".to_string(),
            separator: "-".to_string(),
            default_slug_fields: vec!["slug".to_string()],
        }
    }
}

impl Naming {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Stored name of a field: the alias for reserved names, else unchanged.
    pub fn prefix<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.is_reserved(name) {
            Cow::Owned(format!("{}{name}", self.alias_prefix))
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Original name of a stored field. Inverse of [`Naming::prefix`].
    pub fn unprefix<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match name.strip_prefix(self.alias_prefix.as_str()) {
            Some(original) if self.is_reserved(original) => Cow::Borrowed(original),
            _ => Cow::Borrowed(name),
        }
    }

    /// Whether `name` is the alias of some reserved name.
    pub fn is_alias(&self, name: &str) -> bool {
        name.strip_prefix(self.alias_prefix.as_str())
            .is_some_and(|original| self.is_reserved(original))
    }

    /// Slug fields to use, falling back to the defaults when none are given.
    pub fn slug_fields<'a>(&'a self, configured: &'a [String]) -> &'a [String] {
        if configured.is_empty() {
            &self.default_slug_fields
        } else {
            configured
        }
    }

    /// Identifier of a record: the string forms of the slug fields' values,
    /// looked up by their stored names and joined with the separator.
    /// Missing fields are skipped.
    pub fn identifier(&self, record: &Mapping, slug_fields: &[String]) -> String {
        slug_fields
            .iter()
            .filter_map(|field| record.get(&*self.prefix(field)))
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Text of a scalar the way it is written in a table cell.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

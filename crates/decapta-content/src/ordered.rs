//! Insertion-ordered JSON documents
//!
//! Translation bundles carry meaning in the order of their keys, and a
//! primary key is followed by its `@key` companion. Decoding into a plain
//! map would lose both, so the top level is read through a streaming map
//! visitor that appends entries exactly as they appear.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::Result;

/// One key/value pair of an [`OrderedDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEntry {
    pub key: String,
    pub value: Value,
}

/// A JSON object whose serialization order equals its construction order.
///
/// Keys are not required to be unique; [`OrderedDocument::get`] returns the
/// first match. Lookups are linear, which is fine for bundles of a few
/// hundred keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedDocument {
    entries: Vec<OrderedEntry>,
}

impl OrderedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object, keeping its key order.
    pub fn parse(source: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(source)?)
    }

    /// Render as pretty JSON with two-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Append an entry at the end.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push(OrderedEntry {
            key: key.into(),
            value,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderedEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrderedDocument {
    type Item = &'a OrderedEntry;
    type IntoIter = std::slice::Iter<'a, OrderedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for OrderedDocument {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut document = Self::new();
        for (key, value) in iter {
            document.push(key, value);
        }
        document
    }
}

impl Serialize for OrderedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderedDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedVisitor)
    }
}

struct OrderedVisitor;

impl<'de> Visitor<'de> for OrderedVisitor {
    type Value = OrderedDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut document = OrderedDocument::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            document.push(key, value);
        }
        Ok(document)
    }
}

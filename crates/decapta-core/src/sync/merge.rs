//! Add-only merge of collection descriptors into a configuration tree
//!
//! Existing collections are matched by storage identity and only ever
//! gain attributes. Values already present are never overwritten and
//! nothing is removed, so hand edits and comments survive and repeated
//! runs converge.

use std::borrow::Cow;

use decapta_content::{Entry, Node, NodeKind, YamlDocument};
use decapta_fs::NormalizedPath;

use crate::schema::{Collection, CollectionKey, storage_path};
use crate::{Error, Result};

/// Top-level key holding the collections sequence.
pub const COLLECTIONS_KEY: &str = "collections";

const NAME_KEY: &str = "name";
const FOLDER_KEY: &str = "folder";
const FILE_KEY: &str = "file";
const FIELDS_KEY: &str = "fields";
const FILES_KEY: &str = "files";
const EDITOR_KEY: &str = "editor";

/// Collection names by what the merge did with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
}

impl MergeSummary {
    /// Whether the document was left as it was.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }
}

/// Upsert `collections` into `document`.
///
/// `origin` names the document in errors.
///
/// # Errors
///
/// Returns [`Error::MalformedConfig`] when the root is not a mapping or
/// `collections` is not a sequence.
pub fn synchronize(
    document: &mut YamlDocument,
    collections: &[Collection],
    origin: &NormalizedPath,
) -> Result<MergeSummary> {
    let existing = collections_node(document, origin)?;
    let mut summary = MergeSummary::default();

    for collection in collections {
        let incoming = Node::from_serialize(collection)?;
        let key = collection.key();

        match existing.iter_mut().find(|node| matches_key(node, &key)) {
            Some(node) => {
                if merge_attributes(node, incoming)? {
                    tracing::debug!(collection = %collection.name, "updated collection");
                    summary.updated.push(collection.name.clone());
                } else {
                    summary.unchanged.push(collection.name.clone());
                }
            }
            None => {
                tracing::debug!(collection = %collection.name, "added collection");
                existing.push(incoming);
                summary.added.push(collection.name.clone());
            }
        }
    }

    Ok(summary)
}

/// The `collections` sequence, created when absent.
fn collections_node<'a>(document: &'a mut YamlDocument, origin: &NormalizedPath) -> Result<&'a mut Vec<Node>> {
    let root = &mut document.root;
    if root.is_null() {
        root.kind = NodeKind::Mapping(Vec::new());
    }
    let Some(entries) = root.as_mapping_mut() else {
        return Err(Error::malformed_config(origin, "top level is not a mapping"));
    };

    let index = match entries
        .iter()
        .position(|entry| entry.key.as_str().as_deref() == Some(COLLECTIONS_KEY))
    {
        Some(index) => index,
        None => {
            entries.push(Entry::new(COLLECTIONS_KEY, Node::sequence(Vec::new())));
            entries.len() - 1
        }
    };

    let node = &mut entries[index].value;
    if node.is_null() {
        node.kind = NodeKind::Sequence(Vec::new());
    }
    node.expand_flow()?;
    node.as_sequence_mut()
        .ok_or_else(|| Error::malformed_config(origin, "`collections` is not a sequence"))
}

fn matches_key(node: &Node, key: &CollectionKey) -> bool {
    match key {
        CollectionKey::Folder(folder) => node
            .get_str(FOLDER_KEY)
            .is_some_and(|existing| storage_path(&existing) == *folder),
        CollectionKey::Files(files) => item_strings(node.get(FILES_KEY), FILE_KEY)
            .iter()
            .any(|existing| files.contains(&storage_path(existing))),
    }
}

/// `key` of every item in a sequence node, block or flow.
fn item_strings(node: Option<&Node>, key: &str) -> Vec<String> {
    let Some(node) = node else {
        return Vec::new();
    };
    match node.as_sequence() {
        Some(items) => items.iter().filter_map(|item| item.get_str(key)).collect(),
        None => node
            .to_value()
            .ok()
            .and_then(|value| match value {
                serde_yaml::Value::Sequence(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default()
            .iter()
            .filter_map(|item| item.get(key)?.as_str().map(str::to_owned))
            .collect(),
    }
}

/// Add the attributes of `incoming` that `existing` lacks. `fields`,
/// `files` and `editor` are merged one level further.
fn merge_attributes(existing: &mut Node, incoming: Node) -> Result<bool> {
    existing.expand_flow()?;
    if existing.as_mapping().is_none() {
        return Ok(false);
    }
    let NodeKind::Mapping(incoming) = incoming.kind else {
        return Ok(false);
    };

    let mut changed = false;
    for entry in incoming {
        let key = entry.key.as_str().map(Cow::into_owned).unwrap_or_default();
        match existing.get_mut(&key) {
            None => changed |= existing.push_entry(entry),
            Some(current) => {
                changed |= match key.as_str() {
                    FIELDS_KEY => merge_named(current, entry.value, false)?,
                    FILES_KEY => merge_named(current, entry.value, true)?,
                    EDITOR_KEY => merge_missing_keys(current, entry.value)?,
                    _ => false,
                }
            }
        }
    }
    Ok(changed)
}

/// Append items of `incoming` whose `name` is not in `existing`. With
/// `recurse`, items with a matching name get an attribute merge.
fn merge_named(existing: &mut Node, incoming: Node, recurse: bool) -> Result<bool> {
    if existing.is_null() {
        existing.kind = NodeKind::Sequence(Vec::new());
    }
    existing.expand_flow()?;
    let (Some(items), NodeKind::Sequence(incoming)) = (existing.as_sequence_mut(), incoming.kind) else {
        return Ok(false);
    };

    let mut changed = false;
    for item in incoming {
        let Some(name) = item.get_str(NAME_KEY) else {
            continue;
        };
        match items
            .iter_mut()
            .find(|current| current.get_str(NAME_KEY).as_deref() == Some(name.as_str()))
        {
            Some(current) if recurse => changed |= merge_attributes(current, item)?,
            Some(_) => {}
            None => {
                items.push(item);
                changed = true;
            }
        }
    }
    Ok(changed)
}

fn merge_missing_keys(existing: &mut Node, incoming: Node) -> Result<bool> {
    if existing.is_null() {
        existing.kind = NodeKind::Mapping(Vec::new());
    }
    existing.expand_flow()?;
    let NodeKind::Mapping(incoming) = incoming.kind else {
        return Ok(false);
    };

    let mut changed = false;
    for entry in incoming {
        let present = entry
            .key
            .as_str()
            .is_some_and(|key| existing.contains_key(&key));
        if !present {
            changed |= existing.push_entry(entry);
        }
    }
    Ok(changed)
}

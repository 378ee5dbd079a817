//! Schema descriptors for the CMS configuration
//!
//! A [`Collection`] describes one data source the way Decap expects it in
//! `config.yml`. Optional attributes are skipped when empty so encoded
//! descriptors stay minimal.

mod builder;
mod widget;

pub use builder::{describe_bundle, describe_table, placeholder_hint};
pub use widget::{Widget, infer_widget, is_boolean, is_date};

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// One entry of the configuration's `collections` sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub create: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<Editor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<CollectionFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Collection {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Identity used to find this collection in an existing document.
    pub fn key(&self) -> CollectionKey {
        match &self.folder {
            Some(folder) => CollectionKey::Folder(storage_path(folder)),
            None => CollectionKey::Files(self.files.iter().map(|f| storage_path(&f.file)).collect()),
        }
    }
}

/// Canonical spelling of a content path: `.` and empty segments dropped,
/// so `./content//en.yaml` and `content/en.yaml` compare equal.
pub fn storage_path(path: &str) -> String {
    let joined = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");
    if path.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Storage identity of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionKey {
    /// Folder collection, trailing slashes removed
    Folder(String),
    /// File collection: the content files it edits
    Files(Vec<String>),
}

/// Editor pane settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
    pub preview: bool,
}

/// One file of a file collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionFile {
    pub name: String,
    pub label: String,
    pub file: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub name: String,
    pub widget: Widget,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl Field {
    pub fn new(label: impl Into<String>, name: impl Into<String>, widget: Widget) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            widget,
            modes: Vec::new(),
            fields: Vec::new(),
            collapsed: false,
            hint: None,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_attributes_are_skipped() {
        let field = Field::new("Title", "title", Widget::String);
        assert_eq!(
            serde_yaml::to_string(&field).unwrap(),
            "label: Title\nname: title\nwidget: string\n"
        );
    }

    #[test]
    fn test_collection_key() {
        let mut folder = Collection::new("a", "A");
        folder.folder = Some("content/a/".into());
        assert_eq!(folder.key(), CollectionKey::Folder("content/a".into()));

        let mut files = Collection::new("b", "B");
        files.files.push(CollectionFile {
            file: "content/en.yaml".into(),
            ..CollectionFile::default()
        });
        assert_eq!(files.key(), CollectionKey::Files(vec!["content/en.yaml".into()]));
    }

    #[test]
    fn test_storage_path() {
        assert_eq!(storage_path("./content//en.yaml"), "content/en.yaml");
        assert_eq!(storage_path("content/people/"), "content/people");
        assert_eq!(storage_path("/static/data"), "/static/data");
    }
}

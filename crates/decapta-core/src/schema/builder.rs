//! Schema descriptors built from parsed sources

use serde_json::Value;

use decapta_content::OrderedDocument;
use decapta_fs::{NormalizedPath, constants};

use super::{Collection, CollectionFile, Editor, Field, Widget, infer_widget};
use crate::codec::tabular::Table;
use crate::codec::translation::is_metadata_key;
use crate::naming::Naming;

const IDENTIFIER_LABEL: &str = "Decapta ID";

/// Describe a tabular source as a folder collection.
pub fn describe_table(table: &Table, source_name: &str, content_dir: &NormalizedPath, naming: &Naming) -> Collection {
    let mut fields = Vec::with_capacity(table.headers.len() + 1);

    let identifier_is_column = table
        .headers
        .iter()
        .any(|header| naming.prefix(header) == naming.identifier_field.as_str());
    if !identifier_is_column {
        fields.push(Field::new(IDENTIFIER_LABEL, naming.identifier_field.as_str(), Widget::String).required());
    }

    for (index, header) in table.headers.iter().enumerate() {
        let name = naming.prefix(header).into_owned();
        let widget = infer_widget(table.column(index));
        let mut field = Field::new(header.as_str(), name, widget);
        if widget == Widget::Markdown {
            field.modes = vec!["raw".to_string()];
        }
        if field.name == naming.identifier_field {
            field.required = true;
        }
        fields.push(field);
    }

    Collection {
        folder: Some(content_dir.join(source_name).as_str().to_string()),
        create: true,
        slug: Some("{{slug}}".to_string()),
        identifier_field: Some(naming.identifier_field.clone()),
        format: Some(constants::CONTENT_EXTENSION.to_string()),
        extension: Some(constants::CONTENT_EXTENSION.to_string()),
        editor: Some(Editor { preview: false }),
        fields,
        ..Collection::new(format!("csv_{source_name}"), format!("CSV Data ({source_name})"))
    }
}

/// Describe a translation bundle as a single-file collection.
///
/// Each primary key becomes a collapsed object field around its `value`.
pub fn describe_bundle(bundle: &OrderedDocument, language: &str, content_dir: &NormalizedPath) -> Collection {
    let upper = language.to_uppercase();

    let fields = bundle
        .iter()
        .filter(|entry| !is_metadata_key(&entry.key))
        .map(|entry| {
            let multiline = entry.value.as_str().is_some_and(|text| text.contains('\n'));
            let value_widget = if multiline { Widget::Text } else { Widget::String };

            let mut field = Field::new(entry.key.replace('_', " "), entry.key.as_str(), Widget::Object);
            field.collapsed = true;
            field.fields = vec![Field::new("value", "value", value_widget)];
            field.hint = bundle
                .get(&format!("@{}", entry.key))
                .and_then(placeholder_hint);
            field
        })
        .collect();

    Collection {
        files: vec![CollectionFile {
            name: format!("translation_{language}"),
            label: format!("Translation ({upper})"),
            file: content_dir
                .join(&constants::content_file_name(language))
                .as_str()
                .to_string(),
            fields,
        }],
        ..Collection::new(format!("translations_{language}"), format!("Translations ({upper})"))
    }
}

/// `Placeholders: name (type: T, example: E), ...` from an `@key` entry,
/// in declaration order. Absent details read as `none`.
pub fn placeholder_hint(metadata: &Value) -> Option<String> {
    let placeholders = metadata.get("placeholders")?.as_object()?;
    let described: Vec<String> = placeholders
        .iter()
        .filter_map(|(name, details)| {
            let details = details.as_object()?;
            Some(format!(
                "{name} (type: {}, example: {})",
                detail_text(details.get("type")),
                detail_text(details.get("example"))
            ))
        })
        .collect();
    (!described.is_empty()).then(|| format!("Placeholders: {}", described.join(", ")))
}

fn detail_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

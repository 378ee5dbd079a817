//! Translation bundles: one per-entity document per language
//!
//! Each primary key of an ARB file becomes `{value, metadata?}` in
//! `<content>/<lang>.yaml`, where `metadata` is the companion `@key` entry.
//! Reverse conversion writes `<out>/app_<lang>.arb`, entries in the order
//! the content document currently lists them.

use serde_yaml::{Mapping, Value};

use decapta_content::OrderedDocument;
use decapta_fs::{NormalizedPath, SourceFormat, constants, io};

use crate::options::{PostProcessOptions, PreProcessOptions};
use crate::report::BatchReport;
use crate::{Error, Result};

const VALUE_KEY: &str = "value";
const METADATA_KEY: &str = "metadata";

/// Language token of a bundle file name: the part after the last `_`.
pub fn language_of(file_name: &str) -> Option<&str> {
    let stem = SourceFormat::Arb.strip_extension(file_name)?;
    let (_, language) = stem.rsplit_once('_')?;
    (!language.is_empty()).then_some(language)
}

/// `@key` entries are metadata; `@@key` entries are bundle attributes and
/// count as primary.
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with('@') && !key.starts_with("@@")
}

fn metadata_key(key: &str) -> String {
    format!("@{key}")
}

/// Build the per-entity document of a bundle.
pub fn encode_bundle(bundle: &OrderedDocument) -> Result<Mapping> {
    let mut content = Mapping::new();
    for entry in bundle {
        if is_metadata_key(&entry.key) {
            continue;
        }
        let mut item = Mapping::new();
        item.insert(VALUE_KEY.into(), to_yaml(&entry.value)?);
        if let Some(metadata) = bundle.get(&metadata_key(&entry.key)) {
            item.insert(METADATA_KEY.into(), to_yaml(metadata)?);
        }
        content.insert(Value::String(entry.key.clone()), Value::Mapping(item));
    }
    Ok(content)
}

/// Rebuild a bundle from its per-entity document.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] when the document is not a mapping of
/// `{value, metadata?}` entries.
pub fn decode_bundle(content: Value, path: &NormalizedPath) -> Result<OrderedDocument> {
    let Value::Mapping(entries) = content else {
        return Err(Error::malformed_record(path, "top level is not a mapping"));
    };

    let mut bundle = OrderedDocument::new();
    for (key, entry) in entries {
        let Value::String(key) = key else {
            return Err(Error::malformed_record(path, "translation keys must be strings"));
        };
        let Value::Mapping(mut entry) = entry else {
            return Err(Error::malformed_record(path, format!("entry '{key}' is not a mapping")));
        };
        let value = entry
            .remove(VALUE_KEY)
            .ok_or_else(|| Error::malformed_record(path, format!("entry '{key}' has no value")))?;
        let metadata = entry.remove(METADATA_KEY).filter(|m| !m.is_null());

        bundle.push(key.as_str(), to_json(value)?);
        if let Some(metadata) = metadata {
            bundle.push(metadata_key(&key), to_json(metadata)?);
        }
    }
    Ok(bundle)
}

fn to_yaml(value: &serde_json::Value) -> Result<Value> {
    Ok(serde_yaml::to_value(value).map_err(decapta_content::Error::from)?)
}

fn to_json(value: Value) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value).map_err(decapta_content::Error::from)?)
}

/// Convert every bundle in `options.input` into a per-language document.
pub fn pre_process(options: &PreProcessOptions) -> Result<BatchReport> {
    let mut report = BatchReport::new();
    for entry in super::list_sources(&options.input, SourceFormat::Arb, &options.ignore_files)? {
        let Some(language) = language_of(&entry.name) else {
            report.warn(format!("Skipping {}: no language code in file name", entry.name));
            continue;
        };
        if let Some(target) = report.record(&entry.name, convert_bundle(&entry.path, language, options)) {
            report.action(format!("{} -> {target}", entry.name));
        }
    }
    Ok(report)
}

fn convert_bundle(path: &NormalizedPath, language: &str, options: &PreProcessOptions) -> Result<NormalizedPath> {
    let bundle = OrderedDocument::parse(&io::read_bytes(path)?).map_err(|e| Error::parse(path, "ARB", e))?;
    let content = encode_bundle(&bundle)?;

    let target = options.content_dir.join(&constants::content_file_name(language));
    let text = serde_yaml::to_string(&content).map_err(decapta_content::Error::from)?;
    io::write_text(&target, &text)?;

    tracing::info!(language, keys = content.len(), "pre-processed bundle");
    Ok(target)
}

/// Rebuild one bundle per content document under `options.content_dir`.
pub fn post_process(options: &PostProcessOptions) -> Result<BatchReport> {
    let mut report = BatchReport::new();
    let entries = io::list_dir(&options.content_dir)?;
    io::create_dir_all(&options.output)?;

    for entry in entries {
        if entry.is_dir || entry.is_hidden() || !constants::is_content_file(&entry.name) {
            continue;
        }
        let language = entry.stem();
        if let Some(target) = report.record(&entry.name, restore_bundle(&entry.path, language, options)) {
            report.action(format!("{} -> {target}", entry.path));
        }
    }
    Ok(report)
}

fn restore_bundle(path: &NormalizedPath, language: &str, options: &PostProcessOptions) -> Result<NormalizedPath> {
    let text = io::read_text(path)?;
    let content: Value = serde_yaml::from_str(&text).map_err(|e| Error::parse(path, "YAML", e))?;
    let bundle = decode_bundle(content, path)?;

    let target = options.output.join(&format!(
        "{}{language}.{}",
        constants::BUNDLE_OUTPUT_PREFIX,
        SourceFormat::Arb.extension()
    ));
    io::write_text(&target, &bundle.to_json_pretty()?)?;

    tracing::info!(language, keys = bundle.len(), "post-processed bundle");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("app_en.arb", Some("en"))]
    #[case("intl_messages_pt.arb", Some("pt"))]
    #[case("app_.arb", None)]
    #[case("messages.arb", None)]
    #[case("app_en.json", None)]
    fn test_language_of(#[case] file_name: &str, #[case] expected: Option<&str>) {
        assert_eq!(language_of(file_name), expected);
    }

    #[test]
    fn test_metadata_keys() {
        assert!(is_metadata_key("@greeting"));
        assert!(!is_metadata_key("@@locale"));
        assert!(!is_metadata_key("greeting"));
    }

    #[test]
    fn test_encode_pairs_metadata() {
        let bundle = OrderedDocument::parse(
            br#"{"@@locale": "en", "b": "B", "@b": {"description": "bee"}, "a": "A"}"#,
        )
        .unwrap();
        let content = encode_bundle(&bundle).unwrap();
        let rendered = serde_yaml::to_string(&content).unwrap();
        assert_eq!(
            rendered,
            "'@@locale':\n  value: en\nb:\n  value: B\n  metadata:\n    description: bee\na:\n  value: A\n"
        );
    }

    #[test]
    fn test_decode_follows_document_order() {
        let content: Value = serde_yaml::from_str("z:\n  value: Z\na:\n  value: A\n  metadata:\n    x: 1\n").unwrap();
        let bundle = decode_bundle(content, &NormalizedPath::new("en.yaml")).unwrap();
        assert_eq!(bundle.keys().collect::<Vec<_>>(), vec!["z", "a", "@a"]);
    }

    #[rstest]
    #[case::not_a_mapping("- a\n")]
    #[case::entry_not_a_mapping("a: plain\n")]
    #[case::missing_value("a:\n  metadata: {}\n")]
    fn test_decode_rejects_malformed(#[case] source: &str) {
        let content: Value = serde_yaml::from_str(source).unwrap();
        let err = decode_bundle(content, &NormalizedPath::new("en.yaml")).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }), "{err}");
    }
}

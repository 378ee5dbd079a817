//! YAML node tree types and the generic encoder for new substructure

use std::borrow::Cow;

use serde::Serialize;
use serde_yaml::Value;

use super::YamlDocument;
use crate::error::Result;

/// Comments attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    /// Comment and blank lines preceding the node; `""` marks a blank line.
    pub head: Vec<String>,
    /// Comment ending the node's line, including the leading `#`.
    pub line: Option<String>,
}

/// A scalar kept in its source form.
///
/// Untouched scalars are re-emitted exactly as they were written, so quoting
/// style and flow collections survive a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// Unquoted text; empty for an absent value.
    Plain(String),
    /// Single- or double-quoted text, quotes included.
    Quoted(String),
    /// An inline flow collection (`[a, b]`, `{k: v}`), kept verbatim.
    Flow(String),
    /// A literal or folded block scalar.
    Block {
        /// Indicator with modifiers, e.g. `|-` or `>`
        header: String,
        /// Content lines relative to the block indentation; `""` is blank
        lines: Vec<String>,
    },
}

impl Scalar {
    pub(crate) fn from_raw(raw: String) -> Self {
        if raw.starts_with(['"', '\'']) {
            Self::Quoted(raw)
        } else {
            Self::Plain(raw)
        }
    }

    /// Source text for the inline styles; the header for block scalars.
    pub fn inline_text(&self) -> &str {
        match self {
            Self::Plain(raw) | Self::Quoted(raw) | Self::Flow(raw) => raw,
            Self::Block { header, .. } => header,
        }
    }

    /// Decoded string value.
    pub fn value(&self) -> Cow<'_, str> {
        match self {
            Self::Plain(raw) | Self::Flow(raw) => Cow::Borrowed(raw),
            Self::Quoted(raw) => serde_yaml::from_str::<String>(raw)
                .map(Cow::Owned)
                .unwrap_or(Cow::Borrowed(raw)),
            Self::Block { header, lines } => {
                let pad = " ".repeat(block_indent(header).unwrap_or(2));
                let mut source = header.clone();
                for line in lines {
                    source.push('\n');
                    source.push_str(&pad);
                    source.push_str(line);
                }
                source.push('\n');
                serde_yaml::from_str::<String>(&source)
                    .map(Cow::Owned)
                    .unwrap_or_else(|_| Cow::Owned(lines.join("\n")))
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Plain(raw) if matches!(raw.as_str(), "" | "~" | "null" | "Null" | "NULL"))
    }
}

/// Explicit indentation indicator of a block scalar header (`|2`, `>-4`).
pub(crate) fn block_indent(header: &str) -> Option<usize> {
    header
        .chars()
        .find_map(|ch| ch.to_digit(10))
        .filter(|&step| step > 0)
        .map(|step| step as usize)
}

/// Structural variant of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Scalar(Scalar),
    Mapping(Vec<Entry>),
    Sequence(Vec<Node>),
}

/// One key/value pair of a mapping node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Node,
    pub value: Node,
}

impl Entry {
    /// Entry with a string key encoded the way `serde_yaml` would quote it.
    pub fn new(key: &str, value: Node) -> Self {
        Self {
            key: Node::string(key),
            value,
        }
    }
}

/// A YAML node with its anchor/tag properties and attached comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Anchor and tag tokens (`&base`, `!custom`) kept verbatim.
    pub props: Option<String>,
    pub comments: Comments,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            props: None,
            comments: Comments::default(),
        }
    }

    /// An absent value (`key:` with nothing after it).
    pub fn null() -> Self {
        Self::new(NodeKind::Scalar(Scalar::Plain(String::new())))
    }

    /// A string scalar, quoted only when YAML requires it.
    pub fn string(text: &str) -> Self {
        Self::new(NodeKind::Scalar(encode_str(text)))
    }

    pub fn mapping(entries: Vec<Entry>) -> Self {
        Self::new(NodeKind::Mapping(entries))
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Self::new(NodeKind::Sequence(items))
    }

    /// Encode a decoded YAML value as a fresh node tree.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::new(NodeKind::Scalar(Scalar::Plain("null".into()))),
            Value::Bool(b) => Self::new(NodeKind::Scalar(Scalar::Plain(b.to_string()))),
            Value::Number(n) => Self::new(NodeKind::Scalar(Scalar::Plain(n.to_string()))),
            Value::String(s) => Self::string(s),
            Value::Sequence(items) => Self::sequence(items.iter().map(Self::from_value).collect()),
            Value::Mapping(map) => Self::mapping(
                map.iter()
                    .map(|(key, value)| Entry {
                        key: Self::key_from_value(key),
                        value: Self::from_value(value),
                    })
                    .collect(),
            ),
            Value::Tagged(tagged) => {
                let mut node = Self::from_value(&tagged.value);
                node.props = Some(tagged.tag.to_string());
                node
            }
        }
    }

    fn key_from_value(key: &Value) -> Self {
        match key {
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                let flow = serde_json::to_string(key).unwrap_or_else(|_| "null".into());
                Self::new(NodeKind::Scalar(Scalar::Flow(flow)))
            }
            other => Self::from_value(other),
        }
    }

    /// Encode any serializable value as a fresh node tree.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::from_value(&serde_yaml::to_value(value)?))
    }

    /// Decode this subtree through `serde_yaml`.
    pub fn to_value(&self) -> Result<Value> {
        match &self.kind {
            NodeKind::Mapping(entries) if entries.is_empty() => Ok(Value::Mapping(Default::default())),
            NodeKind::Sequence(items) if items.is_empty() => Ok(Value::Sequence(Vec::new())),
            _ => {
                let mut root = self.clone();
                root.comments = Comments::default();
                let rendered = YamlDocument::from_root(root).to_yaml_string();
                Ok(serde_yaml::from_str(&rendered)?)
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(&self.kind, NodeKind::Scalar(scalar) if scalar.is_null())
    }

    /// Decoded text of a scalar node. Flow collections and block
    /// collections have no string form.
    pub fn as_str(&self) -> Option<Cow<'_, str>> {
        match &self.kind {
            NodeKind::Scalar(Scalar::Flow(_)) => None,
            NodeKind::Scalar(scalar) => Some(scalar.value()),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[Entry]> {
        match &self.kind {
            NodeKind::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Vec<Entry>> {
        match &mut self.kind {
            NodeKind::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Value stored under `key` in a block mapping (first match).
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|entry| entry.key.as_str().as_deref() == Some(key))
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.as_mapping_mut()?
            .iter_mut()
            .find(|entry| entry.key.as_str().as_deref() == Some(key))
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// String value under `key`, looking inside flow mappings as well.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match &self.kind {
            NodeKind::Mapping(_) => self.get(key)?.as_str().map(Cow::into_owned),
            NodeKind::Scalar(Scalar::Flow(raw)) => {
                let value: Value = serde_yaml::from_str(raw).ok()?;
                value.get(key)?.as_str().map(str::to_owned)
            }
            _ => None,
        }
    }

    /// Append an entry to a mapping node. Returns `false` for non-mappings.
    pub fn push_entry(&mut self, entry: Entry) -> bool {
        match self.as_mapping_mut() {
            Some(entries) => {
                entries.push(entry);
                true
            }
            None => false,
        }
    }

    /// Turn an inline flow collection into block nodes so it can be edited.
    ///
    /// Flow collections cannot hold comments, so nothing is lost.
    pub fn expand_flow(&mut self) -> Result<()> {
        if let NodeKind::Scalar(Scalar::Flow(raw)) = &self.kind {
            let value: Value = serde_yaml::from_str(raw)?;
            self.kind = Self::from_value(&value).kind;
        }
        Ok(())
    }
}

/// Encode a string with the quoting `serde_yaml` would choose.
///
/// Multi-line text is written double-quoted so a value always stays on one
/// line of the tree.
fn encode_str(text: &str) -> Scalar {
    if text.contains(['\n', '\r']) {
        return Scalar::Quoted(double_quote(text));
    }
    match serde_yaml::to_string(text) {
        Ok(rendered) => {
            let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);
            if rendered.contains('\n') {
                Scalar::Quoted(double_quote(text))
            } else {
                Scalar::from_raw(rendered.to_string())
            }
        }
        Err(_) => Scalar::Quoted(double_quote(text)),
    }
}

fn double_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_quoting_follows_serde_yaml() {
        assert_eq!(Node::string("plain"), Node::new(NodeKind::Scalar(Scalar::Plain("plain".into()))));
        assert!(matches!(Node::string("{{slug}}").kind, NodeKind::Scalar(Scalar::Quoted(_))));
        assert!(matches!(Node::string("true").kind, NodeKind::Scalar(Scalar::Quoted(_))));
        assert!(matches!(Node::string("").kind, NodeKind::Scalar(Scalar::Quoted(_))));
    }

    #[test]
    fn test_multiline_string_is_double_quoted() {
        let node = Node::string("a\n\"b\"");
        assert_eq!(node.kind, NodeKind::Scalar(Scalar::Quoted("\"a\\n\\\"b\\\"\"".into())));
        assert_eq!(node.as_str().unwrap(), "a\n\"b\"");
    }

    #[test]
    fn test_quoted_value_decodes() {
        let scalar = Scalar::Quoted("'it''s'".into());
        assert_eq!(scalar.value(), "it's");
    }

    #[test]
    fn test_block_value_decodes() {
        let scalar = Scalar::Block {
            header: "|".into(),
            lines: vec!["one".into(), "".into(), "two".into()],
        };
        assert_eq!(scalar.value(), "one\n\ntwo\n");
    }

    #[test]
    fn test_block_value_with_indentation_indicator() {
        let scalar = Scalar::Block {
            header: "|4-".into(),
            lines: vec!["  indented".into(), "flush".into()],
        };
        assert_eq!(block_indent("|4-"), Some(4));
        assert_eq!(block_indent(">"), None);
        assert_eq!(scalar.value(), "  indented\nflush");
    }

    #[test]
    fn test_get_str_reads_flow_mapping() {
        let node = Node::new(NodeKind::Scalar(Scalar::Flow("{name: title, widget: string}".into())));
        assert_eq!(node.get_str("name").as_deref(), Some("title"));
        assert_eq!(node.get_str("missing"), None);
    }

    #[test]
    fn test_expand_flow() {
        let mut node = Node::new(NodeKind::Scalar(Scalar::Flow("[a, b]".into())));
        node.expand_flow().unwrap();
        assert_eq!(node.as_sequence().map(<[Node]>::len), Some(2));
    }
}

//! Block-style emitter for the node tree

use super::YamlDocument;
use super::node::{Entry, Node, NodeKind, Scalar, block_indent};

const INDENT: usize = 2;

pub(crate) fn emit_document(doc: &YamlDocument) -> String {
    let mut out = String::new();
    write_comments(&mut out, &doc.leading, 0);
    if doc.explicit_start {
        out.push_str("---\n");
    }
    emit_root(&mut out, &doc.root);
    write_comments(&mut out, &doc.trailing, 0);
    out
}

fn emit_root(out: &mut String, node: &Node) {
    write_comments(out, &node.comments.head, 0);
    match &node.kind {
        NodeKind::Mapping(entries) if entries.is_empty() => {}
        NodeKind::Mapping(entries) => emit_mapping(out, entries, 0, None),
        NodeKind::Sequence(items) if items.is_empty() => out.push_str("[]\n"),
        NodeKind::Sequence(items) => emit_sequence(out, items, 0, None),
        NodeKind::Scalar(scalar) => {
            push_props(out, node, !scalar.inline_text().is_empty());
            out.push_str(scalar.inline_text());
            push_line_comment(out, node);
            out.push('\n');
            if let Scalar::Block { header, lines } = scalar {
                write_block_lines(out, lines, block_indent(header).unwrap_or(INDENT));
            }
        }
    }
}

/// Emit mapping entries at `indent`. `lead` replaces the indentation of the
/// first key when the mapping continues a `- ` sequence indicator.
fn emit_mapping(out: &mut String, entries: &[Entry], indent: usize, mut lead: Option<String>) {
    for entry in entries {
        write_comments(out, &entry.key.comments.head, indent);
        match lead.take() {
            Some(prefix) => out.push_str(&prefix),
            None => pad(out, indent),
        }
        out.push_str(key_text(&entry.key));
        out.push(':');
        emit_value(out, &entry.value, indent, &entry.value.comments.head);
    }
}

fn emit_sequence(out: &mut String, items: &[Node], indent: usize, mut lead: Option<String>) {
    for item in items {
        write_comments(out, &item.comments.head, indent);
        let prefix = lead.take().unwrap_or_else(|| " ".repeat(indent));
        let compact = item.props.is_none() && item.comments.line.is_none();
        match &item.kind {
            NodeKind::Mapping(entries) if compact && !entries.is_empty() => {
                emit_mapping(out, entries, indent + INDENT, Some(format!("{prefix}- ")));
            }
            NodeKind::Sequence(nested) if compact && !nested.is_empty() => {
                emit_sequence(out, nested, indent + INDENT, Some(format!("{prefix}- ")));
            }
            _ => {
                out.push_str(&prefix);
                out.push('-');
                emit_value(out, item, indent, &[]);
            }
        }
    }
}

/// Emit a value after its `key:` or `-` indicator. `head` holds comments
/// that sit between the indicator and a scalar on its own line.
fn emit_value(out: &mut String, node: &Node, indent: usize, head: &[String]) {
    let child = indent + INDENT;
    match &node.kind {
        NodeKind::Scalar(Scalar::Block { header, lines }) => {
            out.push(' ');
            push_props(out, node, true);
            out.push_str(header);
            push_line_comment(out, node);
            out.push('\n');
            write_block_lines(out, lines, indent + block_indent(header).unwrap_or(INDENT));
        }
        NodeKind::Scalar(scalar) if !head.is_empty() && !scalar.is_null() => {
            if node.props.is_some() {
                out.push(' ');
                push_props(out, node, false);
            }
            out.push('\n');
            write_comments(out, head, child);
            pad(out, child);
            out.push_str(scalar.inline_text());
            push_line_comment(out, node);
            out.push('\n');
        }
        NodeKind::Scalar(scalar) => {
            let text = scalar.inline_text();
            if node.props.is_some() || !text.is_empty() {
                out.push(' ');
                push_props(out, node, !text.is_empty());
                out.push_str(text);
            }
            push_line_comment(out, node);
            out.push('\n');
        }
        NodeKind::Mapping(entries) if entries.is_empty() => emit_inline(out, node, "{}"),
        NodeKind::Sequence(items) if items.is_empty() => emit_inline(out, node, "[]"),
        NodeKind::Mapping(entries) => {
            emit_header(out, node);
            emit_mapping(out, entries, child, None);
        }
        NodeKind::Sequence(items) => {
            emit_header(out, node);
            emit_sequence(out, items, child, None);
        }
    }
}

fn emit_inline(out: &mut String, node: &Node, text: &str) {
    out.push(' ');
    push_props(out, node, true);
    out.push_str(text);
    push_line_comment(out, node);
    out.push('\n');
}

/// Rest of the indicator line for a nested block collection.
fn emit_header(out: &mut String, node: &Node) {
    if node.props.is_some() {
        out.push(' ');
        push_props(out, node, false);
    }
    push_line_comment(out, node);
    out.push('\n');
}

fn key_text(key: &Node) -> &str {
    match &key.kind {
        NodeKind::Scalar(scalar) => scalar.inline_text(),
        _ => "null",
    }
}

fn push_props(out: &mut String, node: &Node, separate: bool) {
    if let Some(props) = &node.props {
        out.push_str(props);
        if separate {
            out.push(' ');
        }
    }
}

fn push_line_comment(out: &mut String, node: &Node) {
    if let Some(comment) = &node.comments.line {
        out.push(' ');
        out.push_str(comment);
    }
}

fn write_block_lines(out: &mut String, lines: &[String], indent: usize) {
    for line in lines {
        if !line.is_empty() {
            pad(out, indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn write_comments(out: &mut String, comments: &[String], indent: usize) {
    for comment in comments {
        if !comment.is_empty() {
            pad(out, indent);
            out.push_str(comment);
        }
        out.push('\n');
    }
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

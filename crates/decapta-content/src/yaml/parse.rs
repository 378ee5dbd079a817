//! Line-oriented parser for the block YAML subset

use super::YamlDocument;
use super::node::{Entry, Node, NodeKind, Scalar, block_indent};
use crate::error::{Error, Result};

const FORMAT: &str = "YAML";

#[derive(Debug, Clone)]
struct Line {
    number: usize,
    indent: usize,
    /// Content after the indentation, without trailing whitespace
    text: String,
    /// The whole line as written
    raw: String,
}

impl Line {
    fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    fn is_trivia(&self) -> bool {
        self.is_blank() || self.text.starts_with('#')
    }

    fn is_sequence_item(&self) -> bool {
        is_sequence_item(&self.text)
    }

    fn is_marker(&self, marker: &str) -> bool {
        self.indent == 0
            && (self.text == marker
                || self
                    .text
                    .strip_prefix(marker)
                    .is_some_and(|rest| rest.trim_start().starts_with('#')))
    }
}

pub(crate) fn parse_document(source: &str) -> Result<YamlDocument> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = split_lines(source)?;

    let mut leading = Vec::new();
    let mut explicit_start = false;
    if let Some(first) = lines.iter().position(|line| !line.is_trivia())
        && lines[first].is_marker("---")
    {
        explicit_start = true;
        leading = lines.drain(..=first).filter(|line| !line.is_marker("---")).map(|line| line.text).collect();
    }

    if let Some(end) = lines.iter().position(|line| line.is_marker("...")) {
        lines.truncate(end);
    }
    if let Some(line) = lines.iter().find(|line| line.is_marker("---")) {
        return Err(Error::parse(FORMAT, line.number, "multiple documents are not supported"));
    }
    if let Some(line) = lines.iter().find(|line| line.indent == 0 && line.text.starts_with('%')) {
        return Err(Error::parse(FORMAT, line.number, "directives are not supported"));
    }

    let mut parser = Parser {
        lines,
        pos: 0,
        last: 0,
        pending: Vec::new(),
    };

    parser.skip_trivia();
    let root = match parser.peek().map(|line| line.indent) {
        Some(indent) => Some(parser.parse_block(indent)?),
        None => None,
    };
    parser.skip_trivia();
    if let Some(line) = parser.peek() {
        return Err(Error::parse(FORMAT, line.number, "unexpected content after the document root"));
    }

    let pending = std::mem::take(&mut parser.pending);
    Ok(match root {
        Some(root) => YamlDocument {
            leading,
            explicit_start,
            root,
            trailing: pending,
        },
        None => {
            leading.extend(pending);
            YamlDocument {
                leading,
                explicit_start,
                root: Node::mapping(Vec::new()),
                trailing: Vec::new(),
            }
        }
    })
}

fn split_lines(source: &str) -> Result<Vec<Line>> {
    source
        .lines()
        .enumerate()
        .map(|(idx, raw)| {
            let trimmed = raw.trim_end();
            let text = trimmed.trim_start_matches(' ');
            if text.starts_with('\t') {
                return Err(Error::parse(FORMAT, idx + 1, "tabs are not allowed in indentation"));
            }
            Ok(Line {
                number: idx + 1,
                indent: trimmed.len() - text.len(),
                text: text.to_string(),
                raw: raw.to_string(),
            })
        })
        .collect()
}

struct Parser {
    lines: Vec<Line>,
    pos: usize,
    /// Number of the last consumed line, for error positions
    last: usize,
    /// Comments waiting for the next node
    pending: Vec<String>,
}

impl Parser {
    fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    fn advance(&mut self) {
        if let Some(line) = self.lines.get(self.pos) {
            self.last = line.number;
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::parse(FORMAT, self.last, message)
    }

    fn skip_trivia(&mut self) {
        while let Some(line) = self.lines.get(self.pos) {
            if !line.is_trivia() {
                break;
            }
            self.pending.push(line.text.clone());
            self.advance();
        }
    }

    fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Parse the collection or scalar starting at the current line.
    fn parse_block(&mut self, indent: usize) -> Result<Node> {
        let Some(line) = self.peek() else {
            return Ok(Node::null());
        };
        if line.is_sequence_item() {
            return self.parse_sequence(indent);
        }
        if split_key(&line.text).is_some() {
            return self.parse_mapping(indent);
        }

        let text = line.text.clone();
        let head = self.take_pending();
        self.advance();
        let (props, rest) = split_props(&text);
        let mut node = self.parse_inline(rest, indent, None)?;
        node.props = props;
        node.comments.head = head;
        Ok(node)
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Node> {
        let mut entries = Vec::new();
        loop {
            self.skip_trivia();
            let Some(line) = self.peek() else { break };
            if line.indent < indent || (line.indent == indent && line.is_sequence_item()) {
                break;
            }
            if line.indent > indent {
                return Err(Error::parse(FORMAT, line.number, "unexpected indentation"));
            }
            let Some((key, rest)) = split_key(&line.text) else {
                return Err(Error::parse(FORMAT, line.number, "expected a mapping key"));
            };
            self.advance();

            let mut key = Node::new(NodeKind::Scalar(Scalar::from_raw(key)));
            key.comments.head = self.take_pending();
            let value = self.parse_value(&rest, indent, true)?;
            entries.push(Entry { key, value });
        }
        Ok(Node::mapping(entries))
    }

    fn parse_sequence(&mut self, indent: usize) -> Result<Node> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            let Some(line) = self.peek() else { break };
            if line.indent < indent || (line.indent == indent && !line.is_sequence_item()) {
                break;
            }
            if line.indent > indent || !line.is_sequence_item() {
                return Err(Error::parse(FORMAT, line.number, "unexpected indentation"));
            }

            let line = line.clone();
            let head = self.take_pending();
            let after_dash = &line.text[1..];
            let rest = after_dash.trim_start();
            let column = line.indent + 1 + (after_dash.len() - rest.len());

            let mut item = if is_sequence_item(rest) || split_key(rest).is_some() {
                // compact form: the remainder starts a nested collection at its own column
                self.lines[self.pos] = Line {
                    number: line.number,
                    indent: column,
                    text: rest.to_string(),
                    raw: format!("{}{rest}", " ".repeat(column)),
                };
                self.parse_block(column)?
            } else {
                self.advance();
                self.parse_value(rest, indent, false)?
            };
            item.comments.head = head;
            items.push(item);
        }
        Ok(Node::sequence(items))
    }

    /// Parse what follows a `key:` or `-` indicator on the owner's line.
    fn parse_value(&mut self, rest: &str, owner_indent: usize, in_mapping: bool) -> Result<Node> {
        let (props, rest) = split_props(rest);
        if rest.is_empty() || rest.starts_with('#') {
            let comment = (!rest.is_empty()).then(|| rest.to_string());
            self.skip_trivia();
            let next = self.peek().map(|line| (line.indent, line.is_sequence_item()));
            let mut node = match next {
                Some((indent, _)) if indent > owner_indent => self.parse_block(indent)?,
                Some((indent, true)) if in_mapping && indent == owner_indent => self.parse_sequence(indent)?,
                _ => Node::null(),
            };
            node.props = props;
            node.comments.line = comment;
            return Ok(node);
        }

        let mut node = self.parse_inline(rest, owner_indent + 1, Some(owner_indent))?;
        node.props = props;
        Ok(node)
    }

    /// Parse a scalar that starts inline; continuation lines must be
    /// indented at least `min_indent`. `owner` is the indentation of the
    /// key or `-` on the same line, when there is one.
    fn parse_inline(&mut self, rest: &str, min_indent: usize, owner: Option<usize>) -> Result<Node> {
        if is_explicit_entry(rest) {
            return Err(self.error(COMPLEX_KEYS));
        }
        let (scalar, comment) = if rest.starts_with(['|', '>']) {
            let (header, comment) = split_comment(rest);
            let header = header.to_string();
            let base = match (block_indent(&header), owner) {
                (Some(step), Some(owner)) => Some(owner + step),
                (Some(_), None) => {
                    return Err(self.error("indentation indicators need a key or `-` on the same line"));
                }
                (None, _) => None,
            };
            let lines = self.read_block_lines(min_indent, base);
            (Scalar::Block { header, lines }, comment)
        } else if rest.starts_with(['"', '\'']) {
            let (raw, tail) = self.read_quoted(rest, min_indent)?;
            (Scalar::Quoted(raw), self.tail_comment(&tail)?)
        } else if rest.starts_with(['[', '{']) {
            let (raw, tail) = self.read_flow(rest)?;
            (Scalar::Flow(raw), self.tail_comment(&tail)?)
        } else {
            let (text, comment) = split_comment(rest);
            let mut text = text.to_string();
            if comment.is_none() {
                while let Some(line) = self.lines.get(self.pos) {
                    if line.is_trivia() || line.indent < min_indent {
                        break;
                    }
                    if is_explicit_entry(&line.text) {
                        return Err(Error::parse(FORMAT, line.number, COMPLEX_KEYS));
                    }
                    if split_key(&line.text).is_some() {
                        return Err(Error::parse(FORMAT, line.number, "unexpected mapping key in a plain scalar"));
                    }
                    text.push(' ');
                    text.push_str(&line.text);
                    self.advance();
                }
            }
            (Scalar::Plain(text), comment)
        };

        let mut node = Node::new(NodeKind::Scalar(scalar));
        node.comments.line = comment;
        Ok(node)
    }

    /// Read the content of a block scalar. `base` is the content
    /// indentation given by an explicit indicator.
    fn read_block_lines(&mut self, min_indent: usize, mut base: Option<usize>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.lines.get(self.pos) {
            if line.is_blank() {
                // spaces past the content indentation are content
                let kept = base.and_then(|indent| line.raw.get(indent..)).unwrap_or("");
                lines.push(kept.to_string());
                self.advance();
                continue;
            }
            let indent = match base {
                Some(indent) => indent,
                None if line.indent >= min_indent => *base.insert(line.indent),
                None => break,
            };
            if line.indent < indent {
                break;
            }
            lines.push(line.raw[indent..].to_string());
            self.advance();
        }
        // trailing blank lines belong to whatever follows the scalar
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
            self.pos -= 1;
        }
        lines
    }

    /// Read a quoted scalar, which may continue over several lines. Line
    /// breaks and indentation inside the quotes are kept as written.
    fn read_quoted(&mut self, first: &str, min_indent: usize) -> Result<(String, String)> {
        let mut raw = first.to_string();
        loop {
            if let Some(end) = find_quote_end(&raw) {
                let tail = raw.split_off(end + 1);
                return Ok((raw, tail));
            }
            let Some(line) = self.lines.get(self.pos) else {
                return Err(self.error("unterminated quoted scalar"));
            };
            if !line.is_blank() && line.indent < min_indent {
                return Err(Error::parse(FORMAT, line.number, "quoted scalar continues below its indentation"));
            }
            raw.push('\n');
            raw.push_str(line.raw.trim_end());
            self.advance();
        }
    }

    fn read_flow(&mut self, first: &str) -> Result<(String, String)> {
        let mut raw = first.to_string();
        loop {
            if let Some(end) = flow_end(&raw) {
                let tail = raw.split_off(end + 1);
                return Ok((raw, tail));
            }
            let Some(line) = self.lines.get(self.pos) else {
                return Err(self.error("unterminated flow collection"));
            };
            if !line.is_trivia() {
                raw.push(' ');
                raw.push_str(&line.text);
            }
            self.advance();
        }
    }

    fn tail_comment(&self, tail: &str) -> Result<Option<String>> {
        let tail = tail.trim();
        if tail.is_empty() {
            Ok(None)
        } else if tail.starts_with('#') {
            Ok(Some(tail.to_string()))
        } else {
            Err(self.error("unexpected text after scalar"))
        }
    }
}

const COMPLEX_KEYS: &str = "complex keys are not supported";

/// `? key` and `: value` lines of the explicit mapping entry syntax.
fn is_explicit_entry(text: &str) -> bool {
    matches!(text, "?" | ":") || text.starts_with("? ") || text.starts_with(": ")
}

fn is_sequence_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

/// Split a block mapping line into its raw key and the text after `:`.
fn split_key(text: &str) -> Option<(String, String)> {
    let scan_from = match text.chars().next()? {
        '"' | '\'' => find_quote_end(text)? + 1,
        '#' | '[' | '{' | '?' | '|' | '>' | '&' | '*' | '!' | '%' | '@' | '`' => return None,
        '-' if is_sequence_item(text) => return None,
        _ => 0,
    };

    // ':' and '#' are ASCII, so byte positions are char boundaries
    let bytes = text.as_bytes();
    for idx in scan_from..bytes.len() {
        match bytes[idx] {
            b'#' if idx > 0 && matches!(bytes[idx - 1], b' ' | b'\t') => return None,
            b':' => {
                let after = &text[idx + 1..];
                if !(after.is_empty() || after.starts_with([' ', '\t'])) {
                    continue;
                }
                let key = text[..idx].trim_end();
                if key.is_empty() || (scan_from > 0 && key.len() != scan_from) {
                    return None;
                }
                return Some((key.to_string(), after.trim_start().to_string()));
            }
            _ => {}
        }
    }
    None
}

/// Split leading `&anchor` and `!tag` tokens off a value.
fn split_props(text: &str) -> (Option<String>, &str) {
    let mut props = Vec::new();
    let mut rest = text.trim_start();
    while rest.starts_with(['&', '!']) {
        let end = rest.find([' ', '\t']).unwrap_or(rest.len());
        props.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    ((!props.is_empty()).then(|| props.join(" ")), rest)
}

/// Split a trailing ` # comment` off plain text.
fn split_comment(text: &str) -> (&str, Option<String>) {
    let bytes = text.as_bytes();
    for (idx, _) in text.match_indices('#') {
        if idx == 0 {
            return ("", Some(text.to_string()));
        }
        if matches!(bytes[idx - 1], b' ' | b'\t') {
            return (text[..idx].trim_end(), Some(text[idx..].to_string()));
        }
    }
    (text.trim_end(), None)
}

/// Byte index of the quote closing the scalar that opens `text`.
fn find_quote_end(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    let (_, quote) = chars.next()?;
    let mut escaped = false;
    while let Some((idx, ch)) = chars.next() {
        if quote == '"' {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                return Some(idx);
            }
        } else if ch == '\'' {
            if chars.peek().is_some_and(|&(_, next)| next == '\'') {
                chars.next();
                continue;
            }
            return Some(idx);
        }
    }
    None
}

/// Byte index of the bracket closing the flow collection that opens `text`.
fn flow_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = '[';
    for (idx, ch) in text.char_indices() {
        if let Some(open) = quote {
            if open == '"' && escaped {
                escaped = false;
            } else if open == '"' && ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if matches!(prev, '[' | '{' | ',' | ':') => quote = Some(ch),
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
        if !ch.is_whitespace() {
            prev = ch;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("name: value"), Some(("name".into(), "value".into())));
        assert_eq!(split_key("name:"), Some(("name".into(), "".into())));
        assert_eq!(split_key("\"a: b\": c"), Some(("\"a: b\"".into(), "c".into())));
        assert_eq!(split_key("url: http://x"), Some(("url".into(), "http://x".into())));
        assert_eq!(split_key("http://x"), None);
        assert_eq!(split_key("text # note: here"), None);
        assert_eq!(split_key("- item: x"), None);
        assert_eq!(split_key("{a: b}"), None);
    }

    #[test]
    fn test_split_comment() {
        assert_eq!(split_comment("value # note"), ("value", Some("# note".into())));
        assert_eq!(split_comment("a#b"), ("a#b", None));
        assert_eq!(split_comment("# only"), ("", Some("# only".into())));
    }

    #[test]
    fn test_split_props() {
        assert_eq!(split_props("&base value"), (Some("&base".into()), "value"));
        assert_eq!(split_props("!tag &a"), (Some("!tag &a".into()), ""));
        assert_eq!(split_props("plain"), (None, "plain"));
    }

    #[test]
    fn test_find_quote_end() {
        assert_eq!(find_quote_end("'it''s' tail"), Some(6));
        assert_eq!(find_quote_end(r#""a\"b" # c"#), Some(5));
        assert_eq!(find_quote_end("'open"), None);
    }

    #[test]
    fn test_flow_end() {
        assert_eq!(flow_end("[a, [b]] # c"), Some(7));
        assert_eq!(flow_end("{a: '}'}"), Some(7));
        assert_eq!(flow_end("[don't]"), Some(6));
        assert_eq!(flow_end("[a,"), None);
    }
}

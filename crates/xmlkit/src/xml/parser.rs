//! XML parser implementation

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{ErrorKind, ParseError, Pos};
use crate::xml::cursor::{is_whitespace, Cursor};
use crate::xml::model::{Declaration, Document, Node};

type Result<T> = std::result::Result<T, ParseError>;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// `type` values captured verbatim by the default configuration
pub const VERBATIM_TYPES: &[&str] = &["xhtml"];

/// Configuration for the XML parser
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
    /// Values of the `type` attribute whose element content is captured
    /// byte-for-byte instead of being parsed
    pub verbatim_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
            verbatim_types: VERBATIM_TYPES.iter().map(|ty| ty.to_string()).collect(),
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    ///
    /// Rendering, comparing and dropping a [`Node`] recurse once per level
    /// of nesting, so a tree parsed without a depth limit can exhaust the
    /// stack. Only use this for trusted input.
    pub fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
            ..Self::default()
        }
    }

    /// Create a new config with specific limits
    pub fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            ..Self::default()
        }
    }

    /// Replace the set of `type` values that trigger verbatim capture
    pub fn with_verbatim_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.verbatim_types = types.into_iter().map(Into::into).collect();
        self
    }

    fn is_verbatim(&self, node: &Node) -> bool {
        node.attribute("type")
            .is_some_and(|ty| self.verbatim_types.iter().any(|v| v == ty))
    }
}

/// An element that has been opened but not yet closed
#[derive(Debug)]
struct Frame {
    node: Node,
    segments: Vec<Segment>,
}

/// A run of character data; CDATA runs always count as content
#[derive(Debug)]
struct Segment {
    text: String,
    cdata: bool,
}

impl Frame {
    const fn new(node: Node) -> Self {
        Self {
            node,
            segments: Vec::new(),
        }
    }

    /// Leaves keep their text verbatim; elements with children drop
    /// whitespace-only runs between them unless they came from CDATA.
    fn finish(self) -> Node {
        let mut node = self.node;
        let mixed = !node.children.is_empty();
        let text: String = self
            .segments
            .into_iter()
            .filter(|segment| !mixed || segment.cdata || !segment.text.bytes().all(is_whitespace))
            .map(|segment| segment.text)
            .collect();
        node.text = (!text.is_empty()).then_some(text);
        node
    }
}

/// Result of scanning a start tag
enum StartTag {
    Open(Node),
    Closed(Node),
}

/// XML parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: Config,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new parser with custom configuration
    pub const fn with_config(input: &'a [u8], config: Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
        }
    }

    /// Parse an XML document
    pub fn parse(&mut self) -> Result<Document> {
        let size = self.cursor.remaining().len();
        if self.config.max_size > 0 && size > self.config.max_size {
            warn!(size, max = self.config.max_size, "xml input exceeds size limit");
            return Err(ParseError::MaxSizeExceeded {
                max: self.config.max_size,
            });
        }

        if self.cursor.starts_with(BOM) {
            self.cursor.advance_by(BOM.len());
        }

        let declaration = self.parse_declaration()?;
        self.skip_misc(true)?;
        let root = self.parse_root()?;
        self.skip_misc(false)?;

        if !self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::TrailingContent));
        }

        Ok(Document { declaration, root })
    }

    fn parse_declaration(&mut self) -> Result<Option<Declaration>> {
        let is_declaration = self.cursor.starts_with(b"<?xml")
            && self
                .cursor
                .peek(5)
                .is_some_and(|b| is_whitespace(b) || b == b'?');
        if !is_declaration {
            return Ok(None);
        }
        self.cursor.advance_by(5);

        let mut declaration = Declaration {
            version: "1.0".to_string(),
            encoding: None,
            standalone: None,
        };
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"?>") {
                self.cursor.advance_by(2);
                return Ok(Some(declaration));
            }
            if self.cursor.is_eof() {
                return Err(self.error_here(ErrorKind::UnterminatedMarkup));
            }

            let pos = self.cursor.position();
            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;
            match name.as_str() {
                "version" => declaration.version = value,
                "encoding" => declaration.encoding = Some(value),
                "standalone" => {
                    declaration.standalone = Some(match value.as_str() {
                        "yes" => true,
                        "no" => false,
                        _ => {
                            return Err(ParseError::at(
                                ErrorKind::UnexpectedToken {
                                    expected: "yes or no".to_string(),
                                    found: value,
                                },
                                pos,
                            ))
                        }
                    });
                }
                _ => {
                    return Err(ParseError::at(
                        ErrorKind::UnexpectedToken {
                            expected: "version, encoding or standalone".to_string(),
                            found: name,
                        },
                        pos,
                    ))
                }
            }
        }
    }

    /// Skip whitespace, comments, processing instructions and (before the
    /// root only) a doctype declaration.
    fn skip_misc(&mut self, allow_doctype: bool) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->")?;
            } else if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
            } else if allow_doctype && self.cursor.starts_with(b"<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_root(&mut self) -> Result<Node> {
        if self.cursor.is_eof() {
            return Err(self.error_here(ErrorKind::MissingRoot));
        }
        if self.cursor.current() != Some(b'<') || self.cursor.starts_with(b"</") {
            return Err(self.unexpected("<root>"));
        }

        let mut stack: Vec<Frame> = Vec::new();
        loop {
            let Some(byte) = self.cursor.current() else {
                let name = stack
                    .last()
                    .map(|frame| frame.node.name.clone())
                    .unwrap_or_default();
                return Err(self.error_here(ErrorKind::UnterminatedElement { name }));
            };

            if byte != b'<' {
                let text = self.parse_text()?;
                if let Some(frame) = stack.last_mut() {
                    frame.segments.push(Segment { text, cdata: false });
                }
                continue;
            }

            if self.cursor.starts_with(b"</") {
                let pos = self.cursor.position();
                self.cursor.advance_by(2);
                let name = self.parse_name()?;
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;

                let Some(frame) = stack.pop() else {
                    return Err(ParseError::at(ErrorKind::UnexpectedClosingTag { name }, pos));
                };
                if frame.node.name != name {
                    return Err(ParseError::at(
                        ErrorKind::MismatchedTag {
                            expected: frame.node.name,
                            found: name,
                        },
                        pos,
                    ));
                }
                if let Some(root) = attach(&mut stack, frame.finish()) {
                    return Ok(root);
                }
            } else if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->")?;
            } else if self.cursor.starts_with(b"<![CDATA[") {
                self.cursor.advance_by(9);
                let text = self.parse_cdata()?;
                if let Some(frame) = stack.last_mut() {
                    frame.segments.push(Segment { text, cdata: true });
                }
            } else if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
            } else {
                let depth = stack.len().saturating_add(1);
                if self.config.max_depth > 0 && depth > usize::from(self.config.max_depth) {
                    warn!(depth, max = self.config.max_depth, "xml nesting exceeds depth limit");
                    return Err(ParseError::MaxDepthExceeded {
                        max: self.config.max_depth,
                        pos: self.cursor.position(),
                    });
                }

                match self.parse_start_tag()? {
                    StartTag::Open(node) => stack.push(Frame::new(node)),
                    StartTag::Closed(node) => {
                        if let Some(root) = attach(&mut stack, node) {
                            return Ok(root);
                        }
                    }
                }
            }
        }
    }

    fn parse_start_tag(&mut self) -> Result<StartTag> {
        self.expect_byte(b'<')?;
        let name = self.parse_name()?;
        let mut node = Node::new(name);
        self.parse_attributes(&mut node)?;

        if self.cursor.consume(b'/') {
            self.expect_byte(b'>')?;
            return Ok(StartTag::Closed(node));
        }
        self.expect_byte(b'>')?;

        if self.config.is_verbatim(&node) {
            let markup = self.capture_verbatim(&node.name)?;
            if !markup.is_empty() {
                node.text = Some(markup);
                node.verbatim = true;
            }
            return Ok(StartTag::Closed(node));
        }

        Ok(StartTag::Open(node))
    }

    fn parse_attributes(&mut self, node: &mut Node) -> Result<()> {
        let mut attributes = IndexMap::new();
        let mut namespaces = IndexMap::new();

        loop {
            let had_space = self.cursor.current().is_some_and(is_whitespace);
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) if !had_space => return Err(self.unexpected("whitespace")),
                Some(_) => {}
                None => return Err(self.unexpected("'>'")),
            }

            let pos = self.cursor.position();
            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            let prefix = if name == "xmlns" {
                Some(String::new())
            } else {
                name.strip_prefix("xmlns:").map(str::to_string)
            };

            if let Some(prefix) = prefix {
                if namespaces.contains_key(&prefix) {
                    return Err(ParseError::at(ErrorKind::DuplicateNamespace { prefix }, pos));
                }
                namespaces.insert(prefix, value);
            } else {
                if attributes.contains_key(&name) {
                    return Err(ParseError::at(ErrorKind::DuplicateAttribute { name }, pos));
                }
                attributes.insert(name, value);
            }
        }

        node.attributes = attributes;
        node.namespaces = namespaces;
        Ok(())
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.unexpected("quoted attribute value")),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = bytes_to_str(raw, start_pos)?;
                return decode_entities(text, start_pos);
            }
            self.cursor.advance();
        }

        Err(self.error_here(ErrorKind::UnterminatedAttribute))
    }

    fn parse_text(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = bytes_to_str(self.cursor.slice_from(start), start_pos)?;
        decode_entities(raw, start_pos)
    }

    fn parse_cdata(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(b"]]>") {
                let raw = bytes_to_str(self.cursor.slice_from(start), start_pos)?;
                self.cursor.advance_by(3);
                return Ok(raw.to_string());
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    /// Capture everything up to the matching end tag of `name` as-is.
    fn capture_verbatim(&mut self, name: &str) -> Result<String> {
        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        let mut depth = 0usize;

        loop {
            match self.cursor.current() {
                None => {
                    return Err(self.error_here(ErrorKind::UnterminatedElement {
                        name: name.to_string(),
                    }))
                }
                Some(b'<') => {
                    if self.cursor.starts_with(b"<!--") {
                        self.cursor.advance_by(4);
                        self.skip_until(b"-->")?;
                    } else if self.cursor.starts_with(b"<![CDATA[") {
                        self.cursor.advance_by(9);
                        self.skip_until(b"]]>")?;
                    } else if self.cursor.starts_with(b"<?") {
                        self.cursor.advance_by(2);
                        self.skip_until(b"?>")?;
                    } else if self.cursor.starts_with(b"</") && depth == 0 {
                        let raw = bytes_to_str(self.cursor.slice_from(start), start_pos)?;
                        let pos = self.cursor.position();
                        self.cursor.advance_by(2);
                        let close = self.parse_name()?;
                        if close != name {
                            return Err(ParseError::at(
                                ErrorKind::MismatchedTag {
                                    expected: name.to_string(),
                                    found: close,
                                },
                                pos,
                            ));
                        }
                        self.cursor.skip_whitespace();
                        self.expect_byte(b'>')?;
                        return Ok(raw.to_string());
                    } else if self.cursor.starts_with(b"</") {
                        depth -= 1;
                        self.skip_tag()?;
                    } else if !self.skip_tag()? {
                        depth += 1;
                    }
                }
                Some(_) => self.cursor.advance(),
            }
        }
    }

    /// Skip a tag honoring quoted values; returns whether it was self-closing
    fn skip_tag(&mut self) -> Result<bool> {
        let mut quote = None;
        let mut previous = None;
        while let Some(b) = self.cursor.current() {
            self.cursor.advance();
            match (quote, b) {
                (Some(q), _) if q == b => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'>') => return Ok(previous == Some(b'/')),
                (None, _) => {}
            }
            previous = Some(b);
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn skip_doctype(&mut self) -> Result<()> {
        let mut brackets = 0usize;
        while let Some(b) = self.cursor.current() {
            self.cursor.advance();
            match b {
                b'[' => brackets += 1,
                b']' => brackets = brackets.saturating_sub(1),
                b'>' if brackets == 0 => return Ok(()),
                _ => {}
            }
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();

        match self.cursor.current() {
            Some(first) if is_name_start(first) => self.cursor.advance(),
            _ => return Err(ParseError::at(ErrorKind::InvalidName, start_pos)),
        }
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        bytes_to_str(self.cursor.slice_from(start), start_pos).map(str::to_string)
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here(ErrorKind::UnterminatedMarkup))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.unexpected(&describe(Some(expected))))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        self.error_here(ErrorKind::UnexpectedToken {
            expected: expected.to_string(),
            found: describe(self.cursor.current()),
        })
    }

    fn error_here(&self, kind: ErrorKind) -> ParseError {
        ParseError::at(kind, self.cursor.position())
    }
}

/// Whether `markup` reads back unchanged as the verbatim content of an
/// element named `name`
pub(crate) fn captures_verbatim(name: &str, markup: &str) -> bool {
    let input = format!("{markup}</{name}>");
    let mut parser = Parser::new(input.as_bytes());
    parser
        .capture_verbatim(name)
        .is_ok_and(|captured| captured == markup)
        && parser.cursor.is_eof()
}

/// Append a finished node to its parent; hands the node back when it is the root
fn attach(stack: &mut [Frame], node: Node) -> Option<Node> {
    match stack.last_mut() {
        Some(parent) => {
            parent.node.children.push(node);
            None
        }
        None => Some(node),
    }
}

fn describe(byte: Option<u8>) -> String {
    match byte {
        Some(b) => format!("'{}'", char::from(b)),
        None => "end of input".to_string(),
    }
}

fn bytes_to_str(bytes: &[u8], pos: Pos) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|err| {
        let offset = pos.offset.saturating_add(err.valid_up_to());
        ParseError::at(ErrorKind::InvalidUtf8, Pos { offset, ..pos })
    })
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

/// Resolve the predefined and numeric character references in `input`.
/// `pos` is where `input` starts, used to locate bad references.
fn decode_entities(input: &str, pos: Pos) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (before, after) = rest.split_at(amp);
        result.push_str(before);
        let offset = pos.offset + (input.len() - rest.len()) + amp;
        let error = |entity: &str| {
            ParseError::at(
                ErrorKind::InvalidEntity {
                    entity: entity.to_string(),
                },
                Pos { offset, ..pos },
            )
        };

        let body = after.get(1..).unwrap_or_default();
        let Some(end) = body.find(';') else {
            return Err(error(body.split_whitespace().next().unwrap_or_default()));
        };
        let entity = body.get(..end).unwrap_or_default();
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };
        match decoded {
            Some(ch) => result.push(ch),
            None => return Err(error(entity)),
        }
        rest = body.get(end + 1..).unwrap_or_default();
    }
    result.push_str(rest);

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input.as_bytes()).parse()
    }

    fn malformed_kind(input: &str) -> Option<ErrorKind> {
        parse(input).err().and_then(|err| err.kind().cloned())
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_depth, 128);
        assert_eq!(config.max_size, 10 * 1024 * 1024);
        assert_eq!(config.verbatim_types, ["xhtml"]);
    }

    #[test]
    fn test_config_unlimited() {
        let config = Config::unlimited();
        assert_eq!(config.max_depth, 0);
        assert_eq!(config.max_size, 0);
    }

    #[test]
    fn test_parse_simple_element() -> Result<()> {
        let doc = parse("<root></root>")?;
        assert_eq!(doc.root, Node::new("root"));
        assert_eq!(doc.declaration, None);
        Ok(())
    }

    #[test]
    fn test_parse_with_attributes() -> Result<()> {
        let doc = parse("<root id=\"1\" name='test'></root>")?;
        assert_eq!(doc.root.attribute("id"), Some("1"));
        assert_eq!(doc.root.attribute("name"), Some("test"));
        let keys: Vec<_> = doc.root.attributes.keys().collect();
        assert_eq!(keys, ["id", "name"]);
        Ok(())
    }

    #[test]
    fn test_parse_nested() -> Result<()> {
        let doc = parse("<root>\n  <child>text</child>\n</root>")?;
        let expected = Node::new("root").with_child(Node::new("child").with_text("text"));
        assert_eq!(doc.root, expected);
        Ok(())
    }

    #[test]
    fn test_parse_self_closing() -> Result<()> {
        let doc = parse("<root><child /><other/></root>")?;
        assert_eq!(
            doc.root,
            Node::new("root")
                .with_child(Node::new("child"))
                .with_child(Node::new("other"))
        );
        Ok(())
    }

    #[test]
    fn test_leaf_whitespace_is_preserved() -> Result<()> {
        let doc = parse("<root><a>  padded  </a></root>")?;
        assert_eq!(
            doc.root.child("a").and_then(|a| a.text.as_deref()),
            Some("  padded  ")
        );
        Ok(())
    }

    #[test]
    fn test_parse_entities() -> Result<()> {
        let doc = parse("<r a=\"&quot;x&quot;\">&lt;b&gt; &amp; &apos;&#65;&#x42;</r>")?;
        assert_eq!(doc.root.attribute("a"), Some("\"x\""));
        assert_eq!(doc.root.text.as_deref(), Some("<b> & 'AB"));
        Ok(())
    }

    #[test]
    fn test_invalid_entity_offset() {
        let err = parse("<r>ab&bogus;</r>").err();
        assert_eq!(err.as_ref().map(ParseError::offset), Some(5));
        assert_eq!(
            err.and_then(|e| e.kind().cloned()),
            Some(ErrorKind::InvalidEntity {
                entity: "bogus".to_string()
            })
        );
    }

    #[test]
    fn test_unterminated_entity() {
        assert!(matches!(
            malformed_kind("<r>a & b</r>"),
            Some(ErrorKind::InvalidEntity { .. })
        ));
    }

    #[test]
    fn test_namespaces_are_diverted() -> Result<()> {
        let doc = parse(
            "<feed xmlns=\"http://www.w3.org/2005/Atom\" xmlns:ns=\"http://example.ns/namespace\" id=\"1\"/>",
        )?;
        assert_eq!(doc.root.attributes.len(), 1);
        assert_eq!(
            doc.root.namespaces.get(""),
            Some(&"http://www.w3.org/2005/Atom".to_string())
        );
        assert_eq!(
            doc.root.namespaces.get("ns"),
            Some(&"http://example.ns/namespace".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_attribute_is_rejected() {
        assert_eq!(
            malformed_kind("<r a=\"1\" a=\"2\"/>"),
            Some(ErrorKind::DuplicateAttribute {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_namespace_is_rejected() {
        assert!(matches!(
            malformed_kind("<r xmlns:a=\"x\" xmlns:a=\"y\"/>"),
            Some(ErrorKind::DuplicateNamespace { .. })
        ));
    }

    #[test]
    fn test_mismatched_tag() {
        let err = parse("<a><b></a></b>").err();
        assert_eq!(err.as_ref().map(ParseError::offset), Some(6));
        assert!(matches!(
            err.and_then(|e| e.kind().cloned()),
            Some(ErrorKind::MismatchedTag { .. })
        ));
    }

    #[test]
    fn test_unterminated_element() {
        assert_eq!(
            malformed_kind("<a><b></b>"),
            Some(ErrorKind::UnterminatedElement {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(malformed_kind("<a/><b/>"), Some(ErrorKind::TrailingContent));
    }

    #[test]
    fn test_missing_root() {
        assert_eq!(malformed_kind("  "), Some(ErrorKind::MissingRoot));
        assert_eq!(malformed_kind("<!-- only -->"), Some(ErrorKind::MissingRoot));
    }

    #[test]
    fn test_attributes_need_separation() {
        assert!(matches!(
            malformed_kind("<a x=\"1\"y=\"2\"/>"),
            Some(ErrorKind::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_declaration_and_prolog() -> Result<()> {
        let doc = parse(
            "\u{feff}<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<!DOCTYPE r [<!ENTITY x \"y\">]>\n<!-- c -->\n<r/>\n<!-- after -->\n",
        )?;
        assert_eq!(
            doc.declaration,
            Some(Declaration {
                version: "1.0".to_string(),
                encoding: Some("UTF-8".to_string()),
                standalone: Some(true),
            })
        );
        assert_eq!(doc.root, Node::new("r"));
        Ok(())
    }

    #[test]
    fn test_stylesheet_pi_is_not_a_declaration() -> Result<()> {
        let doc = parse("<?xml-stylesheet href=\"s.xsl\"?><r/>")?;
        assert_eq!(doc.declaration, None);
        Ok(())
    }

    #[test]
    fn test_cdata_is_text() -> Result<()> {
        let doc = parse("<r><![CDATA[<b>&amp;</b>]]></r>")?;
        assert_eq!(doc.root.text.as_deref(), Some("<b>&amp;</b>"));
        assert!(!doc.root.verbatim);
        Ok(())
    }

    #[test]
    fn test_cdata_whitespace_survives_next_to_children() -> Result<()> {
        let doc = parse("<p><![CDATA[ ]]><b>x</b>\n</p>")?;
        assert_eq!(doc.root.text.as_deref(), Some(" "));
        assert_eq!(doc.root.children.len(), 1);
        Ok(())
    }

    #[test]
    fn test_captures_verbatim() {
        assert!(captures_verbatim("xhtml", "<p>a &amp; b</p>"));
        assert!(captures_verbatim("xhtml", "a & b"));
        assert!(captures_verbatim("xhtml", "<br/><p>x</p>"));
        assert!(!captures_verbatim("xhtml", "<p>"));
        assert!(!captures_verbatim("xhtml", "</p>"));
        assert!(!captures_verbatim("xhtml", "x</xhtml>y"));
    }

    #[test]
    fn test_verbatim_capture() -> Result<()> {
        let markup = "<div xmlns=\"http://www.w3.org/1999/xhtml\"><p><strong>Some markings</strong><a href=\"http://www.example.org/\">Example</a></p><br/><div class=\"blockquote\"><p>On a quote...</p></div></div>";
        let input = format!("<item><xhtml type=\"xhtml\">{markup}</xhtml><name>n</name></item>");
        let doc = parse(&input)?;
        let xhtml = doc.root.child("xhtml");
        assert_eq!(xhtml.and_then(|x| x.text.as_deref()), Some(markup));
        assert_eq!(xhtml.map(|x| x.verbatim), Some(true));
        assert_eq!(xhtml.map(|x| x.children.len()), Some(0));
        assert!(doc.root.child("name").is_some());
        Ok(())
    }

    #[test]
    fn test_verbatim_honors_config() -> Result<()> {
        let input = b"<r type=\"html\"><b>x</b></r>";
        let doc = Parser::new(input).parse()?;
        assert!(!doc.root.verbatim);
        assert_eq!(doc.root.children.len(), 1);

        let config = Config::default().with_verbatim_types(["html"]);
        let doc = Parser::with_config(input, config).parse()?;
        assert!(doc.root.verbatim);
        assert_eq!(doc.root.text.as_deref(), Some("<b>x</b>"));
        Ok(())
    }

    #[test]
    fn test_verbatim_mismatched_end() {
        assert!(matches!(
            malformed_kind("<x type=\"xhtml\"><p>t</p></y>"),
            Some(ErrorKind::MismatchedTag { .. })
        ));
    }

    #[test]
    fn test_max_depth() {
        let config = Config::new(2, 0);
        let result = Parser::with_config(b"<a><b><c/></b></a>", config).parse();
        assert!(matches!(
            result,
            Err(ParseError::MaxDepthExceeded { max: 2, .. })
        ));
    }

    #[test]
    fn test_max_size() {
        let config = Config::new(0, 4);
        let result = Parser::with_config(b"<abc/>", config).parse();
        assert_eq!(result, Err(ParseError::MaxSizeExceeded { max: 4 }));
    }

    #[test]
    fn test_invalid_utf8() {
        let result = Parser::new(b"<r>\xff</r>").parse();
        assert_eq!(
            result.err().and_then(|e| e.kind().cloned()),
            Some(ErrorKind::InvalidUtf8)
        );
    }
}

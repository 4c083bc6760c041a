//! XML rendering

use crate::xml::cursor::is_whitespace;
use crate::xml::model::{Declaration, Document, Node};

const INDENT: &str = "  ";

impl Document {
    /// Render this document as XML text
    pub fn to_xml_string(&self, formatted: bool) -> String {
        Renderer::new(formatted).document(self)
    }
}

/// Turns a document tree back into XML text.
///
/// Formatted output puts one element per line, indented two spaces per
/// level. Elements carrying text stay on a single line together with
/// everything inside them, so re-parsing formatted output never picks up
/// layout whitespace as content.
#[derive(Debug)]
pub struct Renderer {
    output: String,
    formatted: bool,
}

impl Renderer {
    pub const fn new(formatted: bool) -> Self {
        Self {
            output: String::new(),
            formatted,
        }
    }

    pub fn document(mut self, document: &Document) -> String {
        if let Some(declaration) = &document.declaration {
            self.declaration(declaration);
            if self.formatted {
                self.output.push('\n');
            }
        }
        self.element(&document.root, 0);
        self.output
    }

    fn declaration(&mut self, declaration: &Declaration) {
        self.output.push_str("<?xml version=\"");
        escape_into(&mut self.output, &declaration.version, true);
        self.output.push('"');
        if let Some(encoding) = &declaration.encoding {
            self.output.push_str(" encoding=\"");
            escape_into(&mut self.output, encoding, true);
            self.output.push('"');
        }
        if let Some(standalone) = declaration.standalone {
            self.output.push_str(" standalone=\"");
            self.output.push_str(if standalone { "yes" } else { "no" });
            self.output.push('"');
        }
        self.output.push_str("?>");
    }

    fn element(&mut self, node: &Node, depth: usize) {
        if self.formatted {
            self.indent(depth);
        }
        self.start_tag(node);

        if node.children.is_empty() && node.text.is_none() {
            self.output.push_str("/>");
            return;
        }
        self.output.push('>');

        if node.text.is_some() || !self.formatted {
            self.text(node);
            for child in &node.children {
                self.inline(child);
            }
        } else {
            for child in &node.children {
                self.output.push('\n');
                self.element(child, depth + 1);
            }
            self.output.push('\n');
            self.indent(depth);
        }
        self.end_tag(node);
    }

    /// Render without any layout whitespace regardless of mode
    fn inline(&mut self, node: &Node) {
        self.start_tag(node);
        if node.children.is_empty() && node.text.is_none() {
            self.output.push_str("/>");
            return;
        }
        self.output.push('>');
        self.text(node);
        for child in &node.children {
            self.inline(child);
        }
        self.end_tag(node);
    }

    fn start_tag(&mut self, node: &Node) {
        self.output.push('<');
        self.output.push_str(&node.name);

        for (prefix, uri) in &node.namespaces {
            self.output.push_str(" xmlns");
            if !prefix.is_empty() {
                self.output.push(':');
                self.output.push_str(prefix);
            }
            self.output.push_str("=\"");
            escape_into(&mut self.output, uri, true);
            self.output.push('"');
        }

        for (key, value) in &node.attributes {
            self.output.push(' ');
            self.output.push_str(key);
            self.output.push_str("=\"");
            escape_into(&mut self.output, value, true);
            self.output.push('"');
        }
    }

    fn end_tag(&mut self, node: &Node) {
        self.output.push_str("</");
        self.output.push_str(&node.name);
        self.output.push('>');
    }

    fn text(&mut self, node: &Node) {
        if let Some(text) = &node.text {
            if node.verbatim {
                self.output.push_str(text);
            } else if !node.children.is_empty() && text.bytes().all(is_whitespace) {
                // whitespace beside child elements only survives as CDATA
                self.output.push_str("<![CDATA[");
                self.output.push_str(text);
                self.output.push_str("]]>");
            } else {
                escape_into(&mut self.output, text, false);
            }
        }
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.output.push_str(INDENT);
        }
    }
}

/// Escape `&`, `<`, `>` and, inside attribute values, `"`
fn escape_into(output: &mut String, input: &str, attribute: bool) {
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if attribute => output.push_str("&quot;"),
            _ => output.push(ch),
        }
    }
}

//! XML data model

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// XML document
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    pub declaration: Option<Declaration>,
    pub root: Node,
}

impl Document {
    pub const fn new(root: Node) -> Self {
        Self {
            declaration: None,
            root,
        }
    }

    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declaration = Some(declaration);
        self
    }
}

/// The `<?xml ...?>` declaration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// XML element
///
/// `namespaces` maps a prefix to its URI; the default namespace uses the
/// empty prefix. `verbatim` marks `text` as raw markup that is emitted
/// without escaping.
///
/// Equality is structural and order-sensitive for attributes, namespaces
/// and children alike.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub name: String,
    pub text: Option<String>,
    pub verbatim: bool,
    pub attributes: IndexMap<String, String>,
    pub namespaces: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.text == other.text
            && self.verbatim == other.verbatim
            && self.attributes.iter().eq(other.attributes.iter())
            && self.namespaces.iter().eq(other.namespaces.iter())
            && self.children == other.children
    }
}

impl Eq for Node {}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set raw markup content
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.text = Some(markup.into());
        self.verbatim = true;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// No text, attributes, namespaces or children
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.attributes.is_empty()
            && self.namespaces.is_empty()
            && self.children.is_empty()
    }
}

//! Decode-time view over a node

use indexmap::IndexMap;

use crate::xml::model::Node;

/// A node as seen by a decoder.
///
/// Each slot (attributes, namespaces, text, children) is present or
/// absent independently, so a nested value can be decoded against just
/// the attribute set of its element without inventing synthetic children.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    name: &'a str,
    attributes: Option<&'a IndexMap<String, String>>,
    namespaces: Option<&'a IndexMap<String, String>>,
    text: Option<&'a str>,
    children: &'a [Node],
}

impl<'a> View<'a> {
    /// Every slot of `node`
    pub fn of(node: &'a Node) -> Self {
        Self {
            name: &node.name,
            attributes: Some(&node.attributes),
            namespaces: Some(&node.namespaces),
            text: node.text.as_deref(),
            children: &node.children,
        }
    }

    /// A view with no slots at all
    pub const fn empty(name: &'a str) -> Self {
        Self {
            name,
            attributes: None,
            namespaces: None,
            text: None,
            children: &[],
        }
    }

    /// Only the attribute slot of this view
    pub const fn attributes_only(&self) -> Self {
        Self {
            name: self.name,
            attributes: self.attributes,
            namespaces: None,
            text: None,
            children: &[],
        }
    }

    pub const fn name(&self) -> &'a str {
        self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.attributes?.get(key).map(String::as_str)
    }

    pub fn namespace(&self, prefix: &str) -> Option<&'a str> {
        self.namespaces?.get(prefix).map(String::as_str)
    }

    pub const fn text(&self) -> Option<&'a str> {
        self.text
    }

    pub const fn children(&self) -> &'a [Node] {
        self.children
    }

    /// Children named `key`, in document order
    pub fn children_named<'k>(&self, key: &'k str) -> impl Iterator<Item = &'a Node> + 'k
    where
        'a: 'k,
    {
        let children: &'a [Node] = self.children;
        children.iter().filter(move |child| child.name == key)
    }

    /// Whether any child name carries `prefix:`
    pub fn has_prefixed_child(&self, prefix: &str) -> bool {
        self.children.iter().any(|child| {
            child
                .name
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(':'))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_none_or(IndexMap::is_empty)
            && self.namespaces.is_none_or(IndexMap::is_empty)
            && self.text.is_none()
            && self.children.is_empty()
    }
}

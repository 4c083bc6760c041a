//! Typed encoding into document trees
//!
//! The inverse of [`decode`](crate::codec::decode): [`Encode`] writes a
//! value into an element, and the free functions emit one record field
//! each, in declaration order.

use crate::codec::decode::namespace_prefix;
use crate::codec::scalar::ScalarField;
use crate::error::EncodeError;
use crate::xml::model::Node;
use crate::xml::parser::{captures_verbatim, VERBATIM_TYPES};

type Result<T> = std::result::Result<T, EncodeError>;

/// A value that can be written into an element
pub trait Encode {
    /// Write this value's attributes, text and children into `node`
    fn encode(&self, node: &mut Node) -> Result<()>;

    /// Append this value to `parent` as child element(s) named `key`
    fn encode_child(&self, key: &str, parent: &mut Node) -> Result<()> {
        let mut child = Node::new(key);
        self.encode(&mut child)?;
        finish(&mut child)?;
        parent.children.push(child);
        Ok(())
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, node: &mut Node) -> Result<()> {
        match self {
            Some(value) => value.encode(node),
            None => Ok(()),
        }
    }

    fn encode_child(&self, key: &str, parent: &mut Node) -> Result<()> {
        match self {
            Some(value) => value.encode_child(key, parent),
            None => Ok(()),
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, node: &mut Node) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(node))
    }

    /// One sibling element per item, in order
    fn encode_child(&self, key: &str, parent: &mut Node) -> Result<()> {
        self.iter().try_for_each(|item| item.encode_child(key, parent))
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, node: &mut Node) -> Result<()> {
        (**self).encode(node)
    }

    fn encode_child(&self, key: &str, parent: &mut Node) -> Result<()> {
        (**self).encode_child(key, parent)
    }
}

pub fn attribute<T: ScalarField>(node: &mut Node, key: &str, value: &T) -> Result<()> {
    if let Some(text) = value.to_slot(key)? {
        node.attributes.insert(key.to_string(), text);
    }
    Ok(())
}

/// Empty text is stored as no text. An optional field holding `Some("")`
/// could not be told apart from `None` when decoding, so it is refused.
pub fn text<T: ScalarField>(node: &mut Node, value: &T) -> Result<()> {
    let slot = value.to_slot(&node.name)?;
    if !T::REQUIRED && slot.as_deref() == Some("") {
        return Err(unrepresentable(&node.name));
    }
    node.text = slot.filter(|text| !text.is_empty());
    Ok(())
}

/// Raw markup. It is written unescaped only when the element's `type`
/// attribute selects verbatim capture (see [`finish`]); otherwise it is
/// ordinary escaped text.
pub fn markup<T: ScalarField>(node: &mut Node, value: &T) -> Result<()> {
    text(node, value)
}

pub fn child<T: Encode>(node: &mut Node, key: &str, value: &T) -> Result<()> {
    value.encode_child(key, node)
}

/// Only the attributes `value` produces land on `node`
pub fn attributes<T: Encode>(node: &mut Node, value: &T) -> Result<()> {
    let mut scratch = Node::new(node.name.as_str());
    value.encode(&mut scratch)?;
    node.attributes.extend(scratch.attributes);
    Ok(())
}

pub fn namespace<T: ScalarField>(node: &mut Node, key: &str, value: &T) -> Result<()> {
    if let Some(uri) = value.to_slot(key)? {
        node.namespaces.insert(namespace_prefix(key).to_string(), uri);
    }
    Ok(())
}

/// Settle a fully encoded element.
///
/// The parser captures the content of an element whose `type` is one of
/// [`VERBATIM_TYPES`] byte-for-byte, so such an element renders its text
/// unescaped and must have no child elements; its text must also read back
/// unchanged. Every other element renders escaped text.
pub(crate) fn finish(node: &mut Node) -> Result<()> {
    let verbatim_type = node
        .attribute("type")
        .is_some_and(|ty| VERBATIM_TYPES.iter().any(|verbatim| *verbatim == ty));
    if !verbatim_type {
        node.verbatim = false;
        return Ok(());
    }
    if !node.children.is_empty() {
        return Err(unrepresentable(&node.name));
    }
    if let Some(text) = &node.text {
        if !captures_verbatim(&node.name, text) {
            return Err(unrepresentable(&node.name));
        }
    }
    node.verbatim = node.text.is_some();
    Ok(())
}

fn unrepresentable(key: &str) -> EncodeError {
    EncodeError::UnrepresentableValue {
        key: key.to_string(),
    }
}

/// Namespace-scoped children go straight into `node`; the `key` wrapper
/// exists only on the decoding side.
pub fn scoped<T: Encode>(node: &mut Node, _key: &str, value: &T) -> Result<()> {
    value.encode(node)
}

//! Typed decoding of document trees
//!
//! [`Decode`] turns a [`View`] into a value. The free functions in this
//! module resolve one field of a record each and are what the
//! [`record!`](crate::record) macro expands to.

use crate::codec::scalar::ScalarField;
use crate::codec::view::View;
use crate::error::DecodeError;
use crate::xml::model::Node;

type Result<T> = std::result::Result<T, DecodeError>;

/// A value that can be built from an element
pub trait Decode: Sized {
    /// Whether a child field of this type must be present
    const REQUIRED: bool = true;

    fn decode(view: &View<'_>) -> Result<Self>;

    /// Build a value from the children matching `key`. Singular values
    /// take the first match and ignore the rest.
    fn decode_matches<'a, I>(key: &str, mut matches: I) -> Result<Self>
    where
        I: Iterator<Item = &'a Node>,
    {
        match matches.next() {
            Some(node) => Self::decode(&View::of(node)),
            None => Err(DecodeError::missing(key)),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    const REQUIRED: bool = false;

    /// An empty view decodes to `None`
    fn decode(view: &View<'_>) -> Result<Self> {
        if view.is_empty() {
            Ok(None)
        } else {
            T::decode(view).map(Some)
        }
    }

    fn decode_matches<'a, I>(_key: &str, mut matches: I) -> Result<Self>
    where
        I: Iterator<Item = &'a Node>,
    {
        matches
            .next()
            .map(|node| T::decode(&View::of(node)))
            .transpose()
    }
}

impl<T: Decode> Decode for Vec<T> {
    const REQUIRED: bool = false;

    /// A single element is a sequence of one
    fn decode(view: &View<'_>) -> Result<Self> {
        T::decode(view).map(|value| vec![value])
    }

    fn decode_matches<'a, I>(_key: &str, matches: I) -> Result<Self>
    where
        I: Iterator<Item = &'a Node>,
    {
        matches.map(|node| T::decode(&View::of(node))).collect()
    }
}

impl<T: Decode> Decode for Box<T> {
    const REQUIRED: bool = T::REQUIRED;

    fn decode(view: &View<'_>) -> Result<Self> {
        T::decode(view).map(Self::new)
    }

    fn decode_matches<'a, I>(key: &str, matches: I) -> Result<Self>
    where
        I: Iterator<Item = &'a Node>,
    {
        T::decode_matches(key, matches).map(Self::new)
    }
}

/// Attribute `key` of the element
pub fn attribute<T: ScalarField>(view: &View<'_>, key: &str) -> Result<T> {
    T::from_attribute(key, view.attribute(key))
}

/// The element's own text
pub fn text<T: ScalarField>(view: &View<'_>) -> Result<T> {
    T::from_text(view.name(), view.text())
}

/// Child element(s) named `key`; cardinality follows `T`
pub fn child<T: Decode>(view: &View<'_>, key: &str) -> Result<T> {
    T::decode_matches(key, view.children_named(key))
}

/// Children named `key`, at least one of them
pub fn nonempty_children<T: Decode>(view: &View<'_>, key: &str) -> Result<Vec<T>> {
    let items: Vec<T> = child(view, key)?;
    if items.is_empty() {
        return Err(DecodeError::Empty {
            key: key.to_string(),
        });
    }
    Ok(items)
}

/// A nested value built from the element's attribute set alone
pub fn attributes<T: Decode>(view: &View<'_>) -> Result<T> {
    T::decode(&view.attributes_only())
}

/// The URI bound to the prefix in an `xmlns:<prefix>` key
pub fn namespace<T: ScalarField>(view: &View<'_>, key: &str) -> Result<T> {
    T::from_attribute(key, view.namespace(namespace_prefix(key)))
}

/// A namespace-scoped nested value: a child literally named `key` if
/// there is one, else the `<prefix>:*` children of this element.
pub fn scoped<T: Decode>(view: &View<'_>, key: &str) -> Result<T> {
    if let Some(node) = view.children_named(key).next() {
        return T::decode(&View::of(node));
    }
    if view.has_prefixed_child(namespace_prefix(key)) {
        T::decode(view)
    } else {
        T::decode(&View::empty(key))
    }
}

/// `xmlns:ns` → `ns`, `xmlns` → the default (empty) prefix
pub(crate) fn namespace_prefix(key: &str) -> &str {
    if key == "xmlns" {
        return "";
    }
    key.strip_prefix("xmlns:").unwrap_or(key)
}

//! Coding-key tables

use crate::xml::model::Node;

/// How a field maps onto its element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// An attribute of the element
    Attribute,
    /// The element's own text
    Text,
    /// The element's own text, kept as raw markup
    Markup,
    /// One child element (or an optional one)
    Child,
    /// Every child element with the key, in order
    Children,
    /// A nested value read from the element's attribute set (`@attributes`)
    Attributes,
    /// The URI of an `xmlns:<prefix>` declaration
    Namespace,
    /// A nested value made of `<prefix>:*` children
    Scoped,
}

/// One entry of a coding-key table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Rust field name
    pub name: &'static str,
    /// XML key the field maps to
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A type with a declared XML shape
pub trait Record {
    /// Fields in declaration order, which is also encoding order
    const FIELDS: &'static [Field];

    fn field(key: &str) -> Option<&'static Field> {
        Self::FIELDS.iter().find(|field| field.key == key)
    }
}

/// A type that can stand as a document's root element
pub trait RootElement {
    const ROOT: &'static str;
}

/// Attributes and children of `node` that no field of `R` would read.
///
/// Decoding ignores unknown content; this reports it for callers that
/// want to be strict.
pub fn unmapped<'a, R: Record>(node: &'a Node) -> Vec<&'a str> {
    let covers_attributes = R::FIELDS
        .iter()
        .any(|field| field.kind == FieldKind::Attributes);
    let attributes = node
        .attributes
        .keys()
        .map(String::as_str)
        .filter(|key| !covers_attributes && !covered(R::FIELDS, FieldKind::Attribute, key));

    let mut seen = Vec::new();
    let children = node
        .children
        .iter()
        .map(|child| child.name.as_str())
        .filter(|name| {
            !R::FIELDS.iter().any(|field| match field.kind {
                FieldKind::Child | FieldKind::Children => field.key == *name,
                FieldKind::Scoped => {
                    field.key == *name || scoped_prefix(field.key).is_some_and(|p| has_prefix(name, p))
                }
                _ => false,
            })
        });

    for key in attributes.chain(children) {
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

fn covered(fields: &[Field], kind: FieldKind, key: &str) -> bool {
    fields
        .iter()
        .any(|field| field.kind == kind && field.key == key)
}

fn scoped_prefix(key: &str) -> Option<&str> {
    key.strip_prefix("xmlns:")
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry;

    impl Record for Entry {
        const FIELDS: &'static [Field] = &[
            Field {
                name: "id",
                key: "id",
                kind: FieldKind::Attribute,
                required: true,
            },
            Field {
                name: "title",
                key: "title",
                kind: FieldKind::Child,
                required: false,
            },
            Field {
                name: "extra",
                key: "xmlns:ns",
                kind: FieldKind::Scoped,
                required: false,
            },
        ];
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(Entry::field("title").map(|f| f.kind), Some(FieldKind::Child));
        assert_eq!(Entry::field("nope"), None);
    }

    #[test]
    fn test_unmapped() {
        let node = Node::new("entry")
            .with_attribute("id", "1")
            .with_attribute("lang", "en")
            .with_child(Node::new("title"))
            .with_child(Node::new("ns:title"))
            .with_child(Node::new("summary"))
            .with_child(Node::new("summary"));
        assert_eq!(unmapped::<Entry>(&node), ["lang", "summary"]);
    }
}

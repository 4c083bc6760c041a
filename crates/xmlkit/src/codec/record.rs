//! Declarative records
//!
//! [`record!`](crate::record) declares a struct together with its
//! coding-key table and its [`Decode`](crate::codec::Decode) and
//! [`Encode`](crate::codec::Encode) impls.
//!
//! ```
//! use xmlkit::record;
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Title as "title" {
//!         pub kind: String => attribute("type"),
//!         pub text: String => text,
//!     }
//! }
//!
//! let title: Title = xmlkit::from_xml(br#"<title type="text">Sample</title>"#)?;
//! assert_eq!(title.kind, "text");
//! assert_eq!(xmlkit::to_xml(&title, false)?, r#"<title type="text">Sample</title>"#);
//! # Ok::<(), xmlkit::Error>(())
//! ```
//!
//! Each field is `name: Type => kind` or `name: Type => kind("key")`:
//!
//! | kind                | XML                                        | key default    |
//! |---------------------|--------------------------------------------|----------------|
//! | `attribute`         | attribute of the element                   | field name     |
//! | `text`              | the element's own text                     | `@text`        |
//! | `markup`            | own text, raw under a verbatim `type`      | `@text`        |
//! | `child`             | first child named key (`Vec` = all)        | field name     |
//! | `children`          | every child named key, in order            | field name     |
//! | `nonempty_children` | like `children`, at least one              | field name     |
//! | `attributes`        | nested record read from the attribute set  | `@attributes`  |
//! | `namespace`         | URI of an `xmlns:<prefix>` declaration     | field name     |
//! | `scoped`            | nested record of `<prefix>:*` children     | field name     |
//!
//! Raw identifiers such as `r#type` need an explicit key.
//!
//! XML cannot tell empty text from no text, and the tree stores both as
//! `None`. A required `String` `text`/`markup` field therefore decodes
//! missing text as `""`; other required scalars fail with
//! [`DecodeError::MissingField`](crate::error::DecodeError). An optional one
//! (`Option<String>`) decodes it as `None`, and encoding `Some("")` fails
//! with [`EncodeError::UnrepresentableValue`](crate::error::EncodeError).
//!
//! `markup` text is written unescaped only when the element's `type`
//! attribute is one the parser captures verbatim (`xhtml`); it must then
//! read back unchanged. Elsewhere it is escaped like any other text.

#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(as $root:literal)? {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $kind:ident $(($key:literal))?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::codec::Record for $name {
            const FIELDS: &'static [$crate::codec::Field] = &[
                $( $crate::__record_field!($field, $ty, $kind $(($key))?), )*
            ];
        }

        impl $crate::codec::Decode for $name {
            #[allow(unused_variables)]
            fn decode(
                view: &$crate::codec::View<'_>,
            ) -> ::core::result::Result<Self, $crate::error::DecodeError> {
                ::core::result::Result::Ok(Self {
                    $( $field: $crate::__record_decode!(view, $field, $kind $(($key))?), )*
                })
            }
        }

        impl $crate::codec::Encode for $name {
            #[allow(unused_variables)]
            fn encode(
                &self,
                node: &mut $crate::xml::Node,
            ) -> ::core::result::Result<(), $crate::error::EncodeError> {
                $( $crate::__record_encode!(node, &self.$field, $field, $kind $(($key))?); )*
                ::core::result::Result::Ok(())
            }
        }

        $(
            impl $crate::codec::RootElement for $name {
                const ROOT: &'static str = $root;
            }
        )?
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_key {
    ($field:ident, text) => {
        "@text"
    };
    ($field:ident, markup) => {
        "@text"
    };
    ($field:ident, attributes) => {
        "@attributes"
    };
    ($field:ident, $kind:ident ($key:literal)) => {
        $key
    };
    ($field:ident, $kind:ident) => {
        ::core::stringify!($field)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_kind {
    (attribute) => {
        $crate::codec::FieldKind::Attribute
    };
    (text) => {
        $crate::codec::FieldKind::Text
    };
    (markup) => {
        $crate::codec::FieldKind::Markup
    };
    (child) => {
        $crate::codec::FieldKind::Child
    };
    (children) => {
        $crate::codec::FieldKind::Children
    };
    (nonempty_children) => {
        $crate::codec::FieldKind::Children
    };
    (attributes) => {
        $crate::codec::FieldKind::Attributes
    };
    (namespace) => {
        $crate::codec::FieldKind::Namespace
    };
    (scoped) => {
        $crate::codec::FieldKind::Scoped
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_required {
    ($ty:ty, attribute) => {
        <$ty as $crate::codec::ScalarField>::REQUIRED
    };
    ($ty:ty, namespace) => {
        <$ty as $crate::codec::ScalarField>::REQUIRED
    };
    ($ty:ty, text) => {
        <$ty as $crate::codec::ScalarField>::REQUIRED
    };
    ($ty:ty, markup) => {
        <$ty as $crate::codec::ScalarField>::REQUIRED
    };
    ($ty:ty, child) => {
        <$ty as $crate::codec::Decode>::REQUIRED
    };
    ($ty:ty, scoped) => {
        <$ty as $crate::codec::Decode>::REQUIRED
    };
    ($ty:ty, nonempty_children) => {
        true
    };
    ($ty:ty, attributes) => {
        true
    };
    ($ty:ty, $kind:ident) => {
        false
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field {
    ($field:ident, $ty:ty, $kind:ident $(($key:literal))?) => {
        $crate::codec::Field {
            name: ::core::stringify!($field),
            key: $crate::__record_key!($field, $kind $(($key))?),
            kind: $crate::__record_kind!($kind),
            required: $crate::__record_required!($ty, $kind),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_decode {
    ($view:ident, $field:ident, attribute $(($key:literal))?) => {
        $crate::codec::decode::attribute($view, $crate::__record_key!($field, attribute $(($key))?))?
    };
    ($view:ident, $field:ident, text) => {
        $crate::codec::decode::text($view)?
    };
    ($view:ident, $field:ident, markup) => {
        $crate::codec::decode::text($view)?
    };
    ($view:ident, $field:ident, child $(($key:literal))?) => {
        $crate::codec::decode::child($view, $crate::__record_key!($field, child $(($key))?))?
    };
    ($view:ident, $field:ident, children $(($key:literal))?) => {
        $crate::codec::decode::child($view, $crate::__record_key!($field, children $(($key))?))?
    };
    ($view:ident, $field:ident, nonempty_children $(($key:literal))?) => {
        $crate::codec::decode::nonempty_children(
            $view,
            $crate::__record_key!($field, nonempty_children $(($key))?),
        )?
    };
    ($view:ident, $field:ident, attributes) => {
        $crate::codec::decode::attributes($view)?
    };
    ($view:ident, $field:ident, namespace $(($key:literal))?) => {
        $crate::codec::decode::namespace($view, $crate::__record_key!($field, namespace $(($key))?))?
    };
    ($view:ident, $field:ident, scoped $(($key:literal))?) => {
        $crate::codec::decode::scoped($view, $crate::__record_key!($field, scoped $(($key))?))?
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_encode {
    ($node:ident, $value:expr, $field:ident, attribute $(($key:literal))?) => {
        $crate::codec::encode::attribute(
            $node,
            $crate::__record_key!($field, attribute $(($key))?),
            $value,
        )?
    };
    ($node:ident, $value:expr, $field:ident, text) => {
        $crate::codec::encode::text($node, $value)?
    };
    ($node:ident, $value:expr, $field:ident, markup) => {
        $crate::codec::encode::markup($node, $value)?
    };
    ($node:ident, $value:expr, $field:ident, attributes) => {
        $crate::codec::encode::attributes($node, $value)?
    };
    ($node:ident, $value:expr, $field:ident, namespace $(($key:literal))?) => {
        $crate::codec::encode::namespace(
            $node,
            $crate::__record_key!($field, namespace $(($key))?),
            $value,
        )?
    };
    ($node:ident, $value:expr, $field:ident, scoped $(($key:literal))?) => {
        $crate::codec::encode::scoped(
            $node,
            $crate::__record_key!($field, scoped $(($key))?),
            $value,
        )?
    };
    // child, children, nonempty_children
    ($node:ident, $value:expr, $field:ident, $kind:ident $(($key:literal))?) => {
        $crate::codec::encode::child($node, $crate::__record_key!($field, $kind $(($key))?), $value)?
    };
}

#[cfg(test)]
mod tests {
    use crate::codec::{decode, encode, Decode, Encode, Field, FieldKind, Record, RootElement};
    use crate::error::DecodeError;
    use crate::xml::{Document, Node};

    crate::record! {
        #[derive(Clone, Debug, PartialEq)]
        pub struct Title {
            pub kind: String => attribute("type"),
            pub text: String => text,
        }
    }

    crate::record! {
        #[derive(Clone, Debug, PartialEq)]
        pub struct Header as "header" {
            pub title: Title => child,
            pub keyword: Vec<String> => children,
            pub version: Option<u32> => child,
        }
    }

    crate::record! {
        #[derive(Clone, Debug, Default, PartialEq)]
        struct Tags {
            tag: Vec<String> => nonempty_children,
        }
    }

    fn header() -> Header {
        Header {
            title: Title {
                kind: "text".to_string(),
                text: "Sample Document".to_string(),
            },
            keyword: vec!["Generic".to_string(), "Placeholder".to_string()],
            version: None,
        }
    }

    #[test]
    fn test_coding_key_table() {
        assert_eq!(
            Title::FIELDS,
            [
                Field {
                    name: "kind",
                    key: "type",
                    kind: FieldKind::Attribute,
                    required: true,
                },
                Field {
                    name: "text",
                    key: "@text",
                    kind: FieldKind::Text,
                    required: true,
                },
            ]
        );
        let required: Vec<_> = Header::FIELDS.iter().map(|f| f.required).collect();
        assert_eq!(required, [true, false, false]);
        assert_eq!(Tags::FIELDS.first().map(|f| f.required), Some(true));
        assert_eq!(Header::ROOT, "header");
    }

    #[test]
    fn test_record_decode() -> Result<(), Box<dyn std::error::Error>> {
        let node = Node::new("header")
            .with_child(
                Node::new("title")
                    .with_attribute("type", "text")
                    .with_text("Sample Document"),
            )
            .with_child(Node::new("keyword").with_text("Generic"))
            .with_child(Node::new("keyword").with_text("Placeholder"));
        let decoded: Header = decode(&Document::new(node))?;
        assert_eq!(decoded, header());
        Ok(())
    }

    #[test]
    fn test_record_encode_follows_field_order() -> Result<(), Box<dyn std::error::Error>> {
        let mut header = header();
        header.version = Some(2);
        let doc = encode(&header)?;
        let names: Vec<_> = doc.root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["title", "keyword", "keyword", "version"]);
        assert_eq!(Header::decode(&crate::codec::View::of(&doc.root))?, header);
        Ok(())
    }

    #[test]
    fn test_missing_required_child() {
        let node = Node::new("header");
        assert_eq!(
            decode::<Header>(&Document::new(node)),
            Err(DecodeError::missing("title"))
        );
    }

    #[test]
    fn test_nonempty_children() -> Result<(), Box<dyn std::error::Error>> {
        let empty = Node::new("tags");
        assert_eq!(
            decode::<Tags>(&Document::new(empty)),
            Err(DecodeError::Empty {
                key: "tag".to_string()
            })
        );

        let mut node = Node::new("tags");
        Tags {
            tag: vec!["a".to_string()],
        }
        .encode(&mut node)?;
        assert_eq!(node.children.len(), 1);
        Ok(())
    }
}

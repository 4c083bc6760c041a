//! Typed decoding and encoding
//!
//! A type's XML shape is a coding-key table ([`Record::FIELDS`]) plus
//! [`Decode`]/[`Encode`] impls, normally generated together by
//! [`record!`](crate::record). Decoders see nodes through a [`View`], which
//! keeps attributes, namespaces, text and children in separate slots.

pub mod attributes;
pub mod decode;
pub mod encode;
pub mod keys;
pub mod record;
pub mod scalar;
pub mod view;

use tracing::{debug, instrument};

pub use attributes::AttributesElement;
pub use decode::Decode;
pub use encode::Encode;
pub use keys::{unmapped, Field, FieldKind, Record, RootElement};
pub use scalar::{Scalar, ScalarField};
pub use view::View;

use crate::error::{DecodeError, EncodeError};
use crate::xml::model::{Document, Node};

/// Decode the document's root element as `T`
#[instrument(level = "debug", skip_all, fields(root = %document.root.name))]
pub fn decode<T: Decode>(document: &Document) -> Result<T, DecodeError> {
    T::decode(&View::of(&document.root)).inspect_err(|err| debug!(%err, "decode failed"))
}

/// Encode `value` as a document rooted at `T::ROOT`
pub fn encode<T: Encode + RootElement + ?Sized>(value: &T) -> Result<Document, EncodeError> {
    encode_as(T::ROOT, value)
}

/// Encode `value` as a document rooted at an element named `root`
#[instrument(level = "debug", skip_all, fields(root = %root))]
pub fn encode_as<T: Encode + ?Sized>(root: &str, value: &T) -> Result<Document, EncodeError> {
    let mut node = Node::new(root);
    value
        .encode(&mut node)
        .and_then(|()| encode::finish(&mut node))
        .inspect_err(|err| debug!(%err, "encode failed"))?;
    Ok(Document::new(node))
}

//! Attributes-only elements

use crate::codec::decode::{self, Decode};
use crate::codec::encode::{self, Encode};
use crate::codec::view::View;
use crate::error::{DecodeError, EncodeError};
use crate::xml::model::Node;

/// An element that carries nothing but attributes of shape `A`.
///
/// `A` is decoded from the element's attribute set alone; text and
/// children of the element are ignored, and encoding emits attributes
/// only. Categories, links and enclosures in feed formats are all of
/// this form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributesElement<A> {
    pub attributes: A,
}

impl<A> AttributesElement<A> {
    pub const fn new(attributes: A) -> Self {
        Self { attributes }
    }

    pub fn into_inner(self) -> A {
        self.attributes
    }
}

impl<A> From<A> for AttributesElement<A> {
    fn from(attributes: A) -> Self {
        Self::new(attributes)
    }
}

impl<A: Decode> Decode for AttributesElement<A> {
    fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
        decode::attributes(view).map(Self::new)
    }
}

impl<A: Encode> Encode for AttributesElement<A> {
    fn encode(&self, node: &mut Node) -> Result<(), EncodeError> {
        encode::attributes(node, &self.attributes)
    }
}

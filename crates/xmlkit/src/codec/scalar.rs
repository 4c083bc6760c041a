//! Text-backed scalar values

use crate::codec::decode::Decode;
use crate::codec::encode::Encode;
use crate::codec::view::View;
use crate::error::{DecodeError, EncodeError};
use crate::xml::model::Node;

/// A value with a canonical, locale-independent text form
pub trait Scalar: Sized {
    /// Name used in type-mismatch errors
    const TYPE: &'static str;

    fn parse(text: &str) -> Option<Self>;

    /// `None` when the value has no canonical text form
    fn format(&self) -> Option<String>;
}

/// A field stored in a single optional text slot: an attribute, a
/// namespace declaration, or an element's own text.
pub trait ScalarField: Sized {
    /// Whether the slot must be present
    const REQUIRED: bool;

    /// Decode from a slot whose absence means the field is missing
    fn from_attribute(key: &str, value: Option<&str>) -> Result<Self, DecodeError>;

    /// Decode from element text, where absence means empty text
    fn from_text(key: &str, text: Option<&str>) -> Result<Self, DecodeError>;

    fn to_slot(&self, key: &str) -> Result<Option<String>, EncodeError>;
}

impl Scalar for String {
    const TYPE: &'static str = "string";

    fn parse(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn format(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl Scalar for char {
    const TYPE: &'static str = "char";

    fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    fn format(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Scalar for bool {
    const TYPE: &'static str = "bool";

    fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn format(&self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const TYPE: &'static str = stringify!($ty);

                fn parse(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn format(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Display on floats already yields the shortest text that parses back to
// the same value, e.g. `1.11` rather than `1.1100000000000001`.
macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const TYPE: &'static str = stringify!($ty);

                fn parse(text: &str) -> Option<Self> {
                    text.trim()
                        .parse::<$ty>()
                        .ok()
                        .filter(|value| value.is_finite())
                }

                fn format(&self) -> Option<String> {
                    self.is_finite().then(|| self.to_string())
                }
            }
        )*
    };
}

impl_float!(f32, f64);

/// Field, node and optional-field impls for each scalar type
macro_rules! impl_scalar_codec {
    ($($ty:ty),*) => {
        $(
            impl ScalarField for $ty {
                const REQUIRED: bool = true;

                fn from_attribute(key: &str, value: Option<&str>) -> Result<Self, DecodeError> {
                    let value = value.ok_or_else(|| DecodeError::missing(key))?;
                    parse_or_mismatch(key, value)
                }

                /// Absent text reads as empty text, so only a type that
                /// parses `""` (a `String`) accepts an empty element.
                fn from_text(key: &str, text: Option<&str>) -> Result<Self, DecodeError> {
                    match text {
                        Some(text) => parse_or_mismatch(key, text),
                        None => <$ty as Scalar>::parse("").ok_or_else(|| DecodeError::missing(key)),
                    }
                }

                fn to_slot(&self, key: &str) -> Result<Option<String>, EncodeError> {
                    format_or_unrepresentable(key, self).map(Some)
                }
            }

            impl ScalarField for Option<$ty> {
                const REQUIRED: bool = false;

                fn from_attribute(key: &str, value: Option<&str>) -> Result<Self, DecodeError> {
                    value.map(|value| parse_or_mismatch(key, value)).transpose()
                }

                fn from_text(key: &str, text: Option<&str>) -> Result<Self, DecodeError> {
                    Self::from_attribute(key, text)
                }

                fn to_slot(&self, key: &str) -> Result<Option<String>, EncodeError> {
                    self.as_ref()
                        .map(|value| format_or_unrepresentable(key, value))
                        .transpose()
                }
            }

            impl Decode for $ty {
                fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
                    <$ty as ScalarField>::from_text(view.name(), view.text())
                }
            }

            impl Encode for $ty {
                fn encode(&self, node: &mut Node) -> Result<(), EncodeError> {
                    let text = format_or_unrepresentable(&node.name, self)?;
                    node.text = (!text.is_empty()).then_some(text);
                    Ok(())
                }
            }
        )*
    };
}

impl_scalar_codec!(
    String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

fn parse_or_mismatch<S: Scalar>(key: &str, text: &str) -> Result<S, DecodeError> {
    S::parse(text).ok_or_else(|| DecodeError::mismatch(key, S::TYPE))
}

fn format_or_unrepresentable<S: Scalar>(key: &str, value: &S) -> Result<String, EncodeError> {
    value
        .format()
        .ok_or_else(|| EncodeError::UnrepresentableValue {
            key: key.to_string(),
        })
}

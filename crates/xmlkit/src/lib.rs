//! xmlkit - XML documents to typed values and back
//!
//! # Quick Start
//!
//! ```
//! use xmlkit::record;
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Header as "header" {
//!         pub title: String => child,
//!         pub keyword: Vec<String> => children,
//!     }
//! }
//!
//! # fn main() -> Result<(), xmlkit::Error> {
//! let xml = "<header><title>Sample</title><keyword>Generic</keyword><keyword>Placeholder</keyword></header>";
//! let header: Header = xmlkit::from_xml(xml.as_bytes())?;
//! assert_eq!(header.keyword, ["Generic", "Placeholder"]);
//! assert_eq!(xmlkit::to_xml(&header, false)?, xml);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{DecodeError, EncodeError, Error, ErrorKind, ParseError, Pos, Result};

pub mod xml;
pub use xml::{Config, Declaration, Document, Node};

pub mod codec;
pub use codec::{
    decode, encode, encode_as, AttributesElement, Decode, Encode, Field, FieldKind, Record,
    RootElement, View,
};

use tracing::{debug, instrument};

/// Parse XML bytes with the default configuration
pub fn parse(bytes: &[u8]) -> Result<Document, ParseError> {
    parse_with_config(bytes, Config::default())
}

/// Parse XML bytes with a custom configuration
#[instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn parse_with_config(bytes: &[u8], config: Config) -> Result<Document, ParseError> {
    xml::Parser::with_config(bytes, config)
        .parse()
        .inspect_err(|err| debug!(%err, "parse failed"))
}

/// Render a document as XML text
#[instrument(level = "debug", skip_all, fields(root = %document.root.name, formatted = formatted))]
pub fn render(document: &Document, formatted: bool) -> String {
    document.to_xml_string(formatted)
}

/// Parse XML bytes and decode the root element as `T`
pub fn from_xml<T: Decode>(bytes: &[u8]) -> Result<T> {
    let document = parse(bytes)?;
    Ok(decode(&document)?)
}

/// Encode `value` and render it, without an XML declaration
pub fn to_xml<T: Encode + RootElement + ?Sized>(value: &T, formatted: bool) -> Result<String> {
    let document = encode(value)?;
    Ok(render(&document, formatted))
}

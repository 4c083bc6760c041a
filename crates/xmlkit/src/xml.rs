//! XML tree, parser and renderer

pub mod cursor;
pub mod model;
pub mod parser;
pub mod render;

pub use model::{Declaration, Document, Node};
pub use parser::{Config, Parser};
pub use render::Renderer;

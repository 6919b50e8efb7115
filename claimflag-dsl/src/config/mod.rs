//! Configuration tree and flag definition (de)serialization

mod document;
mod node;
mod serializer;

pub use document::*;
pub use node::*;
pub use serializer::*;

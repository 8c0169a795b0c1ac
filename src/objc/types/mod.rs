//! Objective-C type encodings: the decoded tree, the recursive-descent decoder, the canonical
//! re-encoder, and the C-style pretty-printer, plus layout, traversal, and caching helpers built
//! on the same tree.

pub mod builder;
pub mod cache;
pub mod cursor;
pub mod decode;
pub mod encode;
pub mod error;
pub mod layout;
pub mod modifier;
pub mod node;
pub mod options;
pub mod pretty;
pub mod primitive;
pub mod walker;

pub use builder::{AggregateBuilder, AggregateKind};
pub use cache::TypeCache;
pub use cursor::{Cursor, Decoded};
pub use decode::{Decoder, decode, try_decode};
pub use encode::encoded;
pub use error::{DecodeError, DecodeResult};
pub use layout::{AggregateLayout, DataModel, TypeLayout, aggregate_layout, layout_of};
pub use modifier::{Modifier, Qualifiers};
pub use node::{Aggregate, BlockArguments, BlockSignature, Field, TypeNode};
pub use options::DecodeOptions;
pub use pretty::{DEFAULT_INDENT, decoded};
pub use primitive::Primitive;
pub use walker::TypeWalker;

//! Objective-C runtime metadata helpers: type-encoding decoding and method signatures.

pub mod signature;
pub mod types;

pub use signature::{Argument, MethodSignature};
pub use types::{DecodeError, DecodeOptions, Decoder, TypeNode, decode, try_decode};

//! Decoding, re-encoding, and rendering of Objective-C runtime type encodings.

pub mod objc;

pub use objc::types::{decode, decoded, encoded, try_decode};

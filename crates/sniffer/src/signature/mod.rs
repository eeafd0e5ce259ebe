//! Byte-signature matching against a stream prefix.
//!
//! - `model.rs`: `ByteSignature` and the termination policies
//! - `matcher.rs`: the incremental prefix matcher
//! - `bom.rs`: the standard Unicode byte-order-mark table

pub mod bom;
pub mod matcher;
pub mod model;

pub use bom::{bom_signatures, Encoding};
pub use matcher::{Scan, SignatureMatcher, SliceMatch};
pub use model::{ByteSignature, MatchPolicy};

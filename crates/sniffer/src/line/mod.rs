//! Line framing: split a raw byte stream into logical records.
//!
//! - `model.rs`: the `Line` record type
//! - `framer.rs`: pending-terminator state machine + lazy iterator

pub mod framer;
pub mod model;

pub use framer::{frame_slice, LineFramer, Lines};
pub use model::Line;

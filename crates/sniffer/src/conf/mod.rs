//! Configuration: model, loading, validation.
//!
//! - `model.rs`: `SniffConfig` and defaults
//! - `load.rs`: file/env loading with the env > file > defaults priority

pub mod load;
pub mod model;

pub use model::SniffConfig;

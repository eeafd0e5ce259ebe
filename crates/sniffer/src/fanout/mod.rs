//! Concurrent multi-strategy fan-out over one logical input.
//!
//! - `model.rs`: inferred values and per-strategy reports
//! - `strategy.rs`: the strategy trait, byte feed, and built-ins
//! - `run.rs`: producer/worker orchestration

pub mod model;
pub mod run;
pub mod strategy;

pub use model::{Sniffed, StrategyReport};
pub use run::Fanout;
pub use strategy::{ByteFeed, DelimiterStrategy, EncodingStrategy, SniffStrategy};

//! Statistical delimiter inference over a sampled line set.
//!
//! - `stats.rs`: per-candidate occurrence statistics
//! - `compute.rs`: candidate filtering and ranking

pub mod compute;
pub mod stats;

pub use compute::DelimiterInference;
pub use stats::CandidateStats;

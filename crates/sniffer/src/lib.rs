// Domain-driven module structure for the stream-inference engine.

// Core infrastructure
pub mod error;
pub mod line;
pub mod signature;

// Inference
pub mod delimiter;
pub mod fanout;

// Wiring
pub mod conf;
pub mod sniffer;

// Re-export commonly used types
pub use conf::SniffConfig;
pub use error::SniffError;
pub use fanout::{Fanout, Sniffed, SniffStrategy, StrategyReport};
pub use sniffer::{SniffReport, Sniffer};

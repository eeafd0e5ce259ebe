//! Model — SniffConfig and defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SniffConfig {
    /// Maximum lines the delimiter strategy samples before deciding.
    pub sample_lines: usize,
    /// Maximum bytes read from the source before giving up.
    pub sample_bytes: u64,
    /// Minimum mean occurrences per line for a delimiter candidate.
    pub min_delimiter_occurrence: u32,
    /// Delimiter candidate bytes, in ranking submission order.
    pub delimiter_candidates: Vec<u8>,
    /// Capacity of each strategy's bounded buffer.
    pub channel_capacity: usize,
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            sample_lines: 100,
            sample_bytes: 65536,
            min_delimiter_occurrence: 1,
            delimiter_candidates: vec![b',', b';', b'\t', b'|'],
            channel_capacity: 1024,
        }
    }
}

impl SniffConfig {
    /// Validate configuration values before wiring strategies.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_lines == 0 {
            return Err("sample_lines must be > 0".to_string());
        }
        if self.sample_bytes == 0 {
            return Err("sample_bytes must be > 0".to_string());
        }
        if self.delimiter_candidates.is_empty() {
            return Err("delimiter_candidates must not be empty".to_string());
        }
        if self.channel_capacity == 0 {
            return Err("channel_capacity must be > 0".to_string());
        }
        Ok(())
    }
}

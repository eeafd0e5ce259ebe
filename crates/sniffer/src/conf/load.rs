//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::SniffConfig;

impl SniffConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("SNIFFER_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/sniffer/sniffer.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path
            );
            Self::from_env()
        };

        // Environment variables override file config
        if let Some(lines) = env_parse("SNIFF_SAMPLE_LINES") {
            config.sample_lines = lines;
        }
        if let Some(bytes) = env_parse("SNIFF_SAMPLE_BYTES") {
            config.sample_bytes = bytes;
        }
        if let Some(min) = env_parse("SNIFF_MIN_OCCURRENCE") {
            config.min_delimiter_occurrence = min;
        }
        if let Some(candidates) = env_candidates() {
            config.delimiter_candidates = candidates;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: SniffConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sample_lines: env_parse("SNIFF_SAMPLE_LINES").unwrap_or(defaults.sample_lines),
            sample_bytes: env_parse("SNIFF_SAMPLE_BYTES").unwrap_or(defaults.sample_bytes),
            min_delimiter_occurrence: env_parse("SNIFF_MIN_OCCURRENCE")
                .unwrap_or(defaults.min_delimiter_occurrence),
            delimiter_candidates: env_candidates().unwrap_or(defaults.delimiter_candidates),
            channel_capacity: env_parse("SNIFF_CHANNEL_CAPACITY")
                .unwrap_or(defaults.channel_capacity),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// `SNIFF_DELIMITER_CANDIDATES` holds the candidate bytes as a literal
/// string, e.g. `,;|` — `\t` is accepted as an escape for tab.
fn env_candidates() -> Option<Vec<u8>> {
    let raw = std::env::var("SNIFF_DELIMITER_CANDIDATES").ok()?;
    let candidates: Vec<u8> = raw.replace("\\t", "\t").into_bytes();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_string_overrides_named_fields() {
        let toml = r#"
            sample_lines = 10
            sample_bytes = 2048
            delimiter_candidates = [44, 59]
        "#;
        let config: SniffConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sample_lines, 10);
        assert_eq!(config.sample_bytes, 2048);
        assert_eq!(config.delimiter_candidates, vec![b',', b';']);
        // Unnamed fields keep their defaults.
        assert_eq!(config.min_delimiter_occurrence, 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(SniffConfig::from_file("/nonexistent/sniffer.toml").is_err());
    }
}

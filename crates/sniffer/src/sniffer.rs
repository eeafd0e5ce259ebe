//! Front door: wire the built-in strategies from configuration and run
//! them concurrently over one source.

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::info;

use crate::conf::SniffConfig;
use crate::delimiter::DelimiterInference;
use crate::error::SniffError;
use crate::fanout::{DelimiterStrategy, EncodingStrategy, Fanout, Sniffed, SniffStrategy, StrategyReport};
use crate::signature::Encoding;

/// Infers encoding preamble and field delimiter from a sample of a
/// source, so a bulk loader can configure its reader before ingestion.
pub struct Sniffer {
    config: SniffConfig,
}

impl Sniffer {
    pub fn new(config: SniffConfig) -> Result<Self, SniffError> {
        config.validate().map_err(SniffError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: SniffConfig::default(),
        }
    }

    pub fn config(&self) -> &SniffConfig {
        &self.config
    }

    /// Sample at most `sample_bytes` from `source` and run the encoding
    /// and delimiter strategies concurrently over it.
    pub async fn sniff<R>(&self, source: R) -> Result<SniffReport, SniffError>
    where
        R: AsyncRead + Unpin,
    {
        let inference = DelimiterInference::new(
            self.config.delimiter_candidates.clone(),
            self.config.min_delimiter_occurrence,
        )?;
        let strategies: Vec<Box<dyn SniffStrategy>> = vec![
            Box::new(EncodingStrategy::bom()),
            Box::new(DelimiterStrategy::new(inference, self.config.sample_lines)),
        ];

        let fanout = Fanout::new(self.config.channel_capacity)?;
        let sample = source.take(self.config.sample_bytes);
        let reports = fanout.run(sample, strategies).await?;

        let report = SniffReport { reports };
        info!(
            delimiter = report.delimiter(),
            encoding = report.encoding().map(|e| e.as_str()),
            "sniff complete"
        );
        Ok(report)
    }

    /// Sniff an in-memory sample.
    pub async fn sniff_bytes(&self, sample: &[u8]) -> Result<SniffReport, SniffError> {
        self.sniff(sample).await
    }
}

/// Collected strategy outcomes from one sniff run.
#[derive(Debug)]
pub struct SniffReport {
    reports: Vec<StrategyReport>,
}

impl SniffReport {
    /// The inferred field delimiter, if any strategy found one.
    pub fn delimiter(&self) -> Option<u8> {
        self.reports.iter().find_map(|r| match r.value() {
            Some(Sniffed::Delimiter(d)) => Some(*d),
            _ => None,
        })
    }

    /// The encoding identified from a matched preamble, if any.
    pub fn encoding(&self) -> Option<Encoding> {
        self.reports.iter().find_map(|r| match r.value() {
            Some(Sniffed::Preamble { encoding, .. }) => *encoding,
            _ => None,
        })
    }

    /// Per-strategy reports, in submission order.
    pub fn strategies(&self) -> &[StrategyReport] {
        &self.reports
    }
}

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use super::model::Sniffed;
use crate::delimiter::DelimiterInference;
use crate::error::SniffError;
use crate::line::{Line, LineFramer};
use crate::signature::{bom_signatures, ByteSignature, Encoding, MatchPolicy, Scan, SignatureMatcher};

/// Receiving end of one strategy's private bounded buffer.
///
/// Yields bytes in exact source order until the producer closes the
/// channel; dropping the feed early retires the strategy's slot on the
/// producer side.
pub struct ByteFeed {
    rx: mpsc::Receiver<u8>,
}

impl ByteFeed {
    pub(crate) fn new(rx: mpsc::Receiver<u8>) -> Self {
        Self { rx }
    }

    /// Next byte, or `None` at end of stream.
    pub async fn next_byte(&mut self) -> Option<u8> {
        self.rx.recv().await
    }
}

/// One independent sniffing strategy.
///
/// Object-safe: `run` consumes the boxed strategy and returns a boxed
/// future, so heterogeneous strategies can share one fan-out. The
/// outcome distinguishes a decision (`Ok(Some(_))`), exhausted input
/// (`Ok(None)`) and the strategy's own failure (`Err(_)`).
pub trait SniffStrategy: Send + 'static {
    /// Names the strategy in reports and logs.
    fn label(&self) -> &'static str;

    fn run(
        self: Box<Self>,
        feed: ByteFeed,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Sniffed>, SniffError>> + Send>>;
}

/// Matches the stream prefix against a set of encoding preambles.
pub struct EncodingStrategy {
    candidates: Vec<ByteSignature>,
    policy: MatchPolicy,
}

impl EncodingStrategy {
    pub fn new(candidates: Vec<ByteSignature>, policy: MatchPolicy) -> Self {
        Self { candidates, policy }
    }

    /// Preconfigured for the standard Unicode byte-order marks.
    pub fn bom() -> Self {
        Self::new(bom_signatures(), MatchPolicy::Longest)
    }
}

impl SniffStrategy for EncodingStrategy {
    fn label(&self) -> &'static str {
        "encoding"
    }

    fn run(
        self: Box<Self>,
        mut feed: ByteFeed,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Sniffed>, SniffError>> + Send>> {
        Box::pin(async move {
            let mut matcher = SignatureMatcher::new(self.candidates, self.policy)?;
            let matched = loop {
                match feed.next_byte().await {
                    Some(byte) => {
                        if let Scan::Finished(matched) = matcher.advance(byte) {
                            break matched;
                        }
                    }
                    None => break matcher.finish(),
                }
            };
            Ok(matched.map(|signature| {
                let encoding = Encoding::from_signature(&signature);
                Sniffed::Preamble {
                    signature,
                    encoding,
                }
            }))
        })
    }
}

/// Frames sampled lines and runs statistical delimiter inference.
pub struct DelimiterStrategy {
    inference: DelimiterInference,
    sample_lines: usize,
}

impl DelimiterStrategy {
    pub fn new(inference: DelimiterInference, sample_lines: usize) -> Self {
        Self {
            inference,
            sample_lines,
        }
    }
}

impl SniffStrategy for DelimiterStrategy {
    fn label(&self) -> &'static str {
        "delimiter"
    }

    fn run(
        self: Box<Self>,
        mut feed: ByteFeed,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Sniffed>, SniffError>> + Send>> {
        Box::pin(async move {
            let mut framer = LineFramer::new();
            let mut lines: Vec<Line> = Vec::new();
            while lines.len() < self.sample_lines {
                match feed.next_byte().await {
                    Some(byte) => {
                        if let Some(line) = framer.push(byte) {
                            lines.push(line);
                        }
                    }
                    None => {
                        if let Some(line) = framer.finish() {
                            lines.push(line);
                        }
                        break;
                    }
                }
            }
            if lines.is_empty() {
                // Stream ended before a single line: no decision, not an error.
                return Ok(None);
            }
            self.inference.infer(&lines).map(|d| Some(Sniffed::Delimiter(d)))
        })
    }
}

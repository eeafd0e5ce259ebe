use tracing::debug;

use super::model::{ByteSignature, MatchPolicy};
use crate::error::SniffError;

/// Result of feeding one byte to the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// Undecided; feed the next byte.
    Continue,
    /// Decision reached: the matched signature, or `None` for no match.
    Finished(Option<ByteSignature>),
}

/// Outcome of matching an in-memory slice: what matched and how many
/// bytes the scan consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceMatch {
    pub matched: Option<ByteSignature>,
    pub consumed: usize,
}

/// Matches a stream prefix against an ordered set of candidate
/// signatures, one byte at a time.
///
/// The live candidate set is an ordered `Vec` kept in caller submission
/// order; when two candidates reach full length at the same scan
/// position, the later-submitted one wins as "current best". That order
/// is part of the contract.
///
/// Never consumes more than the longest candidate's length. A source
/// ending before a decision is a plain "no match", not an error.
#[derive(Debug)]
pub struct SignatureMatcher {
    live: Vec<ByteSignature>,
    policy: MatchPolicy,
    max_len: usize,
    position: usize,
    best: Option<ByteSignature>,
    finished: bool,
}

impl SignatureMatcher {
    /// Fails fast with a configuration error on an empty candidate set.
    /// Zero-length signatures are unrepresentable (`ByteSignature::new`
    /// rejects them).
    pub fn new(candidates: Vec<ByteSignature>, policy: MatchPolicy) -> Result<Self, SniffError> {
        if candidates.is_empty() {
            return Err(SniffError::EmptyCandidateSet);
        }
        let max_len = candidates.iter().map(ByteSignature::len).max().unwrap_or(0);
        Ok(Self {
            live: candidates,
            policy,
            max_len,
            position: 0,
            best: None,
            finished: false,
        })
    }

    /// Upper bound on bytes this matcher will ever consume.
    pub fn max_candidate_length(&self) -> usize {
        self.max_len
    }

    /// Feed the next source byte.
    pub fn advance(&mut self, byte: u8) -> Scan {
        if self.finished {
            return Scan::Finished(self.best.clone());
        }

        let pos = self.position;
        self.position += 1;
        self.live
            .retain(|sig| sig.byte_at(pos) == Some(byte));

        let mut completed = false;
        for sig in &self.live {
            if sig.len() == pos + 1 {
                debug!(signature = ?sig.as_bytes(), position = pos, "candidate completed");
                self.best = Some(sig.clone());
                completed = true;
            }
        }

        let done = match self.policy {
            MatchPolicy::Shortest => completed || self.live.is_empty(),
            MatchPolicy::Longest => self.live.is_empty() || self.position >= self.max_len,
        };
        if done {
            self.finished = true;
            Scan::Finished(self.best.clone())
        } else {
            Scan::Continue
        }
    }

    /// Resolve the scan when the source ends before a decision.
    pub fn finish(self) -> Option<ByteSignature> {
        self.best
    }

    /// Drive the scan over an in-memory sample.
    pub fn match_slice(mut self, sample: &[u8]) -> SliceMatch {
        let mut consumed = 0;
        for &byte in sample {
            consumed += 1;
            if let Scan::Finished(matched) = self.advance(byte) {
                return SliceMatch { matched, consumed };
            }
        }
        SliceMatch {
            matched: self.finish(),
            consumed,
        }
    }
}

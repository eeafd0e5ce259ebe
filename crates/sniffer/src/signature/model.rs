use bytes::Bytes;

use crate::error::SniffError;

/// A fixed, non-empty byte sequence: an encoding preamble or any other
/// prefix worth recognizing. Zero-length signatures are rejected at
/// construction, so a working set of `ByteSignature`s can never contain
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteSignature {
    bytes: Bytes,
}

impl ByteSignature {
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self, SniffError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SniffError::EmptySignature);
        }
        Ok(Self { bytes })
    }

    /// Constructor for compile-time constants (the BOM table).
    pub(crate) fn from_static(bytes: &'static [u8]) -> Self {
        debug_assert!(!bytes.is_empty());
        Self {
            bytes: Bytes::from_static(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn byte_at(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }
}

/// When the matcher stops scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Stop at the first candidate whose full length is reached: favors
    /// the shortest completely-matching signature.
    Shortest,
    /// Scan until every candidate is eliminated (or the source ends):
    /// favors the longest completely-matching signature.
    Longest,
}

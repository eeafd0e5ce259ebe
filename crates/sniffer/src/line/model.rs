use bytes::Bytes;

/// One logical record framed from a byte stream, terminator bytes excluded.
///
/// Built byte-by-byte inside [`LineFramer`](super::LineFramer) and frozen
/// into `Bytes` when handed out, so a `Line` is immutable after
/// construction and cheap to clone across tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    content: Bytes,
}

impl Line {
    pub(crate) fn new(content: Bytes) -> Self {
        Self { content }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Occurrences of `byte` in this line. Hot path of delimiter
    /// inference, so no allocation.
    pub fn count_byte(&self, byte: u8) -> u32 {
        self.content.iter().filter(|&&b| b == byte).count() as u32
    }
}

impl From<&[u8]> for Line {
    fn from(raw: &[u8]) -> Self {
        Self {
            content: Bytes::copy_from_slice(raw),
        }
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_byte_counts_all_occurrences() {
        let line = Line::from(b"a,b,,c".as_slice());
        assert_eq!(line.count_byte(b','), 3);
        assert_eq!(line.count_byte(b'x'), 0);
    }

    #[test]
    fn empty_line() {
        let line = Line::from(b"".as_slice());
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
    }
}

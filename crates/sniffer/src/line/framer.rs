use bytes::BytesMut;

use super::model::Line;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Last terminator byte seen, carried across `push` calls so that a CRLF
/// pair collapses into a single boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingTerminator {
    None,
    Cr,
    Lf,
}

/// Incremental line framer.
///
/// Feed bytes one at a time with [`push`](LineFramer::push); each call
/// emits at most one completed [`Line`]. Call
/// [`finish`](LineFramer::finish) once at end of stream to flush a
/// trailing unterminated line.
///
/// Boundary rules:
/// - CR immediately followed by LF is one boundary (the LF is swallowed);
/// - any other adjacent terminator pair (CR-CR, LF-CR, LF-LF) produces an
///   additional empty line between them;
/// - a stream ending right after a terminator yields no trailing empty
///   line, a stream ending mid-line yields the partial line.
#[derive(Debug)]
pub struct LineFramer {
    buf: BytesMut,
    pending: PendingTerminator,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
            pending: PendingTerminator::None,
        }
    }

    /// Process one byte; returns the line it completed, if any.
    pub fn push(&mut self, byte: u8) -> Option<Line> {
        match self.pending {
            PendingTerminator::Cr if byte == LF => {
                // Second half of a CRLF boundary, swallowed.
                self.pending = PendingTerminator::None;
                None
            }
            PendingTerminator::None => self.accept(byte),
            _ => {
                // The pending terminator did not pair up; the byte is
                // processed exactly as if nothing were pending.
                self.pending = PendingTerminator::None;
                self.accept(byte)
            }
        }
    }

    /// Flush the trailing unterminated line, if the stream ended mid-line.
    pub fn finish(&mut self) -> Option<Line> {
        self.pending = PendingTerminator::None;
        if self.buf.is_empty() {
            None
        } else {
            Some(Line::new(self.buf.split().freeze()))
        }
    }

    fn accept(&mut self, byte: u8) -> Option<Line> {
        match byte {
            CR => {
                self.pending = PendingTerminator::Cr;
                Some(Line::new(self.buf.split().freeze()))
            }
            LF => {
                self.pending = PendingTerminator::Lf;
                Some(Line::new(self.buf.split().freeze()))
            }
            _ => {
                self.buf.extend_from_slice(&[byte]);
                None
            }
        }
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy, single-pass, non-restartable line iterator over a byte source.
///
/// Primary access path; [`frame_slice`] derives bulk collection from it.
/// Both produce byte-identical line sequences for the same input.
pub struct Lines<I> {
    source: I,
    framer: LineFramer,
    done: bool,
}

impl<I: Iterator<Item = u8>> Lines<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            framer: LineFramer::new(),
            done: false,
        }
    }
}

impl<I: Iterator<Item = u8>> Iterator for Lines<I> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.done {
            return None;
        }
        for byte in self.source.by_ref() {
            if let Some(line) = self.framer.push(byte) {
                return Some(line);
            }
        }
        self.done = true;
        self.framer.finish()
    }
}

/// Frame an in-memory sample into its full line sequence.
pub fn frame_slice(sample: &[u8]) -> Vec<Line> {
    Lines::new(sample.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_as_strings(sample: &[u8]) -> Vec<String> {
        frame_slice(sample)
            .iter()
            .map(|l| String::from_utf8_lossy(l.as_bytes()).into_owned())
            .collect()
    }

    #[test]
    fn mixed_terminators_reference_vector() {
        // CRLF collapses into one boundary; LF-then-CR yields an extra
        // empty line between "c" and "d".
        assert_eq!(
            lines_as_strings(b"a\nb\r\nc\n\rd"),
            vec!["a", "b", "c", "", "d"]
        );
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(frame_slice(b"").is_empty());
    }

    #[test]
    fn trailing_terminator_yields_no_empty_line() {
        assert_eq!(lines_as_strings(b"a\n"), vec!["a"]);
        assert_eq!(lines_as_strings(b"a\r\n"), vec!["a"]);
    }

    #[test]
    fn unterminated_trailing_line_is_flushed() {
        assert_eq!(lines_as_strings(b"a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn adjacent_same_terminators_produce_empty_lines() {
        assert_eq!(lines_as_strings(b"a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(lines_as_strings(b"a\r\rb"), vec!["a", "", "b"]);
    }

    #[test]
    fn leading_terminator_produces_leading_empty_line() {
        assert_eq!(lines_as_strings(b"\na"), vec!["", "a"]);
    }

    #[test]
    fn crlf_runs_collapse_pairwise() {
        // Two CRLF pairs: one empty line between them, none after.
        assert_eq!(lines_as_strings(b"a\r\n\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn lazy_and_bulk_agree() {
        let sample = b"one\r\ntwo\n\rthree\rfour\n";
        let lazy: Vec<Line> = Lines::new(sample.iter().copied()).collect();
        assert_eq!(lazy, frame_slice(sample));
    }

    #[test]
    fn iterator_is_fused_after_end() {
        let mut lines = Lines::new(b"a".iter().copied());
        assert!(lines.next().is_some());
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
    }
}

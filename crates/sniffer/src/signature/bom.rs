//! The standard Unicode byte-order-mark table.
//!
//! The UTF-16 LE mark is a strict prefix of the UTF-32 LE mark, so BOM
//! detection must run under [`MatchPolicy::Longest`].

use super::matcher::SignatureMatcher;
use super::model::{ByteSignature, MatchPolicy};
use crate::error::SniffError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";
const UTF32_BE_BOM: &[u8] = b"\x00\x00\xFE\xFF";
const UTF32_LE_BOM: &[u8] = b"\xFF\xFE\x00\x00";

/// Character encoding identified by its preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// Label a downstream reader understands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Utf32Le => "utf-32le",
            Encoding::Utf32Be => "utf-32be",
        }
    }

    /// Map a matched preamble back to its encoding.
    pub fn from_signature(signature: &ByteSignature) -> Option<Encoding> {
        match signature.as_bytes() {
            UTF8_BOM => Some(Encoding::Utf8),
            UTF16_BE_BOM => Some(Encoding::Utf16Be),
            UTF16_LE_BOM => Some(Encoding::Utf16Le),
            UTF32_BE_BOM => Some(Encoding::Utf32Be),
            UTF32_LE_BOM => Some(Encoding::Utf32Le),
            _ => None,
        }
    }
}

/// All standard BOM signatures, in submission order.
pub fn bom_signatures() -> Vec<ByteSignature> {
    vec![
        ByteSignature::from_static(UTF8_BOM),
        ByteSignature::from_static(UTF16_BE_BOM),
        ByteSignature::from_static(UTF16_LE_BOM),
        ByteSignature::from_static(UTF32_BE_BOM),
        ByteSignature::from_static(UTF32_LE_BOM),
    ]
}

/// A matcher preconfigured for BOM detection.
pub fn bom_matcher() -> Result<SignatureMatcher, SniffError> {
    SignatureMatcher::new(bom_signatures(), MatchPolicy::Longest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(sample: &[u8]) -> Option<Encoding> {
        bom_matcher()
            .unwrap()
            .match_slice(sample)
            .matched
            .as_ref()
            .and_then(Encoding::from_signature)
    }

    #[test]
    fn utf8_bom_is_detected() {
        assert_eq!(sniff(b"\xEF\xBB\xBFYear,Make"), Some(Encoding::Utf8));
    }

    #[test]
    fn utf16le_prefix_does_not_shadow_utf32le() {
        // FF FE 00 00 must resolve to UTF-32 LE, not stop at UTF-16 LE.
        assert_eq!(sniff(b"\xFF\xFE\x00\x00rest"), Some(Encoding::Utf32Le));
    }

    #[test]
    fn utf16le_alone_is_detected() {
        assert_eq!(sniff(b"\xFF\xFEa\x00b\x00"), Some(Encoding::Utf16Le));
    }

    #[test]
    fn utf16be_and_utf32be_are_distinguished() {
        assert_eq!(sniff(b"\xFE\xFF\x00a"), Some(Encoding::Utf16Be));
        assert_eq!(sniff(b"\x00\x00\xFE\xFFrest"), Some(Encoding::Utf32Be));
    }

    #[test]
    fn plain_ascii_has_no_preamble() {
        assert_eq!(sniff(b"Year,Make,Model"), None);
    }

    #[test]
    fn encoding_labels_are_reader_friendly() {
        assert_eq!(Encoding::Utf8.as_str(), "utf-8");
        assert_eq!(Encoding::Utf32Be.as_str(), "utf-32be");
    }
}

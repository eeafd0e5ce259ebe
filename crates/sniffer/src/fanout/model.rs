use crate::error::SniffError;
use crate::signature::{ByteSignature, Encoding};

/// A structural property inferred from the sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sniffed {
    /// The single most likely field delimiter.
    Delimiter(u8),
    /// A matched encoding preamble. `encoding` is `None` when the
    /// signature is not one of the standard byte-order marks.
    Preamble {
        signature: ByteSignature,
        encoding: Option<Encoding>,
    },
}

/// One strategy's accumulated outcome, collected after all workers join.
///
/// `Ok(None)` is the defined exhausted-input result: the source ended
/// before the strategy could decide, which is not an error. `Err` holds
/// the strategy's own isolated failure; it never aborted a sibling.
#[derive(Debug)]
pub struct StrategyReport {
    label: &'static str,
    outcome: Result<Option<Sniffed>, SniffError>,
}

impl StrategyReport {
    pub(crate) fn new(label: &'static str, outcome: Result<Option<Sniffed>, SniffError>) -> Self {
        Self { label, outcome }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn outcome(&self) -> &Result<Option<Sniffed>, SniffError> {
        &self.outcome
    }

    /// The inferred value, if the strategy produced one.
    pub fn value(&self) -> Option<&Sniffed> {
        match &self.outcome {
            Ok(Some(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_present_only_on_success() {
        let hit = StrategyReport::new("delimiter", Ok(Some(Sniffed::Delimiter(b','))));
        assert_eq!(hit.value(), Some(&Sniffed::Delimiter(b',')));
        assert!(!hit.is_failure());

        let miss = StrategyReport::new("delimiter", Ok(None));
        assert_eq!(miss.value(), None);
        assert!(!miss.is_failure());

        let failed = StrategyReport::new("delimiter", Err(SniffError::NoDelimiter));
        assert_eq!(failed.value(), None);
        assert!(failed.is_failure());
    }
}

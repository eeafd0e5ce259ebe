use thiserror::Error;

/// Error taxonomy for the sniffing core.
///
/// Three families, deliberately distinct:
/// - configuration errors (`EmptyCandidateSet`, `EmptySignature`,
///   `InvalidConfig`) are raised immediately at construction time;
/// - `NoDelimiter` is an ambiguous-sample error: the candidates were
///   well-formed but the sample was statistically inconclusive;
/// - worker failures (`Io`, `WorkerPanic`, `Cancelled`) stay confined to
///   the report of the strategy that hit them.
///
/// A source that ends before any decision is NOT an error; it surfaces as
/// an `Ok(None)` outcome ("no match").
#[derive(Debug, Error)]
pub enum SniffError {
    #[error("candidate set is empty")]
    EmptyCandidateSet,

    #[error("candidate set contains a zero-length signature")]
    EmptySignature,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no delimiter found in sample")]
    NoDelimiter,

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("strategy panicked: {0}")]
    WorkerPanic(String),

    #[error("fan-out cancelled")]
    Cancelled,
}

impl SniffError {
    /// True for errors that indicate a misconfigured caller rather than an
    /// inconclusive or unreadable sample.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SniffError::EmptyCandidateSet
                | SniffError::EmptySignature
                | SniffError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_flagged() {
        assert!(SniffError::EmptyCandidateSet.is_config_error());
        assert!(SniffError::EmptySignature.is_config_error());
        assert!(SniffError::InvalidConfig("x".into()).is_config_error());
        assert!(!SniffError::NoDelimiter.is_config_error());
        assert!(!SniffError::Cancelled.is_config_error());
    }

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            SniffError::NoDelimiter.to_string(),
            "no delimiter found in sample"
        );
        assert_eq!(
            SniffError::EmptyCandidateSet.to_string(),
            "candidate set is empty"
        );
    }
}

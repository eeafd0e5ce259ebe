use crate::line::Line;

/// Occurrence statistics for one delimiter candidate across a sampled
/// line set.
///
/// Mean and variance are population values (denominator = sample count)
/// computed eagerly from the immutable count vector, so the accessors
/// are pure reads and trivially idempotent. Each concurrent consumer
/// owns its own instances; nothing here is shared.
#[derive(Debug, Clone)]
pub struct CandidateStats {
    candidate: u8,
    counts: Vec<u32>,
    mean: f64,
    variance: f64,
}

impl CandidateStats {
    pub fn from_counts(candidate: u8, counts: Vec<u32>) -> Self {
        let (mean, variance) = population_stats(&counts);
        Self {
            candidate,
            counts,
            mean,
            variance,
        }
    }

    /// Count `candidate` in every sampled line and derive its stats.
    pub fn from_lines(candidate: u8, lines: &[Line]) -> Self {
        let counts = lines.iter().map(|line| line.count_byte(candidate)).collect();
        Self::from_counts(candidate, counts)
    }

    pub fn candidate(&self) -> u8 {
        self.candidate
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Mean rounded half-up to the nearest integer.
    pub fn rounded_mean(&self) -> u32 {
        (self.mean + 0.5).floor() as u32
    }
}

fn population_stats(counts: &[u32]) -> (f64, f64) {
    if counts.is_empty() {
        return (0.0, 0.0);
    }
    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;
    let variance = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, variance)
}

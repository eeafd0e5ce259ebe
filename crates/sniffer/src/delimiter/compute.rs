use tracing::debug;

use super::stats::CandidateStats;
use crate::error::SniffError;
use crate::line::Line;

/// A candidate whose occurrence variance exceeds this ceiling appears
/// inconsistently across lines (likely inside free-text fields) and is
/// dropped.
const VARIANCE_CEILING: f64 = 4.0;

/// Two variances closer than this are considered equal.
const VARIANCE_EPSILON: f64 = 1e-3;

/// Infers the single most likely field delimiter from a restricted
/// candidate byte set and a sampled line set.
///
/// A structural separator occurs a steady number of times per record, so
/// candidates are filtered by minimum mean occurrence and ranked by
/// variance, lowest first.
#[derive(Debug, Clone)]
pub struct DelimiterInference {
    candidates: Vec<u8>,
    min_mean: u32,
}

impl DelimiterInference {
    /// Fails fast with a configuration error on an empty candidate set.
    pub fn new(candidates: Vec<u8>, min_mean: u32) -> Result<Self, SniffError> {
        if candidates.is_empty() {
            return Err(SniffError::EmptyCandidateSet);
        }
        Ok(Self {
            candidates,
            min_mean,
        })
    }

    pub fn candidates(&self) -> &[u8] {
        &self.candidates
    }

    /// Pick the delimiter for `lines`, or fail with
    /// [`SniffError::NoDelimiter`] when no candidate passes the filters.
    pub fn infer(&self, lines: &[Line]) -> Result<u8, SniffError> {
        let mut survivors: Vec<CandidateStats> = Vec::with_capacity(self.candidates.len());
        for &candidate in &self.candidates {
            let stats = CandidateStats::from_lines(candidate, lines);
            if stats.rounded_mean() < self.min_mean {
                debug!(
                    candidate,
                    mean = stats.mean(),
                    "candidate dropped: below minimum occurrence"
                );
                continue;
            }
            if stats.variance() > VARIANCE_CEILING {
                debug!(
                    candidate,
                    variance = stats.variance(),
                    "candidate dropped: variance over ceiling"
                );
                continue;
            }
            survivors.push(stats);
        }

        if survivors.is_empty() {
            return Err(SniffError::NoDelimiter);
        }
        if survivors.len() == 1 {
            return Ok(survivors[0].candidate());
        }

        // Retain the band within epsilon of the lowest variance present.
        // Band members pairwise differ by less than epsilon, i.e. their
        // variances are tied, so ordering the band by mean ascending is
        // the variance-ascending, mean-tie-broken ranking restricted to
        // the retained set. Candidates outside the band never influence
        // the pick, and this keeps the comparator a total order (a
        // global epsilon-aware comparator is not transitive).
        let min_variance = survivors
            .iter()
            .map(CandidateStats::variance)
            .fold(f64::INFINITY, f64::min);
        let mut retained: Vec<&CandidateStats> = survivors
            .iter()
            .filter(|s| s.variance() - min_variance < VARIANCE_EPSILON)
            .collect();
        retained.sort_by(|a, b| {
            a.mean()
                .total_cmp(&b.mean())
                .then_with(|| a.variance().total_cmp(&b.variance()))
        });

        let winner = if retained.len() == 1 {
            retained[0]
        } else {
            // Tie-break among candidates with equal variance: the
            // second-to-last of the variance-ordered band. Long-standing
            // behavior that downstream loaders depend on; do not change
            // without auditing every caller's ambiguous samples.
            retained[retained.len() - 2]
        };
        debug!(
            delimiter = winner.candidate(),
            variance = winner.variance(),
            mean = winner.mean(),
            "delimiter inferred"
        );
        Ok(winner.candidate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::frame_slice;

    const QUOTED_CSV_SAMPLE: &[u8] = b"Year,Make,Model,Description,Price\n\
1997,Ford,E350,\"ac, abs, moon\",3000.00\n\
1999,Chevy,Venture,LX,4900.00\n\
1999,Chevy,\"Venture, Extended, Very, Large, Edition, Plus, Extra\",Fully loaded,5000.00\n\
1996,Jeep,Grand Cherokee,4X4,4799.00\n\
1996,Jeep,\"MUST SELL! air, moon roof, loaded, alloy, CD, extras\",Wrangler,4799.00\n\
2000,Mercury,Cougar,Coupe,2495.00";

    #[test]
    fn empty_candidate_set_fails_fast() {
        let err = DelimiterInference::new(Vec::new(), 1);
        assert!(matches!(err, Err(SniffError::EmptyCandidateSet)));
    }

    #[test]
    fn uniform_comma_sample_selects_comma() {
        let lines = frame_slice(b"a,b,c\n1,2,3\n4,5,6");
        let inference = DelimiterInference::new(vec![b',', b';', b'\t', b'|'], 1).unwrap();
        assert_eq!(inference.infer(&lines).unwrap(), b',');
    }

    #[test]
    fn quoted_free_text_pushes_comma_over_the_variance_ceiling() {
        // Seven lines; commas inside quoted fields make the per-line comma
        // count swing (4,6,4,10,4,9,4 -> variance ~5.8) while the price
        // decimal point appears once on every data line (variance ~0.12).
        let lines = frame_slice(QUOTED_CSV_SAMPLE);
        assert_eq!(lines.len(), 7);
        let inference = DelimiterInference::new(vec![b',', b'.'], 1).unwrap();
        assert_eq!(inference.infer(&lines).unwrap(), b'.');
    }

    #[test]
    fn absent_candidates_yield_no_delimiter() {
        let lines = frame_slice(b"plain text\nwith no separators");
        let inference = DelimiterInference::new(vec![b';', b'|'], 1).unwrap();
        assert!(matches!(
            inference.infer(&lines),
            Err(SniffError::NoDelimiter)
        ));
    }

    #[test]
    fn empty_sample_yields_no_delimiter() {
        let inference = DelimiterInference::new(vec![b',', b';'], 1).unwrap();
        assert!(matches!(inference.infer(&[]), Err(SniffError::NoDelimiter)));
    }

    #[test]
    fn sole_survivor_wins_without_ranking() {
        let lines = frame_slice(b"a;b\nc;d\ne;f");
        let inference = DelimiterInference::new(vec![b';', b','], 1).unwrap();
        assert_eq!(inference.infer(&lines).unwrap(), b';');
    }

    #[test]
    fn three_way_variance_tie_picks_second_to_last() {
        // 'a' x2, 'b' x3, 'c' x4 on every line: all variances are zero,
        // the band sorts by mean to [a, b, c], and the second-to-last
        // entry, 'b', is the deterministic choice.
        let lines = frame_slice(b"aabbbcccc\naabbbcccc\naabbbcccc");
        let inference = DelimiterInference::new(vec![b'a', b'b', b'c'], 1).unwrap();
        assert_eq!(inference.infer(&lines).unwrap(), b'b');
    }

    #[test]
    fn two_way_variance_tie_picks_the_lower_mean() {
        // Band of two: second-to-last is the first, i.e. lower mean.
        let lines = frame_slice(b"aabbb\naabbb");
        let inference = DelimiterInference::new(vec![b'b', b'a'], 1).unwrap();
        assert_eq!(inference.infer(&lines).unwrap(), b'a');
    }

    #[test]
    fn sub_epsilon_variance_chain_ranks_deterministically() {
        // 5000 lines give variances of 0, ~0.0006 and ~0.0012 for 'a',
        // 'b' and 'c': a-b and b-c are within epsilon of each other while
        // a-c is not. 'c' falls outside the retention band around the
        // minimum; 'a' and 'b' are tied, and the lower mean wins as the
        // second-to-last of the band.
        let lines: Vec<Line> = (0..5000)
            .map(|i| {
                let mut record = String::from("abc");
                if i < 3 {
                    record.push('b');
                }
                if i < 6 {
                    record.push('c');
                }
                Line::from(record.as_bytes())
            })
            .collect();
        let inference = DelimiterInference::new(vec![b'a', b'b', b'c'], 1).unwrap();
        assert_eq!(inference.infer(&lines).unwrap(), b'a');
    }

    #[test]
    fn minimum_mean_filters_rare_bytes() {
        // ';' appears once over four lines: rounded mean 0 < 1.
        let lines = frame_slice(b"a,b;c\nd,e\nf,g\nh,i");
        let inference = DelimiterInference::new(vec![b',', b';'], 1).unwrap();
        assert_eq!(inference.infer(&lines).unwrap(), b',');
    }
}

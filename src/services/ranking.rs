//! Ranking and selection: threshold filter, banded tie-break ordering, and
//! the result budget.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::models::{Convergence, RankingConfig};

/// Stateless ranker over candidate convergences.
#[derive(Debug, Clone)]
pub struct Ranker {
    min_confidence: f64,
    config: RankingConfig,
}

impl Ranker {
    /// Create a ranker with the shared acceptance threshold and tuning.
    pub const fn new(min_confidence: f64, config: RankingConfig) -> Self {
        Self {
            min_confidence,
            config,
        }
    }

    /// Whether a candidate clears the acceptance threshold (exclusive).
    pub fn accepts(&self, candidate: &Convergence) -> bool {
        candidate.probability > self.min_confidence
    }

    /// Order two candidates with the banded tie-break chain:
    ///
    /// 1. Higher probability first, unless within the probability band;
    /// 2. then sooner meeting first, unless within the time band;
    /// 3. then larger groups first.
    ///
    /// Candidates tying on all three compare equal; the stable sort in
    /// [`select`](Self::select) then preserves their pipeline order, keeping
    /// the output deterministic.
    pub fn compare(&self, a: &Convergence, b: &Convergence) -> Ordering {
        if (a.probability - b.probability).abs() > self.config.probability_band {
            return b
                .probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal);
        }

        if (a.time_to_meet_secs - b.time_to_meet_secs).abs() > self.config.time_band_secs {
            return a
                .time_to_meet_secs
                .partial_cmp(&b.time_to_meet_secs)
                .unwrap_or(Ordering::Equal);
        }

        b.group_size().cmp(&a.group_size())
    }

    /// Filter, order, and truncate candidates to the result budget.
    ///
    /// The banded comparator is intentionally not a total order (a chain of
    /// in-band neighbors can span more than one band), so ordering uses a
    /// stable insertion sort instead of the standard sort, which rejects
    /// inconsistent comparators.
    pub fn select(&self, mut candidates: Vec<Convergence>) -> Vec<Convergence> {
        let before = candidates.len();
        candidates.retain(|candidate| self.accepts(candidate));

        for i in 1..candidates.len() {
            let mut j = i;
            while j > 0 && self.compare(&candidates[j - 1], &candidates[j]) == Ordering::Greater {
                candidates.swap(j - 1, j);
                j -= 1;
            }
        }
        candidates.truncate(self.config.max_results);

        debug!(
            candidates = before,
            selected = candidates.len(),
            "ranking complete"
        );
        candidates
    }
}

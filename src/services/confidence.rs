//! Confidence composition: folds per-agent sensor confidence and
//! observation staleness into a candidate's final probability.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::domain::models::{AgentSnapshot, ConfidenceConfig, Convergence};

/// Stateless confidence-composition stage.
#[derive(Debug, Clone)]
pub struct ConfidenceComposer {
    config: ConfidenceConfig,
}

impl ConfidenceComposer {
    /// Create the stage with the given tuning.
    pub const fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// Compose the final pairwise probability in place.
    ///
    /// Multiplies by both agents' confidence, then by an exponential penalty
    /// on their combined observation age, and only then applies the single
    /// [0, 1] cap. An incoming value above 1 (venue magnetism surplus) is
    /// deliberately left intact until after the multipliers so they act on
    /// the full boosted value.
    pub fn compose(
        &self,
        candidate: &mut Convergence,
        a: &AgentSnapshot,
        b: &AgentSnapshot,
        now: DateTime<Utc>,
    ) {
        candidate.scale_probability(a.confidence * b.confidence);

        let combined_age_ms = (a.age_ms(now) + b.age_ms(now)) as f64;
        let age_penalty = (-combined_age_ms / self.config.staleness_decay_ms).exp();
        candidate.scale_probability(age_penalty);
        candidate.clamp_probability();

        trace!(
            combined_age_ms,
            age_penalty,
            probability = candidate.probability,
            "confidence composed"
        );
    }
}

//! Group extension: promotes a strong pairwise convergence to a 3+ group
//! when another agent is predicted to be nearby at the same time.

use tracing::trace;

use crate::domain::geo;
use crate::domain::models::{AgentSnapshot, Convergence, GroupConfig};

/// Stateless group-extension stage.
#[derive(Debug, Clone)]
pub struct GroupExtender {
    config: GroupConfig,
}

impl GroupExtender {
    /// Create the stage with the given tuning.
    pub const fn new(config: GroupConfig) -> Self {
        Self { config }
    }

    /// Try to extend `pair` with `joiner`.
    ///
    /// The joiner is projected to the pair's meet time; if its projected
    /// position falls inside the join radius of the pair's point, a group
    /// candidate is produced with a cohesion- and confidence-damped
    /// probability.
    ///
    /// The group point is the two-point average of the pair's convergence
    /// point and the joiner's projected position; it is deliberately not
    /// re-centered across all three source trajectories.
    pub fn extend(&self, pair: &Convergence, joiner: &AgentSnapshot) -> Option<Convergence> {
        let projected = geo::project(&joiner.position, &joiner.velocity, pair.time_to_meet_secs);
        let distance_m = geo::haversine_m(&projected, &pair.point);
        if distance_m >= self.config.join_radius_m {
            return None;
        }

        let cohesion = (-distance_m / self.config.cohesion_decay_m).exp();
        let probability = pair.probability * cohesion * joiner.confidence * self.config.damping;

        trace!(
            joiner = %joiner.id,
            distance_m,
            cohesion,
            probability,
            "group extension candidate"
        );

        pair.extended_with(joiner.id, pair.point.midpoint(&projected), probability)
    }
}

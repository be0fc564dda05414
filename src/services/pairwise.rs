//! Pairwise trajectory solver: closest approach of two moving agents.
//!
//! Both agents are modeled as constant-velocity points. The relative
//! displacement is converted to meters at the flat-earth scale so the
//! closest-approach time falls straight out of the relative-motion dot
//! product.

use tracing::trace;

use crate::domain::geo::{self, METERS_PER_DEGREE};
use crate::domain::models::{AgentSnapshot, Convergence, PairwiseConfig};

/// Stateless closest-approach solver.
#[derive(Debug, Clone)]
pub struct PairwiseSolver {
    config: PairwiseConfig,
}

impl PairwiseSolver {
    /// Create a solver with the given tuning.
    pub const fn new(config: PairwiseConfig) -> Self {
        Self { config }
    }

    /// Solve the closest approach of `a` and `b` within `horizon_secs`.
    ///
    /// Returns `None` when the pair is effectively co-moving, when the
    /// closest approach falls outside `[0, horizon_secs]`, or when the miss
    /// distance at closest approach exceeds the convergence gate. The
    /// computation is symmetric in its arguments.
    pub fn solve(
        &self,
        a: &AgentSnapshot,
        b: &AgentSnapshot,
        horizon_secs: f64,
    ) -> Option<Convergence> {
        let rel_vel = b.velocity.minus(&a.velocity);
        let rel_speed_sq = rel_vel.magnitude_squared();
        if rel_speed_sq < self.config.min_relative_speed_sq {
            return None;
        }

        // Relative displacement in meters on the same axes as the velocity.
        let rel_east = (b.position.lon - a.position.lon) * METERS_PER_DEGREE;
        let rel_north = (b.position.lat - a.position.lat) * METERS_PER_DEGREE;

        let t_star = -(rel_east * rel_vel.east + rel_north * rel_vel.north) / rel_speed_sq;
        if t_star < 0.0 || t_star > horizon_secs {
            return None;
        }

        let projected_a = geo::project(&a.position, &a.velocity, t_star);
        let projected_b = geo::project(&b.position, &b.velocity, t_star);

        let miss_m = geo::haversine_m(&projected_a, &projected_b);
        if miss_m > self.config.max_convergence_distance_m {
            return None;
        }

        let probability = (-miss_m / self.config.distance_decay_m).exp()
            * (-t_star / self.config.time_decay_secs).exp();

        trace!(
            t_star,
            miss_m,
            probability,
            "pairwise closest approach found"
        );

        Some(Convergence::pair(
            a.id,
            b.id,
            projected_a.midpoint(&projected_b),
            t_star,
            probability,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{GeoPoint, Velocity};
    use chrono::Utc;
    use uuid::Uuid;

    fn agent(lon: f64, lat: f64, east: f64, north: f64) -> AgentSnapshot {
        AgentSnapshot::new(
            Uuid::new_v4(),
            GeoPoint::new(lon, lat),
            Velocity::new(east, north),
            0.9,
            Utc::now(),
        )
    }

    fn solver() -> PairwiseSolver {
        PairwiseSolver::new(PairwiseConfig::default())
    }

    #[test]
    fn test_head_on_approach() {
        // ~22 m apart on the equator, closing at 2 m/s.
        let a = agent(0.0, 0.0, 1.0, 0.0);
        let b = agent(0.0002, 0.0, -1.0, 0.0);

        let result = solver().solve(&a, &b, 180.0).expect("should converge");
        // Closing 22.264 m at 2 m/s puts closest approach near 11 s.
        assert!(
            result.time_to_meet_secs > 5.0 && result.time_to_meet_secs < 20.0,
            "t* = {}",
            result.time_to_meet_secs
        );
        // Head-on trajectories meet almost exactly: high base probability.
        assert!(result.probability > 0.85, "p = {}", result.probability);
        // Meeting point is between the two start positions.
        assert!(result.point.lon > 0.0 && result.point.lon < 0.0002);
    }

    #[test]
    fn test_co_moving_rejected() {
        let a = agent(0.0, 0.0, 1.0, 0.0);
        let b = agent(0.0002, 0.0, 1.0, 0.0);
        assert!(solver().solve(&a, &b, 180.0).is_none());
    }

    #[test]
    fn test_diverging_rejected() {
        // Already at closest approach and moving apart: t* < 0.
        let a = agent(0.0, 0.0, -1.0, 0.0);
        let b = agent(0.0002, 0.0, 1.0, 0.0);
        assert!(solver().solve(&a, &b, 180.0).is_none());
    }

    #[test]
    fn test_beyond_horizon_rejected() {
        // ~1,113 m apart closing at 2 m/s: t* near 557 s, past the horizon.
        let a = agent(0.0, 0.0, 1.0, 0.0);
        let b = agent(0.01, 0.0, -1.0, 0.0);
        assert!(solver().solve(&a, &b, 180.0).is_none());
        // A longer horizon admits it.
        assert!(solver().solve(&a, &b, 600.0).is_some());
    }

    #[test]
    fn test_wide_miss_rejected() {
        // Parallel tracks ~111 m apart moving in opposite directions: the
        // closest approach happens but the miss distance stays ~111 m.
        let a = agent(0.0, 0.0, 1.0, 0.0);
        let b = agent(0.0002, 0.001, -1.0, 0.0);
        assert!(solver().solve(&a, &b, 180.0).is_none());
    }

    #[test]
    fn test_symmetry() {
        let a = agent(0.0, 0.0, 1.0, 0.2);
        let b = agent(0.0003, 0.0001, -0.8, -0.1);

        let ab = solver().solve(&a, &b, 180.0).expect("converges");
        let ba = solver().solve(&b, &a, 180.0).expect("converges");

        assert_eq!(ab.agent_ids, ba.agent_ids);
        assert!((ab.time_to_meet_secs - ba.time_to_meet_secs).abs() < 1e-9);
        assert!((ab.probability - ba.probability).abs() < 1e-9);
        assert!((ab.point.lon - ba.point.lon).abs() < 1e-12);
        assert!((ab.point.lat - ba.point.lat).abs() < 1e-12);
    }

    #[test]
    fn test_probability_decays_with_time() {
        // Same closing geometry, farther apart: longer t*, lower probability.
        let near_a = agent(0.0, 0.0, 1.0, 0.0);
        let near_b = agent(0.0002, 0.0, -1.0, 0.0);
        let far_a = agent(0.0, 0.0, 1.0, 0.0);
        let far_b = agent(0.002, 0.0, -1.0, 0.0);

        let near = solver().solve(&near_a, &near_b, 180.0).expect("near pair");
        let far = solver().solve(&far_a, &far_b, 180.0).expect("far pair");
        assert!(near.probability > far.probability);
    }
}

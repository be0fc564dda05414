//! Moving-participant snapshots consumed by the prediction pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::geo::{GeoPoint, Velocity};

/// An immutable snapshot of one tracked participant.
///
/// Snapshots are produced upstream by a location/motion subsystem and are
/// never mutated by the engine; a fresh list arrives on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// Unique participant identifier.
    pub id: Uuid,

    /// Last observed position in degrees.
    pub position: GeoPoint,

    /// Estimated velocity in meters per second along the coordinate axes.
    pub velocity: Velocity,

    /// Sensor/estimation confidence in [0, 1].
    pub confidence: f64,

    /// When the observation was made.
    pub last_seen: DateTime<Utc>,
}

impl AgentSnapshot {
    /// Create a snapshot observed at `last_seen`.
    pub fn new(
        id: Uuid,
        position: GeoPoint,
        velocity: Velocity,
        confidence: f64,
        last_seen: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            confidence,
            last_seen,
        }
    }

    /// Scalar speed in meters per second.
    pub fn speed(&self) -> f64 {
        self.velocity.speed()
    }

    /// Observation age in milliseconds at the evaluation instant `now`.
    ///
    /// An observation stamped in the future (clock skew upstream) reports an
    /// age of zero rather than a negative value.
    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_seen).num_milliseconds().max(0)
    }

    /// Whether every numeric field is finite. Snapshots failing this check
    /// must never reach the pairwise solver.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.confidence.is_finite()
    }
}

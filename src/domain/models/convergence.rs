//! Predicted convergence records — the engine's only output type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::geo::GeoPoint;
use crate::domain::models::venue::Venue;

/// A predicted meeting between two or more agents.
///
/// Invariants are enforced at construction: the probability is clamped into
/// [0, 1], the time-to-meet is never negative, and the id list never repeats
/// a participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convergence {
    /// Participants predicted to meet (at least two, no duplicates). Pairwise
    /// results carry the two ids in sorted order so that input ordering never
    /// leaks into the output; group results append joiners after the pair.
    pub agent_ids: Vec<Uuid>,

    /// Predicted meeting point in degrees.
    pub point: GeoPoint,

    /// Seconds until the predicted closest approach.
    pub time_to_meet_secs: f64,

    /// Confidence that the meeting occurs. Clamped into [0, 1] before a
    /// result is returned; mid-pipeline the venue-magnetism boost may push
    /// it above 1 until confidence composition applies the final cap.
    pub probability: f64,

    /// The venue the meeting gravitates to, when one sits within the attach
    /// radius of the final point.
    pub nearest_venue: Option<Venue>,
}

impl Convergence {
    /// Build a pairwise convergence. The two ids are stored sorted.
    pub fn pair(
        a: Uuid,
        b: Uuid,
        point: GeoPoint,
        time_to_meet_secs: f64,
        probability: f64,
    ) -> Self {
        let mut agent_ids = vec![a, b];
        agent_ids.sort();
        Self {
            agent_ids,
            point,
            time_to_meet_secs: time_to_meet_secs.max(0.0),
            probability: probability.clamp(0.0, 1.0),
            nearest_venue: None,
        }
    }

    /// Extend this convergence with one more participant, a new meeting point
    /// and a recomposed probability. The meet time and attached venue carry
    /// over. Returns `None` if `joiner` is already a participant.
    pub fn extended_with(&self, joiner: Uuid, point: GeoPoint, probability: f64) -> Option<Self> {
        if self.agent_ids.contains(&joiner) {
            return None;
        }
        let mut agent_ids = self.agent_ids.clone();
        agent_ids.push(joiner);
        Some(Self {
            agent_ids,
            point,
            time_to_meet_secs: self.time_to_meet_secs,
            probability: probability.clamp(0.0, 1.0),
            nearest_venue: self.nearest_venue.clone(),
        })
    }

    /// Rescale the probability without capping it.
    ///
    /// The venue-magnetism boost is allowed to carry the value above 1 so
    /// that the confidence and staleness multipliers act on the full
    /// surplus; [`clamp_probability`](Self::clamp_probability) applies the
    /// single cap at the end of confidence composition.
    pub fn scale_probability(&mut self, factor: f64) {
        self.probability *= factor;
    }

    /// Clamp the probability into [0, 1].
    pub fn clamp_probability(&mut self) {
        self.probability = self.probability.clamp(0.0, 1.0);
    }

    /// Number of participants in this convergence.
    pub fn group_size(&self) -> usize {
        self.agent_ids.len()
    }
}

//! The input document for one engine invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::SnapshotError;
use crate::domain::models::agent::AgentSnapshot;
use crate::domain::models::venue::Venue;

/// Everything the engine needs for a single prediction call: the current
/// agent list, the venues in scope, and the instant the snapshot was taken.
///
/// The engine never samples a clock itself; `captured_at` is the evaluation
/// instant for staleness ages and the time-of-day bucket, which keeps runs
/// reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tracked participants in scope.
    pub agents: Vec<AgentSnapshot>,

    /// Points of interest in scope.
    #[serde(default)]
    pub venues: Vec<Venue>,

    /// When the snapshot was taken. Defaults to the decode time when the
    /// document omits it.
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot captured at the given instant.
    pub fn new(agents: Vec<AgentSnapshot>, venues: Vec<Venue>, captured_at: DateTime<Utc>) -> Self {
        Self {
            agents,
            venues,
            captured_at,
        }
    }

    /// Decode a snapshot from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(SnapshotError::Decode)
    }
}

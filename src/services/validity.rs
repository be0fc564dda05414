//! Validity filter: discards agents whose motion data is stale, implausible,
//! or low-confidence before any pairwise work happens.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::models::{AgentSnapshot, ValidityConfig};

/// Stateless admission filter over raw agent snapshots.
#[derive(Debug, Clone)]
pub struct ValidityFilter {
    config: ValidityConfig,
}

impl ValidityFilter {
    /// Create a filter with the given thresholds.
    pub const fn new(config: ValidityConfig) -> Self {
        Self { config }
    }

    /// Whether a single agent passes admission at the evaluation instant.
    ///
    /// Non-finite positions, velocities, or confidences fail immediately so
    /// no NaN can propagate into later arithmetic.
    pub fn is_valid(&self, agent: &AgentSnapshot, now: DateTime<Utc>) -> bool {
        if !agent.is_finite() {
            return false;
        }

        let speed = agent.speed();
        speed >= self.config.min_speed_mps
            && speed <= self.config.max_speed_mps
            && agent.age_ms(now) < self.config.max_age_ms
            && agent.confidence > self.config.min_confidence
    }

    /// Filter a snapshot's agent list down to admissible agents, preserving
    /// input order.
    pub fn filter<'a>(
        &self,
        agents: &'a [AgentSnapshot],
        now: DateTime<Utc>,
    ) -> Vec<&'a AgentSnapshot> {
        let valid: Vec<&AgentSnapshot> = agents
            .iter()
            .filter(|agent| self.is_valid(agent, now))
            .collect();

        debug!(
            total = agents.len(),
            valid = valid.len(),
            "validity filter applied"
        );
        valid
    }
}

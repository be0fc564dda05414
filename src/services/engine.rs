//! The convergence engine: wires the pipeline stages together.
//!
//! One call is a pure function of its snapshot: validity filter, pairwise
//! closest-approach solving over every unordered pair, venue magnetism,
//! confidence composition, group extension against the remaining agents, and
//! finally ranking under the result budget. No state survives between calls,
//! so independent invocations (one per geographic partition, say) can run in
//! parallel with no coordination.

use chrono::Timelike;
use tracing::debug;

use crate::domain::models::{Convergence, DayPeriod, EngineConfig, Snapshot};
use crate::services::confidence::ConfidenceComposer;
use crate::services::group::GroupExtender;
use crate::services::magnetism::VenueMagnetism;
use crate::services::pairwise::PairwiseSolver;
use crate::services::ranking::Ranker;
use crate::services::validity::ValidityFilter;

/// Counters describing what one prediction call did, for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictionStats {
    /// Agents supplied in the snapshot.
    pub agents_total: usize,
    /// Agents that passed the validity filter.
    pub agents_valid: usize,
    /// Unordered pairs run through the trajectory solver.
    pub pairs_examined: usize,
    /// Pairwise candidates that cleared the acceptance threshold.
    pub pairwise_candidates: usize,
    /// Group candidates that cleared the acceptance threshold.
    pub group_candidates: usize,
    /// Results returned after ranking.
    pub results: usize,
}

/// The convergence prediction engine.
///
/// Construction assembles the pipeline stages from one [`EngineConfig`];
/// every prediction call after that is pure and read-only.
#[derive(Debug, Clone)]
pub struct ConvergenceEngine {
    config: EngineConfig,
    validity: ValidityFilter,
    pairwise: PairwiseSolver,
    magnetism: VenueMagnetism,
    confidence: ConfidenceComposer,
    group: GroupExtender,
    ranker: Ranker,
}

impl Default for ConvergenceEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ConvergenceEngine {
    /// Build an engine from a tuning configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            validity: ValidityFilter::new(config.validity.clone()),
            pairwise: PairwiseSolver::new(config.pairwise.clone()),
            magnetism: VenueMagnetism::new(config.magnetism.clone()),
            confidence: ConfidenceComposer::new(config.confidence.clone()),
            group: GroupExtender::new(config.group.clone()),
            ranker: Ranker::new(config.min_confidence, config.ranking.clone()),
            config,
        }
    }

    /// The configuration this engine was built from.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Predict convergences using the configured prediction horizon.
    pub fn predict(&self, snapshot: &Snapshot) -> Vec<Convergence> {
        self.predict_within(snapshot, self.config.pairwise.max_prediction_secs)
    }

    /// Predict convergences with a per-call horizon override in seconds.
    pub fn predict_within(&self, snapshot: &Snapshot, horizon_secs: f64) -> Vec<Convergence> {
        self.predict_with_stats(snapshot, horizon_secs).0
    }

    /// Predict convergences and report pipeline counters alongside them.
    pub fn predict_with_stats(
        &self,
        snapshot: &Snapshot,
        horizon_secs: f64,
    ) -> (Vec<Convergence>, PredictionStats) {
        let now = snapshot.captured_at;
        let mut stats = PredictionStats {
            agents_total: snapshot.agents.len(),
            ..PredictionStats::default()
        };

        let valid = self.validity.filter(&snapshot.agents, now);
        stats.agents_valid = valid.len();
        if valid.len() < 2 {
            debug!(valid = valid.len(), "fewer than two valid agents");
            return (Vec::new(), stats);
        }

        let period = DayPeriod::from_hour(now.hour());
        let mut candidates: Vec<Convergence> = Vec::new();

        for i in 0..valid.len() {
            for j in (i + 1)..valid.len() {
                stats.pairs_examined += 1;
                let Some(mut pair) = self.pairwise.solve(valid[i], valid[j], horizon_secs) else {
                    continue;
                };

                self.magnetism.apply(&mut pair, &snapshot.venues, period);
                self.confidence.compose(&mut pair, valid[i], valid[j], now);
                if !self.ranker.accepts(&pair) {
                    continue;
                }
                stats.pairwise_candidates += 1;

                // Extend the surviving pair with every other valid agent.
                for (k, joiner) in valid.iter().enumerate() {
                    if k == i || k == j {
                        continue;
                    }
                    if let Some(group) = self.group.extend(&pair, joiner) {
                        if self.ranker.accepts(&group) {
                            stats.group_candidates += 1;
                            candidates.push(group);
                        }
                    }
                }

                candidates.push(pair);
            }
        }

        let results = self.ranker.select(candidates);
        stats.results = results.len();

        debug!(
            agents_total = stats.agents_total,
            agents_valid = stats.agents_valid,
            pairs_examined = stats.pairs_examined,
            pairwise_candidates = stats.pairwise_candidates,
            group_candidates = stats.group_candidates,
            results = stats.results,
            "prediction complete"
        );

        (results, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{GeoPoint, Velocity};
    use crate::domain::models::AgentSnapshot;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn agent(lon: f64, east: f64, now: chrono::DateTime<Utc>) -> AgentSnapshot {
        AgentSnapshot::new(
            Uuid::new_v4(),
            GeoPoint::new(lon, 0.0),
            Velocity::new(east, 0.0),
            0.9,
            now,
        )
    }

    fn noon() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let engine = ConvergenceEngine::default();
        let snapshot = Snapshot::new(vec![], vec![], noon());
        let (results, stats) = engine.predict_with_stats(&snapshot, 180.0);
        assert!(results.is_empty());
        assert_eq!(stats.agents_valid, 0);
        assert_eq!(stats.pairs_examined, 0);
    }

    #[test]
    fn test_single_agent_yields_nothing() {
        let now = noon();
        let engine = ConvergenceEngine::default();
        let snapshot = Snapshot::new(vec![agent(0.0, 1.0, now)], vec![], now);
        assert!(engine.predict(&snapshot).is_empty());
    }

    #[test]
    fn test_converging_pair_produces_result() {
        let now = noon();
        let engine = ConvergenceEngine::default();
        let snapshot = Snapshot::new(
            vec![agent(0.0, 1.0, now), agent(0.0002, -1.0, now)],
            vec![],
            now,
        );

        let (results, stats) = engine.predict_with_stats(&snapshot, 180.0);
        assert_eq!(results.len(), 1);
        assert_eq!(stats.pairs_examined, 1);
        assert_eq!(stats.pairwise_candidates, 1);
        assert!(results[0].probability > 0.65);
    }

    #[test]
    fn test_determinism() {
        let now = noon();
        let engine = ConvergenceEngine::default();
        let snapshot = Snapshot::new(
            vec![
                agent(0.0, 1.2, now),
                agent(0.0002, -1.0, now),
                agent(0.0004, -1.4, now),
                agent(0.0001, 0.8, now),
            ],
            vec![],
            now,
        );

        let first = engine.predict(&snapshot);
        let second = engine.predict(&snapshot);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.agent_ids, b.agent_ids);
            assert!((a.probability - b.probability).abs() < f64::EPSILON);
            assert!((a.time_to_meet_secs - b.time_to_meet_secs).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_result_budget() {
        let now = noon();
        let engine = ConvergenceEngine::default();
        // A cluster of mutually converging agents produces many candidates.
        let snapshot = Snapshot::new(
            vec![
                agent(0.0, 1.0, now),
                agent(0.0002, -1.0, now),
                agent(0.0004, -1.5, now),
                agent(-0.0002, 1.5, now),
                agent(0.0001, -0.5, now),
            ],
            vec![],
            now,
        );

        let results = engine.predict(&snapshot);
        assert!(results.len() <= 3);
    }
}

//! Engine tuning configuration.
//!
//! Every tunable the pipeline consults lives here: no stage carries its own
//! magic numbers. `EngineConfig::default()` holds the reference tuning;
//! alternate profiles are loaded over it by the infrastructure layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Time-of-day bucket used by the venue affinity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    /// Before 11:00.
    Morning,
    /// 11:00 to 14:59.
    Lunch,
    /// 15:00 to 18:59.
    Evening,
    /// 19:00 onward.
    Night,
}

impl DayPeriod {
    /// Bucket a wall-clock hour (0-23).
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            0..=10 => Self::Morning,
            11..=14 => Self::Lunch,
            15..=18 => Self::Evening,
            _ => Self::Night,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shared acceptance threshold: candidates at or below this composed
    /// probability are discarded, both pairwise and group.
    pub min_confidence: f64,

    /// Validity filter tuning.
    pub validity: ValidityConfig,

    /// Pairwise trajectory solver tuning.
    pub pairwise: PairwiseConfig,

    /// Venue magnetism tuning.
    pub magnetism: MagnetismConfig,

    /// Confidence composition tuning.
    pub confidence: ConfidenceConfig,

    /// Group extension tuning.
    pub group: GroupConfig,

    /// Ranking and selection tuning.
    pub ranking: RankingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.65,
            validity: ValidityConfig::default(),
            pairwise: PairwiseConfig::default(),
            magnetism: MagnetismConfig::default(),
            confidence: ConfidenceConfig::default(),
            group: GroupConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

/// Validity filter thresholds (spec'd agent admission rules).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityConfig {
    /// Minimum plausible speed in m/s; slower agents are treated as parked.
    pub min_speed_mps: f64,
    /// Maximum plausible speed in m/s; faster agents are sensor glitches or
    /// vehicles out of scope.
    pub max_speed_mps: f64,
    /// Maximum observation age in milliseconds.
    pub max_age_ms: i64,
    /// Minimum sensor confidence (exclusive).
    pub min_confidence: f64,
}

impl Default for ValidityConfig {
    fn default() -> Self {
        Self {
            min_speed_mps: 0.3,
            max_speed_mps: 15.0,
            max_age_ms: 45_000,
            min_confidence: 0.4,
        }
    }
}

/// Pairwise closest-approach solver tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairwiseConfig {
    /// Prediction horizon in seconds; closest approaches beyond it are
    /// rejected. Overridable per call.
    pub max_prediction_secs: f64,
    /// Squared relative-speed floor ((m/s)^2) below which two agents are
    /// effectively co-moving and never converge.
    pub min_relative_speed_sq: f64,
    /// Maximum miss distance in meters at closest approach.
    pub max_convergence_distance_m: f64,
    /// e-folding distance in meters for the spatial probability decay.
    pub distance_decay_m: f64,
    /// e-folding time in seconds for the temporal probability decay.
    pub time_decay_secs: f64,
}

impl Default for PairwiseConfig {
    fn default() -> Self {
        Self {
            max_prediction_secs: 180.0,
            min_relative_speed_sq: 0.01,
            max_convergence_distance_m: 80.0,
            distance_decay_m: 30.0,
            time_decay_secs: 120.0,
        }
    }
}

/// One popularity tier: venues at or above `min_popularity` get `weight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularityTier {
    /// Inclusive popularity floor for this tier.
    pub min_popularity: f64,
    /// Multiplier applied when the tier matches.
    pub weight: f64,
}

/// Venue magnetism tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnetismConfig {
    /// Radius in meters within which the nearest venue exerts any pull.
    pub search_radius_m: f64,
    /// Radius in meters within which a venue is attached to the final result.
    pub attach_radius_m: f64,
    /// Base magnetism factor before popularity/affinity/decay weighting.
    pub base_factor: f64,
    /// e-folding distance in meters for the venue proximity decay.
    pub distance_decay_m: f64,
    /// Popularity tiers, checked in order; first match wins. Falls back to
    /// 1.0 when no tier matches.
    pub popularity_tiers: Vec<PopularityTier>,
    /// Blend weight gain: `(magnetism - 1) * blend_gain`, clamped to
    /// `[0, blend_cap]`.
    pub blend_gain: f64,
    /// Upper bound on the blend weight toward the venue.
    pub blend_cap: f64,
    /// Blend weights at or below this floor leave the point untouched.
    pub blend_floor: f64,
    /// Day-period x venue-category multipliers; unlisted categories get 1.0.
    pub affinity: BTreeMap<DayPeriod, BTreeMap<String, f64>>,
}

impl MagnetismConfig {
    /// Popularity weight for a venue, from the first matching tier.
    pub fn popularity_weight(&self, popularity: f64) -> f64 {
        self.popularity_tiers
            .iter()
            .find(|tier| popularity >= tier.min_popularity)
            .map_or(1.0, |tier| tier.weight)
    }

    /// Affinity multiplier for a venue category at a day period; 1.0 when the
    /// category is unlisted for that period.
    pub fn affinity_multiplier(&self, period: DayPeriod, category: &str) -> f64 {
        self.affinity
            .get(&period)
            .and_then(|table| table.get(category))
            .copied()
            .unwrap_or(1.0)
    }
}

impl Default for MagnetismConfig {
    fn default() -> Self {
        let mut affinity = BTreeMap::new();
        affinity.insert(
            DayPeriod::Morning,
            BTreeMap::from([
                ("coffee".to_string(), 1.8),
                ("cafe".to_string(), 1.5),
                ("park".to_string(), 1.2),
            ]),
        );
        affinity.insert(
            DayPeriod::Lunch,
            BTreeMap::from([
                ("restaurant".to_string(), 1.7),
                ("food".to_string(), 1.5),
                ("cafe".to_string(), 1.3),
            ]),
        );
        affinity.insert(
            DayPeriod::Evening,
            BTreeMap::from([
                ("bar".to_string(), 1.6),
                ("restaurant".to_string(), 1.4),
                ("gym".to_string(), 1.2),
            ]),
        );
        affinity.insert(
            DayPeriod::Night,
            BTreeMap::from([
                ("bar".to_string(), 2.2),
                ("club".to_string(), 2.0),
                ("food".to_string(), 1.3),
            ]),
        );

        Self {
            search_radius_m: 75.0,
            attach_radius_m: 50.0,
            base_factor: 1.4,
            distance_decay_m: 30.0,
            popularity_tiers: vec![
                PopularityTier {
                    min_popularity: 80.0,
                    weight: 1.5,
                },
                PopularityTier {
                    min_popularity: 50.0,
                    weight: 1.2,
                },
            ],
            blend_gain: 0.5,
            blend_cap: 0.6,
            blend_floor: 0.1,
            affinity,
        }
    }
}

/// Confidence composition tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// e-folding combined observation age in milliseconds for the staleness
    /// penalty.
    pub staleness_decay_ms: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            staleness_decay_ms: 60_000.0,
        }
    }
}

/// Group extension tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    /// Radius in meters within which a third agent's projected position must
    /// fall to join a pair.
    pub join_radius_m: f64,
    /// e-folding distance in meters for the spatial cohesion decay.
    pub cohesion_decay_m: f64,
    /// Flat damping applied to every group probability.
    pub damping: f64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            join_radius_m: 80.0,
            cohesion_decay_m: 50.0,
            damping: 0.8,
        }
    }
}

/// Ranking and selection tuning. The bands make the tie-break chain explicit
/// and testable rather than burying literals in the comparator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Probability differences at or below this band count as a tie.
    pub probability_band: f64,
    /// Time-to-meet differences at or below this band (seconds) count as a
    /// tie.
    pub time_band_secs: f64,
    /// Maximum number of results returned per invocation.
    pub max_results: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            probability_band: 0.1,
            time_band_secs: 30.0,
            max_results: 3,
        }
    }
}

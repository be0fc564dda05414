//! Domain models: the read-only inputs and outputs of one prediction call.

pub mod agent;
pub mod config;
pub mod convergence;
pub mod snapshot;
pub mod venue;

pub use agent::AgentSnapshot;
pub use config::{
    ConfidenceConfig, DayPeriod, EngineConfig, GroupConfig, MagnetismConfig, PairwiseConfig,
    PopularityTier, RankingConfig, ValidityConfig,
};
pub use convergence::Convergence;
pub use snapshot::Snapshot;
pub use venue::Venue;

//! Pipeline services: one stateless stage per module, assembled by the
//! [`engine::ConvergenceEngine`].

pub mod confidence;
pub mod engine;
pub mod group;
pub mod magnetism;
pub mod pairwise;
pub mod ranking;
pub mod validity;

pub use confidence::ConfidenceComposer;
pub use engine::{ConvergenceEngine, PredictionStats};
pub use group::GroupExtender;
pub use magnetism::VenueMagnetism;
pub use pairwise::PairwiseSolver;
pub use ranking::Ranker;
pub use validity::ValidityFilter;

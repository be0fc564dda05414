//! Rendezvous - Multi-Agent Convergence Prediction Engine
//!
//! Given a snapshot of moving participants and a set of points of interest,
//! this crate predicts which pairs (or small groups) of participants are
//! geometrically and temporally likely to meet, when, where, and with what
//! confidence, biased toward nearby popular venues appropriate to the time
//! of day.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): geographic primitives, agent/venue/result
//!   models, tuning configuration, errors
//! - **Service Layer** (`services`): the prediction pipeline, one stateless
//!   stage per module, assembled by [`ConvergenceEngine`]
//! - **Infrastructure Layer** (`infrastructure`): tuning-profile loading
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rendezvous::{ConvergenceEngine, Snapshot};
//!
//! let engine = ConvergenceEngine::default();
//! let snapshot = Snapshot::new(vec![], vec![], Utc::now());
//! let results = engine.predict(&snapshot);
//! assert!(results.is_empty());
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{ConfigError, SnapshotError};
pub use domain::geo::{GeoPoint, Velocity};
pub use domain::models::{
    AgentSnapshot, Convergence, DayPeriod, EngineConfig, Snapshot, Venue,
};
pub use infrastructure::ConfigLoader;
pub use services::{ConvergenceEngine, PredictionStats};

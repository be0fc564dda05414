//! Domain-level errors.
//!
//! The prediction pipeline itself never errors; it degrades to an empty
//! result list. Errors only arise at the edges: decoding input documents and
//! validating tuning configuration.

use thiserror::Error;

/// Errors decoding a snapshot document.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to decode snapshot JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors validating an engine configuration after loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid speed window: min {min} must be <= max {max} and both non-negative")]
    InvalidSpeedWindow { min: f64, max: f64 },

    #[error("Invalid max_age_ms: {0}. Must be positive")]
    InvalidMaxAge(i64),

    #[error("Invalid min_confidence: {0}. Must be within [0, 1]")]
    InvalidMinConfidence(f64),

    #[error("Invalid prediction horizon: {0}. Must be positive")]
    InvalidHorizon(f64),

    #[error("Invalid decay constant {name}: {value}. Must be positive")]
    InvalidDecay { name: &'static str, value: f64 },

    #[error("Invalid max_results: 0. Must be at least 1")]
    InvalidMaxResults,

    #[error("Invalid tie band {name}: {value}. Must be non-negative")]
    InvalidTieBand { name: &'static str, value: f64 },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

//! Domain layer: pure models, geometry, and errors.
//!
//! Nothing in this module performs I/O or holds state across calls.

pub mod error;
pub mod geo;
pub mod models;

pub use error::{ConfigError, SnapshotError};

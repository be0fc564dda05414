//! Configuration management infrastructure
//!
//! Hierarchical tuning-profile loading using figment:
//! - Reference defaults
//! - YAML profile overrides
//! - Environment variable overrides
//! - Post-load validation

pub mod loader;

pub use loader::ConfigLoader;

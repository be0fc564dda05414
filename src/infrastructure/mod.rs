//! Infrastructure layer: everything that touches the outside world.
//!
//! For this crate that is only configuration loading; the engine itself
//! performs no I/O.

pub mod config;

pub use config::ConfigLoader;

//! CLI output formatting module
//!
//! Terminal formatters for prediction results.

pub mod table;

pub use table::TableFormatter;

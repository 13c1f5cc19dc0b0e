//! Core data types, configuration, errors and history
//!
//! Everything the parser, aligner and resolver share lives here.

pub mod config;
pub mod errors;
pub mod history;
pub mod model;
pub mod timestamp;

pub use config::SessionConfig;
pub use errors::{DualSubError, Result};
pub use history::PairHistory;
pub use model::{AlignedPair, Entry, Track};
pub use timestamp::{format_timestamp, to_seconds};

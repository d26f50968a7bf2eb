//! Stack depth and bet sizing configuration.
mod config;
mod sizing;

pub use config::*;
pub use sizing::*;

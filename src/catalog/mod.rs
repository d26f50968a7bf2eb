//! Legal, labelled actions at a decision point.
mod catalog;
mod choice;

pub use catalog::*;
pub use choice::*;

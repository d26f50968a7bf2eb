//! Per-street betting state, its transitions and turn resolution.
mod action;
mod player;
mod rotation;
mod state;

pub use action::*;
pub use player::*;
pub use state::*;

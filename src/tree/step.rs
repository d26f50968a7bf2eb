use crate::betting::Action;
use crate::seating::Seat;
use serde::Deserialize;
use serde::Serialize;

/// The edge into a decision node: who did what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub seat: Seat,
    pub action: Action,
}

impl Step {
    /// Same seat, and the same action within the amount tolerance.
    pub fn is_like(&self, other: &Self) -> bool {
        self.seat == other.seat && self.action.is_like(&other.action)
    }
}

impl From<(Seat, Action)> for Step {
    fn from((seat, action): (Seat, Action)) -> Self {
        Self { seat, action }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.seat, self.action.symbol())
    }
}

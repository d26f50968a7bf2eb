use crate::Chips;
use crate::betting::Action;
use crate::seating::Seat;
use thiserror::Error;

/// Failures surfaced by the betting engine and the decision tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// The requested action is not available to that seat in that state.
    /// Nothing was mutated.
    #[error("illegal action {action} for {seat}: {reason}")]
    IllegalAction {
        seat: Seat,
        action: Action,
        reason: String,
    },
    /// A path could not be replayed from the root. `resolved` is the id of
    /// the deepest node that could be reached.
    #[error("no node at {requested}, nearest ancestor is {resolved}")]
    UnknownSeatInPath { requested: String, resolved: String },
    /// The tree was built under a different table configuration.
    #[error("tree was built for a different table configuration")]
    ConfigurationMismatch,
    /// A transition would have created or destroyed chips.
    #[error("money not conserved: expected {expected} chips in play, found {found}")]
    MoneyConservationViolation { expected: Chips, found: Chips },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl TreeError {
    pub(crate) fn illegal(seat: Seat, action: Action, reason: impl Into<String>) -> Self {
        Self::IllegalAction {
            seat,
            action,
            reason: reason.into(),
        }
    }
    /// True for defects that poison the tree instance.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MoneyConservationViolation { .. })
    }
}

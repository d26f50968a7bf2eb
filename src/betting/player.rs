use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// One seat's money and status on the current street.
///
/// # Fields
///
/// - `status`: Betting, Shoving (all-in), or Folding
/// - `stack`: Chips behind (not yet committed)
/// - `stake`: Chips committed this street
/// - `spent`: Total chips committed this hand
/// - `acted`: Has acted since the last aggressive action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    status: Status,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    acted: bool,
}

impl From<Chips> for Player {
    fn from(stack: Chips) -> Self {
        Self {
            status: Status::Betting,
            stack,
            stake: 0,
            spent: 0,
            acted: false,
        }
    }
}

impl Player {
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn stake(&self) -> Chips {
        self.stake
    }
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn acted(&self) -> bool {
        self.acted
    }
    /// Stack plus this street's stake: the largest total stake reachable.
    pub fn depth(&self) -> Chips {
        self.stack + self.stake
    }
    /// Not folded.
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }
    /// Not folded and not all-in.
    pub fn is_active(&self) -> bool {
        self.status == Status::Betting
    }
}

/// Street-local mutations, only reachable through the betting state.
impl Player {
    /// Moves chips from stack to pot, going all-in when the stack runs dry.
    pub(super) fn bet(&mut self, bet: Chips) {
        debug_assert!(bet >= 0);
        debug_assert!(bet <= self.stack);
        self.stack -= bet;
        self.stake += bet;
        self.spent += bet;
        if self.stack == 0 {
            self.status = Status::Shoving;
        }
    }
    pub(super) fn fold(&mut self) {
        self.status = Status::Folding;
    }
    pub(super) fn touch(&mut self) {
        self.acted = true;
    }
    pub(super) fn reopen(&mut self) {
        self.acted = false;
    }
    pub(super) fn reset_stake(&mut self) {
        self.stake = 0;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {:>6} in {:>6}",
            self.status,
            crate::label(self.stack),
            crate::label(self.stake)
        )
    }
}

/// Player betting status within a hand. Folding and Shoving are one-way.
///
/// - `Betting`: Active and can still make decisions
/// - `Shoving`: All-in, no more decisions but still in the pot
/// - `Folding`: Out of the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Betting,
    Shoving,
    Folding,
}

impl Status {
    /// True if player is still competing for the pot.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Betting | Self::Shoving)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Betting => write!(f, "P"),
            Self::Shoving => write!(f, "S"),
            Self::Folding => write!(f, "F"),
        }
    }
}

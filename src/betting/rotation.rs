use super::player::Player;
use super::state::BettingState;
use crate::cards::Street;
use crate::seating::Seat;

/// Turn resolution.
impl BettingState {
    /// Seats still owing action this street, in the order they act.
    ///
    /// With no `last` actor the street has just started: preflop, the
    /// non-blind seats act before the blinds; postflop, action starts left
    /// of the button. Otherwise the walk starts after `last`, wraps around
    /// and stops at an aggressor whose stake already closes the round.
    /// Empty whenever the round is over.
    pub fn pending(&self, last: Option<Seat>) -> Vec<Seat> {
        if self.is_round_over() {
            return vec![];
        }
        match last {
            None => self
                .opening()
                .into_iter()
                .filter(|seat| self.owes(*seat))
                .collect(),
            Some(last) => self
                .table()
                .after(last)
                .take_while(|seat| !self.closes(*seat))
                .filter(|seat| self.owes(*seat))
                .collect(),
        }
    }
    /// The first pending seat.
    pub fn next(&self, last: Option<Seat>) -> Option<Seat> {
        self.pending(last).first().copied()
    }
    /// First-to-act order for the current street.
    fn opening(&self) -> Vec<Seat> {
        match self.street() {
            Street::Pref => self.table().preflop(),
            _ => self.table().postflop(),
        }
    }
    /// Active and either yet to act since the last raise, or short of the price.
    fn owes(&self, seat: Seat) -> bool {
        self.player(seat)
            .filter(|p| p.is_active())
            .is_some_and(|p| !p.acted() || p.stake() < self.to_call())
    }
    /// The walk has come back around to a matched aggressor.
    fn closes(&self, seat: Seat) -> bool {
        self.aggressor() == Some(seat)
            && self
                .player(seat)
                .map(Player::stake)
                .is_some_and(|stake| stake == self.to_call())
    }
}

use super::action::Action;
use super::player::Player;
use crate::B_BLIND;
use crate::Chips;
use crate::S_BLIND;
use crate::TreeError;
use crate::cards::Board;
use crate::cards::Card;
use crate::cards::Street;
use crate::seating::Seat;
use crate::seating::Table;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// The financial state of one street of betting.
///
/// Transitions are functional: [`apply`](Self::apply) and
/// [`advance`](Self::advance) return a new state and never touch `self`.
/// Every transition checks money conservation before it is returned.
///
/// # Fields
///
/// - `table`: Seat order for the hand
/// - `players`: Per-seat money and status, iterated in seating order
/// - `pot`: All chips committed this hand, including the current street
/// - `to_call`: Highest stake on this street
/// - `aggressor`: Seat whose stake set `to_call`, if any this street
/// - `raises`: Aggressive actions this street (the blinds count as one)
/// - `total`: Chips in play, fixed for the hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingState {
    table: Table,
    players: BTreeMap<Seat, Player>,
    pot: Chips,
    to_call: Chips,
    aggressor: Option<Seat>,
    street: Street,
    board: Board,
    raises: usize,
    total: Chips,
}

/// Hand entry point.
impl BettingState {
    /// Every seat starts with `stack` chips and the blinds are posted.
    pub fn new(table: Table, stack: Chips) -> Self {
        let mut state = Self {
            table,
            players: table
                .seats()
                .iter()
                .map(|seat| (*seat, Player::from(stack)))
                .collect(),
            pot: 0,
            to_call: 0,
            aggressor: None,
            street: Street::Pref,
            board: Board::default(),
            raises: 1,
            total: stack * table.n() as Chips,
        };
        state.post(table.small_blind(), S_BLIND);
        state.post(table.big_blind(), B_BLIND);
        state.to_call = state.players.values().map(Player::stake).max().unwrap_or(0);
        state
    }
    fn post(&mut self, seat: Seat, blind: Chips) {
        if let Some(player) = self.players.get_mut(&seat) {
            let chips = blind.min(player.stack());
            player.bet(chips);
            self.pot += chips;
        }
    }
}

/// Public state accessors.
impl BettingState {
    pub fn table(&self) -> Table {
        self.table
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    /// Total chips in the pot, current street included.
    pub fn pot(&self) -> Chips {
        self.pot
    }
    /// Highest stake on this street.
    pub fn to_call(&self) -> Chips {
        self.to_call
    }
    pub fn aggressor(&self) -> Option<Seat> {
        self.aggressor
    }
    pub fn raises(&self) -> usize {
        self.raises
    }
    pub fn total(&self) -> Chips {
        self.total
    }
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(&seat)
    }
    /// Players in seating order.
    pub fn players(&self) -> impl Iterator<Item = (Seat, &Player)> {
        self.players.iter().map(|(seat, player)| (*seat, player))
    }
    /// Chips the seat needs to add to match the current stake.
    pub fn owed(&self, seat: Seat) -> Chips {
        self.player(seat)
            .map(|p| (self.to_call - p.stake()).max(0))
            .unwrap_or(0)
    }
    /// Non-folded seats in seating order.
    pub fn live(&self) -> Vec<Seat> {
        self.players()
            .filter(|(_, p)| p.is_live())
            .map(|(seat, _)| seat)
            .collect()
    }
    /// Non-folded, non-all-in seats in seating order.
    pub fn active(&self) -> Vec<Seat> {
        self.players()
            .filter(|(_, p)| p.is_active())
            .map(|(seat, _)| seat)
            .collect()
    }
    /// Largest stake any two live seats can both reach.
    pub fn effective(&self) -> Chips {
        let mut depths = self
            .players()
            .filter(|(_, p)| p.is_live())
            .map(|(_, p)| p.depth())
            .collect::<Vec<_>>();
        depths.sort_unstable_by(|a, b| b.cmp(a));
        depths.get(1).or(depths.first()).copied().unwrap_or(0)
    }
    /// True if no live seat acts after this one on a postflop street.
    pub fn is_last_to_act(&self, seat: Seat) -> bool {
        self.table
            .postflop()
            .into_iter()
            .filter(|s| self.player(*s).is_some_and(Player::is_live))
            .last()
            == Some(seat)
    }
}

/// Round and hand completion predicates.
impl BettingState {
    /// Nobody owes action on this street.
    ///
    /// True when at most one seat is live, when every live seat is all-in,
    /// when the single seat able to act has nothing left to call, or when
    /// every seat able to act has acted and matched the current stake.
    pub fn is_round_over(&self) -> bool {
        if self.live().len() <= 1 {
            return true;
        }
        let active = self
            .players
            .values()
            .filter(|p| p.is_active())
            .collect::<Vec<_>>();
        match active.as_slice() {
            [] => true,
            [alone] => alone.stake() >= self.to_call,
            many => many
                .iter()
                .all(|p| p.acted() && p.stake() == self.to_call),
        }
    }
    /// No further decisions remain in the hand.
    pub fn is_complete(&self) -> bool {
        self.is_round_over() && (self.live().len() <= 1 || self.street.is_last())
    }
    /// The hand ends with live hands shown down.
    pub fn is_showdown(&self) -> bool {
        self.is_complete() && self.live().len() > 1
    }
}

/// Action validation and application.
impl BettingState {
    /// Returns the state after `seat` takes `action`.
    ///
    /// Fails with [`TreeError::IllegalAction`] if the seat cannot act or the
    /// action does not fit the state, and with
    /// [`TreeError::MoneyConservationViolation`] if the result would not
    /// balance. `self` is untouched either way.
    pub fn apply(&self, seat: Seat, action: Action) -> Result<Self, TreeError> {
        let illegal = |reason: String| TreeError::illegal(seat, action, reason);
        let player = *self
            .player(seat)
            .ok_or_else(|| illegal(format!("{} is not seated at {}", seat, self.table)))?;
        if !player.is_active() {
            return Err(illegal(format!("{} cannot act", seat)));
        }
        if self.is_round_over() {
            return Err(illegal(format!("{} betting is closed", self.street)));
        }
        let mut next = self.clone();
        match action {
            Action::Fold => next.fold(seat, player),
            Action::Check if player.stake() < self.to_call => {
                return Err(illegal(format!("facing {}", crate::label(self.to_call))));
            }
            Action::Check => next.check(seat, player),
            Action::Call if player.stake() >= self.to_call => {
                return Err(illegal(format!("nothing to call")));
            }
            Action::Call => next.call(seat, player),
            Action::Open(_) if self.street != Street::Pref => {
                return Err(illegal(format!("opens are preflop only")));
            }
            Action::Bet(_) if self.street == Street::Pref => {
                return Err(illegal(format!("bets are postflop only")));
            }
            Action::Open(_) | Action::Bet(_) if self.aggressor.is_some() => {
                return Err(illegal(format!("already opened, raise instead")));
            }
            Action::Raise(_) if self.aggressor.is_none() => {
                return Err(illegal(format!("nothing to raise")));
            }
            Action::Open(n) | Action::Bet(n) | Action::Raise(n) => {
                if n <= player.stake() {
                    return Err(illegal(format!("already in for {}", crate::label(player.stake()))));
                }
                let chips = (n - player.stake()).min(player.stack());
                if player.stake() + chips <= self.to_call && chips < player.stack() {
                    return Err(illegal(format!("must exceed {}", crate::label(self.to_call))));
                }
                next.wager(seat, player, chips);
            }
            Action::Shove(n) if (n - player.depth()).abs() > crate::AMOUNT_TOLERANCE => {
                return Err(illegal(format!("all-in is {}", crate::label(player.depth()))));
            }
            Action::Shove(_) if player.stack() == 0 => {
                return Err(illegal(format!("no chips behind")));
            }
            Action::Shove(_) => next.wager(seat, player, player.stack()),
            Action::Start | Action::Advance => {
                return Err(illegal(format!("{} is not a choice", action.kind())));
            }
        }
        next.conserve()?;
        Ok(next)
    }
}

/// Street advancement.
impl BettingState {
    /// The state at the start of the next street, or `None` on the river.
    ///
    /// Stakes and acted flags reset, the pot carries over and placeholder
    /// board slots are added for the street's new cards.
    pub fn advance(&self) -> Option<Self> {
        let street = self.street.next()?;
        let mut next = self.clone();
        next.street = street;
        next.to_call = 0;
        next.aggressor = None;
        next.raises = 0;
        for player in next.players.values_mut() {
            player.reset_stake();
            player.reopen();
        }
        next.board.reveal(street.n_revealed());
        Some(next)
    }
    /// Fills board slots starting at `from` with concrete cards.
    pub fn deal(&mut self, from: usize, cards: &[Card]) -> anyhow::Result<()> {
        self.board.deal(from, cards)
    }
}

/// Private mutation methods.
impl BettingState {
    fn fold(&mut self, seat: Seat, mut player: Player) {
        player.fold();
        player.touch();
        self.players.insert(seat, player);
    }
    fn check(&mut self, seat: Seat, mut player: Player) {
        player.touch();
        self.players.insert(seat, player);
    }
    fn call(&mut self, seat: Seat, mut player: Player) {
        let chips = (self.to_call - player.stake()).min(player.stack());
        self.pot += chips;
        player.bet(chips);
        player.touch();
        self.players.insert(seat, player);
    }
    /// Commits `chips` as a bet or raise. Only a stake above the current
    /// price reopens the action; a short all-in leaves everyone as they were.
    fn wager(&mut self, seat: Seat, mut player: Player, chips: Chips) {
        self.pot += chips;
        player.bet(chips);
        player.touch();
        if player.stake() > self.to_call {
            self.to_call = player.stake();
            self.aggressor = Some(seat);
            self.raises += 1;
            self.players
                .iter_mut()
                .filter(|(s, _)| **s != seat)
                .filter(|(_, p)| p.is_active())
                .for_each(|(_, p)| p.reopen());
        }
        self.players.insert(seat, player);
    }
    /// Checks that no chips were created or destroyed.
    fn conserve(&self) -> Result<(), TreeError> {
        let stacks = self.players.values().map(Player::stack).sum::<Chips>();
        let spent = self.players.values().map(Player::spent).sum::<Chips>();
        let broke = self.players.values().any(|p| p.stack() < 0);
        if self.pot + stacks != self.total || broke {
            log::error!("pot {} and stacks {} do not add to {}", self.pot, stacks, self.total);
            return Err(TreeError::MoneyConservationViolation {
                expected: self.total,
                found: self.pot + stacks,
            });
        }
        if self.pot != spent {
            log::error!("pot {} differs from chips committed {}", self.pot, spent);
            return Err(TreeError::MoneyConservationViolation {
                expected: spent,
                found: self.pot,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for BettingState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "{} [{}] pot {} to call {}",
            self.street,
            self.board,
            crate::label(self.pot),
            crate::label(self.to_call)
        )?;
        for (seat, player) in self.players() {
            writeln!(f, "{:<5} {}", seat, player)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betting::Status;

    fn six() -> BettingState {
        BettingState::new(Table::SixMax, 10_000)
    }

    #[test]
    fn blinds_are_posted() {
        let state = six();
        assert_eq!(state.pot(), 150);
        assert_eq!(state.to_call(), 100);
        assert_eq!(state.raises(), 1);
        assert_eq!(state.aggressor(), None);
        assert_eq!(state.player(Seat::Sb).unwrap().stake(), 50);
        assert_eq!(state.player(Seat::Bb).unwrap().stake(), 100);
        assert_eq!(state.total(), 60_000);
        assert!(!state.is_round_over());
    }

    #[test]
    fn heads_up_button_posts_small() {
        let state = BettingState::new(Table::HeadsUp, 10_000);
        assert_eq!(state.player(Seat::Btn).unwrap().stake(), 50);
        assert_eq!(state.player(Seat::Bb).unwrap().stake(), 100);
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let state = six();
        let next = state.apply(Seat::Hj, Action::Open(250)).unwrap();
        assert_eq!(state, six());
        assert_eq!(next.to_call(), 250);
        assert_eq!(next.aggressor(), Some(Seat::Hj));
        assert_eq!(next.raises(), 2);
        assert_eq!(next.pot(), 400);
    }

    #[test]
    fn check_facing_bet_is_illegal() {
        let state = six();
        let err = state.apply(Seat::Hj, Action::Check).unwrap_err();
        assert!(matches!(err, TreeError::IllegalAction { seat: Seat::Hj, .. }));
    }

    #[test]
    fn raise_reopens_action() {
        let state = six()
            .apply(Seat::Hj, Action::Open(250))
            .unwrap()
            .apply(Seat::Lj, Action::Call)
            .unwrap()
            .apply(Seat::Co, Action::Raise(800))
            .unwrap();
        assert!(!state.player(Seat::Lj).unwrap().acted());
        assert!(!state.player(Seat::Hj).unwrap().acted());
        assert!(state.player(Seat::Co).unwrap().acted());
        assert_eq!(state.raises(), 3);
    }

    #[test]
    fn sizing_must_exceed_price() {
        let state = six().apply(Seat::Hj, Action::Open(250)).unwrap();
        assert!(state.apply(Seat::Lj, Action::Raise(250)).is_err());
        assert!(state.apply(Seat::Lj, Action::Open(600)).is_err());
        assert!(state.apply(Seat::Lj, Action::Bet(600)).is_err());
    }

    #[test]
    fn oversized_bet_is_clamped_to_stack() {
        let state = six().apply(Seat::Hj, Action::Open(20_000)).unwrap();
        let hj = state.player(Seat::Hj).unwrap();
        assert_eq!(hj.stack(), 0);
        assert_eq!(hj.status(), Status::Shoving);
        assert_eq!(state.to_call(), 10_000);
    }

    #[test]
    fn calling_shove_keeps_aggressor() {
        let state = BettingState::new(Table::HeadsUp, 10_000)
            .apply(Seat::Btn, Action::Call)
            .unwrap()
            .apply(Seat::Bb, Action::Check)
            .unwrap()
            .advance()
            .unwrap()
            .apply(Seat::Bb, Action::Bet(9_900))
            .unwrap();
        assert_eq!(state.player(Seat::Btn).unwrap().depth(), 9_900);
        let next = state.apply(Seat::Btn, Action::Shove(9_900)).unwrap();
        assert_eq!(next.aggressor(), Some(Seat::Bb));
        assert_eq!(next.raises(), 1);
        assert!(next.is_round_over());
    }

    #[test]
    fn shove_amount_must_match_stack() {
        let state = six();
        assert!(state.apply(Seat::Hj, Action::Shove(5_000)).is_err());
        assert!(state.apply(Seat::Hj, Action::Shove(10_000)).is_ok());
    }

    #[test]
    fn unbalanced_result_is_never_returned() {
        let mut state = six();
        state.pot += 1;
        let before = state.clone();
        let err = state.apply(Seat::Hj, Action::Fold).unwrap_err();
        assert_eq!(
            err,
            TreeError::MoneyConservationViolation {
                expected: 60_000,
                found: 60_001,
            }
        );
        assert!(err.is_fatal());
        assert_eq!(state, before);
    }

    #[test]
    fn markers_are_not_choices() {
        assert!(six().apply(Seat::Hj, Action::Start).is_err());
        assert!(six().apply(Seat::Hj, Action::Advance).is_err());
        assert!(six().apply(Seat::Utg, Action::Fold).is_err());
    }

    #[test]
    fn folded_seat_cannot_act() {
        let state = six().apply(Seat::Hj, Action::Fold).unwrap();
        assert!(state.apply(Seat::Hj, Action::Call).is_err());
    }

    #[test]
    fn big_blind_keeps_option() {
        let state = six()
            .apply(Seat::Hj, Action::Fold)
            .unwrap()
            .apply(Seat::Lj, Action::Fold)
            .unwrap()
            .apply(Seat::Co, Action::Fold)
            .unwrap()
            .apply(Seat::Btn, Action::Call)
            .unwrap()
            .apply(Seat::Sb, Action::Call)
            .unwrap();
        assert!(!state.is_round_over());
        let state = state.apply(Seat::Bb, Action::Check).unwrap();
        assert!(state.is_round_over());
        assert!(!state.is_complete());
        assert_eq!(state.pot(), 300);
    }

    #[test]
    fn everyone_folds_to_big_blind() {
        let mut state = six();
        for seat in [Seat::Hj, Seat::Lj, Seat::Co, Seat::Btn, Seat::Sb] {
            state = state.apply(seat, Action::Fold).unwrap();
        }
        assert!(state.is_round_over());
        assert!(state.is_complete());
        assert!(!state.is_showdown());
        assert!(state.apply(Seat::Bb, Action::Check).is_err());
    }

    #[test]
    fn advance_resets_street() {
        let state = BettingState::new(Table::HeadsUp, 10_000)
            .apply(Seat::Btn, Action::Open(300))
            .unwrap()
            .apply(Seat::Bb, Action::Call)
            .unwrap();
        let flop = state.advance().unwrap();
        assert_eq!(flop.street(), Street::Flop);
        assert_eq!(flop.pot(), 600);
        assert_eq!(flop.to_call(), 0);
        assert_eq!(flop.aggressor(), None);
        assert_eq!(flop.board().len(), 3);
        assert!(flop.players().all(|(_, p)| p.stake() == 0 && !p.acted()));
        assert_eq!(flop.player(Seat::Btn).unwrap().spent(), 300);
    }

    #[test]
    fn river_does_not_advance() {
        let mut state = BettingState::new(Table::HeadsUp, 10_000)
            .apply(Seat::Btn, Action::Shove(10_000))
            .unwrap()
            .apply(Seat::Bb, Action::Call)
            .unwrap();
        for _ in 0..3 {
            assert!(state.is_round_over());
            state = state.advance().unwrap();
        }
        assert_eq!(state.street(), Street::Rive);
        assert_eq!(state.board().len(), 5);
        assert!(state.is_showdown());
        assert!(state.advance().is_none());
    }

    #[test]
    fn effective_is_second_deepest() {
        let state = six()
            .apply(Seat::Hj, Action::Fold)
            .unwrap()
            .apply(Seat::Lj, Action::Open(300))
            .unwrap();
        assert_eq!(state.effective(), 10_000);
    }

    #[test]
    fn last_to_act_is_in_position() {
        let state = six();
        assert!(state.is_last_to_act(Seat::Btn));
        let state = state
            .apply(Seat::Hj, Action::Fold)
            .unwrap()
            .apply(Seat::Lj, Action::Fold)
            .unwrap()
            .apply(Seat::Co, Action::Fold)
            .unwrap()
            .apply(Seat::Btn, Action::Fold)
            .unwrap();
        assert!(state.is_last_to_act(Seat::Bb));
        assert!(!state.is_last_to_act(Seat::Sb));
    }
}

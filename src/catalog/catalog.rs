use super::choice::Choice;
use crate::AMOUNT_TOLERANCE;
use crate::B_BLIND;
use crate::Chips;
use crate::TreeError;
use crate::Utility;
use crate::betting::Action;
use crate::betting::BettingState;
use crate::betting::Player;
use crate::cards::Street;
use crate::config::Config;
use crate::seating::Seat;

/// Legal, labelled actions at one decision point.
///
/// Choices are ordered fold, check, call, sizes ascending, all-in. Sizes come
/// from the configuration: opens in big blinds preflop, bets as a share of
/// the pot postflop, raises as a multiple of the price. The all-in is always
/// offered while the seat has chips behind; sizes that would use the whole
/// stack are left to it.
pub struct Catalog<'a> {
    config: &'a Config,
    state: &'a BettingState,
}

impl<'a> Catalog<'a> {
    pub fn new(config: &'a Config, state: &'a BettingState) -> Self {
        Self { config, state }
    }

    /// Every legal choice for `seat`. Empty if the seat cannot act.
    pub fn legal(&self, seat: Seat) -> Vec<Choice> {
        let Some(player) = self.actor(seat) else {
            return vec![];
        };
        let owed = self.state.owed(seat);
        let mut choices = Vec::new();
        if owed > 0 {
            choices.push(Choice::from(Action::Fold));
            choices.push(self.call(player));
        } else {
            choices.push(Choice::from(Action::Check));
        }
        choices.extend(self.sizes(seat, player).into_iter().map(Choice::from));
        if player.stack() > 0 {
            choices.push(Choice::from(Action::Shove(player.depth())));
        }
        choices
    }

    /// Checks a requested action against the choices at this point.
    ///
    /// Sizing actions need not match an offered size: any amount above the
    /// price and within the seat's stack is accepted, provided the kind of
    /// sizing fits the street.
    pub fn allows(&self, seat: Seat, action: Action) -> Result<(), TreeError> {
        let illegal = |reason: String| Err(TreeError::illegal(seat, action, reason));
        let Some(player) = self.actor(seat) else {
            return illegal(format!("{} has no decision", seat));
        };
        match action {
            Action::Open(n) | Action::Bet(n) | Action::Raise(n) => {
                if action != self.sizing()(n) {
                    return illegal(format!("{} is not available", action.kind()));
                }
                if n <= self.state.to_call() {
                    return illegal(format!("must exceed {}", crate::label(self.state.to_call())));
                }
                if n > player.depth() {
                    return illegal(format!("exceeds stack of {}", crate::label(player.depth())));
                }
                Ok(())
            }
            action => match self.legal(seat).iter().any(|c| c.action().is_like(&action)) {
                true => Ok(()),
                false => illegal(format!("{} is not available", action.kind())),
            },
        }
    }

    /// The default for a skipped seat: check if free, fold otherwise.
    pub fn passive(&self, seat: Seat) -> Option<Action> {
        self.actor(seat).map(|_| match self.state.owed(seat) {
            0 => Action::Check,
            _ => Action::Fold,
        })
    }
}

/// Size generation.
impl Catalog<'_> {
    fn actor(&self, seat: Seat) -> Option<&Player> {
        self.state
            .player(seat)
            .filter(|p| p.is_active())
            .filter(|_| !self.state.is_round_over())
    }
    fn is_unopened(&self) -> bool {
        self.state.street() == Street::Pref && self.state.aggressor().is_none()
    }
    /// The sizing kind the street allows.
    fn sizing(&self) -> fn(Chips) -> Action {
        match (self.state.street(), self.state.aggressor()) {
            (Street::Pref, None) => Action::Open,
            (_, None) => Action::Bet,
            (_, Some(_)) => Action::Raise,
        }
    }
    fn call(&self, player: &Player) -> Choice {
        let to_call = self.state.to_call();
        let label = if player.depth() <= to_call {
            format!("Call {}", crate::label(player.depth()))
        } else if self.is_unopened() && to_call == B_BLIND {
            format!("Limp")
        } else {
            format!("Call {}", crate::label(to_call))
        };
        Choice::from((Action::Call, label))
    }
    /// Candidate totals, filtered, merged and sorted ascending.
    fn sizes(&self, seat: Seat, player: &Player) -> Vec<Action> {
        let to_call = self.state.to_call();
        let mut amounts = self
            .candidates(seat)
            .into_iter()
            .filter(|n| *n > to_call)
            .filter(|n| *n < player.depth())
            .filter(|n| !self.is_jam(*n, player))
            .collect::<Vec<Chips>>();
        amounts.sort_unstable();
        amounts.dedup_by(|b, a| (*b - *a).abs() <= AMOUNT_TOLERANCE);
        self.merge(amounts)
            .into_iter()
            .map(self.sizing())
            .collect()
    }
    fn candidates(&self, seat: Seat) -> Vec<Chips> {
        let state = self.state;
        let to_call = state.to_call() as Utility;
        match (state.street(), state.aggressor()) {
            (Street::Pref, None) => self
                .config
                .preflop
                .opens(seat)
                .iter()
                .copied()
                .chain(crate::ALTERNATE_OPENS)
                .map(crate::chips)
                .collect(),
            (Street::Pref, aggressor) => self
                .config
                .preflop
                .multipliers(seat, aggressor, state.raises())
                .iter()
                .copied()
                .chain(std::iter::once(crate::ALTERNATE_RAISE))
                .map(|x| (x * to_call).round() as Chips)
                .collect(),
            (street, aggressor) => {
                let Some(sizing) = self.config.postflop(street) else {
                    return vec![];
                };
                let in_position = state.is_last_to_act(seat);
                match aggressor {
                    None => sizing
                        .sizes(in_position)
                        .iter()
                        .map(|pct| (state.pot() as Utility * pct / 100.0).round() as Chips)
                        .collect(),
                    Some(_) => sizing
                        .raises(in_position)
                        .iter()
                        .copied()
                        .chain(std::iter::once(crate::ALTERNATE_RAISE))
                        .map(|x| (x * to_call).round() as Chips)
                        .collect(),
                }
            }
        }
    }
    /// Drops sizes within the merging threshold of the previous kept size.
    fn merge(&self, amounts: Vec<Chips>) -> Vec<Chips> {
        let Some(threshold) = self.config.merging else {
            return amounts;
        };
        let mut kept = Vec::<Chips>::with_capacity(amounts.len());
        for n in amounts {
            match kept.last() {
                Some(&last) if (n - last) as Utility * 100.0 / last as Utility <= threshold => {
                    log::trace!("merging {} into {}", crate::label(n), crate::label(last));
                }
                _ => kept.push(n),
            }
        }
        kept
    }
    /// A size leaving a stack-to-pot ratio at or below the jamming threshold
    /// once called is replaced by the all-in.
    fn is_jam(&self, n: Chips, player: &Player) -> bool {
        let Some(threshold) = self.config.jamming else {
            return false;
        };
        let behind = (self.state.effective().min(player.depth()) - n).max(0);
        let pot = self.state.pot() + (n - player.stake()) + (n - self.state.to_call());
        (behind as Utility / pot as Utility) <= threshold
    }
}

use crate::Utility;
use crate::seating::Seat;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Preflop sizes: opens in big blinds, then multipliers of the price for
/// facing an open, a 3-bet, and a 4-bet or later.
///
/// Multipliers resolve from the most specific entry that sets them:
///
/// 1. the acting seat's override, against this aggressor
/// 2. the acting seat's override
/// 3. the table-wide entry against this aggressor
/// 4. the table-wide list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preflop {
    pub open: Vec<Utility>,
    pub three_bet: Vec<Utility>,
    pub four_bet: Vec<Utility>,
    pub five_bet: Vec<Utility>,
    /// Multipliers against a particular aggressor.
    pub vs: BTreeMap<Seat, Facing>,
    pub overrides: BTreeMap<Seat, Override>,
}

impl Default for Preflop {
    fn default() -> Self {
        Self {
            open: vec![2.5],
            three_bet: vec![3.5],
            four_bet: vec![2.5],
            five_bet: vec![2.2],
            vs: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }
}

impl Preflop {
    /// Open sizes for this seat, in big blinds.
    pub fn opens(&self, seat: Seat) -> &[Utility] {
        self.overrides
            .get(&seat)
            .and_then(|o| o.open.as_deref())
            .unwrap_or(self.open.as_slice())
    }
    /// Raise multipliers for `seat` facing `aggressor`, given the number of
    /// aggressive actions already made (the blinds count as one).
    pub fn multipliers(&self, seat: Seat, aggressor: Option<Seat>, raises: usize) -> &[Utility] {
        let seat = self.overrides.get(&seat);
        [
            seat.and_then(|o| against(&o.vs, aggressor)),
            seat.map(|o| &o.facing),
            against(&self.vs, aggressor),
        ]
        .into_iter()
        .flatten()
        .find_map(|facing| facing.get(raises))
        .unwrap_or_else(|| match raises {
            0..=2 => self.three_bet.as_slice(),
            3 => self.four_bet.as_slice(),
            _ => self.five_bet.as_slice(),
        })
    }
    /// Every configured preflop size, overrides included.
    pub fn values(&self) -> impl Iterator<Item = Utility> + '_ {
        self.open
            .iter()
            .chain(self.three_bet.iter())
            .chain(self.four_bet.iter())
            .chain(self.five_bet.iter())
            .copied()
            .chain(self.vs.values().flat_map(Facing::values))
            .chain(self.overrides.values().flat_map(Override::values))
    }
}

fn against(vs: &BTreeMap<Seat, Facing>, aggressor: Option<Seat>) -> Option<&Facing> {
    aggressor.and_then(|seat| vs.get(&seat))
}

/// Replacement multiplier lists for facing an open, a 3-bet, and a 4-bet
/// or later. Unset lists fall through to the next entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_bet: Option<Vec<Utility>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub four_bet: Option<Vec<Utility>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub five_bet: Option<Vec<Utility>>,
}

impl Facing {
    fn get(&self, raises: usize) -> Option<&[Utility]> {
        match raises {
            0..=2 => self.three_bet.as_deref(),
            3 => self.four_bet.as_deref(),
            _ => self.five_bet.as_deref(),
        }
    }
    pub fn values(&self) -> impl Iterator<Item = Utility> + '_ {
        [&self.three_bet, &self.four_bet, &self.five_bet]
            .into_iter()
            .flatten()
            .flatten()
            .copied()
    }
}

/// Per-seat replacements for any of the preflop sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Override {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Vec<Utility>>,
    #[serde(flatten)]
    pub facing: Facing,
    /// This seat's multipliers against a particular aggressor.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vs: BTreeMap<Seat, Facing>,
}

impl Override {
    pub fn values(&self) -> impl Iterator<Item = Utility> + '_ {
        self.open
            .iter()
            .flatten()
            .copied()
            .chain(self.facing.values())
            .chain(self.vs.values().flat_map(Facing::values))
    }
}

/// Sizes for one postflop street, for the seat out of position and in
/// position: bets as percentages of the pot, raises as multiples of the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Postflop {
    pub oop: Vec<Utility>,
    pub ip: Vec<Utility>,
    #[serde(default = "Postflop::default_raise")]
    pub oop_raise: Vec<Utility>,
    #[serde(default = "Postflop::default_raise")]
    pub ip_raise: Vec<Utility>,
}

impl Postflop {
    /// Same sizes in and out of position.
    pub fn new(sizes: &[Utility]) -> Self {
        Self {
            oop: sizes.to_vec(),
            ip: sizes.to_vec(),
            oop_raise: Self::default_raise(),
            ip_raise: Self::default_raise(),
        }
    }
    fn default_raise() -> Vec<Utility> {
        vec![3.0]
    }
    pub fn sizes(&self, in_position: bool) -> &[Utility] {
        match in_position {
            true => &self.ip,
            false => &self.oop,
        }
    }
    pub fn raises(&self, in_position: bool) -> &[Utility] {
        match in_position {
            true => &self.ip_raise,
            false => &self.oop_raise,
        }
    }
}

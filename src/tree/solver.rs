use super::path::Path;
use super::tree::Tree;
use crate::Chips;
use crate::cards::Board;
use crate::config::Config;
use crate::range::Range;
use crate::seating::Seat;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything an external solver needs to pick up the hand at the tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub config: Config,
    pub path: Path,
    pub board: Board,
    pub pot: Chips,
    /// Chips behind for every live seat.
    pub stacks: BTreeMap<Seat, Chips>,
    /// The latest range on the path for every live seat that has one.
    pub ranges: BTreeMap<Seat, Range>,
}

/// A solver's answer. Stored as-is and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution(serde_json::Value);

impl Solution {
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Solution {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The boundary to an external solving service.
pub trait Solver {
    fn solve(&self, request: &Request) -> anyhow::Result<Solution>;
}

/// Solver hand-off.
impl Tree {
    /// The hand as it stands at the tip.
    pub fn request(&self) -> Request {
        let tip = self.node(self.tip());
        let state = tip.after();
        let live = state.live();
        let stacks = state
            .players()
            .filter(|(seat, _)| live.contains(seat))
            .map(|(seat, player)| (seat, player.stack()))
            .collect::<BTreeMap<_, _>>();
        let mut ranges = BTreeMap::new();
        for index in self.timeline() {
            for (seat, range) in self.node(index).ranges() {
                if live.contains(seat) {
                    ranges.insert(*seat, range.clone());
                }
            }
        }
        Request {
            config: self.config().clone(),
            path: tip.path().clone(),
            board: state.board().clone(),
            pot: state.pot(),
            stacks,
            ranges,
        }
    }
    /// Sends the tip to `solver` and stores its answer on the tip.
    pub fn solve(&mut self, solver: &dyn Solver) -> anyhow::Result<()> {
        self.healthy()?;
        let request = self.request();
        log::info!("solving {}", request.path);
        let solution = solver.solve(&request)?;
        let tip = self.tip();
        self.node_mut(tip).set_solution(Some(solution));
        Ok(())
    }
}

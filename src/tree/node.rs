use super::path::Path;
use super::solver::Solution;
use super::step::Step;
use crate::betting::Action;
use crate::betting::BettingState;
use crate::catalog::Choice;
use crate::range::Range;
use crate::seating::Seat;
use std::collections::BTreeMap;

/// One decision point: the action taken, the state it was taken in, and the
/// strategy tables attached to it.
///
/// `before` is the state inherited from the parent. `after` is the state the
/// action produces, which is what the children act into. Start and street
/// advance nodes take no action, so their two states are equal.
#[derive(Debug, Clone)]
pub struct Node {
    step: Step,
    path: Path,
    before: BettingState,
    after: BettingState,
    choices: Vec<Choice>,
    ranges: BTreeMap<Seat, Range>,
    solution: Option<Solution>,
}

impl Node {
    pub(super) fn new(
        path: Path,
        step: Step,
        before: BettingState,
        after: BettingState,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            step,
            path,
            before,
            after,
            choices,
            ranges: BTreeMap::new(),
            solution: None,
        }
    }
    pub fn step(&self) -> Step {
        self.step
    }
    /// The acting seat, inherited from the parent for street advances.
    pub fn seat(&self) -> Seat {
        self.step.seat
    }
    pub fn action(&self) -> Action {
        self.step.action
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// Deterministic id derived from the path.
    pub fn id(&self) -> String {
        self.path.to_string()
    }
    pub fn depth(&self) -> usize {
        self.path.len()
    }
    pub fn before(&self) -> &BettingState {
        &self.before
    }
    pub fn after(&self) -> &BettingState {
        &self.after
    }
    /// Choices the actor had at this point.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }
    pub fn ranges(&self) -> &BTreeMap<Seat, Range> {
        &self.ranges
    }
    pub fn range(&self, seat: Seat) -> Option<&Range> {
        self.ranges.get(&seat)
    }
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
    pub fn is_advance(&self) -> bool {
        self.step.action == Action::Advance
    }
    /// The last actor to resolve turn order against: none at the start of
    /// a street.
    pub fn last(&self) -> Option<Seat> {
        match self.step.action.is_marker() {
            true => None,
            false => Some(self.step.seat),
        }
    }
    /// Seats owing action once this node's action is taken.
    pub fn pending(&self) -> Vec<Seat> {
        self.after.pending(self.last())
    }
}

/// Mutation, only through the tree.
impl Node {
    pub(super) fn range_mut(&mut self, seat: Seat) -> &mut Range {
        self.ranges.entry(seat).or_default()
    }
    pub(super) fn set_ranges(&mut self, ranges: BTreeMap<Seat, Range>) {
        self.ranges = ranges;
    }
    pub(super) fn set_solution(&mut self, solution: Option<Solution>) {
        self.solution = solution;
    }
    pub(super) fn states_mut(&mut self) -> [&mut BettingState; 2] {
        [&mut self.before, &mut self.after]
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.step.action {
            Action::Start => write!(f, "{} to act", self.step.seat),
            Action::Advance => write!(
                f,
                "{} [{}] pot {}",
                self.after.street(),
                self.after.board(),
                crate::label(self.after.pot())
            ),
            action => write!(f, "{} {}", self.step.seat, action),
        }
    }
}

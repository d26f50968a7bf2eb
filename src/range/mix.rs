use crate::Probability;
use crate::TreeError;
use crate::betting::Action;
use serde::Deserialize;
use serde::Serialize;

/// Tolerance on a mix summing to one.
const EPSILON: Probability = 1e-3;

/// How often a hand class raises, calls or folds. Always sums to one.
///
/// Checks count as calls and every aggressive action as a raise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[Probability; 3]", into = "[Probability; 3]")]
pub struct Mix {
    raise: Probability,
    call: Probability,
    fold: Probability,
}

impl Mix {
    pub const RAISE: Self = Self::unchecked(1.0, 0.0, 0.0);
    pub const CALL: Self = Self::unchecked(0.0, 1.0, 0.0);
    pub const FOLD: Self = Self::unchecked(0.0, 0.0, 1.0);

    const fn unchecked(raise: Probability, call: Probability, fold: Probability) -> Self {
        Self { raise, call, fold }
    }
    pub fn new(raise: Probability, call: Probability, fold: Probability) -> Result<Self, TreeError> {
        let parts = [raise, call, fold];
        if parts.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(TreeError::InvalidRange(format!(
                "frequencies {:?} must lie in [0, 1]",
                parts
            )));
        }
        if (parts.iter().sum::<Probability>() - 1.0).abs() > EPSILON {
            return Err(TreeError::InvalidRange(format!(
                "frequencies {:?} must sum to 1",
                parts
            )));
        }
        Ok(Self::unchecked(raise, call, fold))
    }
    /// The pure strategy of always taking this action.
    pub fn pure(action: Action) -> Self {
        match action {
            Action::Fold => Self::FOLD,
            a if a.is_aggro() => Self::RAISE,
            _ => Self::CALL,
        }
    }
    pub fn raise(&self) -> Probability {
        self.raise
    }
    pub fn call(&self) -> Probability {
        self.call
    }
    pub fn fold(&self) -> Probability {
        self.fold
    }
}

impl TryFrom<[Probability; 3]> for Mix {
    type Error = TreeError;
    fn try_from([raise, call, fold]: [Probability; 3]) -> Result<Self, Self::Error> {
        Self::new(raise, call, fold)
    }
}
impl From<Mix> for [Probability; 3] {
    fn from(mix: Mix) -> Self {
        [mix.raise, mix.call, mix.fold]
    }
}

impl std::fmt::Display for Mix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "R{:.0}% C{:.0}% F{:.0}%",
            self.raise * 100.0,
            self.call * 100.0,
            self.fold * 100.0
        )
    }
}

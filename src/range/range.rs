use super::combo::Combo;
use super::combo::N_COMBOS;
use super::mix::Mix;
use crate::Probability;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A strategy table: the mix each hand class plays at one decision.
///
/// Classes without an entry are not in the range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Range(BTreeMap<Combo, Mix>);

impl Range {
    pub fn set(&mut self, combo: Combo, mix: Mix) -> Option<Mix> {
        self.0.insert(combo, mix)
    }
    pub fn get(&self, combo: &Combo) -> Option<&Mix> {
        self.0.get(combo)
    }
    pub fn remove(&mut self, combo: &Combo) -> Option<Mix> {
        self.0.remove(combo)
    }
    pub fn clear(&mut self) {
        self.0.clear()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Combo, &Mix)> {
        self.0.iter()
    }
    /// Share of all 1326 combinations taking each action.
    pub fn summary(&self) -> Summary {
        let weight = |f: fn(&Mix) -> Probability| {
            self.0
                .iter()
                .map(|(combo, mix)| f(mix) * combo.combos() as Probability)
                .sum::<Probability>()
                * 100.0
                / N_COMBOS as Probability
        };
        Summary {
            raise: weight(Mix::raise),
            call: weight(Mix::call),
            fold: weight(Mix::fold),
            active: weight(|_| 1.0),
        }
    }
}

impl FromIterator<(Combo, Mix)> for Range {
    fn from_iter<I: IntoIterator<Item = (Combo, Mix)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Percentages of all starting combinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub raise: Probability,
    pub call: Probability,
    pub fold: Probability,
    /// Combinations with any entry.
    pub active: Probability,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "raise {:.1}% call {:.1}% fold {:.1}% of {:.1}%",
            self.raise, self.call, self.fold, self.active
        )
    }
}

use crate::cards::Rank;
use serde::Deserialize;
use serde::Serialize;

/// Specific two-card combinations in a deck.
pub const N_COMBOS: usize = 1326;

/// One of the 169 starting-hand classes: a pair, or two ranks suited or offsuit.
///
/// Written with the higher rank first: `AA`, `AKs`, `T9o`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Combo {
    high: Rank,
    low: Rank,
    suited: bool,
}

impl Combo {
    pub fn pair(rank: Rank) -> Self {
        Self {
            high: rank,
            low: rank,
            suited: false,
        }
    }
    /// Two distinct ranks in either order.
    pub fn unpaired(a: Rank, b: Rank, suited: bool) -> anyhow::Result<Self> {
        if a == b {
            anyhow::bail!("{}{} is a pair", a, b);
        }
        Ok(Self {
            high: a.max(b),
            low: a.min(b),
            suited,
        })
    }
    /// All 169 classes in grid order: row by the first rank, column by the
    /// second, suited above the diagonal.
    pub fn all() -> Vec<Self> {
        let ranks = Rank::descending();
        ranks
            .iter()
            .flat_map(|row| ranks.iter().map(move |col| (*row, *col)))
            .map(|(row, col)| match row.cmp(&col) {
                std::cmp::Ordering::Equal => Self::pair(row),
                std::cmp::Ordering::Greater => Self {
                    high: row,
                    low: col,
                    suited: true,
                },
                std::cmp::Ordering::Less => Self {
                    high: col,
                    low: row,
                    suited: false,
                },
            })
            .collect()
    }
    pub fn high(&self) -> Rank {
        self.high
    }
    pub fn low(&self) -> Rank {
        self.low
    }
    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }
    pub fn is_suited(&self) -> bool {
        self.suited
    }
    /// Specific combinations in this class.
    pub fn combos(&self) -> usize {
        match (self.is_pair(), self.suited) {
            (true, _) => 6,
            (false, true) => 4,
            (false, false) => 12,
        }
    }
}

impl TryFrom<&str> for Combo {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let chars = s.trim().chars().collect::<Vec<_>>();
        match chars.as_slice() {
            [a, b] => {
                let (a, b) = (Rank::try_from(*a)?, Rank::try_from(*b)?);
                match a == b {
                    true => Ok(Self::pair(a)),
                    false => Err(anyhow::anyhow!("{} needs s or o", s)),
                }
            }
            [a, b, kind] => {
                let (a, b) = (Rank::try_from(*a)?, Rank::try_from(*b)?);
                match kind.to_ascii_lowercase() {
                    's' => Self::unpaired(a, b, true),
                    'o' => Self::unpaired(a, b, false),
                    _ => Err(anyhow::anyhow!("invalid hand class {}", s)),
                }
            }
            _ => Err(anyhow::anyhow!("invalid hand class {}", s)),
        }
    }
}
impl TryFrom<String> for Combo {
    type Error = anyhow::Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Combo> for String {
    fn from(combo: Combo) -> Self {
        combo.to_string()
    }
}

impl std::fmt::Display for Combo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.is_pair(), self.suited) {
            (true, _) => write!(f, "{}{}", self.high, self.low),
            (false, true) => write!(f, "{}{}s", self.high, self.low),
            (false, false) => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_cover_every_combination() {
        let all = Combo::all();
        assert_eq!(all.len(), 169);
        assert_eq!(all.iter().map(Combo::combos).sum::<usize>(), N_COMBOS);
        assert_eq!(all[0].to_string(), "AA");
        assert_eq!(all[1].to_string(), "AKs");
        assert_eq!(all[13].to_string(), "AKo");
        assert_eq!(all[168].to_string(), "22");
    }

    #[test]
    fn parse_classes() {
        assert_eq!(Combo::try_from("AKs").unwrap().combos(), 4);
        assert_eq!(Combo::try_from("KAo").unwrap().to_string(), "AKo");
        assert_eq!(Combo::try_from("tt").unwrap().to_string(), "TT");
        assert!(Combo::try_from("AK").is_err());
        assert!(Combo::try_from("AAs").is_err());
        assert!(Combo::try_from("AKx").is_err());
        assert!(Combo::try_from("A").is_err());
    }
}

use super::card::Card;
use serde::Deserialize;
use serde::Serialize;

/// One board position: a concrete card, or a placeholder until one is chosen.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Slot {
    #[default]
    Wild,
    Card(Card),
}

impl Slot {
    pub fn card(&self) -> Option<Card> {
        match self {
            Self::Wild => None,
            Self::Card(card) => Some(*card),
        }
    }
}

impl TryFrom<&str> for Slot {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "?" | "*" | "" => Ok(Self::Wild),
            s => Ok(Self::Card(Card::try_from(s)?)),
        }
    }
}
impl TryFrom<String> for Slot {
    type Error = anyhow::Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wild => write!(f, "?"),
            Self::Card(card) => write!(f, "{}", card),
        }
    }
}

/// Community cards, 0, 3, 4 or 5 slots.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(Vec<Slot>);

impl Board {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn slots(&self) -> &[Slot] {
        &self.0
    }
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.0.iter().filter_map(Slot::card)
    }
    pub fn is_known(&self) -> bool {
        self.0.iter().all(|s| s.card().is_some())
    }
    /// Appends `n` placeholder slots.
    pub fn reveal(&mut self, n: usize) {
        self.0.extend(std::iter::repeat_n(Slot::Wild, n));
    }
    /// Overwrites the slots starting at `from`. Fails if the slots do not
    /// exist or a card would appear twice on the board.
    pub fn deal(&mut self, from: usize, cards: &[Card]) -> anyhow::Result<()> {
        if from + cards.len() > self.len() {
            anyhow::bail!("board has {} slots, cannot deal {} at {}", self.len(), cards.len(), from);
        }
        let mut next = self.0.clone();
        next.splice(from..from + cards.len(), cards.iter().copied().map(Slot::Card));
        let mut seen = next.iter().filter_map(Slot::card).collect::<Vec<_>>();
        seen.sort();
        if let Some(pair) = seen.windows(2).find(|w| w[0] == w[1]) {
            anyhow::bail!("duplicate board card {}", pair[0]);
        }
        self.0 = next;
        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", slot)?;
        }
        Ok(())
    }
}

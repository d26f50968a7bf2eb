use serde::Deserialize;
use serde::Serialize;

/// Named position at the table.
///
/// Variant order is seating order: every supported table lists its seats in
/// ascending `Seat` order, with the button followed by the blinds. This lets
/// ordered maps keyed by `Seat` iterate in seating order for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    #[serde(rename = "UTG")]
    Utg,
    #[serde(rename = "UTG+1")]
    Utg1,
    #[serde(rename = "MP")]
    Mp,
    #[serde(rename = "HJ")]
    Hj,
    #[serde(rename = "LJ")]
    Lj,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "BTN")]
    Btn,
    #[serde(rename = "SB")]
    Sb,
    #[serde(rename = "BB")]
    Bb,
}

impl Seat {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Utg,
            Self::Utg1,
            Self::Mp,
            Self::Hj,
            Self::Lj,
            Self::Co,
            Self::Btn,
            Self::Sb,
            Self::Bb,
        ]
    }
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Utg => "UTG",
            Self::Utg1 => "UTG+1",
            Self::Mp => "MP",
            Self::Hj => "HJ",
            Self::Lj => "LJ",
            Self::Co => "CO",
            Self::Btn => "BTN",
            Self::Sb => "SB",
            Self::Bb => "BB",
        }
    }
}

impl TryFrom<&str> for Seat {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .find(|seat| seat.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown seat {}", s))
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

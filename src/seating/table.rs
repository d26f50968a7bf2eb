use super::seat::Seat;
use serde::Deserialize;
use serde::Serialize;

/// Table size, which fixes the seat order for the whole hand.
///
/// - Heads-up: BTN (posts the small blind), BB
/// - 6-max: HJ, LJ, CO, BTN, SB, BB
/// - 9-max: UTG, UTG+1, MP, HJ, LJ, CO, BTN, SB, BB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Table {
    #[serde(rename = "HU")]
    HeadsUp,
    #[default]
    #[serde(rename = "6max")]
    SixMax,
    #[serde(rename = "9max")]
    NineMax,
}

impl Table {
    /// Seats in seating order.
    pub const fn seats(&self) -> &'static [Seat] {
        match self {
            Self::HeadsUp => &[Seat::Btn, Seat::Bb],
            Self::SixMax => &[Seat::Hj, Seat::Lj, Seat::Co, Seat::Btn, Seat::Sb, Seat::Bb],
            Self::NineMax => &[
                Seat::Utg,
                Seat::Utg1,
                Seat::Mp,
                Seat::Hj,
                Seat::Lj,
                Seat::Co,
                Seat::Btn,
                Seat::Sb,
                Seat::Bb,
            ],
        }
    }
    pub fn n(&self) -> usize {
        self.seats().len()
    }
    pub fn contains(&self, seat: Seat) -> bool {
        self.seats().contains(&seat)
    }
    pub const fn button(&self) -> Seat {
        Seat::Btn
    }
    pub const fn small_blind(&self) -> Seat {
        match self {
            Self::HeadsUp => Seat::Btn,
            _ => Seat::Sb,
        }
    }
    pub const fn big_blind(&self) -> Seat {
        Seat::Bb
    }
    pub fn is_blind(&self, seat: Seat) -> bool {
        seat == self.small_blind() || seat == self.big_blind()
    }
    fn index(&self, seat: Seat) -> Option<usize> {
        self.seats().iter().position(|s| *s == seat)
    }
    /// Every seat once, walking clockwise from the seat after `seat`
    /// and ending on `seat` itself.
    pub fn after(&self, seat: Seat) -> impl Iterator<Item = Seat> + '_ {
        let n = self.n();
        let start = self.index(seat).map(|i| i + 1).unwrap_or(0);
        (0..n).map(move |i| self.seats()[(start + i) % n])
    }
    /// Non-blind seats in seating order, then the blinds in seating order.
    pub fn preflop(&self) -> Vec<Seat> {
        self.seats()
            .iter()
            .copied()
            .filter(|s| !self.is_blind(*s))
            .chain(self.seats().iter().copied().filter(|s| self.is_blind(*s)))
            .collect()
    }
    /// Seating order starting with the first seat after the button.
    pub fn postflop(&self) -> Vec<Seat> {
        self.after(self.button()).collect()
    }
}

impl TryFrom<&str> for Table {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "hu" | "2" | "headsup" => Ok(Self::HeadsUp),
            "6max" | "6" => Ok(Self::SixMax),
            "9max" | "9" => Ok(Self::NineMax),
            _ => Err(anyhow::anyhow!("unknown table size {}", s)),
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeadsUp => write!(f, "HU"),
            Self::SixMax => write!(f, "6max"),
            Self::NineMax => write!(f, "9max"),
        }
    }
}

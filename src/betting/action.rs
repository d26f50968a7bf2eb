use crate::AMOUNT_TOLERANCE;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// What happened at a decision node.
///
/// Sizing variants carry the seat's *total* stake on the street after the
/// action, not the chips added. `Start` and `Advance` mark the root and
/// street transitions; they are node kinds, never choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Start,
    Fold,
    Check,
    Call,
    Open(Chips),
    Bet(Chips),
    Raise(Chips),
    Shove(Chips),
    Advance,
}

impl Action {
    /// True for actions a seat may choose.
    pub fn is_choice(&self) -> bool {
        !matches!(self, Self::Start | Self::Advance)
    }
    /// True for nodes that represent no decision.
    pub fn is_marker(&self) -> bool {
        !self.is_choice()
    }
    /// True for actions that put a new price on the street.
    pub fn is_aggro(&self) -> bool {
        matches!(self, Self::Open(_) | Self::Bet(_) | Self::Raise(_) | Self::Shove(_))
    }
    /// True if this is a fold or check (no chips added).
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Fold | Self::Check)
    }
    /// Total stake after the action, for sizing actions.
    pub fn amount(&self) -> Option<Chips> {
        match *self {
            Self::Open(n) | Self::Bet(n) | Self::Raise(n) | Self::Shove(n) => Some(n),
            _ => None,
        }
    }
    /// Same kind, with amounts equal within [`AMOUNT_TOLERANCE`].
    pub fn is_like(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && match (self.amount(), other.amount()) {
                (Some(a), Some(b)) => (a - b).abs() <= AMOUNT_TOLERANCE,
                _ => true,
            }
    }
    /// Lower-case name of the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Open(_) => "open",
            Self::Bet(_) => "bet",
            Self::Raise(_) => "raise",
            Self::Shove(_) => "allin",
            Self::Advance => "advance",
        }
    }
    /// Compact symbol for path identifiers (e.g. "F", "O2.5", "A100").
    pub fn symbol(&self) -> String {
        match self {
            Self::Start => format!("^"),
            Self::Fold => format!("F"),
            Self::Check => format!("X"),
            Self::Call => format!("C"),
            Self::Open(n) => format!("O{}", crate::exact(*n)),
            Self::Bet(n) => format!("B{}", crate::exact(*n)),
            Self::Raise(n) => format!("R{}", crate::exact(*n)),
            Self::Shove(n) => format!("A{}", crate::exact(*n)),
            Self::Advance => format!(">"),
        }
    }
    /// Builds an action from a kind name and an optional big-blind amount.
    pub fn parse(kind: &str, bb: Option<crate::Utility>) -> anyhow::Result<Self> {
        let sized = |f: fn(Chips) -> Self| {
            bb.map(crate::chips)
                .map(f)
                .ok_or_else(|| anyhow::anyhow!("{} needs an amount", kind))
        };
        match kind.trim().to_lowercase().as_str() {
            "f" | "fold" => Ok(Self::Fold),
            "x" | "check" => Ok(Self::Check),
            "c" | "call" | "limp" => Ok(Self::Call),
            "o" | "open" => sized(Self::Open),
            "b" | "bet" => sized(Self::Bet),
            "r" | "raise" => sized(Self::Raise),
            "a" | "allin" | "all-in" | "shove" => sized(Self::Shove),
            _ => Err(anyhow::anyhow!("unknown action {}", kind)),
        }
    }
}

/// symbol isomorphism
impl TryFrom<&str> for Action {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        match s {
            "^" => return Ok(Self::Start),
            ">" => return Ok(Self::Advance),
            _ => {}
        }
        let split = s
            .char_indices()
            .nth(1)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (head, tail) = s.split_at(split);
        let bb = match tail {
            "" => None,
            tail => Some(tail.parse::<crate::Utility>()?),
        };
        Self::parse(head, bb)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Fold => write!(f, "Fold"),
            Self::Check => write!(f, "Check"),
            Self::Call => write!(f, "Call"),
            Self::Open(n) => write!(f, "Open {}", crate::label(*n)),
            Self::Bet(n) => write!(f, "Bet {}", crate::label(*n)),
            Self::Raise(n) => write!(f, "Raise to {}", crate::label(*n)),
            Self::Shove(n) => write!(f, "All-in {}", crate::label(*n)),
            Self::Advance => write!(f, "Advance"),
        }
    }
}

use super::sizing::Postflop;
use super::sizing::Preflop;
use crate::Chips;
use crate::TreeError;
use crate::Utility;
use crate::cards::Street;
use crate::seating::Table;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// Table configuration: an immutable snapshot for the lifetime of one tree.
///
/// Read from JSON. Every field is optional and falls back to the defaults
/// below, so `{"table": "HU", "stack": 40}` is a complete configuration.
///
/// - 6-max, 100bb
/// - open 2.5bb, 3-bet 3.5x, 4-bet 2.5x, 5-bet 2.2x
/// - flop 33/50/75%, turn and river 50/75%, raises 3x in and out of position
/// - no merging, no jamming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table: Table,
    /// Starting stack per seat, in big blinds.
    pub stack: Utility,
    pub preflop: Preflop,
    pub flop: Postflop,
    pub turn: Postflop,
    pub river: Postflop,
    /// Sizes within this percentage of the previous kept size merge into it.
    pub merging: Option<Utility>,
    /// Sizes leaving at most this stack-to-pot ratio become the all-in.
    pub jamming: Option<Utility>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: Table::default(),
            stack: crate::STACK,
            preflop: Preflop::default(),
            flop: Postflop::new(&[33.0, 50.0, 75.0]),
            turn: Postflop::new(&[50.0, 75.0]),
            river: Postflop::new(&[50.0, 75.0]),
            merging: None,
            jamming: None,
        }
    }
}

impl Config {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read {}: {}", path.display(), e))?;
        let config = serde_json::from_str::<Self>(&text)
            .map_err(|e| anyhow::anyhow!("parse {}: {}", path.display(), e))?;
        config.validate()?;
        log::debug!("loaded {} from {}", config, path.display());
        Ok(config)
    }
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = table;
        self
    }
    pub fn with_stack(mut self, stack: Utility) -> Self {
        self.stack = stack;
        self
    }
    /// Starting stack per seat, in chips.
    pub fn chips(&self) -> Chips {
        crate::chips(self.stack)
    }
    /// Sizing for a postflop street.
    pub fn postflop(&self, street: Street) -> Option<&Postflop> {
        match street {
            Street::Pref => None,
            Street::Flop => Some(&self.flop),
            Street::Turn => Some(&self.turn),
            Street::Rive => Some(&self.river),
        }
    }
    /// Rejects sizes the engine cannot act on.
    pub fn validate(&self) -> Result<(), TreeError> {
        let invalid = |reason: String| Err(TreeError::InvalidConfiguration(reason));
        if !self.stack.is_finite() || self.stack <= 1.0 {
            return invalid(format!("stack {} must exceed the big blind", self.stack));
        }
        let seats = self.table.n() as i64;
        if crate::chips(self.stack) as i64 * (seats + 2) > Chips::MAX as i64 {
            return invalid(format!("stack {} is too deep for {} seats", self.stack, seats));
        }
        if let Some(x) = self.preflop.values().find(|x| !(*x > 1.0)) {
            return invalid(format!("preflop size {} must exceed 1", x));
        }
        for seat in self.preflop.overrides.keys().chain(self.preflop.vs.keys()) {
            if !self.table.contains(*seat) {
                log::warn!("sizes for {} ignored at {}", seat, self.table);
            }
        }
        for (street, sizing) in [("flop", &self.flop), ("turn", &self.turn), ("river", &self.river)] {
            if sizing.oop.iter().chain(sizing.ip.iter()).any(|pct| !(*pct > 0.0)) {
                return invalid(format!("{} bet sizes must be positive", street));
            }
            if sizing.oop_raise.iter().chain(sizing.ip_raise.iter()).any(|x| !(*x > 1.0)) {
                return invalid(format!("{} raise multipliers must exceed 1", street));
            }
        }
        if let Some(pct) = self.merging.filter(|pct| !(*pct >= 0.0 && *pct < 100.0)) {
            return invalid(format!("merging threshold {} outside [0, 100)", pct));
        }
        if let Some(spr) = self.jamming.filter(|spr| !(*spr >= 0.0)) {
            return invalid(format!("jamming threshold {} must not be negative", spr));
        }
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}bb", self.table, self.stack)
    }
}

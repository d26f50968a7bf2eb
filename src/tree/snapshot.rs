use super::notice::Notice;
use super::path::Path;
use super::solver::Solution;
use super::step::Step;
use super::tree::Tree;
use crate::TreeError;
use crate::cards::Card;
use crate::config::Config;
use crate::range::Range;
use crate::seating::Seat;
use petgraph::graph::NodeIndex;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A serializable copy of a whole tree.
///
/// Betting states are not stored. Restoring replays every step from the
/// configuration, so a snapshot can never describe an illegal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: Config,
    pub root: Frame,
    pub tip: Path,
    pub focus: Path,
}

/// One node of a [`Snapshot`] and everything below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub step: Step,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ranges: BTreeMap<Seat, Range>,
    /// Cards dealt at a street transition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Frame>,
}

impl Snapshot {
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), text)?;
        log::info!("saved tree to {}", path.as_ref().display());
        Ok(())
    }
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let snapshot = serde_json::from_str::<Self>(&text)?;
        log::info!("loaded tree from {}", path.as_ref().display());
        Ok(snapshot)
    }
}

/// Persistence.
impl Tree {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config().clone(),
            root: self.frame(self.root()),
            tip: self.path(self.tip()).clone(),
            focus: self.path(self.focus()).clone(),
        }
    }
    /// Rebuilds a tree by replaying a snapshot under its own configuration.
    pub fn restore(snapshot: &Snapshot) -> Result<Self, TreeError> {
        let mut tree = Self::new(snapshot.config.clone())?;
        let root = tree.root();
        tree.fill(root, &snapshot.root)?;
        tree.replay(root, &snapshot.root)?;
        let tip = tree.settle_path(&snapshot.tip);
        let focus = tree.settle_path(&snapshot.focus);
        tree.land(tip);
        tree.look(focus);
        log::debug!("restored {} nodes", tree.len());
        Ok(tree)
    }
    /// Deepest node along a saved cursor path. A path that no longer
    /// resolves is reported as stale.
    fn settle_path(&mut self, path: &Path) -> NodeIndex {
        let (index, whole) = self.nearest(path);
        if !whole {
            let requested = path.to_string();
            let resolved = self.node(index).id();
            log::warn!("saved cursor {} is stale, settling on {}", requested, resolved);
            self.notify(Notice::Stale { requested, resolved });
        }
        index
    }
    /// Restores a snapshot only if it was saved under `config`.
    pub fn restore_for(snapshot: &Snapshot, config: &Config) -> Result<Self, TreeError> {
        match snapshot.config == *config {
            true => Self::restore(snapshot),
            false => {
                log::warn!("snapshot built for {} does not fit {}", snapshot.config, config);
                Err(TreeError::ConfigurationMismatch)
            }
        }
    }

    fn frame(&self, index: NodeIndex) -> Frame {
        let node = self.node(index);
        let cards = match node.is_advance() {
            true => {
                let street = node.after().street();
                let n = street.n_revealed();
                let from = street.n_observed() - n;
                node.after().board().slots()[from..from + n]
                    .iter()
                    .map(|slot| slot.card())
                    .collect::<Option<Vec<_>>>()
                    .unwrap_or_default()
            }
            false => Vec::new(),
        };
        Frame {
            step: node.step(),
            ranges: node.ranges().clone(),
            cards,
            solution: node.solution().cloned(),
            children: self
                .children(index)
                .into_iter()
                .map(|child| self.frame(child))
                .collect(),
        }
    }
    fn replay(&mut self, parent: NodeIndex, frame: &Frame) -> Result<(), TreeError> {
        for child in frame.children.iter() {
            let index = self.create_child(parent, child.step.seat, child.step.action)?;
            if !child.cards.is_empty() {
                self.deal(index, &child.cards)?;
            }
            self.fill(index, child)?;
            self.replay(index, child)?;
        }
        Ok(())
    }
    fn fill(&mut self, index: NodeIndex, frame: &Frame) -> Result<(), TreeError> {
        if !self.node(index).step().is_like(&frame.step) {
            return Err(TreeError::InvalidConfiguration(format!(
                "snapshot root {} does not match {}",
                frame.step,
                self.node(index).step()
            )));
        }
        let node = self.node_mut(index);
        node.set_ranges(frame.ranges.clone());
        node.set_solution(frame.solution.clone());
        Ok(())
    }
}

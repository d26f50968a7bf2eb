use super::tree::Tree;
use crate::range::Combo;
use crate::range::Mix;
use crate::range::Range;
use crate::seating::Seat;
use petgraph::graph::NodeIndex;

/// Range attribution.
///
/// A historical node's range describes the hands that chose its action,
/// so it belongs to the node's actor. At the tip nothing has been chosen
/// yet: the range being built belongs to whoever acts next.
impl Tree {
    /// The seat whose range an edit at `index` applies to.
    pub fn owner(&self, index: NodeIndex) -> Seat {
        let node = self.node(index);
        if index != self.tip() {
            return node.seat();
        }
        node.after().next(node.last()).unwrap_or(node.seat())
    }
    /// The focused range, if one has been written.
    pub fn range(&self) -> Option<&Range> {
        let focus = self.focus();
        self.node(focus).range(self.owner(focus))
    }
    /// The focused range, created empty if missing.
    pub fn range_mut(&mut self) -> &mut Range {
        let focus = self.focus();
        let owner = self.owner(focus);
        self.node_mut(focus).range_mut(owner)
    }
    /// Sets one hand class in the focused range.
    pub fn paint(&mut self, combo: Combo, mix: Mix) -> Option<Mix> {
        self.range_mut().set(combo, mix)
    }
    /// Replaces the focused range.
    pub fn set_range(&mut self, range: Range) {
        *self.range_mut() = range;
    }
    /// Empties the focused range.
    pub fn clear_range(&mut self) {
        self.range_mut().clear();
    }
}

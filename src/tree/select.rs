use super::notice::Notice;
use super::path::Path;
use super::step::Step;
use super::tree::Tree;
use crate::TreeError;
use crate::betting::Action;
use crate::catalog::Catalog;
use crate::seating::Seat;
use petgraph::graph::NodeIndex;

/// User-facing mutations.
impl Tree {
    /// Takes `action` for `seat` at the tip.
    ///
    /// Seats pending before `seat` are filled in with a check, or a fold if
    /// they face a bet. The whole chain is validated before any node is
    /// created, so a rejected action leaves the tree untouched. Streets are
    /// then advanced while the betting is closed, and both cursors move to
    /// the resulting node.
    pub fn select(&mut self, seat: Seat, action: Action) -> Result<NodeIndex, TreeError> {
        self.healthy()?;
        let plan = self.plan(seat, action).map_err(|e| self.poison(e))?;
        let mut index = self.tip();
        for step in plan {
            index = self.create_child(index, step.seat, step.action)?;
        }
        let index = self.settle(index)?;
        self.land(index);
        Ok(index)
    }
    /// The gap-filled steps from the tip to `seat` taking `action`,
    /// checked on scratch states.
    fn plan(&self, seat: Seat, action: Action) -> Result<Vec<Step>, TreeError> {
        let tip = self.node(self.tip());
        let mut state = tip.after().clone();
        let mut last = tip.last();
        if !state.pending(last).contains(&seat) {
            let reason = match state.is_complete() {
                true => format!("the hand is over"),
                false => format!("{} is not waiting to act", seat),
            };
            return Err(TreeError::illegal(seat, action, reason));
        }
        let mut plan = Vec::new();
        loop {
            let catalog = Catalog::new(self.config(), &state);
            let next = state
                .next(last)
                .ok_or_else(|| TreeError::illegal(seat, action, "nobody is left to act"))?;
            if next == seat {
                catalog.allows(seat, action)?;
                state.apply(seat, action)?;
                plan.push(Step::from((seat, action)));
                return Ok(plan);
            }
            let passive = catalog
                .passive(next)
                .ok_or_else(|| TreeError::illegal(next, Action::Fold, "cannot act"))?;
            log::trace!("gap fill {} {}", next, passive);
            state = state.apply(next, passive)?;
            last = Some(next);
            plan.push(Step::from((next, passive)));
        }
    }

    /// Revisits the node at `target`.
    ///
    /// If `seat` and `action` are what already happened there, only the
    /// focus moves. Otherwise the action replaces it at the same point:
    /// the matching sibling is found or created below the target's parent,
    /// and both cursors move to it. The original branch stays in the tree.
    pub fn edit(&mut self, target: &Path, seat: Seat, action: Action) -> Result<NodeIndex, TreeError> {
        let index = self.resolve(target)?;
        let step = Step::from((seat, action));
        if self.node(index).step().is_like(&step) {
            self.look(index);
            return Ok(index);
        }
        self.healthy()?;
        let parent = self
            .parent(index)
            .ok_or_else(|| TreeError::illegal(seat, action, "the root records no decision"))?;
        let child = self.create_child(parent, seat, action)?;
        let child = self.settle(child)?;
        self.land(child);
        Ok(child)
    }

    /// Moves the focus to `target` without changing the tip or the tree.
    pub fn view(&mut self, target: &Path) -> Result<NodeIndex, TreeError> {
        let index = self.resolve(target)?;
        self.look(index);
        Ok(index)
    }

    /// Replays `path` from the root. On failure the focus falls back to the
    /// deepest node reached and the discrepancy is reported.
    pub fn resolve(&mut self, path: &Path) -> Result<NodeIndex, TreeError> {
        match self.nearest(path) {
            (index, true) => Ok(index),
            (index, false) => {
                let requested = path.to_string();
                let resolved = self.node(index).id();
                log::warn!("stale path {}, falling back to {}", requested, resolved);
                self.look(index);
                self.notify(Notice::Stale {
                    requested: requested.clone(),
                    resolved: resolved.clone(),
                });
                Err(TreeError::UnknownSeatInPath { requested, resolved })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use Seat::*;

    fn tree() -> Tree {
        Tree::new(Config::default()).unwrap()
    }

    fn seats(tree: &Tree) -> Vec<(Seat, Action)> {
        tree.timeline()
            .into_iter()
            .skip(1)
            .map(|i| (tree.node(i).seat(), tree.node(i).action()))
            .collect()
    }

    #[test]
    fn select_next_seat() {
        let mut tree = tree();
        let index = tree.select(Hj, Action::Open(250)).unwrap();
        assert_eq!(tree.tip(), index);
        assert_eq!(tree.focus(), index);
        assert_eq!(tree.node(index).id(), "root/HJ:O2.5");
        assert_eq!(tree.pending(), vec![Lj, Co, Btn, Sb, Bb]);
    }

    #[test]
    fn gap_fill_folds_skipped_seats() {
        let mut tree = tree();
        tree.select(Co, Action::Open(250)).unwrap();
        assert_eq!(
            seats(&tree),
            vec![(Hj, Action::Fold), (Lj, Action::Fold), (Co, Action::Open(250))]
        );
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn gap_fill_checks_when_free() {
        let mut tree = tree();
        tree.select(Btn, Action::Call).unwrap();
        tree.select(Sb, Action::Call).unwrap();
        tree.select(Bb, Action::Check).unwrap();
        assert_eq!(tree.node(tree.tip()).after().street(), crate::cards::Street::Flop);
        tree.select(Btn, Action::Bet(150)).unwrap();
        let line = seats(&tree);
        assert_eq!(
            line[line.len() - 3..],
            [(Sb, Action::Check), (Bb, Action::Check), (Btn, Action::Bet(150))]
        );
    }

    #[test]
    fn gap_fill_reuses_existing_nodes() {
        let mut tree = tree();
        tree.select(Btn, Action::Fold).unwrap();
        assert_eq!(tree.len(), 5);
        tree.edit(&Path::try_from("root/HJ:F/LJ:F").unwrap(), Lj, Action::Call)
            .unwrap();
        assert_eq!(tree.len(), 6);
        tree.edit(&Path::try_from("root/HJ:F/LJ:C").unwrap(), Lj, Action::Fold)
            .unwrap();
        assert_eq!(tree.len(), 6);
        let index = tree.select(Btn, Action::Fold).unwrap();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.node(index).id(), "root/HJ:F/LJ:F/CO:F/BTN:F");
    }

    #[test]
    fn illegal_action_leaves_tree_untouched() {
        let mut tree = tree();
        let err = tree.select(Co, Action::Check).unwrap_err();
        assert!(matches!(err, TreeError::IllegalAction { seat: Co, .. }));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.tip(), tree.root());
        assert!(tree.notices().is_empty());
    }

    #[test]
    fn seat_not_pending_is_rejected() {
        let mut tree = tree();
        tree.select(Co, Action::Open(250)).unwrap();
        assert!(tree.select(Hj, Action::Call).is_err());
        assert!(tree.select(Utg, Action::Call).is_err());
    }

    #[test]
    fn edit_with_same_action_only_views() {
        let mut tree = tree();
        tree.select(Co, Action::Open(250)).unwrap();
        let tip = tree.tip();
        tree.notices();
        let target = Path::try_from("root/HJ:F").unwrap();
        let index = tree.edit(&target, Hj, Action::Fold).unwrap();
        assert_eq!(tree.focus(), index);
        assert_eq!(tree.tip(), tip);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.notices(), vec![Notice::Focus("root/HJ:F".into())]);
    }

    #[test]
    fn edit_creates_sibling() {
        let mut tree = tree();
        tree.select(Co, Action::Open(250)).unwrap();
        let target = Path::try_from("root/HJ:F/LJ:F/CO:O2.5").unwrap();
        let index = tree.edit(&target, Co, Action::Open(300)).unwrap();
        assert_eq!(tree.node(index).id(), "root/HJ:F/LJ:F/CO:O3");
        assert!(tree.find(&target).is_some());
        let parent = tree.parent(index).unwrap();
        assert_eq!(tree.children(parent).len(), 2);
    }

    #[test]
    fn edit_rejects_wrong_seat() {
        let mut tree = tree();
        tree.select(Co, Action::Open(250)).unwrap();
        let target = Path::try_from("root/HJ:F/LJ:F").unwrap();
        let err = tree.edit(&target, Co, Action::Fold).unwrap_err();
        assert!(matches!(err, TreeError::IllegalAction { .. }));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn stale_path_falls_back() {
        let mut tree = tree();
        tree.select(Co, Action::Open(250)).unwrap();
        tree.notices();
        let stale = Path::try_from("root/HJ:F/LJ:O3").unwrap();
        let err = tree.view(&stale).unwrap_err();
        assert_eq!(
            err,
            TreeError::UnknownSeatInPath {
                requested: "root/HJ:F/LJ:O3".into(),
                resolved: "root/HJ:F".into(),
            }
        );
        assert_eq!(tree.node(tree.focus()).id(), "root/HJ:F");
        assert_eq!(
            tree.notices(),
            vec![
                Notice::Focus("root/HJ:F".into()),
                Notice::Stale {
                    requested: "root/HJ:F/LJ:O3".into(),
                    resolved: "root/HJ:F".into(),
                },
            ]
        );
    }

    #[test]
    fn complete_hand_accepts_nothing() {
        let mut tree = tree();
        for seat in [Hj, Lj, Co, Btn, Sb] {
            tree.select(seat, Action::Fold).unwrap();
        }
        assert!(tree.is_complete());
        assert!(tree.pending().is_empty());
        assert!(tree.choices().is_empty());
        let err = tree.select(Bb, Action::Check).unwrap_err();
        assert!(matches!(err, TreeError::IllegalAction { ref reason, .. } if reason == "the hand is over"));
    }
}

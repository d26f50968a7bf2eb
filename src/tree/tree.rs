use super::node::Node;
use super::notice::Notice;
use super::path::Path;
use super::step::Step;
use crate::TreeError;
use crate::betting::Action;
use crate::cards::Card;
use crate::catalog::Catalog;
use crate::catalog::Choice;
use crate::config::Config;
use crate::seating::Seat;
use petgraph::Direction::Incoming;
use petgraph::Direction::Outgoing;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::fmt::Formatter;

/// The decision tree of one range-building session.
///
/// Nodes live in a graph arena and are never removed, so a `NodeIndex`
/// stays valid for the life of the tree. Each node has at most one
/// incoming edge, its parent; children are ordered by creation.
///
/// Two cursors point into the tree:
///
/// - `tip`: the end of the line currently being extended
/// - `focus`: the node whose range table is being viewed or edited
///
/// A money conservation failure poisons the tree: the offending transition
/// is discarded and every later mutation returns the same error.
#[derive(Debug)]
pub struct Tree {
    config: Config,
    graph: DiGraph<Node, Step>,
    root: NodeIndex,
    tip: NodeIndex,
    focus: NodeIndex,
    notices: Vec<Notice>,
    broken: Option<TreeError>,
}

/// Construction and configuration.
impl Tree {
    /// A tree holding only the root, with blinds posted and the first seat to act.
    pub fn new(config: Config) -> Result<Self, TreeError> {
        config.validate()?;
        let state = crate::betting::BettingState::new(config.table, config.chips());
        let seat = state.next(None).unwrap_or(config.table.button());
        let choices = Catalog::new(&config, &state).legal(seat);
        let step = Step::from((seat, Action::Start));
        let mut graph = DiGraph::new();
        let root = graph.add_node(Node::new(Path::default(), step, state.clone(), state, choices));
        log::debug!("new tree for {} with {} to act", config, seat);
        Ok(Self {
            config,
            graph,
            root,
            tip: root,
            focus: root,
            notices: Vec::new(),
            broken: None,
        })
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Discards every node and starts over under a new configuration.
    pub fn reconfigure(&mut self, config: Config) -> Result<(), TreeError> {
        let mut tree = Self::new(config)?;
        tree.notices = std::mem::take(&mut self.notices);
        tree.notices.push(Notice::Reset);
        tree.notices.push(Notice::Tip(tree.node(tree.root).id()));
        tree.notices.push(Notice::Focus(tree.node(tree.root).id()));
        log::debug!("reset tree for {}", tree.config);
        *self = tree;
        Ok(())
    }
    /// Checks the tree was built for `config`. If not, the tree is reset
    /// under `config` and the mismatch is reported.
    pub fn conform(&mut self, config: &Config) -> Result<(), TreeError> {
        if self.config == *config {
            return Ok(());
        }
        log::warn!("tree built for {} does not fit {}", self.config, config);
        self.reconfigure(config.clone())?;
        Err(TreeError::ConfigurationMismatch)
    }
}

/// Navigation.
impl Tree {
    pub fn root(&self) -> NodeIndex {
        self.root
    }
    pub fn tip(&self) -> NodeIndex {
        self.tip
    }
    pub fn focus(&self) -> NodeIndex {
        self.focus
    }
    /// Panics on an index from another tree.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.graph[index]
    }
    pub fn path(&self, index: NodeIndex) -> &Path {
        self.node(index).path()
    }
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(index, Incoming).next()
    }
    /// Children in creation order.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self
            .graph
            .neighbors_directed(index, Outgoing)
            .collect::<Vec<_>>();
        children.sort();
        children
    }
    /// The child reached by `step`, with amounts compared within tolerance.
    pub fn follow(&self, index: NodeIndex, step: &Step) -> Option<NodeIndex> {
        self.graph
            .edges_directed(index, Outgoing)
            .filter(|edge| edge.weight().is_like(step))
            .map(|edge| edge.target())
            .min()
    }
    /// Replays `path` from the root by sequential child lookup.
    pub fn find(&self, path: &Path) -> Option<NodeIndex> {
        path.steps()
            .iter()
            .try_fold(self.root, |index, step| self.follow(index, step))
    }
    /// The deepest node reachable along `path`, and whether it is the
    /// whole path.
    pub fn nearest(&self, path: &Path) -> (NodeIndex, bool) {
        let mut index = self.root;
        for step in path.steps() {
            match self.follow(index, step) {
                Some(child) => index = child,
                None => return (index, false),
            }
        }
        (index, true)
    }
    /// Nodes from the root to the tip.
    pub fn timeline(&self) -> Vec<NodeIndex> {
        let mut line = vec![self.tip];
        while let Some(parent) = line.last().and_then(|i| self.parent(*i)) {
            line.push(parent);
        }
        line.reverse();
        line
    }
    /// `index` and every node below it.
    pub fn subtree(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut stack = vec![index];
        let mut found = Vec::new();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next));
        }
        found
    }
}

/// Presentation queries at the tip.
impl Tree {
    /// Seats owing action after the tip.
    pub fn pending(&self) -> Vec<Seat> {
        self.node(self.tip).pending()
    }
    /// Legal choices for the next seat to act after the tip.
    pub fn choices(&self) -> Vec<Choice> {
        let tip = self.node(self.tip);
        match self.pending().first() {
            Some(seat) => Catalog::new(&self.config, tip.after()).legal(*seat),
            None => vec![],
        }
    }
    /// No decisions remain after the tip.
    pub fn is_complete(&self) -> bool {
        self.node(self.tip).after().is_complete()
    }
    /// Drains queued notices, oldest first.
    pub fn notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

/// Growth.
impl Tree {
    /// Returns the child of `parent` for this action, creating it if no
    /// child matches within the amount tolerance.
    ///
    /// The seat must be the next to act after `parent` and the action must be
    /// among its legal choices. `Advance` creates the street transition.
    pub fn create_child(
        &mut self,
        parent: NodeIndex,
        seat: Seat,
        action: Action,
    ) -> Result<NodeIndex, TreeError> {
        self.healthy()?;
        let step = Step::from((seat, action));
        if let Some(child) = self.follow(parent, &step) {
            log::debug!("reuse {}", self.node(child).id());
            return Ok(child);
        }
        let node = self.node(parent);
        let path = node.path().with(step);
        let (before, after) = match action {
            Action::Advance => {
                let state = node.after();
                let next = match state.is_round_over() && !state.is_complete() {
                    true => state.advance(),
                    false => None,
                };
                let next = next.ok_or_else(|| TreeError::illegal(seat, action, "no street to advance to"))?;
                (next.clone(), next)
            }
            _ => {
                let before = node.after().clone();
                match node.after().next(node.last()) {
                    Some(next) if next == seat => {}
                    Some(next) => {
                        return Err(TreeError::illegal(seat, action, format!("{} acts first", next)));
                    }
                    None => return Err(TreeError::illegal(seat, action, "nobody is left to act")),
                }
                Catalog::new(&self.config, &before).allows(seat, action)?;
                match before.apply(seat, action) {
                    Ok(after) => (before, after),
                    Err(e) => return Err(self.poison(e)),
                }
            }
        };
        let choices = Catalog::new(&self.config, &before).legal(seat);
        let child = self.graph.add_node(Node::new(path, step, before, after, choices));
        self.graph.add_edge(parent, child, step);
        log::debug!("new node {}", self.node(child).id());
        Ok(child)
    }
    /// Adds the street transition below `index` if its betting round is over
    /// and the hand continues. Returns the transition node, if any.
    pub fn advance(&mut self, index: NodeIndex) -> Result<Option<NodeIndex>, TreeError> {
        let node = self.node(index);
        let state = node.after();
        if !state.is_round_over() || state.is_complete() {
            return Ok(None);
        }
        let seat = node.seat();
        let next = self.create_child(index, seat, Action::Advance)?;
        log::debug!("advance to {}", self.node(next).after().street());
        Ok(Some(next))
    }
    /// Advances streets until one is left with betting to do, or the hand ends.
    pub(super) fn settle(&mut self, mut index: NodeIndex) -> Result<NodeIndex, TreeError> {
        while let Some(next) = self.advance(index)? {
            index = next;
        }
        Ok(index)
    }
    /// Replaces the placeholder cards of a street transition with concrete
    /// cards. Every state below the transition sees the same board.
    pub fn deal(&mut self, index: NodeIndex, cards: &[Card]) -> Result<(), TreeError> {
        self.healthy()?;
        let node = self.node(index);
        let (seat, action) = (node.seat(), node.action());
        let illegal = |reason: String| TreeError::illegal(seat, action, reason);
        if !node.is_advance() {
            return Err(illegal(format!("cards are dealt at street transitions")));
        }
        let street = node.after().street();
        let n = street.n_revealed();
        if cards.len() != n {
            return Err(illegal(format!("{} takes {} cards", street, n)));
        }
        let from = street.n_observed() - n;
        let subtree = self.subtree(index);
        for i in subtree.iter() {
            let mut scratch = self.node(*i).after().clone();
            scratch.deal(from, cards).map_err(|e| illegal(e.to_string()))?;
        }
        for i in subtree {
            for state in self.graph[i].states_mut() {
                state.deal(from, cards).map_err(|e| illegal(e.to_string()))?;
            }
        }
        log::debug!("dealt {} at {}", self.node(index).after().board(), self.node(index).id());
        Ok(())
    }
}

/// Cursor movement and failure bookkeeping.
impl Tree {
    /// Moves both cursors.
    pub(super) fn land(&mut self, index: NodeIndex) {
        self.tip = index;
        self.focus = index;
        self.notices.push(Notice::Tip(self.node(index).id()));
        self.notices.push(Notice::Focus(self.node(index).id()));
    }
    /// Moves the focus only.
    pub(super) fn look(&mut self, index: NodeIndex) {
        self.focus = index;
        self.notices.push(Notice::Focus(self.node(index).id()));
    }
    pub(super) fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
    pub(super) fn healthy(&self) -> Result<(), TreeError> {
        match &self.broken {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
    /// Records a fatal error so every later mutation fails with it.
    pub(super) fn poison(&mut self, error: TreeError) -> TreeError {
        if error.is_fatal() {
            log::error!("tree poisoned: {}", error);
            self.broken = Some(error.clone());
        }
        error
    }
    pub(super) fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.graph[index]
    }
}

/// Rendering.
impl Tree {
    fn draw(&self, f: &mut Formatter, index: NodeIndex, prefix: &str) -> std::fmt::Result {
        if index == self.root {
            writeln!(f, "ROOT   {}{}", self.node(index), self.marks(index))?;
        }
        let children = self.children(index);
        let n = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let last = i == n - 1;
            let stem = if last { "└" } else { "├" };
            let gaps = if last { "    " } else { "│   " };
            writeln!(f, "{}{}── {}{}", prefix, stem, self.node(child), self.marks(child))?;
            self.draw(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
    fn marks(&self, index: NodeIndex) -> &'static str {
        match (index == self.tip, index == self.focus) {
            (true, true) => "  <tip, focus>",
            (true, false) => "  <tip>",
            (false, true) => "  <focus>",
            (false, false) => "",
        }
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.draw(f, self.root, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::Table;
    use Seat::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| Card::try_from(c).unwrap()).collect()
    }

    fn limped() -> (Tree, NodeIndex) {
        let mut tree = Tree::new(Config::default().with_table(Table::HeadsUp)).unwrap();
        tree.select(Btn, Action::Call).unwrap();
        let flop = tree.select(Bb, Action::Check).unwrap();
        (tree, flop)
    }

    #[test]
    fn root_waits_on_first_seat() {
        let tree = Tree::new(Config::default()).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).seat(), Hj);
        assert_eq!(tree.pending(), vec![Hj, Lj, Co, Btn, Sb, Bb]);
        assert_eq!(tree.choices()[0].to_string(), "Fold");
        assert_eq!(tree.node(tree.root()).id(), "root");
    }

    #[test]
    fn create_child_reuses_matching_edge() {
        let mut tree = Tree::new(Config::default()).unwrap();
        let root = tree.root();
        let a = tree.create_child(root, Hj, Action::Open(250)).unwrap();
        let b = tree.create_child(root, Hj, Action::Open(251)).unwrap();
        let c = tree.create_child(root, Hj, Action::Open(300)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(tree.children(root), vec![a, c]);
        assert_eq!(tree.parent(c), Some(root));
    }

    #[test]
    fn create_child_enforces_turn_order() {
        let mut tree = Tree::new(Config::default()).unwrap();
        let root = tree.root();
        let err = tree.create_child(root, Co, Action::Fold).unwrap_err();
        assert!(matches!(err, TreeError::IllegalAction { seat: Co, .. }));
        assert!(tree.create_child(root, Hj, Action::Check).is_err());
        assert!(tree.create_child(root, Hj, Action::Advance).is_err());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn closed_round_advances_street() {
        let (tree, flop) = limped();
        let node = tree.node(flop);
        assert!(node.is_advance());
        assert_eq!(node.after().street(), crate::cards::Street::Flop);
        assert_eq!(node.after().board().to_string(), "? ? ?");
        assert_eq!(node.id(), "root/BTN:C/BB:X/flop");
        assert_eq!(tree.tip(), flop);
        assert_eq!(tree.pending(), vec![Bb, Btn]);
    }

    #[test]
    fn deal_reaches_whole_subtree() {
        let (mut tree, flop) = limped();
        tree.select(Bb, Action::Check).unwrap();
        let tip = tree.tip();
        tree.deal(flop, &cards("Ks 8h 3d")).unwrap();
        assert_eq!(tree.node(flop).before().board().to_string(), "Ks 8h 3d");
        assert_eq!(tree.node(tip).after().board().to_string(), "Ks 8h 3d");
        assert!(tree.node(tree.root()).after().board().is_empty());
    }

    #[test]
    fn deal_rejects_bad_cards() {
        let (mut tree, flop) = limped();
        let root = tree.root();
        assert!(tree.deal(flop, &cards("Ks 8h")).is_err());
        assert!(tree.deal(flop, &cards("Ks Ks 3d")).is_err());
        assert!(tree.deal(root, &[]).is_err());
        assert_eq!(tree.node(flop).after().board().to_string(), "? ? ?");
    }

    #[test]
    fn all_in_runs_out_the_board() {
        let mut tree = Tree::new(Config::default().with_table(Table::HeadsUp)).unwrap();
        tree.select(Btn, Action::Shove(10000)).unwrap();
        let end = tree.select(Bb, Action::Call).unwrap();
        assert_eq!(tree.node(end).after().street(), crate::cards::Street::Rive);
        assert_eq!(tree.node(end).after().board().len(), 5);
        assert!(tree.is_complete());
        assert!(tree.pending().is_empty());
        assert!(tree.choices().is_empty());
    }

    #[test]
    fn reconfigure_resets_and_notifies() {
        let mut tree = Tree::new(Config::default()).unwrap();
        tree.select(Co, Action::Open(250)).unwrap();
        tree.notices();
        tree.reconfigure(Config::default().with_stack(40.0)).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(
            tree.notices(),
            vec![
                Notice::Reset,
                Notice::Tip("root".to_string()),
                Notice::Focus("root".to_string()),
            ]
        );
    }

    #[test]
    fn conform_reports_mismatch() {
        let mut tree = Tree::new(Config::default()).unwrap();
        tree.select(Co, Action::Open(250)).unwrap();
        assert!(tree.conform(&Config::default()).is_ok());
        assert_eq!(tree.len(), 4);
        let other = Config::default().with_table(Table::NineMax);
        assert!(matches!(tree.conform(&other), Err(TreeError::ConfigurationMismatch)));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.config(), &other);
    }

    struct Offline;

    impl crate::tree::Solver for Offline {
        fn solve(&self, _: &crate::tree::Request) -> anyhow::Result<crate::tree::Solution> {
            Err(anyhow::anyhow!("solver offline"))
        }
    }

    #[test]
    fn only_fatal_errors_poison() {
        let (mut tree, _) = limped();
        tree.poison(TreeError::illegal(Bb, Action::Check, "out of turn"));
        assert!(tree.healthy().is_ok());
        tree.poison(TreeError::ConfigurationMismatch);
        assert!(tree.healthy().is_ok());
    }

    #[test]
    fn poisoned_tree_refuses_every_mutation() {
        let (mut tree, flop) = limped();
        let fatal = TreeError::MoneyConservationViolation {
            expected: 20_000,
            found: 20_001,
        };
        assert_eq!(tree.poison(fatal.clone()), fatal);
        let root = tree.root();
        let size = tree.len();
        assert_eq!(tree.select(Bb, Action::Check), Err(fatal.clone()));
        assert_eq!(
            tree.edit(&Path::try_from("root/BTN:C").unwrap(), Btn, Action::Fold),
            Err(fatal.clone())
        );
        assert_eq!(tree.create_child(root, Btn, Action::Fold), Err(fatal.clone()));
        assert_eq!(tree.deal(flop, &cards("Ks 8h 3d")), Err(fatal.clone()));
        let solved = tree.solve(&Offline).unwrap_err();
        assert_eq!(solved.downcast_ref::<TreeError>(), Some(&fatal));
        assert_eq!(tree.len(), size);
        assert_eq!(tree.node(flop).after().board().to_string(), "? ? ?");
    }

    #[test]
    fn drawing_marks_cursors() {
        let (mut tree, _) = limped();
        tree.view(&Path::try_from("root/BTN:C").unwrap()).unwrap();
        let drawing = tree.to_string();
        let lines = drawing.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ROOT"));
        assert!(lines[1].starts_with("└── BTN Call"));
        assert!(lines[1].ends_with("<focus>"));
        assert!(lines[3].ends_with("<tip>"));
    }
}

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rangetree::betting::Action;
use rangetree::betting::BettingState;
use rangetree::cards::Street;
use rangetree::config::Config;
use rangetree::range::Combo;
use rangetree::range::Mix;
use rangetree::seating::Seat::*;
use rangetree::seating::Table;
use rangetree::tree::Path;
use rangetree::tree::Snapshot;
use rangetree::tree::Tree;

fn path(s: &str) -> Path {
    Path::try_from(s).unwrap()
}

fn balanced(state: &BettingState) -> bool {
    let stacks = state.players().map(|(_, p)| p.stack()).sum::<i32>();
    let spent = state.players().map(|(_, p)| p.spent()).sum::<i32>();
    state.pot() + stacks == state.total() && state.pot() == spent
}

fn flop() -> Tree {
    let mut tree = Tree::new(Config::default()).unwrap();
    tree.select(Co, Action::Open(250)).unwrap();
    tree.select(Btn, Action::Call).unwrap();
    tree.select(Bb, Action::Call).unwrap();
    tree
}

#[test]
fn six_max_single_raised_flop() {
    let tree = flop();
    let tip = tree.node(tree.tip());
    assert_eq!(tip.id(), "root/HJ:F/LJ:F/CO:O2.5/BTN:C/SB:F/BB:C/flop");
    let state = tip.after();
    assert_eq!(state.street(), Street::Flop);
    assert_eq!(state.pot(), 800);
    assert_eq!(state.to_call(), 0);
    assert_eq!(state.live(), vec![Co, Btn, Bb]);
    assert_eq!(tree.pending(), vec![Bb, Co, Btn]);
    let labels = tree
        .choices()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>();
    assert_eq!(labels.first().map(String::as_str), Some("Check"));
    assert!(labels.iter().any(|l| l.starts_with("Bet")));
    assert_eq!(labels.last().map(String::as_str), Some("All-in 97.5"));
}

#[test]
fn sibling_edit_keeps_original_line() {
    let mut tree = flop();
    let before = tree.len();
    let open = path("root/HJ:F/LJ:F/CO:O2.5");
    let index = tree.edit(&open, Co, Action::Open(300)).unwrap();
    assert_eq!(tree.node(index).id(), "root/HJ:F/LJ:F/CO:O3");
    assert_eq!(tree.len(), before + 1);
    assert!(tree.find(&path("root/HJ:F/LJ:F/CO:O2.5/BTN:C/SB:F/BB:C/flop")).is_some());
    assert_eq!(tree.tip(), index);
    assert_eq!(tree.pending(), vec![Btn, Sb, Bb]);
    let again = tree.edit(&open, Co, Action::Open(300)).unwrap();
    assert_eq!(again, index);
    assert_eq!(tree.len(), before + 1);
}

#[test]
fn ranges_follow_the_owner() {
    let mut tree = flop();
    let aa = Combo::try_from("AA").unwrap();
    tree.paint(aa, Mix::RAISE);
    let tip = tree.node(tree.tip());
    assert!(tip.range(Bb).is_some());
    tree.view(&path("root/HJ:F/LJ:F/CO:O2.5")).unwrap();
    tree.paint(aa, Mix::CALL);
    let open = tree.find(&path("root/HJ:F/LJ:F/CO:O2.5")).unwrap();
    assert_eq!(tree.node(open).range(Co).unwrap().get(&aa), Some(&Mix::CALL));
    assert_eq!(tree.owner(open), Co);
}

#[test]
fn nine_max_walks_every_seat() {
    let config = Config::default().with_table(Table::NineMax);
    let mut tree = Tree::new(config).unwrap();
    assert_eq!(tree.pending().first(), Some(&Utg));
    tree.select(Bb, Action::Check).unwrap_err();
    tree.select(Sb, Action::Call).unwrap();
    assert_eq!(tree.len(), 9);
    let flop = tree.select(Bb, Action::Check).unwrap();
    assert_eq!(tree.node(flop).after().street(), Street::Flop);
    assert_eq!(tree.node(flop).after().pot(), 200);
    assert_eq!(tree.pending(), vec![Sb, Bb]);
}

#[test]
fn random_lines_conserve_chips() {
    let ref mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    for table in [Table::HeadsUp, Table::SixMax, Table::NineMax] {
        for stack in [20.0, 100.0, 250.0] {
            let config = Config::default().with_table(table).with_stack(stack);
            let mut tree = Tree::new(config).unwrap();
            for _ in 0..8 {
                while !tree.is_complete() {
                    let seat = tree.pending()[0];
                    let choices = tree.choices();
                    let choice = &choices[rng.random_range(0..choices.len())];
                    tree.select(seat, choice.action()).unwrap();
                }
                let nodes = tree.subtree(tree.root());
                let target = nodes[rng.random_range(0..nodes.len())];
                tree.view(&tree.path(target).clone()).unwrap();
                let node = tree.node(target);
                if let Some(choice) = node.choices().first().filter(|_| !node.action().is_marker()) {
                    let (seat, action) = (node.seat(), choice.action());
                    let line = node.path().clone();
                    tree.edit(&line, seat, action).unwrap();
                } else {
                    tree.reconfigure(tree.config().clone()).unwrap();
                }
            }
            for index in tree.subtree(tree.root()) {
                assert!(balanced(tree.node(index).before()));
                assert!(balanced(tree.node(index).after()));
            }
        }
    }
}

#[test]
fn snapshot_round_trips_through_disk() {
    let mut tree = flop();
    tree.paint(Combo::try_from("T9s").unwrap(), Mix::new(0.5, 0.5, 0.0).unwrap());
    let file = std::env::temp_dir().join(format!("rangetree-{}.json", std::process::id()));
    tree.snapshot().save(&file).unwrap();
    let copy = Tree::restore(&Snapshot::load(&file).unwrap()).unwrap();
    std::fs::remove_file(&file).unwrap();
    assert_eq!(copy.snapshot(), tree.snapshot());
    assert_eq!(copy.to_string(), tree.to_string());
}

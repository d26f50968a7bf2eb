//! The decision tree: growth, navigation, range attribution, persistence
//! and the solver boundary.
mod node;
mod notice;
mod owner;
mod path;
mod select;
mod snapshot;
mod solver;
mod step;
mod tree;

pub use node::*;
pub use notice::*;
pub use path::*;
pub use snapshot::*;
pub use solver::*;
pub use step::*;
pub use tree::*;

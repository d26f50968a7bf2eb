//! Hand-class strategy tables attached to decision nodes.
mod combo;
mod mix;
mod range;

pub use combo::*;
pub use mix::*;
pub use range::*;

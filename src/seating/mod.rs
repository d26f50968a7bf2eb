//! Seat order model: named seats and the fixed seating order of a table.
mod seat;
mod table;

pub use seat::*;
pub use table::*;

//! Streets, cards and the community board.
mod board;
mod card;
mod rank;
mod street;
mod suit;

pub use board::*;
pub use card::*;
pub use rank::*;
pub use street::*;
pub use suit::*;

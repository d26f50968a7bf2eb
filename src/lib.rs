//! Betting-round state machine and interactive decision tree for range construction.
//!
//! Given a table configuration, the engine tracks whose turn it is, enumerates
//! legal actions at each decision point, applies actions to produce new betting
//! states, and grows a branching tree of decision nodes that can be navigated
//! and edited. Each node carries per-seat range tables.
//!
//! ## Layers
//!
//! - [`seating`]: Seat order for heads-up, 6-max and 9-max tables
//! - [`cards`]: Streets, cards and board slots
//! - [`betting`]: Per-street betting state, transitions and turn resolution
//! - [`config`]: Stack depth and bet sizing configuration
//! - [`catalog`]: Legal, labeled actions at a decision point
//! - [`range`]: Hand-class strategy tables
//! - [`tree`]: The decision tree, range attribution, persistence and solver hand-off
pub mod betting;
pub mod cards;
pub mod catalog;
pub mod config;
pub mod error;
pub mod range;
pub mod seating;
pub mod tree;

pub use error::TreeError;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Chip amounts, in hundredths of a big blind.
pub type Chips = i32;
/// Big-blind denominated amounts, multipliers and pot percentages.
pub type Utility = f32;
/// Strategy frequencies.
pub type Probability = f32;

// ============================================================================
// CHIP SCALE
// ============================================================================
/// Big blind amount.
pub const B_BLIND: Chips = 100;
/// Small blind amount.
pub const S_BLIND: Chips = 50;
/// Default starting stack in big blinds.
pub const STACK: Utility = 100.0;
/// Two sizing amounts closer than this are the same action.
pub const AMOUNT_TOLERANCE: Chips = 1;
/// Preflop open sizes offered next to the configured one.
pub const ALTERNATE_OPENS: [Utility; 2] = [2.5, 3.0];
/// Raise multiplier offered next to the configured one.
pub const ALTERNATE_RAISE: Utility = 2.5;

/// Converts big blinds to chips, rounding to the nearest chip.
pub fn chips(bb: Utility) -> Chips {
    (bb * B_BLIND as Utility).round() as Chips
}
/// Converts chips to big blinds.
pub fn bbs(chips: Chips) -> Utility {
    chips as Utility / B_BLIND as Utility
}
/// Big blinds rounded to one decimal place, trailing `.0` dropped.
pub fn label(chips: Chips) -> String {
    let tenths = (chips.max(0) + B_BLIND / 20) / (B_BLIND / 10);
    match tenths % 10 {
        0 => format!("{}", tenths / 10),
        d => format!("{}.{}", tenths / 10, d),
    }
}
/// Big blinds with every chip kept, for stable identifiers.
pub fn exact(chips: Chips) -> String {
    let (whole, cents) = (chips / B_BLIND, (chips % B_BLIND).abs());
    match (cents, cents % 10) {
        (0, _) => format!("{}", whole),
        (c, 0) => format!("{}.{}", whole, c / 10),
        (c, _) => format!("{}.{:02}", whole, c),
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}

pub mod cards;
pub mod room;
pub mod table;

/// chip amounts; all arithmetic that can wrap is checked at the boundary
pub type Chips = u64;

pub const DEFAULT_STAKES: Chips = 1_000;
pub const DEFAULT_MAX_PLAYERS: usize = 6;
pub const DEFAULT_STAKES_MULTIPLIER: Chips = 100;

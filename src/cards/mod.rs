pub mod card;
pub use card::*;

pub mod category;
pub use category::*;

pub mod deck;
pub use deck::*;

pub mod evaluator;
pub use evaluator::*;

pub mod kicks;
pub use kicks::*;

pub mod rank;
pub use rank::*;

pub mod set;
pub use set::*;

pub mod strength;
pub use strength::*;

pub mod suit;
pub use suit::*;

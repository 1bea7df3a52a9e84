mod channel;
mod room;

pub use channel::*;
pub use room::*;

pub mod action;
pub mod error;
pub mod event;
pub mod game;
pub mod player;
pub mod pot;
pub mod roster;
pub mod settings;
pub mod showdown;
pub mod status;
pub mod street;

pub use action::*;
pub use error::*;
pub use event::*;
pub use game::*;
pub use player::*;
pub use pot::*;
pub use roster::*;
pub use settings::*;
pub use showdown::*;
pub use status::*;
pub use street::*;

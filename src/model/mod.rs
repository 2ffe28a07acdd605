//! The fighters, weapons and perks, that take part in duels, as well as the
//! record of a single attack
mod character;
mod event;
mod perk;
mod weapon;

pub use character::*;
pub use event::*;
pub use perk::*;
pub use weapon::*;

//! Shooting module - the shot state machine and ball flight

mod machine;
mod projectile;

pub use machine::*;
pub use projectile::*;

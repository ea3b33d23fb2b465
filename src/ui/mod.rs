//! UI module - HUD text and gizmo drawing of the field

mod field;
mod hud;

pub use field::*;
pub use hud::*;

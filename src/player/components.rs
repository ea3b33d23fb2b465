//! Player-related components

use bevy::prelude::*;

use crate::helpers::Aabb;

/// Marker for the player entity
#[derive(Component)]
pub struct Player;

/// Rectangle in field coordinates (top-left origin, +y down).
/// Shared by the player and defenders; gizmo drawing converts to world space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FieldBody(pub Aabb);

//! Tunable constants for frogball
//!
//! All gameplay values are defined here for easy tweaking. Distances are in
//! pixels, time is in ticks of the nominal 60 Hz frame. Screen coordinates:
//! origin top-left, +y points down.

use bevy::prelude::*;

// =============================================================================
// TEXT/UI COLORS
// =============================================================================

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::srgb(0.16, 0.22, 0.14); // Pond green
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8);
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4);

// =============================================================================
// FIELD DIMENSIONS
// =============================================================================

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;

// =============================================================================
// PLAYER
// =============================================================================

pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
/// Canonical start position (player center). Score and recovery reset here.
pub const PLAYER_START: Vec2 = Vec2::new(400.0, 540.0);
pub const PLAYER_MOVE_SPEED: f32 = 4.0; // Pixels per tick

// =============================================================================
// HOOP
// =============================================================================

pub const HOOP_CENTER: Vec2 = Vec2::new(400.0, 90.0);
pub const HOOP_ACCEPTANCE_RADIUS: f32 = 24.0;
/// Invisible post under the hoop the player cannot walk through
pub const HOOP_POST_SIZE: Vec2 = Vec2::new(16.0, 120.0);

// =============================================================================
// TIMING
// =============================================================================

pub const NOMINAL_FRAME_SECS: f32 = 1.0 / 60.0;
/// Largest frame scale applied in a single update (long hitches are capped)
pub const MAX_FRAME_SCALE: f32 = 4.0;

// =============================================================================
// AIMING
// =============================================================================

// Both speeds are powers of two so a full sweep lands exactly on the boundary:
// angle takes 48 ticks edge to edge, power takes 64 ticks from 0 to 1.
pub const AIM_ANGLE_RANGE: f32 = 1.5; // Radians, full arc (±0.75)
pub const AIM_ANGLE_SPEED: f32 = 0.03125; // Radians per tick
pub const POWER_SPEED: f32 = 0.015625; // Power units per tick

// =============================================================================
// BALL FLIGHT
// =============================================================================

pub const POWER_SCALE: f32 = 16.0; // Launch speed at full power (px/tick)
pub const LAUNCH_LIFT: f32 = 11.0; // Upward bias added to every launch (px/tick)
pub const BALL_GRAVITY: f32 = 0.4; // px/tick²
pub const BALL_RADIUS: f32 = 10.0; // Drawing only
pub const POINTS_PER_BASKET: u32 = 2;

// =============================================================================
// MISS RECOVERY
// =============================================================================

pub const RECOVERY_COUNTDOWN_TICKS: f32 = 90.0;
pub const RECOVERY_TELEPORT_TICKS: f32 = 30.0;

// =============================================================================
// TRIGGER ZONE
// =============================================================================

pub const TRIGGER_ZONE_SIZE: Vec2 = Vec2::new(80.0, 60.0);
pub const TRIGGER_ZONE_MARGIN: f32 = 40.0;
pub const TRIGGER_ZONE_INTERVAL_TICKS: f32 = 300.0;

// =============================================================================
// DEFENDER LANES
// =============================================================================

pub const LANE_COUNT: usize = 3;
pub const LANE_TOP: f32 = 200.0; // Y of the first lane center
pub const LANE_SPACING: f32 = 90.0;
pub const DEFENDER_SIZE: Vec2 = Vec2::new(48.0, 36.0);
/// Defender speed per lane (px/tick), alternating direction
pub const DEFENDER_SPEEDS: [f32; LANE_COUNT] = [2.5, -3.5, 4.5];

// =============================================================================
// INPUT
// =============================================================================

pub const STICK_DEADZONE: f32 = 0.25;

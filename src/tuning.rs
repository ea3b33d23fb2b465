//! Shot tuning settings (game balance, decoupled from the state machine)

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

// Serde default functions so older config files keep loading as fields are added
fn default_angle_range() -> f32 {
    AIM_ANGLE_RANGE
}
fn default_angle_speed() -> f32 {
    AIM_ANGLE_SPEED
}
fn default_power_speed() -> f32 {
    POWER_SPEED
}
fn default_power_scale() -> f32 {
    POWER_SCALE
}
fn default_launch_lift() -> f32 {
    LAUNCH_LIFT
}
fn default_gravity() -> f32 {
    BALL_GRAVITY
}
fn default_points_per_basket() -> u32 {
    POINTS_PER_BASKET
}
fn default_recovery_countdown_ticks() -> f32 {
    RECOVERY_COUNTDOWN_TICKS
}
fn default_recovery_teleport_ticks() -> f32 {
    RECOVERY_TELEPORT_TICKS
}
fn default_zone_width() -> f32 {
    TRIGGER_ZONE_SIZE.x
}
fn default_zone_height() -> f32 {
    TRIGGER_ZONE_SIZE.y
}
fn default_zone_margin() -> f32 {
    TRIGGER_ZONE_MARGIN
}
fn default_zone_interval_ticks() -> f32 {
    TRIGGER_ZONE_INTERVAL_TICKS
}

/// Path to the shot tuning config
pub const SHOT_TUNING_FILE: &str = "config/shot_tuning.json";

/// Game-balance parameters for the shooting mini-game.
/// Every duration and speed is expressed per nominal tick.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTuning {
    /// Full aiming arc in radians; the angle sweeps ±range/2
    #[serde(default = "default_angle_range")]
    pub angle_range: f32,
    #[serde(default = "default_angle_speed")]
    pub angle_speed: f32,
    #[serde(default = "default_power_speed")]
    pub power_speed: f32,
    #[serde(default = "default_power_scale")]
    pub power_scale: f32,
    #[serde(default = "default_launch_lift")]
    pub launch_lift: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_points_per_basket")]
    pub points_per_basket: u32,
    #[serde(default = "default_recovery_countdown_ticks")]
    pub recovery_countdown_ticks: f32,
    #[serde(default = "default_recovery_teleport_ticks")]
    pub recovery_teleport_ticks: f32,
    #[serde(default = "default_zone_width")]
    pub zone_width: f32,
    #[serde(default = "default_zone_height")]
    pub zone_height: f32,
    #[serde(default = "default_zone_margin")]
    pub zone_margin: f32,
    #[serde(default = "default_zone_interval_ticks")]
    pub zone_interval_ticks: f32,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            angle_range: default_angle_range(),
            angle_speed: default_angle_speed(),
            power_speed: default_power_speed(),
            power_scale: default_power_scale(),
            launch_lift: default_launch_lift(),
            gravity: default_gravity(),
            points_per_basket: default_points_per_basket(),
            recovery_countdown_ticks: default_recovery_countdown_ticks(),
            recovery_teleport_ticks: default_recovery_teleport_ticks(),
            zone_width: default_zone_width(),
            zone_height: default_zone_height(),
            zone_margin: default_zone_margin(),
            zone_interval_ticks: default_zone_interval_ticks(),
        }
    }
}

impl ShotTuning {
    /// Half of the aiming arc (the angle oscillates within ±this)
    pub fn half_arc(&self) -> f32 {
        self.angle_range / 2.0
    }

    /// Reject values that would stall or invert the state machine
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("angle_range", self.angle_range),
            ("angle_speed", self.angle_speed),
            ("power_speed", self.power_speed),
            ("power_scale", self.power_scale),
            ("gravity", self.gravity),
            ("recovery_countdown_ticks", self.recovery_countdown_ticks),
            ("recovery_teleport_ticks", self.recovery_teleport_ticks),
            ("zone_width", self.zone_width),
            ("zone_height", self.zone_height),
            ("zone_interval_ticks", self.zone_interval_ticks),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }

        let non_negative = [
            ("launch_lift", self.launch_lift),
            ("zone_margin", self.zone_margin),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// Load and validate shot tuning from a JSON file
pub fn load_shot_tuning_from_file<P: AsRef<Path>>(path: P) -> Result<ShotTuning, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let tuning: ShotTuning = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    tuning.validate()?;
    Ok(tuning)
}

/// Load tuning from the config file, falling back to defaults
pub fn load_shot_tuning_or_default() -> ShotTuning {
    if !Path::new(SHOT_TUNING_FILE).exists() {
        info!("No {} found, using default shot tuning", SHOT_TUNING_FILE);
        return ShotTuning::default();
    }
    match load_shot_tuning_from_file(SHOT_TUNING_FILE) {
        Ok(tuning) => {
            info!("Loaded shot tuning from {}", SHOT_TUNING_FILE);
            tuning
        }
        Err(e) => {
            warn!("{}, using default shot tuning", e);
            ShotTuning::default()
        }
    }
}

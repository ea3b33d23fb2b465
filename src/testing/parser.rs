//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::tuning::ShotTuning;
use crate::world::Side;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Test setup configuration
#[derive(Debug, Deserialize)]
pub struct TestSetup {
    #[serde(default)]
    pub seed: u64,
    /// Player rectangle center
    pub player_x: f32,
    pub player_y: f32,
    /// Frames to run; defaults to the last frame any input or check mentions
    pub frames: Option<u64>,
    /// Pin the starting trigger zone instead of placing it from the seed
    pub zone: Option<ZoneDef>,
    pub hoop: Option<HoopDef>,
    /// Partial tuning table; missing fields keep their defaults
    pub tuning: Option<ShotTuning>,
}

/// Starting trigger zone, sized from the tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneDef {
    pub side: Side,
    /// Zone center
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoopDef {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Input edges and movement changes at a specific frame.
/// Edges fire on that frame only; movement persists until changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    #[serde(default)]
    pub press: bool,
    #[serde(default)]
    pub release: bool,
    #[serde(default)]
    pub abort: bool,
    pub move_x: Option<f32>,
    pub move_y: Option<f32>,
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    /// Events that must occur, in this order
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
    /// Event names that must never occur
    #[serde(default)]
    pub forbidden: Vec<String>,
}

/// Expected event in sequence
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

impl TestDefinition {
    /// Frames the runner should simulate
    pub fn frame_count(&self) -> u64 {
        if let Some(frames) = self.setup.frames {
            return frames;
        }
        let last_input = self.input.iter().map(|i| i.frame).max().unwrap_or(0);
        let last_check = self.expect.state.iter().map(|s| s.after_frame).max().unwrap_or(0);
        let last_event = self
            .expect
            .sequence
            .iter()
            .filter_map(|e| e.frame_max)
            .max()
            .unwrap_or(0);
        let last = last_input.max(last_check).max(last_event);
        if last == 0 { 60 } else { last }
    }
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
player_x = 400.0
player_y = 500.0

[setup.zone]
side = "Right"
x = 600.0
y = 450.0

[setup.tuning]
gravity = 0.5

[[input]]
frame = 1
press = true

[[input]]
frame = 30
move_x = -1.0

[[expect.sequence]]
event = "AimStarted"
frame_max = 1

[[expect.state]]
after_frame = 40
checks = ["phase == Aiming"]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.setup.seed, 0);
        assert_eq!(def.setup.zone.as_ref().map(|z| z.side), Some(Side::Right));
        let tuning = def.setup.tuning.as_ref().unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.power_scale, ShotTuning::default().power_scale);
        assert!(def.input[0].press);
        assert_eq!(def.input[1].move_x, Some(-1.0));
        assert_eq!(def.input[1].move_y, None);
        assert_eq!(def.frame_count(), 40);
    }

    #[test]
    fn test_frame_count_override_and_default() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Empty"
[setup]
player_x = 0.0
player_y = 0.0
"#,
        )
        .unwrap();
        assert_eq!(def.frame_count(), 60);

        let def: TestDefinition = toml::from_str(
            r#"
name = "Long"
[setup]
player_x = 0.0
player_y = 0.0
frames = 300
"#,
        )
        .unwrap();
        assert_eq!(def.frame_count(), 300);
    }
}

//! Test execution engine
//!
//! Drives a `Shootout` frame by frame from scripted input, with the same
//! host-side movement the game uses, and checks the expectations.

use bevy::prelude::*;

use crate::constants::{PLAYER_MOVE_SPEED, PLAYER_SIZE};
use crate::helpers::Aabb;
use crate::player::step_player;
use crate::referee::apply_outcome;
use crate::scoring::Score;
use crate::shootout::{ShotInput, Shootout};
use crate::trigger_zone::TriggerZone;
use crate::world::{Arena, Hoop};

use super::assertions::{AssertionError, CapturedEvent, WorldState, check_forbidden, check_sequence, check_state};
use super::parser::TestDefinition;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

fn build_shootout(test: &TestDefinition) -> Result<Shootout, String> {
    let setup = &test.setup;
    let tuning = setup.tuning.clone().unwrap_or_default();
    tuning.validate()?;

    let mut arena = Arena::default();
    if let Some(hoop) = &setup.hoop {
        arena.hoop = Hoop {
            center: Vec2::new(hoop.x, hoop.y),
            radius: hoop.radius,
        };
    }

    let mut builder = Shootout::builder().with_seed(setup.seed);
    if let Some(zone) = &setup.zone {
        let rect = Aabb::from_center(
            Vec2::new(zone.x, zone.y),
            Vec2::new(tuning.zone_width, tuning.zone_height),
        );
        builder = builder.with_trigger_zone(TriggerZone::new(zone.side, rect));
    }
    Ok(builder.with_arena(arena).with_tuning(tuning).build())
}

fn world_state(game: &Shootout, player: &Aabb, score: &Score) -> WorldState {
    let view = game.view();
    WorldState {
        phase: view.phase.to_string(),
        zone_side: view.zone_side.to_string(),
        current_angle: view.current_angle,
        locked_angle: view.locked_angle,
        power: view.power,
        ball: view.ball,
        player: player.center(),
        movement_locked: view.movement_locked,
        score: score.points,
        recovery_stage: view.recovery.map(|r| r.stage.to_string()),
    }
}

/// Outcome of one scenario plus every event it produced, frame-stamped
#[derive(Debug)]
pub struct ScenarioRun {
    pub result: TestResult,
    pub events: Vec<CapturedEvent>,
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    run_scenario(test).result
}

/// Run a single test, keeping the captured event timeline
pub fn run_scenario(test: &TestDefinition) -> ScenarioRun {
    let mut game = match build_shootout(test) {
        Ok(game) => game,
        Err(message) => {
            return ScenarioRun {
                result: TestResult::Error { message },
                events: Vec::new(),
            };
        }
    };

    let max_frame = test.frame_count();
    let mut player = Aabb::from_center(Vec2::new(test.setup.player_x, test.setup.player_y), PLAYER_SIZE);
    let mut score = Score::default();
    let mut move_dir = Vec2::ZERO;
    let mut captured = Vec::new();

    for frame in 1..=max_frame {
        let mut input = ShotInput::idle(player);
        for scripted in test.input.iter().filter(|i| i.frame == frame) {
            input.action_pressed |= scripted.press;
            input.action_released |= scripted.release;
            input.abort |= scripted.abort;
            if let Some(x) = scripted.move_x {
                move_dir.x = x;
            }
            if let Some(y) = scripted.move_y {
                move_dir.y = y;
            }
        }

        // Host order: move first (under last tick's lock), then the shootout
        player = step_player(
            player,
            move_dir,
            PLAYER_MOVE_SPEED,
            1.0,
            game.movement_locked(),
            game.arena(),
        );
        input.player_rect = player;

        let outcome = game.tick(&input);
        apply_outcome(&mut player, &mut score, outcome.position_override, &outcome.events);
        captured.extend(outcome.events.iter().map(|event| CapturedEvent::new(frame, event)));

        let state = world_state(&game, &player, &score);
        for assertion in test.expect.state.iter().filter(|s| s.after_frame == frame) {
            if let Err(mut error) = check_state(assertion, &state) {
                error.message = format!("[frame {}] {}", frame, error.message);
                return ScenarioRun {
                    result: TestResult::Fail { error },
                    events: captured,
                };
            }
        }
    }

    let result = if let Some(missed) = test.expect.state.iter().find(|s| s.after_frame > max_frame) {
        TestResult::Error {
            message: format!(
                "State check at frame {} is past the last simulated frame {}",
                missed.after_frame, max_frame
            ),
        }
    } else if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        TestResult::Fail { error }
    } else if let Err(error) = check_forbidden(&test.expect.forbidden, &captured) {
        TestResult::Fail { error }
    } else {
        TestResult::Pass { frames: max_frame }
    };

    ScenarioRun {
        result,
        events: captured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run_all;
    use std::path::Path;

    #[test]
    fn test_all_scenarios_pass() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::testing::SCENARIOS_DIR);
        let reports = run_all(&dir, None);
        assert!(!reports.is_empty(), "no scenarios under {}", dir.display());

        let failures: Vec<String> = reports
            .iter()
            .filter(|report| !report.passed())
            .map(|report| format!("{}: {:?}", report.path.display(), report.run.result))
            .collect();
        assert!(failures.is_empty(), "{}", failures.join("\n"));
    }

    #[test]
    fn test_scenario_run_keeps_event_timeline() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Aim then abort"
[setup]
player_x = 200.0
player_y = 450.0
[setup.zone]
side = "Left"
x = 200.0
y = 450.0
[[input]]
frame = 1
press = true
[[input]]
frame = 5
abort = true
"#,
        )
        .unwrap();
        let run = run_scenario(&def);
        assert!(matches!(run.result, TestResult::Pass { frames: 5 }));
        let timeline: Vec<(u64, &str)> = run.events.iter().map(|e| (e.frame, e.event_type.as_str())).collect();
        assert_eq!(timeline, vec![(1, "AimStarted"), (5, "ShotAborted")]);
    }

    #[test]
    fn test_invalid_tuning_is_an_error() {
        let def: TestDefinition = toml::from_str(
            r#"
name = "Bad"
[setup]
player_x = 400.0
player_y = 500.0
[setup.tuning]
angle_speed = 0.0
"#,
        )
        .unwrap();
        assert!(matches!(run_test(&def), TestResult::Error { .. }));
    }
}

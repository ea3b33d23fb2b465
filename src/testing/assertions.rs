//! Assertion checking for test expectations

use bevy::prelude::Vec2;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::ShotEvent;

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
}

impl CapturedEvent {
    pub fn new(frame: u64, event: &ShotEvent) -> Self {
        Self {
            frame,
            event_type: event.name().to_string(),
        }
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        // Find matching event starting from current position
        let found = captured[captured_idx..]
            .iter()
            .enumerate()
            .find(|(_, cap)| cap.event_type == exp.event);

        let Some((offset, cap)) = found else {
            return Err(AssertionError {
                message: format!("Event #{} '{}' not found", i + 1, exp.event),
                expected: format!("'{}' event in sequence", exp.event),
                actual: format!(
                    "events after position {}: {:?}",
                    captured_idx,
                    captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                ),
            });
        };

        if let Some(min) = exp.frame_min
            && cap.frame < min
        {
            return Err(AssertionError {
                message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                expected: format!("frame >= {}", min),
                actual: format!("frame {}", cap.frame),
            });
        }
        if let Some(max) = exp.frame_max
            && cap.frame > max
        {
            return Err(AssertionError {
                message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                expected: format!("frame <= {}", max),
                actual: format!("frame {}", cap.frame),
            });
        }
        captured_idx += offset + 1;
    }

    Ok(())
}

/// Check that none of the forbidden events occurred
pub fn check_forbidden(forbidden: &[String], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    match captured.iter().find(|cap| forbidden.contains(&cap.event_type)) {
        Some(cap) => Err(AssertionError {
            message: format!("Forbidden event '{}' occurred", cap.event_type),
            expected: format!("none of {:?}", forbidden),
            actual: format!("'{}' at frame {}", cap.event_type, cap.frame),
        }),
        None => Ok(()),
    }
}

/// Observable state for assertions
#[derive(Debug, Clone)]
pub struct WorldState {
    pub phase: String,
    pub zone_side: String,
    pub current_angle: Option<f32>,
    pub locked_angle: Option<f32>,
    pub power: Option<f32>,
    pub ball: Option<Vec2>,
    pub player: Vec2,
    pub movement_locked: bool,
    pub score: u32,
    pub recovery_stage: Option<String>,
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, == before =)
    for op in &[">=", "<=", "!=", "==", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path == value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;

        match path {
            "phase" => check_text(check, &state.phase, operator, expected_value)?,
            "zone.side" => check_text(check, &state.zone_side, operator, expected_value)?,
            "recovery.stage" => {
                let stage = state.recovery_stage.as_deref().unwrap_or("none");
                check_text(check, stage, operator, expected_value)?
            }
            "movement_locked" => check_text(check, &state.movement_locked.to_string(), operator, expected_value)?,
            "current_angle" => check_optional(path, state.current_angle, operator, expected_value)?,
            "locked_angle" => check_optional(path, state.locked_angle, operator, expected_value)?,
            "power" => check_optional(path, state.power, operator, expected_value)?,
            "ball" => check_optional(path, state.ball.map(|b| b.x), operator, expected_value)?,
            "ball.x" => check_optional(path, state.ball.map(|b| b.x), operator, expected_value)?,
            "ball.y" => check_optional(path, state.ball.map(|b| b.y), operator, expected_value)?,
            "player.x" => check_float_comparison(path, state.player.x, operator, expected_value)?,
            "player.y" => check_float_comparison(path, state.player.y, operator, expected_value)?,
            "score" => check_float_comparison(path, state.score as f32, operator, expected_value)?,
            _ => {
                return Err(AssertionError {
                    message: format!("Unknown check path: {}", path),
                    expected: "phase, zone.side, recovery.stage, movement_locked, current_angle, \
                               locked_angle, power, ball, ball.x, ball.y, player.x, player.y, score"
                        .to_string(),
                    actual: path.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Equality / inequality on a string value
fn check_text(check: &str, actual: &str, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let expected = expected_str.trim_matches('"');
    let pass = match operator {
        "=" | "==" => actual == expected,
        "!=" => actual != expected,
        _ => {
            return Err(AssertionError {
                message: format!("Operator '{}' not supported here: {}", operator, check),
                expected: "== or !=".to_string(),
                actual: operator.to_string(),
            });
        }
    };
    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: format!("{} {}", operator, expected),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Numeric check on a value that only exists in some phases.
/// `== none` passes when absent, `!= none` when present.
fn check_optional(path: &str, actual: Option<f32>, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    if expected_str == "none" {
        let pass = match operator {
            "=" | "==" => actual.is_none(),
            "!=" => actual.is_some(),
            _ => false,
        };
        if pass {
            return Ok(());
        }
        return Err(AssertionError {
            message: format!("Check failed: {} {} none", path, operator),
            expected: format!("{} {} none", path, operator),
            actual: format!("{:?}", actual),
        });
    }

    let value = actual.ok_or_else(|| AssertionError {
        message: format!("{} has no value in the current phase", path),
        expected: format!("{} {} {}", path, operator, expected_str),
        actual: "none".to_string(),
    })?;
    check_float_comparison(path, value, operator, expected_str)
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" | "==" => (actual - value).abs() < 0.1,
        "!=" => (actual - value).abs() >= 0.1,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.3})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.3}", actual),
        });
    }

    Ok(())
}

//! Event type definitions for shot outcomes and the event log

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tuning::ShotTuning;
use crate::world::Side;

/// Everything the shooting core reports to the host in a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShotEvent {
    /// Player pressed action inside the trigger zone
    AimStarted,
    /// Angle frozen on action release
    AngleLocked { angle: f32 },
    /// Ball left the player's hands
    Launched {
        angle: f32,
        power: f32,
        velocity: Vec2,
    },
    /// Descending ball passed through the hoop
    Scored { points: u32 },
    /// Ball left the field; recovery countdown begins
    ShotMissed { exit: Vec2 },
    /// Countdown finished, teleport animation begins
    TeleportStarted { from: Vec2, to: Vec2 },
    /// Player placed back at the start, control restored
    RecoveryFinished { position: Vec2 },
    /// Aim or charge cancelled by the player
    ShotAborted,
    /// Trigger zone jumped to the other half
    ZoneMoved { side: Side },
}

impl ShotEvent {
    /// Event name as used in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ShotEvent::AimStarted => "AimStarted",
            ShotEvent::AngleLocked { .. } => "AngleLocked",
            ShotEvent::Launched { .. } => "Launched",
            ShotEvent::Scored { .. } => "Scored",
            ShotEvent::ShotMissed { .. } => "ShotMissed",
            ShotEvent::TeleportStarted { .. } => "TeleportStarted",
            ShotEvent::RecoveryFinished { .. } => "RecoveryFinished",
            ShotEvent::ShotAborted => "ShotAborted",
            ShotEvent::ZoneMoved { .. } => "ZoneMoved",
        }
    }

    /// Short code for compact log lines
    pub fn type_code(&self) -> &'static str {
        match self {
            ShotEvent::AimStarted => "AS",
            ShotEvent::AngleLocked { .. } => "AL",
            ShotEvent::Launched { .. } => "L",
            ShotEvent::Scored { .. } => "G",
            ShotEvent::ShotMissed { .. } => "M",
            ShotEvent::TeleportStarted { .. } => "TS",
            ShotEvent::RecoveryFinished { .. } => "RF",
            ShotEvent::ShotAborted => "AB",
            ShotEvent::ZoneMoved { .. } => "ZM",
        }
    }
}

/// One line of an event log file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LogRecord {
    /// First line of every log
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // ISO 8601
        seed: Option<u64>,
        tuning: ShotTuning,
    },
    /// A shot event at a given tick
    Shot {
        tick: u64,
        code: String,
        event: ShotEvent,
    },
    SessionEnd {
        tick: u64,
        points: u32,
        baskets: u32,
        misses: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_codes_are_distinct() {
        let events = [
            ShotEvent::AimStarted,
            ShotEvent::AngleLocked { angle: 0.0 },
            ShotEvent::Launched {
                angle: 0.0,
                power: 0.0,
                velocity: Vec2::ZERO,
            },
            ShotEvent::Scored { points: 2 },
            ShotEvent::ShotMissed { exit: Vec2::ZERO },
            ShotEvent::TeleportStarted {
                from: Vec2::ZERO,
                to: Vec2::ZERO,
            },
            ShotEvent::RecoveryFinished {
                position: Vec2::ZERO,
            },
            ShotEvent::ShotAborted,
            ShotEvent::ZoneMoved { side: Side::Left },
        ];
        let mut names: Vec<_> = events.iter().map(|e| e.name()).collect();
        let mut codes: Vec<_> = events.iter().map(|e| e.type_code()).collect();
        names.sort();
        names.dedup();
        codes.sort();
        codes.dedup();
        assert_eq!(names.len(), events.len());
        assert_eq!(codes.len(), events.len());
    }

    #[test]
    fn test_log_record_serializes_with_kind_tag() {
        let record = LogRecord::Shot {
            tick: 12,
            code: "G".to_string(),
            event: ShotEvent::Scored { points: 2 },
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"Shot\""));
        let back: LogRecord = serde_json::from_str(&json).unwrap();
        match back {
            LogRecord::Shot { tick, event, .. } => {
                assert_eq!(tick, 12);
                assert_eq!(event, ShotEvent::Scored { points: 2 });
            }
            other => panic!("Wrong record: {:?}", other),
        }
    }
}

//! Miss recovery sequence - countdown, then teleport back to the start
//!
//! Started when a shot leaves the field. The player cannot move while a
//! sequence exists.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tuning::ShotTuning;

/// Ticks per displayed countdown number
const TICKS_PER_SECOND: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryStage {
    Countdown,
    Teleport,
}

impl std::fmt::Display for RecoveryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoveryStage::Countdown => write!(f, "Countdown"),
            RecoveryStage::Teleport => write!(f, "Teleport"),
        }
    }
}

/// What happened during one recovery tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecoveryStep {
    Waiting,
    TeleportStarted { from: Vec2, to: Vec2 },
    Finished { position: Vec2 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoverySequence {
    pub stage: RecoveryStage,
    /// Ticks left in the countdown stage
    pub countdown_remaining: f32,
    /// Ticks spent in the teleport stage
    pub teleport_elapsed: f32,
    /// Player position when the teleport began (presentation only)
    pub source_point: Option<Vec2>,
    pub target_point: Vec2,
}

impl RecoverySequence {
    pub fn start(target_point: Vec2, tuning: &ShotTuning) -> Self {
        Self {
            stage: RecoveryStage::Countdown,
            countdown_remaining: tuning.recovery_countdown_ticks,
            teleport_elapsed: 0.0,
            source_point: None,
            target_point,
        }
    }

    pub fn advance(&mut self, scale: f32, player_position: Vec2, tuning: &ShotTuning) -> RecoveryStep {
        match self.stage {
            RecoveryStage::Countdown => {
                self.countdown_remaining = (self.countdown_remaining - scale).max(0.0);
                if self.countdown_remaining > 0.0 {
                    return RecoveryStep::Waiting;
                }
                self.stage = RecoveryStage::Teleport;
                self.source_point = Some(player_position);
                RecoveryStep::TeleportStarted {
                    from: player_position,
                    to: self.target_point,
                }
            }
            RecoveryStage::Teleport => {
                self.teleport_elapsed += scale;
                if self.teleport_elapsed >= tuning.recovery_teleport_ticks {
                    RecoveryStep::Finished {
                        position: self.target_point,
                    }
                } else {
                    RecoveryStep::Waiting
                }
            }
        }
    }

    /// Whole seconds left on the countdown (3, 2, 1); 0 once teleporting
    pub fn display_number(&self) -> u32 {
        match self.stage {
            RecoveryStage::Countdown => (self.countdown_remaining / TICKS_PER_SECOND).ceil() as u32,
            RecoveryStage::Teleport => 0,
        }
    }

    /// Teleport completion in [0, 1]
    pub fn teleport_progress(&self, tuning: &ShotTuning) -> f32 {
        match self.stage {
            RecoveryStage::Countdown => 0.0,
            RecoveryStage::Teleport => {
                (self.teleport_elapsed / tuning.recovery_teleport_ticks).clamp(0.0, 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> ShotTuning {
        ShotTuning {
            recovery_countdown_ticks: 3.0,
            recovery_teleport_ticks: 2.0,
            ..ShotTuning::default()
        }
    }

    #[test]
    fn test_countdown_then_teleport_then_finish() {
        let tuning = tuning();
        let start = Vec2::new(400.0, 540.0);
        let player = Vec2::new(650.0, 300.0);
        let mut seq = RecoverySequence::start(start, &tuning);

        assert_eq!(seq.advance(1.0, player, &tuning), RecoveryStep::Waiting);
        assert_eq!(seq.advance(1.0, player, &tuning), RecoveryStep::Waiting);
        assert_eq!(seq.countdown_remaining, 1.0);
        assert_eq!(
            seq.advance(1.0, player, &tuning),
            RecoveryStep::TeleportStarted { from: player, to: start }
        );
        assert_eq!(seq.stage, RecoveryStage::Teleport);
        assert_eq!(seq.source_point, Some(player));

        assert_eq!(seq.advance(1.0, player, &tuning), RecoveryStep::Waiting);
        assert_eq!(
            seq.advance(1.0, player, &tuning),
            RecoveryStep::Finished { position: start }
        );
    }

    #[test]
    fn test_countdown_never_goes_negative() {
        let tuning = tuning();
        let mut seq = RecoverySequence::start(Vec2::ZERO, &tuning);
        seq.advance(4.0, Vec2::ZERO, &tuning);
        assert_eq!(seq.countdown_remaining, 0.0);
        assert_eq!(seq.stage, RecoveryStage::Teleport);
    }

    #[test]
    fn test_display_number_counts_down_in_seconds() {
        let tuning = ShotTuning::default();
        let mut seq = RecoverySequence::start(Vec2::ZERO, &tuning);
        // 90 ticks = 1.5 seconds
        assert_eq!(seq.display_number(), 2);
        for _ in 0..30 {
            seq.advance(1.0, Vec2::ZERO, &tuning);
        }
        assert_eq!(seq.display_number(), 1);
        for _ in 0..60 {
            seq.advance(1.0, Vec2::ZERO, &tuning);
        }
        assert_eq!(seq.display_number(), 0);
        assert_eq!(seq.teleport_progress(&tuning), 0.0);
    }
}

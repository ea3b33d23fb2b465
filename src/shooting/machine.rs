//! Shot state machine: Idle -> Aiming -> Charging -> Flying -> (Idle | Recovering)
//!
//! The machine performs at most one transition per tick. Input edges that do
//! not trigger a transition in the current phase are dropped, and a tick that
//! transitions does not also oscillate.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::projectile::{FlightOutcome, Projectile};
use crate::events::ShotEvent;
use crate::helpers::oscillate;
use crate::recovery::{RecoverySequence, RecoveryStep};
use crate::tuning::ShotTuning;
use crate::world::Arena;

/// Current phase plus the data that only exists in that phase
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ShotPhase {
    #[default]
    Idle,
    Aiming {
        angle: f32,
        direction: f32,
    },
    Charging {
        locked_angle: f32,
        power: f32,
        direction: f32,
    },
    Flying {
        projectile: Projectile,
    },
    Recovering {
        sequence: RecoverySequence,
    },
}

/// Payload-free phase tag for display and scenario checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Aiming,
    Charging,
    Flying,
    Recovering,
}

impl PhaseKind {
    /// Prompt text for the HUD
    pub fn hint(&self) -> &'static str {
        match self {
            PhaseKind::Idle => "Stand in the zone and press SPACE",
            PhaseKind::Aiming => "Release SPACE to lock the angle",
            PhaseKind::Charging => "Press SPACE to shoot",
            PhaseKind::Flying => "",
            PhaseKind::Recovering => "Returning to start...",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::Idle => write!(f, "Idle"),
            PhaseKind::Aiming => write!(f, "Aiming"),
            PhaseKind::Charging => write!(f, "Charging"),
            PhaseKind::Flying => write!(f, "Flying"),
            PhaseKind::Recovering => write!(f, "Recovering"),
        }
    }
}

/// Everything the machine reads in one tick
pub struct ShotContext<'a> {
    /// Frame scale (1.0 = one nominal tick)
    pub scale: f32,
    pub action_pressed: bool,
    pub action_released: bool,
    pub abort: bool,
    pub in_trigger_zone: bool,
    /// Player rectangle center; launch origin and teleport source
    pub player_center: Vec2,
    pub arena: &'a Arena,
    pub tuning: &'a ShotTuning,
}

/// Result of one tick, consumed by the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<ShotEvent>,
    /// Where the host must place the player (after a score or teleport)
    pub position_override: Option<Vec2>,
    /// Host movement must not move the player while set
    pub movement_locked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotMachine {
    phase: ShotPhase,
}

impl ShotMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a captured phase
    pub fn from_phase(phase: ShotPhase) -> Self {
        Self { phase }
    }

    pub fn phase(&self) -> &ShotPhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        match self.phase {
            ShotPhase::Idle => PhaseKind::Idle,
            ShotPhase::Aiming { .. } => PhaseKind::Aiming,
            ShotPhase::Charging { .. } => PhaseKind::Charging,
            ShotPhase::Flying { .. } => PhaseKind::Flying,
            ShotPhase::Recovering { .. } => PhaseKind::Recovering,
        }
    }

    /// Oscillating aim angle, only while Aiming
    pub fn current_angle(&self) -> Option<f32> {
        match self.phase {
            ShotPhase::Aiming { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// Locked angle, only while Charging
    pub fn locked_angle(&self) -> Option<f32> {
        match self.phase {
            ShotPhase::Charging { locked_angle, .. } => Some(locked_angle),
            _ => None,
        }
    }

    /// Oscillating power, only while Charging
    pub fn power(&self) -> Option<f32> {
        match self.phase {
            ShotPhase::Charging { power, .. } => Some(power),
            _ => None,
        }
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        match &self.phase {
            ShotPhase::Flying { projectile } => Some(projectile),
            _ => None,
        }
    }

    pub fn recovery(&self) -> Option<&RecoverySequence> {
        match &self.phase {
            ShotPhase::Recovering { sequence } => Some(sequence),
            _ => None,
        }
    }

    pub fn movement_locked(&self) -> bool {
        matches!(self.phase, ShotPhase::Recovering { .. })
    }

    /// Advance one tick
    pub fn advance(&mut self, ctx: &ShotContext) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let tuning = ctx.tuning;
        let half_arc = tuning.half_arc();

        let next = match &mut self.phase {
            ShotPhase::Idle => {
                if ctx.action_pressed && ctx.in_trigger_zone {
                    outcome.events.push(ShotEvent::AimStarted);
                    Some(ShotPhase::Aiming {
                        angle: -half_arc,
                        direction: 1.0,
                    })
                } else {
                    None
                }
            }
            ShotPhase::Aiming { angle, direction } => {
                if ctx.abort {
                    outcome.events.push(ShotEvent::ShotAborted);
                    Some(ShotPhase::Idle)
                } else if ctx.action_released {
                    outcome.events.push(ShotEvent::AngleLocked { angle: *angle });
                    Some(ShotPhase::Charging {
                        locked_angle: *angle,
                        power: 0.0,
                        direction: 1.0,
                    })
                } else {
                    (*angle, *direction) = oscillate(
                        *angle,
                        *direction,
                        tuning.angle_speed * ctx.scale,
                        -half_arc,
                        half_arc,
                    );
                    None
                }
            }
            ShotPhase::Charging {
                locked_angle,
                power,
                direction,
            } => {
                if ctx.abort {
                    outcome.events.push(ShotEvent::ShotAborted);
                    Some(ShotPhase::Idle)
                } else if ctx.action_pressed {
                    let projectile = Projectile::launch(ctx.player_center, *locked_angle, *power, tuning);
                    outcome.events.push(ShotEvent::Launched {
                        angle: *locked_angle,
                        power: *power,
                        velocity: projectile.velocity,
                    });
                    Some(ShotPhase::Flying { projectile })
                } else {
                    (*power, *direction) =
                        oscillate(*power, *direction, tuning.power_speed * ctx.scale, 0.0, 1.0);
                    None
                }
            }
            ShotPhase::Flying { projectile } => match projectile.advance(ctx.scale, tuning, ctx.arena) {
                FlightOutcome::InFlight => None,
                FlightOutcome::Scored => {
                    outcome.events.push(ShotEvent::Scored {
                        points: tuning.points_per_basket,
                    });
                    outcome.position_override = Some(ctx.arena.start);
                    Some(ShotPhase::Idle)
                }
                FlightOutcome::OutOfBounds => {
                    outcome.events.push(ShotEvent::ShotMissed {
                        exit: projectile.position,
                    });
                    Some(ShotPhase::Recovering {
                        sequence: RecoverySequence::start(ctx.arena.start, tuning),
                    })
                }
            },
            ShotPhase::Recovering { sequence } => {
                match sequence.advance(ctx.scale, ctx.player_center, tuning) {
                    RecoveryStep::Waiting => None,
                    RecoveryStep::TeleportStarted { from, to } => {
                        outcome.events.push(ShotEvent::TeleportStarted { from, to });
                        None
                    }
                    RecoveryStep::Finished { position } => {
                        outcome.events.push(ShotEvent::RecoveryFinished { position });
                        outcome.position_override = Some(position);
                        Some(ShotPhase::Idle)
                    }
                }
            }
        };

        if let Some(phase) = next {
            let from = self.kind();
            self.phase = phase;
            debug!("Shot phase {} -> {}", from, self.kind());
        }
        outcome.movement_locked = self.movement_locked();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rig {
        machine: ShotMachine,
        arena: Arena,
        tuning: ShotTuning,
        player: Vec2,
        in_zone: bool,
    }

    #[derive(Default, Clone, Copy)]
    struct Edges {
        press: bool,
        release: bool,
        abort: bool,
    }

    const PRESS: Edges = Edges {
        press: true,
        release: false,
        abort: false,
    };
    const RELEASE: Edges = Edges {
        press: false,
        release: true,
        abort: false,
    };
    const NONE: Edges = Edges {
        press: false,
        release: false,
        abort: false,
    };

    impl Rig {
        fn new() -> Self {
            Self {
                machine: ShotMachine::new(),
                arena: Arena::default(),
                tuning: ShotTuning::default(),
                player: Vec2::new(400.0, 500.0),
                in_zone: true,
            }
        }

        fn tick(&mut self, edges: Edges) -> TickOutcome {
            let ctx = ShotContext {
                scale: 1.0,
                action_pressed: edges.press,
                action_released: edges.release,
                abort: edges.abort,
                in_trigger_zone: self.in_zone,
                player_center: self.player,
                arena: &self.arena,
                tuning: &self.tuning,
            };
            let outcome = self.machine.advance(&ctx);
            if let Some(position) = outcome.position_override {
                self.player = position;
            }
            outcome
        }

        fn run(&mut self, ticks: usize) -> Vec<ShotEvent> {
            (0..ticks).flat_map(|_| self.tick(NONE).events).collect()
        }
    }

    #[test]
    fn test_press_outside_zone_is_ignored() {
        let mut rig = Rig::new();
        rig.in_zone = false;
        let outcome = rig.tick(PRESS);
        assert!(outcome.events.is_empty());
        assert_eq!(rig.machine.kind(), PhaseKind::Idle);
    }

    #[test]
    fn test_aim_starts_at_negative_extreme() {
        let mut rig = Rig::new();
        assert_eq!(rig.tick(PRESS).events, vec![ShotEvent::AimStarted]);
        assert_eq!(rig.machine.current_angle(), Some(-rig.tuning.half_arc()));
    }

    #[test]
    fn test_angle_stays_in_arc_and_flips_exactly_at_extremes() {
        // Arc 1.5 at 1/32 per tick: 48 ticks from one extreme to the other
        let mut rig = Rig::new();
        rig.tick(PRESS);
        let half = rig.tuning.half_arc();

        for tick in 1..=200 {
            rig.tick(NONE);
            let ShotPhase::Aiming { angle, direction } = *rig.machine.phase() else {
                panic!("left Aiming at tick {}", tick);
            };
            assert!((-half..=half).contains(&angle), "tick {}: {}", tick, angle);
            match tick {
                47 => assert_eq!(direction, 1.0),
                48 => {
                    assert_eq!(angle, half);
                    assert_eq!(direction, -1.0);
                }
                95 => assert_eq!(direction, -1.0),
                96 => {
                    assert_eq!(angle, -half);
                    assert_eq!(direction, 1.0);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_lock_takes_exact_current_angle() {
        let mut rig = Rig::new();
        rig.tick(PRESS);
        rig.run(17);
        let before = rig.machine.current_angle().unwrap();

        let outcome = rig.tick(RELEASE);
        assert_eq!(outcome.events, vec![ShotEvent::AngleLocked { angle: before }]);
        assert_eq!(rig.machine.locked_angle(), Some(before));
        assert_eq!(rig.machine.power(), Some(0.0));
        assert_eq!(rig.machine.current_angle(), None);

        // Locked angle never drifts while power oscillates
        rig.run(150);
        assert_eq!(rig.machine.locked_angle(), Some(before));
    }

    #[test]
    fn test_power_stays_in_unit_interval() {
        let mut rig = Rig::new();
        rig.tick(PRESS);
        rig.tick(RELEASE);
        for tick in 1..=300 {
            rig.tick(NONE);
            let power = rig.machine.power().unwrap();
            assert!((0.0..=1.0).contains(&power), "tick {}: {}", tick, power);
            if tick == 64 {
                assert_eq!(power, 1.0);
            }
            if tick == 128 {
                assert_eq!(power, 0.0);
            }
        }
    }

    #[test]
    fn test_launch_uses_locked_values_and_clears_aim() {
        let mut rig = Rig::new();
        rig.tick(PRESS);
        rig.run(24);
        rig.tick(RELEASE);
        rig.run(32);
        let power = rig.machine.power().unwrap();
        assert_eq!(power, 0.5);

        let outcome = rig.tick(PRESS);
        let projectile = *rig.machine.projectile().unwrap();
        assert_eq!(projectile.position, rig.player);
        assert_eq!(
            outcome.events,
            vec![ShotEvent::Launched {
                angle: 0.0,
                power: 0.5,
                velocity: projectile.velocity,
            }]
        );
        assert_eq!(rig.machine.locked_angle(), None);
        assert_eq!(rig.machine.power(), None);
    }

    #[test]
    fn test_press_while_not_idle_never_alters_aim() {
        let mut rig = Rig::new();
        rig.tick(PRESS);
        rig.run(5);
        let angle = rig.machine.current_angle();
        // A press while aiming is dropped; the tick still oscillates
        let outcome = rig.tick(PRESS);
        assert!(outcome.events.is_empty());
        assert_eq!(rig.machine.kind(), PhaseKind::Aiming);
        assert_ne!(rig.machine.current_angle(), angle);

        rig.tick(RELEASE);
        let locked = rig.machine.locked_angle();
        // A release while charging is dropped
        rig.tick(RELEASE);
        assert_eq!(rig.machine.kind(), PhaseKind::Charging);
        assert_eq!(rig.machine.locked_angle(), locked);

        rig.tick(PRESS);
        assert_eq!(rig.machine.kind(), PhaseKind::Flying);
        let before = rig.machine.clone();
        let outcome = rig.tick(PRESS);
        assert!(outcome.events.is_empty());
        assert_eq!(rig.machine.kind(), PhaseKind::Flying);
        assert_ne!(rig.machine, before, "ball keeps flying");
    }

    #[test]
    fn test_single_edge_per_tick() {
        let mut rig = Rig::new();
        // Press and release in the same tick: only the press transitions
        let outcome = rig.tick(Edges {
            press: true,
            release: true,
            abort: false,
        });
        assert_eq!(outcome.events, vec![ShotEvent::AimStarted]);
        assert_eq!(rig.machine.kind(), PhaseKind::Aiming);
        assert_eq!(rig.machine.current_angle(), Some(-rig.tuning.half_arc()));
    }

    #[test]
    fn test_abort_returns_to_idle() {
        let abort = Edges {
            abort: true,
            ..NONE
        };
        let mut rig = Rig::new();
        rig.tick(PRESS);
        assert_eq!(rig.tick(abort).events, vec![ShotEvent::ShotAborted]);
        assert_eq!(rig.machine.kind(), PhaseKind::Idle);

        rig.tick(PRESS);
        rig.tick(RELEASE);
        assert_eq!(rig.tick(abort).events, vec![ShotEvent::ShotAborted]);
        assert_eq!(rig.machine.kind(), PhaseKind::Idle);

        // Ignored while idle
        assert!(rig.tick(abort).events.is_empty());
    }

    #[test]
    fn test_straight_up_shot_scores_and_resets_player() {
        let mut rig = Rig::new();
        rig.tuning.gravity = 0.5;
        rig.tuning.power_scale = 16.0;
        rig.tuning.launch_lift = 8.0;
        rig.arena.hoop.center = Vec2::new(400.0, 236.0);
        rig.arena.hoop.radius = 20.0;
        rig.arena.walls.clear();

        rig.tick(PRESS);
        rig.run(24);
        rig.tick(RELEASE);
        rig.run(32);
        rig.tick(PRESS);

        let mut scored = Vec::new();
        for tick in 1..=40 {
            let outcome = rig.tick(NONE);
            if outcome.events.contains(&ShotEvent::Scored { points: 2 }) {
                scored.push(tick);
                assert_eq!(outcome.position_override, Some(rig.arena.start));
                assert!(!outcome.movement_locked);
            }
        }
        assert_eq!(scored, vec![33]);
        assert_eq!(rig.machine.kind(), PhaseKind::Idle);
        assert_eq!(rig.player, rig.arena.start);
        assert!(rig.machine.projectile().is_none());
    }

    #[test]
    fn test_miss_runs_recovery_and_locks_movement() {
        let mut rig = Rig::new();
        rig.tuning.recovery_countdown_ticks = 10.0;
        rig.tuning.recovery_teleport_ticks = 5.0;
        rig.player = Vec2::new(700.0, 500.0);

        // Lock at the rightmost angle, launch at full power
        rig.tick(PRESS);
        rig.run(48);
        rig.tick(RELEASE);
        rig.run(64);
        rig.tick(PRESS);

        let mut missed_at = None;
        for tick in 1..=200 {
            let outcome = rig.tick(NONE);
            if let Some(ShotEvent::ShotMissed { exit }) = outcome.events.first() {
                assert!(exit.x > rig.arena.width);
                assert!(outcome.movement_locked);
                missed_at = Some(tick);
                break;
            }
        }
        assert!(missed_at.is_some());
        assert_eq!(rig.machine.kind(), PhaseKind::Recovering);
        assert!(rig.machine.projectile().is_none());

        let held = rig.player;
        let mut events = Vec::new();
        for _ in 0..9 {
            let outcome = rig.tick(NONE);
            assert!(outcome.movement_locked);
            assert_eq!(outcome.position_override, None);
            events.extend(outcome.events);
        }
        assert!(events.is_empty());

        let outcome = rig.tick(NONE);
        assert_eq!(
            outcome.events,
            vec![ShotEvent::TeleportStarted {
                from: held,
                to: rig.arena.start
            }]
        );

        let events = rig.run(4);
        assert!(events.is_empty());
        assert_eq!(rig.machine.kind(), PhaseKind::Recovering);

        let outcome = rig.tick(NONE);
        assert_eq!(
            outcome.events,
            vec![ShotEvent::RecoveryFinished {
                position: rig.arena.start
            }]
        );
        assert!(!outcome.movement_locked);
        assert_eq!(rig.player, rig.arena.start);
        assert_eq!(rig.machine.kind(), PhaseKind::Idle);
    }

    #[test]
    fn test_zero_scale_still_processes_edges() {
        let mut rig = Rig::new();
        let ctx = ShotContext {
            scale: 0.0,
            action_pressed: true,
            action_released: false,
            abort: false,
            in_trigger_zone: true,
            player_center: rig.player,
            arena: &rig.arena,
            tuning: &rig.tuning,
        };
        rig.machine.advance(&ctx);
        assert_eq!(rig.machine.kind(), PhaseKind::Aiming);
        let ctx = ShotContext {
            action_pressed: false,
            ..ctx
        };
        rig.machine.advance(&ctx);
        assert_eq!(rig.machine.current_angle(), Some(-rig.tuning.half_arc()));
    }
}

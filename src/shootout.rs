//! Match context for the shooting core
//!
//! `Shootout` owns the state machine, the trigger zone, the seeded RNG, and
//! the static arena/tuning they read. The host calls `update` once per frame
//! and reads back a `ShootoutView` for drawing.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::constants::NOMINAL_FRAME_SECS;
use crate::events::ShotEvent;
use crate::helpers::{Aabb, frame_scale};
use crate::recovery::RecoverySequence;
use crate::shooting::{PhaseKind, Projectile, ShotContext, ShotMachine, TickOutcome};
use crate::trigger_zone::TriggerZone;
use crate::tuning::ShotTuning;
use crate::world::{Arena, Side};

/// Per-frame input from the host. Edges are true only on the frame they occur.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotInput {
    pub action_pressed: bool,
    pub action_released: bool,
    pub abort: bool,
    pub player_rect: Aabb,
}

impl ShotInput {
    pub fn idle(player_rect: Aabb) -> Self {
        Self {
            player_rect,
            ..Default::default()
        }
    }

    pub fn pressed(player_rect: Aabb) -> Self {
        Self {
            action_pressed: true,
            ..Self::idle(player_rect)
        }
    }

    pub fn released(player_rect: Aabb) -> Self {
        Self {
            action_released: true,
            ..Self::idle(player_rect)
        }
    }
}

/// Read-only state for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ShootoutView {
    pub phase: PhaseKind,
    pub current_angle: Option<f32>,
    pub locked_angle: Option<f32>,
    pub power: Option<f32>,
    pub ball: Option<Vec2>,
    pub zone: Aabb,
    pub zone_side: Side,
    pub recovery: Option<RecoverySequence>,
    pub movement_locked: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct Shootout {
    arena: Arena,
    tuning: ShotTuning,
    machine: ShotMachine,
    zone: TriggerZone,
    rng: StdRng,
    tick: u64,
}

impl Shootout {
    pub fn builder() -> ShootoutBuilder {
        ShootoutBuilder::default()
    }

    /// Advance the match by `dt` seconds.
    /// The machine reads the zone as it stood at the start of the tick; the
    /// zone timer advances afterwards.
    pub fn update(&mut self, dt: f32, input: &ShotInput) -> TickOutcome {
        let scale = frame_scale(dt);
        self.tick += 1;

        let ctx = ShotContext {
            scale,
            action_pressed: input.action_pressed,
            action_released: input.action_released,
            abort: input.abort,
            in_trigger_zone: self.zone.contains_player(&input.player_rect),
            player_center: input.player_rect.center(),
            arena: &self.arena,
            tuning: &self.tuning,
        };
        let mut outcome = self.machine.advance(&ctx);

        if self.zone.advance(scale, &self.arena, &self.tuning, &mut self.rng) {
            debug!("Trigger zone moved to {} at tick {}", self.zone.side, self.tick);
            outcome.events.push(ShotEvent::ZoneMoved { side: self.zone.side });
        }
        outcome
    }

    /// Advance exactly one nominal tick
    pub fn tick(&mut self, input: &ShotInput) -> TickOutcome {
        self.update(NOMINAL_FRAME_SECS, input)
    }

    /// Swap in new tuning (hot reload). Takes effect on the next tick.
    pub fn set_tuning(&mut self, tuning: ShotTuning) {
        self.tuning = tuning;
    }

    /// Resume from captured state
    pub fn restore(&mut self, machine: ShotMachine, zone: TriggerZone, tick: u64) {
        self.machine = machine;
        self.zone = zone;
        self.tick = tick;
    }

    pub fn view(&self) -> ShootoutView {
        ShootoutView {
            phase: self.machine.kind(),
            current_angle: self.machine.current_angle(),
            locked_angle: self.machine.locked_angle(),
            power: self.machine.power(),
            ball: self.machine.projectile().map(|p| p.position),
            zone: self.zone.rect,
            zone_side: self.zone.side,
            recovery: self.machine.recovery().cloned(),
            movement_locked: self.machine.movement_locked(),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn tuning(&self) -> &ShotTuning {
        &self.tuning
    }

    pub fn machine(&self) -> &ShotMachine {
        &self.machine
    }

    pub fn zone(&self) -> &TriggerZone {
        &self.zone
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.machine.projectile()
    }

    pub fn movement_locked(&self) -> bool {
        self.machine.movement_locked()
    }

    /// Ticks processed so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

/// Builds a fully initialized `Shootout`; there is no way to obtain one
/// without an arena, tuning, and zone in place.
#[derive(Debug, Clone)]
pub struct ShootoutBuilder {
    arena: Arena,
    tuning: ShotTuning,
    seed: u64,
    initial_side: Side,
    zone: Option<TriggerZone>,
}

impl Default for ShootoutBuilder {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            tuning: ShotTuning::default(),
            seed: 0,
            initial_side: Side::Left,
            zone: None,
        }
    }
}

impl ShootoutBuilder {
    pub fn with_arena(mut self, arena: Arena) -> Self {
        self.arena = arena;
        self
    }

    pub fn with_tuning(mut self, tuning: ShotTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_initial_side(mut self, side: Side) -> Self {
        self.initial_side = side;
        self
    }

    /// Pin the starting zone instead of placing it randomly
    pub fn with_trigger_zone(mut self, zone: TriggerZone) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn build(self) -> Shootout {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let zone = match self.zone {
            Some(zone) => zone,
            None => TriggerZone::random(self.initial_side, &self.arena, &self.tuning, &mut rng),
        };
        Shootout {
            arena: self.arena,
            tuning: self.tuning,
            machine: ShotMachine::new(),
            zone,
            rng,
            tick: 0,
        }
    }
}

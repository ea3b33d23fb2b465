//! Ball flight: launch velocity, per-tick integration, terminal checks

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tuning::ShotTuning;
use crate::world::Arena;

/// The single ball in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Classification of the ball after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    InFlight,
    Scored,
    OutOfBounds,
}

/// Launch velocity for a locked angle and power.
/// Angle 0 is straight up, positive angles lean right. `launch_lift` is an
/// upward bias added regardless of power so weak shots still arc.
pub fn launch_velocity(angle: f32, power: f32, tuning: &ShotTuning) -> Vec2 {
    let speed = power * tuning.power_scale;
    Vec2::new(
        angle.sin() * speed,
        -(angle.cos() * speed) - tuning.launch_lift,
    )
}

impl Projectile {
    pub fn launch(origin: Vec2, angle: f32, power: f32, tuning: &ShotTuning) -> Self {
        Self {
            position: origin,
            velocity: launch_velocity(angle, power, tuning),
        }
    }

    /// Integrate one (scaled) tick: move, then accelerate downward
    pub fn step(&mut self, scale: f32, gravity: f32) {
        self.position += self.velocity * scale;
        self.velocity.y += gravity * scale;
    }

    pub fn is_descending(&self) -> bool {
        self.velocity.y > 0.0
    }

    /// Scoring is checked before bounds: a ball satisfying both scores
    pub fn classify(&self, arena: &Arena) -> FlightOutcome {
        if self.is_descending() && arena.hoop.accepts(self.position) {
            FlightOutcome::Scored
        } else if arena.is_out_of_bounds(self.position) {
            FlightOutcome::OutOfBounds
        } else {
            FlightOutcome::InFlight
        }
    }

    /// Advance one frame. A frame longer than a nominal tick is split into
    /// equal sub-steps no longer than one tick, classified after each, so a
    /// hitch cannot carry the ball past the hoop.
    pub fn advance(&mut self, scale: f32, tuning: &ShotTuning, arena: &Arena) -> FlightOutcome {
        let steps = scale.ceil().max(1.0) as u32;
        let sub = scale / steps as f32;
        for _ in 0..steps {
            self.step(sub, tuning.gravity);
            let outcome = self.classify(arena);
            if outcome != FlightOutcome::InFlight {
                return outcome;
            }
        }
        FlightOutcome::InFlight
    }
}

/// Fly a shot to completion at the nominal tick rate.
/// Returns the outcome and the number of ticks flown; a shot still airborne
/// after `max_ticks` reports `InFlight`.
pub fn simulate_flight(
    origin: Vec2,
    angle: f32,
    power: f32,
    tuning: &ShotTuning,
    arena: &Arena,
    max_ticks: u32,
) -> (FlightOutcome, u32) {
    let mut ball = Projectile::launch(origin, angle, power, tuning);
    for tick in 1..=max_ticks {
        let outcome = ball.advance(1.0, tuning, arena);
        if outcome != FlightOutcome::InFlight {
            return (outcome, tick);
        }
    }
    (FlightOutcome::InFlight, max_ticks)
}

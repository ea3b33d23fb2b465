//! Trigger zone - the "shoot here" rectangle that hops between field halves

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::helpers::{Aabb, rectangles_overlap};
use crate::tuning::ShotTuning;
use crate::world::{Arena, Side};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerZone {
    pub side: Side,
    pub rect: Aabb,
    /// Ticks since the last flip; never reset by shots
    pub elapsed: f32,
}

impl TriggerZone {
    pub fn new(side: Side, rect: Aabb) -> Self {
        Self {
            side,
            rect,
            elapsed: 0.0,
        }
    }

    /// Zone on `side` at a random spot within that half
    pub fn random(side: Side, arena: &Arena, tuning: &ShotTuning, rng: &mut impl Rng) -> Self {
        Self::new(side, Self::place(side, arena, tuning, rng))
    }

    /// Region the zone's top-left corner may occupy: the half minus `margin`
    /// from the field edges and from the center line.
    pub fn placement_bounds(side: Side, arena: &Arena, tuning: &ShotTuning) -> Aabb {
        let half = arena.half_bounds(side);
        let margin = tuning.zone_margin;
        let min = half.min + Vec2::splat(margin);
        let max = half.max() - Vec2::splat(margin) - Vec2::new(tuning.zone_width, tuning.zone_height);
        Aabb::new(min, (max - min).max(Vec2::ZERO))
    }

    /// Uniform random rectangle within the placement bounds.
    /// A half too small for the zone pins it to the bounds' corner.
    pub fn place(side: Side, arena: &Arena, tuning: &ShotTuning, rng: &mut impl Rng) -> Aabb {
        let bounds = Self::placement_bounds(side, arena, tuning);
        let lo = bounds.min;
        let hi = bounds.max();
        let x = if hi.x > lo.x { rng.gen_range(lo.x..=hi.x) } else { lo.x };
        let y = if hi.y > lo.y { rng.gen_range(lo.y..=hi.y) } else { lo.y };
        Aabb::new(Vec2::new(x, y), Vec2::new(tuning.zone_width, tuning.zone_height))
    }

    /// Advance the flip timer. Returns true if the zone moved this tick.
    pub fn advance(&mut self, scale: f32, arena: &Arena, tuning: &ShotTuning, rng: &mut impl Rng) -> bool {
        self.elapsed += scale;
        if self.elapsed < tuning.zone_interval_ticks {
            return false;
        }
        self.side = self.side.flipped();
        self.rect = Self::place(self.side, arena, tuning, rng);
        self.elapsed = 0.0;
        true
    }

    pub fn contains_player(&self, player: &Aabb) -> bool {
        rectangles_overlap(&self.rect, player)
    }

    /// Ticks until the next flip
    pub fn remaining(&self, tuning: &ShotTuning) -> f32 {
        (tuning.zone_interval_ticks - self.elapsed).max(0.0)
    }
}

//! Defenders - blockers sliding back and forth across three lanes
//!
//! Host-only obstacle. Touching one sends the player back to the start;
//! the shooting core never sees them.

use bevy::prelude::*;

use crate::constants::*;
use crate::helpers::{Aabb, frame_scale, oscillate, rectangles_overlap};
use crate::player::{FieldBody, Player};
use crate::shootout::Shootout;
use crate::world::Arena;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Defender {
    pub rect: Aabb,
    /// Signed pixels per tick
    pub velocity_x: f32,
    pub lane: usize,
}

impl Defender {
    /// Slide one (scaled) tick, reversing at the field edges
    pub fn advance(&mut self, scale: f32, arena: &Arena) {
        let speed = self.velocity_x.abs();
        let (x, direction) = oscillate(
            self.rect.min.x,
            self.velocity_x.signum(),
            speed * scale,
            0.0,
            (arena.width - self.rect.size.x).max(0.0),
        );
        self.rect.min.x = x;
        self.velocity_x = speed * direction;
    }
}

/// One defender per lane, staggered so the lanes don't move in lockstep
pub fn spawn_lanes(arena: &Arena) -> Vec<Defender> {
    DEFENDER_SPEEDS
        .iter()
        .enumerate()
        .map(|(lane, &velocity_x)| {
            let center = Vec2::new(
                arena.width * (lane as f32 + 1.0) / (LANE_COUNT as f32 + 1.0),
                LANE_TOP + lane as f32 * LANE_SPACING,
            );
            Defender {
                rect: Aabb::from_center(center, DEFENDER_SIZE),
                velocity_x,
                lane,
            }
        })
        .collect()
}

/// Index of the first defender touching the player
pub fn first_hit<'a>(defenders: impl IntoIterator<Item = &'a Defender>, player: &Aabb) -> Option<usize> {
    defenders
        .into_iter()
        .position(|defender| rectangles_overlap(&defender.rect, player))
}

pub fn spawn_defenders(mut commands: Commands, game: Res<Shootout>) {
    for defender in spawn_lanes(game.arena()) {
        commands.spawn(defender);
    }
}

/// Slide every defender; a tagged player goes back to the start.
/// A locked (recovering) player belongs to the shootout and is left alone.
pub fn advance_defenders(
    time: Res<Time>,
    game: Res<Shootout>,
    mut defenders: Query<&mut Defender>,
    mut player_query: Query<&mut FieldBody, With<Player>>,
) {
    let scale = frame_scale(time.delta_secs());
    for mut defender in &mut defenders {
        defender.advance(scale, game.arena());
    }

    let Ok(mut body) = player_query.single_mut() else {
        return;
    };
    if game.movement_locked() {
        return;
    }
    if let Some(lane) = first_hit(defenders.iter(), &body.0) {
        info!("Tagged by defender in lane {}", lane);
        body.0 = body.0.with_center(game.arena().start);
    }
}

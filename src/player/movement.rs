//! Host-side player movement. The shooting core only reads the result.

use bevy::prelude::*;

use super::{FieldBody, Player};
use crate::constants::PLAYER_MOVE_SPEED;
use crate::helpers::{Aabb, frame_scale, rectangles_overlap};
use crate::input::ActionInput;
use crate::shootout::Shootout;
use crate::world::Arena;

/// Move the player rectangle one (scaled) tick.
///
/// Each axis moves separately and is undone if it lands in a wall, so the
/// player slides along walls instead of sticking. The result is clamped to
/// the field. A locked player does not move at all.
pub fn step_player(rect: Aabb, move_dir: Vec2, speed: f32, scale: f32, locked: bool, arena: &Arena) -> Aabb {
    if locked || move_dir == Vec2::ZERO {
        return rect;
    }
    let delta = move_dir.clamp_length_max(1.0) * speed * scale;

    let mut moved = rect;
    for axis_delta in [Vec2::new(delta.x, 0.0), Vec2::new(0.0, delta.y)] {
        if axis_delta == Vec2::ZERO {
            continue;
        }
        let candidate = Aabb::new(moved.min + axis_delta, moved.size);
        if !arena.walls.iter().any(|wall| rectangles_overlap(wall, &candidate)) {
            moved = candidate;
        }
    }

    moved.with_center(arena.clamp_center(moved.center(), moved.size))
}

/// Apply held direction to the player unless the shootout has locked movement
pub fn move_player(
    time: Res<Time>,
    input: Res<ActionInput>,
    game: Res<Shootout>,
    mut player_query: Query<&mut FieldBody, With<Player>>,
) {
    let Ok(mut body) = player_query.single_mut() else {
        return;
    };
    body.0 = step_player(
        body.0,
        input.move_dir,
        PLAYER_MOVE_SPEED,
        frame_scale(time.delta_secs()),
        game.movement_locked(),
        game.arena(),
    );
}

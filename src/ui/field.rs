//! Gizmo drawing of the field, zone, ball, aim line, and recovery circles

use bevy::prelude::*;

use crate::constants::*;
use crate::defenders::Defender;
use crate::helpers::Aabb;
use crate::player::{FieldBody, Player};
use crate::shootout::Shootout;
use crate::world::Arena;

const FIELD_LINE: Color = Color::srgb(0.85, 0.85, 0.7);
const ZONE_COLOR: Color = Color::srgb(0.35, 0.8, 0.95);
const PLAYER_COLOR: Color = Color::srgb(0.45, 0.85, 0.3);
const DEFENDER_COLOR: Color = Color::srgb(0.85, 0.3, 0.25);
const BALL_COLOR: Color = Color::srgb(0.95, 0.55, 0.15);
const AIM_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
const AIM_LINE_LENGTH: f32 = 70.0;

/// Field coordinates (top-left origin, +y down) to world (centered, +y up)
pub fn to_world(point: Vec2, arena: &Arena) -> Vec2 {
    Vec2::new(point.x - arena.width / 2.0, arena.height / 2.0 - point.y)
}

fn draw_rect(gizmos: &mut Gizmos, rect: &Aabb, arena: &Arena, color: Color) {
    gizmos.rect_2d(to_world(rect.center(), arena), rect.size, color);
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub fn draw_field(
    mut gizmos: Gizmos,
    game: Res<Shootout>,
    players: Query<&FieldBody, With<Player>>,
    defenders: Query<&Defender>,
) {
    let arena = game.arena();
    let view = game.view();

    draw_rect(&mut gizmos, &arena.bounds(), arena, FIELD_LINE);
    gizmos.line_2d(
        to_world(Vec2::new(arena.width / 2.0, 0.0), arena),
        to_world(Vec2::new(arena.width / 2.0, arena.height), arena),
        FIELD_LINE.with_alpha(0.2),
    );
    for wall in &arena.walls {
        draw_rect(&mut gizmos, wall, arena, FIELD_LINE.with_alpha(0.4));
    }
    gizmos.circle_2d(to_world(arena.hoop.center, arena), arena.hoop.radius, FIELD_LINE);

    draw_rect(&mut gizmos, &view.zone, arena, ZONE_COLOR);

    for defender in &defenders {
        draw_rect(&mut gizmos, &defender.rect, arena, DEFENDER_COLOR);
    }

    let Ok(body) = players.single() else {
        return;
    };
    draw_rect(&mut gizmos, &body.0, arena, PLAYER_COLOR);

    // Aim line: sweeping while aiming, locked and scaled by power while charging
    let aim = view
        .current_angle
        .map(|angle| (angle, 1.0))
        .or(view.locked_angle.zip(view.power).map(|(angle, power)| (angle, 0.3 + power)));
    if let Some((angle, length)) = aim {
        let origin = body.0.center();
        let tip = origin + Vec2::new(angle.sin(), -angle.cos()) * AIM_LINE_LENGTH * length;
        gizmos.line_2d(to_world(origin, arena), to_world(tip, arena), AIM_COLOR);
    }

    if let Some(ball) = view.ball {
        gizmos.circle_2d(to_world(ball, arena), BALL_RADIUS, BALL_COLOR);
    }

    if let Some(recovery) = &view.recovery
        && let Some(source) = recovery.source_point
    {
        let progress = recovery.teleport_progress(game.tuning());
        let radius = PLAYER_SIZE.x * (1.0 - progress).max(0.1);
        gizmos.circle_2d(to_world(source, arena), radius, ZONE_COLOR);
        gizmos.circle_2d(
            to_world(recovery.target_point, arena),
            PLAYER_SIZE.x * progress.max(0.1),
            ZONE_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_world_flips_y_and_centers() {
        let arena = Arena::default();
        assert_eq!(to_world(Vec2::ZERO, &arena), Vec2::new(-400.0, 300.0));
        assert_eq!(to_world(Vec2::new(800.0, 600.0), &arena), Vec2::new(400.0, -300.0));
    }
}

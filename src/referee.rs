//! Referee - feeds the frame's input to the shootout and applies its results
//!
//! The only place the host writes the player position on the core's behalf.

use bevy::prelude::*;

use crate::constants::PLAYER_SIZE;
use crate::events::{EventLogger, ShotEvent};
use crate::helpers::Aabb;
use crate::input::ActionInput;
use crate::player::{FieldBody, Player};
use crate::scoring::Score;
use crate::shootout::{ShotInput, Shootout};

/// Apply one tick's outcome to the player body and the score
pub fn apply_outcome(body: &mut Aabb, score: &mut Score, position_override: Option<Vec2>, events: &[ShotEvent]) {
    if let Some(position) = position_override {
        *body = body.with_center(position);
    }
    for event in events {
        score.record(event);
    }
}

pub fn spawn_player(mut commands: Commands, game: Res<Shootout>) {
    commands.spawn((
        Player,
        FieldBody(Aabb::from_center(game.arena().start, PLAYER_SIZE)),
    ));
}

pub fn drive_shootout(
    time: Res<Time>,
    mut input: ResMut<ActionInput>,
    mut game: ResMut<Shootout>,
    mut score: ResMut<Score>,
    mut logger: ResMut<EventLogger>,
    mut player_query: Query<&mut FieldBody, With<Player>>,
) {
    let Ok(mut body) = player_query.single_mut() else {
        return;
    };
    let (action_pressed, action_released, abort) = input.take_edges();
    let outcome = game.update(
        time.delta_secs(),
        &ShotInput {
            action_pressed,
            action_released,
            abort,
            player_rect: body.0,
        },
    );

    apply_outcome(&mut body.0, &mut score, outcome.position_override, &outcome.events);
    let tick = game.tick_count();
    for event in &outcome.events {
        match event {
            ShotEvent::ZoneMoved { side } => info!("Trigger zone moved to the {} half", side),
            ShotEvent::TeleportStarted { from, to } => {
                info!("Teleporting from ({:.0}, {:.0}) to ({:.0}, {:.0})", from.x, from.y, to.x, to.y)
            }
            _ => {}
        }
        logger.log(tick, event);
    }
}

/// Q quits
pub fn quit_on_key(keyboard: Res<ButtonInput<KeyCode>>, mut app_exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::KeyQ) {
        app_exit.write(AppExit::Success);
    }
}

/// Close the event log with a summary when the app exits
pub fn finish_event_log(
    mut exits: MessageReader<AppExit>,
    game: Res<Shootout>,
    score: Res<Score>,
    mut logger: ResMut<EventLogger>,
) {
    if exits.read().next().is_some() && logger.is_active() {
        logger.end_session(game.tick_count(), &score);
        info!(
            "Session {} ended: {} points, {} made, {} missed",
            logger.session_id(),
            score.points,
            score.baskets,
            score.misses
        );
    }
}

//! HUD components and systems (prompt and score display)

use bevy::prelude::*;

use crate::constants::*;
use crate::recovery::RecoveryStage;
use crate::scoring::Score;
use crate::shooting::PhaseKind;
use crate::shootout::Shootout;

/// Phase prompt / countdown text
#[derive(Component)]
pub struct HintText;

/// Score text component
#[derive(Component)]
pub struct ScoreText;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(TEXT_ACCENT),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        HintText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        ScoreText,
    ));
}

/// Prompt for the current phase; the countdown number while recovering
pub fn hint_for(game: &Shootout) -> String {
    let view = game.view();
    match (view.phase, view.recovery) {
        (PhaseKind::Recovering, Some(recovery)) if recovery.stage == RecoveryStage::Countdown => {
            recovery.display_number().to_string()
        }
        (phase, _) => phase.hint().to_string(),
    }
}

/// Seconds until the trigger zone jumps to the other half
pub fn zone_readout(game: &Shootout) -> String {
    let secs = game.zone().remaining(game.tuning()) * NOMINAL_FRAME_SECS;
    format!("Zone moves in {:.1}s", secs)
}

pub fn update_hud(
    game: Res<Shootout>,
    score: Res<Score>,
    mut hint_query: Query<&mut Text, (With<HintText>, Without<ScoreText>)>,
    mut score_query: Query<&mut Text, (With<ScoreText>, Without<HintText>)>,
) {
    if let Ok(mut text) = hint_query.single_mut() {
        text.0 = hint_for(&game);
    }
    if let Ok(mut text) = score_query.single_mut() {
        text.0 = format!(
            "Score {}  |  {} made, {} missed ({:.0}%)  |  {}",
            score.points,
            score.baskets,
            score.misses,
            score.accuracy() * 100.0,
            zone_readout(&game)
        );
    }
}

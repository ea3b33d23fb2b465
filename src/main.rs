//! Frogball - dodge the defenders, stand in the zone, sink the shot
//!
//! Main entry point: app setup and system registration.

use bevy::prelude::*;
use chrono::Local;
use frogball::{
    ActionInput, ConfigWatcher, EventLogConfig, EventLogger, Score, Shootout, config_watcher,
    constants::*, defenders, input, player, referee, snapshot, tuning, ui,
    world::{Arena, Side},
};

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    // --seed <n> fixes the trigger zone sequence
    let seed = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1).and_then(|s| s.parse::<u64>().ok()));

    // --side left|right picks the half the first zone appears in
    let side = match args.iter().position(|a| a == "--side").and_then(|i| args.get(i + 1)) {
        Some(arg) => arg.parse::<Side>().unwrap_or_else(|e| {
            eprintln!("{}, starting on the left", e);
            Side::Left
        }),
        None => Side::Left,
    };

    let shot_tuning = tuning::load_shot_tuning_or_default();
    let game = Shootout::builder()
        .with_arena(Arena::default())
        .with_tuning(shot_tuning.clone())
        .with_seed(seed.unwrap_or_else(rand::random))
        .with_initial_side(side)
        .build();

    let mut logger = EventLogger::new(EventLogConfig::load_with_args(&args));
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    logger.start_session(&timestamp, seed, &shot_tuning);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: bevy::window::WindowResolution::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32)
                    .with_scale_factor_override(1.0),
                title: "Frogball".into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(DEFAULT_BACKGROUND_COLOR))
        .insert_resource(game)
        .insert_resource(logger)
        .init_resource::<ActionInput>()
        .init_resource::<Score>()
        .init_resource::<ConfigWatcher>()
        .add_systems(
            Startup,
            (
                ui::spawn_camera,
                ui::spawn_hud,
                referee::spawn_player,
                defenders::spawn_defenders,
            ),
        )
        .add_systems(
            Update,
            (
                input::capture_input,
                player::move_player,
                defenders::advance_defenders,
                referee::drive_shootout,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                ui::update_hud,
                ui::draw_field,
                config_watcher::check_config_changes,
                snapshot::snapshot_hotkeys,
                referee::quit_on_key,
            ),
        )
        .add_systems(Last, referee::finish_event_log)
        .run();
}

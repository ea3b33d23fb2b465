//! Frogball - the shooting core of a frog basketball game built with Bevy
//!
//! This crate provides the shot state machine, projectile physics, miss recovery,
//! the moving trigger zone, and the systems that drive them inside a Bevy app.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod events;
pub mod helpers;
pub mod snapshot;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod defenders;
pub mod input;
pub mod player;
pub mod recovery;
pub mod referee;
pub mod scoring;
pub mod shooting;
pub mod shootout;
pub mod trigger_zone;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use defenders::Defender;
pub use events::{EventLogConfig, EventLogger, LogRecord, ShotEvent, read_event_log};
pub use helpers::*;
pub use input::ActionInput;
pub use player::{FieldBody, Player};
pub use recovery::{RecoverySequence, RecoveryStage, RecoveryStep};
pub use scoring::Score;
pub use shooting::{
    FlightOutcome, PhaseKind, Projectile, ShotContext, ShotMachine, ShotPhase, TickOutcome,
    launch_velocity, simulate_flight,
};
pub use shootout::{ShootoutBuilder, ShootoutView, ShotInput, Shootout};
pub use snapshot::ShotSnapshot;
pub use trigger_zone::TriggerZone;
pub use tuning::{SHOT_TUNING_FILE, ShotTuning, load_shot_tuning_from_file, load_shot_tuning_or_default};
pub use world::{Arena, Hoop, Side};

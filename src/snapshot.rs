//! Snapshot system - captures the shot state so a match can be resumed
//!
//! A snapshot holds the machine (phase plus its payload), the trigger zone,
//! and the tick counter. The zone RNG is not captured; restored matches draw
//! fresh zone positions after the next flip.

use bevy::prelude::*;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::shooting::ShotMachine;
use crate::shootout::Shootout;
use crate::trigger_zone::TriggerZone;

/// Directory where snapshots are saved
pub const SNAPSHOT_DIR: &str = "snapshots";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotSnapshot {
    pub taken_at: DateTime<chrono::Local>,
    pub tick: u64,
    pub machine: ShotMachine,
    pub zone: TriggerZone,
}

impl ShotSnapshot {
    pub fn capture(game: &Shootout) -> Self {
        Self {
            taken_at: chrono::Local::now(),
            tick: game.tick_count(),
            machine: game.machine().clone(),
            zone: game.zone().clone(),
        }
    }

    /// Put the captured state back into a match built with the same arena
    /// and tuning
    pub fn restore(&self, game: &mut Shootout) {
        game.restore(self.machine.clone(), self.zone.clone(), self.tick);
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize snapshot: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse snapshot: {}", e))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        fs::write(path, self.to_json()?).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let json =
            fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }

    /// Default file name under `SNAPSHOT_DIR`
    pub fn default_path(&self) -> PathBuf {
        let timestamp = self.taken_at.format("%Y%m%d_%H%M%S_%3f");
        PathBuf::from(SNAPSHOT_DIR).join(format!("{}_tick{}.json", timestamp, self.tick))
    }
}

/// F5 saves a snapshot, F9 restores the newest one saved this run
pub fn snapshot_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut game: ResMut<Shootout>,
    mut last_saved: Local<Option<PathBuf>>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        let snapshot = ShotSnapshot::capture(&game);
        let path = snapshot.default_path();
        match snapshot.save(&path) {
            Ok(()) => {
                info!("Snapshot saved: {}", path.display());
                *last_saved = Some(path);
            }
            Err(e) => warn!("{}", e),
        }
    }

    if keyboard.just_pressed(KeyCode::F9) {
        let Some(path) = last_saved.clone() else {
            info!("No snapshot saved yet");
            return;
        };
        match ShotSnapshot::load(&path) {
            Ok(snapshot) => {
                snapshot.restore(&mut game);
                info!("Snapshot restored: {} (tick {})", path.display(), snapshot.tick);
            }
            Err(e) => warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PLAYER_SIZE;
    use crate::helpers::Aabb;
    use crate::shooting::PhaseKind;
    use crate::shootout::ShotInput;
    use crate::world::Side;

    fn charging_game() -> (Shootout, Aabb) {
        let start = Vec2::new(600.0, 450.0);
        let zone = TriggerZone::new(Side::Right, Aabb::from_center(start, Vec2::new(80.0, 60.0)));
        let mut game = Shootout::builder().with_seed(11).with_trigger_zone(zone).build();
        let player = Aabb::from_center(start, PLAYER_SIZE);
        game.tick(&ShotInput::pressed(player));
        for _ in 0..30 {
            game.tick(&ShotInput::idle(player));
        }
        game.tick(&ShotInput::released(player));
        for _ in 0..20 {
            game.tick(&ShotInput::idle(player));
        }
        (game, player)
    }

    /// Launch, then record the ball path until the shot resolves
    fn finish_shot(game: &mut Shootout, player: Aabb) -> Vec<Vec2> {
        for _ in 0..10 {
            game.tick(&ShotInput::idle(player));
        }
        game.tick(&ShotInput::pressed(player));
        let mut path = Vec::new();
        while let Some(ball) = game.projectile().copied() {
            path.push(ball.position);
            game.tick(&ShotInput::idle(player));
            assert!(path.len() < 1000, "shot never resolved");
        }
        path
    }

    #[test]
    fn test_restored_charging_snapshot_flies_identically() {
        let (mut original, player) = charging_game();
        assert_eq!(original.view().phase, PhaseKind::Charging);

        let json = ShotSnapshot::capture(&original).to_json().unwrap();
        let expected = finish_shot(&mut original, player);

        let (mut resumed, _) = charging_game();
        // Scramble the live state first so only the snapshot can explain the result
        for _ in 0..7 {
            resumed.tick(&ShotInput::idle(player));
        }
        ShotSnapshot::from_json(&json).unwrap().restore(&mut resumed);
        let actual = finish_shot(&mut resumed, player);

        assert!(!expected.is_empty());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let (game, _) = charging_game();
        let snapshot = ShotSnapshot::capture(&game);
        let path = std::env::temp_dir()
            .join(format!("frogball_snap_{}", uuid::Uuid::new_v4()))
            .join("snap.json");
        snapshot.save(&path).unwrap();
        let loaded = ShotSnapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.machine.power(), game.machine().power());
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_garbage_json_is_an_error() {
        assert!(ShotSnapshot::from_json("{ not json").is_err());
    }
}

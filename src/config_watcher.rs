//! Config file auto-reload system
//!
//! Polls the shot tuning file every few seconds and applies it to the running
//! match when modified.

use bevy::prelude::*;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::shootout::Shootout;
use crate::tuning::{SHOT_TUNING_FILE, load_shot_tuning_from_file};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

/// Tracks modification times of config files for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub tuning_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self {
            timer: 0.0,
            tuning_mtime: get_mtime(SHOT_TUNING_FILE),
        }
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime<P: AsRef<Path>>(path: P) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

impl ConfigWatcher {
    /// Record the current mtime; true if it differs from the last one seen
    pub fn tuning_changed(&mut self, path: &Path) -> bool {
        let mtime = get_mtime(path);
        if mtime == self.tuning_mtime {
            return false;
        }
        self.tuning_mtime = mtime;
        true
    }
}

/// Check for config file changes and reload as needed
pub fn check_config_changes(time: Res<Time>, mut watcher: ResMut<ConfigWatcher>, mut game: ResMut<Shootout>) {
    watcher.timer += time.delta_secs();

    if watcher.timer < CHECK_INTERVAL {
        return;
    }
    watcher.timer = 0.0;

    if !watcher.tuning_changed(Path::new(SHOT_TUNING_FILE)) {
        return;
    }

    // A broken edit keeps the tuning already in play
    match load_shot_tuning_from_file(SHOT_TUNING_FILE) {
        Ok(tuning) => {
            game.set_tuning(tuning);
            info!("Auto-reloaded shot tuning from {}", SHOT_TUNING_FILE);
        }
        Err(e) => warn!("Ignoring {} change: {}", SHOT_TUNING_FILE, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_file_change_once() {
        let dir = std::env::temp_dir().join(format!("frogball_watch_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shot_tuning.json");

        let mut watcher = ConfigWatcher {
            timer: 0.0,
            tuning_mtime: get_mtime(&path),
        };
        assert!(!watcher.tuning_changed(&path));

        fs::write(&path, "{}").unwrap();
        assert!(watcher.tuning_changed(&path));
        assert!(!watcher.tuning_changed(&path));

        let _ = fs::remove_dir_all(dir);
    }
}

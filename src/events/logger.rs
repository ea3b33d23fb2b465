//! Event logger for shot sessions
//!
//! Writes one JSON record per line: a session header, every shot event with
//! its tick, and a closing summary.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::types::{LogRecord, ShotEvent};
use crate::scoring::Score;
use crate::tuning::ShotTuning;

pub const EVENT_LOG_SETTINGS_FILE: &str = "config/event_log.json";

/// Configuration for event logging
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: false,
        }
    }
}

impl EventLogConfig {
    pub fn load() -> Self {
        let path = Path::new(EVENT_LOG_SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Failed to parse {}: {}, logging disabled", EVENT_LOG_SETTINGS_FILE, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn enabled_from_args(args: &[String]) -> bool {
        args.iter().any(|arg| arg == "--event-log")
    }

    pub fn load_with_args(args: &[String]) -> Self {
        let mut config = Self::load();
        if Self::enabled_from_args(args) {
            config.enabled = true;
        }
        config
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    path: Option<PathBuf>,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            path: None,
            config,
        }
    }

    /// Start a new log session with a fresh UUID and write the header record
    pub fn start_session(&mut self, timestamp: &str, seed: Option<u64>, tuning: &ShotTuning) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();

        if let Err(e) = fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!("Event logging started: {} (session: {})", path.display(), &self.session_id[..8]);
                self.path = Some(path);
                self.write_record(&LogRecord::SessionStart {
                    session_id: self.session_id.clone(),
                    timestamp: timestamp.to_string(),
                    seed,
                    tuning: tuning.clone(),
                });
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    /// Log a shot event
    pub fn log(&mut self, tick: u64, event: &ShotEvent) {
        if self.writer.is_none() {
            return;
        }
        self.write_record(&LogRecord::Shot {
            tick,
            code: event.type_code().to_string(),
            event: event.clone(),
        });
    }

    /// Write the summary record and flush
    pub fn end_session(&mut self, tick: u64, score: &Score) {
        if self.writer.is_none() {
            return;
        }
        self.write_record(&LogRecord::SessionEnd {
            tick,
            points: score.points,
            baskets: score.baskets,
            misses: score.misses,
        });
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Path of the current (or last) log file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    fn write_record(&mut self, record: &LogRecord) {
        let Some(writer) = &mut self.writer else {
            return;
        };
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize event record: {}", e);
                return;
            }
        };
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write event: {}", e);
        }
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

/// Read every record from an event log file
pub fn read_event_log<P: AsRef<Path>>(path: P) -> Result<Vec<LogRecord>, String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| format!("{}:{}: {}", path.display(), i + 1, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let mut logger = EventLogger::default();
        logger.start_session("20260101_000000", Some(1), &ShotTuning::default());
        assert!(!logger.is_active());
        logger.log(1, &ShotEvent::AimStarted);
        assert!(logger.path().is_none());
    }

    #[test]
    fn test_session_round_trip() {
        let log_dir = std::env::temp_dir().join(format!("frogball_log_{}", Uuid::new_v4()));
        let mut logger = EventLogger::new(EventLogConfig {
            log_dir: log_dir.clone(),
            enabled: true,
        });
        logger.start_session("20260101_000000", Some(7), &ShotTuning::default());
        assert!(logger.is_active());
        logger.log(3, &ShotEvent::AimStarted);
        logger.log(40, &ShotEvent::Scored { points: 2 });
        let score = Score {
            points: 2,
            baskets: 1,
            misses: 0,
        };
        logger.end_session(41, &score);
        assert!(!logger.is_active());

        let path = logger.path().map(Path::to_path_buf).unwrap();
        let records = read_event_log(&path).unwrap();
        assert_eq!(records.len(), 4);
        assert!(matches!(records[0], LogRecord::SessionStart { seed: Some(7), .. }));
        assert!(matches!(
            records[2],
            LogRecord::Shot { tick: 40, event: ShotEvent::Scored { points: 2 }, .. }
        ));
        assert!(matches!(records[3], LogRecord::SessionEnd { baskets: 1, .. }));

        let _ = fs::remove_dir_all(log_dir);
    }

    #[test]
    fn test_args_enable_logging() {
        let args = vec!["frogball".to_string(), "--event-log".to_string()];
        assert!(EventLogConfig::enabled_from_args(&args));
        assert!(!EventLogConfig::enabled_from_args(&args[..1]));
    }
}

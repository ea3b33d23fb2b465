//! Shot events and the session event log
//!
//! The shooting core returns a typed event list from every update; the host
//! consumes it synchronously and may append it to a JSON-lines log.

mod logger;
mod types;

pub use logger::{EVENT_LOG_SETTINGS_FILE, EventLogConfig, EventLogger, read_event_log};
pub use types::{LogRecord, ShotEvent};

//! Subscriber setup for the timecard binary.
//!
//! Logs default to stderr so stdout stays clean for report output. With
//! `log_to_file` set, a non-blocking daily-rolling appender writes under
//! `~/.timecard/logs/`; the returned guard must be held for the process
//! lifetime so buffered lines flush on exit.

use std::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub fn init(log_to_file: bool) -> Option<WorkerGuard> {
    let debug_enabled = env::var("TIMECARD_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if log_to_file {
        if let Some(dir) = crate::config::timecard_dir().map(|d| d.join("logs")) {
            if fs_err::create_dir_all(&dir).is_ok() {
                let appender = tracing_appender::rolling::daily(&dir, "timecard.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .init();
                return Some(guard);
            }
        }
        // Fall through to stderr if the log directory can't be created.
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    None
}

use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const RING_CAPACITY: usize = 500;
const LOG_RETENTION_DAYS: u64 = 7;

/// Log severity (mirrors tracing levels for display use).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// A formatted log line held for in-app display.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub severity: Severity,
    pub target: String,
    pub message: String,
}

/// Shared ring buffer of recent log lines consumed by the demo HUD.
pub type LogRing = Arc<Mutex<VecDeque<LogLine>>>;

/// Create an empty shared log ring.
pub fn new_log_ring() -> LogRing {
    Arc::new(Mutex::new(VecDeque::with_capacity(RING_CAPACITY)))
}

/// Return the log directory.
///
/// Precedence: `FLICK_LOG_DIR` env var > platform default.
/// macOS: `~/Library/Logs/flick/`
/// elsewhere: `$XDG_DATA_HOME/flick/logs/` or `~/.local/share/flick/logs/`
pub fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FLICK_LOG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return home.join("Library").join("Logs").join("flick");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        if let Some(data) = dirs::data_dir() {
            return data.join("flick").join("logs");
        }
    }

    PathBuf::from("logs")
}

/// Remove flick log files older than `max_age_days` from `log_path`.
///
/// Only touches files whose name starts with `flick.log` (the rolling
/// appender's prefix), so a shared directory is safe.
fn sweep_old_logs(log_path: &std::path::Path, max_age_days: u64) {
    let cutoff =
        std::time::SystemTime::now() - std::time::Duration::from_secs(max_age_days * 86400);
    let Ok(entries) = std::fs::read_dir(log_path) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with("flick.log") {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|m| m.modified())
            .map(|modified| modified < cutoff)
            .unwrap_or(false);
        if stale {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// A tracing layer that pushes formatted lines into the shared ring.
struct RingLayer {
    ring: LogRing,
}

impl<S: tracing::Subscriber> Layer<S> for RingLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let severity = match *event.metadata().level() {
            tracing::Level::TRACE => Severity::Trace,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::ERROR => Severity::Error,
        };

        let mut collector = LineCollector::default();
        event.record(&mut collector);

        let line = LogLine {
            severity,
            target: event.metadata().target().to_string(),
            message: collector.into_message(),
        };

        if let Ok(mut ring) = self.ring.lock() {
            if ring.len() >= RING_CAPACITY {
                ring.pop_front();
            }
            ring.push_back(line);
        }
    }
}

/// Collects the `message` field plus any structured fields into one line.
#[derive(Default)]
struct LineCollector {
    message: Option<String>,
    fields: Vec<String>,
}

impl LineCollector {
    fn into_message(self) -> String {
        match (self.message, self.fields.is_empty()) {
            (Some(msg), true) => msg,
            (Some(msg), false) => format!("{} {}", msg, self.fields.join(" ")),
            (None, true) => String::new(),
            (None, false) => self.fields.join(" "),
        }
    }
}

impl tracing::field::Visit for LineCollector {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Initialize the logging subsystem. Returns the shared log ring.
///
/// Filter controlled by `FLICK_LOG` or `RUST_LOG` (default: `info`).
/// File output: daily rotation under [`log_dir`], 7-day retention.
pub fn init() -> LogRing {
    let ring = new_log_ring();

    let filter = EnvFilter::try_from_env("FLICK_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = log_dir();
    if let Err(e) = std::fs::create_dir_all(&log_path) {
        eprintln!(
            "warning: failed to create log directory {:?}: {}",
            log_path, e
        );
    }

    sweep_old_logs(&log_path, LOG_RETENTION_DAYS);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(rolling::daily(&log_path, "flick.log"))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(RingLayer { ring: ring.clone() })
        .init();

    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    // Serialize env-mutating tests to avoid data races.
    static ENV_LOCK: StdMutex<()> = StdMutex::new(());

    #[test]
    fn log_dir_respects_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("FLICK_LOG_DIR").ok();

        unsafe { std::env::set_var("FLICK_LOG_DIR", "/tmp/flick-test-logs") };
        assert_eq!(log_dir(), PathBuf::from("/tmp/flick-test-logs"));

        match original {
            Some(v) => unsafe { std::env::set_var("FLICK_LOG_DIR", v) },
            None => unsafe { std::env::remove_var("FLICK_LOG_DIR") },
        }
    }

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Trace), "TRACE");
        assert_eq!(format!("{}", Severity::Info), "INFO");
        assert_eq!(format!("{}", Severity::Error), "ERROR");
    }

    #[test]
    fn collector_message_only() {
        let c = LineCollector {
            message: Some("hello".into()),
            fields: Vec::new(),
        };
        assert_eq!(c.into_message(), "hello");
    }

    #[test]
    fn collector_appends_fields() {
        let c = LineCollector {
            message: Some("hello".into()),
            fields: vec!["clip=walk".into()],
        };
        let line = c.into_message();
        assert!(line.contains("hello"));
        assert!(line.contains("clip=walk"));
    }

    #[test]
    fn collector_fields_without_message() {
        let c = LineCollector {
            message: None,
            fields: vec!["a=1".into(), "b=2".into()],
        };
        assert_eq!(c.into_message(), "a=1 b=2");
    }

    #[test]
    fn sweep_removes_only_stale_flick_logs() {
        let tmp = std::env::temp_dir().join("flick-test-sweep");
        let _ = std::fs::create_dir_all(&tmp);

        let stale = tmp.join("flick.log.2025-01-01");
        let other = tmp.join("notes.txt");
        std::fs::write(&stale, "a").unwrap();
        std::fs::write(&other, "b").unwrap();

        // max_age_days=0 puts the cutoff at "now", so all matching files go
        sweep_old_logs(&tmp, 0);
        assert!(!stale.exists(), "flick log file should be deleted");
        assert!(other.exists(), "unrelated file should be preserved");

        let _ = std::fs::remove_dir_all(&tmp);
    }
}

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Minimal stderr logger behind the `log` facade.
pub struct Logger {
    severity: Level,
    enable_colors: bool,
}

impl Logger {
    pub fn new(severity: Level, enable_colors: bool) -> Self {
        Logger {
            severity,
            enable_colors,
        }
    }

    /// Get current timestamp as string
    fn get_timestamp() -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        let secs = now.as_secs();
        let hours = (secs / 3600) % 24;
        let minutes = (secs / 60) % 60;
        let seconds = secs % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    /// Get color code for log level
    fn get_color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[36m",
            Level::Debug => "\x1b[35m",
            Level::Trace => "\x1b[37m",
        }
    }

    /// Initialize logger with environment variables
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("QUILL_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::Info);

        let enable_colors = std::env::var("NO_COLOR").is_err();

        let logger = Logger::new(severity, enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::get_timestamp();
        let level_str = record.level().as_str();
        let args = record.args();

        let formatted_message = if self.enable_colors {
            let color = Self::get_color(record.level());
            format!("{color}[{timestamp}] {level_str}\x1b[0m {args}\n")
        } else {
            format!("[{timestamp}] {level_str} {args}\n")
        };

        let _ = std::io::stderr().write_all(formatted_message.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

//! Logging facade shared by every layer.
//!
//! The domain only sees the [`Logger`] and [`TimeProvider`] traits; the
//! browser implementations are installed once at start-up. Until then
//! entries go nowhere and timestamps come from a counter, which is what
//! native tests run with.

use derive_more::Display;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer that emitted the entry, with a short subsystem tag
#[derive(Debug, Clone, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

pub trait Logger: Send + Sync {
    /// Checked before the message is formatted
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(&self, entry: LogEntry);
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the global logger. Only the first call wins.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Install the global time provider. Only the first call wins.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER.get().map(|logger| logger.as_ref()).unwrap_or(&NoOpLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER.get().map(|provider| provider.as_ref()).unwrap_or(&CounterTimeProvider)
}

/// Entry point of the `log_*!` macros: stamps and forwards the message if the
/// installed logger accepts `level`.
pub fn emit(level: LogLevel, component: LogComponent, message: fmt::Arguments<'_>) {
    let logger = get_logger();
    if !logger.enabled(level) {
        return;
    }
    logger.log(LogEntry {
        timestamp: get_time_provider().current_timestamp(),
        level,
        component,
        message: message.to_string(),
    });
}

struct NoOpLogger;

impl Logger for NoOpLogger {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _entry: LogEntry) {}
}

struct CounterTimeProvider;

impl TimeProvider for CounterTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{timestamp:06}")
    }
}

/// Debug entries exist only in debug builds
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::emit($crate::domain::logging::LogLevel::Debug, $component, format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Info, $component, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Warn, $component, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit($crate::domain::logging::LogLevel::Error, $component, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    /// Records entries at warn level and above
    struct CaptureLogger;

    impl Logger for CaptureLogger {
        fn enabled(&self, level: LogLevel) -> bool {
            level >= LogLevel::Warn
        }

        fn log(&self, entry: LogEntry) {
            CAPTURED.lock().unwrap().push(format!("{} {} {}", entry.level, entry.component, entry.message));
        }
    }

    #[test]
    fn component_display_carries_layer_prefix() {
        assert_eq!(LogComponent::Domain("Filter").to_string(), "DOM:Filter");
        assert_eq!(LogComponent::Presentation("Tooltip").to_string(), "PRE:Tooltip");
    }

    #[test]
    fn macros_respect_the_installed_level() {
        init_logger(Box::new(CaptureLogger));

        crate::log_info!(LogComponent::Domain("LevelCheck"), "dropped {}", 1);
        crate::log_warn!(LogComponent::Domain("LevelCheck"), "kept {}", 2);
        crate::log_error!(LogComponent::Domain("LevelCheck"), "kept {}", 3);

        let captured = CAPTURED.lock().unwrap();
        let ours: Vec<_> = captured.iter().filter(|line| line.contains("DOM:LevelCheck")).collect();
        assert_eq!(ours, [" WARN DOM:LevelCheck kept 2", "ERROR DOM:LevelCheck kept 3"]);
    }
}

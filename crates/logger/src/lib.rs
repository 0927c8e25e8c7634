mod config;
mod diagnostic;
mod level;
mod logger;
mod logger_macro;
mod msg_fmt;
mod record;
pub mod targets;
mod writer;

pub use config::{ColorMode, ConfigError, LoggerConfig, COLORS_ENV, LEVEL_ENV};
pub use error_handler::{Condition, Signal, SignalKind};
pub use level::{LogLevel, ParseLevelError};
pub use logger::{Logger, SinkBinding};
pub use msg_fmt::{Formatter, RawFormatter, TextFormatter};
pub use record::{Location, LogRecord, RecordHeader};
pub use targets::Sink;
pub use writer::{DeliveryStats, Dispatcher, Rejected, Target};

use std::fmt::Display;
use std::io::Write;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

static LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    let config = LoggerConfig::from_env().unwrap_or_else(|err| {
        let _ = writeln!(std::io::stderr(), "logger: {err}, using defaults");
        LoggerConfig::default()
    });
    Logger::new(config)
});

/// The process-wide logger, created on first use.
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// Keeps the process-wide logger's worker alive; dropping it delivers every
/// queued record and stops the worker.
///
/// Statics are never dropped, so without a guard records still queued when
/// `main` returns are lost. Hold it in `main`:
///
/// ```no_run
/// fn main() -> Result<(), logger::Signal> {
///     let _guard = logger::init();
///     logger::info!("starting");
///     logger::error("fatal")
/// }
/// ```
#[must_use = "dropping the guard immediately stops the logger worker"]
#[derive(Debug)]
pub struct LoggerGuard {
    _private: (),
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        LOGGER.shutdown();
    }
}

/// Creates the process-wide logger now and returns the guard that drains it
/// at teardown.
pub fn init() -> LoggerGuard {
    LazyLock::force(&LOGGER);
    LoggerGuard { _private: () }
}

pub fn message(level: LogLevel, location: Option<Location>, text: impl Display) {
    LOGGER.message(level, location, text);
}

pub fn print(text: impl Display) {
    LOGGER.print(text);
}

pub fn set_loglevel(level: LogLevel) {
    LOGGER.set_loglevel(level);
}

pub fn get_loglevel() -> LogLevel {
    LOGGER.get_loglevel()
}

pub fn redirect_stdout(sink: Arc<dyn Sink>) {
    LOGGER.redirect_stdout(sink);
}

pub fn redirect_stderr(sink: Arc<dyn Sink>) {
    LOGGER.redirect_stderr(sink);
}

pub fn init_default_sink() {
    LOGGER.init_default_sink();
}

pub fn error<T>(text: impl Display) -> Result<T, Signal> {
    LOGGER.error(text)
}

pub fn error_as<T>(kind: SignalKind, text: impl Display) -> Result<T, Signal> {
    LOGGER.error_as(kind, text)
}

pub fn require(condition: impl Condition, text: impl Display) -> Result<(), Signal> {
    LOGGER.require(condition, text)
}

pub fn require_as(kind: SignalKind, condition: impl Condition, text: impl Display) -> Result<(), Signal> {
    LOGGER.require_as(kind, condition, text)
}

pub fn flush() {
    LOGGER.flush();
}

pub fn flush_timeout(timeout: Duration) -> bool {
    LOGGER.flush_timeout(timeout)
}

/// Delivers everything queued on the process-wide logger and stops its
/// worker. Dropping the [`LoggerGuard`] from [`init`] does the same.
pub fn shutdown() {
    LOGGER.shutdown();
}

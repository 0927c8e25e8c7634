use std::fmt::Display;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::{ColorMode, LoggerConfig};
use crate::msg_fmt::{Formatter, TextFormatter};
use crate::targets::{Sink, StderrSink, StdoutSink};
use crate::writer::{DeliveryStats, Dispatcher, Target};
use crate::{Location, LogLevel, LogRecord};

/// Where the two output streams currently point.
#[derive(Debug, Clone)]
pub struct SinkBinding {
    pub stdout: Target,
    pub stderr: Target,
}

impl SinkBinding {
    fn defaults(colors: ColorMode) -> Self {
        SinkBinding {
            stdout: default_target(Arc::new(StdoutSink), colors),
            stderr: default_target(Arc::new(StderrSink), colors),
        }
    }

    /// Whether both streams point at the same sinks as `other`.
    pub fn same_sinks(&self, other: &SinkBinding) -> bool {
        self.stdout.is_sink(other.stdout.sink()) && self.stderr.is_sink(other.stderr.sink())
    }

    fn for_level(&self, level: LogLevel) -> &Target {
        if level.is_error_class() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

fn default_target(sink: Arc<dyn Sink>, colors: ColorMode) -> Target {
    let formatter = TextFormatter::new(colors.enabled_for(sink.as_ref()));
    Target::new(sink, Arc::new(formatter))
}

struct Routing {
    binding: SinkBinding,
    next_sequence: u64,
}

/// Leveled router in front of an asynchronous [`Dispatcher`].
///
/// Routing is resolved when a message is logged: the record is paired with
/// the target bound at that moment, so redirecting later never moves records
/// that are already queued. Sequence assignment and enqueueing happen in the
/// same critical section as target resolution, which makes delivery order a
/// single global FIFO across all producer threads. After
/// [`shutdown`](Self::shutdown) records are written by the calling thread
/// once the routing lock is released, so a sink may log from inside `write`.
pub struct Logger {
    severity_level: AtomicU8,
    colors: ColorMode,
    defaults: SinkBinding,
    routing: Mutex<Routing>,
    dispatcher: Dispatcher,
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(LoggerConfig::default())
    }
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        let defaults = SinkBinding::defaults(config.colors);
        Logger {
            severity_level: AtomicU8::new(config.level.as_u8()),
            colors: config.colors,
            routing: Mutex::new(Routing {
                binding: defaults.clone(),
                next_sequence: 0,
            }),
            defaults,
            dispatcher: Dispatcher::new(&config.worker_name),
        }
    }

    fn routing(&self) -> MutexGuard<'_, Routing> {
        self.routing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_loglevel(&self, level: LogLevel) {
        self.severity_level.store(level.as_u8(), Ordering::Release);
    }

    pub fn get_loglevel(&self) -> LogLevel {
        LogLevel::from_u8(self.severity_level.load(Ordering::Acquire)).unwrap_or(LogLevel::Info)
    }

    /// Whether a `level` message would currently be delivered.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.passes(self.get_loglevel())
    }

    pub fn redirect_stdout(&self, sink: Arc<dyn Sink>) {
        let formatter = self.formatter_for(sink.as_ref());
        self.redirect_stdout_with(sink, formatter);
    }

    pub fn redirect_stderr(&self, sink: Arc<dyn Sink>) {
        let formatter = self.formatter_for(sink.as_ref());
        self.redirect_stderr_with(sink, formatter);
    }

    pub fn redirect_stdout_with(&self, sink: Arc<dyn Sink>, formatter: Arc<dyn Formatter>) {
        self.routing().binding.stdout = Target::new(sink, formatter);
    }

    pub fn redirect_stderr_with(&self, sink: Arc<dyn Sink>, formatter: Arc<dyn Formatter>) {
        self.routing().binding.stderr = Target::new(sink, formatter);
    }

    /// Points both streams back at the process stdout and stderr.
    pub fn init_default_sink(&self) {
        self.routing().binding = self.defaults.clone();
    }

    pub fn binding(&self) -> SinkBinding {
        self.routing().binding.clone()
    }

    /// The process stdout and stderr targets this logger started with.
    pub fn default_binding(&self) -> &SinkBinding {
        &self.defaults
    }

    fn formatter_for(&self, sink: &dyn Sink) -> Arc<dyn Formatter> {
        Arc::new(TextFormatter::new(self.colors.enabled_for(sink)))
    }

    /// Routes one message. Below-threshold calls return before the text is
    /// rendered.
    pub fn message(&self, level: LogLevel, location: Option<Location>, text: impl Display) {
        if !self.enabled(level) {
            return;
        }
        let text = text.to_string();

        let queued = {
            let mut routing = self.routing();
            let target = routing.binding.for_level(level).clone();
            let record = LogRecord::new(level, location, text, routing.next_sequence);
            routing.next_sequence += 1;
            self.dispatcher.try_enqueue(record, target)
        };
        // Stopped dispatcher: write here, without holding the routing lock.
        if let Err(rejected) = queued {
            self.dispatcher.deliver_inline(rejected);
        }
    }

    /// Always delivered to the stdout sink, verbatim, whatever the threshold.
    pub fn print(&self, text: impl Display) {
        self.message(LogLevel::MessageOnly, None, text);
    }

    /// Waits until everything logged before this call reached its sink.
    pub fn flush(&self) {
        self.dispatcher.drain();
    }

    pub fn flush_timeout(&self, timeout: Duration) -> bool {
        self.dispatcher.drain_timeout(timeout)
    }

    /// Delivers pending records and stops the worker; later messages are
    /// written synchronously.
    pub fn shutdown(&self) {
        self.dispatcher.shutdown();
    }

    pub fn stats(&self) -> DeliveryStats {
        self.dispatcher.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg_fmt::RawFormatter;
    use crate::targets::MemorySink;

    fn quiet_logger(level: LogLevel) -> Logger {
        Logger::new(LoggerConfig::default().with_level(level).with_colors(ColorMode::Never))
    }

    #[test]
    fn test_logger_creation() {
        let logger = quiet_logger(LogLevel::Warn);
        assert_eq!(logger.get_loglevel(), LogLevel::Warn);
        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::MessageOnly));
        assert_eq!(logger.stats(), DeliveryStats::default());
    }

    #[test]
    fn test_update_severity_level() {
        let logger = quiet_logger(LogLevel::Info);
        logger.set_loglevel(LogLevel::Trace);
        assert_eq!(logger.get_loglevel(), LogLevel::Trace);
        assert!(logger.enabled(LogLevel::Trace));
    }

    #[test]
    fn below_threshold_never_renders_text() {
        struct Explodes;
        impl Display for Explodes {
            fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                panic!("rendered a filtered message");
            }
        }

        let logger = quiet_logger(LogLevel::Error);
        logger.message(LogLevel::Warn, None, Explodes);
        assert_eq!(logger.stats().enqueued, 0);
    }

    #[test]
    fn sequences_increase_per_routed_record() {
        let logger = quiet_logger(LogLevel::Trace);
        let memory = Arc::new(MemorySink::new());

        struct SequenceFormatter;
        impl Formatter for SequenceFormatter {
            fn format(&self, record: &LogRecord, out: &mut Vec<u8>) {
                out.extend_from_slice(format!("{} ", record.sequence()).as_bytes());
            }
        }

        logger.redirect_stdout_with(memory.clone(), Arc::new(SequenceFormatter));
        logger.message(LogLevel::Trace, None, "dropped? no");
        logger.set_loglevel(LogLevel::Info);
        logger.message(LogLevel::Debug, None, "filtered");
        logger.message(LogLevel::Info, None, "kept");
        logger.print("kept");
        logger.flush();

        assert_eq!(memory.contents_string(), "0 1 2 ");
    }

    #[test]
    fn binding_tracks_redirects() {
        let logger = quiet_logger(LogLevel::Info);
        let memory: Arc<dyn Sink> = Arc::new(MemorySink::new());

        logger.redirect_stderr_with(memory.clone(), Arc::new(RawFormatter));
        assert!(logger.binding().stderr.is_sink(&memory));
        assert!(!logger.binding().stdout.is_sink(&memory));

        assert!(!logger.binding().same_sinks(logger.default_binding()));

        logger.init_default_sink();
        assert!(!logger.binding().stderr.is_sink(&memory));
        assert!(logger.binding().same_sinks(logger.default_binding()));
    }

    #[test]
    fn defaults_write_to_the_process_streams() {
        use std::io::IsTerminal;

        let logger = quiet_logger(LogLevel::Info);
        let defaults = logger.default_binding();
        assert_eq!(defaults.stdout.sink().is_terminal(), std::io::stdout().is_terminal());
        assert_eq!(defaults.stderr.sink().is_terminal(), std::io::stderr().is_terminal());
        assert!(logger.binding().same_sinks(defaults));
    }
}

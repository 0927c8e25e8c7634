#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use logger::targets::MemorySink;
use logger::{ColorMode, LogLevel, LogRecord, Logger, LoggerConfig, Sink, Formatter};

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub fn test_logger(level: LogLevel) -> Logger {
    Logger::new(
        LoggerConfig::default()
            .with_level(level)
            .with_colors(ColorMode::Never)
            .with_worker_name("test-logger-worker"),
    )
}

/// Forwards every write through a channel so tests can wait on delivery.
pub struct MockSink {
    sender: Sender<Vec<u8>>,
}

impl MockSink {
    pub fn new() -> (Arc<Self>, Receiver<Vec<u8>>) {
        let (sender, receiver) = unbounded();
        (Arc::new(MockSink { sender }), receiver)
    }
}

impl Sink for MockSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let _ = self.sender.send(bytes.to_vec());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Blocks the worker inside `write` until the gate is opened.
pub struct GateSink {
    entered: Sender<()>,
    gate: Receiver<()>,
}

pub struct Gate {
    pub entered: Receiver<()>,
    open: Sender<()>,
}

impl Gate {
    pub fn open(&self) {
        let _ = self.open.send(());
    }
}

impl GateSink {
    pub fn new() -> (Arc<Self>, Gate) {
        let (entered_tx, entered_rx) = bounded(1);
        let (open_tx, open_rx) = bounded(1);
        let sink = GateSink {
            entered: entered_tx,
            gate: open_rx,
        };
        (Arc::new(sink), Gate { entered: entered_rx, open: open_tx })
    }
}

impl Sink for GateSink {
    fn write(&self, _bytes: &[u8]) -> io::Result<()> {
        let _ = self.entered.send(());
        let _ = self.gate.recv();
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Logs one `echo` line through its own logger from inside the first `write`.
pub struct EchoSink {
    logger: Weak<Logger>,
    echoed: AtomicBool,
    pub memory: MemorySink,
}

impl EchoSink {
    pub fn new(logger: &Arc<Logger>) -> Arc<Self> {
        Arc::new(EchoSink {
            logger: Arc::downgrade(logger),
            echoed: AtomicBool::new(false),
            memory: MemorySink::new(),
        })
    }
}

impl Sink for EchoSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        self.memory.write(bytes)?;
        if !self.echoed.swap(true, Ordering::SeqCst) {
            if let Some(logger) = self.logger.upgrade() {
                logger.message(LogLevel::Info, None, "echo");
            }
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        self.memory.flush()
    }
}

/// Renders `sequence:text\n` so ordering can be checked from the output.
pub struct SequenceFormatter;

impl Formatter for SequenceFormatter {
    fn format(&self, record: &LogRecord, out: &mut Vec<u8>) {
        out.extend_from_slice(format!("{}:{}\n", record.sequence(), record.text()).as_bytes());
    }
}

pub fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Serializes tests that touch the process-wide logger.
pub fn global_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

use std::thread::ThreadId;

use chrono::{DateTime, Local};

use crate::LogLevel;

/// Source position of a log call, captured by [`location!`](crate::location).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub module_path: &'static str,
}

impl Location {
    pub const fn new(file: &'static str, line: u32, module_path: &'static str) -> Self {
        Location {
            file,
            line,
            module_path,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A routed log message, immutable once built.
///
/// Timestamp and thread id are taken on the producer's thread so the worker
/// reports when and where the call happened, not when it was written.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub(crate) level: LogLevel,
    pub(crate) location: Option<Location>,
    pub(crate) text: String,
    pub(crate) sequence: u64,
    pub(crate) thread_id: ThreadId,
    pub(crate) timestamp: DateTime<Local>,
}

impl LogRecord {
    pub fn new(level: LogLevel, location: Option<Location>, text: impl Into<String>, sequence: u64) -> Self {
        LogRecord {
            level,
            location,
            text: text.into(),
            sequence,
            thread_id: std::thread::current().id(),
            timestamp: Local::now(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Everything written before the text: thread, time, level and location.
    pub fn header(&self) -> RecordHeader<'_> {
        RecordHeader(self)
    }
}

/// Display adapter for [`LogRecord::header`].
pub struct RecordHeader<'a>(&'a LogRecord);

impl std::fmt::Display for RecordHeader<'_> {
    fn fmt(&self,
           f: &mut std::fmt::Formatter
    ) -> std::fmt::Result {
        let record = self.0;
        write!(f, "{:?} - {} [{:5}] - ",
               record.thread_id,
               record.timestamp.format("%d/%m/%Y %H:%M:%S%.6f"),
               record.level
        )?;
        if let Some(location) = &record.location {
            write!(f, "{} - ", location)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.header(), self.text)
    }
}

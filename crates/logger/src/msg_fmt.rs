use std::io::Write;

use crate::{LogLevel, LogRecord};

/// Turns a record into the bytes handed to a sink.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord, out: &mut Vec<u8>);
}

struct Colors;

impl Colors {
    fn prefix(level: LogLevel) -> Option<&'static str> {
        match level {
            LogLevel::Info => Some("\x1b[1;32m"),     // green
            LogLevel::Warn => Some("\x1b[1;33m"),     // yellow
            LogLevel::Error => Some("\x1b[1;31m"),    // red
            LogLevel::Critical => Some("\x1b[1;41m"), // red background
            LogLevel::Debug => Some("\x1b[1;34m"),    // blue
            LogLevel::Trace => Some("\x1b[1;35m"),    // magenta
            LogLevel::MessageOnly => None,
        }
    }

    const RESET: &'static str = "\x1b[0m";
}

/// Default line formatter:
/// `ThreadId(n) - dd/mm/YYYY HH:MM:SS.ffffff [LEVEL] - file:line - text`.
///
/// `MessageOnly` records are written verbatim, without prefix or newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new(colored: bool) -> Self {
        TextFormatter { colored }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &LogRecord, out: &mut Vec<u8>) {
        if record.level() == LogLevel::MessageOnly {
            out.extend_from_slice(record.text().as_bytes());
            return;
        }

        // Writing into a Vec cannot fail. Only the header is colored so the
        // line still ends with the message text.
        let _ = match Colors::prefix(record.level()).filter(|_| self.colored) {
            Some(color) => write!(out, "{}{}{}{}", color, record.header(), Colors::RESET, record.text()),
            None => write!(out, "{}", record),
        };
        if !record.text().ends_with('\n') {
            out.push(b'\n');
        }
    }
}

/// Writes the record text and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn format(&self, record: &LogRecord, out: &mut Vec<u8>) {
        out.extend_from_slice(record.text().as_bytes());
    }
}

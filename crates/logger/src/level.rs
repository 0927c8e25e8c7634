use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Severity of a log record.
///
/// Leveled variants are ordered `Trace < Debug < Info < Warn < Error < Critical`.
/// `MessageOnly` bypasses the threshold; it sorts above every leveled variant, so
/// using it as the threshold silences everything except `print`.
#[repr(u8)]
#[derive(Debug, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Critical = 5,
    MessageOnly = 6,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::MessageOnly,
    ];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Trace),
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Warn),
            4 => Some(LogLevel::Error),
            5 => Some(LogLevel::Critical),
            6 => Some(LogLevel::MessageOnly),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::MessageOnly => "MESSAGE",
        }
    }

    /// Whether a record at this level is delivered under `threshold`.
    pub fn passes(self, threshold: LogLevel) -> bool {
        self == LogLevel::MessageOnly || self >= threshold
    }

    /// Error-class records are routed to the stderr sink.
    pub const fn is_error_class(self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Critical)
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            "message" | "messageonly" | "off" => Ok(LogLevel::MessageOnly),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leveled_variants_are_ordered() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn message_only_always_passes() {
        for threshold in LogLevel::ALL {
            assert!(LogLevel::MessageOnly.passes(threshold));
        }
    }

    #[test]
    fn below_threshold_is_rejected() {
        assert!(!LogLevel::Info.passes(LogLevel::Warn));
        assert!(LogLevel::Warn.passes(LogLevel::Warn));
        assert!(LogLevel::Critical.passes(LogLevel::Trace));
        assert!(!LogLevel::Critical.passes(LogLevel::MessageOnly));
    }

    #[test]
    fn error_class() {
        let error_class: Vec<_> = LogLevel::ALL
            .into_iter()
            .filter(|l| l.is_error_class())
            .collect();
        assert_eq!(error_class, vec![LogLevel::Error, LogLevel::Critical]);
    }

    #[test]
    fn u8_round_trip_and_bounds() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_u8(level.as_u8()), Some(level));
        }
        assert_eq!(LogLevel::from_u8(7), None);
    }

    #[test]
    fn parse_level_names() {
        assert_eq!("Warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" trace ".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert_eq!("off".parse::<LogLevel>(), Ok(LogLevel::MessageOnly));
        assert_eq!(
            "loud".parse::<LogLevel>(),
            Err(ParseLevelError("loud".to_string()))
        );
    }

    #[test]
    fn display_honours_width() {
        assert_eq!(format!("[{:5}]", LogLevel::Info), "[INFO ]");
        assert_eq!(format!("{}", LogLevel::Critical), "CRITICAL");
    }
}

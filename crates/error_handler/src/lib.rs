//! Typed signals raised by the logger's `error`/`require` diagnostics.
//!
//! A [`Signal`] carries the same text that was logged at `Error` severity
//! together with a [`SignalKind`] chosen at the call site. Signals are plain
//! values: callers propagate them with `?` like any other error.

mod condition;

pub use condition::Condition;

use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Raised when the caller does not pick a kind.
    #[default]
    Library,
    InvalidArgument,
    OutOfRange,
    Logic,
    Runtime,
    NotImplemented,
    Io,
}

impl SignalKind {
    pub const ALL: [SignalKind; 7] = [
        SignalKind::Library,
        SignalKind::InvalidArgument,
        SignalKind::OutOfRange,
        SignalKind::Logic,
        SignalKind::Runtime,
        SignalKind::NotImplemented,
        SignalKind::Io,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SignalKind::Library => "library error",
            SignalKind::InvalidArgument => "invalid argument",
            SignalKind::OutOfRange => "out of range",
            SignalKind::Logic => "logic error",
            SignalKind::Runtime => "runtime error",
            SignalKind::NotImplemented => "not implemented",
            SignalKind::Io => "i/o error",
        }
    }
}

impl Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error value produced by a failed diagnostic.
///
/// `Display` renders the carried text only, so the message a user sees
/// matches the logged record byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{text}")]
pub struct Signal {
    kind: SignalKind,
    text: String,
}

impl Signal {
    pub fn new(kind: SignalKind, text: impl Into<String>) -> Self {
        Signal {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is(&self, kind: SignalKind) -> bool {
        self.kind == kind
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl From<std::io::Error> for Signal {
    fn from(err: std::io::Error) -> Self {
        Signal::new(SignalKind::Io, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_library() {
        assert_eq!(SignalKind::default(), SignalKind::Library);
    }

    #[test]
    fn display_is_the_carried_text() {
        let signal = Signal::new(SignalKind::OutOfRange, "index 7 past end");
        assert_eq!(signal.to_string(), "index 7 past end");
        assert!(signal.is(SignalKind::OutOfRange));
        assert!(!signal.is(SignalKind::Library));
    }

    #[test]
    fn io_errors_become_io_signals() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let signal = Signal::from(err);
        assert_eq!(signal.kind(), SignalKind::Io);
        assert_eq!(signal.into_text(), "missing");
    }

    #[test]
    fn kind_names_are_unique() {
        let mut names: Vec<_> = SignalKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SignalKind::ALL.len());
    }
}

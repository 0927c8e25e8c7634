//! `error` and `require`: log at `Error` severity, then hand a [`Signal`] back
//! to the caller.
//!
//! The signal is returned as soon as the record is queued; it does not wait
//! for the record to reach the stderr sink.

use std::fmt::Display;

use error_handler::{Condition, Signal, SignalKind};

use crate::{Location, LogLevel, Logger};

impl Logger {
    /// Logs `text` at `Error` and builds the matching signal.
    pub fn raise(&self, kind: SignalKind, location: Option<Location>, text: impl Display) -> Signal {
        let text = text.to_string();
        self.message(LogLevel::Error, location, &text);
        Signal::new(kind, text)
    }

    pub fn error<T>(&self, text: impl Display) -> Result<T, Signal> {
        self.error_as(SignalKind::default(), text)
    }

    pub fn error_as<T>(&self, kind: SignalKind, text: impl Display) -> Result<T, Signal> {
        Err(self.raise(kind, None, text))
    }

    /// No-op when `condition` holds; otherwise the same as [`error`](Self::error).
    pub fn require(&self, condition: impl Condition, text: impl Display) -> Result<(), Signal> {
        self.require_as(SignalKind::default(), condition, text)
    }

    pub fn require_as(
        &self,
        kind: SignalKind,
        condition: impl Condition,
        text: impl Display,
    ) -> Result<(), Signal> {
        if condition.holds() {
            return Ok(());
        }
        self.error_as(kind, text)
    }
}

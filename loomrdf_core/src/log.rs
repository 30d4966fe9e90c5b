/*!
The structured, caret-annotated diagnostic channel consumed by callers of the reader and writer.

This is distinct from the `log` crate facade used by `loomrdf_io`'s reader and writer for
developer-facing tracing (`log::trace!`, `log::debug!`, ...): that channel is for operators
tailing a process log. `LogSink` is the contractual channel a caller attaches to receive one
record per recoverable anomaly encountered while parsing or writing, in document order.
*/

use crate::caret::Caret;
use std::fmt::{Display, Formatter};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The severity of a `LogRecord`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Info => "info",
                Self::Warning => "warning",
                Self::Error => "error",
            }
        )
    }
}

///
/// A single structured diagnostic, carrying the document location it pertains to, a short
/// machine-stable code, and a human-readable message. `code` is intended for callers that want
/// to filter or deduplicate without parsing `message`.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogRecord {
    caret: Caret,
    severity: Severity,
    code: &'static str,
    message: String,
}

impl LogRecord {
    pub fn new<S>(caret: Caret, severity: Severity, code: &'static str, message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            caret,
            severity,
            code,
            message: message.into(),
        }
    }

    pub fn caret(&self) -> &Caret {
        &self.caret
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} [{}]: {}",
            self.caret, self.severity, self.code, self.message
        )
    }
}

///
/// Implemented by anything a reader or writer can report structured diagnostics to. A boxed
/// `FnMut(LogRecord)` closure implements this automatically.
///
pub trait LogSink {
    fn log(&mut self, record: LogRecord);
}

impl<F> LogSink for F
where
    F: FnMut(LogRecord),
{
    fn log(&mut self, record: LogRecord) {
        self(record)
    }
}

///
/// A `LogSink` that discards every record; the default when a caller does not need diagnostics.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&mut self, _record: LogRecord) {}
}

///
/// A `LogSink` that accumulates every record it receives, in order; useful in tests and for
/// callers that want to inspect diagnostics after the fact rather than streaming them.
///
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    records: Vec<LogRecord>,
}

impl LogSink for CollectingSink {
    fn log(&mut self, record: LogRecord) {
        self.records.push(record);
    }
}

impl CollectingSink {
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_preserves_order() {
        let mut sink = CollectingSink::default();
        sink.log(LogRecord::new(
            Caret::start_of("a.ttl"),
            Severity::Warning,
            "W001",
            "first",
        ));
        sink.log(LogRecord::new(
            Caret::start_of("a.ttl"),
            Severity::Error,
            "E002",
            "second",
        ));
        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.records()[1].code(), "E002");
    }
}

/*!
The event stream that flows between a [`crate::reader::Reader`] and a [`Sink`]: `Base`, `Prefix`,
`Statement`, and `End`. A writer is simply a `Sink` that renders each event back to bytes; other
sinks (a filter, an in-memory inserter, a canonicalizer) substitute freely.
*/

use crate::error::Result;
use loomrdf_core::{NodeRef, Statement};
use loomrdf_iri::UriView;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Flags describing the abbreviation context a `Statement` event was produced in, so a writer
/// (or any other sink) can re-render the same folding the reader observed without re-deriving it.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StatementEventFlags(u16);

impl StatementEventFlags {
    pub const NONE: Self = Self(0);
    /// The subject is omitted; this statement continues the previous one's subject via `;`/`,`.
    pub const EMPTY_S: Self = Self(1 << 0);
    /// The subject is a fresh `[...]`-introduced blank node.
    pub const ANON_S: Self = Self(1 << 1);
    /// The object is a fresh `[...]`-introduced blank node.
    pub const ANON_O: Self = Self(1 << 2);
    /// The subject is the head of a `(...)` collection.
    pub const LIST_S: Self = Self(1 << 3);
    /// The object is the head of a `(...)` collection.
    pub const LIST_O: Self = Self(1 << 4);
    /// The subject continues a collection's rdf:rest chain.
    pub const TERSE_S: Self = Self(1 << 5);
    /// The object continues a collection's rdf:rest chain.
    pub const TERSE_O: Self = Self(1 << 6);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}

impl std::ops::BitOr for StatementEventFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

///
/// One item of the stream produced by a reader and consumed by a sink.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The base URI changed.
    Base { uri: UriView },
    /// A prefix was bound.
    Prefix { name: String, uri: UriView },
    /// A triple or quad, with its abbreviation context.
    Statement {
        flags: StatementEventFlags,
        statement: Statement,
    },
    /// A previously opened anonymous node ([...] or a collection) is now complete.
    End { node: NodeRef },
}

///
/// Consumes an `Event` stream; a writer is the canonical sink, but a filter, canonicalizer, or
/// in-memory inserter can substitute without the reader knowing the difference.
///
pub trait Sink {
    fn handle(&mut self, event: Event) -> Result<()>;
}

impl<F> Sink for F
where
    F: FnMut(Event) -> Result<()>,
{
    fn handle(&mut self, event: Event) -> Result<()> {
        self(event)
    }
}

///
/// A `Sink` that collects every event it receives, in order; the usual sink in reader tests.
///
#[derive(Default)]
pub struct VecSink {
    pub events: Vec<Event>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for VecSink {
    fn handle(&mut self, event: Event) -> Result<()> {
        self.events.push(event);
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_event_flags_combine_with_bitor() {
        let flags = StatementEventFlags::ANON_O | StatementEventFlags::LIST_O;
        assert!(flags.contains(StatementEventFlags::ANON_O));
        assert!(flags.contains(StatementEventFlags::LIST_O));
        assert!(!flags.contains(StatementEventFlags::EMPTY_S));
    }

    #[test]
    fn vec_sink_preserves_event_order() {
        let mut sink = VecSink::new();
        sink.handle(Event::Base { uri: "http://example.com/".parse().unwrap() }).unwrap();
        sink.handle(Event::Prefix {
            name: "ex".to_string(),
            uri: "http://example.com/ns#".parse().unwrap(),
        })
        .unwrap();
        assert_eq!(sink.events.len(), 2);
        assert!(matches!(sink.events[0], Event::Base { .. }));
    }
}

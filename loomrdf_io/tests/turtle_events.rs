//! End-to-end reader behavior for Turtle: the event shapes a simple triple, an anonymous node, and
//! a collection produce.

use loomrdf_core::{NodeType, NullSink, World};
use loomrdf_io::byte_source::SliceSource;
use loomrdf_io::error::Result;
use loomrdf_io::event::{Event, Sink, StatementEventFlags};
use loomrdf_io::reader::{Reader, ReaderOptions, Syntax};
use std::cell::RefCell;
use std::rc::Rc;

/// A `Sink` that appends into a shared `Vec`, so the events it collected remain inspectable after
/// the `Reader` that owned it has been consumed by `finish`.
#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<Event>>>);

impl Sink for SharedSink {
    fn handle(&mut self, event: Event) -> Result<()> {
        self.0.borrow_mut().push(event);
        Ok(())
    }
}

fn read_all(input: &str) -> Vec<Event> {
    let world = World::new();
    let source = SliceSource::new(input.as_bytes());
    let sink = SharedSink::default();
    let collected = sink.0.clone();
    let mut reader =
        Reader::start(source, "doc", Syntax::Turtle, world, sink, NullSink, ReaderOptions::new());
    reader.read_document().unwrap();
    reader.finish().unwrap();
    Rc::try_unwrap(collected).unwrap().into_inner()
}

#[test]
fn a_simple_triple_produces_one_unflagged_statement() {
    let events = read_all(r#"<http://example.com/s> <http://example.com/p> "o" ."#);
    assert_eq!(events.len(), 1);
    let Event::Statement { flags, statement } = &events[0] else {
        panic!("expected a Statement event");
    };
    assert_eq!(*flags, StatementEventFlags::NONE);
    assert_eq!(statement.subject().string(), "http://example.com/s");
    assert_eq!(statement.predicate().string(), "http://example.com/p");
    assert_eq!(statement.object().string(), "o");
    assert_eq!(statement.object().node_type(), NodeType::Literal);
}

#[test]
fn an_anonymous_object_opens_and_closes_a_bracket() {
    let events = read_all(
        "<http://example.com/s> <http://example.com/p> [ <http://example.com/q> <http://example.com/r> ] .",
    );
    assert_eq!(events.len(), 3);

    let Event::Statement { flags, statement } = &events[0] else {
        panic!("expected a Statement event");
    };
    assert!(flags.contains(StatementEventFlags::ANON_O));
    assert_eq!(statement.subject().string(), "http://example.com/s");
    assert_eq!(statement.predicate().string(), "http://example.com/p");
    let blank = statement.object().clone();
    assert_eq!(blank.node_type(), NodeType::Blank);

    let Event::Statement { statement: inner, .. } = &events[1] else {
        panic!("expected a Statement event");
    };
    assert_eq!(inner.subject(), &blank);
    assert_eq!(inner.predicate().string(), "http://example.com/q");
    assert_eq!(inner.object().string(), "http://example.com/r");

    let Event::End { node } = &events[2] else {
        panic!("expected an End event");
    };
    assert_eq!(node, &blank);
}

#[test]
fn a_collection_desugars_into_first_rest_links_ending_in_nil() {
    let events = read_all(
        "<http://example.com/s> <http://example.com/p> ( <http://example.com/a> <http://example.com/b> ) .",
    );
    assert_eq!(events.len(), 5);

    let Event::Statement { flags, statement: link } = &events[0] else {
        panic!("expected a Statement event");
    };
    assert!(flags.contains(StatementEventFlags::LIST_O));
    let head = link.object().clone();

    let Event::Statement { statement: first1, .. } = &events[1] else {
        panic!("expected a Statement event");
    };
    assert_eq!(first1.subject(), &head);
    assert_eq!(first1.predicate().string(), loomrdf_io::reader::RDF_FIRST);
    assert_eq!(first1.object().string(), "http://example.com/a");

    let Event::Statement { flags, statement: rest1 } = &events[2] else {
        panic!("expected a Statement event");
    };
    assert!(flags.contains(StatementEventFlags::TERSE_O));
    assert_eq!(rest1.predicate().string(), loomrdf_io::reader::RDF_REST);
    let cell2 = rest1.object().clone();

    let Event::Statement { statement: first2, .. } = &events[3] else {
        panic!("expected a Statement event");
    };
    assert_eq!(first2.subject(), &cell2);
    assert_eq!(first2.object().string(), "http://example.com/b");

    let Event::Statement { flags, statement: rest2 } = &events[4] else {
        panic!("expected a Statement event");
    };
    assert!(flags.contains(StatementEventFlags::TERSE_O));
    assert_eq!(rest2.subject(), &cell2);
    assert_eq!(rest2.object().string(), loomrdf_io::reader::RDF_NIL);
}

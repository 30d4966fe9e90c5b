//! Reader-to-writer round trips for Turtle: directives, the bracket-subject continuation edge
//! case (`[ ... ] p o .`), and the equivalent continuation for a subject-position collection.

use loomrdf_core::{NullSink, World};
use loomrdf_io::byte_source::SliceSource;
use loomrdf_io::byte_sink::VecSink as ByteVecSink;
use loomrdf_io::error::Result;
use loomrdf_io::event::{Event, Sink};
use loomrdf_io::reader::{Reader, ReaderOptions, Syntax};
use loomrdf_io::writer::{Writer, WriterOptions};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<Event>>>);

impl Sink for SharedSink {
    fn handle(&mut self, event: Event) -> Result<()> {
        self.0.borrow_mut().push(event);
        Ok(())
    }
}

fn round_trip(input: &str) -> String {
    let world = World::new();
    let source = SliceSource::new(input.as_bytes());
    let sink = SharedSink::default();
    let collected = sink.0.clone();
    let mut reader =
        Reader::start(source, "doc", Syntax::Turtle, world, sink, NullSink, ReaderOptions::new());
    reader.read_document().unwrap();
    reader.finish().unwrap();
    let events = Rc::try_unwrap(collected).unwrap().into_inner();

    let mut writer = Writer::start(ByteVecSink::new(), Syntax::Turtle, WriterOptions::new());
    for event in events {
        writer.handle(event).unwrap();
    }
    writer.finish().unwrap().into_string().unwrap()
}

#[test]
fn a_simple_triple_round_trips_unchanged() {
    let input = "<http://example.com/s> <http://example.com/p> \"o\" .\n";
    assert_eq!(round_trip(input), input);
}

#[test]
fn base_and_prefix_directives_round_trip_and_the_statement_is_qualified() {
    let input = "@base <http://example.com/> .\n@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .\n";
    assert_eq!(round_trip(input), input);
}

#[test]
fn a_bracket_subject_continues_its_predicate_object_list_with_no_separator() {
    let input = "[ <http://example.com/q> <http://example.com/r> ] <http://example.com/p2> <http://example.com/o2> .\n";
    assert_eq!(round_trip(input), input);
}

#[test]
fn a_collection_subject_continues_its_predicate_object_list_with_no_separator() {
    let input = "( <http://example.com/a> <http://example.com/b> ) <http://example.com/p2> <http://example.com/o2> .\n";
    assert_eq!(round_trip(input), input);
}

#[test]
fn a_bracket_subject_followed_by_a_semicolon_continuation_still_uses_the_separator() {
    let input = "[ <http://example.com/q> <http://example.com/r> ] <http://example.com/p2> <http://example.com/o2> ; <http://example.com/p3> <http://example.com/o3> .\n";
    let expected = "[ <http://example.com/q> <http://example.com/r> ] <http://example.com/p2> <http://example.com/o2> ;\n  <http://example.com/p3> <http://example.com/o3> .\n";
    assert_eq!(round_trip(input), expected);
}

#[test]
fn an_object_position_collection_round_trips_as_a_parenthesized_list() {
    let input = "<http://example.com/s> <http://example.com/p> ( <http://example.com/a> <http://example.com/b> ) .\n";
    assert_eq!(round_trip(input), input);
}

#[test]
fn an_empty_collection_round_trips_as_rdf_nil() {
    let input = "<http://example.com/s> <http://example.com/p> () .\n";
    let output = round_trip(input);
    assert_eq!(
        output,
        "<http://example.com/s> <http://example.com/p> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> .\n"
    );
}

//! N-Triples has no abbreviation, so reading a document and writing the resulting events back out
//! reproduces the same bytes exactly, given blank labels are kept global (not document-prefixed).

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

fn round_trip(input: &str, syntax: Syntax) -> String {
    let world = World::new();
    let source = SliceSource::new(input.as_bytes());
    let sink = SharedSink::default();
    let collected = sink.0.clone();
    let options = ReaderOptions::new().with_global(true);
    let mut reader = Reader::start(source, "doc", syntax, world, sink, NullSink, options);
    reader.read_document().unwrap();
    reader.finish().unwrap();
    let events = Rc::try_unwrap(collected).unwrap().into_inner();

    let mut writer = Writer::start(ByteVecSink::new(), syntax, WriterOptions::new());
    for event in events {
        writer.handle(event).unwrap();
    }
    writer.finish().unwrap().into_string().unwrap()
}

#[test]
fn a_document_of_plain_and_typed_literals_round_trips_byte_for_byte() {
    let input = concat!(
        "<http://example.com/s> <http://example.com/p> \"hello\" .\n",
        "<http://example.com/s> <http://example.com/p2> \"2\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n",
        "<http://example.com/s> <http://example.com/p3> \"bonjour\"@fr .\n",
        "_:b1 <http://example.com/p> <http://example.com/o> .\n",
    );
    assert_eq!(round_trip(input, Syntax::NTriples), input);
}

#[test]
fn an_nquads_document_preserves_its_graph_term() {
    let input = "<http://example.com/s> <http://example.com/p> <http://example.com/o> <http://example.com/g> .\n";
    assert_eq!(round_trip(input, Syntax::NQuads), input);
}

#[test]
fn special_characters_round_trip_through_escape_and_unescape() {
    let input = "<http://example.com/s> <http://example.com/p> \"line one\\nline two\\ta \\\"quote\\\"\" .\n";
    assert_eq!(round_trip(input, Syntax::NTriples), input);
}

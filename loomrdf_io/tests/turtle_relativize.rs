//! A reader-to-writer round trip exercising base-relative output: no prefix is declared, so every
//! URI falls through to relativization against `@base` instead of a CURIE.

use loomrdf_core::{NullSink, World};
use loomrdf_io::byte_sink::VecSink as ByteVecSink;
use loomrdf_io::byte_source::SliceSource;
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
fn a_subject_matching_base_exactly_renders_as_an_empty_relative_reference() {
    let input = "@base <http://example.com/a/b/c> .\n\
                 <http://example.com/a/b/c> <http://example.com/a/b/p> <http://example.com/a/g> .\n";
    let expected = "@base <http://example.com/a/b/c> .\n<> <p> <../g> .\n";
    assert_eq!(round_trip(input), expected);
}

#[test]
fn a_uri_sharing_no_scheme_or_authority_with_base_is_written_absolute() {
    let input = "@base <http://example.com/a/> .\n\
                 <http://example.com/a/s> <http://example.com/a/p> <https://other.example/o> .\n";
    let expected =
        "@base <http://example.com/a/> .\n<s> <p> <https://other.example/o> .\n";
    assert_eq!(round_trip(input), expected);
}

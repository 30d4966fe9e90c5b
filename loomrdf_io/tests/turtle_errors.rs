//! An undeclared prefix is a hard parse error: `resolve_prefixed_name` has no lax fallback, since a
//! CURIE that cannot be expanded has no sensible node to stand in for it.

use loomrdf_core::{NullSink, World};
use loomrdf_io::byte_source::SliceSource;
use loomrdf_io::error::{Error, Status};
use loomrdf_io::event::{Event, Sink};
use loomrdf_io::reader::{Reader, ReaderOptions, Syntax};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct CountingSink(Rc<RefCell<usize>>);

impl Sink for CountingSink {
    fn handle(&mut self, _event: Event) -> loomrdf_io::error::Result<()> {
        *self.0.borrow_mut() += 1;
        Ok(())
    }
}

#[test]
fn an_undeclared_prefix_is_rejected_as_a_bad_curie() {
    let input = "ex:s ex:p ex:o .";
    let world = World::new();
    let source = SliceSource::new(input.as_bytes());
    let mut reader = Reader::start(
        source,
        "doc",
        Syntax::Turtle,
        world,
        CountingSink::default(),
        NullSink,
        ReaderOptions::new(),
    );
    let err = reader.read_document().unwrap_err();
    assert_eq!(err.status(), Status::BadCurie);
    assert!(matches!(err, Error::BadCurie { curie, .. } if curie == "ex:s"));
}

#[test]
fn a_declared_prefix_resolves_and_the_statement_is_delivered() {
    let input = "@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .";
    let world = World::new();
    let source = SliceSource::new(input.as_bytes());
    let sink = CountingSink::default();
    let count = sink.0.clone();
    let mut reader =
        Reader::start(source, "doc", Syntax::Turtle, world, sink, NullSink, ReaderOptions::new());
    reader.read_document().unwrap();
    reader.finish().unwrap();
    assert_eq!(*count.borrow(), 1);
}

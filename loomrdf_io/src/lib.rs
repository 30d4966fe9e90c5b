/*!
Streaming syntax support for RDF's text serializations.

This crate turns bytes into an [`Event`](event::Event) stream (via [`reader::Reader`]) and an
`Event` stream back into bytes (via [`writer::Writer`]), for the four syntaxes listed below. Both
directions are pull/push based and allocate no more than one statement at a time — a `Reader` paired
with a `Writer` of the same [`reader::Syntax`] round-trips a document without ever materializing it
as a graph.

| Name      | MIME type                                          |
|-----------|-----------------------------------------------------|
| Turtle    | text/turtle                                          |
| TriG      | application/trig                                     |
| N-Triples | application/n-triples                                |
| N-Quads   | application/n-quads                                  |

# Example

```no_run
use loomrdf_core::World;
use loomrdf_io::byte_source::SliceSource;
use loomrdf_io::event::VecSink;
use loomrdf_io::reader::{Reader, ReaderOptions, Syntax};

let world = World::new();
let source = SliceSource::new(b"<http://example.com/s> <http://example.com/p> \"o\" .");
let sink = VecSink::new();
let mut reader = Reader::start(source, "doc", Syntax::Turtle, world, sink, loomrdf_core::NullSink, ReaderOptions::new());
reader.read_document().unwrap();
```
*/

pub mod error;
pub use error::{Error, Result};

pub mod byte_source;
pub mod byte_sink;

pub(crate) mod common;

pub mod event;
pub use event::{Event, Sink};

pub mod reader;
pub use reader::{Reader, ReaderOptions, Syntax};

pub mod writer;
pub use writer::{Writer, WriterOptions};

/*!
The core RDF data model shared by loomrdf's reader and writer: a tagged `Node` type, an
`Rc`-backed interner over nodes, an `Env` holding a document's base URI and prefix mappings, a
transient `Statement` bundling the four node references of a triple or quad, and the
caret/log-record types used to attach source locations and structured diagnostics to all of the
above.

This crate has no notion of storage: it does not index statements, does not offer a queryable
graph, and does not itself read or write any serialization. Those concerns live in `loomrdf_io`,
which builds its reader and writer on top of the types defined here.
*/

// ------------------------------------------------------------------------------------------------
// Modules
// ------------------------------------------------------------------------------------------------

pub mod error;

pub mod caret;
pub use caret::Caret;

pub mod log;
pub use log::{CollectingSink, LogRecord, LogSink, NullSink, Severity};

pub mod node;
pub use node::{Node, NodeFlags, NodeType};

pub mod value;
pub use value::{TypedValue, TypedValueKind};

pub mod interner;
pub use interner::{NodeRef, Nodes};

pub mod env;
pub use env::Env;

pub mod statement;
pub use statement::{Statement, StatementFlags};

pub mod world;
pub use world::World;

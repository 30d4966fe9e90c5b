/*!
N-Triples/N-Quads rendering: every statement is one flat `<s> <p> <o> ["<g>"] .` line. There is no
abbreviation, no prefixed names, no base IRI, and no anonymous nodes or collections to track, so
unlike the Turtle/TriG renderer this module carries no state of its own beyond the shared [`Writer`].
*/

use super::{escape_iri, render_literal_flat, Writer};
use crate::byte_sink::ByteSink;
use crate::error::{Error, Result};
use loomrdf_core::{NodeRef, NodeType, Statement};

pub(super) fn handle_statement<S: ByteSink>(writer: &mut Writer<S>, statement: Statement) -> Result<()> {
    write_term(writer, statement.subject())?;
    writer.write_raw(b" ")?;
    write_term(writer, statement.predicate())?;
    writer.write_raw(b" ")?;
    write_term(writer, statement.object())?;
    if let Some(graph) = statement.graph() {
        writer.write_raw(b" ")?;
        write_term(writer, graph)?;
    }
    writer.write_raw(b" .\n")
}

fn write_term<S: ByteSink>(writer: &mut Writer<S>, node: &NodeRef) -> Result<()> {
    match node.node_type() {
        NodeType::Uri => {
            let view = node.uri_view().expect("uri node carries a parseable URI string");
            writer.write_raw(format!("<{}>", escape_iri(&view.to_string(), writer.ascii())).as_bytes())
        }
        NodeType::Literal => {
            let rendered = render_literal_flat(writer, node);
            writer.write_raw(rendered.as_bytes())
        }
        NodeType::Blank => writer.write_raw(format!("_:{}", node.string()).as_bytes()),
        NodeType::Variable => Err(Error::BadArg {
            message: "N-Triples/N-Quads have no grammar for variable nodes".to_string(),
        }),
    }
}

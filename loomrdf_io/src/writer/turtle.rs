/*!
Turtle/TriG rendering: the bracket-and-abbreviation engine that mirrors what
[`reader::turtle`](crate::reader) folds on the way in. A fresh subject is compared against the
active context (the top of [`super::Writer`]'s frame stack, or the ambient top-level one); matching
subjects fold into `,`/`;` continuations, a changed subject closes the previous statement with
` .`, and `ANON_S`/`ANON_O`/`LIST_S`/`LIST_O` open a `[...]`/`(...)` context the matching `End`
event (or, for collections, the closing `rdf:rest rdf:nil` link) later closes.
*/

use super::{render_literal, render_uri, Kind, WContext, Writer};
use crate::byte_sink::ByteSink;
use crate::error::{Error, Result};
use crate::event::StatementEventFlags;
use crate::reader::{RDF_FIRST, RDF_NIL, RDF_REST};
use loomrdf_core::{NodeRef, NodeType, Statement};
use loomrdf_iri::UriView;

pub(super) fn handle_base<S: ByteSink>(writer: &mut Writer<S>, uri: UriView) -> Result<()> {
    writer.env.set_base_uri(&uri.to_string())?;
    if writer.contextual() {
        return Ok(());
    }
    writer.write_raw(format!("@base <{uri}> .\n").as_bytes())
}

pub(super) fn handle_prefix<S: ByteSink>(writer: &mut Writer<S>, name: String, uri: UriView) -> Result<()> {
    writer.env.set_prefix(&name, &uri.to_string())?;
    if writer.contextual() {
        return Ok(());
    }
    writer.write_raw(format!("@prefix {name}: <{uri}> .\n").as_bytes())
}

pub(super) fn handle_statement<S: ByteSink>(
    writer: &mut Writer<S>,
    flags: StatementEventFlags,
    statement: Statement,
) -> Result<()> {
    ensure_graph(writer, statement.graph())?;

    let subject = statement.subject().clone();
    let predicate = statement.predicate().clone();
    let object = statement.object().clone();

    if matches!(writer.stack.last(), Some(ctx) if ctx.kind == Kind::Collection && ctx.subject == subject) {
        if predicate.string() == RDF_FIRST {
            return write_collection_member(writer, &object, flags);
        }
        if predicate.string() == RDF_REST {
            return if object.string() == RDF_NIL {
                close_collection(writer)
            } else {
                advance_collection(writer, object);
                Ok(())
            };
        }
        return Err(Error::Internal {
            message: "a collection cell carried a predicate other than rdf:first/rdf:rest".to_string(),
        });
    }

    if active_subject(writer).as_ref() != Some(&subject) {
        terminate_active_subject(writer)?;
        begin_subject(writer, &subject, flags)?;
    }
    write_predicate_object(writer, &predicate, &object, flags)
}

pub(super) fn handle_end<S: ByteSink>(writer: &mut Writer<S>, node: NodeRef) -> Result<()> {
    match writer.stack.last() {
        Some(ctx) if ctx.kind == Kind::Anon && ctx.subject == node => {
            writer.stack.pop();
            writer.indenter = writer.indenter.outdent();
            writer.last_closed_subject = Some(node);
            writer.write_raw(b" ]")
        }
        _ => Err(Error::Internal {
            message: "End event for a node with no matching open `[...]` context".to_string(),
        }),
    }
}

/// True when `subject` is the node a `[...]`/`(...)` context *just* closed for — meaning the event
/// stream is about to continue that same subject's predicate-object list with no `;` in between
/// (`[ p o ] p2 o2 .` / `( a b ) p2 o2 .`). The bracket already printed the subject; nothing further
/// needs to be written before the next predicate.
fn is_bracket_continuation<S: ByteSink>(writer: &Writer<S>, subject: &NodeRef, flags: StatementEventFlags) -> bool {
    (flags.contains(StatementEventFlags::ANON_S) || flags.contains(StatementEventFlags::LIST_S))
        && writer.last_closed_subject.as_ref() == Some(subject)
}

// ------------------------------------------------------------------------------------------------
// Context stack bookkeeping
// ------------------------------------------------------------------------------------------------

fn active_subject<S: ByteSink>(writer: &Writer<S>) -> Option<NodeRef> {
    writer
        .stack
        .last()
        .or(writer.top_level.as_ref())
        .map(|ctx| ctx.subject.clone())
}

/// Ends the statement currently open at top level, if any. A subject change while a `[...]`/`(...)`
/// context is still open on the stack would mean the event stream itself is malformed — the reader
/// always closes nested contexts before moving to a genuinely different subject.
fn terminate_active_subject<S: ByteSink>(writer: &mut Writer<S>) -> Result<()> {
    if !writer.stack.is_empty() {
        return Err(Error::Internal {
            message: "subject changed while a nested `[...]`/`(...)` context was still open".to_string(),
        });
    }
    if writer.top_level.take().is_some() {
        writer.write_raw(b" .\n")?;
    }
    Ok(())
}

/// Begins a fresh subject. `ANON_S`/`LIST_S` open a bracket now — unless this subject is the one a
/// `[...]`/`(...)` context *just* closed for, in which case nothing is written at all: the bracket
/// already stands for this subject, and the predicate that follows continues directly after it.
fn begin_subject<S: ByteSink>(writer: &mut Writer<S>, subject: &NodeRef, flags: StatementEventFlags) -> Result<()> {
    if is_bracket_continuation(writer, subject, flags) {
        writer.last_closed_subject = None;
        writer.top_level =
            Some(WContext { subject: subject.clone(), last_predicate: None, kind: Kind::TopLevel, head: None });
        return Ok(());
    }
    if flags.contains(StatementEventFlags::ANON_S) {
        writer.write_raw(b"[")?;
        writer.indenter = writer.indenter.indent();
        writer.stack.push(WContext {
            subject: subject.clone(),
            last_predicate: None,
            kind: Kind::Anon,
            head: None,
        });
        return Ok(());
    }
    if flags.contains(StatementEventFlags::LIST_S) {
        writer.write_raw(b"(")?;
        writer.indenter = writer.indenter.indent();
        writer.stack.push(WContext {
            subject: subject.clone(),
            last_predicate: None,
            kind: Kind::Collection,
            head: Some(subject.clone()),
        });
        return Ok(());
    }
    write_term(writer, subject)?;
    writer.top_level =
        Some(WContext { subject: subject.clone(), last_predicate: None, kind: Kind::TopLevel, head: None });
    Ok(())
}

fn write_predicate_object<S: ByteSink>(
    writer: &mut Writer<S>,
    predicate: &NodeRef,
    object: &NodeRef,
    flags: StatementEventFlags,
) -> Result<()> {
    let continues_predicate = matches!(
        writer.stack.last().or(writer.top_level.as_ref()),
        Some(ctx) if ctx.last_predicate.as_ref() == Some(predicate)
    );
    if flags.contains(StatementEventFlags::EMPTY_S) && continues_predicate {
        writer.write_raw(b", ")?;
    } else if flags.contains(StatementEventFlags::EMPTY_S) {
        writer.write_raw(b" ;")?;
        write_continuation_break(writer)?;
        write_predicate_term(writer, predicate)?;
        writer.write_raw(b" ")?;
    } else {
        writer.write_raw(b" ")?;
        write_predicate_term(writer, predicate)?;
        writer.write_raw(b" ")?;
    }
    write_object(writer, object, flags)?;
    if let Some(ctx) = writer.stack.last_mut().or(writer.top_level.as_mut()) {
        ctx.last_predicate = Some(predicate.clone());
    }
    Ok(())
}

fn write_continuation_break<S: ByteSink>(writer: &mut Writer<S>) -> Result<()> {
    if writer.terse() && writer.indenter.depth() > 0 {
        writer.write_raw(b" ")
    } else {
        writer.write_raw(b"\n")?;
        writer.write_raw(writer.indenter.indent().to_string().as_bytes())
    }
}

/// Writes `object`, opening a nested `[...]`/`(...)` context first when its flags say it introduces
/// one. The caller has already written the separating space.
fn write_object<S: ByteSink>(writer: &mut Writer<S>, object: &NodeRef, flags: StatementEventFlags) -> Result<()> {
    if flags.contains(StatementEventFlags::ANON_O) {
        writer.write_raw(b"[")?;
        writer.indenter = writer.indenter.indent();
        writer.stack.push(WContext {
            subject: object.clone(),
            last_predicate: None,
            kind: Kind::Anon,
            head: None,
        });
        return Ok(());
    }
    if flags.contains(StatementEventFlags::LIST_O) {
        writer.write_raw(b"(")?;
        writer.indenter = writer.indenter.indent();
        writer.stack.push(WContext {
            subject: object.clone(),
            last_predicate: None,
            kind: Kind::Collection,
            head: Some(object.clone()),
        });
        return Ok(());
    }
    write_term(writer, object)
}

// ------------------------------------------------------------------------------------------------
// Collections
// ------------------------------------------------------------------------------------------------

fn write_collection_member<S: ByteSink>(
    writer: &mut Writer<S>,
    member: &NodeRef,
    flags: StatementEventFlags,
) -> Result<()> {
    writer.write_raw(b" ")?;
    write_object(writer, member, flags)
}

/// Moves the active collection context's tracked subject to the next cell, so the member that
/// follows (its `rdf:first`) is recognized as still belonging to this collection.
fn advance_collection<S: ByteSink>(writer: &mut Writer<S>, next_cell: NodeRef) {
    if let Some(ctx) = writer.stack.last_mut() {
        ctx.subject = next_cell;
    }
}

fn close_collection<S: ByteSink>(writer: &mut Writer<S>) -> Result<()> {
    match writer.stack.pop() {
        Some(ctx) if ctx.kind == Kind::Collection => {
            writer.indenter = writer.indenter.outdent();
            writer.last_closed_subject = ctx.head;
            writer.write_raw(b" )")
        }
        _ => Err(Error::Internal {
            message: "rdf:rest rdf:nil closed a context that was not a collection".to_string(),
        }),
    }
}

// ------------------------------------------------------------------------------------------------
// TriG graph blocks
// ------------------------------------------------------------------------------------------------

fn ensure_graph<S: ByteSink>(writer: &mut Writer<S>, graph: Option<&NodeRef>) -> Result<()> {
    if !writer.is_trig() || graph.cloned() == writer.current_graph {
        return Ok(());
    }
    if !writer.stack.is_empty() {
        return Err(Error::Internal {
            message: "graph changed while a nested `[...]`/`(...)` context was still open".to_string(),
        });
    }
    if writer.top_level.take().is_some() {
        writer.write_raw(b" .\n")?;
    }
    if writer.in_graph_block {
        writer.indenter = writer.indenter.outdent();
        writer.write_raw(b"}\n")?;
        writer.in_graph_block = false;
    }
    writer.current_graph = graph.cloned();
    if let Some(g) = graph {
        write_term(writer, g)?;
        writer.write_raw(b" {\n")?;
        writer.indenter = writer.indenter.indent();
        writer.in_graph_block = true;
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Terms
// ------------------------------------------------------------------------------------------------

fn write_term<S: ByteSink>(writer: &mut Writer<S>, node: &NodeRef) -> Result<()> {
    match node.node_type() {
        NodeType::Uri => {
            let rendered = render_uri(writer, node, false)?;
            writer.write_raw(rendered.as_bytes())
        }
        NodeType::Literal => {
            let rendered = render_literal(writer, node);
            writer.write_raw(rendered.as_bytes())
        }
        NodeType::Blank => writer.write_raw(format!("_:{}", node.string()).as_bytes()),
        NodeType::Variable => writer.write_raw(format!("?{}", node.string()).as_bytes()),
    }
}

fn write_predicate_term<S: ByteSink>(writer: &mut Writer<S>, predicate: &NodeRef) -> Result<()> {
    let rendered = render_uri(writer, predicate, true)?;
    writer.write_raw(rendered.as_bytes())
}

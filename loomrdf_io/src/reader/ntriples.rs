/*!
N-Triples/N-Quads line grammar. Unlike Turtle/TriG there is no abbreviation, no prefixed names, no
collections or anonymous nodes, and no base IRI — every term is written out in full on one line, so
`step` reads a whole `subject predicate object ["graph"] .` statement and returns, never touching
the frame stack or the top-level predicate-object-list state Turtle/TriG use.
*/

use super::{bad_syntax, decode_utf8, read_escape, Reader};
use crate::byte_source::ByteSource;
use crate::error::Result;
use crate::event::{Sink, StatementEventFlags};
use loomrdf_core::{LogSink, NodeRef, Statement};

pub(super) fn step<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<()> {
    let subject = read_subject(reader)?;
    reader.skip_insignificant()?;
    let predicate = read_predicate(reader)?;
    reader.skip_insignificant()?;
    let object = read_object(reader)?;
    reader.skip_insignificant()?;
    let graph = if reader.allows_graphs() {
        match reader.peek_byte()? {
            Some(b'.') => None,
            Some(_) => {
                let graph = read_graph(reader)?;
                reader.skip_insignificant()?;
                Some(graph)
            }
            None => return Err(bad_syntax(reader, "unexpected end of input in a statement")),
        }
    } else {
        None
    };
    reader.expect_byte(b'.')?;
    let caret = reader.caret();
    let mut statement = Statement::new(subject, predicate, object).with_caret(caret);
    if let Some(graph) = graph {
        statement = statement.with_graph(graph);
    }
    reader.emit_statement(StatementEventFlags::NONE, statement)
}

// ------------------------------------------------------------------------------------------------
// Terms
// ------------------------------------------------------------------------------------------------

fn read_subject<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        Some(b'<') => read_iri(reader),
        Some(b'_') if reader.peek_at(1)? == Some(b':') => read_blank(reader),
        _ => Err(bad_syntax(reader, "a subject must be an IRI or a blank node")),
    }
}

fn read_predicate<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        Some(b'<') => read_iri(reader),
        _ => Err(bad_syntax(reader, "a predicate must be an IRI")),
    }
}

fn read_object<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        Some(b'<') => read_iri(reader),
        Some(b'_') if reader.peek_at(1)? == Some(b':') => read_blank(reader),
        Some(b'"') => read_literal(reader),
        _ => Err(bad_syntax(reader, "an object must be an IRI, a blank node, or a literal")),
    }
}

fn read_graph<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        Some(b'<') => read_iri(reader),
        Some(b'_') if reader.peek_at(1)? == Some(b':') => read_blank(reader),
        _ => Err(bad_syntax(reader, "a graph name must be an IRI or a blank node")),
    }
}

fn read_blank<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    reader.advance_byte()?;
    reader.advance_byte()?;
    let mut label = String::new();
    reader.read_token_while(&mut label, is_blank_label_char)?;
    reader.blank_node(&label)
}

fn read_iri<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    reader.expect_byte(b'<')?;
    let mut buf = String::new();
    loop {
        match reader.advance_byte()? {
            None => return Err(bad_syntax(reader, "unterminated IRI reference")),
            Some(b'>') => break,
            Some(b'\\') => read_escape(reader, &mut buf)?,
            Some(b) if b < 0x20 || matches!(b, b'<' | b'"' | b'{' | b'}' | b'|' | b'^' | b'`') => {
                if reader.is_lax() {
                    continue;
                }
                return Err(bad_syntax(reader, "illegal character in IRI reference"));
            }
            Some(lead) => buf.push(decode_utf8(reader, lead)?),
        }
    }
    // N-Triples/N-Quads carry no base IRI; `resolve_iri` only succeeds here when `buf` is already
    // absolute, since there is nothing for a relative reference to resolve against.
    reader.resolve_iri(&buf)
}

fn read_literal<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    reader.expect_byte(b'"')?;
    let mut body = String::new();
    loop {
        match reader.peek_byte()? {
            None => return Err(bad_syntax(reader, "unterminated string literal")),
            Some(b'"') => {
                reader.advance_byte()?;
                break;
            }
            Some(b'\\') => {
                reader.advance_byte()?;
                read_escape(reader, &mut body)?;
            }
            Some(b'\n') | Some(b'\r') => {
                return Err(bad_syntax(reader, "unescaped newline in a string literal"));
            }
            Some(lead) => {
                reader.advance_byte()?;
                body.push(decode_utf8(reader, lead)?);
            }
        }
    }
    if reader.peek_byte()? == Some(b'@') {
        reader.advance_byte()?;
        let mut lang = String::new();
        reader.read_token_while(&mut lang, |b| b.is_ascii_alphanumeric() || b == b'-')?;
        return Ok(reader.nodes.literal_with_language(body, lang)?);
    }
    if reader.peek_byte()? == Some(b'^') && reader.peek_at(1)? == Some(b'^') {
        reader.advance_byte()?;
        reader.advance_byte()?;
        let datatype = read_iri(reader)?;
        let datatype_iri = datatype
            .uri_view()
            .ok_or_else(|| bad_syntax(reader, "a datatype must be an IRI"))?
            .to_string();
        return Ok(reader.nodes.literal_with_datatype(body, datatype_iri)?);
    }
    Ok(reader.nodes.literal(body))
}

fn is_blank_label_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.'
}

/*!
Turtle/TriG document and statement grammar, built on the scanning primitives and bounded frame
stack defined in [`super`]. `step` does one small unit of work per call — read a directive, open or
close a bracketed construct, read one term — and returns; the calling loop in [`super::Reader`]
keeps invoking it until the frame stack and the top-level predicate-object list are both quiescent
again, which is what makes one `read_chunk` cover an entire top-level construct.
*/

use super::{bad_syntax, decode_utf8, read_escape, Frame, OnClose, Reader, TopLevelPol};
use crate::byte_source::ByteSource;
use crate::error::{Error, Result};
use crate::event::{Sink, StatementEventFlags};
use loomrdf_core::{LogSink, Node, NodeRef};

const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// Which syntactic position a term is being read for; controls what happens to a `[...]`/`(...)`
/// once it is known non-empty (see [`OnClose`]).
#[derive(Clone, Copy)]
enum TermContext {
    Subject,
    Object,
    Member,
}

// ------------------------------------------------------------------------------------------------
// Entry point
// ------------------------------------------------------------------------------------------------

pub(super) fn step<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<()> {
    match reader.stack.last() {
        Some(Frame::Anon { .. }) => step_anon_pol(reader),
        Some(Frame::Collection { .. }) => step_collection(reader),
        None if reader.top_level.is_some() => step_top_level_pol(reader),
        None => step_document(reader),
    }
}

// ------------------------------------------------------------------------------------------------
// Document level
// ------------------------------------------------------------------------------------------------

fn step_document<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<()> {
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        None => Ok(()),
        Some(b'@') => read_at_directive(reader),
        Some(b'}') if reader.is_trig() => {
            if !reader.in_graph_block {
                return Err(bad_syntax(reader, "unmatched `}`"));
            }
            reader.expect_byte(b'}')?;
            reader.current_graph = None;
            reader.in_graph_block = false;
            Ok(())
        }
        Some(_) if peek_keyword_ci(reader, b"BASE")? => {
            consume_bytes(reader, 4)?;
            read_base(reader, true)
        }
        Some(_) if peek_keyword_ci(reader, b"PREFIX")? => {
            consume_bytes(reader, 6)?;
            read_prefix(reader, true)
        }
        Some(_) if reader.is_trig() && peek_keyword_ci(reader, b"GRAPH")? => {
            consume_bytes(reader, 5)?;
            reader.skip_insignificant()?;
            let name = match read_term(reader, TermContext::Subject)? {
                Some(node) => node,
                None => return Err(bad_syntax(reader, "`GRAPH` name cannot be `[...]`/`(...)`")),
            };
            reader.skip_insignificant()?;
            reader.expect_byte(b'{')?;
            reader.current_graph = Some(name);
            reader.in_graph_block = true;
            Ok(())
        }
        Some(_) => {
            match read_term(reader, TermContext::Subject)? {
                None => Ok(()), // a `[`/`(` was opened; BecomeSubject fires once it closes
                Some(node) => {
                    if reader.is_trig() {
                        reader.skip_insignificant()?;
                        if reader.peek_byte()? == Some(b'{') {
                            reader.advance_byte()?;
                            reader.current_graph = Some(node);
                            reader.in_graph_block = true;
                            return Ok(());
                        }
                    }
                    reader.top_level = Some(TopLevelPol {
                        subject: node,
                        predicate: None,
                        awaiting_object: false,
                        statement_emitted: false,
                        subject_marker: StatementEventFlags::NONE,
                    });
                    Ok(())
                }
            }
        }
    }
}

fn read_at_directive<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<()> {
    reader.expect_byte(b'@')?;
    if peek_keyword_ci(reader, b"base")? {
        consume_bytes(reader, 4)?;
        read_base(reader, false)
    } else if peek_keyword_ci(reader, b"prefix")? {
        consume_bytes(reader, 6)?;
        read_prefix(reader, false)
    } else {
        Err(bad_syntax(reader, "expected `@base` or `@prefix`"))
    }
}

fn read_base<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    sparql_style: bool,
) -> Result<()> {
    reader.skip_insignificant()?;
    let iri = read_iri_ref(reader)?;
    reader.set_base_uri(&iri)?;
    if !sparql_style {
        reader.skip_insignificant()?;
        reader.expect_byte(b'.')?;
    }
    Ok(())
}

fn read_prefix<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    sparql_style: bool,
) -> Result<()> {
    reader.skip_insignificant()?;
    let mut name = String::new();
    reader.read_token_while(&mut name, is_pn_chars)?;
    reader.expect_byte(b':')?;
    reader.skip_insignificant()?;
    let iri = read_iri_ref(reader)?;
    reader.set_prefix(&name, &iri)?;
    if !sparql_style {
        reader.skip_insignificant()?;
        reader.expect_byte(b'.')?;
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Predicate-object-list steps
// ------------------------------------------------------------------------------------------------

fn step_top_level_pol<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<()> {
    let awaiting_object = reader
        .top_level
        .as_ref()
        .ok_or_else(|| internal("no active top-level predicate-object list"))?
        .awaiting_object;
    if awaiting_object {
        reader.skip_insignificant()?;
        if let Some(object) = read_term(reader, TermContext::Object)? {
            let caret = reader.caret();
            reader.emit_object(object, StatementEventFlags::NONE, caret)?;
        }
        if let Some(pol) = reader.top_level.as_mut() {
            pol.awaiting_object = false;
        }
        return Ok(());
    }
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        Some(b',') => {
            reader.advance_byte()?;
            if let Some(pol) = reader.top_level.as_mut() {
                pol.awaiting_object = true;
            }
            Ok(())
        }
        Some(b';') => {
            reader.advance_byte()?;
            reader.skip_insignificant()?;
            if let Some(pol) = reader.top_level.as_mut() {
                pol.predicate = None;
            }
            Ok(())
        }
        Some(b'.') => {
            reader.advance_byte()?;
            reader.top_level = None;
            Ok(())
        }
        Some(_) => {
            let predicate = read_predicate(reader)?;
            if let Some(pol) = reader.top_level.as_mut() {
                pol.predicate = Some(predicate);
                pol.awaiting_object = true;
            }
            Ok(())
        }
        None => Err(bad_syntax(reader, "unexpected end of input in a predicate-object list")),
    }
}

fn step_anon_pol<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<()> {
    let awaiting_object = match reader.stack.last() {
        Some(Frame::Anon { awaiting_object, .. }) => *awaiting_object,
        _ => return Err(internal("expected an anon frame on top of the stack")),
    };
    if awaiting_object {
        reader.skip_insignificant()?;
        if let Some(object) = read_term(reader, TermContext::Object)? {
            let caret = reader.caret();
            reader.emit_object(object, StatementEventFlags::NONE, caret)?;
        }
        if let Some(Frame::Anon { awaiting_object, .. }) = reader.stack.last_mut() {
            *awaiting_object = false;
        }
        return Ok(());
    }
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        Some(b',') => {
            reader.advance_byte()?;
            if let Some(Frame::Anon { awaiting_object, .. }) = reader.stack.last_mut() {
                *awaiting_object = true;
            }
            Ok(())
        }
        Some(b';') => {
            reader.advance_byte()?;
            reader.skip_insignificant()?;
            if let Some(Frame::Anon { predicate, .. }) = reader.stack.last_mut() {
                *predicate = None;
            }
            Ok(())
        }
        Some(b']') => {
            reader.advance_byte()?;
            reader.close_anon()
        }
        Some(_) => {
            let predicate = read_predicate(reader)?;
            if let Some(Frame::Anon { predicate: p, awaiting_object, .. }) = reader.stack.last_mut() {
                *p = Some(predicate);
                *awaiting_object = true;
            }
            Ok(())
        }
        None => Err(bad_syntax(reader, "unterminated `[...]`")),
    }
}

fn step_collection<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<()> {
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        Some(b')') => {
            reader.advance_byte()?;
            reader.close_collection()
        }
        Some(_) => match read_term(reader, TermContext::Member)? {
            Some(member) => reader.append_collection_member(member, StatementEventFlags::NONE),
            None => Ok(()), // a nested `[`/`(` was opened; it links itself in eagerly
        },
        None => Err(bad_syntax(reader, "unterminated `(...)`")),
    }
}

// ------------------------------------------------------------------------------------------------
// Terms
// ------------------------------------------------------------------------------------------------

/// Reads one term. Returns `Ok(None)` when the term was `[...]`/`(...)` and a frame was pushed for
/// its interior instead of a resolved node — the caller should simply return and let the next
/// `step` call continue inside that frame.
fn read_term<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    ctx: TermContext,
) -> Result<Option<NodeRef>> {
    reader.skip_insignificant()?;
    match reader.peek_byte()? {
        None => Err(bad_syntax(reader, "expected a term, found end of input")),
        Some(b'<') => {
            let iri = read_iri_ref(reader)?;
            Ok(Some(reader.resolve_iri(&iri)?))
        }
        Some(b'_') if reader.peek_at(1)? == Some(b':') => {
            reader.advance_byte()?;
            reader.advance_byte()?;
            let mut label = String::new();
            reader.read_token_while(&mut label, is_pn_local_char)?;
            Ok(Some(reader.blank_node(&label)?))
        }
        Some(b'?') | Some(b'$') if reader.variables_allowed() => {
            reader.advance_byte()?;
            let mut name = String::new();
            reader.read_token_while(&mut name, is_pn_chars)?;
            Ok(Some(reader.interned_variable(&name)?))
        }
        Some(b'"') | Some(b'\'') => Ok(Some(read_literal(reader)?)),
        Some(b) if b == b'+' || b == b'-' || b.is_ascii_digit() => {
            Ok(Some(read_numeric(reader)?))
        }
        Some(b'[') => {
            reader.advance_byte()?;
            open_anon_for(reader, ctx)?;
            Ok(None)
        }
        Some(b'(') => open_collection_for(reader, ctx),
        Some(_) => Ok(Some(read_prefixed_or_keyword(reader)?)),
    }
}

/// Opens a `[...]` frame for `ctx`. In subject position the blank node is only delivered once the
/// matching `]` closes (there is no containing statement yet to deliver it into). In object or
/// collection-member position the containing link is already fully determined, so it is emitted
/// eagerly — *before* the new frame goes on the stack, so `emit_object`/`append_collection_member`
/// still see the enclosing context, not the frame that was just opened.
fn open_anon_for<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    ctx: TermContext,
) -> Result<()> {
    match ctx {
        TermContext::Subject => {
            reader.open_anon(OnClose::BecomeSubject { marker: StatementEventFlags::ANON_S })?;
        }
        TermContext::Object => {
            reader.check_frame_capacity()?;
            let node = reader.generated_blank();
            let caret = reader.caret();
            reader.emit_object(node.clone(), StatementEventFlags::ANON_O, caret)?;
            reader.push_anon_frame(node, OnClose::Done);
        }
        TermContext::Member => {
            reader.check_frame_capacity()?;
            let node = reader.generated_blank();
            reader.append_collection_member(node.clone(), StatementEventFlags::ANON_O)?;
            reader.push_anon_frame(node, OnClose::Done);
        }
    }
    Ok(())
}

/// Mirrors [`open_anon_for`] for `(...)`, after the empty-list fast path (handled by the caller)
/// has ruled out `rdf:nil`.
fn open_collection_for<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    ctx: TermContext,
) -> Result<Option<NodeRef>> {
    reader.advance_byte()?;
    reader.skip_insignificant()?;
    if reader.peek_byte()? == Some(b')') {
        reader.advance_byte()?;
        return Ok(Some(reader.rdf_nil()?));
    }
    match ctx {
        TermContext::Subject => {
            reader.open_collection(OnClose::BecomeSubject { marker: StatementEventFlags::LIST_S })?;
        }
        TermContext::Object => {
            reader.check_frame_capacity()?;
            let head = reader.generated_blank();
            let caret = reader.caret();
            reader.emit_object(head.clone(), StatementEventFlags::LIST_O, caret)?;
            reader.push_collection_frame(head, OnClose::Done);
        }
        TermContext::Member => {
            reader.check_frame_capacity()?;
            let head = reader.generated_blank();
            reader.append_collection_member(head.clone(), StatementEventFlags::LIST_O)?;
            reader.push_collection_frame(head, OnClose::Done);
        }
    }
    Ok(None)
}

fn read_predicate<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    if reader.peek_byte()? == Some(b'a') {
        let after = reader.peek_at(1)?;
        let boundary = !matches!(after, Some(b) if is_pn_local_char(b));
        if boundary {
            reader.advance_byte()?;
            return reader.rdf_type();
        }
    }
    match read_term(reader, TermContext::Object)? {
        Some(node) if node.is_uri() || node.is_variable() => Ok(node),
        Some(_) => Err(bad_syntax(reader, "a predicate must be an IRI")),
        None => Err(bad_syntax(reader, "a predicate must be an IRI, not `[...]`/`(...)`")),
    }
}

fn read_prefixed_or_keyword<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
) -> Result<NodeRef> {
    let mut prefix = String::new();
    reader.read_token_while(&mut prefix, is_pn_chars)?;
    if reader.peek_byte()? == Some(b':') {
        reader.advance_byte()?;
        let mut local = String::new();
        reader.read_token_while(&mut local, is_pn_local_char)?;
        return reader.resolve_prefixed_name(&prefix, &local);
    }
    match prefix.as_str() {
        "true" => Ok(reader.nodes.intern(Node::boolean(true))),
        "false" => Ok(reader.nodes.intern(Node::boolean(false))),
        "" => Err(bad_syntax(reader, "expected a term")),
        other => Err(bad_syntax(reader, format!("unrecognized token `{other}`"))),
    }
}

// ------------------------------------------------------------------------------------------------
// Literals
// ------------------------------------------------------------------------------------------------

fn read_literal<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    let quote = reader.advance_byte()?.expect("caller peeked a quote byte");
    let long = reader.peek_byte()? == Some(quote) && reader.peek_at(1)? == Some(quote);
    if long {
        reader.advance_byte()?;
        reader.advance_byte()?;
    }
    let body = read_literal_body(reader, quote, long)?;
    if reader.peek_byte()? == Some(b'@') {
        reader.advance_byte()?;
        let mut lang = String::new();
        reader.read_token_while(&mut lang, |b| b.is_ascii_alphanumeric() || b == b'-')?;
        return Ok(reader.nodes.literal_with_language(body, lang)?);
    }
    if reader.peek_byte()? == Some(b'^') && reader.peek_at(1)? == Some(b'^') {
        reader.advance_byte()?;
        reader.advance_byte()?;
        let datatype = match read_term(reader, TermContext::Object)? {
            Some(node) if node.is_uri() => node,
            _ => return Err(bad_syntax(reader, "a datatype must be an IRI")),
        };
        let datatype_iri = datatype.uri_view().expect("checked is_uri").to_string();
        return Ok(reader.nodes.literal_with_datatype(body, datatype_iri)?);
    }
    Ok(reader.nodes.literal(body))
}

fn read_literal_body<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    quote: u8,
    long: bool,
) -> Result<String> {
    let mut buf = String::new();
    loop {
        if buf.len() >= reader.stack_byte_budget() {
            return Err(Error::StackOverflow);
        }
        if long && reader.peek_byte()? == Some(quote) && reader.peek_at(1)? == Some(quote) && reader.peek_at(2)? == Some(quote) {
            reader.advance_byte()?;
            reader.advance_byte()?;
            reader.advance_byte()?;
            return Ok(buf);
        }
        if !long && reader.peek_byte()? == Some(quote) {
            reader.advance_byte()?;
            return Ok(buf);
        }
        match reader.peek_byte()? {
            None => return Err(bad_syntax(reader, "unterminated string literal")),
            Some(b'\\') => {
                reader.advance_byte()?;
                read_escape(reader, &mut buf)?;
            }
            Some(b'\n') | Some(b'\r') if !long => {
                if reader.is_lax() {
                    reader.advance_byte()?;
                    buf.push('\u{FFFD}');
                } else {
                    return Err(bad_syntax(reader, "unescaped newline in a short string literal"));
                }
            }
            Some(lead) => {
                reader.advance_byte()?;
                buf.push(decode_utf8(reader, lead)?);
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Numbers
// ------------------------------------------------------------------------------------------------

fn read_numeric<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<NodeRef> {
    let mut buf = String::new();
    if let Some(b @ (b'+' | b'-')) = reader.peek_byte()? {
        buf.push(b as char);
        reader.advance_byte()?;
    }
    reader.read_token_while(&mut buf, |b| b.is_ascii_digit())?;
    let mut is_decimal = false;
    let mut is_double = false;
    if reader.peek_byte()? == Some(b'.') && matches!(reader.peek_at(1)?, Some(b) if b.is_ascii_digit()) {
        is_decimal = true;
        buf.push('.');
        reader.advance_byte()?;
        reader.read_token_while(&mut buf, |b| b.is_ascii_digit())?;
    }
    if matches!(reader.peek_byte()?, Some(b'e') | Some(b'E')) {
        is_double = true;
        buf.push(reader.advance_byte()?.expect("just peeked") as char);
        if let Some(b @ (b'+' | b'-')) = reader.peek_byte()? {
            buf.push(b as char);
            reader.advance_byte()?;
        }
        reader.read_token_while(&mut buf, |b| b.is_ascii_digit())?;
    }
    let datatype = if is_double {
        loomrdf_core::node::XSD_DOUBLE
    } else if is_decimal {
        loomrdf_core::node::XSD_DECIMAL
    } else {
        XSD_INTEGER
    };
    Ok(reader.nodes.literal_with_datatype(buf, datatype)?)
}

// ------------------------------------------------------------------------------------------------
// IRI references
// ------------------------------------------------------------------------------------------------

fn read_iri_ref<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>) -> Result<String> {
    reader.expect_byte(b'<')?;
    let mut buf = String::new();
    loop {
        match reader.advance_byte()? {
            None => return Err(bad_syntax(reader, "unterminated IRI reference")),
            Some(b'>') => return Ok(buf),
            Some(b'\\') => {
                read_escape(reader, &mut buf)?;
            }
            Some(b) if b < 0x20 || matches!(b, b'<' | b'"' | b'{' | b'}' | b'|' | b'^' | b'`') => {
                if reader.is_lax() {
                    continue;
                }
                return Err(bad_syntax(reader, "illegal character in IRI reference"));
            }
            Some(lead) => buf.push(decode_utf8(reader, lead)?),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Shared helpers
// ------------------------------------------------------------------------------------------------

fn is_pn_chars(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.'
}

fn is_pn_local_char(b: u8) -> bool {
    is_pn_chars(b) || b == b':' || b == b'%'
}

fn peek_keyword_ci<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    word: &[u8],
) -> Result<bool> {
    for (i, &expected) in word.iter().enumerate() {
        match reader.peek_at(i)? {
            Some(b) if b.to_ascii_uppercase() == expected.to_ascii_uppercase() => continue,
            _ => return Ok(false),
        }
    }
    match reader.peek_at(word.len())? {
        Some(b) if is_pn_local_char(b) => Ok(false),
        _ => Ok(true),
    }
}

fn consume_bytes<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>, n: usize) -> Result<()> {
    for _ in 0..n {
        reader.advance_byte()?;
    }
    Ok(())
}

fn internal(message: impl Into<String>) -> Error {
    Error::Internal { message: message.into() }
}

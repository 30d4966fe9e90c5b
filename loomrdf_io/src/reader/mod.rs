/*!
The streaming reader: a hand-written, bounded-stack state machine that pulls bytes from a
[`ByteSource`](crate::byte_source::ByteSource) and pushes [`Event`](crate::event::Event)s into a
[`Sink`](crate::event::Sink). It deliberately does not use native recursion for nested `[...]`
property lists or `(...)` collections — it owns an explicit [`Frame`] stack, bounded at
construction, so a maliciously or accidentally deep document fails with `StackOverflow` rather than
blowing the call stack.

[`mod@turtle`] implements the Turtle/TriG document and statement grammar (directives, abbreviation,
anonymous nodes, collections); [`mod@ntriples`] implements the much simpler N-Triples/N-Quads line
grammar. Both share the scanning primitives and the `Reader` struct defined here.
*/

mod ntriples;
mod turtle;

use crate::byte_source::{ByteSource, Cursor};
use crate::error::{Error, Result};
use crate::event::{Event, Sink, StatementEventFlags};
use loomrdf_core::{
    Caret, LogRecord, LogSink, Node, NodeRef, NodeType, Nodes, NullSink, Severity, Statement,
    StatementFlags, World,
};
use std::rc::Rc;

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The wire format a [`Reader`] or [`crate::writer::Writer`] speaks.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Syntax {
    Turtle,
    TriG,
    NTriples,
    NQuads,
}

impl Syntax {
    pub(crate) fn allows_graphs(self) -> bool {
        matches!(self, Self::TriG | Self::NQuads)
    }
}

///
/// Configuration flags accepted by [`Reader::start`], builder-style.
///
#[derive(Clone, Copy, Debug)]
pub struct ReaderOptions {
    lax: bool,
    variables: bool,
    relative: bool,
    global: bool,
    generated: bool,
    block_size: usize,
    stack_size: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            lax: false,
            variables: false,
            relative: false,
            global: false,
            generated: false,
            block_size: 4096,
            stack_size: 256,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recover from invalid input where possible instead of aborting the chunk.
    pub fn with_lax(mut self, lax: bool) -> Self {
        self.lax = lax;
        self
    }

    /// Accept `?name`/`$name` tokens, producing `Variable` nodes.
    pub fn with_variables(mut self, variables: bool) -> Self {
        self.variables = variables;
        self
    }

    /// Do not resolve URI references against the base; pass them through verbatim.
    pub fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    /// Do not prepend a document-unique prefix to input blank node labels.
    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Do not rename input blank labels that collide with the reader's own generated alphabet.
    pub fn with_generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// The bounded frame-stack depth; exceeding it returns `StackOverflow` rather than recursing.
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size.max(1);
        self
    }

    pub fn is_lax(&self) -> bool {
        self.lax
    }
}

// ------------------------------------------------------------------------------------------------
// Internal frame / continuation machinery
// ------------------------------------------------------------------------------------------------

/// What happens once the frame that a `[ ... ]` or `( ... )` construct opened closes.
///
/// When the construct appears as an object or a collection member, the statement that uses it is
/// emitted eagerly, the moment the bracket opens (the subject/predicate/member context and the
/// fresh blank node are already known then) — this is what gives the reader the event order in
/// `<s> <p> [ <q> <r> ] .` of the containing statement before the interior ones. In that case
/// nothing further happens at close beyond emitting `End`, so `on_close` is [`OnClose::Done`].
/// Only at document top level does a construct's node become a *subject*, and only once the whole
/// `[ ... ] p o .` / `( ... ) p o .` production is seen — so that case alone is deferred to close.
#[derive(Clone, Debug)]
enum OnClose {
    /// The node becomes the active subject of a fresh predicate-object list (only reachable at
    /// document top level: `[ ... ] p o .` or `( ... ) p o .`).
    BecomeSubject { marker: StatementEventFlags },
    /// The containing statement (or collection link) was already emitted when the frame opened;
    /// closing it only produces the `End` event.
    Done,
}

#[derive(Clone, Debug)]
enum Frame {
    /// Inside a `[ ... ]` property list; `subject` is the node the brackets introduced.
    Anon {
        subject: NodeRef,
        predicate: Option<NodeRef>,
        awaiting_object: bool,
        statement_emitted: bool,
        on_close: OnClose,
    },
    /// Inside a `( ... )` collection. `head` is the presumptive first cell, generated and linked
    /// in (or emitted as the containing object) as soon as the collection is known non-empty;
    /// `tail` is `None` until that cell's `rdf:first` has actually been filled.
    Collection {
        head: NodeRef,
        tail: Option<NodeRef>,
        on_close: OnClose,
    },
}

/// The active predicate-object-list context at document top level (outside any frame).
#[derive(Clone, Debug)]
struct TopLevelPol {
    subject: NodeRef,
    predicate: Option<NodeRef>,
    awaiting_object: bool,
    statement_emitted: bool,
    subject_marker: StatementEventFlags,
}

// ------------------------------------------------------------------------------------------------
// Reader
// ------------------------------------------------------------------------------------------------

///
/// Parses one of the four supported syntaxes from a [`ByteSource`], emitting events into a
/// [`Sink`]. Single-threaded, synchronous, and pull-based: nothing here suspends except on the
/// underlying source's `read`.
///
pub struct Reader<S: ByteSource, K: Sink, L: LogSink = NullSink> {
    cursor: Cursor<S>,
    sink: K,
    log: L,
    syntax: Syntax,
    options: ReaderOptions,
    nodes: Rc<Nodes>,
    env: loomrdf_core::Env,
    blank_prefix: String,
    user_blank_seen: std::collections::HashMap<String, NodeRef>,
    generated_counter: u64,
    top_level: Option<TopLevelPol>,
    current_graph: Option<NodeRef>,
    in_graph_block: bool,
    stack: Vec<Frame>,
    finished: bool,
}

impl<S: ByteSource, K: Sink, L: LogSink> Reader<S, K, L> {
    /// Prepares to read `input`, naming it `document` for caret/log purposes and page-buffering it
    /// in chunks of `options`'s `block_size`.
    pub fn start(
        source: S,
        document: impl Into<String>,
        syntax: Syntax,
        world: World,
        sink: K,
        log: L,
        options: ReaderOptions,
    ) -> Self {
        static DOC_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
        let n = DOC_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let document = document.into();
        let block_size = options.block_size;
        log::trace!("Reader::start document={document} syntax={syntax:?}");
        Self {
            cursor: Cursor::new(source, document, block_size),
            sink,
            log,
            syntax,
            options,
            nodes: world.nodes_handle(),
            env: loomrdf_core::Env::new(),
            blank_prefix: format!("f{n}"),
            user_blank_seen: std::collections::HashMap::new(),
            generated_counter: 0,
            top_level: None,
            current_graph: None,
            in_graph_block: false,
            stack: Vec::new(),
            finished: false,
        }
    }

    /// Reads one top-level construct: a directive, a statement, or (TriG) an entire graph block.
    /// Returns `Ok(true)` if a construct was read, `Ok(false)` at end of input. Internally this may
    /// take several parse steps (a statement with nested `[...]`/`(...)` is many steps); the call
    /// only returns once the frame stack and the top-level predicate-object-list context are both
    /// quiescent again.
    pub fn read_chunk(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        self.skip_insignificant()?;
        if self.peek_byte()?.is_none() && self.stack.is_empty() && self.top_level.is_none() {
            self.finished = true;
            return Ok(false);
        }
        loop {
            self.skip_insignificant()?;
            let outcome = match self.syntax {
                Syntax::Turtle | Syntax::TriG => turtle::step(self),
                Syntax::NTriples | Syntax::NQuads => ntriples::step(self),
            };
            match outcome {
                Ok(()) => {}
                Err(err) if self.options.lax && !matches!(err, Error::StackOverflow) => {
                    self.report_warning(&err);
                    self.stack.clear();
                    self.top_level = None;
                    self.current_graph = None;
                    self.in_graph_block = false;
                    self.skip_until_byte(b'\n')?;
                    return Ok(true);
                }
                Err(err) => {
                    log::error!("Reader::read_chunk {err}");
                    return Err(err);
                }
            }
            if self.stack.is_empty() && self.top_level.is_none() {
                return Ok(true);
            }
        }
    }

    /// Reads chunks until end of input or the first error.
    pub fn read_document(&mut self) -> Result<()> {
        while self.read_chunk()? {}
        Ok(())
    }

    /// Advances the cursor until (and including) `byte` is found, or EOF; used for lax recovery.
    pub fn skip_until_byte(&mut self, byte: u8) -> Result<()> {
        loop {
            match self.cursor.advance().map_err(Error::Io)? {
                Some(b) if b == byte => return Ok(()),
                Some(_) => continue,
                None => return Ok(()),
            }
        }
    }

    /// Drains any pending internal state and releases buffers. A document with unclosed `[...]`
    /// or `(...)` at this point is itself a (lax-recoverable) error.
    pub fn finish(mut self) -> Result<()> {
        if !self.stack.is_empty() {
            let err = Error::BadSyntax {
                caret: self.cursor.caret(),
                message: "unclosed `[` or `(` at end of input".to_string(),
            };
            if !self.options.lax {
                return Err(err);
            }
            self.report_warning(&err);
        }
        self.cursor.close().map_err(Error::Io)
    }

    fn report_warning(&mut self, err: &Error) {
        log::warn!("Reader::report_warning {err}");
        self.log.log(LogRecord::new(
            self.cursor.caret(),
            Severity::Warning,
            "READER",
            err.to_string(),
        ));
    }

    // -- shared scanning primitives -------------------------------------------------------------

    fn peek_byte(&mut self) -> Result<Option<u8>> {
        self.cursor.peek().map_err(Error::Io)
    }

    fn peek_at(&mut self, n: usize) -> Result<Option<u8>> {
        self.cursor.peek_at(n).map_err(Error::Io)
    }

    fn advance_byte(&mut self) -> Result<Option<u8>> {
        self.cursor.advance().map_err(Error::Io)
    }

    fn caret(&mut self) -> Caret {
        self.cursor.caret()
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        match self.advance_byte()? {
            Some(b) if b == expected => Ok(()),
            other => Err(Error::BadSyntax {
                caret: self.caret(),
                message: format!(
                    "expected `{}`, found {:?}",
                    expected as char,
                    other.map(|b| b as char)
                ),
            }),
        }
    }

    /// Skips ASCII whitespace and `#`-to-end-of-line comments, which all four syntaxes allow
    /// between tokens.
    fn skip_insignificant(&mut self) -> Result<()> {
        loop {
            match self.peek_byte()? {
                Some(b) if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' => {
                    self.advance_byte()?;
                }
                Some(b'#') => {
                    self.skip_until_byte(b'\n')?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Reads one ASCII-bounded token (an identifier, keyword, or number) accumulated directly
    /// into `buf`, stopping at the first byte for which `is_boundary` returns true. Enforces the
    /// bounded-stack byte budget via `stack_size`.
    fn read_token_while(&mut self, buf: &mut String, is_body: impl Fn(u8) -> bool) -> Result<()> {
        while let Some(b) = self.peek_byte()? {
            if !is_body(b) {
                break;
            }
            if buf.len() >= self.options.stack_size * 64 {
                return Err(Error::StackOverflow);
            }
            buf.push(b as char);
            self.advance_byte()?;
        }
        Ok(())
    }

    fn check_frame_capacity(&self) -> Result<()> {
        if self.stack.len() >= self.options.stack_size {
            return Err(Error::StackOverflow);
        }
        Ok(())
    }

    // -- blank node naming -----------------------------------------------------------------------

    /// Resolves an input `_:label` to a document-scoped blank node, prefixing it with this
    /// document's unique prefix unless `Global` is set.
    fn blank_node(&mut self, label: &str) -> Result<NodeRef> {
        if let Some(existing) = self.user_blank_seen.get(label) {
            return Ok(existing.clone());
        }
        let scoped = if self.options.global {
            label.to_string()
        } else {
            format!("{}_{label}", self.blank_prefix)
        };
        let node = self.nodes.blank(scoped)?;
        self.user_blank_seen.insert(label.to_string(), node.clone());
        Ok(node)
    }

    /// A fresh blank node for a `[...]` or collection cell. Uses a distinct, upper-case-leading
    /// alphabet from user labels unless `Generated` is set, so the two schemes cannot collide.
    fn generated_blank(&mut self) -> NodeRef {
        self.generated_counter += 1;
        let label = if self.options.generated {
            format!("g{}", self.generated_counter)
        } else {
            format!("G{}{}", self.blank_prefix, self.generated_counter)
        };
        self.nodes
            .blank(label)
            .unwrap_or_else(|_| self.nodes.generate_blank())
    }

    fn rdf_type(&self) -> Result<NodeRef> {
        self.nodes.uri(RDF_TYPE).map_err(Error::from)
    }

    fn rdf_nil(&self) -> Result<NodeRef> {
        self.nodes.uri(RDF_NIL).map_err(Error::from)
    }

    // -- IRI resolution ----------------------------------------------------------------------

    fn resolve_iri(&mut self, text: &str) -> Result<NodeRef> {
        if self.options.relative {
            return Ok(self.nodes.uri(text)?);
        }
        let view = self.env.expand(text)?;
        Ok(self.nodes.parsed_uri(&view))
    }

    fn resolve_prefixed_name(&mut self, prefix: &str, local: &str) -> Result<NodeRef> {
        let curie = format!("{prefix}:{local}");
        match self.env.expand(&curie) {
            Ok(view) => Ok(self.nodes.parsed_uri(&view)),
            Err(_) => Err(Error::BadCurie { caret: self.caret(), curie }),
        }
    }

    // -- node/statement delivery ------------------------------------------------------------

    /// Pushes an anon (`[...]`) frame for a freshly generated blank node; `on_close` says what to
    /// do once the matching `]` is found. Eager delivery (if any) is the caller's job, done with
    /// the returned node *before* the frame is pushed — see [`OnClose`].
    fn open_anon(&mut self, on_close: OnClose) -> Result<NodeRef> {
        self.check_frame_capacity()?;
        let node = self.generated_blank();
        self.stack.push(Frame::Anon {
            subject: node.clone(),
            predicate: None,
            awaiting_object: false,
            statement_emitted: false,
            on_close,
        });
        Ok(node)
    }

    /// Pushes a collection (`(...)`) frame known to have at least one member; returns the
    /// presumptive head cell so the caller can eagerly deliver/link it before parsing the
    /// interior. An empty `()` never reaches this — it resolves directly to `rdf:nil`.
    fn open_collection(&mut self, on_close: OnClose) -> Result<NodeRef> {
        self.check_frame_capacity()?;
        let head = self.generated_blank();
        self.stack.push(Frame::Collection { head: head.clone(), tail: None, on_close });
        Ok(head)
    }

    /// Pushes an already-delivered anon frame (the containing statement was emitted eagerly by
    /// the caller); capacity must already have been checked.
    fn push_anon_frame(&mut self, subject: NodeRef, on_close: OnClose) {
        self.stack.push(Frame::Anon {
            subject,
            predicate: None,
            awaiting_object: false,
            statement_emitted: false,
            on_close,
        });
    }

    /// Pushes an already-linked-in collection frame; capacity must already have been checked.
    fn push_collection_frame(&mut self, head: NodeRef, on_close: OnClose) {
        self.stack.push(Frame::Collection { head, tail: None, on_close });
    }

    fn close_anon(&mut self) -> Result<()> {
        let caret = self.caret();
        let frame = self.stack.pop().ok_or_else(|| internal("`]` with no open frame"))?;
        let Frame::Anon { subject, on_close, .. } = frame else {
            return Err(internal("`]` closed a non-anon frame"));
        };
        self.sink.handle(Event::End { node: subject.clone() })?;
        self.finish_frame(subject, on_close, caret)
    }

    fn close_collection(&mut self) -> Result<()> {
        let caret = self.caret();
        let frame = self.stack.pop().ok_or_else(|| internal("`)` with no open frame"))?;
        let Frame::Collection { head, tail, on_close } = frame else {
            return Err(internal("`)` closed a non-collection frame"));
        };
        let nil = self.rdf_nil()?;
        let last_cell = tail.unwrap_or_else(|| head.clone());
        self.emit_internal(last_cell, RDF_REST, nil, StatementEventFlags::TERSE_O, caret.clone())?;
        self.finish_frame(head, on_close, caret)
    }

    /// Links `member` as the next cell of the collection frame currently on top of the stack: the
    /// presumptive head cell if this is the first member, otherwise a fresh cell chained onto the
    /// previous one via `rdf:rest`. `flags` carries `ANON_O`/`LIST_O` through to the `rdf:first`
    /// link when `member` is itself a `[...]` or `(...)` introduced right inside the collection.
    fn append_collection_member(&mut self, member: NodeRef, flags: StatementEventFlags) -> Result<()> {
        let caret = self.caret();
        let (head, tail) = match self.stack.last() {
            Some(Frame::Collection { head, tail, .. }) => (head.clone(), tail.clone()),
            _ => return Err(internal("collection member outside a collection frame")),
        };
        let cell = match tail {
            Some(prev_tail) => {
                let cell = self.generated_blank();
                self.emit_internal(
                    prev_tail,
                    RDF_REST,
                    cell.clone(),
                    StatementEventFlags::TERSE_O,
                    caret.clone(),
                )?;
                cell
            }
            None => head,
        };
        if let Some(Frame::Collection { tail, .. }) = self.stack.last_mut() {
            *tail = Some(cell.clone());
        }
        self.emit_internal(cell, RDF_FIRST, member, flags, caret)
    }

    /// Resolves a frame's closing action once its `End` event (if any) has been emitted. `Done`
    /// means the containing statement or collection link was already emitted when the frame
    /// opened, so there is nothing left to do.
    fn finish_frame(&mut self, node: NodeRef, on_close: OnClose, _caret: Caret) -> Result<()> {
        match on_close {
            OnClose::BecomeSubject { marker } => {
                self.top_level = Some(TopLevelPol {
                    subject: node,
                    predicate: None,
                    awaiting_object: false,
                    statement_emitted: false,
                    subject_marker: marker,
                });
                Ok(())
            }
            OnClose::Done => Ok(()),
        }
    }

    /// Emits a triple/quad using the ambient (subject, predicate) — whichever predicate-object
    /// list is currently active, top level or inside an anon frame — folding in `EMPTY_S` for
    /// continuations and the subject's `ANON_S`/`LIST_S` marker on its first statement.
    fn emit_object(&mut self, object: NodeRef, flags: StatementEventFlags, caret: Caret) -> Result<()> {
        let (subject, predicate, already_emitted, marker) = match self.stack.last() {
            Some(Frame::Anon { subject, predicate, statement_emitted, .. }) => {
                let predicate = predicate
                    .clone()
                    .ok_or_else(|| internal("object with no active predicate"))?;
                (subject.clone(), predicate, *statement_emitted, StatementEventFlags::ANON_S)
            }
            Some(Frame::Collection { .. }) => {
                return Err(internal("object delivered while a collection frame is active"))
            }
            None => {
                let pol = self
                    .top_level
                    .as_ref()
                    .ok_or_else(|| internal("object with no active subject"))?;
                let predicate = pol
                    .predicate
                    .clone()
                    .ok_or_else(|| internal("object with no active predicate"))?;
                (pol.subject.clone(), predicate, pol.statement_emitted, pol.subject_marker)
            }
        };
        let mut event_flags = flags;
        event_flags = if already_emitted {
            event_flags | StatementEventFlags::EMPTY_S
        } else {
            event_flags | marker
        };
        let mut statement = Statement::new(subject, predicate, object).with_caret(caret);
        if let Some(graph) = self.current_graph.clone() {
            statement = statement.with_graph(graph);
        }
        self.sink.handle(Event::Statement { flags: event_flags, statement })?;
        match self.stack.last_mut() {
            Some(Frame::Anon { statement_emitted, .. }) => *statement_emitted = true,
            _ => {
                if let Some(pol) = self.top_level.as_mut() {
                    pol.statement_emitted = true;
                }
            }
        }
        Ok(())
    }

    /// Emits a statement directly (used for the synthetic rdf:first/rdf:rest links a collection
    /// produces), bypassing the ambient-subject EMPTY_S bookkeeping entirely.
    fn emit_internal(
        &mut self,
        subject: NodeRef,
        predicate_iri: &str,
        object: NodeRef,
        flags: StatementEventFlags,
        caret: Caret,
    ) -> Result<()> {
        let predicate = self.nodes.uri(predicate_iri)?;
        let mut statement = Statement::new(subject, predicate, object)
            .with_flags(StatementFlags::IS_COLLECTION_MEMBER)
            .with_caret(caret);
        if let Some(graph) = self.current_graph.clone() {
            statement = statement.with_graph(graph);
        }
        self.sink.handle(Event::Statement { flags, statement })
    }

    /// Emits an already fully-formed statement directly, with no ambient subject/predicate
    /// bookkeeping; used by the N-Triples/N-Quads grammar, which has no predicate-object-list
    /// abbreviation to track.
    fn emit_statement(&mut self, flags: StatementEventFlags, statement: Statement) -> Result<()> {
        self.sink.handle(Event::Statement { flags, statement })
    }

    fn set_base_uri(&mut self, uri: &str) -> Result<()> {
        self.env.set_base_uri(uri)?;
        let view = self.env.base_uri().cloned().expect("just set");
        self.sink.handle(Event::Base { uri: view })
    }

    fn set_prefix(&mut self, name: &str, uri: &str) -> Result<()> {
        self.env.set_prefix(name, uri)?;
        let view = self.env.prefix(name).cloned().expect("just set");
        self.sink.handle(Event::Prefix { name: name.to_string(), uri: view })
    }

    fn is_trig(&self) -> bool {
        self.syntax == Syntax::TriG
    }

    fn allows_graphs(&self) -> bool {
        self.syntax.allows_graphs()
    }

    fn is_lax(&self) -> bool {
        self.options.lax
    }

    /// The byte budget a single accumulating token (a literal body, a long IRI) may grow to before
    /// it is itself treated as a bounded-stack exhaustion.
    fn stack_byte_budget(&self) -> usize {
        self.options.stack_size * 64
    }

    fn variables_allowed(&self) -> bool {
        self.options.variables
    }

    fn interned_variable(&self, name: &str) -> Result<NodeRef> {
        Ok(self.nodes.intern(Node::variable(name)?))
    }
}

fn internal(message: impl Into<String>) -> Error {
    Error::Internal { message: message.into() }
}

fn bad_syntax<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    message: impl Into<String>,
) -> Error {
    Error::BadSyntax { caret: reader.caret(), message: message.into() }
}

fn bad_text<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    message: impl Into<String>,
) -> Error {
    Error::BadText { caret: reader.caret(), message: message.into() }
}

/// Consumes the escape body following an already-consumed `\`, appending the decoded character(s)
/// to `buf`. Shared by the Turtle/TriG string and IRI-reference grammars and by N-Triples/N-Quads,
/// whose string escapes are a subset of the same rules.
fn read_escape<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    buf: &mut String,
) -> Result<()> {
    match reader.advance_byte()? {
        Some(b't') => buf.push('\t'),
        Some(b'b') => buf.push('\u{8}'),
        Some(b'n') => buf.push('\n'),
        Some(b'r') => buf.push('\r'),
        Some(b'f') => buf.push('\u{C}'),
        Some(b'"') => buf.push('"'),
        Some(b'\'') => buf.push('\''),
        Some(b'\\') => buf.push('\\'),
        Some(b'u') => push_code_point(reader, buf, read_hex_digits(reader, 4)?)?,
        Some(b'U') => push_code_point(reader, buf, read_hex_digits(reader, 8)?)?,
        Some(other) if reader.is_lax() => buf.push(other as char),
        _ => return Err(bad_text(reader, "invalid escape sequence")),
    }
    Ok(())
}

fn read_hex_digits<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    count: usize,
) -> Result<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let b = reader.advance_byte()?.ok_or_else(|| bad_text(reader, "truncated unicode escape"))?;
        let digit = (b as char)
            .to_digit(16)
            .ok_or_else(|| bad_text(reader, "invalid hex digit in unicode escape"))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn push_code_point<S: ByteSource, K: Sink, L: LogSink>(
    reader: &mut Reader<S, K, L>,
    buf: &mut String,
    code_point: u32,
) -> Result<()> {
    match char::from_u32(code_point) {
        Some(c) => {
            buf.push(c);
            Ok(())
        }
        None if reader.is_lax() => {
            buf.push('\u{FFFD}');
            Ok(())
        }
        None => Err(bad_text(reader, "escape is not a valid Unicode code point")),
    }
}

/// Decodes the UTF-8 character beginning with the already-consumed `lead` byte, pulling any
/// continuation bytes it implies from the cursor. In lax mode, an invalid lead or a truncated
/// sequence yields U+FFFD rather than failing.
fn decode_utf8<S: ByteSource, K: Sink, L: LogSink>(reader: &mut Reader<S, K, L>, lead: u8) -> Result<char> {
    if lead & 0x80 == 0 {
        return Ok(lead as char);
    }
    let (len, mut code_point) = if lead & 0xE0 == 0xC0 {
        (1, (lead & 0x1F) as u32)
    } else if lead & 0xF0 == 0xE0 {
        (2, (lead & 0x0F) as u32)
    } else if lead & 0xF8 == 0xF0 {
        (3, (lead & 0x07) as u32)
    } else {
        return if reader.is_lax() {
            Ok('\u{FFFD}')
        } else {
            Err(bad_text(reader, "invalid UTF-8 lead byte"))
        };
    };
    for _ in 0..len {
        match reader.advance_byte()? {
            Some(b) if b & 0xC0 == 0x80 => code_point = (code_point << 6) | (b & 0x3F) as u32,
            _ => {
                return if reader.is_lax() {
                    Ok('\u{FFFD}')
                } else {
                    Err(bad_text(reader, "truncated UTF-8 sequence"))
                };
            }
        }
    }
    match char::from_u32(code_point) {
        Some(c) => Ok(c),
        None if reader.is_lax() => Ok('\u{FFFD}'),
        None => Err(bad_text(reader, "UTF-8 sequence decodes to an invalid code point")),
    }
}

#[allow(dead_code)]
fn node_type_name(t: NodeType) -> &'static str {
    match t {
        NodeType::Literal => "literal",
        NodeType::Uri => "uri",
        NodeType::Blank => "blank",
        NodeType::Variable => "variable",
    }
}

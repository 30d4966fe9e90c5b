/*!
The streaming writer: a [`Sink`](crate::event::Sink) that renders an [`Event`](crate::event::Event)
stream back to bytes. It keeps the mirror image of the reader's [`Frame`](crate::reader) stack — a
bounded [`WContext`] stack plus an ambient `top_level` context — so that the same abbreviation a
reader observed (`EMPTY_S`/`ANON_S`/`ANON_O`/`LIST_S`/`LIST_O`/`TERSE_S`/`TERSE_O`) can be
re-rendered without re-deriving it from scratch.

[`mod@turtle`] implements the Turtle/TriG bracket-and-abbreviation engine; [`mod@ntriples`] is the
much simpler flat N-Triples/N-Quads renderer. Both share the `Writer` struct and the term-rendering
helpers defined here.
*/

mod ntriples;
mod turtle;

use crate::byte_sink::ByteSink;
use crate::error::{Error, Result};
use crate::event::{Event, Sink};
use crate::reader::{Syntax, RDF_TYPE};
use loomrdf_core::node::{
    XSD_BOOLEAN, XSD_BYTE, XSD_DECIMAL, XSD_DOUBLE, XSD_FLOAT, XSD_INT, XSD_LONG, XSD_SHORT,
    XSD_UNSIGNED_BYTE, XSD_UNSIGNED_INT, XSD_UNSIGNED_LONG, XSD_UNSIGNED_SHORT,
};
use loomrdf_core::{Env, NodeRef};
use loomrdf_iri::UriView;

use crate::common::indenter::Indenter;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// Configuration flags accepted by [`Writer::start`], builder-style.
///
#[derive(Clone, Copy, Debug)]
pub struct WriterOptions {
    ascii: bool,
    expanded: bool,
    verbatim: bool,
    terse: bool,
    lax: bool,
    rdf_type: bool,
    contextual: bool,
    indent_width: u16,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            ascii: false,
            expanded: false,
            verbatim: false,
            terse: false,
            lax: false,
            rdf_type: false,
            contextual: false,
            indent_width: 2,
        }
    }
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape any byte `>= 0x80` into `\uXXXX`/`\UXXXXXXXX`.
    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    /// Never emit prefixed names; always full `<uri>` forms.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Never resolve URIs against base or shorten to a prefix; emit exactly as received.
    pub fn with_verbatim(mut self, verbatim: bool) -> Self {
        self.verbatim = verbatim;
        self
    }

    /// No newlines at sub-top level (Turtle/TriG).
    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = terse;
        self
    }

    /// Tolerate bad UTF-8 input by replacing with U+FFFD rather than failing.
    pub fn with_lax(mut self, lax: bool) -> Self {
        self.lax = lax;
        self
    }

    /// Emit `rdf:type` rather than the `a` shortcut (Turtle/TriG).
    pub fn with_rdf_type(mut self, rdf_type: bool) -> Self {
        self.rdf_type = rdf_type;
        self
    }

    /// Suppress directives (`@base`, `@prefix`) — useful for fragments.
    pub fn with_contextual(mut self, contextual: bool) -> Self {
        self.contextual = contextual;
        self
    }

    pub fn with_indent_width(mut self, indent_width: u16) -> Self {
        self.indent_width = indent_width.max(1);
        self
    }

    pub fn is_lax(&self) -> bool {
        self.lax
    }
}

// ------------------------------------------------------------------------------------------------
// Internal context stack
// ------------------------------------------------------------------------------------------------

/// What a [`WContext`] is rendering. For `Collection`, `WContext::subject` is the *current* cell —
/// it moves forward each time an `rdf:rest` link is consumed, so the generic "does this statement's
/// subject match the active context" check keeps working unchanged for collections too. `head`
/// keeps the cell the collection actually opened with, since that (not the current cell) is what
/// the reader hands back as the subject if the closed collection continues with more
/// predicate-object pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    TopLevel,
    Anon,
    Collection,
}

#[derive(Clone, Debug)]
struct WContext {
    subject: NodeRef,
    last_predicate: Option<NodeRef>,
    kind: Kind,
    head: Option<NodeRef>,
}

// ------------------------------------------------------------------------------------------------
// Writer
// ------------------------------------------------------------------------------------------------

///
/// Renders one of the four supported syntaxes to a [`ByteSink`] by consuming an [`Event`] stream;
/// implements [`Sink`] so a reader (or any other event producer) can write directly into it.
///
pub struct Writer<S: ByteSink> {
    sink: S,
    syntax: Syntax,
    options: WriterOptions,
    env: Env,
    indenter: Indenter,
    stack: Vec<WContext>,
    top_level: Option<WContext>,
    current_graph: Option<NodeRef>,
    in_graph_block: bool,
    last_closed_subject: Option<NodeRef>,
}

impl<S: ByteSink> Writer<S> {
    pub fn start(sink: S, syntax: Syntax, options: WriterOptions) -> Self {
        log::trace!("Writer::start syntax={syntax:?}");
        Self {
            sink,
            syntax,
            indenter: Indenter::with_width(options.indent_width),
            options,
            env: Env::new(),
            stack: Vec::new(),
            top_level: None,
            current_graph: None,
            in_graph_block: false,
            last_closed_subject: None,
        }
    }

    /// Flushes any pending terminator, closes an open graph block, and releases the sink, handing
    /// it back to the caller (so a `VecSink`'s bytes remain reachable). An unclosed `[...]`/`(...)`
    /// at this point is a caller error, not a writer bug — it means the event stream itself was
    /// malformed.
    pub fn finish(mut self) -> Result<S> {
        if !self.stack.is_empty() {
            let err = Error::BadArg {
                message: "unclosed `[` or `(` context at end of event stream".to_string(),
            };
            log::error!("Writer::finish {err}");
            return Err(err);
        }
        if self.top_level.take().is_some() {
            self.write_raw(b" .\n")?;
        }
        if self.in_graph_block {
            self.indenter = self.indenter.outdent();
            self.write_raw(b"}\n")?;
            self.in_graph_block = false;
        }
        self.sink.close().map_err(Error::BadWrite)?;
        Ok(self.sink)
    }

    fn write_raw(&mut self, buf: &[u8]) -> Result<()> {
        self.sink.write_all(buf).map_err(Error::BadWrite)
    }

    fn is_trig(&self) -> bool {
        self.syntax == Syntax::TriG
    }

    fn ascii(&self) -> bool {
        self.options.ascii
    }

    fn expanded(&self) -> bool {
        self.options.expanded
    }

    fn verbatim(&self) -> bool {
        self.options.verbatim
    }

    fn terse(&self) -> bool {
        self.options.terse
    }

    fn rdf_type_spelled_out(&self) -> bool {
        self.options.rdf_type
    }

    fn contextual(&self) -> bool {
        self.options.contextual
    }
}

impl<S: ByteSink> Sink for Writer<S> {
    fn handle(&mut self, event: Event) -> Result<()> {
        log::trace!("Writer::handle {event:?}");
        match (self.syntax, event) {
            (Syntax::Turtle | Syntax::TriG, Event::Base { uri }) => turtle::handle_base(self, uri),
            (Syntax::Turtle | Syntax::TriG, Event::Prefix { name, uri }) => {
                turtle::handle_prefix(self, name, uri)
            }
            (Syntax::Turtle | Syntax::TriG, Event::Statement { flags, statement }) => {
                turtle::handle_statement(self, flags, statement)
            }
            (Syntax::Turtle | Syntax::TriG, Event::End { node }) => turtle::handle_end(self, node),
            // N-Triples/N-Quads carry no base or prefixes and close nothing; only statements
            // produce output.
            (Syntax::NTriples | Syntax::NQuads, Event::Statement { statement, .. }) => {
                ntriples::handle_statement(self, statement)
            }
            (Syntax::NTriples | Syntax::NQuads, Event::Base { .. } | Event::Prefix { .. } | Event::End { .. }) => {
                Ok(())
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Shared term rendering
// ------------------------------------------------------------------------------------------------

/// Renders a URI node: a prefixed name if one applies, else relative to base, else the absolute
/// form. `is_predicate` additionally enables the `a` shortcut for `rdf:type`.
pub(crate) fn render_uri<S: ByteSink>(writer: &Writer<S>, node: &NodeRef, is_predicate: bool) -> Result<String> {
    if is_predicate && !writer.rdf_type_spelled_out() && node.string() == RDF_TYPE {
        return Ok("a".to_string());
    }
    let view = node.uri_view().expect("uri node carries a parseable URI string");
    if writer.verbatim() {
        return Ok(format!("<{}>", escape_iri(node.string(), writer.ascii())));
    }
    if !writer.expanded() {
        if let Ok(curie) = writer.env.qualify(&view) {
            return Ok(curie);
        }
    }
    if let Some(base) = writer.env.base_uri() {
        let relative = view.relativize(base);
        return Ok(format!("<{}>", escape_iri(&relative.to_string(), writer.ascii())));
    }
    Ok(format!("<{}>", escape_iri(&view.to_string(), writer.ascii())))
}

/// Renders a datatype IRI for a literal's `^^` suffix: prefixed name if one applies, else absolute.
/// Unlike [`render_uri`] this never relativizes against base — a datatype is conventionally always
/// written prefixed or absolute, never path-relative.
fn render_datatype_uri<S: ByteSink>(writer: &Writer<S>, datatype: &str) -> String {
    if !writer.verbatim() && !writer.expanded() {
        if let Ok(view) = datatype.parse::<UriView>() {
            if let Ok(curie) = writer.env.qualify(&view) {
                return curie;
            }
        }
    }
    format!("<{}>", escape_iri(datatype, writer.ascii()))
}

/// Renders a literal node for the abbreviated syntaxes: a numeric/boolean value with a canonical
/// xsd datatype is emitted unquoted when its lexical form already matches the corresponding Turtle
/// grammar production; otherwise a quoted literal with a `@lang` or `^^` suffix.
pub(crate) fn render_literal<S: ByteSink>(writer: &Writer<S>, node: &NodeRef) -> String {
    let value = node.string();
    if !writer.expanded() {
        if let Some(datatype) = node.datatype() {
            if let Some(category) = numeric_category(datatype) {
                if let Some(rendered) = render_numeric_unquoted(value, category) {
                    return rendered;
                }
            }
        }
    }
    let mut out = render_quoted(value, writer.ascii());
    if let Some(lang) = node.language() {
        out.push('@');
        out.push_str(&lang.to_ascii_lowercase());
    } else if let Some(datatype) = node.datatype() {
        out.push_str("^^");
        out.push_str(&render_datatype_uri(writer, datatype));
    }
    out
}

/// Renders a literal node for the flat syntaxes: always short-quoted (N-Triples/N-Quads have no
/// `"""..."""` long-form grammar — an embedded `\n` is escaped, never written raw), datatype IRIs
/// always written in full since there is no prefixed-name grammar either.
pub(crate) fn render_literal_flat<S: ByteSink>(writer: &Writer<S>, node: &NodeRef) -> String {
    let mut out = format!("\"{}\"", escape_short(node.string(), writer.ascii()));
    if let Some(lang) = node.language() {
        out.push('@');
        out.push_str(&lang.to_ascii_lowercase());
    } else if let Some(datatype) = node.datatype() {
        out.push_str("^^<");
        out.push_str(&escape_iri(datatype, writer.ascii()));
        out.push('>');
    }
    out
}

fn render_quoted(value: &str, ascii: bool) -> String {
    if needs_long_form(value) {
        format!("\"\"\"{}\"\"\"", escape_long(value, ascii))
    } else {
        format!("\"{}\"", escape_short(value, ascii))
    }
}

/// `loomrdf_core::node::NodeFlags` has no `IS_LONG` bit to read back, so long-form output is
/// chosen by content instead: a value an unescaped short literal could not hold on one line.
fn needs_long_form(value: &str) -> bool {
    value.contains('\n') || value.contains('\r')
}

// ------------------------------------------------------------------------------------------------
// Numeric literal shorthand
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NumericCategory {
    Boolean,
    Integer,
    Decimal,
    Double,
}

fn numeric_category(datatype: &str) -> Option<NumericCategory> {
    match datatype {
        XSD_BOOLEAN => Some(NumericCategory::Boolean),
        XSD_LONG | XSD_INT | XSD_SHORT | XSD_BYTE | XSD_UNSIGNED_LONG | XSD_UNSIGNED_INT
        | XSD_UNSIGNED_SHORT | XSD_UNSIGNED_BYTE => Some(NumericCategory::Integer),
        XSD_DECIMAL => Some(NumericCategory::Decimal),
        XSD_DOUBLE | XSD_FLOAT => Some(NumericCategory::Double),
        _ => None,
    }
}

fn render_numeric_unquoted(value: &str, category: NumericCategory) -> Option<String> {
    let matches = match category {
        NumericCategory::Boolean => value == "true" || value == "false",
        NumericCategory::Integer => is_turtle_integer(value),
        NumericCategory::Decimal => is_turtle_decimal(value),
        NumericCategory::Double => is_turtle_double(value),
    };
    matches.then(|| value.to_string())
}

fn is_turtle_integer(s: &str) -> bool {
    let s = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_turtle_decimal(s: &str) -> bool {
    let s = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    match s.split_once('.') {
        Some((int_part, frac_part)) => {
            !frac_part.is_empty()
                && int_part.bytes().all(|b| b.is_ascii_digit())
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn is_turtle_double(s: &str) -> bool {
    let s = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    let Some((mantissa, exponent)) = s.split_once('E') else {
        return false;
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => {
            !frac_part.is_empty()
                && int_part.bytes().all(|b| b.is_ascii_digit())
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => !mantissa.is_empty() && mantissa.bytes().all(|b| b.is_ascii_digit()),
    };
    let exponent = exponent.strip_prefix(|c| c == '+' || c == '-').unwrap_or(exponent);
    mantissa_ok && !exponent.is_empty() && exponent.bytes().all(|b| b.is_ascii_digit())
}

// ------------------------------------------------------------------------------------------------
// Escaping
// ------------------------------------------------------------------------------------------------

fn escape_short(value: &str, ascii: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if ascii && (c as u32) >= 0x80 => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

/// Long-form escaping only ever needs `\` and `"` — runs of `"` that would otherwise close the
/// `"""..."""` are always escaped, a conservative superset of "only where it would end the
/// literal" that is always syntactically safe.
fn escape_long(value: &str, ascii: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if ascii && (c as u32) >= 0x80 => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

/// Escapes an IRI reference's forbidden bytes, mirroring the illegal-character set
/// `reader::ntriples::read_iri` rejects on the way in.
fn escape_iri(value: &str, ascii: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => push_unicode_escape(&mut out, c),
            c if ascii && (c as u32) >= 0x80 => push_unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

fn push_unicode_escape(out: &mut String, c: char) {
    let code_point = c as u32;
    if code_point <= 0xFFFF {
        out.push_str(&format!("\\u{code_point:04X}"));
    } else {
        out.push_str(&format!("\\U{code_point:08X}"));
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_short_covers_the_four_required_escapes() {
        assert_eq!(escape_short("a\"b\\c\nd\re\tf", false), "a\\\"b\\\\c\\nd\\re\\tf");
    }

    #[test]
    fn ascii_mode_escapes_non_ascii_code_points() {
        assert_eq!(escape_short("café", true), "caf\\u00E9");
    }

    #[test]
    fn needs_long_form_only_for_embedded_newlines() {
        assert!(needs_long_form("line one\nline two"));
        assert!(!needs_long_form("a quoted \"word\""));
    }

    #[test]
    fn turtle_integer_accepts_optional_sign() {
        assert!(is_turtle_integer("-42"));
        assert!(is_turtle_integer("7"));
        assert!(!is_turtle_integer("4.2"));
        assert!(!is_turtle_integer(""));
    }

    #[test]
    fn turtle_double_accepts_canonical_xsd_form() {
        assert!(is_turtle_double("1.0E0"));
        assert!(is_turtle_double("1.5E-3"));
        assert!(!is_turtle_double("1.0"));
        assert!(!is_turtle_double("NaN"));
    }

    #[test]
    fn render_numeric_unquoted_rejects_non_canonical_values() {
        assert_eq!(render_numeric_unquoted("NaN", NumericCategory::Double), None);
        assert_eq!(
            render_numeric_unquoted("1.0E0", NumericCategory::Double),
            Some("1.0E0".to_string())
        );
    }
}

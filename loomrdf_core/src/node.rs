/*!
The `Node` type: a single RDF term, one of a literal, a URI, a blank node, or a variable.

A `Node` carries exactly the state the model specifies: a type tag, a primary string (the lexical
form of a literal, the text of a URI, the identifier of a blank node or variable), a small flags
bitmask, and an optional secondary string (`meta`) that holds a literal's datatype IRI or language
tag, whichever the flags say is present. Two nodes compare and hash equal exactly when all four of
those fields match; ordering is lexicographic over the same tuple, so a sorted `Vec<Node>` groups
first by type, then by primary string.
*/

use crate::error::{Error, Result};
use crate::value::{kind_for_datatype, parse_lexical_form, TypedValue, TypedValueKind};
use loomrdf_iri::{file_uri_from_path, UriView};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// ------------------------------------------------------------------------------------------------
// Datatype IRI constants
// ------------------------------------------------------------------------------------------------

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const XSD_SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
pub const XSD_BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
pub const XSD_UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
pub const XSD_UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
pub const XSD_UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
pub const XSD_UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
pub const XSD_HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
pub const XSD_BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";
pub const XSD_ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The kind of RDF term a `Node` represents.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Literal,
    Uri,
    Blank,
    Variable,
}

///
/// A small bitmask describing what `Node::meta` holds, if anything. A literal node sets at most
/// one of `HAS_DATATYPE` or `HAS_LANGUAGE`; every other node type leaves both clear.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeFlags(u8);

impl NodeFlags {
    pub const NONE: Self = Self(0);
    pub const HAS_DATATYPE: Self = Self(0b01);
    pub const HAS_LANGUAGE: Self = Self(0b10);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for NodeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

///
/// A single RDF term. See the module documentation for the equality, hash, and ordering contract.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    node_type: NodeType,
    value: String,
    flags: NodeFlags,
    meta: String,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Node {
    /// Constructs a node with no meta string and no flags; the building block every other
    /// constructor reduces to.
    pub fn token<S>(node_type: NodeType, value: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            node_type,
            value: value.into(),
            flags: NodeFlags::NONE,
            meta: String::new(),
        }
    }

    /// A literal with no datatype and no language tag (an XSD string by convention, but not
    /// tagged as one; callers that need the xsd:string datatype explicit should use
    /// [`Node::literal_with_datatype`]).
    pub fn literal<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::token(NodeType::Literal, value)
    }

    /// A literal tagged with a datatype IRI. `datatype_iri` must be an absolute URI and must not
    /// be `rdf:langString` (that datatype is reserved for [`Node::literal_with_language`]).
    pub fn literal_with_datatype<S1, S2>(value: S1, datatype_iri: S2) -> Result<Self>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let datatype_iri = datatype_iri.into();
        let view: UriView = datatype_iri
            .parse()
            .map_err(|_| Error::InvalidDatatypeIri { iri: datatype_iri.clone() })?;
        if !view.is_absolute() || datatype_iri == RDF_LANG_STRING {
            return Err(Error::InvalidDatatypeIri { iri: datatype_iri });
        }
        Ok(Self {
            node_type: NodeType::Literal,
            value: value.into(),
            flags: NodeFlags::HAS_DATATYPE,
            meta: datatype_iri,
        })
    }

    /// A literal tagged with a BCP-47 language tag (implicitly of datatype `rdf:langString`).
    pub fn literal_with_language<S1, S2>(value: S1, language: S2) -> Result<Self>
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let language = language.into();
        language_tags::LanguageTag::parse(&language)
            .map_err(|_| Error::InvalidLanguageTag { tag: language.clone() })?;
        Ok(Self {
            node_type: NodeType::Literal,
            value: value.into(),
            flags: NodeFlags::HAS_LANGUAGE,
            meta: language,
        })
    }

    /// A URI node, validating that `value` parses as a URI reference.
    pub fn uri_from_string<S>(value: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let value = value.into();
        let _: UriView = value
            .parse()
            .map_err(|_| Error::BadUri { uri: value.clone() })?;
        Ok(Self::token(NodeType::Uri, value))
    }

    /// A URI node built directly from an already-parsed `UriView`.
    pub fn uri_from_parsed(view: &UriView) -> Self {
        Self::token(NodeType::Uri, view.to_string())
    }

    /// A `file:` URI node for an absolute filesystem path.
    pub fn file_uri(path: &str, hostname: Option<&str>) -> Result<Self> {
        let view = file_uri_from_path(path, hostname)?;
        Ok(Self::uri_from_parsed(&view))
    }

    /// A blank node with a caller-supplied identifier.
    pub fn blank<S>(id: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let id = id.into();
        if !is_valid_identifier(&id) {
            return Err(Error::InvalidBlankNodeName { name: id });
        }
        Ok(Self::token(NodeType::Blank, id))
    }

    /// A blank node with a freshly generated, process-unique identifier.
    pub fn generate_blank() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
        Self::token(NodeType::Blank, format!("b{n}"))
    }

    /// A variable node (used by the writer's abbreviation context; never appears in a final
    /// triple/quad).
    pub fn variable<S>(name: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let name = name.into();
        if !is_valid_identifier(&name) {
            return Err(Error::InvalidVariableName { name });
        }
        Ok(Self::token(NodeType::Variable, name))
    }

    pub fn boolean(value: bool) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_BOOLEAN)
            .expect("xsd:boolean is a well-formed absolute URI")
    }

    pub fn long(value: i64) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_LONG)
            .expect("xsd:long is a well-formed absolute URI")
    }

    pub fn integer(value: i32) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_INT)
            .expect("xsd:int is a well-formed absolute URI")
    }

    pub fn short(value: i16) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_SHORT)
            .expect("xsd:short is a well-formed absolute URI")
    }

    pub fn byte(value: i8) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_BYTE)
            .expect("xsd:byte is a well-formed absolute URI")
    }

    pub fn unsigned_long(value: u64) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_UNSIGNED_LONG)
            .expect("xsd:unsignedLong is a well-formed absolute URI")
    }

    pub fn unsigned_int(value: u32) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_UNSIGNED_INT)
            .expect("xsd:unsignedInt is a well-formed absolute URI")
    }

    pub fn unsigned_short(value: u16) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_UNSIGNED_SHORT)
            .expect("xsd:unsignedShort is a well-formed absolute URI")
    }

    pub fn unsigned_byte(value: u8) -> Self {
        Self::literal_with_datatype(value.to_string(), XSD_UNSIGNED_BYTE)
            .expect("xsd:unsignedByte is a well-formed absolute URI")
    }

    pub fn float(value: f32) -> Self {
        Self::literal_with_datatype(format_xsd_double(value as f64), XSD_FLOAT)
            .expect("xsd:float is a well-formed absolute URI")
    }

    pub fn double(value: f64) -> Self {
        Self::literal_with_datatype(format_xsd_double(value), XSD_DOUBLE)
            .expect("xsd:double is a well-formed absolute URI")
    }

    #[cfg(feature = "decimal_types")]
    pub fn decimal(value: rust_decimal::Decimal) -> Self {
        Self::literal_with_datatype(value.normalize().to_string(), XSD_DECIMAL)
            .expect("xsd:decimal is a well-formed absolute URI")
    }

    #[cfg(feature = "binary_types")]
    pub fn hex(bytes: &[u8]) -> Self {
        let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        Self::literal_with_datatype(hex, XSD_HEX_BINARY)
            .expect("xsd:hexBinary is a well-formed absolute URI")
    }

    #[cfg(feature = "binary_types")]
    pub fn base64(bytes: &[u8]) -> Self {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self::literal_with_datatype(encoded, XSD_BASE64_BINARY)
            .expect("xsd:base64Binary is a well-formed absolute URI")
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn string(&self) -> &str {
        &self.value
    }

    pub fn length(&self) -> usize {
        self.value.len()
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn datatype(&self) -> Option<&str> {
        if self.flags.contains(NodeFlags::HAS_DATATYPE) {
            Some(&self.meta)
        } else {
            None
        }
    }

    pub fn language(&self) -> Option<&str> {
        if self.flags.contains(NodeFlags::HAS_LANGUAGE) {
            Some(&self.meta)
        } else {
            None
        }
    }

    /// The parsed form of a URI node's string, or `None` for any other node type.
    pub fn uri_view(&self) -> Option<UriView> {
        if self.node_type == NodeType::Uri {
            self.value.parse().ok()
        } else {
            None
        }
    }

    pub fn is_literal(&self) -> bool {
        self.node_type == NodeType::Literal
    }

    pub fn is_uri(&self) -> bool {
        self.node_type == NodeType::Uri
    }

    pub fn is_blank(&self) -> bool {
        self.node_type == NodeType::Blank
    }

    pub fn is_variable(&self) -> bool {
        self.node_type == NodeType::Variable
    }

    /// Parses this literal's lexical form into a `TypedValue`, per its datatype. `None` for any
    /// non-literal node, an untagged literal, or a datatype this accessor does not cover (language
    /// tags carry no value; binary datatypes go through [`Node::decode`] instead).
    pub fn value(&self) -> Option<TypedValue> {
        let kind = kind_for_datatype(self.datatype()?)?;
        parse_lexical_form(&self.value, kind)
    }

    /// `value()`, then coerced to `target`. See [`TypedValue::coerce`] for the `lossy` contract.
    pub fn value_as(&self, target: TypedValueKind, lossy: bool) -> Option<TypedValue> {
        self.value()?.coerce(target, lossy)
    }

    /// An upper bound on the decoded byte length of a `hexBinary`/`base64Binary` literal, or
    /// `None` for any other node.
    #[cfg(feature = "binary_types")]
    pub fn decode_size(&self) -> Option<usize> {
        match self.datatype()? {
            XSD_HEX_BINARY => Some(self.value.len() / 2),
            XSD_BASE64_BINARY => Some(self.value.len().div_ceil(4) * 3),
            _ => None,
        }
    }

    /// Decodes a `hexBinary`/`base64Binary` literal's lexical form into `buf`, returning the
    /// number of bytes written, or `None` for any other node. Fails with `Error::Overflow` if
    /// `buf` is smaller than `decode_size()`.
    #[cfg(feature = "binary_types")]
    pub fn decode(&self, buf: &mut [u8]) -> Result<Option<usize>> {
        let Some(required) = self.decode_size() else {
            return Ok(None);
        };
        if buf.len() < required {
            return Err(Error::Overflow { required });
        }
        match self.datatype() {
            Some(XSD_HEX_BINARY) => decode_hex(&self.value, buf).map(Some),
            Some(XSD_BASE64_BINARY) => {
                use base64::Engine;
                base64::engine::general_purpose::STANDARD
                    .decode_slice(&self.value, buf)
                    .map(Some)
                    .map_err(|_| Error::InvalidFromStr {
                        value: self.value.clone(),
                        name: "base64Binary".to_string(),
                    })
            }
            _ => unreachable!("decode_size already confirmed a binary datatype"),
        }
    }
}

/// Decodes a `hexBinary` lexical form (pairs of upper/lower-case hex digits) into `buf`.
#[cfg(feature = "binary_types")]
fn decode_hex(text: &str, buf: &mut [u8]) -> Result<usize> {
    let bytes = text.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(Error::InvalidFromStr { value: text.to_string(), name: "hexBinary".to_string() });
    }
    for (i, chunk) in bytes.chunks_exact(2).enumerate() {
        let hi = (chunk[0] as char)
            .to_digit(16)
            .ok_or_else(|| Error::InvalidFromStr { value: text.to_string(), name: "hexBinary".to_string() })?;
        let lo = (chunk[1] as char)
            .to_digit(16)
            .ok_or_else(|| Error::InvalidFromStr { value: text.to_string(), name: "hexBinary".to_string() })?;
        buf[i] = ((hi << 4) | lo) as u8;
    }
    Ok(bytes.len() / 2)
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

/// Renders `v` in the XSD canonical form for `double`/`float`: a decimal mantissa with at least
/// one fractional digit, followed by an upper-case `E` and the exponent.
pub(crate) fn format_xsd_double(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "INF".to_string() } else { "-INF".to_string() };
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0E0".to_string() } else { "0.0E0".to_string() };
    }
    let rendered = format!("{v:E}");
    let (mantissa, exponent) = rendered.split_once('E').expect("{:E} always contains 'E'");
    let mantissa = if mantissa.contains('.') {
        mantissa.to_string()
    } else {
        format!("{mantissa}.0")
    };
    format!("{mantissa}E{exponent}")
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_nodes_compare_by_type_then_value() {
        let a = Node::token(NodeType::Literal, "a");
        let b = Node::token(NodeType::Uri, "a");
        assert!(a < b);
    }

    #[test]
    fn literal_with_datatype_and_language_are_mutually_exclusive_by_construction() {
        let typed = Node::literal_with_datatype("1", XSD_INT).unwrap();
        assert_eq!(typed.datatype(), Some(XSD_INT));
        assert_eq!(typed.language(), None);

        let tagged = Node::literal_with_language("hi", "en").unwrap();
        assert_eq!(tagged.language(), Some("en"));
        assert_eq!(tagged.datatype(), None);
    }

    #[test]
    fn lang_string_datatype_is_rejected() {
        let err = Node::literal_with_datatype("hi", RDF_LANG_STRING).unwrap_err();
        assert!(matches!(err, Error::InvalidDatatypeIri { .. }));
    }

    #[test]
    fn invalid_language_tag_is_rejected() {
        assert!(Node::literal_with_language("hi", "not a tag!").is_err());
    }

    #[test]
    fn generated_blank_nodes_are_unique() {
        let a = Node::generate_blank();
        let b = Node::generate_blank();
        assert_ne!(a.string(), b.string());
    }

    #[test]
    fn uri_node_round_trips_through_uri_view() {
        let node = Node::uri_from_string("http://example.com/a").unwrap();
        let view = node.uri_view().unwrap();
        assert_eq!(view.to_string(), "http://example.com/a");
    }

    #[test]
    fn invalid_blank_node_name_is_rejected() {
        assert!(Node::blank("1not-valid").is_err());
    }

    #[test]
    fn format_xsd_double_always_has_a_decimal_point() {
        assert_eq!(format_xsd_double(1.0), "1.0E0");
        assert_eq!(format_xsd_double(0.0015), "1.5E-3");
    }

    #[test]
    fn value_parses_by_datatype_and_is_none_for_untagged_literals() {
        assert_eq!(Node::integer(7).value(), Some(TypedValue::Int(7)));
        assert_eq!(Node::literal("plain").value(), None);
        assert_eq!(Node::literal_with_language("hi", "en").unwrap().value(), None);
    }

    #[test]
    fn value_as_coerces_through_value() {
        let node = Node::byte(12);
        assert_eq!(node.value_as(TypedValueKind::Long, false), Some(TypedValue::Long(12)));
        assert_eq!(node.value_as(TypedValueKind::Boolean, false), None);
    }

    #[cfg(feature = "binary_types")]
    #[test]
    fn hex_round_trips_through_decode() {
        let node = Node::hex(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(node.decode_size(), Some(4));
        let mut buf = [0u8; 4];
        assert_eq!(node.decode(&mut buf).unwrap(), Some(4));
        assert_eq!(buf, [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[cfg(feature = "binary_types")]
    #[test]
    fn base64_round_trips_through_decode() {
        let node = Node::base64(&[1, 2, 3, 4, 5]);
        let mut buf = vec![0u8; node.decode_size().unwrap()];
        let written = node.decode(&mut buf).unwrap().unwrap();
        assert_eq!(&buf[..written], &[1, 2, 3, 4, 5]);
    }

    #[cfg(feature = "binary_types")]
    #[test]
    fn decode_rejects_an_undersized_buffer() {
        let node = Node::hex(&[0xAB, 0xCD]);
        let mut buf = [0u8; 1];
        assert!(matches!(node.decode(&mut buf), Err(Error::Overflow { required: 2 })));
    }

    #[cfg(feature = "binary_types")]
    #[test]
    fn decode_size_is_none_for_non_binary_nodes() {
        assert_eq!(Node::integer(1).decode_size(), None);
    }
}

/*!
Provides the crate's `Error` and `Result` types, plus the `Status` code a caller-facing API can
map an `Error` onto.
*/

use std::fmt::{Debug, Display};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The Error type for this crate.
///
#[derive(Debug)]
pub enum Error {
    /// The String value provided is not a valid value for its type.
    InvalidFromStr { value: String, name: String },
    /// The string provided is not a valid blank node identifier.
    InvalidBlankNodeName { name: String },
    /// The string provided is not a valid variable name.
    InvalidVariableName { name: String },
    /// A literal may set at most one of a datatype or a language tag, never both.
    ConflictingLiteralMeta,
    /// A language-tagged literal's tag failed to parse.
    InvalidLanguageTag { tag: String },
    /// A literal's datatype must be an absolute IRI, and not `rdf:langString`.
    InvalidDatatypeIri { iri: String },
    /// An absolute IRI was expected, but the value given was relative.
    AbsoluteIriExpected { uri: String },
    /// The given path is not an absolute filesystem path.
    NotAnAbsolutePath { path: String },
    /// A CURIE did not match the `prefix:local` grammar.
    BadCurie { curie: String },
    /// An environment has no prefix mapping by this name.
    UnknownPrefix { name: String },
    /// An environment has no base URI against which to resolve a relative reference.
    NoBaseUri,
    /// A URI node's string did not itself parse as a URI.
    BadUri { uri: String },
    /// A caller-supplied buffer was smaller than the decoded size it needed to hold.
    Overflow { required: usize },
    /// An error in the standard I/O library.
    Io(std::io::Error),
    /// An error parsing or normalizing an IRI component.
    Iri(loomrdf_iri::error::Error),
    /// An error parsing a language-tag string.
    LanguageTag(language_tags::ParseError),
    /// An error converting bytes to UTF-8 text.
    Utf8(std::string::FromUtf8Error),
}

///
/// A Result type that specifically uses this crate's Error.
///
pub type Result<T> = std::result::Result<T, Error>;

///
/// A coarse-grained status code, intended for callers that need to map an `Error` onto a small,
/// stable set of outcomes (for example, a C ABI boundary) rather than match on `Error` itself.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    BadSyntax,
    BadArg,
    NotFound,
    IdClash,
    BadCurie,
    Internal,
    StackOverflow,
    BadText,
    BadWrite,
    NoData,
    BadCall,
    BadUri,
    Overflow,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Error {
    /// Maps this error onto the coarse `Status` a caller-facing API reports.
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidFromStr { .. } => Status::BadArg,
            Self::InvalidBlankNodeName { .. } => Status::BadArg,
            Self::InvalidVariableName { .. } => Status::BadArg,
            Self::ConflictingLiteralMeta => Status::BadArg,
            Self::InvalidLanguageTag { .. } => Status::BadText,
            Self::InvalidDatatypeIri { .. } => Status::BadArg,
            Self::AbsoluteIriExpected { .. } => Status::BadUri,
            Self::NotAnAbsolutePath { .. } => Status::BadArg,
            Self::BadCurie { .. } => Status::BadCurie,
            Self::UnknownPrefix { .. } => Status::NotFound,
            Self::NoBaseUri => Status::BadCall,
            Self::BadUri { .. } => Status::BadUri,
            Self::Overflow { .. } => Status::Overflow,
            Self::Io(_) => Status::BadWrite,
            Self::Iri(_) => Status::BadUri,
            Self::LanguageTag(_) => Status::BadText,
            Self::Utf8(_) => Status::BadText,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::InvalidFromStr { value, name } => format!(
                    "The value `{value}` is not a valid value for the type `{name}`."
                ),
                Self::InvalidBlankNodeName { name } =>
                    format!("`{name}` is not a valid blank node identifier."),
                Self::InvalidVariableName { name } =>
                    format!("`{name}` is not a valid variable name."),
                Self::ConflictingLiteralMeta =>
                    "A literal may carry a datatype or a language tag, never both.".to_string(),
                Self::InvalidLanguageTag { tag } =>
                    format!("`{tag}` is not a well-formed language tag."),
                Self::InvalidDatatypeIri { iri } =>
                    format!("`{iri}` is not a usable literal datatype IRI."),
                Self::AbsoluteIriExpected { uri } =>
                    format!("An absolute IRI was expected, found `{uri}`."),
                Self::NotAnAbsolutePath { path } =>
                    format!("`{path}` is not an absolute filesystem path."),
                Self::BadCurie { curie } => format!("`{curie}` is not a valid CURIE."),
                Self::UnknownPrefix { name } => format!("No prefix is bound to `{name}`."),
                Self::NoBaseUri =>
                    "No base URI is set to resolve the reference against.".to_string(),
                Self::BadUri { uri } => format!("`{uri}` is not a valid URI."),
                Self::Overflow { required } =>
                    format!("the destination buffer is too small; {required} bytes are required."),
                Self::Io(source) => format!("An I/O error occurred; source: {source}"),
                Self::Iri(source) => format!("An error occurred processing an IRI; source: {source}"),
                Self::LanguageTag(source) =>
                    format!("An error occurred parsing a language tag; source: {source}"),
                Self::Utf8(source) =>
                    format!("An error occurred parsing a UTF-8 string; source: {source}"),
            }
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(source) => Some(source),
            Self::Iri(source) => Some(source),
            Self::LanguageTag(source) => Some(source),
            Self::Utf8(source) => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(source)
    }
}

impl From<loomrdf_iri::error::Error> for Error {
    fn from(source: loomrdf_iri::error::Error) -> Self {
        Self::Iri(source)
    }
}

impl From<language_tags::ParseError> for Error {
    fn from(source: language_tags::ParseError) -> Self {
        Self::LanguageTag(source)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(source: std::string::FromUtf8Error) -> Self {
        Self::Utf8(source)
    }
}

// ------------------------------------------------------------------------------------------------
// Unit Tests
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_literal_meta_maps_to_bad_arg() {
        assert_eq!(Error::ConflictingLiteralMeta.status(), Status::BadArg);
    }

    #[test]
    fn no_base_uri_maps_to_bad_call() {
        assert_eq!(Error::NoBaseUri.status(), Status::BadCall);
    }
}

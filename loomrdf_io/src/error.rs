/*!
The `Error`, `Result`, and `Status` types shared by the reader and writer.
*/

use loomrdf_core::Caret;
use std::fmt::{Debug, Display};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

///
/// The Error type for this crate.
///
#[derive(Debug)]
pub enum Error {
    /// A document failed to parse at the given location, in strict mode.
    BadSyntax { caret: Caret, message: String },
    /// A literal's text, once decoded, was not valid (bad escape, invalid UTF-8) in strict mode.
    BadText { caret: Caret, message: String },
    /// A CURIE referenced an unbound prefix.
    BadCurie { caret: Caret, curie: String },
    /// The reader's bounded internal stack was exhausted.
    StackOverflow,
    /// A caller violated a precondition (invalid option combination, invalid node passed to the
    /// writer).
    BadArg { message: String },
    /// An operation was invoked out of order (for example, writing before `start`).
    BadCall { message: String },
    /// Two input sources assigned the same blank node label to different document-scoped nodes.
    IdClash { label: String },
    /// An internal invariant was violated; always a bug in this crate, never caller input.
    Internal { message: String },
    /// An error from the byte sink.
    BadWrite(std::io::Error),
    /// An error from the byte source.
    Io(std::io::Error),
    /// An error constructing or validating a node or environment entry.
    Core(loomrdf_core::error::Error),
    /// An error parsing or resolving a URI.
    Iri(loomrdf_iri::error::Error),
}

///
/// A Result type that specifically uses this crate's Error.
///
pub type Result<T> = std::result::Result<T, Error>;

///
/// The coarse status a caller uses to distinguish ordinary end-of-data (`Failure`) from any other,
/// genuine error.
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
    pub fn status(&self) -> Status {
        match self {
            Self::BadSyntax { .. } => Status::BadSyntax,
            Self::BadText { .. } => Status::BadText,
            Self::BadCurie { .. } => Status::BadCurie,
            Self::StackOverflow => Status::StackOverflow,
            Self::BadArg { .. } => Status::BadArg,
            Self::BadCall { .. } => Status::BadCall,
            Self::IdClash { .. } => Status::IdClash,
            Self::Internal { .. } => Status::Internal,
            Self::BadWrite(_) => Status::BadWrite,
            Self::Io(_) => Status::NoData,
            Self::Core(source) => match source.status() {
                loomrdf_core::error::Status::BadUri => Status::BadUri,
                loomrdf_core::error::Status::BadCurie => Status::BadCurie,
                loomrdf_core::error::Status::BadArg => Status::BadArg,
                loomrdf_core::error::Status::BadCall => Status::BadCall,
                loomrdf_core::error::Status::NotFound => Status::NotFound,
                loomrdf_core::error::Status::BadText => Status::BadText,
                loomrdf_core::error::Status::Overflow => Status::Overflow,
                _ => Status::Internal,
            },
            Self::Iri(_) => Status::BadUri,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::BadSyntax { caret, message } => format!("{caret}: syntax error: {message}"),
                Self::BadText { caret, message } => format!("{caret}: invalid text: {message}"),
                Self::BadCurie { caret, curie } =>
                    format!("{caret}: `{curie}` has no bound prefix"),
                Self::StackOverflow =>
                    "the reader's bounded internal stack was exhausted".to_string(),
                Self::BadArg { message } => message.clone(),
                Self::BadCall { message } => message.clone(),
                Self::IdClash { label } =>
                    format!("blank node label `{label}` is used by two different input sources"),
                Self::Internal { message } => format!("internal error: {message}"),
                Self::BadWrite(source) => format!("write error: {source}"),
                Self::Io(source) => format!("read error: {source}"),
                Self::Core(source) => format!("{source}"),
                Self::Iri(source) => format!("{source}"),
            }
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadWrite(source) => Some(source),
            Self::Io(source) => Some(source),
            Self::Core(source) => Some(source),
            Self::Iri(source) => Some(source),
            _ => None,
        }
    }
}

impl From<loomrdf_core::error::Error> for Error {
    fn from(source: loomrdf_core::error::Error) -> Self {
        Self::Core(source)
    }
}

impl From<loomrdf_iri::error::Error> for Error {
    fn from(source: loomrdf_iri::error::Error) -> Self {
        Self::Iri(source)
    }
}

/*!
A from-scratch URI/IRI algebra: parsing, resolution against a base, relativization against a
base, and file-URI percent-encoding, without delegating to a pre-built URI crate.

The `UriView` type is the central type of this crate; it slices a URI into its RFC-3986
components (scheme, authority, path, query, fragment) plus an internal `PathPrefix` hint used
only while relativizing. Each component has its own newtype (`Scheme`, `Authority`, `Path`,
`Query`, `Fragment`) so that validation, normalization and display formatting are implemented
once, next to the grammar they each follow.
*/

#![warn(
    unknown_lints,
    absolute_paths_not_starting_with_crate,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    macro_use_extern_crate,
    nonstandard_style,
    noop_method_call,
    rust_2018_idioms,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    future_incompatible,
    rust_2021_compatibility,
    missing_debug_implementations,
    unreachable_pub,
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unused,
)]
#![deny(
    exported_private_dependencies,
    anonymous_parameters,
    bare_trait_objects,
    ellipsis_inclusive_range_patterns,
    deref_nullptr,
    drop_bounds,
    dyn_drop,
)]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;

pub mod error;
mod parse;
mod pct_encoding;

mod scheme;
pub use scheme::Scheme;

mod authority;
pub use authority::{Authority, Port, UserInfo};

mod path;
pub use path::{Path, PathPrefix};

mod query;
pub use query::{Query, QueryPart};

mod fragment;
pub use fragment::Fragment;

mod uri;
pub use uri::UriView;

mod file_uri;
pub use file_uri::file_uri_from_path;

use crate::error::Result as IriResult;

// ------------------------------------------------------------------------------------------------
// Public Traits
// ------------------------------------------------------------------------------------------------

///
/// Implemented by every component of the URI algebra that has a canonical normalized form (RFC
/// 3986 §6). The default implementation is the identity function, for components such as
/// `Fragment` and `Path` segments whose normalization is either a no-op or handled elsewhere.
///
pub trait Normalize: Sized {
    fn normalize(self) -> IriResult<Self> {
        Ok(self)
    }
}

///
/// Implemented by components that can validate an already-split string slice against their
/// grammar, independently of constructing the value. Used by `FromStr` impls to decide between
/// `Ok` and an `InvalidChar` error.
///
pub trait ValidateStr {
    fn is_valid(s: &str) -> bool;
}

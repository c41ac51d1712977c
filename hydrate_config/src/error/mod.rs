//! Error types produced while hydrating a destination.

mod constructors;
mod path;
mod types;

pub(crate) use constructors::raw_kind;

pub use path::PathSegment;
pub use types::{HydrateError, HydrateErrorKind};

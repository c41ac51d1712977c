//! Extensions for attaching path context to `HydrateResult` values.
//!
//! Each recursive handler wraps the result of its child with one of these
//! helpers so the final error names the full path from the destination root
//! to the failing leaf.
//!
//! # Examples
//!
//! ```
//! use hydrate_config::{HydrateError, HydrateResult, HydrateResultExt};
//! use serde_json::json;
//!
//! fn leaf() -> HydrateResult<()> {
//!     Err(HydrateError::cast(&json!("x"), "u8", "invalid digit"))
//! }
//!
//! let err = leaf().at_index(3).at_field("ports").unwrap_err();
//! assert_eq!(err.path_string(), "ports[3]");
//! ```

use crate::{HydrateResult, PathSegment};

/// Path-context helpers for [`HydrateResult`].
pub trait HydrateResultExt<T> {
    /// Prepend a struct field name to the error path.
    ///
    /// # Errors
    ///
    /// Propagates the original error with the field prepended.
    fn at_field(self, field: &'static str) -> HydrateResult<T>;

    /// Prepend a sequence or array index to the error path.
    ///
    /// # Errors
    ///
    /// Propagates the original error with the index prepended.
    fn at_index(self, index: usize) -> HydrateResult<T>;

    /// Prepend a map key to the error path.
    ///
    /// # Errors
    ///
    /// Propagates the original error with the key prepended.
    fn at_key(self, key: &str) -> HydrateResult<T>;
}

impl<T> HydrateResultExt<T> for HydrateResult<T> {
    fn at_field(self, field: &'static str) -> HydrateResult<T> {
        self.map_err(|e| e.within(PathSegment::Field(field)))
    }

    fn at_index(self, index: usize) -> HydrateResult<T> {
        self.map_err(|e| e.within(PathSegment::Index(index)))
    }

    fn at_key(self, key: &str) -> HydrateResult<T> {
        self.map_err(|e| e.within(PathSegment::Key(key.to_owned())))
    }
}

//! Core crate for hydrating statically typed configuration from untyped,
//! string-valued host payloads.
//!
//! A payload is decoded into a [`RawValue`] tree and then walked against the
//! destination type's [`Shape`]. Structs resolve each field through a fixed
//! list of candidate keys, fall back to declared defaults and enforce
//! required fields; containers recurse element by element; primitives are
//! cast leniently from strings, numbers and booleans.
//!
//! ```rust
//! use hydrate_config::{Hydrate, hydrate_from_slice};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Hydrate)]
//! struct RetryPolicy {
//!     #[hydrate(default = "3")]
//!     max_attempts: u8,
//!     #[hydrate(default = "250ms")]
//!     backoff: Duration,
//! }
//!
//! #[derive(Debug, Default, Hydrate)]
//! struct PluginConfig {
//!     #[hydrate(required)]
//!     brokers: Vec<String>,
//!     retry_policy: RetryPolicy,
//! }
//!
//! # fn main() -> hydrate_config::HydrateResult<()> {
//! let config: PluginConfig = hydrate_from_slice(br#"{"brokers": ["kafka:9092"]}"#)?;
//! assert_eq!(config.retry_policy.max_attempts, 3);
//! assert_eq!(config.retry_policy.backoff, Duration::from_millis(250));
//! # Ok(())
//! # }
//! ```

extern crate self as hydrate_config;

pub use hydrate_config_macros::Hydrate;

mod cast;
mod containers;
mod dispatch;
mod env;
mod error;
mod load;
mod payload;
mod result_ext;
mod shape;
mod structs;

pub use cast::{Scalar, set_primitive};
pub use containers::{MapKey, set_array, set_map, set_sequence};
pub use dispatch::set_value;
pub use env::{EnvSource, hydrate_from_env};
pub use error::{HydrateError, HydrateErrorKind, PathSegment};
pub use load::{hydrate_from_slice, hydrate_from_str, hydrate_from_value, hydrate_into};
pub use payload::{PayloadFormat, hydrate_with_format};
pub use result_ext::HydrateResultExt;
pub use shape::{FieldSpec, PrimitiveKind, Shape};
pub use structs::{candidate_keys, set_struct};

/// Decoded but untyped payload node.
///
/// Objects, lists and scalars map onto the corresponding
/// [`serde_json::Value`] variants.
pub type RawValue = serde_json::Value;

/// Result alias used throughout the crate.
pub type HydrateResult<T> = Result<T, HydrateError>;

/// Types that can be populated from a [`RawValue`].
///
/// Implementations exist for the primitive scalars, `String`,
/// [`std::time::Duration`], `chrono` timestamps, `Vec<T>`, `[T; N]`,
/// `HashMap`/`BTreeMap`, `Option<T>` and `Box<T>`. Structs implement it via
/// `#[derive(Hydrate)]`.
pub trait Hydrate {
    /// Static description of this destination's shape category.
    const SHAPE: Shape;

    /// Populate `self` from `raw`.
    ///
    /// # Errors
    ///
    /// Returns a [`HydrateError`] when `raw` is incompatible with the
    /// destination or a scalar cannot be cast.
    fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()>;
}

/// Field table and per-field setter for struct destinations.
///
/// Generated by `#[derive(Hydrate)]`; consumed by [`set_struct`].
pub trait HydrateStruct {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Hydrated fields in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// Hydrate the field at `index` within [`Self::FIELDS`] from `raw`.
    ///
    /// # Errors
    ///
    /// Propagates the field's hydration error without adding path context;
    /// [`set_struct`] prepends the field name.
    fn hydrate_field(&mut self, index: usize, raw: &RawValue) -> HydrateResult<()>;
}

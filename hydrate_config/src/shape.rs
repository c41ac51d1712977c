//! Static shape descriptors for hydration destinations.

use std::fmt;

/// Shape category of a destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Struct with named fields, hydrated by the field resolver.
    Struct {
        /// Struct type name.
        name: &'static str,
    },
    /// Growable sequence such as `Vec<T>`.
    Sequence,
    /// Fixed-length array `[T; N]`.
    FixedArray {
        /// Required element count.
        len: usize,
    },
    /// String-keyed associative map.
    Map {
        /// Whether the key type is string-like; other key types are rejected.
        string_keys: bool,
    },
    /// Lazily allocated optional value.
    Optional,
    /// Scalar handled by the primitive caster.
    Primitive(PrimitiveKind),
}

impl Shape {
    /// Returns `true` for struct shapes.
    #[must_use]
    pub const fn is_struct(self) -> bool {
        matches!(self, Self::Struct { .. })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct { name } => write!(f, "struct {name}"),
            Self::Sequence => f.write_str("sequence"),
            Self::FixedArray { len } => write!(f, "array of {len}"),
            Self::Map { .. } => f.write_str("map"),
            Self::Optional => f.write_str("optional"),
            Self::Primitive(kind) => write!(f, "{kind}"),
        }
    }
}

/// Scalar categories understood by the primitive caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    String,
    /// [`std::time::Duration`], parsed with the duration-literal grammar.
    Duration,
    /// `chrono` date-time.
    Timestamp,
}

impl PrimitiveKind {
    /// Name used in cast diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one hydrated struct field.
///
/// The derive macro emits one entry per field in declaration order. Fields
/// are public so the generated tables can be written as constant struct
/// literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field identifier without any raw-identifier prefix.
    pub name: &'static str,
    /// Serialized-name override; `"-"` disables it.
    pub rename: Option<&'static str>,
    /// Literal substituted when the field is absent.
    pub default: Option<&'static str>,
    /// Fail when the field is absent and has no default.
    pub required: bool,
    /// Shape of the field's type.
    pub shape: Shape,
}

impl FieldSpec {
    /// Marker that disables a serialized-name override.
    pub const IGNORE_RENAME: &'static str = "-";

    /// Serialized-name override, unless it is the ignore marker.
    #[must_use]
    pub fn serialized_name(&self) -> Option<&'static str> {
        self.rename.filter(|name| *name != Self::IGNORE_RENAME)
    }
}

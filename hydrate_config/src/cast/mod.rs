//! Lenient scalar casting.
//!
//! Host payloads deliver every leaf as a string, so each caster accepts the
//! string form of its type as well as values a structured format already
//! decoded natively (numbers, booleans, `null`). Conversions go through a
//! wide intermediate (`i128` or `f64`) and are then narrowed with a checked
//! conversion, so out-of-range input fails instead of wrapping.

mod duration;
mod timestamp;

use std::any::type_name;
use std::borrow::Cow;
use std::num::FpCategory;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Number;

use crate::{Hydrate, HydrateError, HydrateResult, PrimitiveKind, RawValue, Shape};

/// Scalar destinations handled by [`set_primitive`].
pub trait Scalar: Sized {
    /// Scalar category, exposed through [`Hydrate::SHAPE`].
    const KIND: PrimitiveKind;

    /// Convert `raw` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HydrateErrorKind::Cast`] when `raw` cannot be
    /// represented as `Self`.
    fn cast(raw: &RawValue) -> HydrateResult<Self>;
}

/// Cast `raw` and store the result in `dest`.
///
/// `dest` is left untouched when the cast fails.
///
/// # Errors
///
/// Propagates the [`Scalar::cast`] failure.
pub fn set_primitive<T: Scalar>(raw: &RawValue, dest: &mut T) -> HydrateResult<()> {
    *dest = T::cast(raw)?;
    Ok(())
}

/// Magnitude bound of the `i128` intermediate, 2^127.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

fn scalar_only(raw: &RawValue, target: &'static str) -> HydrateError {
    HydrateError::cast(raw, target, "expected a scalar")
}

fn bool_from_raw(raw: &RawValue) -> HydrateResult<bool> {
    match raw {
        RawValue::Null => Ok(false),
        RawValue::Bool(value) => Ok(*value),
        RawValue::Number(number) => Ok(number
            .as_f64()
            .is_some_and(|value| value.classify() != FpCategory::Zero)),
        RawValue::String(text) => match text.trim() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(HydrateError::cast(raw, "bool", "not a boolean literal")),
        },
        RawValue::Array(_) | RawValue::Object(_) => Err(scalar_only(raw, "bool")),
    }
}

/// Read `raw` as an integer wide enough for every supported width.
fn integer_from_raw(raw: &RawValue, target: &'static str) -> HydrateResult<i128> {
    match raw {
        RawValue::Null => Ok(0),
        RawValue::Bool(value) => Ok(i128::from(*value)),
        RawValue::Number(number) => number_to_integer(number)
            .ok_or_else(|| HydrateError::cast(raw, target, "number is out of range")),
        RawValue::String(text) => parse_integer_literal(text)
            .ok_or_else(|| HydrateError::cast(raw, target, "not a valid integer")),
        RawValue::Array(_) | RawValue::Object(_) => Err(scalar_only(raw, target)),
    }
}

/// Integer-valued numbers convert exactly; fractional ones truncate toward
/// zero.
fn number_to_integer(number: &Number) -> Option<i128> {
    if let Some(value) = number.as_i64() {
        return Some(i128::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(i128::from(value));
    }
    number.as_f64().and_then(truncate_float)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero is the intended float-to-integer conversion"
)]
fn truncate_float(value: f64) -> Option<i128> {
    let truncated = value.trunc();
    (truncated.abs() < I128_LIMIT).then(|| truncated as i128)
}

/// Parse an integer literal: optional sign, optional `0x`/`0o`/`0b` prefix
/// (underscores allowed after a prefix) and an optional all-zero fraction
/// such as `"42.00"`.
fn parse_integer_literal(text: &str) -> Option<i128> {
    let trimmed = trim_zero_decimal(text.trim());
    let (negative, unsigned) = trimmed.strip_prefix('-').map_or_else(
        || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        |rest| (true, rest),
    );
    let (radix, body) = split_radix(unsigned);
    let digits = if radix == 10 {
        Cow::Borrowed(body)
    } else {
        Cow::Owned(body.replace('_', ""))
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.into_owned()
    };
    i128::from_str_radix(&signed, radix).ok()
}

fn split_radix(text: &str) -> (u32, &str) {
    [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|rest| (radix, rest)))
        .unwrap_or((10, text))
}

fn trim_zero_decimal(text: &str) -> &str {
    match text.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
                && !fraction.is_empty()
                && fraction.bytes().all(|b| b == b'0') =>
        {
            whole
        }
        _ => text,
    }
}

/// Cast `raw` to the integer type `T`, failing rather than wrapping when the
/// value does not fit.
pub(crate) fn narrow_integer<T: TryFrom<i128>>(raw: &RawValue) -> HydrateResult<T> {
    let target = type_name::<T>();
    let wide = integer_from_raw(raw, target)?;
    T::try_from(wide)
        .map_err(|_| HydrateError::cast(raw, target, format!("{wide} is out of range")))
}

fn float_from_raw(raw: &RawValue, target: &'static str) -> HydrateResult<f64> {
    match raw {
        RawValue::Null => Ok(0.0),
        RawValue::Bool(value) => Ok(f64::from(u8::from(*value))),
        RawValue::Number(number) => number
            .as_f64()
            .ok_or_else(|| HydrateError::cast(raw, target, "number is out of range")),
        RawValue::String(text) => parse_float_literal(text, raw, target),
        RawValue::Array(_) | RawValue::Object(_) => Err(scalar_only(raw, target)),
    }
}

fn parse_float_literal(text: &str, raw: &RawValue, target: &'static str) -> HydrateResult<f64> {
    let trimmed = text.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|e| HydrateError::cast(raw, target, e.to_string()))?;
    if value.is_infinite() && !trimmed.to_ascii_lowercase().contains("inf") {
        return Err(HydrateError::cast(raw, target, "number is out of range"));
    }
    Ok(value)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "narrowing is checked for overflow to infinity below"
)]
fn narrow_float(raw: &RawValue, wide: f64) -> HydrateResult<f32> {
    let narrowed = wide as f32;
    if narrowed.is_infinite() && wide.is_finite() {
        return Err(HydrateError::cast(raw, "f32", "number is out of range"));
    }
    Ok(narrowed)
}

fn string_from_raw(raw: &RawValue) -> HydrateResult<String> {
    match raw {
        RawValue::Null => Ok(String::new()),
        RawValue::Bool(value) => Ok(value.to_string()),
        RawValue::Number(number) => Ok(number.to_string()),
        RawValue::String(text) => Ok(text.clone()),
        RawValue::Array(_) | RawValue::Object(_) => Err(scalar_only(raw, "string")),
    }
}

impl Scalar for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Bool;

    fn cast(raw: &RawValue) -> HydrateResult<Self> {
        bool_from_raw(raw)
    }
}

macro_rules! integer_scalars {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            fn cast(raw: &RawValue) -> HydrateResult<Self> {
                narrow_integer(raw)
            }
        }
    )*};
}

integer_scalars!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize,
);

impl Scalar for f64 {
    const KIND: PrimitiveKind = PrimitiveKind::F64;

    fn cast(raw: &RawValue) -> HydrateResult<Self> {
        float_from_raw(raw, "f64")
    }
}

impl Scalar for f32 {
    const KIND: PrimitiveKind = PrimitiveKind::F32;

    fn cast(raw: &RawValue) -> HydrateResult<Self> {
        narrow_float(raw, float_from_raw(raw, "f32")?)
    }
}

impl Scalar for String {
    const KIND: PrimitiveKind = PrimitiveKind::String;

    fn cast(raw: &RawValue) -> HydrateResult<Self> {
        string_from_raw(raw)
    }
}

impl Scalar for Duration {
    const KIND: PrimitiveKind = PrimitiveKind::Duration;

    fn cast(raw: &RawValue) -> HydrateResult<Self> {
        duration::duration_from_raw(raw)
    }
}

impl Scalar for DateTime<FixedOffset> {
    const KIND: PrimitiveKind = PrimitiveKind::Timestamp;

    fn cast(raw: &RawValue) -> HydrateResult<Self> {
        timestamp::timestamp_from_raw(raw)
    }
}

impl Scalar for DateTime<Utc> {
    const KIND: PrimitiveKind = PrimitiveKind::Timestamp;

    fn cast(raw: &RawValue) -> HydrateResult<Self> {
        timestamp::timestamp_from_raw(raw).map(|parsed| parsed.with_timezone(&Utc))
    }
}

macro_rules! scalar_destinations {
    ($($ty:ty),* $(,)?) => {$(
        impl Hydrate for $ty {
            const SHAPE: Shape = Shape::Primitive(<$ty as Scalar>::KIND);

            fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()> {
                set_primitive(raw, self)
            }
        }
    )*};
}

scalar_destinations!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    Duration, DateTime<FixedOffset>, DateTime<Utc>,
);

//! Sequence, fixed-array, map and wrapper destinations.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;

use crate::{Hydrate, HydrateError, HydrateResult, HydrateResultExt, RawValue, Shape, set_value};

/// Build a fresh vector from a raw list, one element per entry.
///
/// `dest` is replaced only when every element hydrates. There is no length
/// constraint.
///
/// # Errors
///
/// [`crate::HydrateErrorKind::ShapeMismatch`] when `raw` is not a list, or
/// the first element error with its index prepended.
pub fn set_sequence<T: Hydrate + Default>(raw: &RawValue, dest: &mut Vec<T>) -> HydrateResult<()> {
    let Some(items) = raw.as_array() else {
        return Err(HydrateError::shape_mismatch("list", raw));
    };
    let mut fresh = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let mut slot = T::default();
        set_value(item, &mut slot).at_index(index)?;
        fresh.push(slot);
    }
    *dest = fresh;
    Ok(())
}

/// Hydrate a fixed-size array in place from a raw list of exactly `N`
/// entries.
///
/// # Errors
///
/// [`crate::HydrateErrorKind::ShapeMismatch`] when `raw` is not a list,
/// [`crate::HydrateErrorKind::LengthMismatch`] when its length differs from
/// `N`, or the first element error with its index prepended. Elements before
/// the failing one keep their new values.
pub fn set_array<T: Hydrate, const N: usize>(
    raw: &RawValue,
    dest: &mut [T; N],
) -> HydrateResult<()> {
    let Some(items) = raw.as_array() else {
        return Err(HydrateError::shape_mismatch("list", raw));
    };
    if items.len() != N {
        return Err(HydrateError::length_mismatch(N, items.len()));
    }
    for (index, (item, slot)) in items.iter().zip(dest.iter_mut()).enumerate() {
        set_value(item, slot).at_index(index)?;
    }
    Ok(())
}

/// Key types accepted by map destinations.
///
/// Only string-like keys can be hydrated. Other common key types implement
/// the trait with [`MapKey::STRING_LIKE`] set to `false` so the map handler
/// rejects them at run time with
/// [`crate::HydrateErrorKind::UnsupportedKeyType`].
pub trait MapKey: Sized {
    /// Whether raw object keys can be used directly.
    const STRING_LIKE: bool;

    /// Build a key from a raw object key; `None` for non-string-like keys.
    fn from_raw_key(key: &str) -> Option<Self>;
}

macro_rules! string_keys {
    ($($ty:ty),* $(,)?) => {$(
        impl MapKey for $ty {
            const STRING_LIKE: bool = true;

            fn from_raw_key(key: &str) -> Option<Self> {
                Some(key.into())
            }
        }
    )*};
}

macro_rules! rejected_keys {
    ($($ty:ty),* $(,)?) => {$(
        impl MapKey for $ty {
            const STRING_LIKE: bool = false;

            fn from_raw_key(_key: &str) -> Option<Self> {
                None
            }
        }
    )*};
}

string_keys!(String, Box<str>, Rc<str>, Arc<str>);
rejected_keys!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

/// Build a fresh map from a raw object.
///
/// The key type is checked before `raw` is inspected. Each entry is hydrated
/// into a new `V::default()` slot; `dest` is replaced only on success.
///
/// # Errors
///
/// [`crate::HydrateErrorKind::UnsupportedKeyType`] for non-string keys,
/// [`crate::HydrateErrorKind::ShapeMismatch`] when `raw` is not an object, or
/// the first entry error with its key prepended.
pub fn set_map<K, V, M>(raw: &RawValue, dest: &mut M) -> HydrateResult<()>
where
    K: MapKey,
    V: Hydrate + Default,
    M: FromIterator<(K, V)>,
{
    if !K::STRING_LIKE {
        return Err(HydrateError::unsupported_key_type::<K>());
    }
    let Some(entries) = raw.as_object() else {
        return Err(HydrateError::shape_mismatch("object", raw));
    };
    *dest = entries
        .iter()
        .map(|(key, value)| {
            let mut slot = V::default();
            set_value(value, &mut slot).at_key(key)?;
            let map_key =
                K::from_raw_key(key).ok_or_else(HydrateError::unsupported_key_type::<K>)?;
            Ok((map_key, slot))
        })
        .collect::<HydrateResult<M>>()?;
    Ok(())
}

impl<T: Hydrate + Default> Hydrate for Vec<T> {
    const SHAPE: Shape = Shape::Sequence;

    fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()> {
        set_sequence(raw, self)
    }
}

impl<T: Hydrate, const N: usize> Hydrate for [T; N] {
    const SHAPE: Shape = Shape::FixedArray { len: N };

    fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()> {
        set_array(raw, self)
    }
}

impl<K, V, S> Hydrate for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Hydrate + Default,
    S: BuildHasher + Default,
{
    const SHAPE: Shape = Shape::Map {
        string_keys: K::STRING_LIKE,
    };

    fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()> {
        set_map::<K, V, Self>(raw, self)
    }
}

impl<K, V> Hydrate for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Hydrate + Default,
{
    const SHAPE: Shape = Shape::Map {
        string_keys: K::STRING_LIKE,
    };

    fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()> {
        set_map::<K, V, Self>(raw, self)
    }
}

/// Optionals are allocated on first touch and never left unresolved: a
/// present key, even `null`, yields `Some`.
impl<T: Hydrate + Default> Hydrate for Option<T> {
    const SHAPE: Shape = Shape::Optional;

    fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()> {
        set_value(raw, self.get_or_insert_with(T::default))
    }
}

impl<T: Hydrate + ?Sized> Hydrate for Box<T> {
    const SHAPE: Shape = T::SHAPE;

    fn hydrate(&mut self, raw: &RawValue) -> HydrateResult<()> {
        set_value(raw, &mut **self)
    }
}

//! Field resolution for struct destinations.
//!
//! Each field looks for its raw value under a fixed, ordered list of
//! candidate keys. When none is present, nested structs receive an empty
//! object, other fields fall back to their default literal, and required
//! fields fail.

use std::borrow::Cow;

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde_json::Map;
use tracing::trace;

use crate::{FieldSpec, HydrateError, HydrateResult, HydrateResultExt, HydrateStruct, RawValue};

/// Hydrate a struct destination field by field, in declaration order.
///
/// Fields hydrated before a failure keep their new values.
///
/// # Errors
///
/// - [`crate::HydrateErrorKind::ShapeMismatch`] when `raw` is not an object.
/// - [`crate::HydrateErrorKind::MissingRequiredField`] for an absent required
///   field without a default.
/// - Any error from a field's own hydration, with the field name prepended.
pub fn set_struct<T: HydrateStruct + ?Sized>(raw: &RawValue, dest: &mut T) -> HydrateResult<()> {
    let Some(object) = raw.as_object() else {
        return Err(HydrateError::shape_mismatch("object", raw));
    };

    for (index, field) in T::FIELDS.iter().enumerate() {
        let Some(field_raw) = resolve_field(T::NAME, field, object)? else {
            continue;
        };
        dest.hydrate_field(index, &field_raw).at_field(field.name)?;
    }
    Ok(())
}

/// Pick the raw value for `field`, applying the absent-key fallbacks.
///
/// Returns `Ok(None)` when the field is absent, optional and has no default.
fn resolve_field<'raw>(
    owner: &'static str,
    field: &FieldSpec,
    object: &'raw Map<String, RawValue>,
) -> HydrateResult<Option<Cow<'raw, RawValue>>> {
    if let Some((key, value)) = lookup(field, object) {
        trace!(owner, field = field.name, key = %key, "resolved field");
        return Ok(Some(Cow::Borrowed(value)));
    }

    if field.shape.is_struct() {
        trace!(owner, field = field.name, "absent nested struct, using empty object");
        return Ok(Some(Cow::Owned(RawValue::Object(Map::new()))));
    }
    if let Some(default) = field.default {
        trace!(owner, field = field.name, default, "absent field, using default");
        return Ok(Some(Cow::Owned(RawValue::String(default.to_owned()))));
    }
    if field.required {
        return Err(HydrateError::missing_required_field(field.name));
    }
    trace!(owner, field = field.name, "absent optional field, skipping");
    Ok(None)
}

fn lookup<'raw>(
    field: &FieldSpec,
    object: &'raw Map<String, RawValue>,
) -> Option<(String, &'raw RawValue)> {
    candidate_keys(field)
        .into_iter()
        .find_map(|key| object.get(&key).map(|value| (key, value)))
}

/// Keys tried for `field`, in priority order.
///
/// 1. the field name as declared;
/// 2. the name lower-cased;
/// 3. the name upper-cased;
/// 4. the name with each word capitalized (`max_attempts` becomes
///    `MaxAttempts`);
/// 5. the serialized-name override, unless it is the `"-"` marker;
/// 6. lower camel case (`maxAttempts`), for names longer than one character.
///
/// The list is returned as-is, duplicates included: the first key present in
/// the raw object wins.
///
/// # Examples
///
/// ```
/// use hydrate_config::{FieldSpec, PrimitiveKind, Shape, candidate_keys};
///
/// let field = FieldSpec {
///     name: "dns_host",
///     rename: Some("host"),
///     default: None,
///     required: false,
///     shape: Shape::Primitive(PrimitiveKind::String),
/// };
/// assert_eq!(
///     candidate_keys(&field),
///     ["dns_host", "dns_host", "DNS_HOST", "DnsHost", "host", "dnsHost"]
/// );
/// ```
#[must_use]
pub fn candidate_keys(field: &FieldSpec) -> Vec<String> {
    let name = field.name;
    let mut keys = vec![
        name.to_owned(),
        name.to_lowercase(),
        name.to_uppercase(),
        name.to_upper_camel_case(),
    ];
    if let Some(serialized) = field.serialized_name() {
        keys.push(serialized.to_owned());
    }
    if name.chars().nth(1).is_some() {
        keys.push(name.to_lower_camel_case());
    }
    keys
}

#[cfg(test)]
mod tests {
    //! Unit tests for candidate-key precedence and absent-field fallbacks.

    use super::*;
    use crate::{PrimitiveKind, Shape};
    use rstest::rstest;
    use serde_json::json;

    const fn field(name: &'static str) -> FieldSpec {
        FieldSpec {
            name,
            rename: None,
            default: None,
            required: false,
            shape: Shape::Primitive(PrimitiveKind::String),
        }
    }

    fn object(raw: &RawValue) -> &Map<String, RawValue> {
        raw.as_object().unwrap_or_else(|| panic!("fixture must be an object"))
    }

    #[rstest]
    #[case::exact(json!({"Name": "a", "name": "b", "NAME": "c"}), "a")]
    #[case::lower(json!({"name": "b", "NAME": "c"}), "b")]
    #[case::upper(json!({"NAME": "c"}), "c")]
    fn earlier_candidates_win(#[case] raw: RawValue, #[case] expected: &str) {
        let spec = field("Name");
        let found = lookup(&spec, object(&raw)).map(|(_, value)| value.clone());
        assert_eq!(found, Some(json!(expected)));
    }

    #[test]
    fn override_loses_to_case_variants_but_beats_lower_camel() {
        let spec = FieldSpec {
            rename: Some("brokerHost"),
            ..field("dns_host")
        };
        let against_camel = json!({"brokerHost": "override", "dnsHost": "camel"});
        let hit = lookup(&spec, object(&against_camel));
        assert_eq!(hit.map(|(key, _)| key), Some("brokerHost".to_owned()));

        let against_title = json!({"brokerHost": "override", "DnsHost": "title"});
        let miss = lookup(&spec, object(&against_title));
        assert_eq!(miss.map(|(key, _)| key), Some("DnsHost".to_owned()));
    }

    #[test]
    fn ignore_marker_disables_the_override() {
        let spec = FieldSpec {
            rename: Some(FieldSpec::IGNORE_RENAME),
            ..field("token")
        };
        assert!(!candidate_keys(&spec).iter().any(|key| key == "-"));
        assert!(lookup(&spec, object(&json!({"-": "x"}))).is_none());
    }

    #[test]
    fn single_character_names_skip_lower_camel() {
        assert_eq!(candidate_keys(&field("x")), ["x", "x", "X", "X"]);
    }

    #[test]
    fn absent_struct_field_gets_an_empty_object() -> HydrateResult<()> {
        let spec = FieldSpec {
            shape: Shape::Struct { name: "Retry" },
            default: Some("ignored"),
            required: true,
            ..field("retry")
        };
        let empty = Map::new();
        let resolved = resolve_field("Owner", &spec, &empty)?;
        assert_eq!(resolved.as_deref(), Some(&json!({})));
        Ok(())
    }

    #[test]
    fn default_takes_precedence_over_required() -> HydrateResult<()> {
        let spec = FieldSpec {
            default: Some("3"),
            required: true,
            ..field("attempts")
        };
        let empty = Map::new();
        let resolved = resolve_field("Owner", &spec, &empty)?;
        assert_eq!(resolved.as_deref(), Some(&json!("3")));
        Ok(())
    }

    #[test]
    fn absent_optional_field_is_skipped() -> HydrateResult<()> {
        let empty = Map::new();
        assert!(resolve_field("Owner", &field("note"), &empty)?.is_none());
        Ok(())
    }
}

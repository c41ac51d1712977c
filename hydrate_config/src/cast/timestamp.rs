//! Timestamp parsing.
//!
//! Accepted text forms are tried in a fixed order, starting with the
//! strictest. Zone-less forms are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Map;

use crate::{HydrateError, HydrateResult, HydrateResultExt, RawValue};

use super::narrow_integer;

const TARGET: &str = "timestamp";

const ZONED_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d %b %Y"];

pub(super) fn timestamp_from_raw(raw: &RawValue) -> HydrateResult<DateTime<FixedOffset>> {
    match raw {
        RawValue::String(text) => parse_text(text.trim())
            .ok_or_else(|| HydrateError::cast(raw, TARGET, "unrecognised date-time format")),
        RawValue::Number(_) => {
            let seconds = narrow_integer::<i64>(raw)?;
            from_unix(seconds)
                .ok_or_else(|| HydrateError::cast(raw, TARGET, "Unix time is out of range"))
        }
        RawValue::Object(fields) => from_components(raw, fields),
        RawValue::Null | RawValue::Bool(_) | RawValue::Array(_) => Err(HydrateError::cast(
            raw,
            TARGET,
            "expected a date-time string, Unix seconds or a date-time object",
        )),
    }
}

fn parse_text(text: &str) -> Option<DateTime<FixedOffset>> {
    if is_integer(text) {
        return text.parse().ok().and_then(from_unix);
    }
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
        .or_else(|| {
            ZONED_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        })
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|naive| naive.and_utc().fixed_offset())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn from_unix(seconds: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(seconds, 0).map(|utc| utc.fixed_offset())
}

fn from_components(
    raw: &RawValue,
    fields: &Map<String, RawValue>,
) -> HydrateResult<DateTime<FixedOffset>> {
    let year: i32 = component(raw, fields, "year", None)?;
    let month: u32 = component(raw, fields, "month", None)?;
    let day: u32 = component(raw, fields, "day", None)?;
    let hour: u32 = component(raw, fields, "hour", Some(0))?;
    let minute: u32 = component(raw, fields, "minute", Some(0))?;
    let second: u32 = component(raw, fields, "second", Some(0))?;
    let nanosecond: u32 = component(raw, fields, "nanosecond", Some(0))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nanosecond))
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| HydrateError::cast(raw, TARGET, "date-time components are out of range"))
}

fn component<T: TryFrom<i128>>(
    raw: &RawValue,
    fields: &Map<String, RawValue>,
    name: &'static str,
    fallback: Option<T>,
) -> HydrateResult<T> {
    match (fields.get(name), fallback) {
        (Some(value), _) => narrow_integer(value).at_field(name),
        (None, Some(value)) => Ok(value),
        (None, None) => Err(HydrateError::cast(raw, TARGET, format!("missing `{name}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .unwrap_or_else(|| panic!("fixture date must be valid"))
            .fixed_offset()
    }

    #[rstest]
    #[case("2024-03-01T12:30:00Z", utc(2024, 3, 1, 12, 30, 0))]
    #[case("2024-03-01T14:30:00+02:00", utc(2024, 3, 1, 12, 30, 0))]
    #[case("Fri, 01 Mar 2024 12:30:00 +0000", utc(2024, 3, 1, 12, 30, 0))]
    #[case("2024-03-01 12:30:00 +0000", utc(2024, 3, 1, 12, 30, 0))]
    #[case("2024-03-01T12:30:00", utc(2024, 3, 1, 12, 30, 0))]
    #[case("2024-03-01 12:30:00.5", utc(2024, 3, 1, 12, 30, 0) + chrono::Duration::milliseconds(500))]
    #[case("2024-03-01", utc(2024, 3, 1, 0, 0, 0))]
    #[case("01 Mar 2024", utc(2024, 3, 1, 0, 0, 0))]
    #[case("1709296200", utc(2024, 3, 1, 12, 30, 0))]
    fn parses_text_forms(
        #[case] text: &str,
        #[case] expected: DateTime<FixedOffset>,
    ) -> HydrateResult<()> {
        assert_eq!(timestamp_from_raw(&json!(text))?, expected);
        Ok(())
    }

    #[test]
    fn keeps_the_source_offset() -> HydrateResult<()> {
        let parsed = timestamp_from_raw(&json!("2024-03-01T14:30:00+02:00"))?;
        assert_eq!(parsed.offset().local_minus_utc(), 7_200);
        Ok(())
    }

    #[test]
    fn numbers_are_unix_seconds() -> HydrateResult<()> {
        assert_eq!(timestamp_from_raw(&json!(0))?, utc(1970, 1, 1, 0, 0, 0));
        Ok(())
    }

    #[test]
    fn objects_are_read_component_wise() -> HydrateResult<()> {
        let raw = json!({"year": "2024", "month": "3", "day": 1, "hour": "12", "minute": 30});
        assert_eq!(timestamp_from_raw(&raw)?, utc(2024, 3, 1, 12, 30, 0));
        Ok(())
    }

    #[test]
    fn component_errors_name_the_component() {
        let raw = json!({"year": 2024, "month": "march", "day": 1});
        let err = timestamp_from_raw(&raw).unwrap_err();
        assert_eq!(err.path_string(), "month");
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(true))]
    #[case(json!(["2024-03-01"]))]
    #[case(json!("yesterday"))]
    #[case(json!({"year": 2024, "month": 2, "day": 30}))]
    #[case(json!({"month": 2, "day": 3}))]
    fn rejects_other_values(#[case] raw: RawValue) {
        assert!(timestamp_from_raw(&raw).is_err(), "{raw} should fail");
    }
}

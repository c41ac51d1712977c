//! Duration literals such as `"10s"`, `"1h30m"` or `"1.5ms"`.

use std::time::Duration;

use crate::{HydrateError, HydrateResult, RawValue};

use super::narrow_integer;

const TARGET: &str = "duration";

/// Fraction digits beyond this count cannot affect a nanosecond total.
const MAX_FRACTION_DIGITS: usize = 18;

const UNITS: [(&str, u128); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

pub(super) fn duration_from_raw(raw: &RawValue) -> HydrateResult<Duration> {
    let nanos: u64 = match raw {
        RawValue::String(text) if has_unit(text) => {
            let (negative, total) = parse_literal(text.trim())
                .map_err(|reason| HydrateError::cast(raw, TARGET, reason))?;
            if negative && total != 0 {
                return Err(HydrateError::cast(raw, TARGET, "negative durations are not supported"));
            }
            u64::try_from(total)
                .map_err(|_| HydrateError::cast(raw, TARGET, "duration is out of range"))?
        }
        RawValue::Array(_) | RawValue::Object(_) => {
            return Err(HydrateError::cast(raw, TARGET, "expected a scalar"));
        }
        _ => narrow_integer(raw)?,
    };
    Ok(Duration::from_nanos(nanos))
}

fn has_unit(text: &str) -> bool {
    text.contains(['n', 's', 'u', 'µ', 'μ', 'm', 'h'])
}

/// Parse `[+-]?(digits[.digits]unit)+` or a bare `0`, returning the sign and
/// the magnitude in nanoseconds.
fn parse_literal(text: &str) -> Result<(bool, u128), &'static str> {
    let (negative, unsigned) = text.strip_prefix('-').map_or_else(
        || (false, text.strip_prefix('+').unwrap_or(text)),
        |rest| (true, rest),
    );
    if unsigned == "0" {
        return Ok((negative, 0));
    }
    if unsigned.is_empty() {
        return Err("empty duration");
    }

    let mut rest = unsigned;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_digits(rest);
        let (fraction, after_number) = after_whole
            .strip_prefix('.')
            .map_or(("", after_whole), take_digits);
        if whole.is_empty() && fraction.is_empty() {
            return Err("expected a number before the unit");
        }
        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        let scale = unit_scale(unit)?;
        total = component_nanos(whole, fraction, scale)
            .and_then(|nanos| total.checked_add(nanos))
            .ok_or("duration is out of range")?;
        rest = remaining;
    }
    Ok((negative, total))
}

fn take_digits(text: &str) -> (&str, &str) {
    text.split_at(text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len()))
}

fn unit_scale(unit: &str) -> Result<u128, &'static str> {
    if unit.is_empty() {
        return Err("missing unit");
    }
    UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|&(_, scale)| scale)
        .ok_or("unknown unit")
}

fn component_nanos(whole: &str, fraction: &str, scale: u128) -> Option<u128> {
    let whole_nanos = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?.checked_mul(scale)?
    };
    let kept = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    if kept.is_empty() {
        return Some(whole_nanos);
    }
    let numerator = kept.parse::<u128>().ok()?.checked_mul(scale)?;
    let denominator = 10_u128.checked_pow(u32::try_from(kept.len()).ok()?)?;
    whole_nanos.checked_add(numerator.checked_div(denominator)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("10s", Duration::from_secs(10))]
    #[case("1h30m", Duration::from_secs(5_400))]
    #[case("1.5s", Duration::from_millis(1_500))]
    #[case(".5ms", Duration::from_micros(500))]
    #[case("250µs", Duration::from_micros(250))]
    #[case("3us", Duration::from_micros(3))]
    #[case("+2m", Duration::from_secs(120))]
    #[case("-0s", Duration::ZERO)]
    #[case("0", Duration::ZERO)]
    #[case(" 5ns ", Duration::from_nanos(5))]
    fn parses_duration_literals(#[case] text: &str, #[case] expected: Duration) -> HydrateResult<()> {
        assert_eq!(duration_from_raw(&json!(text))?, expected);
        Ok(())
    }

    #[rstest]
    #[case(json!("1500"), Duration::from_nanos(1_500))]
    #[case(json!(42), Duration::from_nanos(42))]
    #[case(json!(null), Duration::ZERO)]
    fn unitless_values_are_nanoseconds(
        #[case] raw: RawValue,
        #[case] expected: Duration,
    ) -> HydrateResult<()> {
        assert_eq!(duration_from_raw(&raw)?, expected);
        Ok(())
    }

    #[rstest]
    #[case("-5s")]
    #[case("10x")]
    #[case("5 s")]
    #[case("1d")]
    #[case("s")]
    #[case("1.s.")]
    #[case("9999999999999h")]
    fn rejects_invalid_literals(#[case] text: &str) {
        assert!(duration_from_raw(&json!(text)).is_err(), "{text} should fail");
    }

    #[test]
    fn fraction_digits_beyond_nanoseconds_are_dropped() -> HydrateResult<()> {
        let parsed = duration_from_raw(&json!("0.1234567891234s"))?;
        assert_eq!(parsed, Duration::from_nanos(123_456_789));
        Ok(())
    }
}

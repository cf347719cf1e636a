//! Tolerant numeric deserialization for third-party listing feeds.
//!
//! Registry feeds send numbers as JSON numbers, as formatted strings
//! (`"12,995"`, `"£12995"`, `"1598cc"`), or as junk. Anything that is not a
//! finite, non-negative number in range becomes `None` (unknown) rather than
//! failing the whole snapshot.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `deserialize_with` target for optional unsigned numeric listing fields.
pub fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(loose_u64)
        .and_then(|n| T::try_from(n).ok()))
}

/// `deserialize_with` target for optional fractional fields such as engine
/// size, which some feeds give in litres (`1.6`) and others in cc (`"1598cc"`).
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(loose_f64))
}

/// `deserialize_with` target for optional enum fields parsed through
/// [`FromStr`]. Unrecognised or non-string values become `None`.
pub fn lenient_parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// `deserialize_with` target for optional RFC 3339 timestamps. A malformed
/// timestamp becomes `None`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

/// Interpret a JSON value as a finite, non-negative number.
pub fn loose_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite() && *f >= 0.0),
        Value::String(s) => loose_f64_str(s),
        _ => None,
    }
}

/// Interpret a JSON value as a non-negative integer, rounding fractional input.
pub fn loose_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(round_non_negative)),
        Value::String(s) => loose_u64_str(s),
        _ => None,
    }
}

/// Parse a loosely formatted numeric string: optional `£` prefix, thousands
/// separators, and a trailing unit suffix (`cc`, `miles`) are tolerated.
pub fn loose_u64_str(raw: &str) -> Option<u64> {
    loose_f64_str(raw).and_then(round_non_negative)
}

/// Like [`loose_u64_str`] but keeps the fractional part.
pub fn loose_f64_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_start_matches('£');
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let numeric = cleaned.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if numeric.is_empty() {
        return None;
    }
    numeric
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
}

// Range is checked before the cast so truncation cannot occur.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn round_non_negative(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value <= u64::MAX as f64 {
        Some(value.round() as u64)
    } else {
        None
    }
}

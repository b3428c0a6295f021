/*!
 * Serde utilities for the fixed wire formats.
 *
 * Timestamps cross the API and the store in the second-precision
 * `YYYY-MM-DD HH:MM:SS` form; the helpers here keep every struct on that
 * single format. `double_option` backs partial-update bodies where
 * "field absent" (leave alone) and "field null" (clear) mean different
 * things.
 */

use chrono::{NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer};

/// Canonical textual timestamp form, second precision.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a wire timestamp. Strict: trailing garbage and other layouts fail.
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
}

/// Render a timestamp in the canonical wire form.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Current UTC time truncated to whole seconds, matching what TIMESTAMP(0)
/// columns store so in-memory rows compare equal to their persisted form.
pub fn now_at_second_precision() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Serde `with`-module for `NaiveDateTime` fields.
pub mod datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(super::DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde `with`-module for `Option<NaiveDateTime>` fields (`None` ⇔ null).
pub mod datetime_option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(super::DATETIME_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| super::parse_datetime(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Deserialize a patch field into `Option<Option<T>>`.
///
/// Combined with `#[serde(default)]`: an absent field stays `None`, an
/// explicit `null` becomes `Some(None)`, and a value becomes
/// `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// [`double_option`] for timestamp patch fields carried in the canonical
/// wire form. Malformed values are rejected rather than silently dropped.
pub fn datetime_double_option<'de, D>(
    deserializer: D,
) -> Result<Option<Option<NaiveDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_datetime(&raw)
            .map(|dt| Some(Some(dt)))
            .map_err(serde::de::Error::custom),
        None => Ok(Some(None)),
    }
}

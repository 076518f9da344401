//! Primitive normalizers for fields TMDb fills inconsistently.
//!
//! Use with `#[serde(default, with = "...")]` so that a missing key takes
//! the same path as an explicit `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Deserializes `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Null-or-missing integer → `0`.
pub mod null_as_zero {
    use super::{Deserialize, Deserializer, Serialize, Serializer, null_as_default};

    /// Writes the number unchanged.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<T: Serialize, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    /// Reads a number, mapping `null` to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither `null` nor a number of type `T`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        null_as_default(deserializer)
    }
}

/// Null-or-missing boolean → `false`.
pub mod null_as_false {
    use super::{Deserializer, Serializer, null_as_default};

    /// Writes the boolean unchanged.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    /// Reads a boolean, mapping `null` to `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither `null` nor a boolean.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        null_as_default(deserializer)
    }
}

/// Lenient partial dates: anything unusable becomes `None`.
pub mod partial_date {
    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// Output format.
    const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Date-only input formats, tried in order.
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

    /// Date-time input formats, tried in order.
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    /// Parses an ISO-ish date. Never fails: unusable input yields `None`.
    ///
    /// Accepts `2020-05-04`, `2020/05/04`, RFC 3339 timestamps,
    /// `2020-05-04T12:00:00`, `2020-05-04 12:00:00`, `2020-05` and `2020`
    /// (the last two resolve to the first day of the period).
    #[must_use]
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), DATE_FORMAT).ok())
            .or_else(|| year_only(raw))
    }

    /// `2020` → `2020-01-01`.
    fn year_only(raw: &str) -> Option<NaiveDate> {
        if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = raw.parse().ok()?;
        NaiveDate::from_ymd_opt(year, 1, 1).filter(|date| date.year() == year)
    }

    /// Writes `YYYY-MM-DD`, or `null`.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    /// Reads any JSON value; only parseable strings produce a date.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input is not valid JSON.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw.as_str().and_then(parse))
    }
}

/// Strict `yyyy-MM-dd HH:mm:ss UTC` timestamps.
pub mod utc_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::convert::ConvertError;

    /// The only accepted shape.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

    /// Parses exactly `yyyy-MM-dd HH:mm:ss UTC`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidTimestamp`] for any other shape,
    /// including unpadded fields or extra whitespace.
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, ConvertError> {
        let parsed = NaiveDateTime::parse_from_str(raw, FORMAT)
            .map_err(|_| ConvertError::InvalidTimestamp(String::from(raw)))?;
        // chrono is lenient about padding and whitespace; the wire shape is not.
        if parsed.format(FORMAT).to_string() != raw {
            return Err(ConvertError::InvalidTimestamp(String::from(raw)));
        }
        Ok(parsed.and_utc())
    }

    /// Formats as `yyyy-MM-dd HH:mm:ss UTC`.
    #[must_use]
    pub fn format(value: &DateTime<Utc>) -> String {
        value.format(FORMAT).to_string()
    }

    /// Writes the fixed shape.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    /// Reads the fixed shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a string of the fixed shape.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    /// Nullable variant: `null` ⇄ `None`, strings stay strict.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::de::Error;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Writes the fixed shape, or `null`.
        ///
        /// # Errors
        ///
        /// Returns the serializer's error.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Reads the fixed shape or `null`.
        ///
        /// # Errors
        ///
        /// Returns an error for a string that does not match the fixed shape.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.as_deref()
                .map(super::parse)
                .transpose()
                .map_err(D::Error::custom)
        }
    }
}

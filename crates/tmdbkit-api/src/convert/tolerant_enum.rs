//! Enum fields that survive values newer than the enum definition.
//!
//! Unrecognized strings or codes become the enum's `Default` member
//! (`Unknown` if declared, else the first member); with [`option`] they
//! become `None`. Writing is identical to the strict path.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use super::wire_enum::{self, WireEnum, resolve};

/// Writes the wire string (or code for numeric enums).
///
/// # Errors
///
/// Returns the serializer's error.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<T: WireEnum, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    wire_enum::serialize(value, serializer)
}

/// Reads any JSON value; unrecognized input yields `T::default()`.
///
/// # Errors
///
/// Returns an error only if the input is not valid JSON.
pub fn deserialize<'de, T: WireEnum, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(resolve(&raw).unwrap_or_else(|| {
        let fallback = T::default();
        tracing::debug!(
            kind = T::NAME,
            raw = %raw,
            fallback = ?fallback,
            "unrecognized enum value, using fallback"
        );
        fallback
    }))
}

/// Nullable targets: unrecognized input yields `None`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use crate::convert::wire_enum::{WireEnum, resolve};

    /// Writes the wire string, or `null`.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    #[allow(clippy::ref_option)]
    pub fn serialize<T: WireEnum, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Reads any JSON value; `null` and unrecognized input yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input is not valid JSON.
    pub fn deserialize<'de, T: WireEnum, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(None);
        }
        let value = resolve(&raw);
        if value.is_none() {
            tracing::debug!(kind = T::NAME, raw = %raw, "unrecognized enum value, using None");
        }
        Ok(value)
    }
}

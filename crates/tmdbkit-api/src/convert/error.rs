//! Conversion error type.

use thiserror::Error;

/// Errors raised by the conversion layer.
///
/// Inside serde these travel as `serde::de::Error::custom` messages;
/// the typed value is available when calling [`DiscriminatorMap`] directly.
///
/// [`DiscriminatorMap`]: super::DiscriminatorMap
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The discriminator holds a value the family does not know.
    #[error("unknown variant `{value}` for `{field}`, expected one of {}", .expected.join(", "))]
    UnknownDiscriminator {
        /// Discriminator field name.
        field: &'static str,
        /// Raw wire value.
        value: String,
        /// Known wire values, in table order.
        expected: Vec<String>,
    },
    /// The discriminator is absent and the family has no fallback type.
    #[error("missing discriminator field `{field}`")]
    MissingDiscriminator {
        /// Discriminator field name.
        field: &'static str,
    },
    /// A polymorphic payload was not a JSON object.
    #[error("expected a JSON object carrying `{field}`")]
    NotAnObject {
        /// Discriminator field name.
        field: &'static str,
    },
    /// A fixed-format UTC timestamp did not match `yyyy-MM-dd HH:mm:ss UTC`.
    #[error("invalid UTC timestamp `{0}`, expected `yyyy-MM-dd HH:mm:ss UTC`")]
    InvalidTimestamp(String),
    /// Populating the resolved variant failed.
    #[error(transparent)]
    Variant(serde_json::Error),
}

impl ConvertError {
    /// Returns `true` for an unrecognized discriminator value.
    ///
    /// Callers use this to tell an upstream contract change apart from
    /// an ordinary malformed payload.
    #[must_use]
    pub const fn is_unknown_discriminator(&self) -> bool {
        matches!(self, Self::UnknownDiscriminator { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_discriminator_message() {
        // Arrange
        let err = ConvertError::UnknownDiscriminator {
            field: "media_type",
            value: String::from("alien-broadcast"),
            expected: vec![String::from("`movie`"), String::from("`tv`")],
        };

        // Act
        let message = err.to_string();

        // Assert
        assert!(err.is_unknown_discriminator());
        assert_eq!(
            message,
            "unknown variant `alien-broadcast` for `media_type`, expected one of `movie`, `tv`"
        );
    }

    #[test]
    fn test_missing_discriminator_is_not_unknown() {
        // Arrange & Act
        let err = ConvertError::MissingDiscriminator { field: "action" };

        // Assert
        assert!(!err.is_unknown_discriminator());
        assert_eq!(err.to_string(), "missing discriminator field `action`");
    }
}

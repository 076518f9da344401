//! The `rated` shape of account states.
//!
//! TMDb sends `"rated": false` for unrated items and
//! `"rated": {"value": 7.5}` for rated ones. Models store a flat
//! `Option<f64>`:
//!
//! ```ignore
//! #[serde(rename = "rated", default, with = "crate::convert::rated")]
//! pub rating: Option<f64>,
//! ```
//!
//! A payload without `rated` reads as unrated.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Key of the nested rating.
const VALUE_KEY: &str = "value";

/// Flattens a raw `rated` value.
///
/// `false`, `true` and `null` mean unrated; `{"value": n}` yields `n`.
/// Any other shape also reads as unrated.
#[must_use]
pub fn from_wire(raw: &Value) -> Option<f64> {
    match raw {
        Value::Null | Value::Bool(_) => None,
        Value::Object(object) => {
            let value = object.get(VALUE_KEY).and_then(Value::as_f64);
            if value.is_none() {
                tracing::debug!(rated = %raw, "`rated` object without a numeric value");
            }
            value
        }
        other => {
            tracing::debug!(rated = %other, "unexpected `rated` shape, treating as unrated");
            None
        }
    }
}

/// Builds the wire shape: `{"value": n}` or `false`.
#[must_use]
pub fn to_wire(rating: Option<f64>) -> Value {
    rating
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Bool(false), |number| {
            let mut object = Map::with_capacity(1);
            object.insert(String::from(VALUE_KEY), Value::Number(number));
            Value::Object(object)
        })
}

/// Writes `{"value": n}` or `false`.
///
/// # Errors
///
/// Returns the serializer's error.
#[allow(clippy::ref_option)]
pub fn serialize<S: Serializer>(rating: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    to_wire(*rating).serialize(serializer)
}

/// Reads any `rated` shape.
///
/// # Errors
///
/// Returns an error only if the input is not valid JSON.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(from_wire(&raw))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct State {
        id: u64,
        #[serde(rename = "rated", default, with = "super")]
        rating: Option<f64>,
    }

    #[test]
    fn test_unrated_round_trip() {
        // Arrange
        let wire = json!(false);

        // Act
        let flat = from_wire(&wire);

        // Assert
        assert_eq!(flat, None);
        assert_eq!(to_wire(flat), json!(false));
    }

    #[test]
    fn test_rated_round_trip() {
        // Arrange
        let wire = json!({"value": 5});

        // Act
        let flat = from_wire(&wire);
        let back = to_wire(flat);

        // Assert
        assert_eq!(flat, Some(5.0));
        assert_eq!(back["value"].as_f64(), Some(5.0));
        assert_eq!(back.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_irregular_shapes_read_as_unrated() {
        // Arrange
        let inputs = [
            json!(null),
            json!(true),
            json!(7),
            json!("8.5"),
            json!({}),
            json!({"value": "high"}),
        ];

        // Act & Assert
        for input in inputs {
            assert_eq!(from_wire(&input), None, "input: {input}");
        }
    }

    #[test]
    fn test_field_reads_both_shapes_and_missing_key() {
        // Arrange & Act
        let rated: State = serde_json::from_str(r#"{"id":550,"rated":{"value":8.5}}"#).unwrap();
        let unrated: State = serde_json::from_str(r#"{"id":550,"rated":false}"#).unwrap();
        let missing: State = serde_json::from_str(r#"{"id":550}"#).unwrap();

        // Assert
        assert_eq!(rated.rating, Some(8.5));
        assert_eq!(unrated.rating, None);
        assert_eq!(missing.rating, None);
    }

    #[test]
    fn test_field_writes_nested_shape() {
        // Arrange
        let rated = State {
            id: 1,
            rating: Some(8.5),
        };
        let unrated = State {
            id: 1,
            rating: None,
        };

        // Act & Assert
        assert_eq!(
            serde_json::to_value(&rated).unwrap(),
            json!({"id": 1, "rated": {"value": 8.5}})
        );
        assert_eq!(
            serde_json::to_value(&unrated).unwrap(),
            json!({"id": 1, "rated": false})
        );
    }
}

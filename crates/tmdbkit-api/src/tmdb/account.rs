//! Account-scoped responses.

use serde::{Deserialize, Serialize};

/// Response from `movie/{movie_id}/account_states`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbAccountStates {
    /// TMDb movie or series ID.
    #[serde(default)]
    pub id: u64,
    /// In the account's favorites.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub favorite: bool,
    /// In the account's watchlist.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub watchlist: bool,
    /// The account's rating; travels as `rated: false | {"value": n}`.
    #[serde(rename = "rated", default, with = "crate::convert::rated")]
    pub rating: Option<f64>,
}

/// Status body returned by write endpoints and by failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbStatusResponse {
    /// TMDb status code.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub status_code: u32,
    /// Status message.
    #[serde(default)]
    pub status_message: String,
    /// Success flag (absent on some error bodies).
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub success: bool,
}

/// Request body of `movie/{movie_id}/rating`.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct RatingBody {
    /// Rating, 0.5 to 10.0 in steps of 0.5.
    pub value: f64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use serde_json::json;

    use super::*;

    #[test]
    fn test_account_states_rated_and_unrated() {
        // Arrange
        let rated = r#"{"id":550,"favorite":true,"rated":{"value":8.5},"watchlist":false}"#;
        let unrated = r#"{"id":550,"favorite":false,"rated":false,"watchlist":null}"#;
        let missing = r#"{"id":550}"#;

        // Act
        let rated: TmdbAccountStates = serde_json::from_str(rated).unwrap();
        let unrated: TmdbAccountStates = serde_json::from_str(unrated).unwrap();
        let missing: TmdbAccountStates = serde_json::from_str(missing).unwrap();

        // Assert
        assert_eq!(rated.rating, Some(8.5));
        assert!(rated.favorite);
        assert_eq!(unrated.rating, None);
        assert!(!unrated.watchlist);
        assert_eq!(missing, unrated);
    }

    #[test]
    fn test_account_states_write_nested_rating() {
        // Arrange
        let states = TmdbAccountStates {
            id: 550,
            favorite: false,
            watchlist: true,
            rating: Some(7.0),
        };

        // Act
        let value = serde_json::to_value(&states).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({"id": 550, "favorite": false, "watchlist": true, "rated": {"value": 7.0}})
        );
    }

    #[test]
    fn test_status_response_defaults() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let status: TmdbStatusResponse = serde_json::from_str(json).unwrap();
        let sparse: TmdbStatusResponse = serde_json::from_str(r#"{"status_message":"oops"}"#).unwrap();

        // Assert
        assert_eq!(status.status_code, 7);
        assert!(status.status_message.contains("Invalid API key"));
        assert_eq!(sparse.status_code, 0);
        assert!(!sparse.success);
    }
}

//! Detail resources: movies, TV series and seasons, images, configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::MovieStatus;

// --- Movie Details ---

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovie {
    /// TMDb movie ID.
    pub id: u64,
    /// IMDb ID.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Production status; unknown statuses read as [`MovieStatus::Unknown`].
    #[serde(default, with = "crate::convert::tolerant_enum")]
    pub status: MovieStatus,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Budget in US dollars.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub budget: u64,
    /// Revenue in US dollars.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub revenue: u64,
    /// Popularity score.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub popularity: f64,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_count: u32,
    /// Adult flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub adult: bool,
    /// Video flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub video: bool,
    /// Homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- TV Details ---

/// Response from `tv/{series_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDb series ID.
    pub id: u64,
    /// Localized name.
    #[serde(default)]
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// First air date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub first_air_date: Option<NaiveDate>,
    /// Last air date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub last_air_date: Option<NaiveDate>,
    /// Total number of episodes.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub number_of_episodes: u32,
    /// Total number of seasons.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub number_of_seasons: u32,
    /// Season summaries.
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
    /// Status (e.g., "Returning Series", "Ended").
    #[serde(default)]
    pub status: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub popularity: f64,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Whether the show is still in production.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub in_production: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Season summary within TV details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSeasonSummary {
    /// TMDb season ID.
    pub id: u64,
    /// Season number (0 = specials).
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub season_number: u32,
    /// Number of episodes in this season.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub episode_count: u32,
    /// Air date of this season.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub air_date: Option<NaiveDate>,
    /// Season name.
    #[serde(default)]
    pub name: String,
    /// Season overview.
    #[serde(default)]
    pub overview: Option<String>,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
}

// --- TV Season Details ---

/// Response from `tv/{series_id}/season/{season_number}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbTvSeason {
    /// Internal `MongoDB` ID.
    #[serde(rename = "_id", default)]
    pub internal_id: Option<String>,
    /// TMDb season ID.
    pub id: u64,
    /// Season number.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub season_number: u32,
    /// Season name.
    #[serde(default)]
    pub name: Option<String>,
    /// Season overview.
    #[serde(default)]
    pub overview: Option<String>,
    /// Air date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub air_date: Option<NaiveDate>,
    /// Episodes in this season.
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
}

/// A single episode within a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbEpisode {
    /// TMDb episode ID.
    pub id: u64,
    /// Episode number within the season.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub episode_number: u32,
    /// Episode name.
    #[serde(default)]
    pub name: String,
    /// Episode overview.
    #[serde(default)]
    pub overview: Option<String>,
    /// Air date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub air_date: Option<NaiveDate>,
    /// Season number.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub season_number: u32,
    /// Parent show ID.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub show_id: u64,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
    /// Episode type (e.g., "standard", "finale").
    #[serde(default)]
    pub episode_type: Option<String>,
}

// --- Images ---

/// Image file metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbImage {
    /// Image file path, relative to the configured base URL.
    #[serde(default)]
    pub file_path: String,
    /// Width / height.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub aspect_ratio: f64,
    /// Height in pixels.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub height: u32,
    /// Width in pixels.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub width: u32,
    /// Language of any text in the image (ISO 639-1).
    #[serde(default)]
    pub iso_639_1: Option<String>,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_count: u32,
}

// --- Configuration ---

/// Response from `configuration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbConfiguration {
    /// Image URL settings.
    pub images: TmdbImagesConfiguration,
    /// Keys that may appear in change logs.
    #[serde(default)]
    pub change_keys: Vec<String>,
}

/// Image URL settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmdbImagesConfiguration {
    /// Plain HTTP base URL.
    #[serde(default)]
    pub base_url: String,
    /// HTTPS base URL.
    #[serde(default)]
    pub secure_base_url: String,
    /// Backdrop sizes.
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
    /// Logo sizes.
    #[serde(default)]
    pub logo_sizes: Vec<String>,
    /// Poster sizes.
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    /// Profile sizes.
    #[serde(default)]
    pub profile_sizes: Vec<String>,
    /// Still sizes.
    #[serde(default)]
    pub still_sizes: Vec<String>,
}

impl TmdbImagesConfiguration {
    /// Builds a full HTTPS image URL, e.g. `image_url("w500", "/kq.jpg")`.
    #[must_use]
    pub fn image_url(&self, size: &str, file_path: &str) -> String {
        format!(
            "{}/{size}/{}",
            self.secure_base_url.trim_end_matches('/'),
            file_path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_movie_tolerates_nulls_and_new_status() {
        // Arrange
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "release_date": "",
            "status": "Remastered",
            "budget": null,
            "adult": null,
            "vote_count": 27000
        }"#;

        // Act
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.status, MovieStatus::Unknown);
        assert_eq!(movie.budget, 0);
        assert!(!movie.adult);
        assert_eq!(movie.vote_count, 27_000);
    }

    #[test]
    fn test_movie_status_round_trip() {
        // Arrange
        let json = r#"{"id":1,"status":"In Production"}"#;

        // Act
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&movie).unwrap();

        // Assert
        assert_eq!(movie.status, MovieStatus::InProduction);
        assert_eq!(value["status"], "In Production");
    }

    #[test]
    fn test_image_url() {
        // Arrange
        let config = TmdbImagesConfiguration {
            base_url: String::from("http://image.tmdb.org/t/p/"),
            secure_base_url: String::from("https://image.tmdb.org/t/p/"),
            backdrop_sizes: Vec::new(),
            logo_sizes: Vec::new(),
            poster_sizes: vec![String::from("w500")],
            profile_sizes: Vec::new(),
            still_sizes: Vec::new(),
        };

        // Act
        let url = config.image_url("w500", "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg");

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg");
    }
}

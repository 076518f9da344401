//! Person-centric resources: combined credits, tagged images, credit details.

use std::sync::LazyLock;

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, from_value};

use super::details::{TmdbEpisode, TmdbImage, TmdbSeasonSummary};
use super::enums::{CreditType, Gender, ImageType, MediaType};
use super::types::{MEDIA_TYPE, TmdbSearchMovie, TmdbSearchTv};
use crate::convert::union::read_nested;
use crate::convert::{AbsentPolicy, DiscriminatorMap};

// --- Combined credits ---

/// Response from `person/{person_id}/combined_credits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbCombinedCredits {
    /// TMDb person ID.
    #[serde(default)]
    pub id: u64,
    /// Acting credits; entries without `media_type` are dropped.
    #[serde(default, with = "crate::convert::union::list")]
    pub cast: Vec<TmdbCombinedCast>,
    /// Production credits; entries without `media_type` are dropped.
    #[serde(default, with = "crate::convert::union::list")]
    pub crew: Vec<TmdbCombinedCrew>,
}

/// Acting credit on a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovieCast {
    /// Movie fields.
    #[serde(flatten)]
    pub movie: TmdbSearchMovie,
    /// Credit ID.
    #[serde(default)]
    pub credit_id: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: Option<u32>,
}

/// Acting credit on a TV series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbTvCast {
    /// Series fields.
    #[serde(flatten)]
    pub tv: TmdbSearchTv,
    /// Credit ID.
    #[serde(default)]
    pub credit_id: String,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Number of episodes the person appears in.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub episode_count: u32,
}

/// Production credit on a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMovieCrew {
    /// Movie fields.
    #[serde(flatten)]
    pub movie: TmdbSearchMovie,
    /// Credit ID.
    #[serde(default)]
    pub credit_id: String,
    /// Department.
    #[serde(default)]
    pub department: String,
    /// Job title.
    #[serde(default)]
    pub job: String,
}

/// Production credit on a TV series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbTvCrew {
    /// Series fields.
    #[serde(flatten)]
    pub tv: TmdbSearchTv,
    /// Credit ID.
    #[serde(default)]
    pub credit_id: String,
    /// Department.
    #[serde(default)]
    pub department: String,
    /// Job title.
    #[serde(default)]
    pub job: String,
    /// Number of episodes worked on.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub episode_count: u32,
}

/// Combined-credits cast entry, dispatched on `media_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TmdbCombinedCast {
    /// `movie`.
    Movie(TmdbMovieCast),
    /// `tv`.
    Tv(TmdbTvCast),
}

/// Combined-credits crew entry, dispatched on `media_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TmdbCombinedCrew {
    /// `movie`.
    Movie(TmdbMovieCrew),
    /// `tv`.
    Tv(TmdbTvCrew),
}

static COMBINED_CAST: LazyLock<DiscriminatorMap<TmdbCombinedCast>> = LazyLock::new(|| {
    DiscriminatorMap::new(MEDIA_TYPE, AbsentPolicy::Skip)
        .variant("movie", |v| from_value(v).map(TmdbCombinedCast::Movie))
        .variant("tv", |v| from_value(v).map(TmdbCombinedCast::Tv))
});

static COMBINED_CREW: LazyLock<DiscriminatorMap<TmdbCombinedCrew>> = LazyLock::new(|| {
    DiscriminatorMap::new(MEDIA_TYPE, AbsentPolicy::Skip)
        .variant("movie", |v| from_value(v).map(TmdbCombinedCrew::Movie))
        .variant("tv", |v| from_value(v).map(TmdbCombinedCrew::Tv))
});

impl_union!(TmdbCombinedCast, COMBINED_CAST);
impl_union!(TmdbCombinedCrew, COMBINED_CREW);

impl TmdbCombinedCast {
    /// Credit ID.
    #[must_use]
    pub fn credit_id(&self) -> &str {
        match self {
            Self::Movie(credit) => &credit.credit_id,
            Self::Tv(credit) => &credit.credit_id,
        }
    }

    /// Movie title or series name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Movie(credit) => &credit.movie.title,
            Self::Tv(credit) => &credit.tv.name,
        }
    }

    /// Character played, if known.
    #[must_use]
    pub fn character(&self) -> Option<&str> {
        match self {
            Self::Movie(credit) => credit.character.as_deref(),
            Self::Tv(credit) => credit.character.as_deref(),
        }
    }
}

impl TmdbCombinedCrew {
    /// Credit ID.
    #[must_use]
    pub fn credit_id(&self) -> &str {
        match self {
            Self::Movie(credit) => &credit.credit_id,
            Self::Tv(credit) => &credit.credit_id,
        }
    }

    /// Movie title or series name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Movie(credit) => &credit.movie.title,
            Self::Tv(credit) => &credit.tv.name,
        }
    }

    /// Job title.
    #[must_use]
    pub fn job(&self) -> &str {
        match self {
            Self::Movie(credit) => &credit.job,
            Self::Tv(credit) => &credit.job,
        }
    }
}

// --- Tagged images ---

/// Response from `person/{person_id}/tagged_images`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbTaggedImages {
    /// TMDb person ID.
    #[serde(default)]
    pub id: u64,
    /// Current page number.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub page: u32,
    /// Images on this page.
    #[serde(default)]
    pub results: Vec<TmdbTaggedImage>,
    /// Total number of pages.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub total_results: u32,
}

/// An image of a person, tagged with the movie or series it comes from.
///
/// The type of `media` is chosen by the sibling `media_type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TmdbTaggedImage {
    /// Image file fields.
    #[serde(flatten)]
    pub image: TmdbImage,
    /// Image ID.
    pub id: String,
    /// Image kind.
    #[serde(with = "crate::convert::tolerant_enum")]
    pub image_type: ImageType,
    /// Kind of `media`.
    #[serde(skip_serializing_if = "crate::convert::wire_enum::is_absent")]
    pub media_type: MediaType,
    /// The tagged movie or series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<TmdbTaggedMedia>,
}

/// Everything on a tagged image except `media`.
#[derive(Deserialize)]
struct TaggedImageHead {
    #[serde(flatten)]
    image: TmdbImage,
    #[serde(default)]
    id: String,
    #[serde(default, with = "crate::convert::tolerant_enum")]
    image_type: ImageType,
    #[serde(default, with = "crate::convert::tolerant_enum")]
    media_type: MediaType,
}

impl<'de> Deserialize<'de> for TmdbTaggedImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let (head, media) =
            read_nested::<TaggedImageHead, _>(&TAGGED_MEDIA, value, "media").map_err(D::Error::custom)?;
        Ok(Self {
            image: head.image,
            id: head.id,
            image_type: head.image_type,
            media_type: head.media_type,
            media,
        })
    }
}

/// The `media` of a tagged image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TmdbTaggedMedia {
    /// `movie`.
    Movie(TmdbSearchMovie),
    /// `tv`.
    Tv(TmdbSearchTv),
}

impl TmdbTaggedMedia {
    /// Title of a movie or name of a series.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Movie(movie) => &movie.title,
            Self::Tv(tv) => &tv.name,
        }
    }
}

static TAGGED_MEDIA: LazyLock<DiscriminatorMap<TmdbTaggedMedia>> = LazyLock::new(|| {
    DiscriminatorMap::new(MEDIA_TYPE, AbsentPolicy::Skip)
        .variant("movie", |v| from_value(v).map(TmdbTaggedMedia::Movie))
        .variant("tv", |v| from_value(v).map(TmdbTaggedMedia::Tv))
});

// --- Credit details ---

/// Response from `credit/{credit_id}`.
///
/// `media` is a movie or a series depending on the sibling `media_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TmdbCreditDetails {
    /// Credit ID.
    pub id: String,
    /// `cast` or `crew`; any other value fails the payload.
    #[serde(skip_serializing_if = "crate::convert::wire_enum::is_absent")]
    pub credit_type: CreditType,
    /// Department.
    pub department: String,
    /// Job title.
    pub job: String,
    /// Kind of `media`.
    #[serde(skip_serializing_if = "crate::convert::wire_enum::is_absent")]
    pub media_type: MediaType,
    /// The credited movie or series.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<TmdbCreditMedia>,
    /// The credited person.
    pub person: TmdbCreditPerson,
}

#[derive(Deserialize)]
struct CreditDetailsHead {
    #[serde(default)]
    id: String,
    #[serde(default)]
    credit_type: CreditType,
    #[serde(default)]
    department: String,
    #[serde(default)]
    job: String,
    #[serde(default, with = "crate::convert::tolerant_enum")]
    media_type: MediaType,
    person: TmdbCreditPerson,
}

impl<'de> Deserialize<'de> for TmdbCreditDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let (head, media) =
            read_nested::<CreditDetailsHead, _>(&CREDIT_MEDIA, value, "media").map_err(D::Error::custom)?;
        Ok(Self {
            id: head.id,
            credit_type: head.credit_type,
            department: head.department,
            job: head.job,
            media_type: head.media_type,
            media,
            person: head.person,
        })
    }
}

/// Person on a credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCreditPerson {
    /// TMDb person ID.
    pub id: u64,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Gender.
    #[serde(default, with = "crate::convert::tolerant_enum")]
    pub gender: Gender,
    /// Department the person is best known for.
    #[serde(default)]
    pub known_for_department: Option<String>,
    /// Popularity score.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub popularity: f64,
    /// Adult flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub adult: bool,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Credited movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCreditMovie {
    /// Movie fields.
    #[serde(flatten)]
    pub movie: TmdbSearchMovie,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
}

/// Credited series with the episodes and seasons the credit covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbCreditTv {
    /// Series fields.
    #[serde(flatten)]
    pub tv: TmdbSearchTv,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Episodes covered.
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
    /// Seasons covered.
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
}

/// The `media` of a credit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum TmdbCreditMedia {
    /// `movie`.
    Movie(TmdbCreditMovie),
    /// `tv`.
    Tv(TmdbCreditTv),
}

impl TmdbCreditMedia {
    /// Title of a movie or name of a series.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Movie(credit) => &credit.movie.title,
            Self::Tv(credit) => &credit.tv.name,
        }
    }
}

static CREDIT_MEDIA: LazyLock<DiscriminatorMap<TmdbCreditMedia>> = LazyLock::new(|| {
    DiscriminatorMap::new(MEDIA_TYPE, AbsentPolicy::Skip)
        .variant("movie", |v| from_value(v).map(TmdbCreditMedia::Movie))
        .variant("tv", |v| from_value(v).map(TmdbCreditMedia::Tv))
});

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::panic)]

    use serde_json::json;

    use super::*;

    #[test]
    fn test_combined_cast_dispatch() {
        // Arrange
        let json = json!({
            "id": 287,
            "cast": [
                {"media_type": "movie", "id": 550, "title": "Fight Club", "credit_id": "52fe4250c3a36847f80149f3", "character": "Tyler Durden", "order": 1},
                {"media_type": "tv", "id": 1399, "name": "Friends", "credit_id": "525710bf760ee3776a0b", "character": "Will Colbert", "episode_count": 1}
            ],
            "crew": []
        });

        // Act
        let credits: TmdbCombinedCredits = serde_json::from_value(json).unwrap();

        // Assert
        assert_eq!(credits.cast.len(), 2);
        let TmdbCombinedCast::Movie(movie) = &credits.cast[0] else {
            panic!("expected a movie credit");
        };
        assert_eq!(movie.movie.id, 550);
        assert_eq!(movie.movie.media_type, MediaType::Movie);
        assert_eq!(movie.order, Some(1));
        assert_eq!(credits.cast[1].character(), Some("Will Colbert"));
        assert!(matches!(&credits.cast[1], TmdbCombinedCast::Tv(tv) if tv.episode_count == 1));
    }

    #[test]
    fn test_combined_crew_skips_untyped_entries() {
        // Arrange
        let json = json!({
            "id": 287,
            "crew": [
                {"id": 1, "credit_id": "x", "job": "Producer"},
                {"media_type": "movie", "id": 7, "title": "Moneyball", "credit_id": "y", "department": "Production", "job": "Producer"}
            ]
        });

        // Act
        let credits: TmdbCombinedCredits = serde_json::from_value(json).unwrap();

        // Assert
        assert!(credits.cast.is_empty());
        assert_eq!(credits.crew.len(), 1);
        assert_eq!(credits.crew[0].display_name(), "Moneyball");
        assert_eq!(credits.crew[0].job(), "Producer");
    }

    #[test]
    fn test_combined_cast_serializes_flat() {
        // Arrange
        let json = json!({"cast": [{"media_type": "movie", "id": 550, "title": "Fight Club", "credit_id": "c1"}]});
        let credits: TmdbCombinedCredits = serde_json::from_value(json).unwrap();

        // Act
        let value = serde_json::to_value(&credits.cast[0]).unwrap();

        // Assert
        assert_eq!(value["media_type"], "movie");
        assert_eq!(value["title"], "Fight Club");
        assert_eq!(value["credit_id"], "c1");
    }

    #[test]
    fn test_tagged_image_media_follows_sibling_media_type() {
        // Arrange
        let json = json!({
            "aspect_ratio": 1.778,
            "file_path": "/a.jpg",
            "height": 1080,
            "width": 1920,
            "id": "5ddc1a62d1a893001597e6c4",
            "image_type": "backdrop",
            "media_type": "tv",
            "media": {"id": 1399, "name": "Game of Thrones"}
        });

        // Act
        let image: TmdbTaggedImage = serde_json::from_value(json).unwrap();

        // Assert
        assert_eq!(image.image_type, ImageType::Backdrop);
        assert_eq!(image.image.width, 1920);
        let Some(TmdbTaggedMedia::Tv(tv)) = &image.media else {
            panic!("expected a tv media, got {:?}", image.media);
        };
        assert_eq!(tv.name, "Game of Thrones");
        assert_eq!(tv.media_type, MediaType::Tv);
    }

    #[test]
    fn test_tagged_image_without_media_type_has_no_media() {
        // Arrange
        let json = json!({"file_path": "/b.jpg", "id": "i", "image_type": "hologram", "media": {"id": 1}});

        // Act
        let image: TmdbTaggedImage = serde_json::from_value(json).unwrap();

        // Assert
        assert_eq!(image.media, None);
        assert_eq!(image.media_type, MediaType::Unknown);
        assert_eq!(image.image_type, ImageType::Unknown);
    }

    #[test]
    fn test_tagged_image_unknown_media_type_fails() {
        // Arrange
        let json = json!({"file_path": "/c.jpg", "id": "i", "media_type": "game", "media": {"id": 1}});

        // Act
        let result = serde_json::from_value::<TmdbTaggedImage>(json);

        // Assert
        assert!(result.unwrap_err().to_string().contains("unknown variant `game`"));
    }

    #[test]
    fn test_credit_details_dispatch_and_strict_credit_type() {
        // Arrange
        let json = json!({
            "credit_type": "cast",
            "department": "Acting",
            "job": "Actor",
            "id": "52fe4250c3a36847f80149f3",
            "media_type": "movie",
            "media": {"id": 550, "title": "Fight Club", "character": "Tyler Durden"},
            "person": {"id": 287, "name": "Brad Pitt", "gender": 2}
        });
        let mut bad = json.clone();
        bad["credit_type"] = json!("guest");

        // Act
        let credit: TmdbCreditDetails = serde_json::from_value(json).unwrap();
        let err = serde_json::from_value::<TmdbCreditDetails>(bad).unwrap_err();

        // Assert
        assert_eq!(credit.credit_type, CreditType::Cast);
        assert_eq!(credit.person.gender, Gender::Male);
        let Some(TmdbCreditMedia::Movie(movie)) = &credit.media else {
            panic!("expected a movie");
        };
        assert_eq!(movie.character.as_deref(), Some("Tyler Durden"));
        assert!(err.to_string().contains("unknown variant"));
    }
}

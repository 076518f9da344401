//! Search result models and the `media_type` families they belong to.

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::from_value;

use super::enums::{Gender, MediaType};
use crate::convert::{AbsentPolicy, DiscriminatorMap};

/// Discriminator of every media family.
pub(crate) const MEDIA_TYPE: &str = "media_type";

pub(crate) const fn media_movie() -> MediaType {
    MediaType::Movie
}

pub(crate) const fn media_tv() -> MediaType {
    MediaType::Tv
}

const fn media_person() -> MediaType {
    MediaType::Person
}

const fn media_collection() -> MediaType {
    MediaType::Collection
}

const fn media_tv_episode() -> MediaType {
    MediaType::TvEpisode
}

const fn media_tv_season() -> MediaType {
    MediaType::TvSeason
}

// --- Paging ---

/// One page of a paged endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbPage<T> {
    /// Current page number.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub page: u32,
    /// Results on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub total_results: u32,
}

// --- Search records ---

/// A movie search result.
///
/// Also the shape of movie entries in `known_for` and combined credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchMovie {
    /// TMDb movie ID.
    pub id: u64,
    /// Always [`MediaType::Movie`].
    #[serde(default = "media_movie")]
    pub media_type: MediaType,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub release_date: Option<NaiveDate>,
    /// Popularity score.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub popularity: f64,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub adult: bool,
    /// Video flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub video: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// A TV series search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchTv {
    /// TMDb series ID.
    pub id: u64,
    /// Always [`MediaType::Tv`].
    #[serde(default = "media_tv")]
    pub media_type: MediaType,
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
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub popularity: f64,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub adult: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// A person search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchPerson {
    /// TMDb person ID.
    pub id: u64,
    /// Always [`MediaType::Person`].
    #[serde(default = "media_person")]
    pub media_type: MediaType,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Original (untransliterated) name.
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
    /// Works the person is known for; entries without `media_type` are dropped.
    #[serde(default, with = "crate::convert::union::list")]
    pub known_for: Vec<TmdbKnownFor>,
}

/// A collection search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchCollection {
    /// TMDb collection ID.
    pub id: u64,
    /// Always [`MediaType::Collection`].
    #[serde(default = "media_collection")]
    pub media_type: MediaType,
    /// Localized name.
    #[serde(default)]
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Adult flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub adult: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// A TV episode search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchTvEpisode {
    /// TMDb episode ID.
    pub id: u64,
    /// Always [`MediaType::TvEpisode`].
    #[serde(default = "media_tv_episode")]
    pub media_type: MediaType,
    /// Episode name.
    #[serde(default)]
    pub name: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Air date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub air_date: Option<NaiveDate>,
    /// Episode number within the season.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub episode_number: u32,
    /// Season number.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub season_number: u32,
    /// Parent show ID.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub show_id: u64,
    /// Still image path.
    #[serde(default)]
    pub still_path: Option<String>,
    /// Vote average.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub vote_average: f64,
}

/// A TV season search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchTvSeason {
    /// TMDb season ID.
    pub id: u64,
    /// Always [`MediaType::TvSeason`].
    #[serde(default = "media_tv_season")]
    pub media_type: MediaType,
    /// Season name.
    #[serde(default)]
    pub name: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Air date.
    #[serde(default, with = "crate::convert::tolerant::partial_date")]
    pub air_date: Option<NaiveDate>,
    /// Season number (0 = specials).
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub season_number: u32,
    /// Number of episodes.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub episode_count: u32,
    /// Parent show ID.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub show_id: u64,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Fields shared by every search result; used when `media_type` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbSearchBase {
    /// TMDb ID.
    pub id: u64,
    /// Media type, [`MediaType::Unknown`] when absent.
    #[serde(
        default,
        with = "crate::convert::tolerant_enum",
        skip_serializing_if = "crate::convert::wire_enum::is_absent"
    )]
    pub media_type: MediaType,
    /// Popularity score.
    #[serde(default, with = "crate::convert::tolerant::null_as_zero")]
    pub popularity: f64,
    /// Adult flag.
    #[serde(default, with = "crate::convert::tolerant::null_as_false")]
    pub adult: bool,
}

// --- search/multi family ---

/// A `search/multi` result, dispatched on `media_type`.
///
/// An object without `media_type` reads as [`TmdbSearchItem::Untyped`];
/// an unrecognized `media_type` fails the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum TmdbSearchItem {
    /// `movie`.
    Movie(TmdbSearchMovie),
    /// `tv`.
    Tv(TmdbSearchTv),
    /// `person`.
    Person(TmdbSearchPerson),
    /// `collection`.
    Collection(TmdbSearchCollection),
    /// `tv_episode`.
    TvEpisode(TmdbSearchTvEpisode),
    /// `tv_season`.
    TvSeason(TmdbSearchTvSeason),
    /// No `media_type` on the wire.
    Untyped(TmdbSearchBase),
}

static SEARCH_ITEM: LazyLock<DiscriminatorMap<TmdbSearchItem>> = LazyLock::new(|| {
    DiscriminatorMap::new(
        MEDIA_TYPE,
        AbsentPolicy::Fallback(|v| from_value(v).map(TmdbSearchItem::Untyped)),
    )
    .variant("movie", |v| from_value(v).map(TmdbSearchItem::Movie))
    .variant("tv", |v| from_value(v).map(TmdbSearchItem::Tv))
    .variant("person", |v| from_value(v).map(TmdbSearchItem::Person))
    .variant("collection", |v| from_value(v).map(TmdbSearchItem::Collection))
    .variant("tv_episode", |v| from_value(v).map(TmdbSearchItem::TvEpisode))
    .variant("tv_season", |v| from_value(v).map(TmdbSearchItem::TvSeason))
});

impl_union!(TmdbSearchItem, SEARCH_ITEM);

impl TmdbSearchItem {
    /// TMDb ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        match self {
            Self::Movie(item) => item.id,
            Self::Tv(item) => item.id,
            Self::Person(item) => item.id,
            Self::Collection(item) => item.id,
            Self::TvEpisode(item) => item.id,
            Self::TvSeason(item) => item.id,
            Self::Untyped(item) => item.id,
        }
    }

    /// Media type as populated from the wire.
    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        match self {
            Self::Movie(item) => item.media_type,
            Self::Tv(item) => item.media_type,
            Self::Person(item) => item.media_type,
            Self::Collection(item) => item.media_type,
            Self::TvEpisode(item) => item.media_type,
            Self::TvSeason(item) => item.media_type,
            Self::Untyped(item) => item.media_type,
        }
    }

    /// Title for movies, name for everything else; empty when untyped.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Movie(item) => &item.title,
            Self::Tv(item) => &item.name,
            Self::Person(item) => &item.name,
            Self::Collection(item) => &item.name,
            Self::TvEpisode(item) => &item.name,
            Self::TvSeason(item) => &item.name,
            Self::Untyped(_) => "",
        }
    }
}

// --- known_for family ---

/// A `known_for` entry of a person search result.
///
/// Entries without `media_type` carry no usable shape and are dropped
/// by the containing list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TmdbKnownFor {
    /// `movie`.
    Movie(TmdbSearchMovie),
    /// `tv`.
    Tv(TmdbSearchTv),
}

static KNOWN_FOR: LazyLock<DiscriminatorMap<TmdbKnownFor>> = LazyLock::new(|| {
    DiscriminatorMap::new(MEDIA_TYPE, AbsentPolicy::Skip)
        .variant("movie", |v| from_value(v).map(TmdbKnownFor::Movie))
        .variant("tv", |v| from_value(v).map(TmdbKnownFor::Tv))
});

impl_union!(TmdbKnownFor, KNOWN_FOR);

impl TmdbKnownFor {
    /// TMDb ID.
    #[must_use]
    pub const fn id(&self) -> u64 {
        match self {
            Self::Movie(item) => item.id,
            Self::Tv(item) => item.id,
        }
    }

    /// Movie title or series name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Movie(item) => &item.title,
            Self::Tv(item) => &item.name,
        }
    }
}

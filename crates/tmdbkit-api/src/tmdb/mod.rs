//! TMDb API client module.
//!
//! Handles HTTP requests to the TMDb API v3 endpoints and models the
//! resources they return, including the polymorphic `media_type` and
//! `action` families.

/// Binds a family enum to its static dispatch table and implements
/// `Deserialize` through it.
macro_rules! impl_union {
    ($family:ty, $map:ident) => {
        impl $crate::convert::Union for $family {
            fn discriminator_map() -> &'static $crate::convert::DiscriminatorMap<Self> {
                &$map
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $family {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::convert::union::deserialize(deserializer)
            }
        }
    };
}

mod account;
mod api;
mod changes;
mod client;
mod details;
mod enums;
mod params;
mod people;
mod types;

pub use account::{TmdbAccountStates, TmdbStatusResponse};
#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
pub use changes::{
    TmdbChange, TmdbChangeAdded, TmdbChangeCreated, TmdbChangeDeleted, TmdbChangeDestroyed,
    TmdbChangeItem, TmdbChangeItemBase, TmdbChangeUpdated, TmdbChanges,
};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use details::{
    TmdbConfiguration, TmdbEpisode, TmdbGenre, TmdbImage, TmdbImagesConfiguration, TmdbMovie,
    TmdbSeasonSummary, TmdbTvDetails, TmdbTvSeason,
};
pub use enums::{ChangeAction, CreditType, Gender, ImageType, MediaType, MovieStatus};
pub use params::{
    ChangesParams, SearchMovieParams, SearchMultiParams, SearchPersonParams, SearchTvParams,
};
pub use people::{
    TmdbCombinedCast, TmdbCombinedCredits, TmdbCombinedCrew, TmdbCreditDetails, TmdbCreditMedia,
    TmdbCreditMovie, TmdbCreditPerson, TmdbCreditTv, TmdbMovieCast, TmdbMovieCrew,
    TmdbTaggedImage, TmdbTaggedImages, TmdbTaggedMedia, TmdbTvCast, TmdbTvCrew,
};
pub use types::{
    TmdbKnownFor, TmdbPage, TmdbSearchBase, TmdbSearchCollection, TmdbSearchItem, TmdbSearchMovie,
    TmdbSearchPerson, TmdbSearchTv, TmdbSearchTvEpisode, TmdbSearchTvSeason,
};

//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::account::{TmdbAccountStates, TmdbStatusResponse};
use super::changes::TmdbChanges;
use super::details::{TmdbConfiguration, TmdbMovie, TmdbTvDetails, TmdbTvSeason};
use super::params::{
    ChangesParams, SearchMovieParams, SearchMultiParams, SearchPersonParams, SearchTvParams,
};
use super::people::{TmdbCombinedCredits, TmdbCreditDetails, TmdbTaggedImages};
use super::types::{TmdbPage, TmdbSearchItem, TmdbSearchMovie, TmdbSearchPerson, TmdbSearchTv};

/// TMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Methods taking a `language` use the client's configured language when
/// it is `None`.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies, series and people in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails,
    /// including a result with an unrecognized `media_type`.
    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbPage<TmdbSearchItem>>;

    /// Searches for movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbPage<TmdbSearchMovie>>;

    /// Searches for TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbPage<TmdbSearchTv>>;

    /// Searches for people.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_person(&self, params: &SearchPersonParams)
    -> Result<TmdbPage<TmdbSearchPerson>>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64, language: Option<&str>) -> Result<TmdbMovie>;

    /// Fetches the change log of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails,
    /// including an item with an unrecognized `action`.
    async fn movie_changes(&self, movie_id: u64, params: &ChangesParams) -> Result<TmdbChanges>;

    /// Fetches the account's favorite, watchlist and rating state for a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_account_states(&self, movie_id: u64) -> Result<TmdbAccountStates>;

    /// Rates a movie; `value` must be 0.5 to 10.0 in steps of 0.5.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is out of range or the request fails.
    async fn rate_movie(&self, movie_id: u64, value: f64) -> Result<TmdbStatusResponse>;

    /// Removes the account's rating of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn delete_movie_rating(&self, movie_id: u64) -> Result<TmdbStatusResponse>;

    /// Fetches TV series details including season list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_details(&self, series_id: u64, language: Option<&str>) -> Result<TmdbTvDetails>;

    /// Fetches TV season details including episode list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: Option<&str>,
    ) -> Result<TmdbTvSeason>;

    /// Fetches a person's movie and TV credits.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person_combined_credits(
        &self,
        person_id: u64,
        language: Option<&str>,
    ) -> Result<TmdbCombinedCredits>;

    /// Fetches images a person is tagged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person_tagged_images(&self, person_id: u64, page: u32) -> Result<TmdbTaggedImages>;

    /// Fetches a single credit with its person and media.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails,
    /// including a `credit_type` other than `cast` or `crew`.
    async fn credit_details(&self, credit_id: &str) -> Result<TmdbCreditDetails>;

    /// Fetches the API configuration (image base URLs and sizes).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn configuration(&self) -> Result<TmdbConfiguration>;
}

//! `TmdbClient` - TMDb API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::account::{RatingBody, TmdbAccountStates, TmdbStatusResponse};
use super::api::LocalTmdbApi;
use super::changes::TmdbChanges;
use super::details::{TmdbConfiguration, TmdbMovie, TmdbTvDetails, TmdbTvSeason};
use super::params::{
    ChangesParams, Query, SearchMovieParams, SearchMultiParams, SearchPersonParams, SearchTvParams,
};
use super::people::{TmdbCombinedCredits, TmdbCreditDetails, TmdbTaggedImages};
use super::types::{TmdbPage, TmdbSearchItem, TmdbSearchMovie, TmdbSearchPerson, TmdbSearchTv};

/// Default base URL for TMDb API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Default number of retries for transport errors, HTTP 429 and HTTP 5xx.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff step between retries.
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Valid rating range.
const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.5..=10.0;

/// TMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Language sent when a call does not name one.
    language: String,
    /// Session ID appended to account endpoints.
    session_id: Option<String>,
    /// Retries after the first attempt.
    max_retries: u32,
    /// Backoff step; the n-th retry waits n steps.
    retry_backoff: Duration,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    session_id: Option<String>,
    max_retries: Option<u32>,
    retry_backoff: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            language: None,
            session_id: None,
            max_retries: None,
            retry_backoff: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the default response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the session ID used by account endpoints.
    #[must_use]
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Sets the number of retries (default: 3).
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the backoff step between retries (default: 1s).
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            session_id: self.session_id,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_backoff: self.retry_backoff.unwrap_or(DEFAULT_RETRY_BACKOFF),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Language sent when a call does not name one.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    fn language_query(&self, language: Option<&str>) -> Query {
        vec![("language", String::from(language.unwrap_or(&self.language)))]
    }

    fn session_query(&self) -> Query {
        self.session_id
            .iter()
            .map(|id| ("session_id", id.clone()))
            .collect()
    }

    /// Sends a GET request.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.send_json(Method::GET, path, query, None).await
    }

    /// Sends a POST request with a JSON body.
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: serde_json::Value,
    ) -> Result<T> {
        self.send_json(Method::POST, path, query, Some(&body)).await
    }

    /// Sends a DELETE request.
    async fn delete_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.send_json(Method::DELETE, path, query, None).await
    }

    /// Sends a request with Bearer auth and decodes the JSON response.
    /// Retries up to `max_retries` times on transport errors, HTTP 429 and
    /// HTTP 5xx.
    #[instrument(skip_all)]
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            let mut builder = self
                .http_client
                .request(method.clone(), url.clone())
                .bearer_auth(&self.api_token)
                .query(query);
            if let Some(body) = body {
                builder = builder.json(body);
            }
            let request = builder
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(method = %method, url = %request.url(), "TMDB API request");

            let response = match self.http_client.execute(request).await {
                Ok(response) => response,
                Err(err) => {
                    retries = retries.saturating_add(1);
                    if retries > self.max_retries {
                        return Err(err).with_context(|| {
                            format!("request failed after {} retries: {path}", self.max_retries)
                        });
                    }
                    tracing::warn!(
                        retry = retries,
                        max_retries = self.max_retries,
                        error = %err,
                        "TMDB API request failed. Retrying..."
                    );
                    tokio::time::sleep(self.retry_backoff.saturating_mul(retries)).await;
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                retries = retries.saturating_add(1);
                if retries > self.max_retries {
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        bail!(
                            "TMDB API rate limit exceeded after {} retries: {path}",
                            self.max_retries
                        );
                    }
                    let message = error_message(status, response).await;
                    bail!("{message} (after {} retries)", self.max_retries);
                }
                let delay = retry_after(&response)
                    .unwrap_or_else(|| self.retry_backoff.saturating_mul(retries));
                tracing::warn!(
                    retry = retries,
                    max_retries = self.max_retries,
                    status = %status,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "TMDB API request throttled or unavailable. Retrying..."
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if !status.is_success() {
                let message = error_message(status, response).await;
                bail!("{message}");
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;
            let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
            let parsed =
                raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
            return Ok(parsed);
        }
    }
}

/// Seconds from a `Retry-After` header, if present and numeric.
fn retry_after(response: &Response) -> Option<Duration> {
    let header = response.headers().get(RETRY_AFTER)?;
    let seconds = header.to_str().ok()?.trim().parse::<u64>().ok()?;
    Some(Duration::from_secs(seconds))
}

/// Describes a failed response, decoding the TMDb status body when possible.
async fn error_message(status: StatusCode, response: Response) -> String {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("<failed to read body>"));
    serde_json::from_str::<TmdbStatusResponse>(&body).map_or_else(
        |_| format!("TMDB API error (HTTP {status}): {body}"),
        |error_response| {
            format!(
                "TMDB API error (HTTP {status}): code={}, message={}",
                error_response.status_code, error_response.status_message,
            )
        },
    )
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbPage<TmdbSearchItem>> {
        let query = params.to_query(&self.language);
        self.get_json("search/multi", &query).await
    }

    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbPage<TmdbSearchMovie>> {
        let query = params.to_query(&self.language);
        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbPage<TmdbSearchTv>> {
        let query = params.to_query(&self.language);
        self.get_json("search/tv", &query).await
    }

    #[instrument(skip_all)]
    async fn search_person(
        &self,
        params: &SearchPersonParams,
    ) -> Result<TmdbPage<TmdbSearchPerson>> {
        let query = params.to_query(&self.language);
        self.get_json("search/person", &query).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64, language: Option<&str>) -> Result<TmdbMovie> {
        let path = format!("movie/{movie_id}");
        self.get_json(&path, &self.language_query(language)).await
    }

    #[instrument(skip_all)]
    async fn movie_changes(&self, movie_id: u64, params: &ChangesParams) -> Result<TmdbChanges> {
        let path = format!("movie/{movie_id}/changes");
        self.get_json(&path, &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn movie_account_states(&self, movie_id: u64) -> Result<TmdbAccountStates> {
        let path = format!("movie/{movie_id}/account_states");
        self.get_json(&path, &self.session_query()).await
    }

    #[instrument(skip_all)]
    async fn rate_movie(&self, movie_id: u64, value: f64) -> Result<TmdbStatusResponse> {
        if !RATING_RANGE.contains(&value) || (value * 2.0).fract().abs() > f64::EPSILON {
            bail!("rating must be between 0.5 and 10.0 in steps of 0.5, got {value}");
        }
        let path = format!("movie/{movie_id}/rating");
        let body = serde_json::to_value(RatingBody { value }).context("failed to encode rating")?;
        self.post_json(&path, &self.session_query(), body).await
    }

    #[instrument(skip_all)]
    async fn delete_movie_rating(&self, movie_id: u64) -> Result<TmdbStatusResponse> {
        let path = format!("movie/{movie_id}/rating");
        self.delete_json(&path, &self.session_query()).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64, language: Option<&str>) -> Result<TmdbTvDetails> {
        let path = format!("tv/{series_id}");
        self.get_json(&path, &self.language_query(language)).await
    }

    #[instrument(skip_all)]
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: Option<&str>,
    ) -> Result<TmdbTvSeason> {
        let path = format!("tv/{series_id}/season/{season_number}");
        self.get_json(&path, &self.language_query(language)).await
    }

    #[instrument(skip_all)]
    async fn person_combined_credits(
        &self,
        person_id: u64,
        language: Option<&str>,
    ) -> Result<TmdbCombinedCredits> {
        let path = format!("person/{person_id}/combined_credits");
        self.get_json(&path, &self.language_query(language)).await
    }

    #[instrument(skip_all)]
    async fn person_tagged_images(&self, person_id: u64, page: u32) -> Result<TmdbTaggedImages> {
        let path = format!("person/{person_id}/tagged_images");
        let query = [("page", page.to_string())];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn credit_details(&self, credit_id: &str) -> Result<TmdbCreditDetails> {
        let path = format!("credit/{credit_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn configuration(&self) -> Result<TmdbConfiguration> {
        self.get_json("configuration", &[]).await
    }
}

//! Request parameters for search and change-log endpoints.
//!
//! Each builder leaves `language` unset by default; the client then sends
//! its own configured language.

use chrono::NaiveDate;

/// Query string pairs handed to the HTTP layer.
pub(crate) type Query = Vec<(&'static str, String)>;

/// Parameters for `search/multi`.
#[derive(Debug, Clone)]
pub struct SearchMultiParams {
    /// Search query (required).
    pub query: String,
    /// Response language; the client's language when `None`.
    pub language: Option<String>,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMultiParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Includes adult content.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    pub(crate) fn to_query(&self, default_language: &str) -> Query {
        vec![
            ("query", self.query.clone()),
            ("language", pick_language(self.language.as_deref(), default_language)),
            ("page", self.page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ]
    }
}

/// Parameters for `search/movie`.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language; the client's language when `None`.
    pub language: Option<String>,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by primary release year.
    pub primary_release_year: Option<u32>,
    /// Filter by year.
    pub year: Option<u32>,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            page: 1,
            primary_release_year: None,
            year: None,
            region: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn primary_release_year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub(crate) fn to_query(&self, default_language: &str) -> Query {
        let mut query = vec![
            ("query", self.query.clone()),
            ("language", pick_language(self.language.as_deref(), default_language)),
            ("page", self.page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        if let Some(year) = self.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(ref region) = self.region {
            query.push(("region", region.clone()));
        }
        query
    }
}

/// Parameters for `search/tv`.
#[derive(Debug, Clone)]
pub struct SearchTvParams {
    /// Search query (required).
    pub query: String,
    /// Response language; the client's language when `None`.
    pub language: Option<String>,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by first air date year.
    pub first_air_date_year: Option<u32>,
    /// Filter by year (searches first air date and episode air dates).
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            page: 1,
            first_air_date_year: None,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the first air date year filter.
    #[must_use]
    pub const fn first_air_date_year(mut self, year: u32) -> Self {
        self.first_air_date_year = Some(year);
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub(crate) fn to_query(&self, default_language: &str) -> Query {
        let mut query = vec![
            ("query", self.query.clone()),
            ("language", pick_language(self.language.as_deref(), default_language)),
            ("page", self.page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        if let Some(year) = self.first_air_date_year {
            query.push(("first_air_date_year", year.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        query
    }
}

/// Parameters for `search/person`.
#[derive(Debug, Clone)]
pub struct SearchPersonParams {
    /// Search query (required).
    pub query: String,
    /// Response language; the client's language when `None`.
    pub language: Option<String>,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchPersonParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub(crate) fn to_query(&self, default_language: &str) -> Query {
        vec![
            ("query", self.query.clone()),
            ("language", pick_language(self.language.as_deref(), default_language)),
            ("page", self.page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ]
    }
}

/// Parameters for `*/changes` endpoints.
///
/// TMDb only serves the last 14 days of changes; both bounds are optional.
#[derive(Debug, Clone, Default)]
pub struct ChangesParams {
    /// First day (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Result page.
    pub page: Option<u32>,
}

impl ChangesParams {
    /// Creates empty params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first day.
    #[must_use]
    pub const fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the last day.
    #[must_use]
    pub const fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(date) = self.start_date {
            query.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            query.push(("end_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

fn pick_language(language: Option<&str>, default_language: &str) -> String {
    String::from(language.unwrap_or(default_language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_multi_uses_client_language_by_default() {
        // Arrange
        let params = SearchMultiParams::new("Fight Club").page(2);

        // Act
        let query = params.to_query("ja-JP");

        // Assert
        assert!(query.contains(&("language", String::from("ja-JP"))));
        assert!(query.contains(&("page", String::from("2"))));
        assert!(query.contains(&("include_adult", String::from("false"))));
    }

    #[test]
    fn test_explicit_language_wins() {
        // Arrange
        let params = SearchMovieParams::new("Suzume").language("fr-FR").year(2022);

        // Act
        let query = params.to_query("en-US");

        // Assert
        assert!(query.contains(&("language", String::from("fr-FR"))));
        assert!(query.contains(&("year", String::from("2022"))));
        assert!(!query.iter().any(|(key, _)| *key == "region"));
    }

    #[test]
    fn test_search_tv_optional_filters() {
        // Arrange
        let params = SearchTvParams::new("SPY×FAMILY").first_air_date_year(2022);

        // Act
        let query = params.to_query("en-US");

        // Assert
        assert!(query.contains(&("first_air_date_year", String::from("2022"))));
        assert!(!query.iter().any(|(key, _)| *key == "year"));
    }

    #[test]
    fn test_changes_dates_are_iso() {
        // Arrange
        let params = ChangesParams::new()
            .start_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default())
            .end_date(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap_or_default());

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            query,
            vec![
                ("start_date", String::from("2024-03-01")),
                ("end_date", String::from("2024-03-14")),
            ]
        );
    }

    #[test]
    fn test_changes_empty_by_default() {
        // Arrange & Act
        let query = ChangesParams::new().to_query();

        // Assert
        assert!(query.is_empty());
    }
}

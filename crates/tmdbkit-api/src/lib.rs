//! Client library for The Movie Database (TMDb) API v3.
//!
//! Provides the serialization layer for TMDb's irregular JSON shapes
//! and an HTTP client with one method per endpoint.

/// Serde converters for polymorphic objects, wire enums and tolerant primitives.
pub mod convert;

/// TMDb resource models and API client.
pub mod tmdb;

//! Remote movie catalog integration.
//!
//! The browser only needs two reads from the catalog: a free-text search and
//! a lookup of a single title by its provider id. [`OmdbClient`] implements
//! both against the OMDb HTTP API.

mod omdb;
mod types;

pub use omdb::OmdbClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Message shown when a well-formed response has no matches.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Message shown for transport, HTTP and decoding failures.
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong with fetching movies";

/// Errors that can occur when interacting with the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing or rejected API key).
    #[error("Client not configured: {0}")]
    NotConfigured(String),

    /// The request was superseded before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl CatalogError {
    /// Whether this error comes from the caller abandoning the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }

    /// Human-readable message for the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => NOT_FOUND_MESSAGE,
            _ => FETCH_FAILED_MESSAGE,
        }
    }
}

/// Trait for remote movie catalogs.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search titles matching a free-text query.
    ///
    /// A well-formed "no matches" answer is `Ok` with `found == false`,
    /// not an error.
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError>;

    /// Get full details for a single title.
    async fn get_by_id(&self, id: &str) -> Result<MovieDetail, CatalogError>;
}

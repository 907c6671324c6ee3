//! Testing utilities and mock implementations.
//!
//! This module provides doubles for every external seam of the browser,
//! allowing end-to-end tests without network access or a database file.
//!
//! # Example
//!
//! ```rust,ignore
//! use popcorn_core::testing::{fixtures, MemoryKeyValueStore, MockCatalog, RecordingTitleSink};
//!
//! let catalog = Arc::new(MockCatalog::new());
//! catalog.add_movie(fixtures::movie_detail("tt1", "Batman", "1989")).await;
//!
//! // Hold a request open to exercise cancellation
//! catalog.hold("bat").await;
//! ```

mod memory_store;
mod mock_catalog;
mod title_sink;

pub use memory_store::MemoryKeyValueStore;
pub use mock_catalog::{MockCatalog, RecordedCatalogQuery};
pub use title_sink::RecordingTitleSink;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::external_catalog::{MovieDetail, SearchResultItem};
    use crate::watched::WatchedEntry;

    /// Create a search result row.
    pub fn search_item(id: &str, title: &str, year: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            poster_url: format!("https://img.example.com/{}.jpg", id),
        }
    }

    /// Create a full title with reasonable defaults.
    pub fn movie_detail(id: &str, title: &str, year: &str) -> MovieDetail {
        MovieDetail {
            id: id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            poster_url: format!("https://img.example.com/{}.jpg", id),
            runtime_minutes: Some(120),
            rating_external: Some(7.5),
            plot: format!("A movie about {}.", title.to_lowercase()),
            released: format!("15 Jun {}", year),
            actors: "Jane Doe, John Roe".to_string(),
            director: "Alex Smithee".to_string(),
            genre: "Action, Drama".to_string(),
        }
    }

    /// Create a watched entry with the given user rating.
    pub fn watched_entry(id: &str, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2001".to_string(),
            poster_url: "N/A".to_string(),
            rating_external: 7.5,
            runtime_minutes: 120,
            user_rating,
        }
    }
}

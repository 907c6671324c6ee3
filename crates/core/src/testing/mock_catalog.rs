//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

use crate::external_catalog::{
    CatalogError, MovieCatalog, MovieDetail, SearchPage, SearchResultItem,
};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    Search { query: String },
    GetById { id: String },
}

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable titles (search matches titles case-insensitively)
/// - Track queries for assertions
/// - Simulate failures
/// - Hold individual requests open until released, to exercise cancellation
///
/// # Example
///
/// ```rust,ignore
/// use popcorn_core::testing::{MockCatalog, fixtures};
///
/// let catalog = MockCatalog::new();
/// catalog.add_movie(fixtures::movie_detail("tt1", "Batman", "1989")).await;
///
/// let page = catalog.search("bat").await?;
/// assert_eq!(page.items.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockCatalog {
    /// Titles in insertion order.
    movies: Arc<RwLock<Vec<MovieDetail>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// Requests (by query or id) that wait until released.
    gates: Arc<RwLock<HashMap<String, Arc<Notify>>>>,
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Add a title.
    pub async fn add_movie(&self, movie: MovieDetail) {
        self.movies.write().await.push(movie);
    }

    /// Replace all titles.
    pub async fn set_movies(&self, movies: Vec<MovieDetail>) {
        *self.movies.write().await = movies;
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<CatalogError> {
        self.next_error.write().await.take()
    }

    // =========================================================================
    // Gating
    // =========================================================================

    /// Make requests for `key` (a search query or a title id) wait until
    /// [`release`](Self::release) is called.
    pub async fn hold(&self, key: &str) {
        self.gates
            .write()
            .await
            .insert(key.to_string(), Arc::new(Notify::new()));
    }

    /// Let a held request for `key` complete. Later requests pass straight through.
    pub async fn release(&self, key: &str) {
        if let Some(gate) = self.gates.write().await.remove(key) {
            gate.notify_one();
        }
    }

    async fn wait_gate(&self, key: &str) {
        let gate = self.gates.read().await.get(key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }
}

#[async_trait]
impl MovieCatalog for MockCatalog {
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError> {
        self.record(RecordedCatalogQuery::Search {
            query: query.to_string(),
        })
        .await;
        self.wait_gate(query).await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let query_lower = query.to_lowercase();
        let items: Vec<SearchResultItem> = self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query_lower))
            .map(|m| SearchResultItem {
                id: m.id.clone(),
                title: m.title.clone(),
                year: m.year.clone(),
                poster_url: m.poster_url.clone(),
            })
            .collect();

        if items.is_empty() {
            Ok(SearchPage::not_found())
        } else {
            Ok(SearchPage::found(items))
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        self.record(RecordedCatalogQuery::GetById { id: id.to_string() })
            .await;
        self.wait_gate(id).await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.movies
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Title {} not found", id)))
    }
}

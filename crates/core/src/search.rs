//! Query-driven search against the movie catalog.
//!
//! Every query change supersedes the previous lookup. A superseded lookup is
//! cancelled through its [`CancellationToken`] and, if its response still
//! races in, discarded by a generation check taken under the state lock.
//! Only the lookup for the most recent query ever touches the visible state.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::external_catalog::{CatalogError, MovieCatalog, SearchResultItem, NOT_FOUND_MESSAGE};
use crate::metrics;

/// Queries shorter than this (in characters) do not trigger a lookup.
pub const MIN_QUERY_LEN: usize = 3;

/// Whether `query` is long enough to search for.
pub fn is_active_query(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

/// Visible state of a search session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct Inner {
    state: SearchState,
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl Inner {
    /// Supersede whatever lookup is in flight.
    fn supersede(&mut self) -> u64 {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.generation += 1;
        self.generation
    }
}

/// Owns the current query and at most one in-flight lookup.
pub struct SearchSession {
    catalog: Arc<dyn MovieCatalog>,
    inner: Arc<RwLock<Inner>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self {
            catalog,
            inner: Arc::new(RwLock::new(Inner::default())),
            in_flight: Mutex::new(None),
        }
    }

    /// Replace the query and restart the lookup lifecycle. Setting the
    /// current query again does nothing and returns false.
    ///
    /// Returns as soon as the new lookup has been started; use
    /// [`wait_idle`](Self::wait_idle) to wait for its outcome.
    pub async fn set_query(&self, text: &str) -> bool {
        let mut in_flight = self.in_flight.lock().await;
        let mut inner = self.inner.write().await;
        if inner.state.query == text {
            return false;
        }

        let generation = inner.supersede();
        inner.state.query = text.to_string();
        inner.state.results.clear();
        inner.state.error = None;

        if !is_active_query(text) {
            inner.state.is_loading = false;
            metrics::LOOKUPS.with_label_values(&["skipped"]).inc();
            debug!("Query '{}' too short, search cleared", text);
            *in_flight = None;
            return true;
        }

        let token = CancellationToken::new();
        inner.cancel = Some(token.clone());
        inner.state.is_loading = true;
        drop(inner);

        info!("Starting lookup for '{}'", text);
        *in_flight = Some(tokio::spawn(run_lookup(
            Arc::clone(&self.catalog),
            Arc::clone(&self.inner),
            text.to_string(),
            generation,
            token,
        )));
        true
    }

    /// Cancel the in-flight lookup, if any, without changing the query.
    pub async fn cancel(&self) {
        let mut in_flight = self.in_flight.lock().await;
        let mut inner = self.inner.write().await;
        inner.supersede();
        inner.state.is_loading = false;
        *in_flight = None;
    }

    /// Wait until the lookup started by the latest `set_query` has finished.
    pub async fn wait_idle(&self) {
        let handle = self.in_flight.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Lookup task failed: {}", e);
            }
        }
    }

    pub async fn snapshot(&self) -> SearchState {
        self.inner.read().await.state.clone()
    }

    pub async fn query(&self) -> String {
        self.inner.read().await.state.query.clone()
    }
}

async fn run_lookup(
    catalog: Arc<dyn MovieCatalog>,
    inner: Arc<RwLock<Inner>>,
    query: String,
    generation: u64,
    token: CancellationToken,
) {
    let outcome = tokio::select! {
        _ = token.cancelled() => Err(CatalogError::Cancelled),
        result = catalog.search(&query) => result,
    };

    let mut inner = inner.write().await;
    if token.is_cancelled() || inner.generation != generation {
        metrics::LOOKUPS.with_label_values(&["cancelled"]).inc();
        debug!("Discarding superseded lookup for '{}'", query);
        return;
    }
    inner.cancel = None;

    let state = &mut inner.state;
    match outcome {
        Ok(page) if page.found => {
            metrics::LOOKUPS.with_label_values(&["found"]).inc();
            metrics::LOOKUP_RESULTS
                .with_label_values(&[])
                .observe(page.items.len() as f64);
            debug!("Lookup for '{}' returned {} results", query, page.items.len());
            state.results = page.items;
            state.error = None;
        }
        Ok(_) => {
            metrics::LOOKUPS.with_label_values(&["not_found"]).inc();
            debug!("Lookup for '{}' found nothing", query);
            state.results.clear();
            state.error = Some(NOT_FOUND_MESSAGE.to_string());
        }
        Err(e) if e.is_cancelled() => {
            metrics::LOOKUPS.with_label_values(&["cancelled"]).inc();
        }
        Err(e) => {
            metrics::LOOKUPS.with_label_values(&["failed"]).inc();
            warn!("Lookup for '{}' failed: {}", query, e);
            state.results.clear();
            state.error = Some(e.user_message().to_string());
        }
    }
    state.is_loading = false;
}

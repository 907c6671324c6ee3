//! Loads full details for the selected title.
//!
//! Uses the same supersede-then-discard discipline as the search session:
//! only the most recent [`DetailFetcher::load`] may apply its result.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::external_catalog::{CatalogError, MovieCatalog, MovieDetail};
use crate::metrics;

/// Receives the display label for the currently open title.
///
/// The terminal front end writes it to the window title; tests record it.
pub trait DisplayTitleSink: Send + Sync {
    fn set_label(&self, label: &str);
}

/// Label shown while `title` is open.
pub fn title_label(title: &str) -> String {
    format!("Movie | {}", title)
}

/// Visible state of the detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    /// Id of the title being shown or loaded.
    pub id: Option<String>,
    /// None while loading, after a failure, or when nothing is selected.
    pub detail: Option<MovieDetail>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct Inner {
    state: DetailState,
    generation: u64,
    cancel: Option<CancellationToken>,
    label_set: bool,
}

impl Inner {
    fn supersede(&mut self) -> u64 {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.generation += 1;
        self.generation
    }
}

struct Shared {
    inner: RwLock<Inner>,
    sink: Arc<dyn DisplayTitleSink>,
    default_label: String,
}

impl Shared {
    fn reset_label(&self, inner: &mut Inner) {
        if inner.label_set {
            self.sink.set_label(&self.default_label);
            inner.label_set = false;
        }
    }
}

/// Fetches [`MovieDetail`] for the selected id.
pub struct DetailFetcher {
    catalog: Arc<dyn MovieCatalog>,
    shared: Arc<Shared>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl DetailFetcher {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        sink: Arc<dyn DisplayTitleSink>,
        default_label: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            shared: Arc::new(Shared {
                inner: RwLock::new(Inner::default()),
                sink,
                default_label: default_label.into(),
            }),
            in_flight: Mutex::new(None),
        }
    }

    /// Start loading details for `id`, superseding any previous load.
    pub async fn load(&self, id: &str) {
        let mut in_flight = self.in_flight.lock().await;
        let mut inner = self.shared.inner.write().await;

        let generation = inner.supersede();
        self.shared.reset_label(&mut inner);

        let token = CancellationToken::new();
        inner.cancel = Some(token.clone());
        inner.state = DetailState {
            id: Some(id.to_string()),
            detail: None,
            is_loading: true,
            error: None,
        };
        drop(inner);

        info!("Loading details for {}", id);
        *in_flight = Some(tokio::spawn(run_fetch(
            Arc::clone(&self.catalog),
            Arc::clone(&self.shared),
            id.to_string(),
            generation,
            token,
        )));
    }

    /// Drop the current detail and restore the default label.
    pub async fn clear(&self) {
        let mut in_flight = self.in_flight.lock().await;
        let mut inner = self.shared.inner.write().await;

        inner.supersede();
        inner.state = DetailState::default();
        self.shared.reset_label(&mut inner);
        *in_flight = None;
    }

    /// Wait until the latest load has finished.
    pub async fn wait_idle(&self) {
        let handle = self.in_flight.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Detail task failed: {}", e);
            }
        }
    }

    pub async fn snapshot(&self) -> DetailState {
        self.shared.inner.read().await.state.clone()
    }
}

async fn run_fetch(
    catalog: Arc<dyn MovieCatalog>,
    shared: Arc<Shared>,
    id: String,
    generation: u64,
    token: CancellationToken,
) {
    let outcome = tokio::select! {
        _ = token.cancelled() => Err(CatalogError::Cancelled),
        result = catalog.get_by_id(&id) => result,
    };

    let mut inner = shared.inner.write().await;
    if token.is_cancelled() || inner.generation != generation {
        metrics::DETAIL_FETCHES.with_label_values(&["cancelled"]).inc();
        debug!("Discarding superseded detail fetch for {}", id);
        return;
    }
    inner.cancel = None;
    inner.state.is_loading = false;

    match outcome {
        Ok(detail) => {
            metrics::DETAIL_FETCHES.with_label_values(&["loaded"]).inc();
            if !detail.title.is_empty() {
                shared.sink.set_label(&title_label(&detail.title));
                inner.label_set = true;
            }
            inner.state.detail = Some(detail);
        }
        Err(e) if e.is_cancelled() => {
            metrics::DETAIL_FETCHES.with_label_values(&["cancelled"]).inc();
        }
        Err(e) => {
            metrics::DETAIL_FETCHES.with_label_values(&["failed"]).inc();
            warn!("Detail fetch for {} failed: {}", id, e);
            inner.state.error = Some(e.user_message().to_string());
        }
    }
}

//! Application state: search, selection, details and the watched list.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::detail::{DetailFetcher, DetailState, DisplayTitleSink};
use crate::external_catalog::MovieCatalog;
use crate::keyboard::{self, Key, KeyOutcome};
use crate::search::{is_active_query, SearchSession, SearchState};
use crate::selection::SelectionController;
use crate::watched::{
    WatchedCollection, WatchedEntry, WatchedError, WatchedStats, MAX_USER_RATING,
    MIN_USER_RATING,
};

/// Errors raised by browser actions.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("No title is open")]
    NoSelection,

    #[error("Details for {0} are not loaded")]
    DetailNotLoaded(String),

    #[error("Rate the title before adding it")]
    NoRating,

    #[error(transparent)]
    Watched(#[from] WatchedError),
}

/// Everything needed to render the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub state: DetailState,
    /// Rating from the watched list, when the title is already watched.
    pub watched_rating: Option<u8>,
    /// Rating picked for the open title but not yet added.
    pub pending_rating: Option<u8>,
}

impl DetailView {
    pub fn is_watched(&self) -> bool {
        self.watched_rating.is_some()
    }
}

/// The movie browser.
pub struct MovieBrowser {
    search: SearchSession,
    selection: SelectionController,
    detail: DetailFetcher,
    watched: WatchedCollection,
    pending_rating: Option<u8>,
}

impl MovieBrowser {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        watched: WatchedCollection,
        title_sink: Arc<dyn DisplayTitleSink>,
        default_title: impl Into<String>,
    ) -> Self {
        Self {
            search: SearchSession::new(Arc::clone(&catalog)),
            selection: SelectionController::new(),
            detail: DetailFetcher::new(catalog, title_sink, default_title),
            watched,
            pending_rating: None,
        }
    }

    /// Change the query. A new query long enough to search closes the open
    /// title; repeating the current query changes nothing.
    pub async fn set_query(&mut self, text: &str) {
        if self.search.query().await == text {
            return;
        }
        if is_active_query(text) {
            self.close_movie().await;
        }
        self.search.set_query(text).await;
    }

    /// Open `id`, or close it if it is already open. Returns the open id.
    pub async fn select_movie(&mut self, id: &str) -> Option<String> {
        self.pending_rating = None;
        match self.selection.select(id).map(str::to_string) {
            Some(selected) => {
                self.detail.load(&selected).await;
                Some(selected)
            }
            None => {
                self.detail.clear().await;
                None
            }
        }
    }

    pub async fn close_movie(&mut self) {
        self.selection.clear();
        self.pending_rating = None;
        self.detail.clear().await;
    }

    /// Pick a rating for the open title.
    pub fn rate(&mut self, rating: u8) -> Result<(), BrowserError> {
        if !self.selection.is_open() {
            return Err(BrowserError::NoSelection);
        }
        if !(MIN_USER_RATING..=MAX_USER_RATING).contains(&rating) {
            return Err(WatchedError::InvalidRating(rating).into());
        }
        self.pending_rating = Some(rating);
        Ok(())
    }

    /// Add the open title with its pending rating, then close it.
    pub async fn add_selected_to_watched(&mut self) -> Result<WatchedEntry, BrowserError> {
        let id = self
            .selection
            .selected_id()
            .ok_or(BrowserError::NoSelection)?
            .to_string();

        let state = self.detail.snapshot().await;
        let detail = match (state.id.as_deref(), state.detail) {
            (Some(loaded_id), Some(detail)) if loaded_id == id => detail,
            _ => return Err(BrowserError::DetailNotLoaded(id)),
        };
        let rating = self.pending_rating.ok_or(BrowserError::NoRating)?;

        let entry = WatchedEntry::from_detail(&detail, rating);
        self.watched.add(entry.clone())?;
        info!("Rated {} ({}) {}/10", entry.title, entry.id, rating);

        self.close_movie().await;
        Ok(entry)
    }

    pub fn remove_watched(&mut self, id: &str) -> Result<bool, BrowserError> {
        Ok(self.watched.remove(id)?)
    }

    /// Apply a global key binding.
    pub async fn handle_key(&mut self, key: &Key, search_focused: bool) -> KeyOutcome {
        let outcome = keyboard::resolve(key, search_focused, self.selection.is_open());
        match outcome {
            KeyOutcome::FocusSearch => self.set_query("").await,
            KeyOutcome::ClosedDetail => self.close_movie().await,
            KeyOutcome::Ignored => {}
        }
        outcome
    }

    /// The open title's view, if a title is open.
    pub async fn detail_view(&self) -> Option<DetailView> {
        let id = self.selection.selected_id()?;
        Some(DetailView {
            state: self.detail.snapshot().await,
            watched_rating: self.watched.user_rating(id),
            pending_rating: self.pending_rating,
        })
    }

    pub async fn search_state(&self) -> SearchState {
        self.search.snapshot().await
    }

    /// Wait for in-flight search and detail requests to settle.
    pub async fn wait_idle(&self) {
        self.search.wait_idle().await;
        self.detail.wait_idle().await;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected_id()
    }

    pub fn pending_rating(&self) -> Option<u8> {
        self.pending_rating
    }

    pub fn watched(&self) -> &WatchedCollection {
        &self.watched
    }

    pub fn statistics(&self) -> WatchedStats {
        self.watched.statistics()
    }

    /// Cancel all in-flight requests.
    pub async fn shutdown(&self) {
        self.search.cancel().await;
        self.detail.clear().await;
    }
}

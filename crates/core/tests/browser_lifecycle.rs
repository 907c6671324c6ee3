//! Browser lifecycle integration tests.
//!
//! These tests drive the full flow through the public API:
//! search -> select -> rate -> add to watched -> restart -> remove

use std::sync::Arc;

use tempfile::TempDir;

use popcorn_core::{
    testing::{fixtures, MockCatalog, RecordedCatalogQuery, RecordingTitleSink},
    KeyValueStore, MovieBrowser, SqliteKeyValueStore, WatchedCollection, WATCHED_KEY,
};

/// Test helper wiring a browser to a mock catalog and an on-disk store.
struct TestHarness {
    catalog: Arc<MockCatalog>,
    sink: Arc<RecordingTitleSink>,
    temp_dir: TempDir,
}

impl TestHarness {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = Arc::new(MockCatalog::new());
        catalog
            .set_movies(vec![
                fixtures::movie_detail("tt1", "Batman", "1989"),
                fixtures::movie_detail("tt2", "Batman Returns", "1992"),
                fixtures::movie_detail("tt3", "The Dark Knight", "2008"),
            ])
            .await;

        Self {
            catalog,
            sink: Arc::new(RecordingTitleSink::new()),
            temp_dir,
        }
    }

    fn store(&self) -> Arc<dyn KeyValueStore> {
        let path = self.temp_dir.path().join("popcorn.db");
        Arc::new(SqliteKeyValueStore::new(&path).expect("Failed to open store"))
    }

    /// A fresh browser, as after a process restart.
    fn browser(&self) -> MovieBrowser {
        let watched = WatchedCollection::load(self.store()).expect("Failed to load watched");
        MovieBrowser::new(
            self.catalog.clone(),
            watched,
            self.sink.clone(),
            "usePopcorn",
        )
    }
}

#[tokio::test]
async fn test_search_scenarios() {
    let harness = TestHarness::new().await;
    let mut browser = harness.browser();

    browser.set_query("bat").await;
    browser.wait_idle().await;
    let state = browser.search_state().await;
    let ids: Vec<&str> = state.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["tt1", "tt2"]);
    assert!(state.error.is_none());

    browser.set_query("zzzzz").await;
    browser.wait_idle().await;
    let state = browser.search_state().await;
    assert!(state.results.is_empty());
    assert_eq!(state.error.as_deref(), Some("Movie not found"));
}

#[tokio::test]
async fn test_rapid_typing_only_applies_final_query() {
    let harness = TestHarness::new().await;
    let mut browser = harness.browser();

    harness.catalog.hold("bat").await;
    harness.catalog.hold("batm").await;

    for prefix in ["b", "ba", "bat", "batm", "batman"] {
        browser.set_query(prefix).await;
        tokio::task::yield_now().await;
    }
    browser.wait_idle().await;

    harness.catalog.release("bat").await;
    harness.catalog.release("batm").await;
    tokio::task::yield_now().await;

    let state = browser.search_state().await;
    assert_eq!(state.query, "batman");
    assert_eq!(state.results.len(), 2);
    assert!(state.error.is_none());
    assert!(!state.is_loading);

    let searches: Vec<RecordedCatalogQuery> = harness.catalog.recorded_queries().await;
    assert!(!searches.contains(&RecordedCatalogQuery::Search {
        query: "ba".to_string()
    }));
}

#[tokio::test]
async fn test_watched_list_survives_restart() {
    let harness = TestHarness::new().await;

    {
        let mut browser = harness.browser();
        browser.set_query("batman").await;
        browser.wait_idle().await;

        browser.select_movie("tt1").await;
        browser.wait_idle().await;
        browser.rate(8).unwrap();
        browser.add_selected_to_watched().await.unwrap();

        browser.select_movie("tt3").await;
        browser.wait_idle().await;
        browser.rate(10).unwrap();
        browser.add_selected_to_watched().await.unwrap();
    }

    let mut browser = harness.browser();
    let ids: Vec<&str> = browser
        .watched()
        .entries()
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["tt1", "tt3"]);

    let stats = browser.statistics();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.average_user_rating, 9.0);
    assert_eq!(stats.average_runtime, 120.0);
    assert_eq!(stats.average_external_rating, 7.5);

    assert!(browser.remove_watched("tt1").unwrap());
    assert!(!browser.remove_watched("tt1").unwrap());

    let raw = harness.store().get(WATCHED_KEY).unwrap().unwrap();
    assert!(raw.contains("\"imdbID\":\"tt3\""));
    assert!(!raw.contains("\"imdbID\":\"tt1\""));
}

#[tokio::test]
async fn test_display_title_follows_selection() {
    let harness = TestHarness::new().await;
    let mut browser = harness.browser();

    browser.select_movie("tt3").await;
    browser.wait_idle().await;
    assert_eq!(
        harness.sink.current().as_deref(),
        Some("Movie | The Dark Knight")
    );

    browser.select_movie("tt3").await;
    assert_eq!(harness.sink.current().as_deref(), Some("usePopcorn"));
}

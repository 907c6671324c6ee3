pub mod browser;
pub mod config;
pub mod detail;
pub mod external_catalog;
pub mod keyboard;
pub mod metrics;
pub mod search;
pub mod selection;
pub mod store;
pub mod testing;
pub mod watched;

pub use browser::{BrowserError, DetailView, MovieBrowser};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    DisplayConfig, SanitizedConfig, StorageConfig,
};
pub use detail::{title_label, DetailFetcher, DetailState, DisplayTitleSink};
pub use external_catalog::{
    CatalogError, MovieCatalog, MovieDetail, OmdbClient, SearchPage, SearchResultItem,
};
pub use keyboard::{Key, KeyOutcome};
pub use search::{is_active_query, SearchSession, SearchState, MIN_QUERY_LEN};
pub use selection::SelectionController;
pub use store::{KeyValueStore, SqliteKeyValueStore, StoreError};
pub use watched::{WatchedCollection, WatchedEntry, WatchedError, WatchedStats, WATCHED_KEY};

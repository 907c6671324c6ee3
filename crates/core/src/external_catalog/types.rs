//! Types returned by the movie catalog.

use serde::{Deserialize, Serialize};

/// One row of a search result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    /// Provider id (e.g. `tt0372784`).
    pub id: String,
    pub title: String,
    /// Release year as reported by the provider (may be a range like `2008–2013`).
    pub year: String,
    pub poster_url: String,
}

/// Answer to a search query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchPage {
    /// False when the catalog answered but had no matches.
    pub found: bool,
    #[serde(default)]
    pub items: Vec<SearchResultItem>,
}

impl SearchPage {
    /// A page with matches.
    pub fn found(items: Vec<SearchResultItem>) -> Self {
        Self { found: true, items }
    }

    /// A well-formed "no matches" page.
    pub fn not_found() -> Self {
        Self {
            found: false,
            items: Vec::new(),
        }
    }
}

/// Full details of a single title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// Runtime in minutes, when the provider knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    /// Provider rating (0-10), when the provider knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_external: Option<f64>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Runtime formatted the way the provider shows it.
    pub fn runtime_label(&self) -> String {
        match self.runtime_minutes {
            Some(minutes) => format!("{} min", minutes),
            None => "N/A".to_string(),
        }
    }
}

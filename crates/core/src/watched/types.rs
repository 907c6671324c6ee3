//! Watched list types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::external_catalog::MovieDetail;

/// Lowest rating a user can give.
pub const MIN_USER_RATING: u8 = 1;

/// Highest rating a user can give.
pub const MAX_USER_RATING: u8 = 10;

/// A title the user has watched and rated.
///
/// Field names on disk match the layout the list has always been stored
/// with, so existing data keeps loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    pub title: String,
    pub year: String,
    #[serde(rename = "poster")]
    pub poster_url: String,
    /// Provider rating; 0 when the provider had none.
    #[serde(rename = "imdbRating", default, deserialize_with = "null_as_default")]
    pub rating_external: f64,
    /// Runtime in minutes; 0 when the provider had none.
    #[serde(rename = "runtime", default, deserialize_with = "null_as_default")]
    pub runtime_minutes: u32,
    #[serde(rename = "userRating")]
    pub user_rating: u8,
}

impl WatchedEntry {
    /// Build an entry from loaded details and the user's rating.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            rating_external: detail.rating_external.unwrap_or(0.0),
            runtime_minutes: detail.runtime_minutes.unwrap_or(0),
            user_rating,
        }
    }
}

/// Older lists stored unparseable numbers as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Aggregate statistics over the watched list.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct WatchedStats {
    pub count: usize,
    pub average_external_rating: f64,
    pub average_user_rating: f64,
    pub average_runtime: f64,
}

impl WatchedStats {
    /// Compute statistics. Every average is 0.0 for an empty list.
    pub fn compute(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            average_external_rating: average(entries.iter().map(|e| e.rating_external)),
            average_user_rating: average(entries.iter().map(|e| f64::from(e.user_rating))),
            average_runtime: average(entries.iter().map(|e| f64::from(e.runtime_minutes))),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

//! OMDb (Open Movie Database) API client.
//!
//! OMDb requires an API key for access. Both operations hit the same
//! endpoint: `s=` searches by text, `i=` fetches a title by IMDb id.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::types::{MovieDetail, SearchPage, SearchResultItem};
use super::{CatalogError, MovieCatalog};
use crate::config::CatalogConfig;
use crate::metrics;

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &str,
        param: (&str, &str),
    ) -> Result<T, CatalogError> {
        let start = Instant::now();
        let result = self.fetch_inner(param).await;

        metrics::CATALOG_REQUEST_DURATION
            .with_label_values(&[operation])
            .observe(start.elapsed().as_secs_f64());
        metrics::CATALOG_REQUESTS
            .with_label_values(&[operation, if result.is_ok() { "success" } else { "error" }])
            .inc();

        result
    }

    async fn fetch_inner<T: for<'de> Deserialize<'de>>(
        &self,
        param: (&str, &str),
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), param])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(CatalogError::NotConfigured(
                "Invalid OMDb API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(format!("Failed to parse OMDb response: {}", e)))
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError> {
        debug!("OMDb search: query='{}'", query);

        let response: OmdbSearchResponse = self.fetch("search", ("s", query)).await?;
        Ok(response.into())
    }

    async fn get_by_id(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        debug!("OMDb get title: id={}", id);

        let response: OmdbTitleResponse = self.fetch("get_by_id", ("i", id)).await?;
        if !response.is_success() {
            return Err(CatalogError::NotFound(
                response.error.unwrap_or_else(|| format!("Title {}", id)),
            ));
        }

        Ok(response.into_detail(id))
    }
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

/// OMDb answers `"Response": "False"` with a 200 status for unknown titles.
fn is_true(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Response")]
    response: String,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbTitleResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

impl OmdbTitleResponse {
    fn is_success(&self) -> bool {
        is_true(&self.response)
    }

    fn into_detail(self, requested_id: &str) -> MovieDetail {
        MovieDetail {
            id: self.imdb_id.unwrap_or_else(|| requested_id.to_string()),
            runtime_minutes: parse_runtime(&self.runtime),
            rating_external: parse_rating(&self.imdb_rating),
            title: self.title,
            year: self.year,
            poster_url: self.poster,
            plot: self.plot,
            released: self.released,
            actors: self.actors,
            director: self.director,
            genre: self.genre,
        }
    }
}

/// `"136 min"` -> 136; `"N/A"` -> None.
fn parse_runtime(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

/// `"8.7"` -> 8.7; `"N/A"` -> None.
fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

// ============================================================================
// Conversions
// ============================================================================

impl From<OmdbSearchResponse> for SearchPage {
    fn from(r: OmdbSearchResponse) -> Self {
        if !is_true(&r.response) {
            return SearchPage::not_found();
        }
        SearchPage::found(r.search.into_iter().map(|i| i.into()).collect())
    }
}

impl From<OmdbSearchItem> for SearchResultItem {
    fn from(i: OmdbSearchItem) -> Self {
        Self {
            id: i.imdb_id,
            title: i.title,
            year: i.year,
            poster_url: i.poster,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    fn client_for(server: &ServerGuard) -> OmdbClient {
        let mut config = CatalogConfig::with_api_key("test-key");
        config.base_url = format!("{}/", server.url());
        OmdbClient::new(&config).unwrap()
    }

    fn query(params: &[(&str, &str)]) -> Matcher {
        Matcher::AllOf(
            params
                .iter()
                .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_search_sends_key_and_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(query(&[("apikey", "test-key"), ("s", "the matrix")]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"Search":[{"Title":"The Matrix","Year":"1999","imdbID":"tt0133093","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#,
            )
            .create_async()
            .await;

        let page = client_for(&server).search("the matrix").await.unwrap();

        mock.assert_async().await;
        assert!(page.found);
        assert_eq!(page.items[0].id, "tt0133093");
    }

    #[tokio::test]
    async fn test_search_without_matches_is_not_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(query(&[("s", "zzzzz")]))
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
            .create_async()
            .await;

        let page = client_for(&server).search("zzzzz").await.unwrap();
        assert!(!page.found);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_sends_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(query(&[("apikey", "test-key"), ("i", "tt0133093")]))
            .with_status(200)
            .with_body(
                r#"{"Title":"The Matrix","Year":"1999","Runtime":"136 min","imdbRating":"8.7","imdbID":"tt0133093","Response":"True"}"#,
            )
            .create_async()
            .await;

        let detail = client_for(&server).get_by_id("tt0133093").await.unwrap();

        mock.assert_async().await;
        assert_eq!(detail.title, "The Matrix");
        assert_eq!(detail.runtime_minutes, Some(136));
        assert_eq!(detail.rating_external, Some(8.7));
    }

    #[tokio::test]
    async fn test_get_by_id_unknown_title_is_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(query(&[("i", "tt0000000")]))
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
            .create_async()
            .await;

        let result = client_for(&server).get_by_id("tt0000000").await;
        assert!(matches!(result, Err(CatalogError::NotFound(msg)) if msg == "Incorrect IMDb ID."));
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_configured() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"Response":"False","Error":"Invalid API key!"}"#)
            .create_async()
            .await;

        let result = client_for(&server).search("batman").await;
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let result = client_for(&server).get_by_id("tt0133093").await;
        match result {
            Err(CatalogError::ApiError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = OmdbClient::new(&CatalogConfig::with_api_key(""));
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[test]
    fn test_search_response_conversion() {
        let json = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://example.com/bb.jpg"},
                {"Title": "Batman Returns", "Year": "1992", "imdbID": "tt0103776", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        let page: SearchPage = response.into();
        assert!(page.found);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "tt0372784");
        assert_eq!(page.items[1].poster_url, "N/A");
    }

    #[test]
    fn test_search_response_not_found() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        let page: SearchPage = response.into();
        assert!(!page.found);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_title_response_conversion() {
        let json = r#"{
            "Title": "Inception", "Year": "2010", "Rated": "PG-13",
            "Released": "16 Jul 2010", "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi", "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt",
            "Plot": "A thief who steals corporate secrets...",
            "Poster": "https://example.com/inception.jpg",
            "imdbRating": "8.8", "imdbID": "tt1375666", "Response": "True"
        }"#;

        let response: OmdbTitleResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());

        let detail = response.into_detail("tt1375666");
        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.runtime_minutes, Some(148));
        assert_eq!(detail.rating_external, Some(8.8));
        assert_eq!(detail.director, "Christopher Nolan");
    }

    #[test]
    fn test_title_response_missing_numbers() {
        let json = r#"{
            "Title": "Obscure Short", "Year": "1901", "Runtime": "N/A",
            "imdbRating": "N/A", "Response": "True"
        }"#;

        let response: OmdbTitleResponse = serde_json::from_str(json).unwrap();
        let detail = response.into_detail("tt0000001");
        assert_eq!(detail.id, "tt0000001");
        assert!(detail.runtime_minutes.is_none());
        assert!(detail.rating_external.is_none());
        assert_eq!(detail.runtime_label(), "N/A");
    }

    #[test]
    fn test_title_response_error() {
        let json = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;

        let response: OmdbTitleResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.error.as_deref(), Some("Incorrect IMDb ID."));
    }

    #[test]
    fn test_parse_runtime() {
        assert_eq!(parse_runtime("90 min"), Some(90));
        assert_eq!(parse_runtime("N/A"), None);
        assert_eq!(parse_runtime(""), None);
    }
}

//! TMDB-backed implementation of `CatalogClient`.
//!
//! Authentication is an api-key query parameter. The key and base URL live
//! on the client object, constructed once at startup and passed into the
//! pipeline; there is no process-global state.

use serde::Deserialize;
use tracing::debug;

use crate::client::{CatalogClient, SortOrder};
use crate::error::{CatalogError, Result};
use crate::types::{Candidate, GenreId, MovieDetails, MovieId};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Per-request timeout. The fetch phase of a recommendation is bounded
/// separately by the orchestrator; this keeps any single call snappy.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(2);

/// List-endpoint response envelope.
#[derive(Debug, Deserialize)]
struct PagedResults {
    #[serde(default)]
    results: Vec<Candidate>,
}

/// HTTP client for the TMDB catalog.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a client for the production catalog.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_paged(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Vec<Candidate>> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }

        let page: PagedResults = response.json().await?;
        debug!(endpoint, results = page.results.len(), "catalog page fetched");
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbClient {
    async fn discover(
        &self,
        genres: &[GenreId],
        sort: SortOrder,
        min_vote_count: u32,
        min_rating: f64,
    ) -> Result<Vec<Candidate>> {
        if genres.is_empty() {
            return Ok(Vec::new());
        }

        let genre_list = genres
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(",");

        self.get_paged(
            "discover/movie",
            &[
                ("with_genres", genre_list),
                ("sort_by", sort.as_str().to_string()),
                ("vote_count.gte", min_vote_count.to_string()),
                ("vote_average.gte", min_rating.to_string()),
                ("include_adult", "false".to_string()),
            ],
        )
        .await
    }

    async fn similar(&self, movie_id: MovieId) -> Result<Vec<Candidate>> {
        self.get_paged(&format!("movie/{}/similar", movie_id), &[])
            .await
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        let endpoint = format!("movie/{}", movie_id);
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                endpoint,
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

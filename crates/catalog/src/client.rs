//! The catalog collaborator trait.
//!
//! The recommendation pipeline only ever talks to the catalog through this
//! trait, which keeps the HTTP implementation swappable and lets tests
//! substitute canned responses.

use crate::error::Result;
use crate::types::{Candidate, GenreId, MovieDetails, MovieId};

/// Sort order for discovery queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    VoteAverageDesc,
    PopularityDesc,
}

impl SortOrder {
    /// Wire value understood by the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::VoteAverageDesc => "vote_average.desc",
            SortOrder::PopularityDesc => "popularity.desc",
        }
    }
}

/// Read-only movie catalog lookups.
///
/// Every method is network-bound and may fail or time out. Callers in the
/// recommendation core recover locally with an empty result; a catalog
/// failure is never surfaced to the end user.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Discover candidates by genre.
    ///
    /// An empty `genres` slice yields no candidates without a catalog call;
    /// a discovery query with no genre signal would return an arbitrary
    /// slice of the whole catalog.
    async fn discover(
        &self,
        genres: &[GenreId],
        sort: SortOrder,
        min_vote_count: u32,
        min_rating: f64,
    ) -> Result<Vec<Candidate>>;

    /// Movies the catalog considers similar to `movie_id`.
    async fn similar(&self, movie_id: MovieId) -> Result<Vec<Candidate>>;

    /// Full detail record for one movie (used to resolve genre names).
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails>;
}

//! Core data model shared across the recommendation pipeline.
//!
//! Everything here is a request-scoped value object: built from caller input
//! or a catalog response, consumed by one pipeline pass, then discarded.

use serde::{Deserialize, Serialize};

/// Catalog movie identifier (TMDB id).
pub type MovieId = u64;

/// Catalog genre identifier (TMDB genre id).
pub type GenreId = u32;

/// TMDB genre id vocabulary.
///
/// The catalog returns bare `genre_ids` on list endpoints; these constants
/// name the ids the pipeline cares about.
pub mod genres {
    use super::GenreId;

    pub const ACTION: GenreId = 28;
    pub const ADVENTURE: GenreId = 12;
    pub const ANIMATION: GenreId = 16;
    pub const COMEDY: GenreId = 35;
    pub const CRIME: GenreId = 80;
    pub const DRAMA: GenreId = 18;
    pub const FANTASY: GenreId = 14;
    pub const HISTORY: GenreId = 36;
    pub const HORROR: GenreId = 27;
    pub const MYSTERY: GenreId = 9648;
    pub const ROMANCE: GenreId = 10749;
    pub const SCI_FI: GenreId = 878;
    pub const THRILLER: GenreId = 53;
    pub const WAR: GenreId = 10752;
}

/// A movie the user has told us they liked.
///
/// Supplied by the caller on every request; the pipeline never persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikedMovie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    /// User-visible catalog rating on the 0–10 scale, when known.
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_year: Option<u16>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// A movie surfaced by the catalog as a possible recommendation.
///
/// Mirrors the TMDB list-result object. Candidates are never mutated after
/// deserialization, only filtered and scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub adult: bool,
}

/// A resolved genre from the catalog's detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Detail lookup result for a single movie.
///
/// Only the genre list is consumed by the pipeline; the catalog returns more
/// fields, and serde ignores them.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

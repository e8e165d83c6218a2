//! # Catalog Crate
//!
//! This crate is the boundary to the external movie catalog (TMDB).
//!
//! ## Components
//!
//! ### Data model
//! Request-scoped value objects shared by the whole pipeline:
//! - `LikedMovie`: a movie the user told us they liked (caller input)
//! - `Candidate`: a movie surfaced by the catalog as a possible
//!   recommendation, in catalog wire shape
//! - `MovieDetails` / `Genre`: the detail lookup used to resolve the
//!   chosen candidate's genre names
//!
//! ### CatalogClient
//! The collaborator trait for catalog lookups (`discover`, `similar`,
//! `movie_details`), plus `TmdbClient`, the reqwest-backed implementation.
//! Every call is network-bound and may fail or time out; callers treat
//! failure as an empty result, never as a fatal error.

pub mod client;
pub mod error;
pub mod tmdb;
pub mod types;

// Re-export commonly used types
pub use client::{CatalogClient, SortOrder};
pub use error::{CatalogError, Result};
pub use tmdb::TmdbClient;
pub use types::{genres, Candidate, Genre, GenreId, LikedMovie, MovieDetails, MovieId};

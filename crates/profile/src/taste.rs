//! Taste profile built from the user's liked movies.
//!
//! This is the "gather once, query cheaply" context for the rest of the
//! pipeline: genre frequencies are counted a single time here so that
//! discovery queries and the scoring engine never re-scan the liked list.

use std::collections::HashMap;

use catalog::{GenreId, LikedMovie};
use tracing::debug;

use crate::error::ProfileError;

/// How many ranked genres the profile keeps.
pub const PRIMARY_GENRE_COUNT: usize = 5;

/// How many of the top genres feed catalog discovery queries.
pub const DISCOVERY_GENRE_COUNT: usize = 3;

/// Baseline rating when no liked movie carries one.
const DEFAULT_AVG_RATING: f64 = 7.0;

/// The rating floor never drops below this.
const MIN_RATING_FLOOR: f64 = 6.0;

/// How far below the user's average the floor sits.
const RATING_FLOOR_MARGIN: f64 = 1.5;

/// Minimum half-width of the era window, in years.
const MIN_ERA_SPREAD: f64 = 15.0;

/// Half-width used when fewer than two release years are known
/// (stddev is undefined for a single sample).
const FALLBACK_ERA_SPREAD: f64 = 20.0;

const ERA_CLAMP_START: u16 = 1990;
const ERA_CLAMP_END: u16 = 2024;

/// Aggregated genre/rating/era signal derived from a user's liked movies.
#[derive(Debug, Clone)]
pub struct TasteProfile {
    /// Top genres, descending by frequency. Ties are broken by first-seen
    /// order in the liked-movie list (see `build_taste_profile`).
    pub primary_genres: Vec<GenreId>,

    /// Occurrence count for every genre across the liked movies.
    pub genre_frequency: HashMap<GenreId, u32>,

    /// Mean rating of the liked movies (7.0 when none carry a rating).
    pub avg_rating: f64,

    /// Minimum rating worth recommending: `max(6.0, avg_rating - 1.5)`.
    pub rating_floor: f64,

    /// Release-year window `[start, end]` around the liked movies, clamped
    /// to `[1990, 2024]`. Informational: carried for display and
    /// diagnostics, consumed by no filter and no score term.
    pub era_window: (u16, u16),
}

impl TasteProfile {
    /// The reduced genre signal used for discovery queries (top 3).
    pub fn discovery_genres(&self) -> &[GenreId] {
        let n = self.primary_genres.len().min(DISCOVERY_GENRE_COUNT);
        &self.primary_genres[..n]
    }
}

/// Build a `TasteProfile` from the user's liked movies.
///
/// ## Genre ranking
/// Genres are counted across all liked movies and ranked descending by
/// count. Ties are broken by the order in which a genre first appears while
/// scanning the liked list front to back — this tie-break is load-bearing
/// (it decides which genres reach the discovery query) and deliberately
/// pinned down rather than left to map iteration order.
///
/// # Errors
/// `ProfileError::InsufficientData` when `liked` is empty.
pub fn build_taste_profile(liked: &[LikedMovie]) -> Result<TasteProfile, ProfileError> {
    if liked.is_empty() {
        return Err(ProfileError::InsufficientData);
    }

    // Count genres, remembering when each was first seen
    let mut counts: HashMap<GenreId, u32> = HashMap::new();
    let mut first_seen: HashMap<GenreId, usize> = HashMap::new();
    let mut order = 0usize;

    for movie in liked {
        for &genre in &movie.genre_ids {
            *counts.entry(genre).or_insert(0) += 1;
            first_seen.entry(genre).or_insert_with(|| {
                let seen = order;
                order += 1;
                seen
            });
        }
    }

    let mut ranked: Vec<GenreId> = counts.keys().copied().collect();
    ranked.sort_by_key(|g| (std::cmp::Reverse(counts[g]), first_seen[g]));
    ranked.truncate(PRIMARY_GENRE_COUNT);

    let ratings: Vec<f64> = liked.iter().filter_map(|m| m.vote_average).collect();
    let avg_rating = if ratings.is_empty() {
        DEFAULT_AVG_RATING
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };
    let rating_floor = MIN_RATING_FLOOR.max(avg_rating - RATING_FLOOR_MARGIN);

    let era_window = era_window(liked);

    debug!(
        liked = liked.len(),
        primary = ?ranked,
        avg_rating,
        rating_floor,
        "built taste profile"
    );

    Ok(TasteProfile {
        primary_genres: ranked,
        genre_frequency: counts,
        avg_rating,
        rating_floor,
        era_window,
    })
}

/// Era window: mean release year ± `max(15, 2×stddev)`, clamped to
/// `[1990, 2024]`. With fewer than two known years the spread defaults to
/// 20; with no years at all the window is the full clamp range.
fn era_window(liked: &[LikedMovie]) -> (u16, u16) {
    let years: Vec<f64> = liked
        .iter()
        .filter_map(|m| m.release_year)
        .map(f64::from)
        .collect();

    if years.is_empty() {
        return (ERA_CLAMP_START, ERA_CLAMP_END);
    }

    let mean = years.iter().sum::<f64>() / years.len() as f64;
    let spread = if years.len() < 2 {
        FALLBACK_ERA_SPREAD
    } else {
        let variance =
            years.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / years.len() as f64;
        MIN_ERA_SPREAD.max(2.0 * variance.sqrt())
    };

    let clamp = |year: f64| -> u16 {
        (year.round() as i32).clamp(ERA_CLAMP_START as i32, ERA_CLAMP_END as i32) as u16
    };

    (clamp(mean - spread), clamp(mean + spread))
}

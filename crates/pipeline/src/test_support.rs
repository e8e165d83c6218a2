//! Shared fixture builders for this crate's tests.

use catalog::{Candidate, GenreId, MovieId};

/// An admissible candidate with unremarkable stats.
pub(crate) fn candidate(id: MovieId) -> Candidate {
    Candidate {
        id,
        title: format!("Candidate {}", id),
        overview: "A perfectly ordinary movie about ordinary things.".to_string(),
        genre_ids: vec![],
        vote_average: 7.0,
        vote_count: 500,
        popularity: 50.0,
        poster_path: Some(format!("/poster-{}.jpg", id)),
        release_date: Some("2015-06-01".to_string()),
        adult: false,
    }
}

/// Same, with genres attached.
pub(crate) fn candidate_with_genres(id: MovieId, genre_ids: Vec<GenreId>) -> Candidate {
    Candidate {
        genre_ids,
        ..candidate(id)
    }
}

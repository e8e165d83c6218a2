//! Core traits for the admission filtering stage.

use std::collections::HashSet;

use catalog::{Candidate, MovieId};

/// Request-scoped context shared by all admission filters.
#[derive(Debug, Clone, Default)]
pub struct AdmissionContext {
    /// Candidate ids that must never be recommended again
    /// (already seen or previously recommended).
    pub excluded_ids: HashSet<MovieId>,
}

impl AdmissionContext {
    pub fn new(excluded_ids: HashSet<MovieId>) -> Self {
        Self { excluded_ids }
    }
}

/// A hard admissibility check applied to every candidate.
///
/// Filters take ownership of the candidate list and return the survivors in
/// the same order. They are infallible: a filter can only drop candidates,
/// never fail the request.
///
/// `Send + Sync` so filter chains can be shared across concurrent requests.
pub trait AdmissionFilter: Send + Sync {
    /// Name of this filter (for logging/debugging).
    fn name(&self) -> &str;

    /// Apply this filter, keeping only admissible candidates.
    fn apply(&self, candidates: Vec<Candidate>, context: &AdmissionContext) -> Vec<Candidate>;
}

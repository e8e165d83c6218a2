//! Merges catalog source lists into one admissible candidate pool.

use std::collections::HashSet;

use catalog::{Candidate, MovieId};
use thiserror::Error;
use tracing::debug;

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{
    CompleteMetadataFilter, ExcludedIdsFilter, ExplicitContentFilter, MinimumRatingFilter,
};
use crate::traits::AdmissionContext;

/// Largest candidate pool handed to the scoring engine.
pub const CANDIDATE_CAP: usize = 40;

/// Errors raised by aggregation.
#[derive(Error, Debug)]
pub enum AggregationError {
    /// Every candidate was filtered out. Terminal for the request: there is
    /// nothing to recommend.
    #[error("no admissible candidates survived filtering")]
    NoCandidates,
}

/// Merges one or more raw catalog source lists, dedups by id, applies the
/// admission filter chain, and caps the pool size.
///
/// Source lists are passed in priority order (discovery before similar);
/// on a duplicate id, the first occurrence wins, so earlier sources always
/// outrank later ones. Candidate order is preserved end to end — the
/// selection policy's fallback depends on it.
pub struct CandidateAggregator {
    filters: FilterPipeline,
    cap: usize,
}

impl CandidateAggregator {
    /// Aggregator with the standard admission chain: excluded ids, minimum
    /// rating 6.0, complete metadata, explicit-content screening.
    pub fn new() -> Self {
        Self {
            filters: FilterPipeline::new()
                .add_filter(ExcludedIdsFilter)
                .add_filter(MinimumRatingFilter::default())
                .add_filter(CompleteMetadataFilter::default())
                .add_filter(ExplicitContentFilter::default()),
            cap: CANDIDATE_CAP,
        }
    }

    /// Override the pool cap (tests).
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Replace the filter chain.
    pub fn with_filters(mut self, filters: FilterPipeline) -> Self {
        self.filters = filters;
        self
    }

    /// Merge the source lists into the admissible pool.
    ///
    /// # Errors
    /// `AggregationError::NoCandidates` when nothing survives.
    pub fn aggregate(
        &self,
        sources: Vec<Vec<Candidate>>,
        excluded_ids: &HashSet<MovieId>,
    ) -> Result<Vec<Candidate>, AggregationError> {
        let raw_total: usize = sources.iter().map(Vec::len).sum();

        // Dedup by id, first occurrence wins, source order preserved
        let mut seen: HashSet<MovieId> = HashSet::new();
        let mut merged: Vec<Candidate> = Vec::with_capacity(raw_total);
        for source in sources {
            for candidate in source {
                if seen.insert(candidate.id) {
                    merged.push(candidate);
                }
            }
        }

        let context = AdmissionContext::new(excluded_ids.clone());
        let mut admitted = self.filters.apply(merged, &context);
        admitted.truncate(self.cap);

        debug!(
            raw = raw_total,
            admitted = admitted.len(),
            cap = self.cap,
            "aggregated candidate pool"
        );

        if admitted.is_empty() {
            return Err(AggregationError::NoCandidates);
        }
        Ok(admitted)
    }
}

impl Default for CandidateAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;

    #[test]
    fn test_dedup_keeps_first_occurrence_in_source_order() {
        let mut discovery_version = candidate(1);
        discovery_version.title = "From discovery".to_string();
        let mut similar_version = candidate(1);
        similar_version.title = "From similar".to_string();

        let pool = CandidateAggregator::new()
            .aggregate(
                vec![
                    vec![discovery_version, candidate(2)],
                    vec![similar_version, candidate(3)],
                ],
                &HashSet::new(),
            )
            .unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(pool[0].id, 1);
        assert_eq!(pool[0].title, "From discovery");
        assert_eq!(pool[1].id, 2);
        assert_eq!(pool[2].id, 3);
    }

    #[test]
    fn test_admission_rules_all_enforced() {
        let excluded = candidate(1);
        let mut low_rated = candidate(2);
        low_rated.vote_average = 4.0;
        let mut no_poster = candidate(3);
        no_poster.poster_path = None;
        let mut adult = candidate(4);
        adult.adult = true;
        let ok = candidate(5);

        let pool = CandidateAggregator::new()
            .aggregate(
                vec![vec![excluded, low_rated, no_poster, adult, ok]],
                &HashSet::from([1]),
            )
            .unwrap();

        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, 5);
    }

    #[test]
    fn test_pool_capped_preserving_order() {
        let source: Vec<_> = (1..=60).map(candidate).collect();

        let pool = CandidateAggregator::new()
            .aggregate(vec![source], &HashSet::new())
            .unwrap();

        assert_eq!(pool.len(), CANDIDATE_CAP);
        assert_eq!(pool[0].id, 1);
        assert_eq!(pool[CANDIDATE_CAP - 1].id, CANDIDATE_CAP as u64);
    }

    #[test]
    fn test_zero_survivors_is_no_candidates() {
        let mut adult = candidate(1);
        adult.adult = true;

        let result = CandidateAggregator::new().aggregate(vec![vec![adult]], &HashSet::new());
        assert!(matches!(result, Err(AggregationError::NoCandidates)));

        let result = CandidateAggregator::new().aggregate(vec![], &HashSet::new());
        assert!(matches!(result, Err(AggregationError::NoCandidates)));
    }
}

//! Filter to ensure a minimum quality threshold.

use catalog::Candidate;

use crate::traits::{AdmissionContext, AdmissionFilter};

/// Baseline catalog rating an admissible candidate must reach.
const DEFAULT_MIN_RATING: f64 = 6.0;

/// Removes candidates below the rating threshold.
pub struct MinimumRatingFilter {
    min_rating: f64,
}

impl MinimumRatingFilter {
    pub fn new(min_rating: f64) -> Self {
        Self { min_rating }
    }
}

impl Default for MinimumRatingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RATING)
    }
}

impl AdmissionFilter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &AdmissionContext) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.vote_average >= self.min_rating)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;

    #[test]
    fn test_minimum_rating_filter() {
        let mut low = candidate(1);
        low.vote_average = 5.9;
        let mut boundary = candidate(2);
        boundary.vote_average = 6.0;
        let mut high = candidate(3);
        high.vote_average = 8.4;

        let admitted = MinimumRatingFilter::default().apply(
            vec![low, boundary, high],
            &AdmissionContext::default(),
        );

        assert_eq!(admitted.len(), 2);
        assert_eq!(admitted[0].id, 2);
        assert_eq!(admitted[1].id, 3);
    }
}

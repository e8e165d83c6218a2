//! Filter to drop movies the user must not see again.
//!
//! This is the first filter in the chain: anything the user already added
//! to their liked list, or was already recommended, is out before any
//! quality check runs.

use catalog::Candidate;

use crate::traits::{AdmissionContext, AdmissionFilter};

/// Removes candidates whose id is in the request's excluded set.
///
/// Uses the HashSet in `AdmissionContext.excluded_ids` for O(1) lookups.
pub struct ExcludedIdsFilter;

impl AdmissionFilter for ExcludedIdsFilter {
    fn name(&self) -> &str {
        "ExcludedIdsFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &AdmissionContext) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| !context.excluded_ids.contains(&candidate.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;
    use std::collections::HashSet;

    #[test]
    fn test_excluded_ids_filter() {
        let context = AdmissionContext::new(HashSet::from([100, 200]));

        let candidates = vec![
            candidate(100),
            candidate(101),
            candidate(200),
            candidate(300),
        ];

        let admitted = ExcludedIdsFilter.apply(candidates, &context);

        assert_eq!(admitted.len(), 2);
        assert_eq!(admitted[0].id, 101);
        assert_eq!(admitted[1].id, 300);
    }
}

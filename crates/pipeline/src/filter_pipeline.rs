//! The FilterPipeline chains admission filters together.

use catalog::Candidate;
use tracing::debug;

use crate::traits::{AdmissionContext, AdmissionFilter};

/// Chains multiple admission filters into one pass.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ExcludedIdsFilter)
///     .add_filter(MinimumRatingFilter::default())
///     .add_filter(CompleteMetadataFilter::default())
///     .add_filter(ExplicitContentFilter::default());
///
/// let admitted = pipeline.apply(candidates, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn AdmissionFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl AdmissionFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence, preserving candidate order.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &AdmissionContext,
    ) -> Vec<Candidate> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context);
            debug!(
                filter = filter.name(),
                input = before,
                output = current.len(),
                "admission filter applied"
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

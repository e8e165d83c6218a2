//! Filter requiring presentable candidate metadata.
//!
//! A recommendation is shown as poster + blurb; a candidate missing either
//! cannot be presented, however well it would score.

use catalog::Candidate;

use crate::traits::{AdmissionContext, AdmissionFilter};

/// An overview shorter than this is treated as missing.
const MIN_OVERVIEW_LEN: usize = 20;

/// Keeps only candidates with a poster and a usable overview.
pub struct CompleteMetadataFilter {
    min_overview_len: usize,
}

impl CompleteMetadataFilter {
    pub fn new(min_overview_len: usize) -> Self {
        Self { min_overview_len }
    }
}

impl Default for CompleteMetadataFilter {
    fn default() -> Self {
        Self::new(MIN_OVERVIEW_LEN)
    }
}

impl AdmissionFilter for CompleteMetadataFilter {
    fn name(&self) -> &str {
        "CompleteMetadataFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &AdmissionContext) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| {
                candidate
                    .poster_path
                    .as_ref()
                    .is_some_and(|p| !p.is_empty())
                    && candidate.overview.len() > self.min_overview_len
            })
            .collect()
    }
}

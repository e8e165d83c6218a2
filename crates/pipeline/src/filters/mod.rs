//! Admission filter implementations for the candidate pipeline.
//!
//! Each filter enforces one hard admissibility rule; the aggregator chains
//! them all, so a candidate that reaches scoring has passed every one.

pub mod excluded;
pub mod explicit_content;
pub mod metadata;
pub mod minimum_rating;

// Re-export for convenience
pub use excluded::ExcludedIdsFilter;
pub use explicit_content::ExplicitContentFilter;
pub use metadata::CompleteMetadataFilter;
pub use minimum_rating::MinimumRatingFilter;

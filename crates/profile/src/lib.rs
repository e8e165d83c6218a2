//! # Profile Crate
//!
//! Per-request user signals for the recommendation pipeline.
//!
//! ## Components
//!
//! ### Taste profile
//! Aggregates the user's liked movies into a `TasteProfile`: ranked genre
//! frequencies, a rating baseline with floor, and an informational era
//! window.
//!
//! ### Feedback ledger
//! Folds the user's recent accept/reject feedback into disjoint
//! liked/disliked genre sets. The `FeedbackStore` trait is the collaborator
//! boundary to wherever feedback history lives.
//!
//! ### Tone inference
//! Infers a coarse emotional profile from liked-movie genres and scores how
//! well a candidate's tone matches it. A soft ranking signal only; tone
//! never filters anything.
//!
//! All three signals are independent of each other and are rebuilt from
//! caller input on every request; nothing here survives a request.

pub mod error;
pub mod feedback;
pub mod taste;
pub mod tone;

// Re-export main types
pub use error::ProfileError;
pub use feedback::{
    summarize_feedback, FeedbackEvent, FeedbackStore, FeedbackSummary, InMemoryFeedbackStore,
    FEEDBACK_WINDOW,
};
pub use taste::{build_taste_profile, TasteProfile, DISCOVERY_GENRE_COUNT, PRIMARY_GENRE_COUNT};
pub use tone::{build_tone_profile, candidate_tone_scores, tone_affinity_bonus, Tone, ToneProfile};

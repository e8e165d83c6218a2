//! Server crate for the MovieMatch recommendation engine.
//!
//! This crate contains the orchestrator that coordinates all components
//! of the recommendation pipeline for one request.

pub mod orchestrator;

pub use orchestrator::{
    RecommendError, Recommendation, RecommendationOrchestrator, RecommendationRecord,
    RecommendationRequest, MIN_LIKED_MOVIES,
};

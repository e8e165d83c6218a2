//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation request end to end:
//! 1. Validate the caller's liked-movie list
//! 2. Build the user signals (taste, feedback ledger, tone) — independent
//!    of one another
//! 3. Fetch candidates from the catalog (discovery + similar, concurrent,
//!    each under a per-call timeout, the pair under a phase timeout)
//! 4. Aggregate, score, and select
//! 5. Resolve the winner's genre names (best effort)
//! 6. Hand back the candidate plus a persistence record
//!
//! Nothing here outlives the request: the orchestrator holds only the
//! injected collaborators, so concurrent requests share no mutable state.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

use catalog::{Candidate, CatalogClient, Genre, LikedMovie, MovieId, SortOrder};
use pipeline::{
    score_candidates, AggregationError, CandidateAggregator, ScoringContext, SelectionPolicy,
};
use profile::{
    build_taste_profile, build_tone_profile, summarize_feedback, FeedbackStore, ProfileError,
    TasteProfile, FEEDBACK_WINDOW,
};

/// Liked movies the caller must supply before a recommendation is possible.
pub const MIN_LIKED_MOVIES: usize = 4;

/// How many similar-movie ids feed the collaborative score term.
const COLLABORATIVE_LIMIT: usize = 15;

/// Discovery query knobs (match the catalog defaults the product always
/// used: well-voted, decently rated, best-rated first).
const DISCOVER_MIN_VOTE_COUNT: u32 = 100;
const DISCOVER_MIN_RATING: f64 = 6.0;

/// Per-call budget for each candidate fetch.
const FETCH_CALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Budget for the whole fetch phase; tasks still in flight at the deadline
/// contribute nothing.
const FETCH_PHASE_TIMEOUT: Duration = Duration::from_secs(4);

/// Budget for the best-effort detail lookup after selection.
const DETAIL_TIMEOUT: Duration = Duration::from_secs(2);

/// Request-level failures surfaced to the caller.
///
/// Catalog and feedback-store failures never appear here — they degrade to
/// smaller candidate pools or an empty ledger. Only an invalid request or a
/// completely empty pool ends a request.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("at least {required} liked movies are required, got {supplied}")]
    InsufficientData { required: usize, supplied: usize },

    #[error("no admissible candidates to recommend")]
    NoCandidates,
}

impl From<ProfileError> for RecommendError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::InsufficientData => RecommendError::InsufficientData {
                required: MIN_LIKED_MOVIES,
                supplied: 0,
            },
        }
    }
}

impl From<AggregationError> for RecommendError {
    fn from(error: AggregationError) -> Self {
        match error {
            AggregationError::NoCandidates => RecommendError::NoCandidates,
        }
    }
}

/// One recommendation request.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    /// Opaque user identity; scopes the feedback-store query and nothing
    /// else.
    pub user_key: String,
    pub liked_movies: Vec<LikedMovie>,
    /// Candidate ids that must not be recommended (already seen or already
    /// recommended).
    pub excluded_ids: HashSet<MovieId>,
}

/// What the caller persists about a recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRecord {
    pub id: MovieId,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: String,
    pub vote_average: f64,
    pub resolved_genres: Vec<Genre>,
}

impl RecommendationRecord {
    fn from_candidate(candidate: &Candidate, resolved_genres: Vec<Genre>) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title.clone(),
            release_date: candidate.release_date.clone(),
            poster_path: candidate.poster_path.clone(),
            overview: candidate.overview.clone(),
            vote_average: candidate.vote_average,
            resolved_genres,
        }
    }
}

/// The pipeline's answer: the chosen candidate in catalog shape, its score,
/// and the record the caller stores.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub candidate: Candidate,
    pub score: f64,
    pub record: RecommendationRecord,
}

/// Main orchestrator wiring the pipeline stages together.
pub struct RecommendationOrchestrator {
    catalog: Arc<dyn CatalogClient>,
    feedback: Arc<dyn FeedbackStore>,
    aggregator: CandidateAggregator,
    selection: SelectionPolicy,
}

impl RecommendationOrchestrator {
    pub fn new(catalog: Arc<dyn CatalogClient>, feedback: Arc<dyn FeedbackStore>) -> Self {
        Self {
            catalog,
            feedback,
            aggregator: CandidateAggregator::new(),
            selection: SelectionPolicy::new(),
        }
    }

    /// Run the full pipeline for one request.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        let start = Instant::now();

        let supplied = request.liked_movies.len();
        if supplied < MIN_LIKED_MOVIES {
            return Err(RecommendError::InsufficientData {
                required: MIN_LIKED_MOVIES,
                supplied,
            });
        }

        // Independent signal builds
        let taste = build_taste_profile(&request.liked_movies)?;
        let tone = build_tone_profile(&request.liked_movies);
        let feedback_events = match self
            .feedback
            .recent_feedback(&request.user_key, FEEDBACK_WINDOW)
            .await
        {
            Ok(events) => events,
            Err(error) => {
                warn!(%error, "feedback store unavailable, scoring without feedback");
                Vec::new()
            }
        };
        let feedback = summarize_feedback(&feedback_events);
        info!(
            liked = supplied,
            primary_genres = ?taste.primary_genres,
            feedback_events = feedback_events.len(),
            "built user signals"
        );

        // Concurrent candidate fetches
        let best_liked = best_liked_movie(&request.liked_movies);
        let (discovered, similar) = self.fetch_candidates(&taste, best_liked).await;
        info!(
            discovered = discovered.len(),
            similar = similar.len(),
            "candidate fetch phase finished"
        );

        // The similar fetch doubles as the collaborative approximation:
        // its leading ids are the "users who liked X also liked" signal
        let collaborative_ids: HashSet<MovieId> = similar
            .iter()
            .take(COLLABORATIVE_LIMIT)
            .map(|c| c.id)
            .collect();

        // Aggregate, score, select
        let pool = self
            .aggregator
            .aggregate(vec![discovered, similar], &request.excluded_ids)?;
        let context = ScoringContext {
            taste: &taste,
            feedback: &feedback,
            tone: &tone,
            collaborative_ids: &collaborative_ids,
            liked_movie_count: supplied,
        };
        let scored = score_candidates(pool, &context);

        let chosen = {
            let mut rng = rand::rng();
            self.selection.select(&scored, &mut rng)
        }
        .ok_or(RecommendError::NoCandidates)?;
        let score = scored
            .iter()
            .find(|sc| sc.candidate.id == chosen.id)
            .map(|sc| sc.score)
            .unwrap_or(0.0);

        // Best-effort genre resolution for the persisted record
        let resolved_genres = self.resolve_genres(chosen.id).await;

        info!(
            id = chosen.id,
            score,
            elapsed = ?start.elapsed(),
            "recommendation selected"
        );

        let record = RecommendationRecord::from_candidate(&chosen, resolved_genres);
        Ok(Recommendation {
            candidate: chosen,
            score,
            record,
        })
    }

    /// Run both catalog fetches as concurrent tasks.
    ///
    /// Each task captures its own timeout and error; the join is bounded by
    /// the phase timeout. A task that fails, times out, or panics simply
    /// contributes an empty list — there are no retries.
    async fn fetch_candidates(
        &self,
        taste: &TasteProfile,
        best_liked: Option<MovieId>,
    ) -> (Vec<Candidate>, Vec<Candidate>) {
        let discovery_genres = taste.discovery_genres().to_vec();
        let catalog = Arc::clone(&self.catalog);
        let discover_handle = tokio::spawn(async move {
            if discovery_genres.is_empty() {
                // No genre signal: a blind discovery query would return an
                // arbitrary catalog slice, so this source stays empty
                return Vec::new();
            }
            match timeout(
                FETCH_CALL_TIMEOUT,
                catalog.discover(
                    &discovery_genres,
                    SortOrder::VoteAverageDesc,
                    DISCOVER_MIN_VOTE_COUNT,
                    DISCOVER_MIN_RATING,
                ),
            )
            .await
            {
                Ok(Ok(candidates)) => candidates,
                Ok(Err(error)) => {
                    warn!(%error, "discovery fetch failed");
                    Vec::new()
                }
                Err(_) => {
                    warn!("discovery fetch timed out");
                    Vec::new()
                }
            }
        });

        let catalog = Arc::clone(&self.catalog);
        let similar_handle = tokio::spawn(async move {
            let Some(movie_id) = best_liked else {
                return Vec::new();
            };
            match timeout(FETCH_CALL_TIMEOUT, catalog.similar(movie_id)).await {
                Ok(Ok(candidates)) => candidates,
                Ok(Err(error)) => {
                    warn!(%error, movie_id, "similar fetch failed");
                    Vec::new()
                }
                Err(_) => {
                    warn!(movie_id, "similar fetch timed out");
                    Vec::new()
                }
            }
        });

        match timeout(FETCH_PHASE_TIMEOUT, async {
            tokio::join!(discover_handle, similar_handle)
        })
        .await
        {
            Ok((discovered, similar)) => (
                discovered.unwrap_or_else(|error| {
                    warn!(%error, "discovery task panicked");
                    Vec::new()
                }),
                similar.unwrap_or_else(|error| {
                    warn!(%error, "similar task panicked");
                    Vec::new()
                }),
            ),
            Err(_) => {
                warn!("candidate fetch phase timed out");
                (Vec::new(), Vec::new())
            }
        }
    }

    /// Resolve the chosen movie's genre names; empty on any failure.
    async fn resolve_genres(&self, movie_id: MovieId) -> Vec<Genre> {
        match timeout(DETAIL_TIMEOUT, self.catalog.movie_details(movie_id)).await {
            Ok(Ok(details)) => details.genres,
            Ok(Err(error)) => {
                warn!(%error, movie_id, "detail lookup failed");
                Vec::new()
            }
            Err(_) => {
                warn!(movie_id, "detail lookup timed out");
                Vec::new()
            }
        }
    }
}

/// The liked movie with the highest rating seeds the similar-movies fetch.
fn best_liked_movie(liked: &[LikedMovie]) -> Option<MovieId> {
    liked
        .iter()
        .max_by(|a, b| {
            let a = a.vote_average.unwrap_or(0.0);
            let b = b.vote_average.unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|movie| movie.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use catalog::{genres, CatalogError, GenreId, MovieDetails};
    use profile::{FeedbackEvent, InMemoryFeedbackStore};

    // ========================================================================
    // Test fixtures
    // ========================================================================

    fn liked(id: u64, genre_ids: Vec<GenreId>, rating: f64) -> LikedMovie {
        LikedMovie {
            id,
            title: format!("Liked {}", id),
            overview: String::new(),
            genre_ids,
            vote_average: Some(rating),
            release_year: Some(2010),
            poster_path: None,
        }
    }

    fn candidate(id: u64, genre_ids: Vec<GenreId>) -> Candidate {
        Candidate {
            id,
            title: format!("Candidate {}", id),
            overview: "An admissible overview that is long enough to pass.".to_string(),
            genre_ids,
            vote_average: 7.4,
            vote_count: 2000,
            popularity: 80.0,
            poster_path: Some(format!("/poster-{}.jpg", id)),
            release_date: Some("2017-09-01".to_string()),
            adult: false,
        }
    }

    fn four_liked() -> Vec<LikedMovie> {
        vec![
            liked(900, vec![genres::ACTION, genres::THRILLER], 8.2),
            liked(901, vec![genres::ACTION], 7.9),
            liked(902, vec![genres::SCI_FI], 7.4),
            liked(903, vec![genres::DRAMA], 9.1), // best liked
        ]
    }

    // ========================================================================
    // Mock catalog
    // ========================================================================

    /// Canned-response catalog. `fail_all` makes every call error the way a
    /// dead upstream would.
    #[derive(Default)]
    struct MockCatalog {
        discover_results: Vec<Candidate>,
        similar_results: Vec<Candidate>,
        details: Option<MovieDetails>,
        fail_all: bool,
        discover_calls: AtomicUsize,
        similar_calls: AtomicUsize,
    }

    impl MockCatalog {
        fn failing() -> Self {
            Self {
                fail_all: true,
                ..Self::default()
            }
        }

        fn error(endpoint: &str) -> CatalogError {
            CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: 503,
            }
        }
    }

    #[async_trait::async_trait]
    impl CatalogClient for MockCatalog {
        async fn discover(
            &self,
            genres: &[GenreId],
            _sort: SortOrder,
            _min_vote_count: u32,
            _min_rating: f64,
        ) -> catalog::Result<Vec<Candidate>> {
            self.discover_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_all {
                return Err(Self::error("discover/movie"));
            }
            assert!(!genres.is_empty(), "blind discovery queries are a bug");
            Ok(self.discover_results.clone())
        }

        async fn similar(&self, _movie_id: MovieId) -> catalog::Result<Vec<Candidate>> {
            self.similar_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_all {
                return Err(Self::error("movie/similar"));
            }
            Ok(self.similar_results.clone())
        }

        async fn movie_details(&self, movie_id: MovieId) -> catalog::Result<MovieDetails> {
            match &self.details {
                Some(details) => Ok(details.clone()),
                None => Err(Self::error(&format!("movie/{}", movie_id))),
            }
        }
    }

    fn orchestrator(
        catalog: MockCatalog,
        feedback: Vec<FeedbackEvent>,
    ) -> (RecommendationOrchestrator, Arc<MockCatalog>) {
        let catalog = Arc::new(catalog);
        let orchestrator = RecommendationOrchestrator::new(
            catalog.clone(),
            Arc::new(InMemoryFeedbackStore::new(feedback)),
        );
        (orchestrator, catalog)
    }

    // ========================================================================
    // Tests
    // ========================================================================

    #[tokio::test]
    async fn test_happy_path_returns_candidate_and_record() {
        let catalog = MockCatalog {
            discover_results: vec![
                candidate(1, vec![genres::ACTION]),
                candidate(2, vec![genres::ACTION, genres::THRILLER]),
            ],
            similar_results: vec![candidate(3, vec![genres::SCI_FI])],
            details: Some(MovieDetails {
                id: 0,
                genres: vec![Genre {
                    id: genres::ACTION,
                    name: "Action".to_string(),
                }],
            }),
            ..MockCatalog::default()
        };
        let (orchestrator, _) = orchestrator(catalog, vec![]);

        let result = orchestrator
            .recommend(RecommendationRequest {
                user_key: "user-1".to_string(),
                liked_movies: four_liked(),
                excluded_ids: HashSet::new(),
            })
            .await
            .unwrap();

        assert!([1, 2, 3].contains(&result.candidate.id));
        assert_eq!(result.record.id, result.candidate.id);
        assert_eq!(result.record.vote_average, result.candidate.vote_average);
        assert_eq!(result.record.resolved_genres.len(), 1);
        assert_eq!(result.record.resolved_genres[0].name, "Action");
        assert!(result.score >= 0.0);
    }

    #[tokio::test]
    async fn test_too_few_liked_movies_is_insufficient_data() {
        let (orchestrator, catalog) = orchestrator(MockCatalog::default(), vec![]);

        let result = orchestrator
            .recommend(RecommendationRequest {
                user_key: "user-1".to_string(),
                liked_movies: four_liked().into_iter().take(3).collect(),
                excluded_ids: HashSet::new(),
            })
            .await;

        assert!(matches!(
            result,
            Err(RecommendError::InsufficientData {
                required: 4,
                supplied: 3
            })
        ));
        // Validation failed before any catalog traffic
        assert_eq!(catalog.discover_calls.load(Ordering::SeqCst), 0);
        assert_eq!(catalog.similar_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dead_catalog_is_no_candidates() {
        let (orchestrator, _) = orchestrator(MockCatalog::failing(), vec![]);

        let result = orchestrator
            .recommend(RecommendationRequest {
                user_key: "user-1".to_string(),
                liked_movies: four_liked(),
                excluded_ids: HashSet::new(),
            })
            .await;

        // Both sources degraded to empty, which is terminal but expected
        assert!(matches!(result, Err(RecommendError::NoCandidates)));
    }

    #[tokio::test]
    async fn test_failed_detail_lookup_yields_empty_genres() {
        let catalog = MockCatalog {
            discover_results: vec![candidate(1, vec![genres::ACTION])],
            details: None, // detail endpoint errors
            ..MockCatalog::default()
        };
        let (orchestrator, _) = orchestrator(catalog, vec![]);

        let result = orchestrator
            .recommend(RecommendationRequest {
                user_key: "user-1".to_string(),
                liked_movies: four_liked(),
                excluded_ids: HashSet::new(),
            })
            .await
            .unwrap();

        assert!(result.record.resolved_genres.is_empty());
    }

    #[tokio::test]
    async fn test_excluded_ids_are_never_recommended() {
        let catalog = MockCatalog {
            discover_results: vec![
                candidate(1, vec![genres::ACTION]),
                candidate(2, vec![genres::ACTION]),
            ],
            similar_results: vec![candidate(3, vec![genres::ACTION])],
            ..MockCatalog::default()
        };
        let (orchestrator, _) = orchestrator(catalog, vec![]);

        for _ in 0..10 {
            let result = orchestrator
                .recommend(RecommendationRequest {
                    user_key: "user-1".to_string(),
                    liked_movies: four_liked(),
                    excluded_ids: HashSet::from([1, 3]),
                })
                .await
                .unwrap();
            assert_eq!(result.candidate.id, 2);
        }
    }

    #[tokio::test]
    async fn test_no_genre_signal_skips_discovery_entirely() {
        let catalog = MockCatalog {
            similar_results: vec![candidate(5, vec![genres::DRAMA])],
            ..MockCatalog::default()
        };
        let (orchestrator, catalog) = orchestrator(catalog, vec![]);

        // Liked movies without any genre ids: no discovery signal
        let liked_movies: Vec<LikedMovie> =
            (0..4).map(|i| liked(900 + i, vec![], 7.0)).collect();

        let result = orchestrator
            .recommend(RecommendationRequest {
                user_key: "user-1".to_string(),
                liked_movies,
                excluded_ids: HashSet::new(),
            })
            .await
            .unwrap();

        assert_eq!(result.candidate.id, 5);
        assert_eq!(
            catalog.discover_calls.load(Ordering::SeqCst),
            0,
            "discovery must not run without genres"
        );
        assert_eq!(catalog.similar_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_feedback_reaches_the_scores() {
        // Two otherwise identical candidates; feedback dislikes horror
        let catalog = MockCatalog {
            discover_results: vec![
                candidate(1, vec![genres::HORROR]),
                candidate(2, vec![genres::ADVENTURE]),
            ],
            ..MockCatalog::default()
        };
        let feedback = vec![FeedbackEvent {
            genre_ids: vec![genres::HORROR],
            liked: false,
        }];
        let (orchestrator, _) = orchestrator(catalog, feedback);

        // Smoke check: the penalized candidate stays admissible (feedback
        // is a soft signal), so either can be drawn from the pool of two
        let result = orchestrator
            .recommend(RecommendationRequest {
                user_key: "user-1".to_string(),
                liked_movies: four_liked(),
                excluded_ids: HashSet::new(),
            })
            .await
            .unwrap();

        assert!([1, 2].contains(&result.candidate.id));
    }

    #[test]
    fn test_record_serializes_in_persistence_shape() {
        let record = RecommendationRecord::from_candidate(
            &candidate(7, vec![genres::ACTION]),
            vec![Genre {
                id: genres::ACTION,
                name: "Action".to_string(),
            }],
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Candidate 7");
        assert_eq!(json["vote_average"], 7.4);
        assert_eq!(json["resolved_genres"][0]["name"], "Action");
        assert!(json.get("release_date").is_some());
        assert!(json.get("poster_path").is_some());
        assert!(json.get("overview").is_some());
    }

    #[test]
    fn test_best_liked_movie_picks_highest_rating() {
        assert_eq!(best_liked_movie(&four_liked()), Some(903));
        assert_eq!(best_liked_movie(&[]), None);

        // Missing ratings lose to any rated movie
        let mixed = vec![
            LikedMovie {
                vote_average: None,
                ..liked(1, vec![], 0.0)
            },
            liked(2, vec![], 6.5),
        ];
        assert_eq!(best_liked_movie(&mixed), Some(2));
    }
}

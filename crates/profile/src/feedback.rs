//! Feedback ledger: recent accept/reject history folded into genre sets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use catalog::GenreId;

/// How many of the newest feedback events the ledger considers.
pub const FEEDBACK_WINDOW: usize = 20;

/// One accept/reject verdict on a past recommendation.
///
/// Events arrive newest first from the store, each carrying the genre ids
/// of the recommended movie and whether the user liked it. Events with an
/// unset verdict never reach the ledger; the store filters them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    pub liked: bool,
}

/// Disjoint genre sets distilled from recent feedback.
#[derive(Debug, Clone, Default)]
pub struct FeedbackSummary {
    pub liked_genres: HashSet<GenreId>,
    pub disliked_genres: HashSet<GenreId>,
}

/// Fold the newest feedback events into liked/disliked genre sets.
///
/// Genres from liked events win: a genre present in both camps lands in
/// `liked_genres` only, so the two sets are always disjoint. Pure function,
/// recomputed on every request.
pub fn summarize_feedback(events: &[FeedbackEvent]) -> FeedbackSummary {
    let mut liked_genres = HashSet::new();
    let mut disliked_genres = HashSet::new();

    for event in events.iter().take(FEEDBACK_WINDOW) {
        let target = if event.liked {
            &mut liked_genres
        } else {
            &mut disliked_genres
        };
        target.extend(event.genre_ids.iter().copied());
    }

    disliked_genres.retain(|g| !liked_genres.contains(g));

    FeedbackSummary {
        liked_genres,
        disliked_genres,
    }
}

/// Source of a user's recent feedback history.
///
/// Implementations return up to `limit` events that carry a verdict,
/// newest first, scoped to the given opaque user key.
#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn recent_feedback(
        &self,
        user_key: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<FeedbackEvent>>;
}

/// In-memory store used by the CLI (file-loaded events) and by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackStore {
    events: Vec<FeedbackEvent>,
}

impl InMemoryFeedbackStore {
    /// Wrap a newest-first event list.
    pub fn new(events: Vec<FeedbackEvent>) -> Self {
        Self { events }
    }
}

#[async_trait::async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn recent_feedback(
        &self,
        _user_key: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<FeedbackEvent>> {
        Ok(self.events.iter().take(limit).cloned().collect())
    }
}

//! Final selection: rank the scored pool and draw one winner.
//!
//! Ranking is deterministic; only the single draw at the end is random.
//! The RNG is a parameter so tests can seed it.

use catalog::Candidate;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::scoring::ScoredCandidate;

/// Size of the top slice the winner is drawn from.
pub const SELECTION_POOL_SIZE: usize = 5;

/// Ranks scored candidates and performs one weighted draw from the top
/// slice.
pub struct SelectionPolicy {
    pool_size: usize,
}

impl SelectionPolicy {
    pub fn new() -> Self {
        Self {
            pool_size: SELECTION_POOL_SIZE,
        }
    }

    /// Override the pool size (tests).
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// The deterministic top slice: scored candidates sorted descending by
    /// score. The sort is stable, so candidates with equal scores keep
    /// their aggregator order.
    pub fn ranked_pool<'a>(&self, scored: &'a [ScoredCandidate]) -> Vec<&'a ScoredCandidate> {
        let mut ranked: Vec<&ScoredCandidate> = scored.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.pool_size);
        ranked
    }

    /// Draw the winner.
    ///
    /// Each pool member weighs `max(1, score)`, so a zero-scored candidate
    /// in a pool of one is still drawn rather than starved. If the pool
    /// somehow comes up empty while candidates exist, the first candidate
    /// in aggregator order is returned; `None` only when `scored` is empty
    /// (the aggregator's contract makes that unreachable in practice).
    pub fn select<R: Rng + ?Sized>(
        &self,
        scored: &[ScoredCandidate],
        rng: &mut R,
    ) -> Option<Candidate> {
        let pool = self.ranked_pool(scored);

        if pool.is_empty() {
            // Defensive fallback: aggregator order, pre-scoring
            return scored.first().map(|sc| sc.candidate.clone());
        }

        let chosen = pool
            .choose_weighted(rng, |sc| sc.score.max(1.0))
            .map(|sc| *sc)
            .unwrap_or(pool[0]);

        debug!(
            id = chosen.candidate.id,
            score = chosen.score,
            pool = pool.len(),
            "selected recommendation"
        );
        Some(chosen.candidate.clone())
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

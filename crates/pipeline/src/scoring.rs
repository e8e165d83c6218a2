//! The scoring engine: one deterministic number per admissible candidate.
//!
//! Every user signal lands here as an additive term. The terms run in a
//! fixed order because the popularity step can decay the score accumulated
//! so far; reordering would change results.

use std::collections::HashSet;

use catalog::{Candidate, MovieId};
use profile::{tone_affinity_bonus, FeedbackSummary, TasteProfile, ToneProfile};
use rayon::prelude::*;

/// Weight on each unit of profile genre frequency.
const GENRE_FREQUENCY_WEIGHT: f64 = 10.0;

/// Per-genre adjustment from the feedback ledger.
const LIKED_GENRE_BONUS: f64 = 12.0;
const DISLIKED_GENRE_PENALTY: f64 = 8.0;

/// Vote count granting the flat social-proof bonus.
const SOCIAL_PROOF_VOTES: u32 = 1000;
const SOCIAL_PROOF_BONUS: f64 = 2.0;

/// Cap on the logarithmic vote bonus.
const LOG_BONUS_CAP: f64 = 5.0;

/// Popularity sweet spot and its bonus.
const POPULARITY_SWEET_LOW: f64 = 20.0;
const POPULARITY_SWEET_HIGH: f64 = 150.0;
const POPULARITY_SWEET_BONUS: f64 = 8.0;

/// Over-exposed popularity threshold and its penalty.
const POPULARITY_SATURATED: f64 = 300.0;
const POPULARITY_SATURATED_PENALTY: f64 = 2.0;

/// Obscurity decay: below this popularity, a candidate that has not yet
/// earned a solid score gets multiplied down rather than docked a flat
/// amount.
const POPULARITY_OBSCURE: f64 = 10.0;
const OBSCURITY_SCORE_GATE: f64 = 20.0;
const OBSCURITY_DECAY: f64 = 0.8;

/// Flat bonus when the candidate shows up in the collaborative set.
const COLLABORATIVE_BONUS: f64 = 10.0;

/// A candidate paired with its computed score (always ≥ 0).
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

/// Everything the scoring function reads, gathered once per request.
///
/// All signals are computed up front into this one explicit struct — per
/// candidate, scoring is a pure read.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub taste: &'a TasteProfile,
    pub feedback: &'a FeedbackSummary,
    pub tone: &'a ToneProfile,
    /// Ids surfaced by the similar-to-best-liked lookup (may be empty).
    pub collaborative_ids: &'a HashSet<MovieId>,
    /// Number of liked movies behind the profiles; normalizes the tone term.
    pub liked_movie_count: usize,
}

/// Score one candidate against the request's signals.
///
/// Deterministic and side-effect free: same inputs, same score. Terms, in
/// order:
/// 1. genre frequency: `10 ×` profile count for each candidate genre
/// 2. feedback: `+12` per liked genre, `−8` per disliked genre
/// 3. rating tiers: `≥8.0 → +10`, `≥7.5 → +6`, `≥7.0 → +2`, `<6.0 → −10`
/// 4. social proof: `+2` at 1000 votes
/// 5. log bonus: `min(5, rating × ln(votes+1) / 10)` when votes > 0
/// 6. popularity: `[20,150] → +8`, `>300 → −2`; below 10 with a running
///    score under 20, the running score decays by ×0.8
/// 7. collaborative: `+10` on id match
/// 8. tone affinity (capped per tone)
///
/// The result is clamped at zero.
pub fn score_candidate(candidate: &Candidate, context: &ScoringContext) -> f64 {
    let mut score = 0.0;

    // 1. Genre frequency
    for genre in &candidate.genre_ids {
        if let Some(&count) = context.taste.genre_frequency.get(genre) {
            score += GENRE_FREQUENCY_WEIGHT * count as f64;
        }
    }

    // 2. Feedback ledger
    for genre in &candidate.genre_ids {
        if context.feedback.liked_genres.contains(genre) {
            score += LIKED_GENRE_BONUS;
        } else if context.feedback.disliked_genres.contains(genre) {
            score -= DISLIKED_GENRE_PENALTY;
        }
    }

    // 3. Rating tiers
    let rating = candidate.vote_average;
    if rating >= 8.0 {
        score += 10.0;
    } else if rating >= 7.5 {
        score += 6.0;
    } else if rating >= 7.0 {
        score += 2.0;
    } else if rating < 6.0 {
        score -= 10.0;
    }

    // 4. Social proof
    if candidate.vote_count >= SOCIAL_PROOF_VOTES {
        score += SOCIAL_PROOF_BONUS;
    }

    // 5. Logarithmic vote bonus
    if candidate.vote_count > 0 {
        let log_bonus = rating * ((candidate.vote_count as f64) + 1.0).ln() / 10.0;
        score += log_bonus.min(LOG_BONUS_CAP);
    }

    // 6. Popularity band. The obscurity branch decays the score accumulated
    // so far, which is why this term must run after 1–5 and before 7–8.
    let popularity = candidate.popularity;
    if (POPULARITY_SWEET_LOW..=POPULARITY_SWEET_HIGH).contains(&popularity) {
        score += POPULARITY_SWEET_BONUS;
    } else if popularity > POPULARITY_SATURATED {
        score -= POPULARITY_SATURATED_PENALTY;
    } else if popularity < POPULARITY_OBSCURE && score < OBSCURITY_SCORE_GATE {
        score *= OBSCURITY_DECAY;
    }

    // 7. Collaborative approximation
    if context.collaborative_ids.contains(&candidate.id) {
        score += COLLABORATIVE_BONUS;
    }

    // 8. Tone affinity
    score += tone_affinity_bonus(context.tone, candidate, context.liked_movie_count);

    score.max(0.0)
}

/// Score the whole pool in parallel, preserving input order.
pub fn score_candidates(
    candidates: Vec<Candidate>,
    context: &ScoringContext,
) -> Vec<ScoredCandidate> {
    candidates
        .into_par_iter()
        .map(|candidate| {
            let score = score_candidate(&candidate, context);
            ScoredCandidate { candidate, score }
        })
        .collect()
}

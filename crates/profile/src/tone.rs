//! Heuristic tone inference.
//!
//! Maps genres (and a few title/overview keywords) onto a fixed taxonomy of
//! coarse emotional tones. Tone is a soft ranking signal: it contributes a
//! capped bonus to the score and never filters a candidate.

use std::collections::HashMap;

use catalog::{genres, Candidate, GenreId, LikedMovie};

/// Fixed tone taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Dark,
    Uplifting,
    Thrilling,
    Comedic,
    Dramatic,
    Romantic,
}

/// Per-candidate tone bonus cap, applied per tone.
const TONE_BONUS_CAP: f64 = 10.0;

/// Candidate tone points per genre mapped by the genre→tone table.
const GENRE_TONE_POINTS: f64 = 2.0;

/// Tone keywords matched case-insensitively against title and overview.
/// Curated, not exhaustive: the first hit per tone counts, further hits for
/// the same tone do not.
const TONE_KEYWORDS: [(Tone, [&str; 3]); 6] = [
    (Tone::Dark, ["dark", "gritty", "murder"]),
    (Tone::Uplifting, ["hope", "inspiring", "heartwarming"]),
    (Tone::Thrilling, ["suspense", "chase", "conspiracy"]),
    (Tone::Comedic, ["comedy", "hilarious", "funny"]),
    (Tone::Dramatic, ["emotional", "struggle", "powerful"]),
    (Tone::Romantic, ["love", "romance", "wedding"]),
];

/// The fixed genre→tone table.
pub fn genre_tone(genre: GenreId) -> Option<Tone> {
    match genre {
        genres::ACTION | genres::THRILLER | genres::SCI_FI => Some(Tone::Thrilling),
        genres::COMEDY => Some(Tone::Comedic),
        genres::CRIME | genres::HORROR | genres::FANTASY | genres::MYSTERY => Some(Tone::Dark),
        genres::DRAMA | genres::WAR | genres::HISTORY => Some(Tone::Dramatic),
        genres::ROMANCE => Some(Tone::Romantic),
        _ => None,
    }
}

/// The user's inferred tone profile: a nonnegative strength per tone.
#[derive(Debug, Clone, Default)]
pub struct ToneProfile {
    strengths: HashMap<Tone, f64>,
}

impl ToneProfile {
    pub fn strength(&self, tone: Tone) -> f64 {
        self.strengths.get(&tone).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
    }

    fn add(&mut self, tone: Tone, points: f64) {
        *self.strengths.entry(tone).or_insert(0.0) += points;
    }
}

/// Infer the user's tone profile from their liked movies.
///
/// Each mapped genre adds one point to its tone. A few genre pairs carry an
/// extra combo signal the single-genre table misses:
/// drama+history → uplifting, action+thriller → thrilling,
/// crime+thriller → double dark.
pub fn build_tone_profile(liked: &[LikedMovie]) -> ToneProfile {
    let mut profile = ToneProfile::default();

    for movie in liked {
        for &genre in &movie.genre_ids {
            if let Some(tone) = genre_tone(genre) {
                profile.add(tone, 1.0);
            }
        }

        let has = |g: GenreId| movie.genre_ids.contains(&g);
        if has(genres::DRAMA) && has(genres::HISTORY) {
            profile.add(Tone::Uplifting, 1.0);
        }
        if has(genres::ACTION) && has(genres::THRILLER) {
            profile.add(Tone::Thrilling, 1.0);
        }
        if has(genres::CRIME) && has(genres::THRILLER) {
            profile.add(Tone::Dark, 2.0);
        }
    }

    profile
}

/// Tone scores for one candidate: 2 points per mapped genre, plus 1 point
/// per tone for the first keyword found in its title or overview.
pub fn candidate_tone_scores(candidate: &Candidate) -> HashMap<Tone, f64> {
    let mut scores: HashMap<Tone, f64> = HashMap::new();

    for &genre in &candidate.genre_ids {
        if let Some(tone) = genre_tone(genre) {
            *scores.entry(tone).or_insert(0.0) += GENRE_TONE_POINTS;
        }
    }

    let haystack = format!(
        "{} {}",
        candidate.title.to_lowercase(),
        candidate.overview.to_lowercase()
    );
    for (tone, keywords) in TONE_KEYWORDS {
        // One point per tone at most, however many keywords match
        if keywords.iter().any(|kw| haystack.contains(kw)) {
            *scores.entry(tone).or_insert(0.0) += 1.0;
        }
    }

    scores
}

/// The candidate's tone bonus toward the final score.
///
/// For every tone present in both profiles:
/// `min(10, candidate_tone × 3 × user_strength / liked_movie_count)`,
/// summed over tones. Zero when the user profile is empty or the tone sets
/// are disjoint.
pub fn tone_affinity_bonus(
    user: &ToneProfile,
    candidate: &Candidate,
    liked_movie_count: usize,
) -> f64 {
    if liked_movie_count == 0 || user.is_empty() {
        return 0.0;
    }

    candidate_tone_scores(candidate)
        .iter()
        .filter(|(_, &score)| score > 0.0)
        .map(|(&tone, &score)| {
            let strength = user.strength(tone);
            if strength <= 0.0 {
                return 0.0;
            }
            TONE_BONUS_CAP.min(score * 3.0 * strength / liked_movie_count as f64)
        })
        .sum()
}

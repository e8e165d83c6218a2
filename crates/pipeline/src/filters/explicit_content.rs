//! Content-safety filter.
//!
//! Drops candidates the catalog flags as adult, plus anything whose title
//! or overview matches an explicit-content marker. The keyword list targets
//! pornographic/explicit markers only — mature themes are not filtered.

use catalog::Candidate;

use crate::traits::{AdmissionContext, AdmissionFilter};

/// Curated explicit-content markers, matched as case-insensitive substrings.
const EXPLICIT_KEYWORDS: [&str; 6] = [
    "porn",
    "erotic",
    "xxx",
    "softcore",
    "hardcore",
    "explicit sex",
];

/// Removes adult-flagged candidates and explicit-keyword matches.
pub struct ExplicitContentFilter {
    keywords: Vec<String>,
}

impl ExplicitContentFilter {
    /// Use a custom keyword list (the default list is configuration, not
    /// contract).
    pub fn with_keywords(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches_keyword(&self, candidate: &Candidate) -> bool {
        let haystack = format!(
            "{} {}",
            candidate.title.to_lowercase(),
            candidate.overview.to_lowercase()
        );
        self.keywords.iter().any(|kw| haystack.contains(kw))
    }
}

impl Default for ExplicitContentFilter {
    fn default() -> Self {
        Self::with_keywords(EXPLICIT_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }
}

impl AdmissionFilter for ExplicitContentFilter {
    fn name(&self) -> &str {
        "ExplicitContentFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &AdmissionContext) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| !candidate.adult && !self.matches_keyword(candidate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candidate;

    #[test]
    fn test_adult_flag_is_rejected() {
        let mut flagged = candidate(1);
        flagged.adult = true;

        let admitted = ExplicitContentFilter::default()
            .apply(vec![flagged, candidate(2)], &AdmissionContext::default());

        assert_eq!(admitted.len(), 1);
        assert_eq!(admitted[0].id, 2);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let mut keyword_in_title = candidate(1);
        keyword_in_title.title = "Late Night XXX Marathon".to_string();

        let mut keyword_in_overview = candidate(2);
        keyword_in_overview.overview =
            "An EROTIC thriller that leaves nothing to the imagination.".to_string();

        let admitted = ExplicitContentFilter::default().apply(
            vec![keyword_in_title, keyword_in_overview, candidate(3)],
            &AdmissionContext::default(),
        );

        assert_eq!(admitted.len(), 1);
        assert_eq!(admitted[0].id, 3);
    }

    #[test]
    fn test_mature_themes_are_not_filtered() {
        let mut gritty = candidate(1);
        gritty.overview =
            "A violent, adult drama about crime, grief, and redemption.".to_string();

        let admitted = ExplicitContentFilter::default()
            .apply(vec![gritty], &AdmissionContext::default());

        assert_eq!(admitted.len(), 1);
    }
}

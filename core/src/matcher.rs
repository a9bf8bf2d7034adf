//! Threshold-gated approximate matching of one free-text title against the
//! reference index.

use crate::index::{normalize_title, IndexEntry, TitleIndex};
use crate::score::TitleScorer;
use crate::soc::SocCode;
use serde::Serialize;

/// Minimum acceptable similarity score on the 0..=100 scale.
pub const DEFAULT_CUTOFF: f64 = 80.0;

/// Queries are truncated to this many characters before scoring, bounding
/// matching cost on pathological inputs such as whole resume bodies.
pub const MAX_QUERY_CHARS: usize = 60;

/// Outcome of matching one free-text title.
///
/// `code` is `None` exactly when the query was empty or the best score fell
/// strictly below the cutoff. Either way that is an expected outcome, not an
/// error; `score` still reports the best score observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub query: String,
    pub matched_title: Option<String>,
    pub code: Option<SocCode>,
    pub score: f64,
}

impl MatchResult {
    fn unmatched(query: &str, score: f64) -> Self {
        Self {
            query: query.to_string(),
            matched_title: None,
            code: None,
            score,
        }
    }

    pub fn is_match(&self) -> bool {
        self.code.is_some()
    }
}

/// Find the best-scoring index entry for `query`.
///
/// Pure and side-effect-free: the same query, index, cutoff and scorer
/// always yield the same result. Score ties resolve to the entry inserted
/// first, so an alternate title can never shadow the canonical title it
/// duplicates.
pub fn match_title<S>(query: &str, index: &TitleIndex, cutoff: f64, scorer: &S) -> MatchResult
where
    S: TitleScorer + ?Sized,
{
    if query.is_empty() {
        return MatchResult::unmatched(query, 0.0);
    }
    let needle: String = normalize_title(query).chars().take(MAX_QUERY_CHARS).collect();

    let mut best: Option<(&IndexEntry, f64)> = None;
    for entry in index.entries() {
        let score = scorer.score(&needle, &entry.title);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((entry, score)),
        }
    }

    let Some((entry, score)) = best else {
        return MatchResult::unmatched(query, 0.0);
    };
    if score < cutoff {
        return MatchResult::unmatched(query, score);
    }
    MatchResult {
        query: query.to_string(),
        matched_title: Some(entry.title.clone()),
        code: Some(entry.code.clone()),
        score,
    }
}

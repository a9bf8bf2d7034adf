//! Batch classification over a collection of title records.

use crate::index::TitleIndex;
use crate::matcher::{match_title, MatchResult};
use crate::score::TitleScorer;

/// One input record: an identifier plus a title-like field. A `None` title
/// models a source row with no textual title at all.
#[derive(Debug, Clone)]
pub struct TitleRecord {
    pub id: String,
    pub title: Option<String>,
}

/// Everything the batch produced, one result per input record. No record is
/// ever dropped here; filtering unmatched rows is the caller's policy.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub results: Vec<(String, MatchResult)>,
    pub matched: usize,
    pub total: usize,
}

impl BatchReport {
    /// Fraction of records that received a code. An empty batch dropped
    /// nothing, so its coverage is 1.0.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

/// Classify every record independently against a shared read-only index.
///
/// No record observes another's outcome, so completed results stay valid if
/// the caller stops the batch partway through, and the loop could be fanned
/// out across workers without changing any observable result.
pub fn classify_all<S>(
    records: &[TitleRecord],
    index: &TitleIndex,
    cutoff: f64,
    scorer: &S,
) -> BatchReport
where
    S: TitleScorer + ?Sized,
{
    let mut results = Vec::with_capacity(records.len());
    let mut matched = 0usize;
    for record in records {
        let title = record.title.as_deref().unwrap_or("");
        let result = match_title(title, index, cutoff, scorer);
        if result.is_match() {
            matched += 1;
        }
        results.push((record.id.clone(), result));
    }
    let total = records.len();
    tracing::debug!(matched, total, "batch classified");
    BatchReport {
        results,
        matched,
        total,
    }
}

/// Derive a pseudo-title from longer text: the first `max_tokens`
/// whitespace-delimited tokens joined by single spaces. Used when a source
/// exposes no explicit title column, e.g. the head of a resume body.
pub fn pseudo_title(text: &str, max_tokens: usize) -> String {
    text.split_whitespace()
        .take(max_tokens)
        .collect::<Vec<_>>()
        .join(" ")
}

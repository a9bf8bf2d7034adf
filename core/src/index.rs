//! Reference title index: two tabular title sources unified into one flat,
//! insertion-ordered lookup table of (normalized title, code).

use crate::error::DataLoadError;
use crate::soc::SocCode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

/// Column layout of one delimiter-separated reference source.
#[derive(Debug, Clone)]
pub struct SourceSchema {
    pub code_column: String,
    pub title_column: String,
    pub delimiter: u8,
}

impl SourceSchema {
    pub fn new(code_column: &str, title_column: &str, delimiter: u8) -> Self {
        Self {
            code_column: code_column.to_string(),
            title_column: title_column.to_string(),
            delimiter,
        }
    }

    /// O*NET `occupation_data.txt`: canonical occupation titles.
    pub fn occupation_data() -> Self {
        Self::new("O*NET-SOC Code", "Title", b'\t')
    }

    /// O*NET `alternate_titles.txt`: synonym titles sharing the code column.
    pub fn alternate_titles() -> Self {
        Self::new("O*NET-SOC Code", "Alternate Title", b'\t')
    }
}

/// One normalized title mapped to its occupation code. Multiple entries may
/// share a code (a canonical title and its synonyms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    pub code: SocCode,
}

/// Immutable lookup table over every known title.
///
/// Insertion order is part of the contract: score ties resolve to the
/// earliest entry, so alternate titles never shadow the canonical title they
/// duplicate.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    entries: Vec<IndexEntry>,
}

impl TitleIndex {
    pub fn builder() -> TitleIndexBuilder {
        TitleIndexBuilder::default()
    }

    pub(crate) fn from_entries(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Title normalization shared by index entries and queries: lowercase only.
/// Punctuation and whitespace are preserved as-is, so "sr. engineer" and
/// "sr engineer" remain distinct keys.
pub fn normalize_title(title: &str) -> String {
    title.to_lowercase()
}

/// Accumulates entries from any number of sources, then freezes into a
/// [`TitleIndex`].
#[derive(Debug, Default)]
pub struct TitleIndexBuilder {
    entries: Vec<IndexEntry>,
    seen: HashSet<(String, SocCode)>,
}

impl TitleIndexBuilder {
    /// Ingest one tabular source.
    ///
    /// A missing required column is fatal. A row whose code fails to parse
    /// is logged and skipped, so one bad reference row does not block
    /// classification of every other title.
    pub fn source<R: Read>(
        mut self,
        reader: R,
        schema: &SourceSchema,
    ) -> Result<Self, DataLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(schema.delimiter)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let code_idx = headers
            .iter()
            .position(|h| h == schema.code_column)
            .ok_or_else(|| DataLoadError::MissingColumn {
                column: schema.code_column.clone(),
            })?;
        let title_idx = headers
            .iter()
            .position(|h| h == schema.title_column)
            .ok_or_else(|| DataLoadError::MissingColumn {
                column: schema.title_column.clone(),
            })?;

        for row in rdr.records() {
            let row = row?;
            let code = row.get(code_idx).unwrap_or("").trim();
            let title = row.get(title_idx).unwrap_or("").trim();
            if code.is_empty() || title.is_empty() {
                continue;
            }
            self.add(title, code);
        }
        Ok(self)
    }

    /// Add a single (title, code) pair through the same normalize / validate
    /// / dedup path as [`Self::source`].
    pub fn push(mut self, title: &str, code: &str) -> Self {
        self.add(title, code);
        self
    }

    fn add(&mut self, title: &str, code: &str) {
        let code = match SocCode::parse(code) {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!(title, %err, "skipping reference row");
                return;
            }
        };
        let title = normalize_title(title);
        if self.seen.insert((title.clone(), code.clone())) {
            self.entries.push(IndexEntry { title, code });
        }
    }

    pub fn build(self) -> TitleIndex {
        TitleIndex {
            entries: self.entries,
        }
    }
}

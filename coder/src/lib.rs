//! Batch occupation coding: glue between the classifier core and the
//! delimiter-separated files the research pipeline exchanges.

use anyhow::{Context, Result};
use soc_core::persist::{load_index, load_meta, save_index, save_meta, IndexPaths, MetaFile};
use soc_core::{
    classify_all, pseudo_title, BatchReport, SourceSchema, TitleIndex, TitleRecord, WeightedRatio,
};
use std::fs::File;
use std::path::Path;

/// Build the in-memory title index from the two O*NET reference files.
pub fn build_reference_index(occupations: &Path, alternates: &Path) -> Result<TitleIndex> {
    let occ = File::open(occupations)
        .with_context(|| format!("failed to open {}", occupations.display()))?;
    let alt = File::open(alternates)
        .with_context(|| format!("failed to open {}", alternates.display()))?;
    let index = TitleIndex::builder()
        .source(occ, &SourceSchema::occupation_data())?
        .source(alt, &SourceSchema::alternate_titles())?
        .build();
    tracing::info!(entries = index.len(), "reference index built");
    Ok(index)
}

/// Persist a built index as a disposable cache directory.
pub fn write_index_cache(index: &TitleIndex, dir: &Path) -> Result<()> {
    let paths = IndexPaths::new(dir);
    save_index(&paths, index)?;
    let meta = MetaFile {
        num_entries: index.len() as u32,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&paths, &meta)?;
    Ok(())
}

pub fn load_cached_index(dir: &Path) -> Result<TitleIndex> {
    let paths = IndexPaths::new(dir);
    let index = load_index(&paths)?;
    let meta = load_meta(&paths)?;
    tracing::info!(
        entries = index.len(),
        created_at = %meta.created_at,
        "reference index loaded from cache"
    );
    Ok(index)
}

/// Options for one batch coding run.
pub struct CodeOptions {
    /// Input column containing a job-title-like string.
    pub title_column: String,
    /// Minimum similarity score for a match (0-100).
    pub cutoff: f64,
    /// Derive a pseudo title from the leading tokens of the text column.
    pub title_from_text: bool,
    /// Number of leading tokens used by `title_from_text`.
    pub pseudo_tokens: usize,
    /// Keep unmatched rows with blank code columns instead of dropping them.
    pub keep_unmatched: bool,
}

/// Read `infile`, classify every row against `index`, and write the original
/// columns plus `soc6`, `soc_broad`, `soc_major` and `match_score` to
/// `outfile`.
///
/// The batch itself never fails on an unmatched row; whether such rows reach
/// the output at all is decided by `opts.keep_unmatched`. Returns the batch
/// report so callers can act on coverage.
pub fn code_file(
    index: &TitleIndex,
    infile: &Path,
    outfile: &Path,
    opts: &CodeOptions,
) -> Result<BatchReport> {
    let mut rdr = csv::Reader::from_path(infile)
        .with_context(|| format!("failed to open {}", infile.display()))?;
    let headers = rdr.headers()?.clone();
    let title_idx = headers
        .iter()
        .position(|h| h == opts.title_column)
        .with_context(|| format!("input is missing title column `{}`", opts.title_column))?;

    let mut rows: Vec<csv::StringRecord> = Vec::new();
    let mut records: Vec<TitleRecord> = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let raw = row.get(title_idx).unwrap_or("");
        let title = if opts.title_from_text {
            pseudo_title(raw, opts.pseudo_tokens)
        } else {
            raw.to_string()
        };
        records.push(TitleRecord {
            id: i.to_string(),
            title: (!title.is_empty()).then_some(title),
        });
        rows.push(row);
    }

    let report = classify_all(&records, index, opts.cutoff, &WeightedRatio);

    let mut wtr = csv::Writer::from_path(outfile)
        .with_context(|| format!("failed to create {}", outfile.display()))?;
    let mut out_headers = headers.clone();
    for col in ["soc6", "soc_broad", "soc_major", "match_score"] {
        out_headers.push_field(col);
    }
    wtr.write_record(&out_headers)?;

    for (row, (_, result)) in rows.iter().zip(report.results.iter()) {
        let mut out = row.clone();
        match &result.code {
            Some(code) => {
                out.push_field(code.detail());
                out.push_field(code.broad());
                out.push_field(code.major());
                out.push_field(&format!("{:.1}", result.score));
            }
            None if opts.keep_unmatched => {
                for _ in 0..3 {
                    out.push_field("");
                }
                out.push_field(&format!("{:.1}", result.score));
            }
            None => continue,
        }
        wtr.write_record(&out)?;
    }
    wtr.flush()?;

    tracing::info!(
        matched = report.matched,
        total = report.total,
        outfile = %outfile.display(),
        "rows coded"
    );
    if report.matched < report.total {
        tracing::warn!(
            unmatched = report.total - report.matched,
            coverage = report.coverage(),
            "some rows had no match at the current cutoff; grow the reference pool or lower --cutoff"
        );
    }
    Ok(report)
}

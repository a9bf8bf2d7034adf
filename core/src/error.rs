use thiserror::Error;

/// Fatal failure while loading a reference title source. There is no
/// meaningful partial index, so none of these are retried or recovered.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("reference source is missing required column `{column}`")]
    MissingColumn { column: String },

    #[error("failed to read reference source: {0}")]
    Csv(#[from] csv::Error),
}

/// An occupation code too short (or not ASCII) to slice into hierarchy
/// levels. Recoverable at index-build time, where the offending row is
/// skipped; a hard error everywhere else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed occupation code `{code}`: expected at least 2 leading characters")]
pub struct MalformedCodeError {
    pub code: String,
}

//! Occupation-title classification core.
//!
//! Builds an in-memory reference index of occupation titles (canonical plus
//! alternate/synonym titles) and assigns standardized hierarchical occupation
//! codes to free-text job titles by threshold-gated approximate string
//! matching. The index is an explicit immutable value: build it once, share
//! it by reference into every matching call.

pub mod batch;
pub mod error;
pub mod index;
pub mod matcher;
pub mod persist;
pub mod score;
pub mod soc;

pub use batch::{classify_all, pseudo_title, BatchReport, TitleRecord};
pub use error::{DataLoadError, MalformedCodeError};
pub use index::{IndexEntry, SourceSchema, TitleIndex, TitleIndexBuilder};
pub use matcher::{match_title, MatchResult, DEFAULT_CUTOFF, MAX_QUERY_CHARS};
pub use score::{TitleScorer, WeightedRatio};
pub use soc::SocCode;

use crate::error::MalformedCodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Narrowest slice a code must support: the 2-character major group.
const MAJOR_WIDTH: usize = 2;
const BROAD_WIDTH: usize = 4;

/// A standardized hierarchical occupation code, e.g. `29-1141.00`.
///
/// The textual layout encodes hierarchy by shared leading characters: the
/// first two name the major group, the first four the broad group, the full
/// string the detailed occupation. Slicing is purely positional, not
/// semantic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocCode(String);

impl SocCode {
    /// Validate and wrap a code string.
    ///
    /// Rejects anything too short to carry a major group, and anything
    /// non-ASCII, where byte-positional slicing would not be well defined.
    /// Reference sources are externally supplied, so this is checked even
    /// though a well-formed source never trips it.
    pub fn parse(code: &str) -> Result<Self, MalformedCodeError> {
        let code = code.trim();
        if code.len() < MAJOR_WIDTH || !code.is_ascii() {
            return Err(MalformedCodeError {
                code: code.to_string(),
            });
        }
        Ok(Self(code.to_string()))
    }

    /// 2-character major group prefix.
    pub fn major(&self) -> &str {
        &self.0[..MAJOR_WIDTH]
    }

    /// 4-character broad group prefix; the whole code when shorter.
    pub fn broad(&self) -> &str {
        &self.0[..self.0.len().min(BROAD_WIDTH)]
    }

    /// The full detailed code.
    pub fn detail(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SocCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

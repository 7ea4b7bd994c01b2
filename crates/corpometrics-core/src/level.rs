//! Aggregation levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of aggregation levels a metric table can be requested at.
///
/// Unknown level strings are a parse error, never a silent pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Finest grain: one row per sentence. Only defined for sentence-grained
    /// metrics.
    Sentence,
    /// One row per (stimulus, page).
    Page,
    /// One row per stimulus, pages folded together.
    Doc,
    /// A single row over the whole corpus.
    Lang,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Page => "page",
            Self::Doc => "doc",
            Self::Lang => "lang",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown aggregation level '{0}', expected one of: sentence, page, doc, lang")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sentence" => Ok(Self::Sentence),
            "page" => Ok(Self::Page),
            "doc" => Ok(Self::Doc),
            "lang" => Ok(Self::Lang),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

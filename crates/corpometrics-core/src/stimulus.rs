//! Stimulus input type.

use serde::{Deserialize, Serialize};

/// One text stimulus: an identified, named, ordered sequence of pages.
///
/// Pages hold raw text and are 1-indexed wherever a page number appears in
/// an output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stimulus {
    pub stimulus_id: String,
    pub stimulus_name: String,
    pub pages: Vec<String>,
}

impl Stimulus {
    /// Convenience constructor for owned parts.
    pub fn new(
        stimulus_id: impl Into<String>,
        stimulus_name: impl Into<String>,
        pages: Vec<String>,
    ) -> Self {
        Self {
            stimulus_id: stimulus_id.into(),
            stimulus_name: stimulus_name.into(),
            pages,
        }
    }
}

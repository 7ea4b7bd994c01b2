//! Tokenizer fertility: how many subword units the words of a page decompose
//! into.
//!
//! This metric operates at page grain only — there is no sentence-level
//! variant, and requesting one is an error.

use serde::Serialize;
use tracing::debug;

use corpometrics_core::{Annotator, Document, Level, Stimulus, SubwordTokenizer};

use crate::aggregate::{PageRecord, Table, UnitCounts, rollup_pages};
use crate::batch::{Cell, CellType, CountColumns};
use crate::error::MetricsError;
use crate::units::page_units;

/// Per-page fertility record. Column names carry the `total_` prefix at
/// every level; the page row is already a sum over its tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FertilityCounts {
    pub total_words: u64,
    pub total_llm_tokens: u64,
}

impl UnitCounts for FertilityCounts {
    type Totals = FertilityCounts;

    fn accumulate(&self, into: &mut FertilityCounts) {
        into.total_words += self.total_words;
        into.total_llm_tokens += self.total_llm_tokens;
    }
}

impl CountColumns for FertilityCounts {
    const COLUMNS: &'static [(&'static str, CellType)] = &[
        ("total_words", CellType::UInt),
        ("total_llm_tokens", CellType::UInt),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::UInt(self.total_words),
            Cell::UInt(self.total_llm_tokens),
        ]
    }
}

fn count_page<T>(doc: &Document, tokenizer: &T) -> FertilityCounts
where
    T: SubwordTokenizer + ?Sized,
{
    let mut counts = FertilityCounts::default();
    for tok in doc.tokens() {
        if !tok.is_alphabetic {
            continue;
        }
        counts.total_words += 1;
        counts.total_llm_tokens += tokenizer.subword_count(&tok.text) as u64;
    }
    counts
}

/// Word and subword-token counts per page, rolled up to `level`.
pub fn fertility<A, T>(
    stimuli: &[Stimulus],
    annotator: &A,
    tokenizer: &T,
    level: Level,
) -> Result<Table<FertilityCounts>, MetricsError>
where
    A: Annotator + ?Sized,
    T: SubwordTokenizer + ?Sized,
{
    let rows: Vec<PageRecord<FertilityCounts>> = page_units(stimuli, annotator)
        .map(|unit| PageRecord {
            stimulus_id: unit.stimulus_id,
            stimulus_name: unit.stimulus_name,
            page: unit.page,
            counts: count_page(&unit.doc, tokenizer),
        })
        .collect();
    debug!(rows = rows.len(), %level, "counted fertility records");
    rollup_pages(rows, level, "fertility")
}

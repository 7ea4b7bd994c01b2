//! Punctuation density: punctuation marks per sentence.
//!
//! No word count is tracked for this metric; the punctuation flag comes
//! straight from the annotator.

use serde::Serialize;
use tracing::debug;

use corpometrics_core::{Annotator, Level, MetricOptions, Sentence, Stimulus};

use crate::aggregate::{SentenceRow, Table, UnitCounts, rollup_sentences};
use crate::batch::{Cell, CellType, CountColumns};
use crate::units::sentence_units;

/// Per-sentence punctuation record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PunctuationCounts {
    pub punctuation: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PunctuationTotals {
    pub total_punct: u64,
}

impl UnitCounts for PunctuationCounts {
    type Totals = PunctuationTotals;

    fn accumulate(&self, into: &mut PunctuationTotals) {
        into.total_punct += self.punctuation;
    }
}

impl CountColumns for PunctuationCounts {
    const COLUMNS: &'static [(&'static str, CellType)] = &[("punctuation", CellType::UInt)];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::UInt(self.punctuation)]
    }
}

impl CountColumns for PunctuationTotals {
    const COLUMNS: &'static [(&'static str, CellType)] = &[("total_punct", CellType::UInt)];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::UInt(self.total_punct)]
    }
}

fn count_sentence(sentence: &Sentence) -> PunctuationCounts {
    PunctuationCounts {
        punctuation: sentence
            .tokens
            .iter()
            .filter(|tok| tok.is_punctuation)
            .count() as u64,
    }
}

/// Punctuation counts per sentence, rolled up to `level`.
pub fn punctuation<A>(
    stimuli: &[Stimulus],
    annotator: &A,
    level: Level,
    options: &MetricOptions,
) -> Table<PunctuationCounts>
where
    A: Annotator + ?Sized,
{
    let rows: Vec<SentenceRow<PunctuationCounts>> =
        sentence_units(stimuli, annotator, options.sentence_indexing)
            .map(|unit| SentenceRow {
                stimulus_id: unit.stimulus_id,
                stimulus_name: unit.stimulus_name,
                page: unit.page,
                sent_idx: unit.sent_idx,
                counts: count_sentence(&unit.sentence),
            })
            .collect();
    debug!(rows = rows.len(), %level, "counted punctuation records");
    rollup_sentences(rows, level)
}

//! Pronoun density: pronouns and words per sentence.

use serde::Serialize;
use tracing::debug;

use corpometrics_core::{Annotator, Level, MetricOptions, PartOfSpeech, Sentence, Stimulus};

use crate::aggregate::{SentenceRow, Table, UnitCounts, rollup_sentences};
use crate::batch::{Cell, CellType, CountColumns};
use crate::units::sentence_units;

/// Per-sentence pronoun record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PronounCounts {
    pub pronouns: u64,
    /// Alphabetic tokens only; numbers and symbols never count as words.
    pub words: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PronounTotals {
    pub total_pronouns: u64,
    pub total_words: u64,
}

impl UnitCounts for PronounCounts {
    type Totals = PronounTotals;

    fn accumulate(&self, into: &mut PronounTotals) {
        into.total_pronouns += self.pronouns;
        into.total_words += self.words;
    }
}

impl CountColumns for PronounCounts {
    const COLUMNS: &'static [(&'static str, CellType)] =
        &[("pronouns", CellType::UInt), ("words", CellType::UInt)];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::UInt(self.pronouns), Cell::UInt(self.words)]
    }
}

impl CountColumns for PronounTotals {
    const COLUMNS: &'static [(&'static str, CellType)] = &[
        ("total_pronouns", CellType::UInt),
        ("total_words", CellType::UInt),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::UInt(self.total_pronouns), Cell::UInt(self.total_words)]
    }
}

fn count_sentence(sentence: &Sentence) -> PronounCounts {
    let mut counts = PronounCounts::default();
    for tok in &sentence.tokens {
        if !tok.is_alphabetic {
            continue;
        }
        counts.words += 1;
        if tok.pos == PartOfSpeech::Pronoun {
            counts.pronouns += 1;
        }
    }
    counts
}

/// Pronoun and word counts per sentence, rolled up to `level`.
pub fn pronouns<A>(
    stimuli: &[Stimulus],
    annotator: &A,
    level: Level,
    options: &MetricOptions,
) -> Table<PronounCounts>
where
    A: Annotator + ?Sized,
{
    let rows: Vec<SentenceRow<PronounCounts>> =
        sentence_units(stimuli, annotator, options.sentence_indexing)
            .map(|unit| SentenceRow {
                stimulus_id: unit.stimulus_id,
                stimulus_name: unit.stimulus_name,
                page: unit.page,
                sent_idx: unit.sent_idx,
                counts: count_sentence(&unit.sentence),
            })
            .collect();
    debug!(rows = rows.len(), %level, "counted pronoun records");
    rollup_sentences(rows, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpometrics_annotate::BasicAnnotator;
    use corpometrics_core::SentenceIndexing;

    fn example() -> Vec<Stimulus> {
        vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["He ran. She jumped!".to_string()],
        )]
    }

    #[test]
    fn sentence_table_matches_worked_example() {
        let table = pronouns(
            &example(),
            &BasicAnnotator,
            Level::Sentence,
            &MetricOptions::default(),
        );
        let Table::Sentence(rows) = table else {
            panic!("expected sentence table");
        };
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(
                row.counts,
                PronounCounts {
                    pronouns: 1,
                    words: 2
                }
            );
        }
        assert_eq!(rows[0].sent_idx, 0);
        assert_eq!(rows[1].sent_idx, 1);
    }

    #[test]
    fn page_rollup_matches_worked_example() {
        let table = pronouns(
            &example(),
            &BasicAnnotator,
            Level::Page,
            &MetricOptions::default(),
        );
        let Table::Page(rows) = table else {
            panic!("expected page table");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].totals,
            PronounTotals {
                total_pronouns: 2,
                total_words: 4
            }
        );
        assert_eq!(rows[0].n_sentences, Some(2));
    }

    #[test]
    fn numbers_and_punctuation_are_not_words() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["She counted 42 sheep.".to_string()],
        )];
        let table = pronouns(
            &stimuli,
            &BasicAnnotator,
            Level::Lang,
            &MetricOptions::default(),
        );
        let Table::Lang(rows) = table else {
            panic!("expected lang table");
        };
        // "She", "counted", "sheep" are words; "42" and "." are not.
        assert_eq!(rows[0].totals.total_words, 3);
        assert_eq!(rows[0].totals.total_pronouns, 1);
    }

    #[test]
    fn lang_level_sums_across_documents() {
        let stimuli = vec![
            Stimulus::new("S1", "doc1", vec!["He ran.".to_string()]),
            Stimulus::new("S2", "doc2", vec!["She jumped!".to_string()]),
        ];
        let table = pronouns(
            &stimuli,
            &BasicAnnotator,
            Level::Lang,
            &MetricOptions::default(),
        );
        let Table::Lang(rows) = table else {
            panic!("expected lang table");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, Level::Lang);
        assert_eq!(
            rows[0].totals,
            PronounTotals {
                total_pronouns: 2,
                total_words: 4
            }
        );
        assert_eq!(rows[0].n_sentences, Some(2));
    }

    #[test]
    fn totals_are_additive_across_levels() {
        let stimuli = vec![
            Stimulus::new(
                "S1",
                "doc1",
                vec!["He ran. She jumped!".to_string(), "They rested.".to_string()],
            ),
            Stimulus::new("S2", "doc2", vec!["It was over.".to_string()]),
        ];
        let opts = MetricOptions::default();

        let Table::Page(pages) = pronouns(&stimuli, &BasicAnnotator, Level::Page, &opts) else {
            panic!();
        };
        let Table::Doc(docs) = pronouns(&stimuli, &BasicAnnotator, Level::Doc, &opts) else {
            panic!();
        };
        let Table::Lang(lang) = pronouns(&stimuli, &BasicAnnotator, Level::Lang, &opts) else {
            panic!();
        };

        let page_words: u64 = pages.iter().map(|r| r.totals.total_words).sum();
        let doc_words: u64 = docs.iter().map(|r| r.totals.total_words).sum();
        assert_eq!(page_words, doc_words);
        assert_eq!(doc_words, lang[0].totals.total_words);

        let page_pronouns: u64 = pages.iter().map(|r| r.totals.total_pronouns).sum();
        assert_eq!(page_pronouns, lang[0].totals.total_pronouns);
    }

    #[test]
    fn indexing_mode_changes_indices_not_sums() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["He ran.".to_string(), "She jumped!".to_string()],
        )];
        let per_page = MetricOptions::default();
        let continuous = MetricOptions {
            sentence_indexing: SentenceIndexing::Continuous,
            ..MetricOptions::default()
        };

        let Table::Sentence(a) = pronouns(&stimuli, &BasicAnnotator, Level::Sentence, &per_page)
        else {
            panic!();
        };
        let Table::Sentence(b) = pronouns(&stimuli, &BasicAnnotator, Level::Sentence, &continuous)
        else {
            panic!();
        };
        assert_eq!(
            a.iter().map(|r| r.sent_idx).collect::<Vec<_>>(),
            vec![0, 0]
        );
        assert_eq!(
            b.iter().map(|r| r.sent_idx).collect::<Vec<_>>(),
            vec![0, 1]
        );

        let Table::Lang(la) = pronouns(&stimuli, &BasicAnnotator, Level::Lang, &per_page) else {
            panic!();
        };
        let Table::Lang(lb) = pronouns(&stimuli, &BasicAnnotator, Level::Lang, &continuous) else {
            panic!();
        };
        assert_eq!(la[0].totals, lb[0].totals);
    }

    #[test]
    fn runs_are_idempotent() {
        let stimuli = example();
        let opts = MetricOptions::default();
        let a = pronouns(&stimuli, &BasicAnnotator, Level::Page, &opts);
        let b = pronouns(&stimuli, &BasicAnnotator, Level::Page, &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_corpus_yields_empty_tables() {
        let stimuli: Vec<Stimulus> = vec![];
        for level in [Level::Sentence, Level::Page, Level::Doc, Level::Lang] {
            let table = pronouns(&stimuli, &BasicAnnotator, level, &MetricOptions::default());
            assert!(table.is_empty(), "level {level} should be empty");
        }
    }
}

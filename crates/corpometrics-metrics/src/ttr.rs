//! Type-token ratio: lexical diversity per page.
//!
//! Page grain only. The ratio is recomputed from summed counts after every
//! roll-up — per-unit ratios are never summed or averaged. The per-page type
//! set travels with each record so that doc/lang rows can report the true
//! distinct vocabulary of the group ([`TypeCounting::ExactUnion`]); the
//! historical page-summed approximation stays available as
//! [`TypeCounting::PageSum`].

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use corpometrics_core::{Annotator, Document, Level, MetricOptions, Stimulus, TypeCounting};

use crate::aggregate::{PageRecord, Table, UnitCounts, rollup_pages};
use crate::batch::{Cell, CellType, CountColumns};
use crate::error::MetricsError;
use crate::units::page_units;

/// Per-page type/token record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TtrCounts {
    pub num_tokens: u64,
    /// Distinct surface forms, case-sensitive on whatever casing reaches the
    /// collection step.
    pub num_types: u64,
    pub ttr: f64,
    #[serde(skip)]
    types: BTreeSet<String>,
}

/// Summed type/token row. `num_types` and `ttr` are finalized per
/// [`TypeCounting`] after summation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TtrTotals {
    pub num_tokens: u64,
    pub num_types: u64,
    pub ttr: f64,
    #[serde(skip)]
    types: BTreeSet<String>,
}

impl UnitCounts for TtrCounts {
    type Totals = TtrTotals;

    fn accumulate(&self, into: &mut TtrTotals) {
        into.num_tokens += self.num_tokens;
        into.num_types += self.num_types;
        into.types.extend(self.types.iter().cloned());
    }
}

impl CountColumns for TtrCounts {
    const COLUMNS: &'static [(&'static str, CellType)] = &[
        ("num_tokens", CellType::UInt),
        ("num_types", CellType::UInt),
        ("ttr", CellType::Float),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::UInt(self.num_tokens),
            Cell::UInt(self.num_types),
            Cell::Float(self.ttr),
        ]
    }
}

impl CountColumns for TtrTotals {
    const COLUMNS: &'static [(&'static str, CellType)] = &[
        ("num_tokens", CellType::UInt),
        ("num_types", CellType::UInt),
        ("ttr", CellType::Float),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::UInt(self.num_tokens),
            Cell::UInt(self.num_types),
            Cell::Float(self.ttr),
        ]
    }
}

/// Guarded ratio: a zero denominator is replaced by 1, so an empty unit
/// reports `ttr == 0` with its true zero counts. That zero is vacuous, not a
/// zero-diversity signal.
fn ratio(num_types: u64, num_tokens: u64) -> f64 {
    num_types as f64 / num_tokens.max(1) as f64
}

/// Case-fold and drop every non-alphanumeric character, preserving
/// whitespace so token boundaries survive.
fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn count_page<A>(doc: &Document, annotator: &A, normalize: bool) -> TtrCounts
where
    A: Annotator + ?Sized,
{
    let tokens: Vec<String> = if normalize {
        let fresh = annotator.annotate(&normalize_text(&doc.text));
        fresh
            .tokens()
            .filter(|t| t.is_alphabetic)
            .map(|t| t.text.clone())
            .collect()
    } else {
        doc.tokens()
            .filter(|t| t.is_alphabetic)
            .map(|t| t.text.clone())
            .collect()
    };

    let num_tokens = tokens.len() as u64;
    let types: BTreeSet<String> = tokens.into_iter().collect();
    let num_types = types.len() as u64;
    TtrCounts {
        num_tokens,
        num_types,
        ttr: ratio(num_types, num_tokens),
        types,
    }
}

fn finalize(table: &mut Table<TtrCounts>, counting: TypeCounting) {
    let fix = |totals: &mut TtrTotals| {
        if counting == TypeCounting::ExactUnion {
            totals.num_types = totals.types.len() as u64;
        }
        totals.ttr = ratio(totals.num_types, totals.num_tokens);
    };
    match table {
        Table::Page(rows) => rows.iter_mut().for_each(|r| fix(&mut r.totals)),
        Table::Doc(rows) => rows.iter_mut().for_each(|r| fix(&mut r.totals)),
        Table::Lang(rows) => rows.iter_mut().for_each(|r| fix(&mut r.totals)),
        // rollup_pages never produces a sentence table.
        Table::Sentence(_) => {}
    }
}

/// Token and type counts with type-token ratio per page, rolled up to
/// `level`.
pub fn ttr<A>(
    stimuli: &[Stimulus],
    annotator: &A,
    level: Level,
    options: &MetricOptions,
) -> Result<Table<TtrCounts>, MetricsError>
where
    A: Annotator + ?Sized,
{
    let rows: Vec<PageRecord<TtrCounts>> = page_units(stimuli, annotator)
        .map(|unit| PageRecord {
            stimulus_id: unit.stimulus_id,
            stimulus_name: unit.stimulus_name,
            page: unit.page,
            counts: count_page(&unit.doc, annotator, options.normalize_ttr),
        })
        .collect();
    debug!(rows = rows.len(), %level, "counted type-token records");
    let mut table = rollup_pages(rows, level, "ttr")?;
    finalize(&mut table, options.type_counting);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpometrics_annotate::BasicAnnotator;

    fn opts() -> MetricOptions {
        MetricOptions::default()
    }

    fn page_level(stimuli: &[Stimulus], options: &MetricOptions) -> Vec<TtrTotals> {
        let Table::Page(rows) = ttr(stimuli, &BasicAnnotator, Level::Page, options).unwrap()
        else {
            panic!("expected page table");
        };
        rows.into_iter().map(|r| r.totals).collect()
    }

    #[test]
    fn page_ratio_is_types_over_tokens() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["He ran. He naps.".to_string()],
        )];
        let rows = page_level(&stimuli, &opts());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].num_tokens, 4);
        assert_eq!(rows[0].num_types, 3);
        assert!((rows[0].ttr - 0.75).abs() < 1e-12);
    }

    #[test]
    fn types_are_case_sensitive_without_normalization() {
        let stimuli = vec![Stimulus::new("S1", "doc1", vec!["He he".to_string()])];
        let rows = page_level(&stimuli, &opts());
        assert_eq!(rows[0].num_tokens, 2);
        assert_eq!(rows[0].num_types, 2);
    }

    #[test]
    fn normalization_folds_case_and_strips_marks() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["He ran! he RAN?".to_string()],
        )];
        let options = MetricOptions {
            normalize_ttr: true,
            ..MetricOptions::default()
        };
        let rows = page_level(&stimuli, &options);
        assert_eq!(rows[0].num_tokens, 4);
        assert_eq!(rows[0].num_types, 2);
        assert!((rows[0].ttr - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_token_page_reports_vacuous_zero_ratio() {
        let stimuli = vec![Stimulus::new("S1", "doc1", vec!["...".to_string()])];
        let rows = page_level(&stimuli, &opts());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].num_tokens, 0);
        assert_eq!(rows[0].num_types, 0);
        assert_eq!(rows[0].ttr, 0.0);
    }

    #[test]
    fn doc_level_unions_types_by_default() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["the cat".to_string(), "the cat".to_string()],
        )];
        let Table::Doc(rows) = ttr(&stimuli, &BasicAnnotator, Level::Doc, &opts()).unwrap()
        else {
            panic!("expected doc table");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].totals.num_tokens, 4);
        assert_eq!(rows[0].totals.num_types, 2);
        assert!((rows[0].totals.ttr - 0.5).abs() < 1e-12);
    }

    #[test]
    fn page_sum_mode_reproduces_the_approximation() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["the cat".to_string(), "the cat".to_string()],
        )];
        let options = MetricOptions {
            type_counting: TypeCounting::PageSum,
            ..MetricOptions::default()
        };
        let Table::Doc(rows) = ttr(&stimuli, &BasicAnnotator, Level::Doc, &options).unwrap()
        else {
            panic!("expected doc table");
        };
        // Each page has 2 distinct types; the sum over-counts the repeats.
        assert_eq!(rows[0].totals.num_tokens, 4);
        assert_eq!(rows[0].totals.num_types, 4);
        assert!((rows[0].totals.ttr - 1.0).abs() < 1e-12);
    }

    #[test]
    fn modes_agree_at_page_level() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["the cat the mat".to_string()],
        )];
        let exact = page_level(&stimuli, &opts());
        let approx = page_level(
            &stimuli,
            &MetricOptions {
                type_counting: TypeCounting::PageSum,
                ..MetricOptions::default()
            },
        );
        assert_eq!(exact, approx);
    }

    #[test]
    fn lang_level_spans_documents() {
        let stimuli = vec![
            Stimulus::new("S1", "doc1", vec!["the cat".to_string()]),
            Stimulus::new("S2", "doc2", vec!["the dog".to_string()]),
        ];
        let Table::Lang(rows) = ttr(&stimuli, &BasicAnnotator, Level::Lang, &opts()).unwrap()
        else {
            panic!("expected lang table");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, Level::Lang);
        assert_eq!(rows[0].totals.num_tokens, 4);
        // Union across documents: {the, cat, dog}.
        assert_eq!(rows[0].totals.num_types, 3);
        assert!((rows[0].totals.ttr - 0.75).abs() < 1e-12);
    }

    #[test]
    fn types_never_exceed_tokens_in_either_mode() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec![
                "a b a b".to_string(),
                "a b c".to_string(),
                "...".to_string(),
            ],
        )];
        for counting in [TypeCounting::ExactUnion, TypeCounting::PageSum] {
            let options = MetricOptions {
                type_counting: counting,
                ..MetricOptions::default()
            };
            for level in [Level::Page, Level::Doc, Level::Lang] {
                let table = ttr(&stimuli, &BasicAnnotator, level, &options).unwrap();
                let totals: Vec<TtrTotals> = match table {
                    Table::Page(rows) => rows.into_iter().map(|r| r.totals).collect(),
                    Table::Doc(rows) => rows.into_iter().map(|r| r.totals).collect(),
                    Table::Lang(rows) => rows.into_iter().map(|r| r.totals).collect(),
                    Table::Sentence(_) => panic!("unexpected sentence table"),
                };
                for t in totals {
                    assert!(t.num_types <= t.num_tokens, "{counting:?} at {level}");
                }
            }
        }
    }

    #[test]
    fn sentence_level_is_an_error() {
        let stimuli = vec![Stimulus::new("S1", "doc1", vec!["He ran.".to_string()])];
        let err = ttr(&stimuli, &BasicAnnotator, Level::Sentence, &opts()).unwrap_err();
        assert_eq!(err, MetricsError::SentenceLevelUnsupported { metric: "ttr" });
    }

    #[test]
    fn empty_corpus_yields_empty_tables() {
        let stimuli: Vec<Stimulus> = vec![];
        for level in [Level::Page, Level::Doc, Level::Lang] {
            let table = ttr(&stimuli, &BasicAnnotator, level, &opts()).unwrap();
            assert!(table.is_empty());
        }
    }

    #[test]
    fn runs_are_idempotent() {
        let stimuli = vec![Stimulus::new(
            "S1",
            "doc1",
            vec!["the cat sat".to_string(), "the mat".to_string()],
        )];
        let a = ttr(&stimuli, &BasicAnnotator, Level::Doc, &opts()).unwrap();
        let b = ttr(&stimuli, &BasicAnnotator, Level::Doc, &opts()).unwrap();
        assert_eq!(a, b);
    }
}

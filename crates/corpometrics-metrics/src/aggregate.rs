//! Multi-level roll-up of per-unit record tables.
//!
//! A metric produces a flat table of per-unit rows; this module groups and
//! sums them to the requested [`Level`]. Column renaming (`pronouns` →
//! `total_pronouns`) happens during summation, through each counts payload's
//! [`UnitCounts::Totals`] type. Group ordering is first-seen input order, so
//! repeated runs produce identical tables.
//!
//! An empty input table yields an empty output table at every level — a
//! deliberate "no data" signal, distinct from data that sums to zero.

use std::collections::HashMap;

use serde::Serialize;

use corpometrics_core::Level;

use crate::error::MetricsError;

/// Per-unit counts that fold into renamed totals.
///
/// `accumulate` both sums and renames: each raw count is added into its
/// output column on the totals type.
pub trait UnitCounts: std::fmt::Debug + Clone + PartialEq + Serialize {
    type Totals: std::fmt::Debug + Clone + Default + PartialEq + Serialize;

    fn accumulate(&self, into: &mut Self::Totals);
}

/// One sentence-grained per-unit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceRow<C> {
    pub stimulus_id: String,
    pub stimulus_name: String,
    pub page: u32,
    pub sent_idx: u32,
    #[serde(flatten)]
    pub counts: C,
}

/// One page-grained per-unit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord<C> {
    pub stimulus_id: String,
    pub stimulus_name: String,
    pub page: u32,
    #[serde(flatten)]
    pub counts: C,
}

/// A page-level aggregate row.
///
/// `n_sentences` is present exactly when the input table was
/// sentence-grained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRow<T> {
    pub stimulus_id: String,
    pub stimulus_name: String,
    pub page: u32,
    #[serde(flatten)]
    pub totals: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_sentences: Option<u64>,
}

/// A doc-level aggregate row: pages of a stimulus folded together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocRow<T> {
    pub stimulus_id: String,
    pub stimulus_name: String,
    #[serde(flatten)]
    pub totals: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_sentences: Option<u64>,
}

/// The single corpus-wide row produced at lang level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LangRow<T> {
    /// Always [`Level::Lang`]; kept as an explicit tag column.
    pub level: Level,
    #[serde(flatten)]
    pub totals: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_sentences: Option<u64>,
}

/// A metric table at one aggregation level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Table<C: UnitCounts> {
    Sentence(Vec<SentenceRow<C>>),
    Page(Vec<PageRow<C::Totals>>),
    Doc(Vec<DocRow<C::Totals>>),
    Lang(Vec<LangRow<C::Totals>>),
}

impl<C: UnitCounts> Table<C> {
    pub fn level(&self) -> Level {
        match self {
            Self::Sentence(_) => Level::Sentence,
            Self::Page(_) => Level::Page,
            Self::Doc(_) => Level::Doc,
            Self::Lang(_) => Level::Lang,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sentence(rows) => rows.len(),
            Self::Page(rows) => rows.len(),
            Self::Doc(rows) => rows.len(),
            Self::Lang(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn totals_of<C: UnitCounts>(counts: &C) -> C::Totals {
    let mut totals = C::Totals::default();
    counts.accumulate(&mut totals);
    totals
}

/// Roll a sentence-grained table up to `level`.
///
/// Every level is defined for sentence-grained input; `sentence` passes the
/// table through unchanged.
pub fn rollup_sentences<C: UnitCounts>(rows: Vec<SentenceRow<C>>, level: Level) -> Table<C> {
    match level {
        Level::Sentence => Table::Sentence(rows),
        Level::Page => {
            let mut index: HashMap<(String, String, u32), usize> = HashMap::new();
            let mut out: Vec<PageRow<C::Totals>> = Vec::new();
            for row in &rows {
                let key = (row.stimulus_id.clone(), row.stimulus_name.clone(), row.page);
                let slot = *index.entry(key).or_insert_with(|| {
                    out.push(PageRow {
                        stimulus_id: row.stimulus_id.clone(),
                        stimulus_name: row.stimulus_name.clone(),
                        page: row.page,
                        totals: C::Totals::default(),
                        n_sentences: Some(0),
                    });
                    out.len() - 1
                });
                row.counts.accumulate(&mut out[slot].totals);
                if let Some(n) = out[slot].n_sentences.as_mut() {
                    *n += 1;
                }
            }
            Table::Page(out)
        }
        Level::Doc => {
            let mut index: HashMap<(String, String), usize> = HashMap::new();
            let mut out: Vec<DocRow<C::Totals>> = Vec::new();
            for row in &rows {
                let key = (row.stimulus_id.clone(), row.stimulus_name.clone());
                let slot = *index.entry(key).or_insert_with(|| {
                    out.push(DocRow {
                        stimulus_id: row.stimulus_id.clone(),
                        stimulus_name: row.stimulus_name.clone(),
                        totals: C::Totals::default(),
                        n_sentences: Some(0),
                    });
                    out.len() - 1
                });
                row.counts.accumulate(&mut out[slot].totals);
                if let Some(n) = out[slot].n_sentences.as_mut() {
                    *n += 1;
                }
            }
            Table::Doc(out)
        }
        Level::Lang => {
            if rows.is_empty() {
                return Table::Lang(Vec::new());
            }
            let mut totals = C::Totals::default();
            for row in &rows {
                row.counts.accumulate(&mut totals);
            }
            Table::Lang(vec![LangRow {
                level: Level::Lang,
                totals,
                n_sentences: Some(rows.len() as u64),
            }])
        }
    }
}

/// Roll a page-grained table up to `level`.
///
/// `sentence` is rejected — no sentence-level variant of a page-grained
/// metric exists. `page` passes each record through (its counts folded into
/// the totals columns), with no `n_sentences`.
pub fn rollup_pages<C: UnitCounts>(
    rows: Vec<PageRecord<C>>,
    level: Level,
    metric: &'static str,
) -> Result<Table<C>, MetricsError> {
    match level {
        Level::Sentence => Err(MetricsError::SentenceLevelUnsupported { metric }),
        Level::Page => Ok(Table::Page(
            rows.iter()
                .map(|row| PageRow {
                    stimulus_id: row.stimulus_id.clone(),
                    stimulus_name: row.stimulus_name.clone(),
                    page: row.page,
                    totals: totals_of(&row.counts),
                    n_sentences: None,
                })
                .collect(),
        )),
        Level::Doc => {
            let mut index: HashMap<(String, String), usize> = HashMap::new();
            let mut out: Vec<DocRow<C::Totals>> = Vec::new();
            for row in &rows {
                let key = (row.stimulus_id.clone(), row.stimulus_name.clone());
                let slot = *index.entry(key).or_insert_with(|| {
                    out.push(DocRow {
                        stimulus_id: row.stimulus_id.clone(),
                        stimulus_name: row.stimulus_name.clone(),
                        totals: C::Totals::default(),
                        n_sentences: None,
                    });
                    out.len() - 1
                });
                row.counts.accumulate(&mut out[slot].totals);
            }
            Ok(Table::Doc(out))
        }
        Level::Lang => {
            if rows.is_empty() {
                return Ok(Table::Lang(Vec::new()));
            }
            let mut totals = C::Totals::default();
            for row in &rows {
                row.counts.accumulate(&mut totals);
            }
            Ok(Table::Lang(vec![LangRow {
                level: Level::Lang,
                totals,
                n_sentences: None,
            }]))
        }
    }
}

//! Metric behaviour flags.
//!
//! The source this system replaces contained two divergent implementations
//! of the same metrics. Each point of divergence is an explicit option here,
//! with the page-preserving, non-normalizing behaviour as the default.

use serde::{Deserialize, Serialize};

/// How sentence indices are assigned within a stimulus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceIndexing {
    /// Indices restart at 0 on every page.
    #[default]
    PerPage,
    /// Indices run continuously across all pages of a stimulus.
    Continuous,
}

/// How `num_types` is combined when pages are folded into doc/lang rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCounting {
    /// Union the per-page type sets: `num_types` is the true distinct
    /// vocabulary of the group.
    #[default]
    ExactUnion,
    /// Sum the per-page distinct counts. Over-counts types repeated across
    /// pages; kept for compatibility with the historical behaviour.
    PageSum,
}

/// Behaviour flags shared by all metric functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricOptions {
    pub sentence_indexing: SentenceIndexing,
    /// Case-fold and strip non-alphanumeric characters from page text, then
    /// re-annotate, before collecting TTR tokens.
    pub normalize_ttr: bool,
    pub type_counting: TypeCounting,
}

//! Corpus-level linguistic metrics over annotated stimuli.
//!
//! Each metric walks units (sentences or pages) produced by [`units`],
//! counts per unit, then rolls the flat record table up to the requested
//! [`Level`](corpometrics_core::Level) via [`aggregate`]. Derived ratios are
//! recomputed after summation, never summed.
//!
//! The annotator and subword tokenizer are injected capabilities; see the
//! traits in `corpometrics-core`.

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod fertility;
pub mod pronouns;
pub mod punctuation;
pub mod ttr;
pub mod units;

pub use aggregate::{DocRow, LangRow, PageRecord, PageRow, SentenceRow, Table, UnitCounts};
pub use batch::{Cell, CellType, CountColumns};
pub use error::MetricsError;
pub use fertility::{FertilityCounts, fertility};
pub use pronouns::{PronounCounts, PronounTotals, pronouns};
pub use punctuation::{PunctuationCounts, PunctuationTotals, punctuation};
pub use ttr::{TtrCounts, TtrTotals, ttr};

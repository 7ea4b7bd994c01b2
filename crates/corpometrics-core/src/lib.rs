//! Core types, adapter traits, and shared configuration for Corpometrics.

pub mod annotation;
pub mod level;
pub mod options;
pub mod stimulus;

pub use annotation::{Annotator, Document, PartOfSpeech, Sentence, SubwordTokenizer, Token};
pub use level::{Level, ParseLevelError};
pub use options::{MetricOptions, SentenceIndexing, TypeCounting};
pub use stimulus::Stimulus;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Sentence level requested for a metric that only exists at page grain.
    #[error("metric '{metric}' has no sentence-level table; finest grain is 'page'")]
    SentenceLevelUnsupported { metric: &'static str },
}

//! Unit iterators: the two grains metrics are computed over.
//!
//! Both iterators annotate one page at a time, preserve input ordering
//! exactly, and can be re-run — annotation is stateless and idempotent, so
//! consuming a fresh iterator over the same stimuli yields the same units.

use corpometrics_core::{Annotator, Document, Sentence, SentenceIndexing, Stimulus};

/// One sentence of one page of one stimulus.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceUnit {
    pub stimulus_id: String,
    pub stimulus_name: String,
    /// 1-indexed page number.
    pub page: u32,
    /// 0-based sentence index, restarted or continuous per [`SentenceIndexing`].
    pub sent_idx: u32,
    pub sentence: Sentence,
}

/// One annotated page of one stimulus.
#[derive(Debug, Clone, PartialEq)]
pub struct PageUnit {
    pub stimulus_id: String,
    pub stimulus_name: String,
    /// 1-indexed page number.
    pub page: u32,
    pub doc: Document,
}

/// Lazily yield every sentence of every page of every stimulus, in input
/// order.
pub fn sentence_units<'a, A>(
    stimuli: &'a [Stimulus],
    annotator: &'a A,
    indexing: SentenceIndexing,
) -> impl Iterator<Item = SentenceUnit> + 'a
where
    A: Annotator + ?Sized,
{
    stimuli.iter().flat_map(move |stim| {
        let mut next_idx: u32 = 0;
        stim.pages.iter().enumerate().flat_map(move |(pnum, text)| {
            let doc = annotator.annotate(text);
            let start = match indexing {
                SentenceIndexing::PerPage => 0,
                SentenceIndexing::Continuous => next_idx,
            };
            let units: Vec<SentenceUnit> = doc
                .sentences
                .into_iter()
                .enumerate()
                .map(|(k, sentence)| SentenceUnit {
                    stimulus_id: stim.stimulus_id.clone(),
                    stimulus_name: stim.stimulus_name.clone(),
                    page: (pnum + 1) as u32,
                    sent_idx: start + k as u32,
                    sentence,
                })
                .collect();
            next_idx = start + units.len() as u32;
            units
        })
    })
}

/// Lazily yield one annotated page per (stimulus, page), in input order.
pub fn page_units<'a, A>(
    stimuli: &'a [Stimulus],
    annotator: &'a A,
) -> impl Iterator<Item = PageUnit> + 'a
where
    A: Annotator + ?Sized,
{
    stimuli.iter().flat_map(move |stim| {
        stim.pages.iter().enumerate().map(move |(pnum, text)| PageUnit {
            stimulus_id: stim.stimulus_id.clone(),
            stimulus_name: stim.stimulus_name.clone(),
            page: (pnum + 1) as u32,
            doc: annotator.annotate(text),
        })
    })
}

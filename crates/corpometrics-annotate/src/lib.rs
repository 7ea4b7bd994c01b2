//! Adapter implementations: a rule-based English annotator, and a subword
//! tokenizer backed by HuggingFace `tokenizer.json` files.

mod basic;
pub use basic::BasicAnnotator;

#[cfg(feature = "hf")]
mod subword;
#[cfg(feature = "hf")]
pub use subword::HfSubwordTokenizer;

//! Subword tokenizer adapter over HuggingFace `tokenizer.json` files.

use std::path::Path;

use tokenizers::Tokenizer;
use tracing::{info, warn};

use corpometrics_core::SubwordTokenizer;

/// A [`SubwordTokenizer`] backed by the `tokenizers` crate.
///
/// Encodes without special tokens — fertility counts the subwords of a
/// single word's surface text, not a framed sequence.
pub struct HfSubwordTokenizer {
    inner: Tokenizer,
}

impl HfSubwordTokenizer {
    /// Load a tokenizer from a `tokenizer.json` file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        anyhow::ensure!(path.exists(), "tokenizer file not found: {path:?}");
        let inner = Tokenizer::from_file(path)
            .map_err(|e| anyhow::anyhow!("load tokenizer {}: {e}", path.display()))?;
        info!(tokenizer = %path.display(), "loaded subword tokenizer");
        Ok(Self { inner })
    }
}

impl SubwordTokenizer for HfSubwordTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        match self.inner.encode(text, false) {
            Ok(encoding) => encoding.get_ids().to_vec(),
            Err(e) => {
                warn!("encode '{text}' failed: {e}");
                Vec::new()
            }
        }
    }
}

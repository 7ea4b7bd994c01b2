//! Stimulus collection loader.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use corpometrics_core::Stimulus;

/// Load an ordered stimulus collection from a JSON array file.
pub fn stimuli_from_json(path: &Path) -> anyhow::Result<Vec<Stimulus>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read stimuli file {}", path.display()))?;
    let stimuli: Vec<Stimulus> = serde_json::from_str(&raw)
        .with_context(|| format!("parse stimuli file {}", path.display()))?;
    info!(stimuli = stimuli.len(), "loaded stimulus collection");
    Ok(stimuli)
}

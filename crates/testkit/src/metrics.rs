//! Summary metrics for a headless session run, written as JSON for CI artifacts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Aggregate outcome of one session run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Run label.
    pub name: String,
    /// RFC 3339 timestamp of when the report was produced.
    pub timestamp: String,
    /// World seed used for generation.
    pub world_seed: u64,
    /// Frames executed.
    pub frames: u64,
    /// Trees placed by world generation.
    pub trees_placed: usize,
    /// Trees still present at the end of the run.
    pub trees_remaining: usize,
    /// Strike attempts accepted (not on cooldown).
    pub strikes: u64,
    /// Strikes that damaged a tree.
    pub hits: u64,
    /// Trees felled.
    pub felled: u64,
    /// Resource units collected.
    pub resources: u64,
    /// Final player position.
    pub final_position: [f32; 3],
}

impl RunMetrics {
    /// Empty report stamped with the current time.
    pub fn new(name: impl Into<String>, world_seed: u64) -> Self {
        Self {
            name: name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            world_seed,
            frames: 0,
            trees_placed: 0,
            trees_remaining: 0,
            strikes: 0,
            hits: 0,
            felled: 0,
            resources: 0,
            final_position: [0.0; 3],
        }
    }
}

/// Persist `metrics` as pretty JSON at `path`, creating parent dirs if needed.
pub fn write_run_metrics<P: AsRef<Path>>(path: P, metrics: &RunMetrics) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(metrics)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Load a report written by [`write_run_metrics`].
pub fn read_run_metrics<P: AsRef<Path>>(path: P) -> Result<RunMetrics> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

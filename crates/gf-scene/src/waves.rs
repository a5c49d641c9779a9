//! CSV wave scripts.
//!
//! # CSV format
//!
//! One row per spawned object.  `at_secs` is measured from the moment the
//! script is scheduled on a scene.
//!
//! ```csv
//! at_secs,prefab,x,y
//! 0.0,grunt,-4,10
//! 2.5,grunt,4,10
//! 6.0,brute,0,12
//! ```
//!
//! Rows need not be sorted; the action manager orders them by due time.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use gf_core::Vec2;

use crate::{SceneError, SceneResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaveRecord {
    at_secs: f32,
    prefab:  String,
    x:       f32,
    y:       f32,
}

/// One scripted spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveEntry {
    pub at_secs:  f32,
    pub prefab:   String,
    pub position: Vec2,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a wave script from a CSV file.
pub fn load_waves_csv(path: &Path) -> SceneResult<Vec<WaveEntry>> {
    let file = std::fs::File::open(path)?;
    load_waves_reader(file)
}

/// Like [`load_waves_csv`] but accepts any `Read` source.
pub fn load_waves_reader<R: Read>(reader: R) -> SceneResult<Vec<WaveEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();

    for (row, result) in csv_reader.deserialize::<WaveRecord>().enumerate() {
        let record = result.map_err(|e| SceneError::Wave(e.to_string()))?;
        if !record.at_secs.is_finite() || record.at_secs < 0.0 {
            return Err(SceneError::Wave(format!(
                "row {}: at_secs must be a non-negative number, got {}",
                row + 1,
                record.at_secs
            )));
        }
        if record.prefab.is_empty() {
            return Err(SceneError::Wave(format!("row {}: empty prefab name", row + 1)));
        }
        entries.push(WaveEntry {
            at_secs:  record.at_secs,
            prefab:   record.prefab,
            position: Vec2::new(record.x, record.y),
        });
    }

    tracing::debug!(rows = entries.len(), "wave script loaded");
    Ok(entries)
}

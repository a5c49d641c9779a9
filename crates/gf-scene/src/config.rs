//! Loading and validating [`SceneConfig`].
//!
//! ```json
//! { "fixed_dt_secs": 0.05, "total_frames": 400, "seed": 7, "max_objects": 256 }
//! ```
//!
//! Missing fields take their defaults; a partial file is accepted.

use std::io::Read;
use std::path::Path;

use gf_core::SceneConfig;

use crate::SceneResult;

/// Load a [`SceneConfig`] from a JSON file and validate it.
pub fn load_config(path: &Path) -> SceneResult<SceneConfig> {
    let file = std::fs::File::open(path)?;
    load_config_reader(file)
}

/// Like [`load_config`] but accepts any `Read` source.
pub fn load_config_reader<R: Read>(reader: R) -> SceneResult<SceneConfig> {
    let config: SceneConfig = serde_json::from_reader(reader)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject configurations the frame loop cannot run.
pub fn validate_config(config: &SceneConfig) -> SceneResult<()> {
    config.validate()?;
    Ok(())
}

use crate::foundation::error::{DriftMapError, DriftMapResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parameters for building a drift map.
///
/// The JSON form accepts any subset of fields; missing ones fall back to [`Default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Number of levels in the generated graph (must be >= 1).
    pub depth: u32,
    /// Base node count for level 0; deeper levels shrink by one per level, never below 3.
    pub nodes_per_level: u32,
    /// Stored for callers; no computation reads it.
    pub drift_threshold: f64,
    /// Seed for the single random stream shared by every pipeline stage.
    pub seed: u64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            nodes_per_level: 7,
            drift_threshold: 0.65,
            seed: 42,
        }
    }
}

impl MapperConfig {
    pub fn new(depth: u32, nodes_per_level: u32) -> Self {
        Self {
            depth,
            nodes_per_level,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> DriftMapResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| DriftMapError::invalid_config(format!("parse mapper config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DriftMapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DriftMapError::invalid_config(format!(
                "open mapper config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> DriftMapResult<()> {
        if self.depth == 0 {
            return Err(DriftMapError::invalid_config("depth must be >= 1"));
        }
        if self.nodes_per_level == 0 {
            return Err(DriftMapError::invalid_config("nodes_per_level must be >= 1"));
        }
        if !self.drift_threshold.is_finite() {
            return Err(DriftMapError::invalid_config(
                "drift_threshold must be finite",
            ));
        }
        Ok(())
    }

    /// Node count at `level`: `max(3, nodes_per_level - level)`.
    pub fn level_size(&self, level: u32) -> usize {
        (self.nodes_per_level.saturating_sub(level)).max(3) as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;

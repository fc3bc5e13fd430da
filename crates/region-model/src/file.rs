//! Region files: a JSON description of a region set plus tracker settings.
//!
//! ```json
//! {
//!   "max": 60000,
//!   "continuous_mode": true,
//!   "regions": [
//!     { "in": 0, "data": "intro" },
//!     { "in": 12000, "out": 30000, "data": "chapter-1" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use regionwatch_common::error::{RegionwatchError, RegionwatchResult};

use crate::region::{Region, RegionSpec};

/// On-disk region set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionFile {
    /// Upper bound of the tracked range. Tracker defaults apply if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Whether the tracker should keep these regions gapless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous_mode: Option<bool>,

    #[serde(default)]
    pub regions: Vec<RegionSpec>,
}

impl RegionFile {
    /// Parse a region file from JSON text.
    pub fn from_json(json: &str) -> RegionwatchResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a region file from disk.
    pub fn load(path: impl AsRef<Path>) -> RegionwatchResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RegionwatchError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> RegionwatchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve every spec into a [`Region`]. Regions without data are
    /// labelled by their position in the file.
    pub fn into_regions(&self) -> RegionwatchResult<Vec<Region>> {
        self.regions
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, spec)| spec.into_region(index))
            .collect()
    }
}

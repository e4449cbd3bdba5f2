//! JSON persistence for the mapping front end.
//!
//! The front end consumes plain files: a raw statuses snapshot, the
//! enhanced alert map, the statistics summary, and one boundary file per
//! region. Everything is written pretty-printed UTF-8.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{AlertmapError, Result};
use crate::models::{EnhancedAlert, Statistics};

/// Raw statuses snapshot file name.
pub const ALERTS_FILE: &str = "alerts.json";
/// Enhanced alert map file name.
pub const ENHANCED_ALERTS_FILE: &str = "enhanced_alerts.json";
/// Statistics summary file name.
pub const STATISTICS_FILE: &str = "alert_statistics.json";
/// World countries GeoJSON file name.
pub const WORLD_MAP_FILE: &str = "countries.json";
/// Subdirectory for per-region boundary files.
pub const REGIONS_DIR: &str = "regions";

/// Writes pipeline artifacts into the output directory tree.
pub struct DataStore {
    output_dir: PathBuf,
    regions_dir: PathBuf,
}

impl DataStore {
    /// Open a store rooted at `output_dir`, creating the directory tree if
    /// needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        let regions_dir = output_dir.join(REGIONS_DIR);

        fs::create_dir_all(&regions_dir).map_err(|e| AlertmapError::io(&regions_dir, e))?;

        Ok(Self {
            output_dir,
            regions_dir,
        })
    }

    /// Root directory of this store.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist the raw statuses feed verbatim for front-end compatibility.
    pub fn save_statuses_snapshot(&self, document: &Value) -> Result<PathBuf> {
        self.write_json(self.output_dir.join(ALERTS_FILE), document)
    }

    /// Persist the enhanced alert map keyed by canonical region name, in
    /// batch order.
    pub fn save_enhanced_alerts(&self, alerts: &[(String, EnhancedAlert)]) -> Result<PathBuf> {
        let mut map = serde_json::Map::with_capacity(alerts.len());
        for (region, alert) in alerts {
            map.insert(region.clone(), serde_json::to_value(alert)?);
        }
        self.write_json(self.output_dir.join(ENHANCED_ALERTS_FILE), &Value::Object(map))
    }

    /// Persist the statistics summary.
    pub fn save_statistics(&self, statistics: &Statistics) -> Result<PathBuf> {
        let value = serde_json::to_value(statistics)?;
        self.write_json(self.output_dir.join(STATISTICS_FILE), &value)
    }

    /// Persist the world countries GeoJSON.
    pub fn save_world_map(&self, world: &Value) -> Result<PathBuf> {
        self.write_json(self.output_dir.join(WORLD_MAP_FILE), world)
    }

    /// Persist one region boundary under `regions/<name>.json`.
    pub fn save_boundary(&self, region_name: &str, boundary: &Value) -> Result<PathBuf> {
        self.write_json(self.regions_dir.join(format!("{}.json", region_name)), boundary)
    }

    fn write_json(&self, path: PathBuf, value: &Value) -> Result<PathBuf> {
        let rendered = serde_json::to_string_pretty(value)?;
        fs::write(&path, rendered).map_err(|e| AlertmapError::io(&path, e))?;
        Ok(path)
    }
}

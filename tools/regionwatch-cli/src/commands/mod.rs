pub mod expand;
pub mod fader;
pub mod query;
pub mod replay;

use std::io::Read;
use std::path::{Path, PathBuf};

use regionwatch_common::config::TrackerDefaults;
use regionwatch_region_model::RegionFile;
use regionwatch_tracker::{RegionTracker, TrackerOptions};

/// Build a tracker from a region file, applying command-line overrides on
/// top of the file and the configured defaults.
pub fn load_tracker(
    path: &Path,
    continuous: bool,
    max: Option<f64>,
    defaults: &TrackerDefaults,
) -> anyhow::Result<RegionTracker> {
    let file = RegionFile::load(path)
        .map_err(|e| anyhow::anyhow!("Failed to load regions from {}: {e}", path.display()))?;
    let mut options = TrackerOptions::from_region_file(&file, defaults)
        .map_err(|e| anyhow::anyhow!("Invalid region in {}: {e}", path.display()))?;

    if continuous {
        options.continuous_mode = true;
    }
    if max.is_some() {
        options.max = max;
    }

    let tracker = RegionTracker::new(options);
    tracing::debug!(
        regions = tracker.len(),
        max = tracker.max(),
        continuous = tracker.continuous_mode(),
        "Loaded region file"
    );
    Ok(tracker)
}

/// Read positions, one per line. Blank lines and `#` comments are skipped;
/// `null` lines are kept as `None` (query the current position).
pub fn read_positions(path: Option<PathBuf>) -> anyhow::Result<Vec<Option<f64>>> {
    let content = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    parse_positions(&content)
}

fn parse_positions(content: &str) -> anyhow::Result<Vec<Option<f64>>> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| match line {
            "null" | "undefined" => Ok(None),
            number => number
                .parse::<f64>()
                .map(Some)
                .map_err(|e| anyhow::anyhow!("Line {line_no}: invalid position {number:?}: {e}")),
        })
        .collect()
}

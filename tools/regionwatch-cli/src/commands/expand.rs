//! Print the gapless layout of a region file.

use std::path::PathBuf;

use regionwatch_common::config::TrackerDefaults;

pub fn run(regions: PathBuf, max: Option<f64>, defaults: &TrackerDefaults) -> anyhow::Result<()> {
    let mut tracker = super::load_tracker(&regions, false, max, defaults)?;
    tracker.expand_regions();

    println!("{}", serde_json::to_string_pretty(tracker.regions())?);
    Ok(())
}

//! Look regions up by position or data.

use std::path::PathBuf;

use regionwatch_common::config::TrackerDefaults;
use regionwatch_region_model::RegionData;

pub fn run(
    regions: PathBuf,
    at: Option<f64>,
    data: Option<String>,
    defaults: &TrackerDefaults,
) -> anyhow::Result<()> {
    let tracker = super::load_tracker(&regions, false, None, defaults)?;

    if let Some(position) = at {
        let found = tracker.regions_containing(position);
        if found.is_empty() {
            println!("No region covers {position}.");
        } else {
            println!("Regions covering {position}:");
            for region in found {
                println!("  - {region}");
            }
        }
    }

    if let Some(raw) = data {
        let data = parse_data(&raw);
        match tracker.region_by_data(&data) {
            Some(region) => println!("{}", serde_json::to_string_pretty(region)?),
            None => println!("No region carries {raw:?}."),
        }
    }

    Ok(())
}

/// Integers look up index data; anything else is a label.
fn parse_data(raw: &str) -> RegionData {
    raw.parse::<i64>()
        .map(RegionData::Index)
        .unwrap_or_else(|_| RegionData::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data() {
        assert_eq!(parse_data("3"), RegionData::Index(3));
        assert_eq!(parse_data("intro"), RegionData::Label("intro".to_string()));
    }
}

//! Replay a position stream against a region file.

use std::path::PathBuf;

use regionwatch_common::config::TrackerDefaults;

pub fn run(
    regions: PathBuf,
    positions: Option<PathBuf>,
    continuous: bool,
    max: Option<f64>,
    json: bool,
    defaults: &TrackerDefaults,
) -> anyhow::Result<()> {
    let mut tracker = super::load_tracker(&regions, continuous, max, defaults)?;
    let positions = super::read_positions(positions)?;

    let mut updates = 0usize;
    let mut total = 0usize;

    for position in positions {
        let Some(position) = position else {
            if !json {
                println!("position: {:?}", tracker.position());
            }
            continue;
        };

        let events = tracker
            .update(position)
            .map_err(|e| anyhow::anyhow!("Update to {position} failed: {e}"))?;
        updates += 1;
        total += events.len();

        for event in &events {
            if json {
                println!("{}", serde_json::to_string(event)?);
            } else {
                println!("{event}");
            }
        }
    }

    if !json {
        println!("\n{total} transition(s) over {updates} update(s).");
    }
    tracing::info!(updates, transitions = total, "Replay finished");

    Ok(())
}

//! Drive a timed fader from a timecode stream.

use std::path::PathBuf;

use regionwatch_timed_fader::{FaderConfig, TimedFader};

pub fn run(timings: Vec<f64>, tail_ms: f64, positions: Option<PathBuf>) -> anyhow::Result<()> {
    let mut fader = TimedFader::new(FaderConfig { timings, tail_ms })
        .map_err(|e| anyhow::anyhow!("Failed to build fader: {e}"))?;
    let positions = super::read_positions(positions)?;

    println!("Fader with {} item(s)", fader.len());

    let mut shown = None;
    for timestamp in positions.into_iter().flatten() {
        let active = fader.update(timestamp)?;
        if active != shown {
            match active {
                Some(index) => println!("{timestamp:>10} ms  item {index}"),
                None => println!("{timestamp:>10} ms  (none)"),
            }
            shown = active;
        }
    }

    Ok(())
}

//! RegionWatch Timed Fader
//!
//! Keeps exactly one item of a sequence "active" as a playback timecode moves.
//! Each item starts at a timing (seconds) and stays active until the next
//! item starts. Presentation (CSS classes, opacity, ...) is left to the
//! `on_activate` callback.
//!
//! Built on a continuous-mode [`RegionTracker`]: one region per item, the
//! first one pinned just below zero so it is active from the very start,
//! and the last one stretched `tail_ms` past its start.

use regionwatch_common::error::RegionwatchResult;
use regionwatch_region_model::{Region, TransitionKind};
use regionwatch_tracker::{RegionTracker, TrackerOptions};

/// Fader configuration.
#[derive(Debug, Clone)]
pub struct FaderConfig {
    /// Start time of each item in seconds, in item order.
    pub timings: Vec<f64>,

    /// How long the last item stays active after it starts (milliseconds).
    pub tail_ms: f64,
}

impl Default for FaderConfig {
    fn default() -> Self {
        Self {
            timings: Vec::new(),
            tail_ms: 10_000.0,
        }
    }
}

impl FaderConfig {
    pub fn with_timings(timings: Vec<f64>) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }
}

/// Headless "one active item" selector driven by a millisecond timecode.
pub struct TimedFader {
    tracker: RegionTracker,
    item_count: usize,
    active: Option<usize>,
    on_activate: Option<Box<dyn FnMut(usize)>>,
}

impl TimedFader {
    pub fn new(config: FaderConfig) -> RegionwatchResult<Self> {
        let mut regions = config
            .timings
            .iter()
            .enumerate()
            .map(|(index, &secs)| Region::point(start_ms(secs), index))
            .collect::<RegionwatchResult<Vec<_>>>()?;

        // Pin the first item below zero so it covers position 0.
        if let Some(first) = regions.first_mut() {
            *first = first.with_in_point(-1.0);
        }

        let mut tracker = RegionTracker::new(
            TrackerOptions::default()
                .with_regions(regions)
                .continuous(true),
        );
        tracker.set_max(tracker.max() + config.tail_ms);

        tracing::debug!(
            items = config.timings.len(),
            max_ms = tracker.max(),
            "Timed fader ready"
        );

        Ok(Self {
            tracker,
            item_count: config.timings.len(),
            active: None,
            on_activate: None,
        })
    }

    /// Advance to `timestamp_ms` and return the active item afterwards.
    ///
    /// The first update activates whichever item covers the starting
    /// position; later updates follow Enter transitions. Exits are ignored,
    /// so an item stays active until another one takes over.
    pub fn update(&mut self, timestamp_ms: f64) -> RegionwatchResult<Option<usize>> {
        let seeding = self.tracker.position().is_none();
        let events = self.tracker.update(timestamp_ms)?;

        if seeding && self.tracker.position().is_some() {
            let starting = self
                .tracker
                .regions_containing(timestamp_ms)
                .last()
                .and_then(|region| region.data().as_index());
            if let Some(index) = starting {
                self.activate(index as usize);
            }
        }

        for event in events.iter().filter(|e| e.kind == TransitionKind::Enter) {
            if let Some(index) = event.data().as_index() {
                self.activate(index as usize);
            }
        }

        Ok(self.active)
    }

    /// Make `index` the only active item.
    pub fn activate(&mut self, index: usize) {
        if index >= self.item_count {
            tracing::warn!(index, items = self.item_count, "Ignoring unknown fader item");
            return;
        }
        self.active = Some(index);
        if let Some(callback) = self.on_activate.as_mut() {
            callback(index);
        }
    }

    /// Deactivate every item.
    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn set_on_activate<F>(&mut self, callback: F)
    where
        F: FnMut(usize) + 'static,
    {
        self.on_activate = Some(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn tracker(&self) -> &RegionTracker {
        &self.tracker
    }
}

/// Item start in whole milliseconds, never negative.
fn start_ms(secs: f64) -> f64 {
    (secs * 1000.0).round().max(0.0)
}

//! The region tracker.
//!
//! Owns a region set and the last observed position. Every [`RegionTracker::update`]
//! computes the transitions between the previous and the new position, delivers
//! them, and commits the new position.

use std::fmt;

use regionwatch_common::config::TrackerDefaults;
use regionwatch_common::error::RegionwatchResult;
use regionwatch_region_model::{
    Region, RegionData, RegionFile, RegionSpec, TransitionEvent, TransitionKind,
};

use crate::crossing;
use crate::dispatch::{KindCallbacks, ListenerId, Notifier, RegionHooks, TransitionCallback};
use crate::expand;

/// Construction options for a [`RegionTracker`].
#[derive(Default)]
pub struct TrackerOptions {
    /// Upper bound of the tracked range. Defaults to 0 and grows to cover
    /// every region's in- and out-point.
    pub max: Option<f64>,

    /// Initial regions. Sorted by in-point on construction.
    pub regions: Vec<Region>,

    /// Keep regions gapless (see [`expand::expand_regions`]).
    pub continuous_mode: bool,

    pub on_enter: Option<TransitionCallback>,
    pub on_exit: Option<TransitionCallback>,
    pub on_skip: Option<TransitionCallback>,
}

impl TrackerOptions {
    /// Options for the regions and settings in `file`, with `defaults` filling
    /// in whatever the file leaves out.
    pub fn from_region_file(file: &RegionFile, defaults: &TrackerDefaults) -> RegionwatchResult<Self> {
        Ok(Self {
            max: Some(file.max.unwrap_or(defaults.max)),
            regions: file.into_regions()?,
            continuous_mode: file.continuous_mode.unwrap_or(defaults.continuous_mode),
            ..Self::default()
        })
    }

    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn continuous(mut self, continuous_mode: bool) -> Self {
        self.continuous_mode = continuous_mode;
        self
    }

    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.on_enter = Some(Box::new(callback));
        self
    }

    pub fn on_exit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.on_exit = Some(Box::new(callback));
        self
    }

    pub fn on_skip<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.on_skip = Some(Box::new(callback));
        self
    }
}

/// Tracks a moving position across a set of regions.
///
/// Single-threaded and synchronous. `update` borrows the tracker mutably, so
/// a callback can never re-enter it while an update is being delivered.
pub struct RegionTracker {
    regions: Vec<Region>,
    last: Option<f64>,
    max: f64,
    continuous_mode: bool,
    callbacks: KindCallbacks,
    hooks: RegionHooks,
    notifier: Notifier,
}

impl RegionTracker {
    pub fn new(options: TrackerOptions) -> Self {
        let mut tracker = Self {
            regions: Vec::new(),
            last: None,
            max: options.max.unwrap_or(0.0),
            continuous_mode: false,
            callbacks: KindCallbacks {
                on_enter: options.on_enter,
                on_exit: options.on_exit,
                on_skip: options.on_skip,
            },
            hooks: RegionHooks::default(),
            notifier: Notifier::new(),
        };
        tracker.set_regions(options.regions);
        tracker.set_continuous_mode(options.continuous_mode);
        tracker
    }

    // Region set

    /// Add a region.
    ///
    /// A missing or NaN `out_point` makes a point region. Without `data` the
    /// region is labelled `region_<n>`, `n` being the current region count.
    /// Fails with `InvalidRegion` if `in_point > out_point`, leaving the
    /// tracker untouched.
    pub fn insert_region(
        &mut self,
        in_point: f64,
        out_point: Option<f64>,
        data: Option<RegionData>,
    ) -> RegionwatchResult<()> {
        let data = data.unwrap_or_else(|| RegionData::default_label(self.regions.len()));
        let region = Region::new(in_point, out_point, data).map_err(|e| {
            tracing::warn!(error = %e, "Rejected region");
            e
        })?;

        self.max = self.max.max(region.out_point());
        self.regions.push(region);
        sort_by_in_point(&mut self.regions);

        if self.continuous_mode {
            self.expand_regions();
        }
        Ok(())
    }

    /// Add a region described by `spec`, with the same rules as [`Self::insert_region`].
    pub fn insert(&mut self, spec: RegionSpec) -> RegionwatchResult<()> {
        self.insert_region(spec.in_point, spec.out_point, spec.data)
    }

    /// Drop every region matching `predicate`. Returns how many were removed.
    ///
    /// Neither re-sorts nor re-expands: call [`Self::set_regions`] afterwards
    /// if the remaining set must be tiled again.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Region) -> bool,
    {
        let before = self.regions.len();
        self.regions.retain(|region| !predicate(region));
        before - self.regions.len()
    }

    /// Keep only the regions matching `predicate`. Returns how many were removed.
    ///
    /// Same ordering caveat as [`Self::remove_where`].
    pub fn keep_where<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&Region) -> bool,
    {
        let before = self.regions.len();
        self.regions.retain(predicate);
        before - self.regions.len()
    }

    /// Replace the whole region set.
    ///
    /// `max` grows to cover every in- and out-point; it never shrinks here.
    pub fn set_regions(&mut self, mut regions: Vec<Region>) {
        sort_by_in_point(&mut regions);
        self.max = regions.iter().fold(self.max, |max, region| {
            max.max(region.out_point()).max(region.in_point())
        });
        self.regions = regions;

        if self.continuous_mode {
            self.expand_regions();
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Stretch every region to the next one's in-point and the last one past
    /// `max`. Assumes the regions are sorted.
    pub fn expand_regions(&mut self) {
        self.regions = expand::expand_regions(&self.regions, self.max);
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = max;
        if self.continuous_mode {
            self.expand_regions();
        }
    }

    pub fn continuous_mode(&self) -> bool {
        self.continuous_mode
    }

    /// Turning continuous mode on expands immediately. Turning it off keeps
    /// the regions as they are.
    pub fn set_continuous_mode(&mut self, continuous_mode: bool) {
        self.continuous_mode = continuous_mode;
        if self.continuous_mode {
            self.expand_regions();
        }
    }

    /// Drop all regions and region hooks and forget the last position.
    ///
    /// `max`, continuous mode, tracker-wide callbacks and subscribers stay.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.hooks.clear();
        self.last = None;
    }

    // Position

    /// The last committed position, `None` before the first update.
    pub fn position(&self) -> Option<f64> {
        self.last
    }

    /// Move to `position` without reporting anything. NaN is ignored.
    pub fn seek(&mut self, position: f64) {
        if !position.is_nan() {
            self.last = Some(position);
        }
    }

    /// Move to `position` and report every region boundary crossed on the way.
    ///
    /// - The first update only records the position.
    /// - Repeating the current position, or passing NaN, does nothing.
    ///
    /// Events are delivered to callbacks, region hooks and subscribers in
    /// sweep order, then returned in that same order. The new position is
    /// committed before delivery; if a callback fails, the remaining events
    /// are not delivered and the error is returned.
    pub fn update(&mut self, position: f64) -> RegionwatchResult<Vec<TransitionEvent>> {
        if position.is_nan() {
            tracing::trace!("Ignoring NaN position");
            return Ok(Vec::new());
        }

        let last = match self.last {
            Some(last) if last == position => return Ok(Vec::new()),
            Some(last) => last,
            None => {
                tracing::trace!(position, "Initial position recorded");
                self.last = Some(position);
                return Ok(Vec::new());
            }
        };

        let events = crossing::collect_transitions(&self.regions, last, position);
        self.last = Some(position);

        if !events.is_empty() {
            tracing::debug!(
                from = last,
                to = position,
                events = events.len(),
                "Position crossed region boundaries"
            );
        }

        for event in &events {
            self.dispatch(event)?;
        }

        Ok(events)
    }

    /// Alias of [`Self::update`] for index-style consumers.
    pub fn index(&mut self, position: f64) -> RegionwatchResult<Vec<TransitionEvent>> {
        self.update(position)
    }

    fn dispatch(&mut self, event: &TransitionEvent) -> RegionwatchResult<()> {
        self.callbacks.call(event)?;
        self.hooks.call(event)?;
        self.notifier.notify(event)
    }

    // Queries

    /// Regions whose closed range `[in, out]` holds `position`, in set order.
    pub fn regions_containing(&self, position: f64) -> Vec<&Region> {
        self.regions
            .iter()
            .filter(|region| region.covers(position))
            .collect()
    }

    /// First region carrying `data`.
    pub fn region_by_data(&self, data: &RegionData) -> Option<&Region> {
        self.regions.iter().find(|region| region.data() == data)
    }

    // Listeners

    pub fn on_enter<F>(&mut self, callback: F)
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.callbacks.on_enter = Some(Box::new(callback));
    }

    pub fn on_exit<F>(&mut self, callback: F)
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.callbacks.on_exit = Some(Box::new(callback));
    }

    pub fn on_skip<F>(&mut self, callback: F)
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.callbacks.on_skip = Some(Box::new(callback));
    }

    /// Call `callback` whenever a region carrying `data` sees a `kind` transition.
    ///
    /// Hooks are keyed by data, not by region: when several regions share the
    /// same data, the hook fires once for each of them. Give regions distinct
    /// data to target exactly one.
    pub fn on_region<F>(&mut self, data: impl Into<RegionData>, kind: TransitionKind, callback: F)
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.hooks.add(data.into(), kind, Box::new(callback));
    }

    /// Drop every hook registered for `data`. Returns how many were removed.
    pub fn remove_region_hooks(&mut self, data: &RegionData) -> usize {
        self.hooks.remove(data)
    }

    /// Subscribe to the `region:*` notifications. `None` listens to all kinds.
    pub fn subscribe<F>(&mut self, kind: Option<TransitionKind>, callback: F) -> ListenerId
    where
        F: FnMut(&TransitionEvent) -> anyhow::Result<()> + 'static,
    {
        self.notifier.subscribe(kind, callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl Default for RegionTracker {
    fn default() -> Self {
        Self::new(TrackerOptions::default())
    }
}

impl fmt::Debug for RegionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionTracker")
            .field("regions", &self.regions)
            .field("last", &self.last)
            .field("max", &self.max)
            .field("continuous_mode", &self.continuous_mode)
            .field("region_hooks", &self.hooks.len())
            .field("notifier", &self.notifier)
            .finish()
    }
}

/// Stable sort, so regions sharing an in-point keep their insertion order.
fn sort_by_in_point(regions: &mut [Region]) {
    regions.sort_by(|a, b| a.in_point().total_cmp(&b.in_point()));
}

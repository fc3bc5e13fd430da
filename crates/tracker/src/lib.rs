//! RegionWatch Tracker
//!
//! Watches a scalar position (scroll offset, playback timecode, ...) move over
//! a set of regions and reports every boundary it crosses:
//! - **Crossing:** Classify each region as entered, exited, or skipped
//! - **Ordering:** Sort events into the order a continuous sweep would hit them
//! - **Expansion:** Optionally keep regions gapless ("continuous mode")
//! - **Dispatch:** Deliver events to callbacks, region hooks, and subscribers
//!
//! This crate is pure computation: no I/O, no threads, no timers.
//! Rate limiting of updates is the caller's business.

pub mod crossing;
pub mod dispatch;
pub mod expand;
pub mod tracker;

pub use dispatch::{ListenerId, Notifier, TransitionCallback};
pub use tracker::{RegionTracker, TrackerOptions};

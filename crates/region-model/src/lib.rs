//! RegionWatch Region Model
//!
//! Defines the core data contracts shared by the tracker and its consumers:
//! - **Regions:** Half-open `[in, out)` intervals tagged with an identifier
//! - **Region files:** JSON documents describing a region set and tracker settings
//! - **Transitions:** Enter/exit/skip events produced by a position update
//!
//! Regions are immutable values. Anything that "changes" a region builds a
//! new one.

pub mod file;
pub mod region;
pub mod transition;

pub use file::*;
pub use region::*;
pub use transition::*;

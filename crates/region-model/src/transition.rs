//! Transition events produced when a position update crosses region boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::region::{Region, RegionData};

/// The way a position update crossed a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// The position moved from outside the region to inside it.
    Enter,
    /// The position moved from inside the region to outside it.
    Exit,
    /// The position jumped across the whole region, or landed on a point region.
    Skip,
}

impl TransitionKind {
    /// Name of the generic notification fired for this kind.
    pub fn notification_name(self) -> &'static str {
        match self {
            Self::Enter => "region:enter",
            Self::Exit => "region:exit",
            Self::Skip => "region:skip",
        }
    }

    /// Enter and Exit swapped; Skip is its own mirror.
    pub fn flipped(self) -> Self {
        match self {
            Self::Enter => Self::Exit,
            Self::Exit => Self::Enter,
            Self::Skip => Self::Skip,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Skip => "skip",
        })
    }
}

/// A single boundary crossing. Produced and consumed within one update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionEvent {
    pub kind: TransitionKind,

    /// Snapshot of the region at the time of the update.
    pub region: Region,

    /// Position before the update.
    pub previous_position: f64,

    /// Position the update moved to.
    pub new_position: f64,

    /// `previous_position > new_position`.
    pub moving_backwards: bool,
}

impl TransitionEvent {
    pub fn new(kind: TransitionKind, region: Region, previous: f64, current: f64) -> Self {
        Self {
            kind,
            region,
            previous_position: previous,
            new_position: current,
            moving_backwards: previous > current,
        }
    }

    pub fn data(&self) -> &RegionData {
        self.region.data()
    }

    pub fn notification_name(&self) -> &'static str {
        self.kind.notification_name()
    }
}

impl fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<5} {} ({} -> {})",
            self.kind, self.region, self.previous_position, self.new_position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_names() {
        assert_eq!(TransitionKind::Enter.notification_name(), "region:enter");
        assert_eq!(TransitionKind::Exit.notification_name(), "region:exit");
        assert_eq!(TransitionKind::Skip.notification_name(), "region:skip");
    }

    #[test]
    fn test_flipped() {
        assert_eq!(TransitionKind::Enter.flipped(), TransitionKind::Exit);
        assert_eq!(TransitionKind::Exit.flipped(), TransitionKind::Enter);
        assert_eq!(TransitionKind::Skip.flipped(), TransitionKind::Skip);
    }

    #[test]
    fn test_event_direction() {
        let region = Region::new(0.0, Some(5.0), "a").unwrap();
        let forward = TransitionEvent::new(TransitionKind::Enter, region.clone(), -1.0, 1.0);
        assert!(!forward.moving_backwards);

        let backward = TransitionEvent::new(TransitionKind::Enter, region, 6.0, 4.0);
        assert!(backward.moving_backwards);
        assert_eq!(backward.data(), &RegionData::from("a"));
    }

    #[test]
    fn test_event_json_format() {
        let region = Region::new(0.0, Some(5.0), "a").unwrap();
        let event = TransitionEvent::new(TransitionKind::Skip, region, -1.0, 6.0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"skip\""));
        assert!(json.contains("\"previous_position\":-1.0"));
        assert!(json.contains("\"moving_backwards\":false"));
    }
}

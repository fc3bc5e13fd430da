//! Region types.
//!
//! A region is a half-open numeric interval `[in, out)` with an attached
//! identifier. Positions exactly at `in` are inside; positions exactly at
//! `out` are outside. A region with `in == out` is a *point region*.

use std::fmt;

use serde::{Deserialize, Serialize};

use regionwatch_common::error::{RegionwatchError, RegionwatchResult};

/// Opaque identifier or payload attached to a region.
///
/// Uniqueness is a convention, not a rule: several regions may carry the
/// same data, and lookups by data return the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionData {
    /// Numeric identifier, e.g. an item index.
    Index(i64),
    /// String identifier. Inserted regions without data get `region_<n>`.
    Label(String),
    /// Arbitrary JSON payload.
    Payload(serde_json::Value),
}

impl RegionData {
    /// The label assigned to the region inserted when `count` regions exist.
    pub fn default_label(count: usize) -> Self {
        Self::Label(format!("region_{count}"))
    }

    pub fn as_index(&self) -> Option<i64> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for RegionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Label(s) => f.write_str(s),
            Self::Payload(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for RegionData {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

impl From<String> for RegionData {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl From<i64> for RegionData {
    fn from(value: i64) -> Self {
        Self::Index(value)
    }
}

impl From<usize> for RegionData {
    fn from(value: usize) -> Self {
        Self::Index(value as i64)
    }
}

impl From<serde_json::Value> for RegionData {
    fn from(value: serde_json::Value) -> Self {
        Self::Payload(value)
    }
}

/// A tracked interval.
///
/// Regions are values: expansion and other rewrites produce new regions
/// instead of mutating existing ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    #[serde(rename = "in")]
    in_point: f64,
    #[serde(rename = "out")]
    out_point: f64,
    data: RegionData,
}

impl Region {
    /// Create a region.
    ///
    /// A missing or NaN `out_point` makes a point region at `in_point`.
    /// Fails with [`RegionwatchError::InvalidRegion`] when `in_point > out_point`
    /// or `in_point` is NaN.
    pub fn new(
        in_point: f64,
        out_point: Option<f64>,
        data: impl Into<RegionData>,
    ) -> RegionwatchResult<Self> {
        let out_point = match out_point {
            Some(out) if !out.is_nan() => out,
            _ => in_point,
        };
        if in_point.is_nan() || in_point > out_point {
            return Err(RegionwatchError::invalid_region(in_point, out_point));
        }
        Ok(Self {
            in_point,
            out_point,
            data: data.into(),
        })
    }

    /// Create a zero-width region at `at`.
    pub fn point(at: f64, data: impl Into<RegionData>) -> RegionwatchResult<Self> {
        Self::new(at, None, data)
    }

    pub fn in_point(&self) -> f64 {
        self.in_point
    }

    pub fn out_point(&self) -> f64 {
        self.out_point
    }

    pub fn data(&self) -> &RegionData {
        &self.data
    }

    pub fn width(&self) -> f64 {
        self.out_point - self.in_point
    }

    pub fn is_point(&self) -> bool {
        self.in_point == self.out_point
    }

    /// Half-open membership: `in <= position < out`.
    ///
    /// Always false for point regions.
    pub fn contains(&self, position: f64) -> bool {
        self.in_point <= position && position < self.out_point
    }

    /// Closed membership: `in <= position <= out`.
    pub fn covers(&self, position: f64) -> bool {
        self.in_point <= position && position <= self.out_point
    }

    /// A copy of this region ending at `out_point`.
    ///
    /// Not validated: expansion against a max below the last in-point
    /// yields an empty region, which never reports transitions.
    pub fn with_out_point(&self, out_point: f64) -> Self {
        Self {
            in_point: self.in_point,
            out_point,
            data: self.data.clone(),
        }
    }

    /// A copy of this region starting at `in_point`.
    pub fn with_in_point(&self, in_point: f64) -> Self {
        Self {
            in_point,
            out_point: self.out_point,
            data: self.data.clone(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.data, self.in_point, self.out_point)
    }
}

/// Loose region description as found in region files and insert calls.
///
/// Accepts both `in`/`out` and the short `i`/`o` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    #[serde(rename = "in", alias = "i")]
    pub in_point: f64,

    #[serde(
        rename = "out",
        alias = "o",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub out_point: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RegionData>,
}

impl RegionSpec {
    /// A point region spec at `in_point` with no data.
    pub fn new(in_point: f64) -> Self {
        Self {
            in_point,
            out_point: None,
            data: None,
        }
    }

    pub fn with_out(mut self, out_point: f64) -> Self {
        self.out_point = Some(out_point);
        self
    }

    pub fn with_data(mut self, data: impl Into<RegionData>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Resolve into a [`Region`], labelling it `region_<fallback_index>` if
    /// no data was given.
    pub fn into_region(self, fallback_index: usize) -> RegionwatchResult<Region> {
        let data = self
            .data
            .unwrap_or_else(|| RegionData::default_label(fallback_index));
        Region::new(self.in_point, self.out_point, data)
    }
}

//! Half-open stay ranges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error raised when a range's start is not strictly before its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid date range: start {start} must be before end {end}")]
pub struct InvalidDateRange {
    /// Requested start instant.
    pub start: DateTime<Utc>,
    /// Requested end instant.
    pub end: DateTime<Utc>,
}

/// A half-open `[start, end)` range of instants.
///
/// ## Invariants
/// - `start < end`, enforced at construction.
///
/// Two ranges overlap iff `a.start < b.end && b.start < a.end`; ranges that
/// merely touch at an endpoint do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DateRangeDto", into = "DateRangeDto")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Creates a validated range.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidDateRange> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidDateRange { start, end })
        }
    }

    /// Returns the inclusive start instant.
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end instant.
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open intersection test.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whole days covered by the range, with a floor of one.
    ///
    /// A stay shorter than a day still bills a single night.
    pub fn billable_nights(&self) -> u32 {
        let days = (self.end - self.start).num_days();
        u32::try_from(days).unwrap_or(0).max(1)
    }

    /// Whether the range has ended at or before `cutoff`.
    pub fn ended_by(&self, cutoff: DateTime<Utc>) -> bool {
        self.end <= cutoff
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct DateRangeDto {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl From<DateRange> for DateRangeDto {
    fn from(value: DateRange) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

impl TryFrom<DateRangeDto> for DateRange {
    type Error = InvalidDateRange;

    fn try_from(value: DateRangeDto) -> Result<Self, Self::Error> {
        Self::new(value.start, value.end)
    }
}

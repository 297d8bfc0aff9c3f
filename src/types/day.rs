//! Day and bin structures for one layout pass
//!
//! All of these are transient: rebuilt from the raw feed on every layout
//! pass, never shared across passes.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::layout::DAY_MS;

/// One of the seven columns of the week grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub start: DateTime<Utc>,
    /// Inclusive bound: 1ms before the next midnight.
    pub end: DateTime<Utc>,
    /// Indices into the flat event list, in assignment order — not
    /// chronological order. Widening depends on this order.
    pub events: Vec<usize>,
    pub bins: Vec<Bin>,
}

impl Day {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: start + TimeDelta::milliseconds(DAY_MS - 1),
            events: Vec::new(),
            bins: Vec::new(),
        }
    }
}

/// A column within a day; holds non-overlapping events placed in
/// non-decreasing start order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    /// End time of the most recently placed event (occupied-until
    /// watermark).
    pub end: DateTime<Utc>,
    /// Indices of the events placed in this bin.
    pub events: Vec<usize>,
    /// Free sub-intervals of the bin's history, in order. The last gap runs
    /// to the end of the day until an event closes it.
    pub gaps: Vec<Gap>,
}

/// Closed interval of free time within a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_bounds() {
        let start = Utc.with_ymd_and_hms(2015, 10, 26, 0, 0, 0).unwrap();
        let day = Day::new(start);
        assert_eq!(day.start, start);
        assert_eq!(
            day.end,
            Utc.with_ymd_and_hms(2015, 10, 26, 23, 59, 59).unwrap()
                + TimeDelta::milliseconds(999)
        );
        assert!(day.events.is_empty());
        assert!(day.bins.is_empty());
    }
}

//! Event types for the weekly layout engine

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::Serialize;

/// Raw event record as extracted from the feed, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A single-day event with its resolved column placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Opaque payload, never interpreted.
    pub title: String,
    pub start: DateTime<Utc>,
    /// Inclusive end, always 1ms before a 30-minute grid boundary.
    pub end: DateTime<Utc>,
    /// Time of day of `start` in fractional hours, for vertical placement.
    pub start_in_hours: f64,
    /// Inclusive duration in hours: `(end - start + 1ms)`.
    pub duration_hours: f64,
    /// Week day derived from `start`; Monday is the first column.
    pub week_day: Weekday,
    /// Column index within the day, set once during bin assignment.
    pub bin: usize,
    /// Number of columns spanned, only ever increased by widening.
    pub width: usize,
}

impl Event {
    pub(crate) fn new(title: String, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title,
            start_in_hours: f64::from(start.hour()) + f64::from(start.minute()) / 60.0,
            duration_hours: Self::duration_hours(start, end),
            week_day: start.weekday(),
            start,
            end,
            bin: 0,
            width: 1,
        }
    }

    /// Inclusive duration in hours; a zero-width raw interval registers as
    /// one millisecond rather than nothing.
    pub(crate) fn duration_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        ((end - start).num_milliseconds() + 1) as f64 / 3_600_000.0
    }

    /// Monday-based index of this event's day column.
    pub fn day_index(&self) -> usize {
        self.week_day.num_days_from_monday() as usize
    }
}

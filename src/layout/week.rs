//! Week Resolution — the Monday-start window containing a reference day

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::Serialize;

use crate::types::Day;

use super::{DAY_MS, DAYS_IN_WEEK, WEEK_MS};

/// Monday 00:00:00.000 .. Sunday 23:59:59.999 window around an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    /// Window of the week containing `day`. Sunday counts as the seventh
    /// day, not the zeroth, so the window always opens on Monday.
    pub fn containing(day: DateTime<Utc>) -> Self {
        let midnight = floor_to_day(day);
        let start = midnight - TimeDelta::days(i64::from(day.weekday().num_days_from_monday()));
        let end = start + TimeDelta::milliseconds(WEEK_MS - 1);
        Self { start, end }
    }

    /// Week filter: true when any part of `[start, end]` falls inside the
    /// window. An event ending exactly at the window start is excluded; an
    /// event starting exactly at the window end is included.
    pub fn contains(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        end > self.start && start <= self.end
    }

    /// All seven days of the window, Monday first, allocated upfront.
    pub fn days(&self) -> Vec<Day> {
        (0..DAYS_IN_WEEK as i64)
            .map(|i| Day::new(self.start + TimeDelta::days(i)))
            .collect()
    }
}

/// Floor an instant to midnight of its calendar day.
pub(crate) fn floor_to_day(t: DateTime<Utc>) -> DateTime<Utc> {
    let ms = t.timestamp_millis();
    t - TimeDelta::milliseconds(ms.rem_euclid(DAY_MS))
}

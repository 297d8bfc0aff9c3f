//! The weekly layout engine
//!
//! Four stages run in strict sequence on every refresh: week resolution,
//! event normalization/filtering/splitting, bin assignment, and gap
//! widening. Each pass owns fresh copies of every structure; nothing is
//! carried over between calls.

pub mod bins;
pub mod normalize;
pub mod week;
pub mod widen;

pub use week::WeekWindow;

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::Serialize;

use crate::types::{Day, Event, RawEvent};

/// Number of day columns in the grid.
pub const DAYS_IN_WEEK: usize = 7;

/// Grid step all event times are rounded to.
pub const TIME_STEP_MINUTES: i64 = 30;

pub(crate) const MINUTE_MS: i64 = 60_000;
pub(crate) const STEP_MS: i64 = TIME_STEP_MINUTES * MINUTE_MS;
pub(crate) const DAY_MS: i64 = 86_400_000;
pub(crate) const WEEK_MS: i64 = 7 * DAY_MS;

/// Fully resolved layout for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout {
    pub week: WeekWindow,
    pub current_day: DateTime<Utc>,
    /// The seven days, Monday first.
    pub days: Vec<Day>,
    /// Single-day events in post-split, post-sort order, each carrying its
    /// resolved bin, width, and week day.
    pub events: Vec<Event>,
}

impl WeekLayout {
    /// Number of bins a given week day was divided into.
    pub fn bins_in_day(&self, week_day: Weekday) -> usize {
        self.days[week_day.num_days_from_monday() as usize]
            .bins
            .len()
    }

    /// Monday-based index of the reference day's column.
    pub fn current_day_index(&self) -> usize {
        self.current_day.weekday().num_days_from_monday() as usize
    }
}

/// Compute the full weekly layout for a feed of raw events.
///
/// This is the engine's single entry point. It is a pure, synchronous
/// computation; callers are expected to serialize refreshes.
pub fn compute_week_layout(raw_events: &[RawEvent], current_day: DateTime<Utc>) -> WeekLayout {
    let week = WeekWindow::containing(current_day);
    let mut days = week.days();
    let mut events = normalize::collect_week_events(raw_events, &week);
    sort_events(&mut events);
    bins::assign_bins(&mut days, &mut events);
    widen::fill_available_gaps(&mut days, &mut events);
    WeekLayout {
        week,
        current_day,
        days,
        events,
    }
}

/// Order events by start time, then duration.
///
/// Exact (start, duration) ties compare as Greater, so each tied event
/// bubbles left past its equals: tied events come out in reverse feed order
/// ("second item wins"). The column-assignment fixtures assert on this, so
/// the comparator must not be replaced with a transitive tie-break. Because
/// it is not a strict weak ordering, sorting is done with a plain insertion
/// sort rather than `slice::sort_by`, which may reject an inconsistent
/// comparator. Event counts are a week's worth, so quadratic is fine.
fn sort_events(events: &mut [Event]) {
    for i in 1..events.len() {
        let mut j = i;
        while j > 0 && compare_events(&events[j - 1], &events[j]) == Ordering::Greater {
            events.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn compare_events(first: &Event, second: &Event) -> Ordering {
    if first.start < second.start {
        Ordering::Less
    } else if first.start > second.start {
        Ordering::Greater
    } else if first.duration_hours < second.duration_hours {
        Ordering::Less
    } else if first.duration_hours > second.duration_hours {
        Ordering::Greater
    } else {
        // Same start, same duration: the later feed entry wins.
        Ordering::Greater
    }
}

//! Bin Assignment
//!
//! Greedy first-fit coloring: each day's events, visited in the globally
//! sorted order, land in the lowest-index bin whose occupant has already
//! ended. Every placement records the free intervals it leaves behind so
//! gap widening can reclaim them later.

use chrono::TimeDelta;

use crate::types::{Bin, Day, Event, Gap};

/// Group events into their days (preserving the given order) and assign
/// each one a bin.
pub fn assign_bins(days: &mut [Day], events: &mut [Event]) {
    for (idx, event) in events.iter().enumerate() {
        days[event.day_index()].events.push(idx);
    }
    for day in days.iter_mut() {
        for pos in 0..day.events.len() {
            let idx = day.events[pos];
            place_event(day, &mut events[idx], idx);
        }
    }
}

/// Find the right bin for an event and put it there, opening a new bin when
/// every existing one is still occupied at the event's start.
fn place_event(day: &mut Day, event: &mut Event, idx: usize) {
    if day.bins.is_empty() {
        open_bin(day, event, idx);
        return;
    }
    for i in 0..day.bins.len() {
        if event.start > day.bins[i].end {
            put_into_bin(&mut day.bins[i], event, i, idx);
            return;
        }
        if i == day.bins.len() - 1 {
            open_bin(day, event, idx);
            return;
        }
    }
}

/// Open a new bin at the next index, seeding its gap history with the free
/// time before and after the event.
fn open_bin(day: &mut Day, event: &mut Event, idx: usize) {
    let one_ms = TimeDelta::milliseconds(1);
    event.bin = day.bins.len();
    day.bins.push(Bin {
        end: event.end,
        events: vec![idx],
        gaps: vec![
            Gap {
                start: day.start,
                end: event.start - one_ms,
            },
            Gap {
                start: event.end + one_ms,
                end: day.end,
            },
        ],
    });
}

/// Place an event into an existing bin and advance its watermark. The event
/// always lands inside the bin's trailing free interval: shrink it when the
/// event abuts it, close it when the event runs to day end, otherwise split
/// it into a hole plus a new trailing interval.
fn put_into_bin(bin: &mut Bin, event: &mut Event, bin_id: usize, idx: usize) {
    let one_ms = TimeDelta::milliseconds(1);
    bin.events.push(idx);
    bin.end = event.end;
    event.bin = bin_id;

    let last = bin.gaps.len() - 1;
    if bin.gaps[last].start == event.start {
        bin.gaps[last].start = event.end + one_ms;
    } else if bin.gaps[last].end == event.end {
        bin.gaps[last].end = event.start - one_ms;
    } else {
        let hole = Gap {
            start: bin.gaps[last].start,
            end: event.start - one_ms,
        };
        bin.gaps[last].start = event.end + one_ms;
        bin.gaps.insert(last, hole);
    }
}

//! Gap Widening
//!
//! After assignment, each event tries to expand its column span rightward
//! through the free intervals of neighboring bins. Gap edits made while one
//! event widens stay visible to the events widened after it.

use chrono::TimeDelta;

use crate::types::{Bin, Day, Event};

/// Widen every event into as many consecutive right-hand bins as its slot
/// fits into. Events are visited in their stored (sorted) order.
pub fn fill_available_gaps(days: &mut [Day], events: &mut [Event]) {
    for idx in 0..events.len() {
        let day = &mut days[events[idx].day_index()];
        let mut bin_number = events[idx].bin;
        loop {
            bin_number += 1;
            let Some(neighbor) = day.bins.get_mut(bin_number) else {
                break;
            };
            if !widen_into(&mut events[idx], neighbor) {
                break;
            }
        }
    }
}

/// Try to claim the event's time slot out of `bin`'s free intervals.
/// Returns true when the event grew one column wider. Gaps that end before
/// the event starts can never serve a later (sorted) event, so they are
/// dropped as they are passed over.
fn widen_into(event: &mut Event, bin: &mut Bin) -> bool {
    let one_ms = TimeDelta::milliseconds(1);
    if bin.gaps.is_empty() {
        // All free time was already claimed; only the span past the bin's
        // last occupant remains.
        if bin.end < event.start {
            event.width += 1;
            return true;
        }
        return false;
    }
    let mut i = 0;
    while i < bin.gaps.len() {
        let gap = bin.gaps[i];
        if event.start > gap.end {
            bin.gaps.remove(i);
            continue;
        }
        if event.start < gap.start {
            return false;
        }
        if event.end > gap.end {
            if event.start >= bin.end {
                // Overrunning the final gap is fine once the bin's last
                // occupant has ended.
                bin.gaps.remove(i);
                event.width += 1;
                return true;
            }
            return false;
        }
        if event.end == gap.end {
            bin.gaps.remove(i);
        } else {
            bin.gaps[i].start = event.end + one_ms;
        }
        event.width += 1;
        return true;
    }
    false
}

//! Event Normalization & Filtering
//!
//! Rounds event times to the 30-minute grid, drops events wholly outside
//! the week window, and splits events spanning midnight into one piece per
//! calendar day touched.

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::{Event, RawEvent};

use super::week::{floor_to_day, WeekWindow};
use super::{MINUTE_MS, STEP_MS};

/// Normalize, filter, and split a raw feed into single-day week events.
///
/// Every returned event spans at most one calendar day and overlaps the
/// week window by at least one millisecond.
pub fn collect_week_events(raw_events: &[RawEvent], week: &WeekWindow) -> Vec<Event> {
    let mut events: Vec<Event> = raw_events
        .iter()
        .filter_map(|raw| {
            let start = round_start_down(raw.start);
            let end = round_end_up(raw.end);
            week.contains(start, end)
                .then(|| Event::new(raw.title.clone(), start, end))
        })
        .collect();
    split_multi_day(&mut events, week);
    events
}

/// Round a start time down to the nearest 30-minute boundary, zeroing
/// seconds and milliseconds.
pub fn round_start_down(t: DateTime<Utc>) -> DateTime<Utc> {
    let rem = t.timestamp_millis().rem_euclid(STEP_MS);
    t - TimeDelta::milliseconds(rem)
}

/// Round an end time up to the 30-minute grid, inclusive: the result is
/// always 1ms before a grid boundary. Only the minute drives the rounding
/// direction; an end sitting on a boundary minute (even with nonzero
/// seconds) normalizes to that boundary minus 1ms.
pub fn round_end_up(t: DateTime<Utc>) -> DateTime<Utc> {
    let ms = t.timestamp_millis();
    let minute = ms - ms.rem_euclid(MINUTE_MS);
    let rem = minute.rem_euclid(STEP_MS);
    let boundary = if rem == 0 {
        minute
    } else {
        minute + (STEP_MS - rem)
    };
    t + TimeDelta::milliseconds(boundary - 1 - ms)
}

/// Split events spanning multiple calendar days into one event per day,
/// carving from the end (last day first). Carved pieces are appended to the
/// working set; pieces outside the window are dropped. Only the original
/// entries are visited — pieces are single-day by construction.
pub fn split_multi_day(events: &mut Vec<Event>, week: &WeekWindow) {
    for i in (0..events.len()).rev() {
        split_event(events, i, week);
    }
}

fn split_event(events: &mut Vec<Event>, i: usize, week: &WeekWindow) {
    loop {
        let event = &events[i];
        // Caller-contract violation; never carve a non-chronological range.
        if event.end < event.start {
            return;
        }
        if event.start.date_naive() == event.end.date_naive() {
            return;
        }
        let piece = slice_last_day(&mut events[i]);
        let piece_in_week = week.contains(piece.start, piece.end);
        let remainder = &events[i];
        if week.contains(remainder.start, remainder.end) {
            if piece_in_week {
                events.push(piece);
            }
            // Keep carving the shortened remainder.
        } else {
            // The remainder fell out of the window; it is replaced by its
            // final in-window piece, or dropped along with it.
            if piece_in_week {
                events[i] = piece;
            }
            return;
        }
    }
}

/// Carve the final calendar day off `event` (midnight to the current end),
/// shrinking the event in place, and return the carved piece.
fn slice_last_day(event: &mut Event) -> Event {
    let piece_start = floor_to_day(event.end);
    let piece = Event::new(event.title.clone(), piece_start, event.end);
    event.end = piece_start - TimeDelta::milliseconds(1);
    event.duration_hours = Event::duration_hours(event.start, event.end);
    piece
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn at(month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, month, day, hour, min, 0)
            .unwrap()
    }

    fn at_s(month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, month, day, hour, min, sec)
            .unwrap()
    }

    fn week() -> WeekWindow {
        // Monday 2015-10-26 .. Sunday 2015-11-01.
        WeekWindow::containing(at(10, 28, 12, 0))
    }

    fn raw(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> RawEvent {
        RawEvent {
            title: title.into(),
            start,
            end,
        }
    }

    fn one_ms() -> TimeDelta {
        TimeDelta::milliseconds(1)
    }

    // ========== start rounding ==========

    #[test]
    fn test_start_rounds_down_within_first_half_hour() {
        assert_eq!(round_start_down(at(10, 26, 8, 10)), at(10, 26, 8, 0));
    }

    #[test]
    fn test_start_rounds_down_within_second_half_hour() {
        assert_eq!(round_start_down(at(10, 26, 8, 40)), at(10, 26, 8, 30));
    }

    #[test]
    fn test_start_on_boundary_unchanged() {
        assert_eq!(round_start_down(at(10, 26, 8, 0)), at(10, 26, 8, 0));
    }

    #[test]
    fn test_start_seconds_cleared() {
        assert_eq!(
            round_start_down(at_s(10, 26, 8, 30, 45)),
            at(10, 26, 8, 30)
        );
    }

    // ========== end rounding ==========

    #[test]
    fn test_end_rounds_up_to_next_boundary() {
        assert_eq!(round_end_up(at(10, 26, 8, 40)), at(10, 26, 9, 0) - one_ms());
    }

    #[test]
    fn test_end_rounds_up_within_first_half_hour() {
        assert_eq!(
            round_end_up(at(10, 26, 9, 15)),
            at(10, 26, 9, 30) - one_ms()
        );
    }

    #[test]
    fn test_end_on_boundary_becomes_boundary_minus_1ms() {
        assert_eq!(round_end_up(at(10, 26, 9, 0)), at(10, 26, 9, 0) - one_ms());
    }

    #[test]
    fn test_end_on_boundary_minute_with_seconds_truncates() {
        // 09:00:30 sits on a boundary minute; seconds are discarded and the
        // end lands 1ms before 09:00, not after it.
        assert_eq!(
            round_end_up(at_s(10, 26, 9, 0, 30)),
            at(10, 26, 9, 0) - one_ms()
        );
    }

    #[test]
    fn test_end_rounding_rolls_over_the_hour() {
        assert_eq!(
            round_end_up(at(10, 26, 9, 59)),
            at(10, 26, 10, 0) - one_ms()
        );
    }

    // ========== filtering ==========

    #[test]
    fn test_out_of_week_event_discarded() {
        let events = collect_week_events(
            &[raw("old", at(10, 20, 10, 0), at(10, 20, 11, 0))],
            &week(),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_in_week_event_kept_and_rounded() {
        let events = collect_week_events(
            &[raw("kept", at(10, 26, 8, 10), at(10, 26, 8, 40))],
            &week(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, at(10, 26, 8, 0));
        assert_eq!(events[0].end, at(10, 26, 9, 0) - one_ms());
        assert!((events[0].duration_hours - 1.0).abs() < f64::EPSILON);
    }

    // ========== splitting ==========

    #[test]
    fn test_single_day_event_not_split() {
        let events = collect_week_events(
            &[raw("one", at(10, 27, 9, 0), at(10, 27, 10, 0))],
            &week(),
        );
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_overnight_event_splits_in_two() {
        let events = collect_week_events(
            &[raw("overnight", at(10, 27, 22, 0), at(10, 28, 1, 0))],
            &week(),
        );
        assert_eq!(events.len(), 2);

        // Remainder keeps its start and stops 1ms before midnight.
        assert_eq!(events[0].start, at(10, 27, 22, 0));
        assert_eq!(events[0].end, at(10, 28, 0, 0) - one_ms());

        // Piece runs from midnight to the rounded end.
        assert_eq!(events[1].start, at(10, 28, 0, 0));
        assert_eq!(events[1].end, at(10, 28, 1, 0) - one_ms());

        for event in &events {
            assert_eq!(event.start.date_naive(), event.end.date_naive());
        }
    }

    #[test]
    fn test_event_entering_week_keeps_only_in_week_days() {
        // Previous Saturday through this Tuesday: Monday and Tuesday stay.
        let events = collect_week_events(
            &[raw("enters", at(10, 24, 12, 0), at(10, 27, 12, 0))],
            &week(),
        );
        assert_eq!(events.len(), 2);
        let days: Vec<Weekday> = events.iter().map(|e| e.week_day).collect();
        assert!(days.contains(&Weekday::Mon));
        assert!(days.contains(&Weekday::Tue));
    }

    #[test]
    fn test_event_spanning_whole_week_yields_seven_pieces() {
        // Previous Saturday through next Tuesday: all seven week days.
        let events = collect_week_events(
            &[raw("spans", at(10, 24, 12, 0), at(11, 3, 12, 0))],
            &week(),
        );
        assert_eq!(events.len(), 7);
        for event in &events {
            assert_eq!(event.start.date_naive(), event.end.date_naive());
            assert!(week().contains(event.start, event.end));
        }
    }

    #[test]
    fn test_event_leaving_week_keeps_only_in_week_days() {
        // This Friday through next Tuesday: Friday, Saturday, Sunday stay.
        let events = collect_week_events(
            &[raw("leaves", at(10, 30, 12, 0), at(11, 3, 12, 0))],
            &week(),
        );
        assert_eq!(events.len(), 3);
        let days: Vec<Weekday> = events.iter().map(|e| e.week_day).collect();
        assert_eq!(days.len(), 3);
        assert!(days.contains(&Weekday::Fri));
        assert!(days.contains(&Weekday::Sat));
        assert!(days.contains(&Weekday::Sun));
    }

    #[test]
    fn test_non_chronological_event_does_not_loop() {
        // end < start is a caller-contract violation; the splitter must
        // bail out rather than carve backwards forever.
        let events = collect_week_events(
            &[raw("bad", at(10, 28, 10, 0), at(10, 27, 10, 0))],
            &week(),
        );
        assert_eq!(events.len(), 1);
    }
}

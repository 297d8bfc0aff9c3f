//! XML feed parser
//!
//! The feed is a flat document of `<item>` entries, each carrying `<title>`,
//! `<start>`, and `<end>` (Unix-second timestamps), plus one `<dayinweek>`
//! element naming the current day. Items with missing or unreadable fields
//! are skipped with a warning; a feed without a usable `<dayinweek>` is
//! rejected outright, since the week window cannot be resolved without it.

use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;

use crate::types::{RawEvent, Result, WeekgridError};

/// Parsed feed: the reference day plus the raw events, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub current_day: DateTime<Utc>,
    pub events: Vec<RawEvent>,
}

/// Which element's text content the parser is currently inside.
#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Start,
    End,
    DayInWeek,
}

/// An `<item>` under construction; promoted to a [`RawEvent`] only when all
/// three fields were read successfully.
#[derive(Default)]
struct PendingItem {
    title: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

/// Read and parse a feed file.
pub fn read_feed_file(path: &Path) -> Result<Feed> {
    let text = std::fs::read_to_string(path)?;
    parse_feed(&text)
}

/// Parse a feed document from a string.
pub fn parse_feed(xml: &str) -> Result<Feed> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current_day: Option<DateTime<Utc>> = None;
    let mut events: Vec<RawEvent> = Vec::new();
    let mut item: Option<PendingItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            XmlEvent::Start(e) => match e.local_name().as_ref() {
                b"item" => item = Some(PendingItem::default()),
                b"title" if item.is_some() => field = Some(Field::Title),
                b"start" if item.is_some() => field = Some(Field::Start),
                b"end" if item.is_some() => field = Some(Field::End),
                b"dayinweek" => field = Some(Field::DayInWeek),
                _ => field = None,
            },
            XmlEvent::Text(t) => {
                let text = t.unescape()?;
                match (field, item.as_mut()) {
                    (Some(Field::Title), Some(pending)) => {
                        pending.title = Some(text.into_owned());
                    }
                    (Some(Field::Start), Some(pending)) => {
                        pending.start = parse_timestamp(&text);
                    }
                    (Some(Field::End), Some(pending)) => {
                        pending.end = parse_timestamp(&text);
                    }
                    (Some(Field::DayInWeek), _) => {
                        current_day = parse_timestamp(&text);
                    }
                    _ => {}
                }
            }
            XmlEvent::End(e) => {
                if e.local_name().as_ref() == b"item" {
                    if let Some(pending) = item.take() {
                        match (pending.title, pending.start, pending.end) {
                            (Some(title), Some(start), Some(end)) => {
                                events.push(RawEvent { title, start, end });
                            }
                            (title, _, _) => {
                                eprintln!(
                                    "[weekgrid] Warning: Skipping feed item {:?} with missing or invalid fields",
                                    title.as_deref().unwrap_or("<untitled>")
                                );
                            }
                        }
                    }
                }
                field = None;
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    let current_day = current_day.ok_or_else(|| {
        WeekgridError::Feed("feed has no usable <dayinweek> element".into())
    })?;

    Ok(Feed {
        current_day,
        events,
    })
}

/// Parse a Unix-second timestamp, rejecting non-numeric or out-of-range
/// values.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let seconds = text.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(seconds, 0)
}

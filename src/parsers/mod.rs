//! Feed parsing
//!
//! Converts the XML event feed into raw events plus the reference day the
//! layout is computed around.

pub mod feed;

pub use feed::{parse_feed, read_feed_file, Feed};

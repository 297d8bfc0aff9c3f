//! weekgrid — weekly calendar layout engine.
//!
//! Consumes a feed of time-stamped events and resolves visual overlap by
//! assigning each event a column ("bin") within its day, then widening it
//! into adjacent free columns. See [`layout::compute_week_layout`].

pub mod cli;
pub mod layout;
pub mod parsers;
pub mod types;

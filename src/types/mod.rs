//! Type definitions for weekgrid

mod day;
mod error;
mod event;

pub use day::*;
pub use error::*;
pub use event::*;

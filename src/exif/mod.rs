//! Date-taken reading and length-invariant patching.
//!
//! This module provides two main functions:
//!
//! - [`read_date_taken`] — Read the `DateTimeOriginal` field of a JPEG
//! - [`apply_shift`] — Move that field by a signed day/hour/minute shift
//!
//! The patch never re-encodes the container. The old date text is located in
//! the raw file bytes and overwritten with a new date of identical length,
//! so every segment length and IFD offset around it stays valid.

mod reader;
mod shift;

pub use reader::date_taken_text;
pub use shift::{TimeShift, apply_shift, read_date_taken};

/// The fixed textual form of the date-taken field, e.g. `2020:01:15 10:30:00`.
pub const DATE_TAKEN_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Byte length of a date-taken value in [`DATE_TAKEN_FORMAT`].
pub const DATE_TAKEN_LEN: usize = 19;

use std::borrow::Cow;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};

use crate::bytes;
use crate::error::ShiftError;

use super::{DATE_TAKEN_FORMAT, DATE_TAKEN_LEN, reader};

/// A signed shift to apply to a date-taken timestamp.
///
/// Granularity matches the field itself: whole days, hours and minutes.
/// Whether a shift counts as zero is judged on the combined duration, so
/// `{ days: 1, hours: -24, minutes: 0 }` is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeShift {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl TimeShift {
    /// The combined duration, or `None` when the components overflow.
    pub fn duration(&self) -> Option<Duration> {
        let days = Duration::try_days(self.days)?;
        let hours = Duration::try_hours(self.hours)?;
        let minutes = Duration::try_minutes(self.minutes)?;
        days.checked_add(&hours)?.checked_add(&minutes)
    }

    /// Whether the net shift is zero.
    pub fn is_zero(&self) -> bool {
        self.duration().is_some_and(|span| span.is_zero())
    }
}

/// What one run of the patch pipeline did.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    /// Zero shift requested: the date was read and parsed, nothing written.
    Skipped { original: NaiveDateTime },
    /// The date was patched and the destination written.
    Applied { shifted: NaiveDateTime },
}

/// Read the date-taken field of `source` without modifying anything.
pub async fn read_date_taken(source: &Path) -> Result<NaiveDateTime, ShiftError> {
    match run(source, None, TimeShift::default()).await? {
        Outcome::Skipped { original } | Outcome::Applied { shifted: original } => Ok(original),
    }
}

/// Shift the date-taken field of `source` by `shift` and write the patched
/// bytes to `destination`. Returns the new date-taken value.
///
/// `source` and `destination` may be the same path, in which case the file
/// is patched in place. A zero net shift is rejected before the source is
/// even read; use [`read_date_taken`] to inspect a file without changing it.
pub async fn apply_shift(
    source: &Path,
    destination: &Path,
    shift: TimeShift,
) -> Result<NaiveDateTime, ShiftError> {
    if shift.is_zero() {
        return Err(ShiftError::InvalidArgument(
            "time shift must not be zero".to_string(),
        ));
    }
    match run(source, Some(destination), shift).await? {
        Outcome::Applied { shifted } => Ok(shifted),
        // run() skips only on a zero net shift, which the guard above caught.
        Outcome::Skipped { .. } => Err(ShiftError::InvalidArgument(
            "time shift must not be zero".to_string(),
        )),
    }
}

/// Drive one patch through its stages: read the whole file, locate the date
/// text, compute the shifted text, replace every occurrence, verify the
/// size is unchanged, write.
///
/// A zero `shift` stops after the compute stage and reports [`Outcome::Skipped`];
/// that is the read-only path, not an error. Any failure before the write
/// stage leaves the filesystem untouched.
async fn run(
    source: &Path,
    destination: Option<&Path>,
    shift: TimeShift,
) -> Result<Outcome, ShiftError> {
    let source_bytes = tokio::fs::read(source).await?;

    let original_text = reader::date_taken_text(&source_bytes)?;
    let original = parse_date_taken(&original_text)?;

    if shift.is_zero() {
        return Ok(Outcome::Skipped { original });
    }

    let destination = destination.ok_or_else(|| {
        ShiftError::InvalidArgument("a destination path is required to apply a shift".to_string())
    })?;
    let span = shift
        .duration()
        .ok_or_else(|| ShiftError::InvalidArgument("time shift is out of range".to_string()))?;
    let shifted = original.checked_add_signed(span).ok_or_else(|| {
        ShiftError::InvalidArgument(format!(
            "shifting {original_text} leaves the representable date range"
        ))
    })?;
    let shifted_text = shifted.format(DATE_TAKEN_FORMAT).to_string();

    log::debug!("{}: {original_text} -> {shifted_text}", source.display());

    // Patch every occurrence of the text, not just the tag that was read:
    // DateTimeDigitized and maker-note copies usually carry the same value
    // and must stay consistent with it.
    let patched = bytes::replace(
        &source_bytes,
        original_text.as_bytes(),
        shifted_text.as_bytes(),
        None,
    )?;
    if let Cow::Borrowed(_) = patched {
        log::warn!(
            "{}: date text not found in the raw bytes, writing an unmodified copy",
            source.display()
        );
    }

    // A size change would invalidate segment lengths and IFD offsets.
    if patched.len() != source_bytes.len() {
        return Err(ShiftError::LengthMismatch {
            source_len: source_bytes.len(),
            patched_len: patched.len(),
        });
    }

    tokio::fs::write(destination, patched.as_ref()).await?;

    Ok(Outcome::Applied { shifted })
}

/// Parse a located date string strictly against the fixed 19-byte form.
///
/// `chrono` alone would accept unpadded fields like `2020:1:5 9:30:00`,
/// which can never appear in a well-formed tag and would break the
/// equal-length guarantee, so the length is checked first.
fn parse_date_taken(text: &str) -> Result<NaiveDateTime, ShiftError> {
    if text.len() != DATE_TAKEN_LEN {
        return Err(ShiftError::Parse {
            value: text.to_string(),
        });
    }
    NaiveDateTime::parse_from_str(text, DATE_TAKEN_FORMAT).map_err(|_| ShiftError::Parse {
        value: text.to_string(),
    })
}

use std::io::Cursor;

use nom_exif::{EntryValue, Exif, ExifIter, ExifTag, MediaParser, MediaSource};

use crate::error::ShiftError;

use super::DATE_TAKEN_FORMAT;

/// Extract the `DateTimeOriginal` text from an in-memory image.
///
/// The returned string is the value as it sits in the raw file bytes, the
/// fixed `YYYY:MM:DD HH:MM:SS` form without the trailing NUL the container
/// stores, so it can be used directly as a byte-patch pattern.
pub fn date_taken_text(bytes: &[u8]) -> Result<String, ShiftError> {
    let ms = MediaSource::seekable(Cursor::new(bytes))
        .map_err(|e| ShiftError::UnsupportedContainer(e.to_string()))?;
    if !ms.has_exif() {
        return Err(ShiftError::UnsupportedContainer(
            "media format carries no EXIF metadata".to_string(),
        ));
    }

    let mut parser = MediaParser::new();
    let iter: ExifIter = match parser.parse(ms) {
        Ok(iter) => iter,
        Err(e) => {
            log::debug!("No readable EXIF block: {e}");
            return Err(ShiftError::FieldNotFound);
        }
    };
    let exif: Exif = iter.into();

    let value = exif
        .get(ExifTag::DateTimeOriginal)
        .ok_or(ShiftError::FieldNotFound)?;
    Ok(entry_to_date_text(value))
}

/// Render an entry value in the fixed date-taken form.
///
/// The parser decodes well-formed date tags into `Time` entries; the field
/// is local wall-clock time, so re-rendering the components reproduces the
/// text stored in the file. Values kept as text get the container's NUL and
/// space padding trimmed instead.
fn entry_to_date_text(value: &EntryValue) -> String {
    match value {
        EntryValue::Time(time) => time.format(DATE_TAKEN_FORMAT).to_string(),
        EntryValue::Text(text) => text.trim_end_matches(['\0', ' ']).to_string(),
        other => other.to_string(),
    }
}

//! Shared JPEG fixture builder for the end-to-end tests.
//!
//! Builds a minimal but structurally real JPEG: SOI, one APP1 segment
//! holding a little-endian TIFF structure whose IFD0 points at an Exif IFD
//! with the date tags, then EOI. Small enough to assemble by hand, real
//! enough for the metadata parser.

#![allow(dead_code)]

const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_DATE_TIME_DIGITIZED: u16 = 0x9004;
const TAG_EXIF_VERSION: u16 = 0x9000;

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TYPE_UNDEFINED: u16 = 7;

/// A JPEG whose Exif block stores `date` as DateTimeOriginal, plus the same
/// role under DateTimeDigitized when `digitized` is given.
pub fn jpeg_with_date_taken(date: &str, digitized: Option<&str>) -> Vec<u8> {
    let mut entries = vec![(TAG_DATE_TIME_ORIGINAL, date)];
    if let Some(text) = digitized {
        entries.push((TAG_DATE_TIME_DIGITIZED, text));
    }
    wrap_jpeg(&tiff_block(&entries))
}

/// A JPEG with a well-formed Exif block that carries no date tags at all.
pub fn jpeg_without_date_taken() -> Vec<u8> {
    let mut tiff = tiff_header();

    // IFD0: a single pointer to the Exif IFD, which starts right after it.
    tiff.extend_from_slice(&1u16.to_le_bytes());
    put_entry(&mut tiff, TAG_EXIF_IFD_POINTER, TYPE_LONG, 1, 26);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD: only ExifVersion, stored inline in the value field.
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&TAG_EXIF_VERSION.to_le_bytes());
    tiff.extend_from_slice(&TYPE_UNDEFINED.to_le_bytes());
    tiff.extend_from_slice(&4u32.to_le_bytes());
    tiff.extend_from_slice(b"0230");
    tiff.extend_from_slice(&0u32.to_le_bytes());

    wrap_jpeg(&tiff)
}

/// Re-emit a fixture JPEG with a comment segment (inserted before EOI)
/// containing `text`. Gives the raw file an extra copy of a date string
/// outside the Exif block.
pub fn with_comment(jpeg: &[u8], text: &str) -> Vec<u8> {
    let (body, eoi) = jpeg.split_at(jpeg.len() - 2);
    let mut out = body.to_vec();
    out.extend_from_slice(&[0xFF, 0xFE]);
    out.extend_from_slice(&((text.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(eoi);
    out
}

fn wrap_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8]; // SOI
    let payload_len = 2 + 6 + tiff.len(); // length field itself + "Exif\0\0" + TIFF
    jpeg.extend_from_slice(&[0xFF, 0xE1]); // APP1
    jpeg.extend_from_slice(&(payload_len as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]); // EOI
    jpeg
}

fn tiff_header() -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 right after the header
    tiff
}

fn tiff_block(dates: &[(u16, &str)]) -> Vec<u8> {
    let mut tiff = tiff_header();

    // IFD0 occupies 8..26, so the Exif IFD starts at 26.
    let exif_ifd_offset: u32 = 26;
    let value_area = exif_ifd_offset + 2 + 12 * dates.len() as u32 + 4;

    tiff.extend_from_slice(&1u16.to_le_bytes());
    put_entry(&mut tiff, TAG_EXIF_IFD_POINTER, TYPE_LONG, 1, exif_ifd_offset);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD: ASCII date values live past the entry table, NUL-terminated.
    let mut values = Vec::new();
    tiff.extend_from_slice(&(dates.len() as u16).to_le_bytes());
    for (tag, text) in dates {
        let offset = value_area + values.len() as u32;
        put_entry(&mut tiff, *tag, TYPE_ASCII, text.len() as u32 + 1, offset);
        values.extend_from_slice(text.as_bytes());
        values.push(0);
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&values);

    tiff
}

fn put_entry(tiff: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    tiff.extend_from_slice(&tag.to_le_bytes());
    tiff.extend_from_slice(&kind.to_le_bytes());
    tiff.extend_from_slice(&count.to_le_bytes());
    tiff.extend_from_slice(&value.to_le_bytes());
}

//! # Metadata Module
//!
//! Reads the capture time embedded in a photo's EXIF block.
//!
//! ## Outcome
//! Every way of not finding a date is an ordinary value
//! ([`MetadataMiss`]), not a failure: the timestamp resolver simply moves on
//! to the next source.
//!
//! ## Time zones
//! `DateTimeOriginal` is a wall-clock value. When the file also carries
//! `OffsetTimeOriginal` the value is read in that offset; otherwise it is
//! taken as UTC. Either way the wall-clock fields are what end up naming the
//! output folder, exactly as the camera recorded them.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Why no capture time could be read
#[derive(Error, Debug)]
pub enum MetadataMiss {
    #[error("cannot open file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("no EXIF metadata: {0}")]
    NoExif(String),

    #[error("EXIF has no DateTimeOriginal field")]
    NoDateField,

    #[error("EXIF DateTimeOriginal is malformed: {0}")]
    MalformedDate(String),
}

/// Read `DateTimeOriginal` (and `OffsetTimeOriginal` when present).
pub fn read_capture_time(path: &Path) -> Result<DateTime<FixedOffset>, MetadataMiss> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| MetadataMiss::NoExif(e.to_string()))?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or(MetadataMiss::NoDateField)?;
    let raw = first_ascii(&field.value).ok_or(MetadataMiss::NoDateField)?;

    let mut datetime = exif::DateTime::from_ascii(raw)
        .map_err(|e| MetadataMiss::MalformedDate(e.to_string()))?;

    if let Some(offset_field) = exif.get_field(Tag::OffsetTimeOriginal, In::PRIMARY) {
        if let Some(offset_raw) = first_ascii(&offset_field.value) {
            if let Err(e) = datetime.parse_offset(offset_raw) {
                debug!(
                    path = %path.display(),
                    "Ignoring malformed OffsetTimeOriginal ({}), reading as UTC",
                    e
                );
            }
        }
    }

    to_chrono(&datetime)
}

fn first_ascii(value: &Value) -> Option<&[u8]> {
    match value {
        Value::Ascii(vec) => vec.first().map(|v| v.as_slice()),
        _ => None,
    }
}

fn to_chrono(datetime: &exif::DateTime) -> Result<DateTime<FixedOffset>, MetadataMiss> {
    let malformed = || MetadataMiss::MalformedDate(datetime.to_string());

    let naive: NaiveDateTime = NaiveDate::from_ymd_opt(
        i32::from(datetime.year),
        u32::from(datetime.month),
        u32::from(datetime.day),
    )
    .and_then(|date| {
        date.and_hms_opt(
            u32::from(datetime.hour),
            u32::from(datetime.minute),
            u32::from(datetime.second),
        )
    })
    .ok_or_else(malformed)?;

    let offset_seconds = datetime.offset.map_or(0, |minutes| i32::from(minutes) * 60);
    let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(malformed)?;

    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(malformed)
}
